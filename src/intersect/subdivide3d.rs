//! Recursive subdivision intersection of freeform 3D curves.
//!
//! Same engine shape as the planar version: fragment classification,
//! bounding-box pruning, midpoint splits, flat-leaf resolution, Newton
//! refinement. The half-space prune has no sound 3D analog for a line
//! carrier, so pruning relies on the boxes alone.

use crate::bnd::BndBox3d;
use crate::curve3d::{Bezier3d, Curve3d};
use crate::gp::Pnt;
use crate::intersect::newton;
use crate::intersect::result::{push_unique_3d, IntersectionPoint3d};
use crate::intersect::subdivide::MAX_DEPTH;
use crate::precision;
use crate::tolerance::Tolerance;

/// A freeform 3D operand with its original curve and the Bezier
/// rendition of the span `[sp, ep]`.
pub struct FragmentSource3d<'a> {
    pub curve: &'a Curve3d,
    pub bezier: Bezier3d,
    pub sp: f64,
    pub ep: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FragmentShape {
    Point,
    Line,
    Bezier,
}

struct Fragment {
    bezier: Bezier3d,
    sp: f64,
    ep: f64,
    shape: FragmentShape,
    bbox: BndBox3d,
    children: Option<(usize, usize)>,
}

impl Fragment {
    fn new(bezier: Bezier3d, sp: f64, ep: f64, dtol: f64) -> Self {
        let shape = classify(&bezier, dtol);
        let mut bbox = bezier.enclosing_box();
        bbox.enlarge(dtol);
        Fragment {
            bezier,
            sp,
            ep,
            shape,
            bbox,
            children: None,
        }
    }

    fn first(&self) -> Pnt {
        self.bezier.pole(0)
    }

    fn last(&self) -> Pnt {
        self.bezier.pole(self.bezier.degree())
    }

    fn mid_param(&self) -> f64 {
        0.5 * (self.sp + self.ep)
    }

    fn param_at(&self, ratio: f64) -> f64 {
        self.sp + ratio * (self.ep - self.sp)
    }
}

fn classify(bezier: &Bezier3d, dtol: f64) -> FragmentShape {
    let poles = bezier.poles();
    let p0 = poles[0];
    let pn = poles[poles.len() - 1];
    let chord = pn - p0;
    let len = chord.magnitude();
    if len <= dtol && poles.iter().all(|p| p.distance(&p0) <= dtol) {
        return FragmentShape::Point;
    }
    if len > precision::RESOLUTION {
        let interior_on_chord = poles[1..poles.len() - 1].iter().all(|p| {
            let v = *p - p0;
            let off = chord.crossed(&v).magnitude() / len;
            let along = chord.dot(&v) / len;
            off <= dtol && along >= -dtol && along <= len + dtol
        });
        if interior_on_chord {
            return FragmentShape::Line;
        }
    }
    FragmentShape::Bezier
}

struct Engine<'a> {
    curve_a: &'a Curve3d,
    curve_b: &'a Curve3d,
    frags_a: Vec<Fragment>,
    frags_b: Vec<Fragment>,
    points: Vec<IntersectionPoint3d>,
    ceiling_hit: bool,
}

/// Intersects two freeform 3D operands; overlap stretches are not
/// reported in 3D, only transversal points.
pub fn intersect_fragments_3d(
    a: &FragmentSource3d<'_>,
    b: &FragmentSource3d<'_>,
) -> Vec<IntersectionPoint3d> {
    let dtol = Tolerance::current().distance;
    let mut engine = Engine {
        curve_a: a.curve,
        curve_b: b.curve,
        frags_a: vec![Fragment::new(a.bezier.clone(), a.sp, a.ep, dtol)],
        frags_b: vec![Fragment::new(b.bezier.clone(), b.sp, b.ep, dtol)],
        points: Vec::new(),
        ceiling_hit: false,
    };
    engine.run(dtol);
    engine.points
}

impl Engine<'_> {
    fn run(&mut self, dtol: f64) {
        let mut stack: Vec<(usize, usize, u32)> = vec![(0, 0, 0)];
        while let Some((ia, ib, depth)) = stack.pop() {
            if self.frags_a[ia].bbox.is_out(&self.frags_b[ib].bbox) {
                continue;
            }
            let shape_a = self.frags_a[ia].shape;
            let shape_b = self.frags_b[ib].shape;
            if shape_a != FragmentShape::Bezier && shape_b != FragmentShape::Bezier {
                self.resolve_leaf(ia, ib, dtol);
                continue;
            }
            if depth >= MAX_DEPTH {
                if !self.ceiling_hit {
                    self.ceiling_hit = true;
                    log::debug!("subdivision depth ceiling {MAX_DEPTH} reached, branch abandoned");
                }
                continue;
            }
            let ids_a = if shape_a == FragmentShape::Bezier {
                let (l, r) = split(&mut self.frags_a, ia, dtol);
                vec![l, r]
            } else {
                vec![ia]
            };
            let ids_b = if shape_b == FragmentShape::Bezier {
                let (l, r) = split(&mut self.frags_b, ib, dtol);
                vec![l, r]
            } else {
                vec![ib]
            };
            for &ja in &ids_a {
                for &jb in &ids_b {
                    stack.push((ja, jb, depth + 1));
                }
            }
        }
    }

    fn resolve_leaf(&mut self, ia: usize, ib: usize, dtol: f64) {
        let (shape_a, shape_b) = (self.frags_a[ia].shape, self.frags_b[ib].shape);
        match (shape_a, shape_b) {
            (FragmentShape::Point, FragmentShape::Point) => {
                let fa = &self.frags_a[ia];
                let fb = &self.frags_b[ib];
                let pa = fa.first().lerp(&fa.last(), 0.5);
                let pb = fb.first().lerp(&fb.last(), 0.5);
                if pa.distance(&pb) <= 2.0 * dtol {
                    self.refine_and_push(fa.mid_param(), fb.mid_param());
                }
            }
            (FragmentShape::Point, FragmentShape::Line) => {
                if let Some((ta, tb)) = point_on_line(&self.frags_a[ia], &self.frags_b[ib], dtol) {
                    self.refine_and_push(ta, tb);
                }
            }
            (FragmentShape::Line, FragmentShape::Point) => {
                if let Some((tb, ta)) = point_on_line(&self.frags_b[ib], &self.frags_a[ia], dtol) {
                    self.refine_and_push(ta, tb);
                }
            }
            (FragmentShape::Line, FragmentShape::Line) => {
                self.resolve_line_pair(ia, ib, dtol);
            }
            _ => {}
        }
    }

    /// Skew segment pair: candidates exist only when the common
    /// perpendicular is shorter than the tolerance.
    fn resolve_line_pair(&mut self, ia: usize, ib: usize, dtol: f64) {
        let fa = &self.frags_a[ia];
        let fb = &self.frags_b[ib];
        let a0 = fa.first();
        let va = fa.last() - a0;
        let b0 = fb.first();
        let vb = fb.last() - b0;
        let la = va.magnitude();
        let lb = vb.magnitude();
        if la <= precision::RESOLUTION || lb <= precision::RESOLUTION {
            return;
        }
        let n = va.crossed(&vb);
        let n2 = n.square_magnitude();
        let offset = b0 - a0;
        if n2 <= (dtol * la.min(lb)).powi(2) {
            // parallel: transversal points cannot exist; a collinear
            // overlap is not a point result in 3D
            return;
        }
        if offset.dot(&n).abs() / n2.sqrt() > dtol {
            return;
        }
        let ra = offset.crossed(&vb).dot(&n) / n2;
        let rb = offset.crossed(&va).dot(&n) / n2;
        let (ea, eb) = (dtol / la, dtol / lb);
        if ra < -ea || ra > 1.0 + ea || rb < -eb || rb > 1.0 + eb {
            return;
        }
        let (ta, tb) = (fa.param_at(ra), fb.param_at(rb));
        self.refine_and_push(ta, tb);
    }

    fn refine_and_push(&mut self, ta0: f64, tb0: f64) {
        if let Some((ta, tb, mid)) = newton::refine_3d(self.curve_a, self.curve_b, ta0, tb0) {
            push_unique_3d(&mut self.points, IntersectionPoint3d::new(mid, ta, tb));
        }
    }
}

fn point_on_line(point: &Fragment, line: &Fragment, dtol: f64) -> Option<(f64, f64)> {
    let p = point.first().lerp(&point.last(), 0.5);
    let p0 = line.first();
    let chord = line.last() - p0;
    let len2 = chord.square_magnitude();
    if len2 <= precision::RESOLUTION {
        return None;
    }
    let v = p - p0;
    let off = chord.crossed(&v).magnitude() / len2.sqrt();
    if off > 2.0 * dtol {
        return None;
    }
    let ratio = chord.dot(&v) / len2;
    let slack = dtol / len2.sqrt();
    if ratio < -slack || ratio > 1.0 + slack {
        return None;
    }
    Some((point.mid_param(), line.param_at(ratio.clamp(0.0, 1.0))))
}

fn split(frags: &mut Vec<Fragment>, id: usize, dtol: f64) -> (usize, usize) {
    if let Some(children) = frags[id].children {
        return children;
    }
    let mid = frags[id].mid_param();
    let (left, right) = match frags[id].bezier.divide(0.5) {
        Ok(halves) => halves,
        Err(_) => unreachable!("0.5 is an interior ratio"),
    };
    let (sp, ep) = (frags[id].sp, frags[id].ep);
    let l = frags.len();
    frags.push(Fragment::new(left, sp, mid, dtol));
    let r = frags.len();
    frags.push(Fragment::new(right, mid, ep, dtol));
    frags[id].children = Some((l, r));
    (l, r)
}
