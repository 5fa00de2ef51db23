//! Recursive subdivision intersection of freeform 2D curves.
//!
//! Both operands enter as Bezier fragments carrying the parameter range
//! they cover on their original curve. Fragments are classified by their
//! control polygon as Point, Line or Bezier; pairs are pruned by
//! bounding-box separation and, against a Line fragment, by the
//! half-space test on the rival's control points. Surviving Bezier
//! fragments split at their midpoint until both sides flatten out, and
//! the flat leaves are resolved analytically. Point candidates are
//! Newton-refined on the original curves; a candidate whose refinement
//! diverges is dropped.

use crate::bnd::BndBox2d;
use crate::curve2d::{Bezier2d, Curve2d};
use crate::gp::{Pnt2d, Vec2d};
use crate::intersect::newton;
use crate::intersect::result::{InterferenceList2d, IntersectionPoint2d, OverlapCurve2d};
use crate::precision;
use crate::tolerance::Tolerance;

pub(crate) const MAX_DEPTH: u32 = 64;

/// A freeform operand: the original curve (for Newton refinement) plus
/// the Bezier rendition of the span `[sp, ep]` of its parameter range.
pub struct FragmentSource<'a> {
    pub curve: &'a Curve2d,
    pub bezier: Bezier2d,
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
    bezier: Bezier2d,
    sp: f64,
    ep: f64,
    shape: FragmentShape,
    bbox: BndBox2d,
    children: Option<(usize, usize)>,
}

impl Fragment {
    fn new(bezier: Bezier2d, sp: f64, ep: f64, dtol: f64) -> Self {
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

    fn first(&self) -> Pnt2d {
        self.bezier.pole(0)
    }

    fn last(&self) -> Pnt2d {
        self.bezier.pole(self.bezier.degree())
    }

    fn mid_param(&self) -> f64 {
        0.5 * (self.sp + self.ep)
    }

    /// Maps a chord ratio back to the original curve parameter.
    fn param_at(&self, ratio: f64) -> f64 {
        self.sp + ratio * (self.ep - self.sp)
    }
}

fn classify(bezier: &Bezier2d, dtol: f64) -> FragmentShape {
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
            let off = chord.crossed(&v).abs() / len;
            let along = chord.dot(&v) / len;
            off <= dtol && along >= -dtol && along <= len + dtol
        });
        if interior_on_chord {
            return FragmentShape::Line;
        }
    }
    FragmentShape::Bezier
}

/// All control points of `rival` strictly on one side of the carrier
/// line of a Line fragment.
fn half_space_separated(line: &Fragment, rival: &Fragment, dtol: f64) -> bool {
    let p0 = line.first();
    let chord = line.last() - p0;
    let len = chord.magnitude();
    if len <= precision::RESOLUTION {
        return false;
    }
    let mut positive = 0usize;
    let mut negative = 0usize;
    for p in rival.bezier.poles() {
        let d = chord.crossed(&(*p - p0)) / len;
        if d > dtol {
            positive += 1;
        } else if d < -dtol {
            negative += 1;
        } else {
            return false;
        }
    }
    positive == 0 || negative == 0
}

struct Engine<'a> {
    curve_a: &'a Curve2d,
    curve_b: &'a Curve2d,
    frags_a: Vec<Fragment>,
    frags_b: Vec<Fragment>,
    list: InterferenceList2d,
    splits: usize,
    ceiling_hit: bool,
}

/// Intersects two freeform operands, returning the deduplicated
/// interference list (points and overlap intervals, in original curve
/// parameters).
pub fn intersect_fragments(a: &FragmentSource<'_>, b: &FragmentSource<'_>) -> InterferenceList2d {
    let dtol = Tolerance::current().distance;
    let mut engine = Engine {
        curve_a: a.curve,
        curve_b: b.curve,
        frags_a: vec![Fragment::new(a.bezier.clone(), a.sp, a.ep, dtol)],
        frags_b: vec![Fragment::new(b.bezier.clone(), b.sp, b.ep, dtol)],
        list: InterferenceList2d::new(),
        splits: 0,
        ceiling_hit: false,
    };
    engine.run(dtol);
    let mut list = engine.list;
    list.cleanup();
    list
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
            if shape_a == FragmentShape::Line
                && half_space_separated(&self.frags_a[ia], &self.frags_b[ib], dtol)
            {
                continue;
            }
            if shape_b == FragmentShape::Line
                && half_space_separated(&self.frags_b[ib], &self.frags_a[ia], dtol)
            {
                continue;
            }
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
            let split_a = shape_a == FragmentShape::Bezier;
            let split_b = shape_b == FragmentShape::Bezier;
            let ids_a = if split_a {
                let (l, r) = split(&mut self.frags_a, ia, dtol);
                self.splits += 1;
                vec![l, r]
            } else {
                vec![ia]
            };
            let ids_b = if split_b {
                let (l, r) = split(&mut self.frags_b, ib, dtol);
                self.splits += 1;
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
        let cross = va.crossed(&vb);
        let offset = b0 - a0;
        if cross.abs() <= dtol * la.min(lb) {
            // near parallel: either a shared stretch or nothing
            let off0 = va.crossed(&offset).abs() / la;
            let off1 = va.crossed(&(fb.last() - a0)).abs() / la;
            if off0 > dtol || off1 > dtol {
                return;
            }
            let r0 = va.dot(&offset) / (la * la);
            let r1 = va.dot(&(fb.last() - a0)) / (la * la);
            let lo = r0.min(r1).max(0.0);
            let hi = r0.max(r1).min(1.0);
            if hi - lo <= 0.0 {
                return;
            }
            let world_lo = a0.translated(va.scaled(lo));
            let world_hi = a0.translated(va.scaled(hi));
            let rb_lo = vb.dot(&(world_lo - b0)) / (lb * lb);
            let rb_hi = vb.dot(&(world_hi - b0)) / (lb * lb);
            let (sa, sb) = (fa.param_at(lo), fa.param_at(hi));
            self.list.push_overlap(OverlapCurve2d {
                range_a: (sa, sb),
                range_b: (fb.param_at(rb_lo.clamp(0.0, 1.0)), fb.param_at(rb_hi.clamp(0.0, 1.0))),
            });
            return;
        }
        let ra = offset.crossed(&vb) / cross;
        let rb = offset.crossed(&va) / cross;
        let (ea, eb) = (precision::parametric(dtol, la), precision::parametric(dtol, lb));
        if ra < -ea || ra > 1.0 + ea || rb < -eb || rb > 1.0 + eb {
            return;
        }
        let (ta, tb) = (fa.param_at(ra), fb.param_at(rb));
        self.refine_and_push(ta, tb);
    }

    fn refine_and_push(&mut self, ta0: f64, tb0: f64) {
        if let Some((ta, tb, mid)) = newton::refine_2d(self.curve_a, self.curve_b, ta0, tb0) {
            self.list
                .push_point(IntersectionPoint2d::new(mid, ta, tb));
        }
    }
}

/// Projects a Point fragment onto a Line fragment; returns (point
/// param, line param) when the projection stays on the extent.
fn point_on_line(point: &Fragment, line: &Fragment, dtol: f64) -> Option<(f64, f64)> {
    let p = point.first().lerp(&point.last(), 0.5);
    let p0 = line.first();
    let chord = line.last() - p0;
    let len2 = chord.square_magnitude();
    if len2 <= precision::RESOLUTION {
        return None;
    }
    let v = p - p0;
    let off = chord.crossed(&v).abs() / len2.sqrt();
    if off > 2.0 * dtol {
        return None;
    }
    let ratio = chord.dot(&v) / len2;
    let slack = precision::parametric(dtol, len2.sqrt());
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
    // the split never fails for an interior ratio
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
