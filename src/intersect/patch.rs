//! Intersection of analytic 3D curves with Bezier surface patches.
//!
//! The patch subdivides until a fragment flattens into its supporting
//! plane. The curve is intersected with that plane in closed form, the
//! crossing is expressed in the plane's 2D coordinates, and a
//! ray-crossing parity test against the fragment's four boundary curves
//! decides whether it lies inside the fragment. Accepted crossings are
//! Newton-refined on the original patch.

use crate::curve3d::Curve3d;
use crate::gp::{Ax2, Dir, Dir2d, Lin2d, Pnt, Pnt2d, Vec3};
use crate::intersect::newton;
use crate::intersect::result::{push_unique_on_surface, CurveSurfacePoint, Interference2d};
use crate::intersect::subdivide::{intersect_fragments, FragmentSource};
use crate::curve2d::{Bezier2d, Curve2d};
use crate::precision;
use crate::surface::BezierSurface3d;
use crate::tolerance::Tolerance;
use crate::{KernelError, Result};

const MAX_DEPTH: u32 = 32;

/// Direction of the parity ray in plane coordinates, deliberately
/// oblique to the axes so it rarely grazes a boundary vertex.
const RAY_X: f64 = std::f64::consts::FRAC_1_SQRT_2;
const RAY_Y: f64 = std::f64::consts::FRAC_1_SQRT_2;

pub fn intersect_curve_patch(
    curve: &Curve3d,
    surface: &BezierSurface3d,
) -> Result<Vec<CurveSurfacePoint>> {
    if matches!(curve, Curve3d::Bezier(_)) {
        return Err(KernelError::NotImplemented(
            "freeform curve against a surface patch".to_string(),
        ));
    }
    let mut found = Vec::new();
    let root = PatchFrag {
        surf: surface.clone(),
        usp: 0.0,
        uep: 1.0,
        vsp: 0.0,
        vep: 1.0,
    };
    walk(curve, surface, &root, 0, &mut found)?;
    Ok(found)
}

struct PatchFrag {
    surf: BezierSurface3d,
    usp: f64,
    uep: f64,
    vsp: f64,
    vep: f64,
}

impl PatchFrag {
    fn split(&self, ratio: f64) -> Result<[PatchFrag; 4]> {
        let umid = self.usp + ratio * (self.uep - self.usp);
        let vmid = self.vsp + ratio * (self.vep - self.vsp);
        let (ulo, uhi) = self.surf.u_divide(ratio)?;
        let (a, b) = ulo.v_divide(ratio)?;
        let (c, d) = uhi.v_divide(ratio)?;
        Ok([
            PatchFrag {
                surf: a,
                usp: self.usp,
                uep: umid,
                vsp: self.vsp,
                vep: vmid,
            },
            PatchFrag {
                surf: b,
                usp: self.usp,
                uep: umid,
                vsp: vmid,
                vep: self.vep,
            },
            PatchFrag {
                surf: c,
                usp: umid,
                uep: self.uep,
                vsp: self.vsp,
                vep: vmid,
            },
            PatchFrag {
                surf: d,
                usp: umid,
                uep: self.uep,
                vsp: vmid,
                vep: self.vep,
            },
        ])
    }
}

/// Conservative curve-against-box separation; false only means "cannot
/// rule the pair out".
fn pruned(curve: &Curve3d, frag: &PatchFrag, dtol: f64) -> bool {
    let mut bbox = frag.surf.enclosing_box();
    bbox.enlarge(dtol);
    if bbox.is_void() {
        return true;
    }
    let (xmin, ymin, zmin, xmax, ymax, zmax) = bbox.get();
    let center = Pnt::from_coords(
        0.5 * (xmin + xmax),
        0.5 * (ymin + ymax),
        0.5 * (zmin + zmax),
    );
    let half_diag = 0.5
        * ((xmax - xmin).powi(2) + (ymax - ymin).powi(2) + (zmax - zmin).powi(2)).sqrt();
    match curve {
        Curve3d::Line(l) => l.distance(&center) > half_diag + dtol,
        Curve3d::Circle(c) => {
            let mut cb = conic_box(&c.position(), c.radius(), c.radius());
            cb.enlarge(dtol);
            cb.is_out(&bbox)
        }
        Curve3d::Ellipse(e) => {
            let mut cb = conic_box(&e.position(), e.x_radius(), e.y_radius());
            cb.enlarge(dtol);
            cb.is_out(&bbox)
        }
        Curve3d::Bezier(_) => false,
    }
}

/// Tight axis-aligned box of a conic from its frame: the half extent
/// along a world axis is hypot(a Xi, b Yi).
fn conic_box(frame: &Ax2, a: f64, b: f64) -> crate::bnd::BndBox3d {
    let c = frame.origin();
    let x = frame.x_direction();
    let y = frame.y_direction();
    let ex = (a * x.x()).hypot(b * y.x());
    let ey = (a * x.y()).hypot(b * y.y());
    let ez = (a * x.z()).hypot(b * y.z());
    let mut bbox = crate::bnd::BndBox3d::new();
    bbox.add_point(&Pnt::from_coords(c.x() - ex, c.y() - ey, c.z() - ez));
    bbox.add_point(&Pnt::from_coords(c.x() + ex, c.y() + ey, c.z() + ez));
    bbox
}

/// Recursion result: whether the subtree was discarded by the box test
/// right away (drives the alternate split ratio).
fn walk(
    curve: &Curve3d,
    original: &BezierSurface3d,
    frag: &PatchFrag,
    depth: u32,
    found: &mut Vec<CurveSurfacePoint>,
) -> Result<bool> {
    let dtol = Tolerance::current().distance;
    if pruned(curve, frag, dtol) {
        return Ok(true);
    }
    if let Some(plane) = supporting_plane(&frag.surf, dtol) {
        resolve_planar(curve, original, frag, &plane, found)?;
        return Ok(false);
    }
    if depth >= MAX_DEPTH {
        log::debug!("patch subdivision depth ceiling {MAX_DEPTH} reached, branch abandoned");
        return Ok(false);
    }
    let children = frag.split(0.5)?;
    let mut all_pruned = true;
    for child in &children {
        if !walk(curve, original, child, depth + 1, found)? {
            all_pruned = false;
        }
    }
    if all_pruned {
        // a degenerate midline can hide the whole patch from its
        // children's boxes; one retry at an uneven ratio recovers it
        let children = frag.split(0.4)?;
        for child in &children {
            walk(curve, original, child, depth + 1, found)?;
        }
    }
    Ok(false)
}

/// Supporting plane of a near-planar fragment, from the corner edge
/// vectors. Degenerate (balloon shaped) corners fall back to interior
/// neighbor poles; if no usable pair of directions exists the fragment
/// is treated as curved.
fn supporting_plane(surf: &BezierSurface3d, dtol: f64) -> Option<Ax2> {
    let (nu, nv) = (surf.nu_poles(), surf.nv_poles());
    let c00 = surf.pole(0, 0);
    let c10 = surf.pole(nu - 1, 0);
    let c11 = surf.pole(nu - 1, nv - 1);
    let c01 = surf.pole(0, nv - 1);
    let mut edges = vec![c10 - c00, c11 - c10, c01 - c11, c00 - c01];
    // balloon retry: pull directions from the first interior poles
    edges.push(surf.pole(1, 0) - c00);
    edges.push(surf.pole(0, 1) - c00);

    let mut first: Option<Vec3> = None;
    let mut normal: Option<Vec3> = None;
    for e in &edges {
        if e.magnitude() <= precision::RESOLUTION {
            continue;
        }
        match first {
            None => first = Some(*e),
            Some(f) => {
                let n = f.crossed(e);
                if n.magnitude() > precision::ANGULAR * f.magnitude() * e.magnitude() {
                    normal = Some(n);
                    break;
                }
            }
        }
    }
    let normal = normal?;
    let xref = first?;
    let zdir = Dir::from_vec(&normal).ok()?;
    let xdir = Dir::from_vec(&xref).ok()?;
    let axis = Ax2::new(c00, zdir, xdir).ok()?;
    let planar = surf.poles().iter().all(|p| {
        let (_, _, z) = axis.to_local(p);
        z.abs() <= dtol
    });
    planar.then_some(axis)
}

/// The fragment's four boundary polygons expressed as 2D Bezier curves
/// in the plane frame, walked counterclockwise.
fn boundary_curves(surf: &BezierSurface3d, plane: &Ax2) -> Vec<Bezier2d> {
    let (nu, nv) = (surf.nu_poles(), surf.nv_poles());
    let project = |i: usize, j: usize| {
        let (x, y, _) = plane.to_local(&surf.pole(i, j));
        Pnt2d::from_coords(x, y)
    };
    let rational = surf.is_rational();
    let build = |indices: Vec<(usize, usize)>| -> Option<Bezier2d> {
        let poles: Vec<Pnt2d> = indices.iter().map(|&(i, j)| project(i, j)).collect();
        if rational {
            let weights = indices.iter().map(|&(i, j)| surf.weight(i, j)).collect();
            Bezier2d::with_weights(poles, weights).ok()
        } else {
            Bezier2d::new(poles).ok()
        }
    };
    let mut curves = Vec::with_capacity(4);
    if let Some(c) = build((0..nu).map(|i| (i, 0)).collect()) {
        curves.push(c);
    }
    if let Some(c) = build((0..nv).map(|j| (nu - 1, j)).collect()) {
        curves.push(c);
    }
    if let Some(c) = build((0..nu).rev().map(|i| (i, nv - 1)).collect()) {
        curves.push(c);
    }
    if let Some(c) = build((0..nv).rev().map(|j| (0, j)).collect()) {
        curves.push(c);
    }
    curves
}

/// Ray-crossing parity: odd number of boundary crossings means the
/// plane point lies inside the fragment. A crossing at the ray origin
/// means the point sits on the boundary itself, which counts as inside.
fn point_in_boundary(q: &Pnt2d, boundaries: &[Bezier2d]) -> bool {
    let tol = Tolerance::current();
    let ray_dir = match Dir2d::from_coords(RAY_X, RAY_Y) {
        Ok(d) => d,
        Err(_) => return false,
    };
    let ray = Curve2d::Line(Lin2d::new(*q, ray_dir));
    let mut saved: Vec<f64> = Vec::new();
    for boundary in boundaries {
        let clipped = match clip_ray_to_box(q, boundary) {
            Some(c) => c,
            None => continue,
        };
        let boundary_curve = Curve2d::Bezier(boundary.clone());
        let line_frag = FragmentSource {
            curve: &ray,
            bezier: clipped.0,
            sp: clipped.1,
            ep: clipped.2,
        };
        let bez_frag = FragmentSource {
            curve: &boundary_curve,
            bezier: boundary.clone(),
            sp: 0.0,
            ep: 1.0,
        };
        for item in intersect_fragments(&line_frag, &bez_frag).items() {
            if let Interference2d::Point(p) = item {
                if p.param_a < -tol.distance {
                    continue;
                }
                if p.param_a.abs() <= tol.distance {
                    return true;
                }
                if !saved.iter().any(|s| (s - p.param_a).abs() <= tol.distance) {
                    saved.push(p.param_a);
                }
            }
        }
    }
    saved.len() % 2 == 1
}

/// Clips the parity ray to the boundary curve's box, returning the
/// degree-1 fragment and its parameter range on the ray.
fn clip_ray_to_box(q: &Pnt2d, boundary: &Bezier2d) -> Option<(Bezier2d, f64, f64)> {
    let tol = Tolerance::current();
    let mut bbox = boundary.enclosing_box();
    bbox.enlarge(tol.distance);
    let (xmin, ymin, xmax, ymax) = bbox.get();
    // slab intersection along the ray, ray dir components are positive
    let t0x = (xmin - q.x()) / RAY_X;
    let t1x = (xmax - q.x()) / RAY_X;
    let t0y = (ymin - q.y()) / RAY_Y;
    let t1y = (ymax - q.y()) / RAY_Y;
    let lo = t0x.max(t0y).max(-tol.distance);
    let hi = t1x.min(t1y);
    if hi <= lo {
        return None;
    }
    let start = Pnt2d::from_coords(q.x() + lo * RAY_X, q.y() + lo * RAY_Y);
    let end = Pnt2d::from_coords(q.x() + hi * RAY_X, q.y() + hi * RAY_Y);
    let seg = Bezier2d::new(vec![start, end]).ok()?;
    Some((seg, lo, hi))
}

/// Analytic curve-against-plane crossings as curve parameters.
fn curve_plane_crossings(curve: &Curve3d, plane: &Ax2) -> Vec<f64> {
    let tol = Tolerance::current();
    let n = plane.z_direction().vec();
    match curve {
        Curve3d::Line(l) => {
            let denom = n.dot(&l.direction().vec());
            if denom.abs() <= tol.angle.max(1.0e-12) {
                return Vec::new();
            }
            let rhs = n.dot(&(plane.origin() - l.location()));
            vec![rhs / denom]
        }
        Curve3d::Circle(c) => {
            conic_plane_crossings(&c.position(), c.radius(), c.radius(), &n, &plane.origin())
        }
        Curve3d::Ellipse(e) => {
            conic_plane_crossings(&e.position(), e.x_radius(), e.y_radius(), &n, &plane.origin())
        }
        Curve3d::Bezier(_) => Vec::new(),
    }
}

/// Solves `A cos t + B sin t = rhs` for the conic against a plane.
fn conic_plane_crossings(frame: &Ax2, a: f64, b: f64, n: &Vec3, origin: &Pnt) -> Vec<f64> {
    let big_a = a * n.dot(&frame.x_direction().vec());
    let big_b = b * n.dot(&frame.y_direction().vec());
    let rhs = n.dot(&(*origin - frame.origin()));
    let r = big_a.hypot(big_b);
    if r <= precision::RESOLUTION {
        return Vec::new();
    }
    let ratio = rhs / r;
    if ratio.abs() > 1.0 + 1.0e-9 {
        return Vec::new();
    }
    let phi = big_b.atan2(big_a);
    let delta = ratio.clamp(-1.0, 1.0).acos();
    let wrap = |t: f64| t.rem_euclid(std::f64::consts::TAU);
    if delta.abs() <= precision::ANGULAR {
        vec![wrap(phi)]
    } else {
        vec![wrap(phi + delta), wrap(phi - delta)]
    }
}

fn resolve_planar(
    curve: &Curve3d,
    original: &BezierSurface3d,
    frag: &PatchFrag,
    plane: &Ax2,
    found: &mut Vec<CurveSurfacePoint>,
) -> Result<()> {
    let boundaries = boundary_curves(&frag.surf, plane);
    if boundaries.is_empty() {
        return Ok(());
    }
    for t in curve_plane_crossings(curve, plane) {
        let point = curve.point(t);
        let (x, y, _) = plane.to_local(&point);
        if !point_in_boundary(&Pnt2d::from_coords(x, y), &boundaries) {
            continue;
        }
        let u0 = 0.5 * (frag.usp + frag.uep);
        let v0 = 0.5 * (frag.vsp + frag.vep);
        if let Some((tc, u, v, mid)) = newton::refine_on_surface(curve, original, t, u0, v0) {
            push_unique_on_surface(
                found,
                CurveSurfacePoint {
                    point: mid,
                    curve_parameter: tc,
                    u,
                    v,
                },
            );
        }
    }
    Ok(())
}
