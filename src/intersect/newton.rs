//! Newton refinement of intersection candidates.
//!
//! Candidates out of the subdivision engine are accurate to the fragment
//! size; a few Newton steps on the original curves sharpen them to the
//! intersection tolerance. A candidate whose iteration fails to converge
//! is discarded rather than reported loosely.

use crate::curve2d::Curve2d;
use crate::curve3d::Curve3d;
use crate::gp::{Pnt, Pnt2d};
use crate::surface::BezierSurface3d;
use crate::tolerance::Tolerance;
use nalgebra::{Matrix2, Matrix3, Vector2, Vector3};

const MAX_STEPS: usize = 20;

/// Refines `(ta, tb)` so that `a(ta) == b(tb)` within the distance
/// tolerance. Returns the refined parameters and the midpoint.
pub fn refine_2d(a: &Curve2d, b: &Curve2d, ta0: f64, tb0: f64) -> Option<(f64, f64, Pnt2d)> {
    let tol = Tolerance::current();
    let da = a.parameter_domain();
    let db = b.parameter_domain();
    let mut ta = ta0;
    let mut tb = tb0;
    for _ in 0..MAX_STEPS {
        let (pa, va, _) = a.evaluation(ta);
        let (pb, vb, _) = b.evaluation(tb);
        if pa.distance(&pb) <= tol.distance {
            let mid = pa.lerp(&pb, 0.5);
            return Some((ta, tb, mid));
        }
        let jac = Matrix2::new(va.x(), -vb.x(), va.y(), -vb.y());
        let rhs = Vector2::new(pb.x() - pa.x(), pb.y() - pa.y());
        let delta = jac.lu().solve(&rhs)?;
        ta = da.force(ta + delta.x);
        tb = db.force(tb + delta.y);
    }
    None
}

/// 3D curve/curve refinement.
///
/// Three equations for two unknowns; the axis where the tangent cross
/// product is largest contributes the least sensitive equation pair, so
/// the system drops that coordinate and solves the remaining 2x2.
pub fn refine_3d(a: &Curve3d, b: &Curve3d, ta0: f64, tb0: f64) -> Option<(f64, f64, Pnt)> {
    let tol = Tolerance::current();
    let da = a.parameter_domain();
    let db = b.parameter_domain();
    let mut ta = ta0;
    let mut tb = tb0;
    for _ in 0..MAX_STEPS {
        let (pa, va, _) = a.evaluation(ta);
        let (pb, vb, _) = b.evaluation(tb);
        if pa.distance(&pb) <= tol.distance {
            let mid = pa.lerp(&pb, 0.5);
            return Some((ta, tb, mid));
        }
        let cross = va.crossed(&vb);
        let drop = largest_component(cross.x().abs(), cross.y().abs(), cross.z().abs());
        let (jac, rhs) = match drop {
            0 => (
                Matrix2::new(va.y(), -vb.y(), va.z(), -vb.z()),
                Vector2::new(pb.y() - pa.y(), pb.z() - pa.z()),
            ),
            1 => (
                Matrix2::new(va.x(), -vb.x(), va.z(), -vb.z()),
                Vector2::new(pb.x() - pa.x(), pb.z() - pa.z()),
            ),
            _ => (
                Matrix2::new(va.x(), -vb.x(), va.y(), -vb.y()),
                Vector2::new(pb.x() - pa.x(), pb.y() - pa.y()),
            ),
        };
        let delta = jac.lu().solve(&rhs)?;
        ta = da.force(ta + delta.x);
        tb = db.force(tb + delta.y);
    }
    None
}

fn largest_component(x: f64, y: f64, z: f64) -> usize {
    if x >= y && x >= z {
        0
    } else if y >= z {
        1
    } else {
        2
    }
}

/// Curve/patch refinement in the three unknowns `(t, u, v)`.
pub fn refine_on_surface(
    curve: &Curve3d,
    surface: &BezierSurface3d,
    t0: f64,
    u0: f64,
    v0: f64,
) -> Option<(f64, f64, f64, Pnt)> {
    let tol = Tolerance::current();
    let dt = curve.parameter_domain();
    let mut t = t0;
    let mut u = u0;
    let mut v = v0;
    for _ in 0..MAX_STEPS {
        let (pc, vc, _) = curve.evaluation(t);
        let (ps, su, sv) = surface.tangents(u, v);
        if pc.distance(&ps) <= tol.distance {
            let mid = pc.lerp(&ps, 0.5);
            return Some((t, u, v, mid));
        }
        let jac = Matrix3::new(
            vc.x(),
            -su.x(),
            -sv.x(),
            vc.y(),
            -su.y(),
            -sv.y(),
            vc.z(),
            -su.z(),
            -sv.z(),
        );
        let rhs = Vector3::new(ps.x() - pc.x(), ps.y() - pc.y(), ps.z() - pc.z());
        let delta = jac.lu().solve(&rhs)?;
        t = dt.force(t + delta.x);
        u = (u + delta.y).clamp(0.0, 1.0);
        v = (v + delta.z).clamp(0.0, 1.0);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve2d::Bezier2d;
    use crate::gp::{Circ2d, Dir, Dir2d, Lin, Lin2d};

    #[test]
    fn test_refine_2d_sharpens_perturbed_candidate() {
        let a = Curve2d::Line(Lin2d::new(Pnt2d::new(), Dir2d::x_dir()));
        let b = Curve2d::Circle(Circ2d::new(Pnt2d::from_coords(0.0, 0.0), 2.0).unwrap());
        // exact solution: ta = 2, tb = 0
        let (ta, tb, p) = refine_2d(&a, &b, 1.9, 0.1).unwrap();
        assert!((ta - 2.0).abs() < 1e-6);
        assert!(tb.abs() < 1e-6);
        assert!(p.distance(&Pnt2d::from_coords(2.0, 0.0)) < 1e-6);
    }

    #[test]
    fn test_refine_2d_on_crossing_beziers() {
        let a = Curve2d::Bezier(
            Bezier2d::new(vec![
                Pnt2d::from_coords(0.0, -1.0),
                Pnt2d::from_coords(1.0, 1.0),
                Pnt2d::from_coords(2.0, -1.0),
            ])
            .unwrap(),
        );
        let b = Curve2d::Line(Lin2d::new(Pnt2d::new(), Dir2d::x_dir()));
        let got = refine_2d(&a, &b, 0.3, 0.6);
        assert!(got.is_some());
        let (ta, _, p) = got.unwrap();
        assert!(p.y().abs() < 1e-8);
        assert!(a.point(ta).distance(&p) < 1e-6);
    }

    #[test]
    fn test_refine_3d_skew_axes() {
        let a = Curve3d::Line(Lin::new(
            Pnt::from_coords(0.0, 0.0, 0.0),
            Dir::from_coords(1.0, 0.0, 0.0).unwrap(),
        ));
        let b = Curve3d::Line(Lin::new(
            Pnt::from_coords(1.0, -1.0, 0.0),
            Dir::from_coords(0.0, 1.0, 0.0).unwrap(),
        ));
        let (ta, tb, p) = refine_3d(&a, &b, 0.5, 0.5).unwrap();
        assert!((ta - 1.0).abs() < 1e-8);
        assert!((tb - 1.0).abs() < 1e-8);
        assert!(p.distance(&Pnt::from_coords(1.0, 0.0, 0.0)) < 1e-8);
    }
}
