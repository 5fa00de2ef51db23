//! End-to-end curve-against-patch intersection.

use curvekit::gp::{Ax2, Circ, Dir, Lin, Pnt};
use curvekit::surface::BezierSurface3d;
use curvekit::{intersect_curve_surface, Curve3d, KernelError};

const TEST_TOL: f64 = 1.0e-6;

fn flat_patch() -> BezierSurface3d {
    // planar 2x2 patch spanning [0,2] x [0,2] at z = 0
    BezierSurface3d::new(
        2,
        2,
        vec![
            Pnt::from_coords(0.0, 0.0, 0.0),
            Pnt::from_coords(0.0, 2.0, 0.0),
            Pnt::from_coords(2.0, 0.0, 0.0),
            Pnt::from_coords(2.0, 2.0, 0.0),
        ],
    )
    .unwrap()
}

fn bowed_patch() -> BezierSurface3d {
    // quadratic in u, bowed up to z = 2 along the middle row
    BezierSurface3d::new(
        3,
        2,
        vec![
            Pnt::from_coords(0.0, 0.0, 0.0),
            Pnt::from_coords(0.0, 2.0, 0.0),
            Pnt::from_coords(1.0, 0.0, 2.0),
            Pnt::from_coords(1.0, 2.0, 2.0),
            Pnt::from_coords(2.0, 0.0, 0.0),
            Pnt::from_coords(2.0, 2.0, 0.0),
        ],
    )
    .unwrap()
}

#[test]
fn test_line_pierces_flat_patch() {
    let line = Curve3d::Line(Lin::new(
        Pnt::from_coords(1.0, 1.0, -5.0),
        Dir::from_coords(0.0, 0.0, 1.0).unwrap(),
    ));
    let pts = intersect_curve_surface(&line, &flat_patch()).unwrap();
    assert_eq!(pts.len(), 1);
    let p = &pts[0];
    assert!(p.point.distance(&Pnt::from_coords(1.0, 1.0, 0.0)) < TEST_TOL);
    assert!((p.curve_parameter - 5.0).abs() < TEST_TOL);
    assert!((p.u - 0.5).abs() < TEST_TOL);
    assert!((p.v - 0.5).abs() < TEST_TOL);
    // surface point at (u, v) agrees with the reported position
    assert!(flat_patch().point(p.u, p.v).distance(&p.point) < TEST_TOL);
}

#[test]
fn test_line_outside_patch_boundary() {
    let line = Curve3d::Line(Lin::new(
        Pnt::from_coords(3.0, 1.0, -5.0),
        Dir::from_coords(0.0, 0.0, 1.0).unwrap(),
    ));
    assert!(intersect_curve_surface(&line, &flat_patch())
        .unwrap()
        .is_empty());
}

#[test]
fn test_line_pierces_bowed_patch() {
    // the bowed patch reaches z = 1 at u = 0.5
    let line = Curve3d::Line(Lin::new(
        Pnt::from_coords(1.0, 1.0, -5.0),
        Dir::from_coords(0.0, 0.0, 1.0).unwrap(),
    ));
    let patch = bowed_patch();
    let pts = intersect_curve_surface(&line, &patch).unwrap();
    assert_eq!(pts.len(), 1);
    let p = &pts[0];
    assert!(p.point.distance(&Pnt::from_coords(1.0, 1.0, 1.0)) < TEST_TOL);
    assert!(patch.point(p.u, p.v).distance(&p.point) < TEST_TOL);
}

#[test]
fn test_circle_crosses_flat_patch_twice() {
    // circle in the x = 1 plane, center below the patch, radius large
    // enough to poke through it
    let frame = Ax2::new(
        Pnt::from_coords(1.0, 1.0, -0.5),
        Dir::from_coords(1.0, 0.0, 0.0).unwrap(),
        Dir::from_coords(0.0, 1.0, 0.0).unwrap(),
    )
    .unwrap();
    let circle = Curve3d::Circle(Circ::new(frame, 1.0).unwrap());
    let pts = intersect_curve_surface(&circle, &flat_patch()).unwrap();
    assert_eq!(pts.len(), 2);
    for p in &pts {
        assert!(p.point.z().abs() < TEST_TOL);
        assert!((p.point.x() - 1.0).abs() < TEST_TOL);
        assert!(((p.point.y() - 1.0).abs() - 0.75_f64.sqrt()).abs() < TEST_TOL);
    }
}

#[test]
fn test_freeform_curve_against_patch_not_implemented() {
    use curvekit::curve3d::Bezier3d;
    let c = Curve3d::Bezier(
        Bezier3d::new(vec![
            Pnt::from_coords(0.0, 0.0, -1.0),
            Pnt::from_coords(1.0, 1.0, 1.0),
        ])
        .unwrap(),
    );
    assert!(matches!(
        intersect_curve_surface(&c, &flat_patch()),
        Err(KernelError::NotImplemented(_))
    ));
}
