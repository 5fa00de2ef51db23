//! End-to-end intersection with freeform (Bezier) operands.

use curvekit::curve2d::{Bezier2d, CompositeCurve2d, CurveSegment2d};
use curvekit::gp::{Dir2d, Lin2d, Pnt2d};
use curvekit::{interfere, intersect, Curve2d, Interference2d};

const TEST_TOL: f64 = 1.0e-6;

fn bez(points: &[(f64, f64)]) -> Curve2d {
    Curve2d::Bezier(
        Bezier2d::new(
            points
                .iter()
                .map(|(x, y)| Pnt2d::from_coords(*x, *y))
                .collect(),
        )
        .unwrap(),
    )
}

#[test]
fn test_crossing_cubics() {
    // s-shaped cubic against its mirror image
    let a = bez(&[(0.0, -1.0), (1.0, -1.0), (1.0, 1.0), (2.0, 1.0)]);
    let b = bez(&[(0.0, 1.0), (1.0, 1.0), (1.0, -1.0), (2.0, -1.0)]);
    let pts = intersect(&a, &b).unwrap();
    assert_eq!(pts.len(), 1);
    let p = &pts[0];
    assert!(p.point.distance(&Pnt2d::from_coords(1.0, 0.0)) < TEST_TOL);
    assert!((p.param_a - 0.5).abs() < TEST_TOL);
    assert!((p.param_b - 0.5).abs() < TEST_TOL);
    assert!(a.point(p.param_a).distance(&p.point) < TEST_TOL);
    assert!(b.point(p.param_b).distance(&p.point) < TEST_TOL);
}

#[test]
fn test_line_crosses_arch_twice() {
    let arch = bez(&[(0.0, -1.0), (1.0, 3.0), (2.0, -1.0)]);
    let axis = Curve2d::Line(Lin2d::new(Pnt2d::new(), Dir2d::x_dir()));
    let mut pts = intersect(&axis, &arch).unwrap();
    assert_eq!(pts.len(), 2);
    pts.sort_by(|p, q| p.param_a.partial_cmp(&q.param_a).unwrap());
    // y(t) = -1 + 8t - 8t^2, roots 1/2 +- sqrt(2)/4, x(t) = 2t
    let t0 = 0.5 - 2.0_f64.sqrt() / 4.0;
    let t1 = 0.5 + 2.0_f64.sqrt() / 4.0;
    assert!((pts[0].param_b - t0).abs() < TEST_TOL);
    assert!((pts[1].param_b - t1).abs() < TEST_TOL);
    for p in &pts {
        assert!(p.point.y().abs() < TEST_TOL);
    }
}

#[test]
fn test_disjoint_humps_report_nothing() {
    let a = bez(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
    let b = bez(&[(0.0, 2.0), (1.0, 3.0), (2.0, 2.0)]);
    assert!(intersect(&a, &b).unwrap().is_empty());
}

#[test]
fn test_near_miss_stays_empty() {
    let a = bez(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
    // apex at y = 0.5; rival passes 1e-3 above it
    let b = bez(&[(0.0, 1.0), (1.0, 0.002), (2.0, 1.0)]);
    assert!(intersect(&a, &b).unwrap().is_empty());
}

#[test]
fn test_interfere_reports_partial_overlap() {
    // the second curve retraces the first's left half
    let a = bez(&[(0.0, 0.0), (2.0, 2.0)]);
    let b = bez(&[(-1.0, -1.0), (1.0, 1.0)]);
    let items = interfere(&a, &b).unwrap();
    assert_eq!(items.len(), 1);
    match &items[0] {
        Interference2d::Overlap(o) => {
            let (lo, hi) = if o.range_a.0 <= o.range_a.1 {
                (o.range_a.0, o.range_a.1)
            } else {
                (o.range_a.1, o.range_a.0)
            };
            assert!(lo.abs() < 1.0e-3);
            assert!((hi - 0.5).abs() < 1.0e-3);
        }
        other => panic!("expected an overlap, got {other:?}"),
    }
}

#[test]
fn test_composite_chain_against_line() {
    let left = CurveSegment2d::new(bez(&[(-2.0, -1.0), (-1.0, 2.0), (0.0, -1.0)]), true).unwrap();
    let right = CurveSegment2d::new(bez(&[(0.0, -1.0), (1.0, 2.0), (2.0, -1.0)]), true).unwrap();
    let chain = Curve2d::Composite(CompositeCurve2d::new(vec![left, right]).unwrap());
    let axis = Curve2d::Line(Lin2d::new(Pnt2d::new(), Dir2d::x_dir()));
    let pts = intersect(&chain, &axis).unwrap();
    assert_eq!(pts.len(), 4);
    for p in &pts {
        // composite parameters evaluate back to the reported position
        assert!(chain.point(p.param_a).distance(&p.point) < TEST_TOL);
        assert!((0.0..=2.0).contains(&p.param_a));
    }
}

#[test]
fn test_reversed_segment_parameters_mirror() {
    let arch = bez(&[(0.0, -1.0), (1.0, 3.0), (2.0, -1.0)]);
    let axis = Curve2d::Line(Lin2d::new(Pnt2d::new(), Dir2d::x_dir()));
    let reversed = Curve2d::Segment(CurveSegment2d::new(arch.clone(), false).unwrap());
    let direct = intersect(&arch, &axis).unwrap();
    let mirrored = intersect(&reversed, &axis).unwrap();
    assert_eq!(direct.len(), mirrored.len());
    for p in &direct {
        assert!(mirrored
            .iter()
            .any(|q| (q.param_a - (1.0 - p.param_a)).abs() < TEST_TOL
                && q.point.distance(&p.point) < TEST_TOL));
    }
}
