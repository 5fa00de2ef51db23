//! Intersection and interference dispatch.
//!
//! The public entry points normalize their operands: adapted curves
//! (trimmed, segment, composite) are unwrapped to their basis curve, the
//! basis pair is routed to the closed-form conic solver or the
//! subdivision engine, and parameter-valued results are converted back
//! and filtered against the operands' windows.

pub mod conic;
pub mod newton;
pub mod patch;
pub mod result;
pub mod subdivide;
pub mod subdivide3d;

use crate::bnd::BndBox2d;
use crate::curve2d::{Bezier2d, Curve2d};
use crate::curve3d::{Bezier3d, Curve3d};
use crate::domain::ParameterDomain;
use crate::gp::{Lin, Lin2d};
use crate::precision;
use crate::surface::BezierSurface3d;
use crate::tolerance::Tolerance;
use crate::{KernelError, Result};

pub use result::{
    CurveSurfacePoint, Interference2d, IntersectionPoint2d, IntersectionPoint3d, OverlapCurve2d,
};

use result::InterferenceList2d;
use subdivide::FragmentSource;
use subdivide3d::FragmentSource3d;

/// Intersects two 2D curves, reporting transversal points.
///
/// Coincident analytic operands have no discrete answer and surface as
/// `KernelError::IndefiniteSolution` carrying one representative point;
/// `interfere` converts that case into an overlap result instead.
pub fn intersect(a: &Curve2d, b: &Curve2d) -> Result<Vec<IntersectionPoint2d>> {
    Ok(intersect_inner(a, b, false)?.into_points())
}

/// Intersects two bounded 2D curves, reporting both transversal points
/// and shared overlap stretches.
///
/// Coincident carriers are resolved into overlaps at the base dispatch,
/// so trimmed, segment and composite views clip and re-express them the
/// same way they do ordinary results.
pub fn interfere(a: &Curve2d, b: &Curve2d) -> Result<Vec<Interference2d>> {
    if !a.is_bounded() || !b.is_bounded() {
        return Err(KernelError::InvalidGeometry(
            "interference requires bounded operands".to_string(),
        ));
    }
    Ok(intersect_inner(a, b, true)?.into_items())
}

fn swap_back(r: Result<InterferenceList2d>) -> Result<InterferenceList2d> {
    match r {
        Ok(mut list) => {
            list.swap_operands();
            Ok(list)
        }
        Err(KernelError::IndefiniteSolution(sample)) => {
            Err(KernelError::IndefiniteSolution(Box::new(sample.swapped())))
        }
        Err(e) => Err(e),
    }
}

fn intersect_inner(
    a: &Curve2d,
    b: &Curve2d,
    coincident_as_overlap: bool,
) -> Result<InterferenceList2d> {
    match a {
        Curve2d::Composite(c) => {
            let mut list = InterferenceList2d::new();
            for (i, seg) in c.segments().iter().enumerate() {
                let seg_curve = Curve2d::Segment(seg.clone());
                for item in intersect_inner(&seg_curve, b, coincident_as_overlap)?.into_items() {
                    match item {
                        Interference2d::Point(p) => list.push_point(IntersectionPoint2d::new(
                            p.point,
                            c.to_composite_parameter(i, p.param_a),
                            p.param_b,
                        )),
                        Interference2d::Overlap(o) => list.push_overlap(OverlapCurve2d {
                            range_a: (
                                c.to_composite_parameter(i, o.range_a.0),
                                c.to_composite_parameter(i, o.range_a.1),
                            ),
                            range_b: o.range_b,
                        }),
                    }
                }
            }
            list.cleanup();
            Ok(list)
        }
        Curve2d::Segment(s) => {
            let mut list = InterferenceList2d::new();
            for item in intersect_inner(s.parent(), b, coincident_as_overlap)?.into_items() {
                match item {
                    Interference2d::Point(p) => list.push_point(IntersectionPoint2d::new(
                        p.point,
                        s.to_own_parameter(p.param_a),
                        p.param_b,
                    )),
                    Interference2d::Overlap(o) => list.push_overlap(OverlapCurve2d {
                        range_a: (
                            s.to_own_parameter(o.range_a.0),
                            s.to_own_parameter(o.range_a.1),
                        ),
                        range_b: o.range_b,
                    }),
                }
            }
            Ok(list)
        }
        Curve2d::Trimmed(t) => {
            let window = (t.lower(), t.upper());
            // a trimmed line is a bounded line; normalizing here lets the
            // base dispatch carry the window
            if let Curve2d::Line(line) = t.basis() {
                let bounded = Curve2d::BoundedLine {
                    line: *line,
                    lower: window.0,
                    upper: window.1,
                };
                return intersect_inner(&bounded, b, coincident_as_overlap);
            }
            let mut list = InterferenceList2d::new();
            for item in intersect_inner(t.basis(), b, coincident_as_overlap)?.into_items() {
                match item {
                    Interference2d::Point(p) => {
                        if let Some(ta) = fit_to_window(t.basis(), window, p.param_a) {
                            list.push_point(IntersectionPoint2d::new(p.point, ta, p.param_b));
                        }
                    }
                    Interference2d::Overlap(o) => {
                        if let Some(clipped) = clip_overlap(&o, window) {
                            list.push_overlap(clipped);
                        }
                    }
                }
            }
            Ok(list)
        }
        _ => match b {
            Curve2d::Composite(_) | Curve2d::Segment(_) | Curve2d::Trimmed(_) => {
                swap_back(intersect_inner(b, a, coincident_as_overlap))
            }
            _ => base_pair(a, b, coincident_as_overlap),
        },
    }
}

/// A basis operand after adapter unwrapping: an analytic carrier with an
/// optional parameter window, or a freeform Bezier.
enum BaseKind<'a> {
    Analytic(Curve2d, Option<(f64, f64)>),
    Freeform(&'a Bezier2d),
}

fn base_kind(curve: &Curve2d) -> BaseKind<'_> {
    match curve {
        Curve2d::BoundedLine { line, lower, upper } => {
            BaseKind::Analytic(Curve2d::Line(*line), Some((*lower, *upper)))
        }
        Curve2d::Bezier(b) => BaseKind::Freeform(b),
        c if conic::is_analytic(c) => BaseKind::Analytic(c.clone(), None),
        _ => unreachable!("adapted operands are unwrapped before the base dispatch"),
    }
}

fn base_pair(a: &Curve2d, b: &Curve2d, coincident_as_overlap: bool) -> Result<InterferenceList2d> {
    match (base_kind(a), base_kind(b)) {
        (BaseKind::Analytic(ca, wa), BaseKind::Analytic(cb, wb)) => {
            let points = match conic::intersect_analytic(&ca, &cb) {
                Ok(points) => points,
                Err(KernelError::IndefiniteSolution(sample)) if coincident_as_overlap => {
                    return coincident_carriers(&ca, wa, &cb, wb, sample)
                }
                Err(e) => return Err(e),
            };
            let mut list = InterferenceList2d::new();
            for p in points {
                let ta = match wa {
                    Some(w) => fit_to_window(&ca, w, p.param_a),
                    None => Some(p.param_a),
                };
                let tb = match wb {
                    Some(w) => fit_to_window(&cb, w, p.param_b),
                    None => Some(p.param_b),
                };
                if let (Some(ta), Some(tb)) = (ta, tb) {
                    list.push_point(IntersectionPoint2d::new(p.point, ta, tb));
                }
            }
            Ok(list)
        }
        (BaseKind::Freeform(ba), BaseKind::Freeform(bb)) => {
            let src_a = FragmentSource {
                curve: a,
                bezier: ba.clone(),
                sp: 0.0,
                ep: 1.0,
            };
            let src_b = FragmentSource {
                curve: b,
                bezier: bb.clone(),
                sp: 0.0,
                ep: 1.0,
            };
            Ok(subdivide::intersect_fragments(&src_a, &src_b))
        }
        (BaseKind::Analytic(ca, wa), BaseKind::Freeform(bb)) => line_against_bezier(&ca, wa, b, bb),
        (BaseKind::Freeform(ba), BaseKind::Analytic(cb, wb)) => {
            swap_back(line_against_bezier(&cb, wb, a, ba))
        }
    }
}

/// Analytic carrier against a freeform operand. Only a line can be
/// rendered exactly as a degree-1 fragment; a conic carrier has no
/// polynomial rendition and no closed quartic against a Bezier.
fn line_against_bezier(
    analytic: &Curve2d,
    window: Option<(f64, f64)>,
    freeform_curve: &Curve2d,
    freeform: &Bezier2d,
) -> Result<InterferenceList2d> {
    let Curve2d::Line(line) = analytic else {
        return Err(KernelError::NotImplemented(
            "conic against freeform curve".to_string(),
        ));
    };
    let mut bbox = freeform.enclosing_box();
    bbox.enlarge(Tolerance::current().distance);
    let Some((segment, sp, ep)) = clip_line_to_box(line, window, &bbox) else {
        return Ok(InterferenceList2d::new());
    };
    let line_curve = Curve2d::Line(*line);
    let src_line = FragmentSource {
        curve: &line_curve,
        bezier: segment,
        sp,
        ep,
    };
    let src_bez = FragmentSource {
        curve: freeform_curve,
        bezier: freeform.clone(),
        sp: 0.0,
        ep: 1.0,
    };
    Ok(subdivide::intersect_fragments(&src_line, &src_bez))
}

/// Slab-clips a line to a bounding box, further restricted by the
/// window of a bounded line. Returns the clip as a degree-1 Bezier with
/// its line parameter span, or `None` when the line misses the box.
fn clip_line_to_box(
    line: &Lin2d,
    window: Option<(f64, f64)>,
    bbox: &BndBox2d,
) -> Option<(Bezier2d, f64, f64)> {
    let (xmin, ymin, xmax, ymax) = bbox.get();
    let o = line.location();
    let d = line.direction();
    let mut lo = -precision::INFINITE;
    let mut hi = precision::INFINITE;
    for (smin, smax, oc, dc) in [(xmin, xmax, o.x(), d.x()), (ymin, ymax, o.y(), d.y())] {
        if dc.abs() <= precision::RESOLUTION {
            if oc < smin || oc > smax {
                return None;
            }
        } else {
            let t0 = (smin - oc) / dc;
            let t1 = (smax - oc) / dc;
            lo = lo.max(t0.min(t1));
            hi = hi.min(t0.max(t1));
        }
    }
    if let Some((wl, wu)) = window {
        lo = lo.max(wl);
        hi = hi.min(wu);
    }
    if !(lo < hi) || precision::is_infinite(lo) || precision::is_infinite(hi) {
        return None;
    }
    let segment = Bezier2d::new(vec![line.point_at(lo), line.point_at(hi)]).ok()?;
    Some((segment, lo, hi))
}

/// Accepts a basis parameter into a trim window, shifting by whole
/// periods when the basis is periodic and the window crosses the seam.
fn fit_to_window(basis: &Curve2d, window: (f64, f64), t: f64) -> Option<f64> {
    let domain = ParameterDomain::bounded_open(window.0, window.1).ok()?;
    let forced = domain.force(t);
    let mut tangent = basis.tangent(forced).magnitude();
    if tangent <= precision::RESOLUTION {
        // vanishing tangent at the clamp point makes the scaled
        // overshoot meaningless; re-sample a step inward
        let step = precision::PARAMETRIC_BASE * (window.1 - window.0);
        let inward = if forced - window.0 <= window.1 - forced {
            forced + step
        } else {
            forced - step
        };
        tangent = basis.tangent(inward).magnitude();
    }
    let candidates = match basis.parameter_domain() {
        ParameterDomain::BoundedPeriodic { lower, upper } => {
            let period = upper - lower;
            vec![t, t + period, t - period]
        }
        _ => vec![t],
    };
    candidates.into_iter().find(|&c| domain.contains(c, tangent))
}

/// Clips an overlap's first range to a window, re-interpolating the
/// second range linearly.
fn clip_overlap(o: &OverlapCurve2d, window: (f64, f64)) -> Option<OverlapCurve2d> {
    let (lo, hi, blo, bhi) = if o.range_a.0 <= o.range_a.1 {
        (o.range_a.0, o.range_a.1, o.range_b.0, o.range_b.1)
    } else {
        (o.range_a.1, o.range_a.0, o.range_b.1, o.range_b.0)
    };
    let nlo = lo.max(window.0);
    let nhi = hi.min(window.1);
    if nhi <= nlo {
        return None;
    }
    let remap = |t: f64| {
        if hi > lo {
            blo + (t - lo) / (hi - lo) * (bhi - blo)
        } else {
            blo
        }
    };
    Some(OverlapCurve2d {
        range_a: (nlo, nhi),
        range_b: (remap(nlo), remap(nhi)),
    })
}

/// Resolves a coincident analytic carrier pair into an overlap item:
/// full periods for closed conics, the shared window stretch for
/// collinear line carriers. Adapter levels above clip the result to
/// their own windows and re-express its parameters.
fn coincident_carriers(
    ca: &Curve2d,
    wa: Option<(f64, f64)>,
    cb: &Curve2d,
    wb: Option<(f64, f64)>,
    sample: Box<IntersectionPoint2d>,
) -> Result<InterferenceList2d> {
    let mut list = InterferenceList2d::new();
    if let (
        ParameterDomain::BoundedPeriodic {
            lower: la,
            upper: ua,
        },
        ParameterDomain::BoundedPeriodic {
            lower: lb,
            upper: ub,
        },
    ) = (ca.parameter_domain(), cb.parameter_domain())
    {
        list.push_overlap(OverlapCurve2d {
            range_a: (la, ua),
            range_b: (lb, ub),
        });
        return Ok(list);
    }
    // collinear line carriers; a finite stretch needs a window on each
    let (Some((la, ua)), Some((lb, ub))) = (wa, wb) else {
        return Err(KernelError::IndefiniteSolution(sample));
    };
    let ta0 = ca.point_to_parameter(&cb.point(lb))?;
    let ta1 = ca.point_to_parameter(&cb.point(ub))?;
    let lo = ta0.min(ta1).max(la);
    let hi = ta0.max(ta1).min(ua);
    if hi < lo {
        // disjoint stretches
        return Ok(list);
    }
    if hi - lo <= Tolerance::current().parameter {
        let point = ca.point(lo);
        let tb = cb.point_to_parameter(&point)?;
        list.push_point(IntersectionPoint2d::new(point, lo, tb));
        return Ok(list);
    }
    let tb0 = cb.point_to_parameter(&ca.point(lo))?;
    let tb1 = cb.point_to_parameter(&ca.point(hi))?;
    list.push_overlap(OverlapCurve2d {
        range_a: (lo, hi),
        range_b: (tb0, tb1),
    });
    Ok(list)
}

/// Intersects two 3D curves. Freeform pairs run through subdivision and
/// a line runs against a freeform curve as a degree-1 fragment; pairs of
/// analytic 3D curves have no engine here.
pub fn intersect3d(a: &Curve3d, b: &Curve3d) -> Result<Vec<IntersectionPoint3d>> {
    match (a, b) {
        (Curve3d::Bezier(ba), Curve3d::Bezier(bb)) => {
            let src_a = FragmentSource3d {
                curve: a,
                bezier: ba.clone(),
                sp: 0.0,
                ep: 1.0,
            };
            let src_b = FragmentSource3d {
                curve: b,
                bezier: bb.clone(),
                sp: 0.0,
                ep: 1.0,
            };
            Ok(subdivide3d::intersect_fragments_3d(&src_a, &src_b))
        }
        (Curve3d::Line(l), Curve3d::Bezier(bb)) => line_against_bezier_3d(l, a, b, bb),
        (Curve3d::Bezier(ba), Curve3d::Line(l)) => {
            let points = line_against_bezier_3d(l, b, a, ba)?;
            Ok(points.iter().map(|p| p.swapped()).collect())
        }
        _ => Err(KernelError::NotImplemented(
            "closed-form intersection of analytic 3d curves".to_string(),
        )),
    }
}

fn line_against_bezier_3d(
    line: &Lin,
    line_curve: &Curve3d,
    freeform_curve: &Curve3d,
    freeform: &Bezier3d,
) -> Result<Vec<IntersectionPoint3d>> {
    let mut bbox = freeform.enclosing_box();
    bbox.enlarge(Tolerance::current().distance);
    let (xmin, ymin, zmin, xmax, ymax, zmax) = bbox.get();
    let o = line.location();
    let d = line.direction();
    let mut lo = -precision::INFINITE;
    let mut hi = precision::INFINITE;
    for (smin, smax, oc, dc) in [
        (xmin, xmax, o.x(), d.x()),
        (ymin, ymax, o.y(), d.y()),
        (zmin, zmax, o.z(), d.z()),
    ] {
        if dc.abs() <= precision::RESOLUTION {
            if oc < smin || oc > smax {
                return Ok(Vec::new());
            }
        } else {
            let t0 = (smin - oc) / dc;
            let t1 = (smax - oc) / dc;
            lo = lo.max(t0.min(t1));
            hi = hi.min(t0.max(t1));
        }
    }
    if !(lo < hi) || precision::is_infinite(lo) || precision::is_infinite(hi) {
        return Ok(Vec::new());
    }
    let segment = Bezier3d::new(vec![line.point_at(lo), line.point_at(hi)])?;
    let src_line = FragmentSource3d {
        curve: line_curve,
        bezier: segment,
        sp: lo,
        ep: hi,
    };
    let src_bez = FragmentSource3d {
        curve: freeform_curve,
        bezier: freeform.clone(),
        sp: 0.0,
        ep: 1.0,
    };
    Ok(subdivide3d::intersect_fragments_3d(&src_line, &src_bez))
}

/// Intersects an analytic 3D curve with a Bezier surface patch.
pub fn intersect_curve_surface(
    curve: &Curve3d,
    surface: &BezierSurface3d,
) -> Result<Vec<CurveSurfacePoint>> {
    patch::intersect_curve_patch(curve, surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve2d::{CompositeCurve2d, CurveSegment2d, TrimmedCurve2d};
    use crate::gp::{Circ2d, Dir2d, Pnt2d};
    use std::f64::consts::{FRAC_PI_2, PI};

    const TEST_TOL: f64 = 1.0e-6;

    fn x_axis() -> Curve2d {
        Curve2d::Line(Lin2d::new(Pnt2d::new(), Dir2d::x_dir()))
    }

    fn unit_circle() -> Curve2d {
        Curve2d::Circle(Circ2d::new(Pnt2d::new(), 1.0).unwrap())
    }

    fn arch() -> Curve2d {
        Curve2d::Bezier(
            Bezier2d::new(vec![
                Pnt2d::from_coords(0.0, -1.0),
                Pnt2d::from_coords(1.0, 3.0),
                Pnt2d::from_coords(2.0, -1.0),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_symmetric_positions() {
        let a = x_axis();
        let b = unit_circle();
        let ab = intersect(&a, &b).unwrap();
        let ba = intersect(&b, &a).unwrap();
        assert_eq!(ab.len(), 2);
        assert_eq!(ba.len(), 2);
        for p in &ab {
            assert!(ba.iter().any(|q| q.point.distance(&p.point) < TEST_TOL
                && (q.param_a - p.param_b).abs() < TEST_TOL
                && (q.param_b - p.param_a).abs() < TEST_TOL));
        }
    }

    #[test]
    fn test_trimmed_circle_filters_by_window() {
        // upper half of the unit circle against the vertical axis
        let half = Curve2d::Trimmed(TrimmedCurve2d::new(unit_circle(), 0.0, PI).unwrap());
        let vertical = Curve2d::Line(Lin2d::new(Pnt2d::new(), Dir2d::y_dir()));
        let pts = intersect(&half, &vertical).unwrap();
        assert_eq!(pts.len(), 1);
        assert!(pts[0].point.distance(&Pnt2d::from_coords(0.0, 1.0)) < TEST_TOL);
        assert!((pts[0].param_a - FRAC_PI_2).abs() < TEST_TOL);
        assert!((pts[0].param_b - 1.0).abs() < TEST_TOL);
    }

    #[test]
    fn test_bounded_line_window_filters_crossings() {
        let carrier = Lin2d::new(Pnt2d::from_coords(-3.0, 0.0), Dir2d::x_dir());
        let short = Curve2d::BoundedLine {
            line: carrier,
            lower: 0.0,
            upper: 1.0,
        };
        assert!(intersect(&short, &unit_circle()).unwrap().is_empty());

        let long = Curve2d::BoundedLine {
            line: carrier,
            lower: 0.0,
            upper: 10.0,
        };
        assert_eq!(intersect(&long, &unit_circle()).unwrap().len(), 2);
    }

    #[test]
    fn test_line_against_bezier() {
        let pts = intersect(&x_axis(), &arch()).unwrap();
        assert_eq!(pts.len(), 2);
        for p in &pts {
            assert!(p.point.y().abs() < TEST_TOL);
            assert!((p.point.x() - p.param_a).abs() < TEST_TOL);
        }
    }

    #[test]
    fn test_conic_against_bezier_not_implemented() {
        assert!(matches!(
            intersect(&unit_circle(), &arch()),
            Err(KernelError::NotImplemented(_))
        ));
    }

    #[test]
    fn test_segment_reverses_result_parameters() {
        let reversed = Curve2d::Segment(CurveSegment2d::new(arch(), false).unwrap());
        let direct = intersect(&arch(), &x_axis()).unwrap();
        let mirrored = intersect(&reversed, &x_axis()).unwrap();
        assert_eq!(direct.len(), mirrored.len());
        for p in &direct {
            assert!(mirrored
                .iter()
                .any(|q| (q.param_a - (1.0 - p.param_a)).abs() < TEST_TOL));
        }
    }

    #[test]
    fn test_composite_parameters_accumulate() {
        let left = CurveSegment2d::new(
            Curve2d::Bezier(
                Bezier2d::new(vec![
                    Pnt2d::from_coords(-2.0, -1.0),
                    Pnt2d::from_coords(-1.0, 2.0),
                    Pnt2d::from_coords(0.0, -1.0),
                ])
                .unwrap(),
            ),
            true,
        )
        .unwrap();
        let right = CurveSegment2d::new(
            Curve2d::Bezier(
                Bezier2d::new(vec![
                    Pnt2d::from_coords(0.0, -1.0),
                    Pnt2d::from_coords(1.0, 2.0),
                    Pnt2d::from_coords(2.0, -1.0),
                ])
                .unwrap(),
            ),
            true,
        )
        .unwrap();
        let chain = Curve2d::Composite(CompositeCurve2d::new(vec![left, right]).unwrap());
        // each arch crosses the axis twice
        let pts = intersect(&chain, &x_axis()).unwrap();
        assert_eq!(pts.len(), 4);
        assert!(pts.iter().any(|p| p.param_a < 1.0));
        assert!(pts.iter().any(|p| p.param_a > 1.0));
        for p in &pts {
            assert!(chain.point(p.param_a).distance(&p.point) < TEST_TOL);
        }
    }

    #[test]
    fn test_trim_bound_at_cusp_still_filters() {
        // the cusp at t = 0.5 has a vanishing tangent; the carrier
        // crosses x = 0.6 on both sides of it
        let cusp = Curve2d::Bezier(
            Bezier2d::new(vec![
                Pnt2d::from_coords(0.0, 0.0),
                Pnt2d::from_coords(1.0, 1.0),
                Pnt2d::from_coords(1.0, 0.0),
                Pnt2d::from_coords(0.0, 1.0),
            ])
            .unwrap(),
        );
        let head = Curve2d::Trimmed(TrimmedCurve2d::new(cusp, 0.0, 0.5).unwrap());
        let vertical = Curve2d::Line(Lin2d::new(
            Pnt2d::from_coords(0.6, 0.0),
            Dir2d::y_dir(),
        ));
        let pts = intersect(&head, &vertical).unwrap();
        assert_eq!(pts.len(), 1);
        assert!(pts[0].param_a < 0.5 + 1.0e-6);
        assert!((pts[0].point.x() - 0.6).abs() < TEST_TOL);
    }

    #[test]
    fn test_interfere_rejects_unbounded() {
        assert!(matches!(
            interfere(&x_axis(), &unit_circle()),
            Err(KernelError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_interfere_collinear_bounded_lines() {
        let a = Curve2d::BoundedLine {
            line: Lin2d::new(Pnt2d::new(), Dir2d::x_dir()),
            lower: 0.0,
            upper: 4.0,
        };
        let b = Curve2d::BoundedLine {
            line: Lin2d::new(Pnt2d::from_coords(3.0, 0.0), Dir2d::x_dir()),
            lower: 0.0,
            upper: 4.0,
        };
        let items = interfere(&a, &b).unwrap();
        assert_eq!(items.len(), 1);
        match items[0] {
            Interference2d::Overlap(o) => {
                assert!((o.range_a.0 - 3.0).abs() < TEST_TOL);
                assert!((o.range_a.1 - 4.0).abs() < TEST_TOL);
                assert!(o.range_b.0.abs() < TEST_TOL);
                assert!((o.range_b.1 - 1.0).abs() < TEST_TOL);
            }
            _ => panic!("expected an overlap"),
        }
    }

    #[test]
    fn test_interfere_identical_circles_full_overlap() {
        let a = unit_circle();
        let items = interfere(&a, &a.clone()).unwrap();
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Interference2d::Overlap(_)));
    }

    #[test]
    fn test_interfere_overlapping_trimmed_arcs() {
        let a = Curve2d::Trimmed(TrimmedCurve2d::new(unit_circle(), 0.0, PI).unwrap());
        let b = Curve2d::Trimmed(
            TrimmedCurve2d::new(unit_circle(), FRAC_PI_2, 3.0 * FRAC_PI_2).unwrap(),
        );
        let items = interfere(&a, &b).unwrap();
        assert_eq!(items.len(), 1);
        match items[0] {
            Interference2d::Overlap(o) => {
                assert!((o.range_a.0 - FRAC_PI_2).abs() < TEST_TOL);
                assert!((o.range_a.1 - PI).abs() < TEST_TOL);
                assert!((o.range_b.0 - FRAC_PI_2).abs() < TEST_TOL);
                assert!((o.range_b.1 - PI).abs() < TEST_TOL);
            }
            _ => panic!("expected an overlap"),
        }
    }

    #[test]
    fn test_interfere_trimmed_arc_on_full_circle() {
        let arc = Curve2d::Trimmed(TrimmedCurve2d::new(unit_circle(), 0.0, PI).unwrap());
        let items = interfere(&arc, &unit_circle()).unwrap();
        assert_eq!(items.len(), 1);
        match items[0] {
            Interference2d::Overlap(o) => {
                assert!(o.range_a.0.abs() < TEST_TOL);
                assert!((o.range_a.1 - PI).abs() < TEST_TOL);
                assert!(o.range_b.0.abs() < TEST_TOL);
                assert!((o.range_b.1 - PI).abs() < TEST_TOL);
            }
            _ => panic!("expected an overlap"),
        }
    }

    #[test]
    fn test_interfere_trimmed_lines_share_a_stretch() {
        let carrier = Curve2d::Line(Lin2d::new(Pnt2d::new(), Dir2d::x_dir()));
        let a = Curve2d::Trimmed(TrimmedCurve2d::new(carrier.clone(), 0.0, 4.0).unwrap());
        let b = Curve2d::Trimmed(TrimmedCurve2d::new(carrier, 3.0, 6.0).unwrap());
        let items = interfere(&a, &b).unwrap();
        assert_eq!(items.len(), 1);
        match items[0] {
            Interference2d::Overlap(o) => {
                assert!((o.range_a.0 - 3.0).abs() < TEST_TOL);
                assert!((o.range_a.1 - 4.0).abs() < TEST_TOL);
                assert!((o.range_b.0 - 3.0).abs() < TEST_TOL);
                assert!((o.range_b.1 - 4.0).abs() < TEST_TOL);
            }
            _ => panic!("expected an overlap"),
        }
    }

    #[test]
    fn test_interfere_disjoint_collinear_lines_empty() {
        let a = Curve2d::BoundedLine {
            line: Lin2d::new(Pnt2d::new(), Dir2d::x_dir()),
            lower: 0.0,
            upper: 1.0,
        };
        let b = Curve2d::BoundedLine {
            line: Lin2d::new(Pnt2d::from_coords(5.0, 0.0), Dir2d::x_dir()),
            lower: 0.0,
            upper: 1.0,
        };
        assert!(interfere(&a, &b).unwrap().is_empty());
    }

    #[test]
    fn test_intersect3d_line_against_bezier() {
        use crate::gp::{Dir, Pnt};
        let arc = Curve3d::Bezier(
            Bezier3d::new(vec![
                Pnt::from_coords(0.0, -1.0, 1.0),
                Pnt::from_coords(1.0, 1.0, 1.0),
                Pnt::from_coords(2.0, -1.0, 1.0),
            ])
            .unwrap(),
        );
        let line = Curve3d::Line(Lin::new(
            Pnt::from_coords(1.0, 0.0, 1.0),
            Dir::from_coords(0.0, 1.0, 0.0).unwrap(),
        ));
        let pts = intersect3d(&line, &arc).unwrap();
        assert_eq!(pts.len(), 1);
        assert!(pts[0].point.distance(&Pnt::from_coords(1.0, 0.0, 1.0)) < TEST_TOL);
        assert!((pts[0].param_b - 0.5).abs() < TEST_TOL);
    }

    #[test]
    fn test_intersect3d_conics_not_implemented() {
        use crate::gp::{Ax2, Circ};
        let c = Curve3d::Circle(Circ::new(Ax2::standard(), 1.0).unwrap());
        assert!(matches!(
            intersect3d(&c, &c.clone()),
            Err(KernelError::NotImplemented(_))
        ));
    }
}
