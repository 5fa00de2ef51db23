//! Closed-form intersection of analytic 2D curves.
//!
//! Every pairing reduces to a polynomial of degree at most four in one
//! curve's parameter variable. Line pairings stay quadratic in the line
//! parameter. Conic/conic pairings are written in the second operand's
//! trigonometric or hyperbolic substitution variable (cos T, sin T or
//! sinh T), expressed in the first operand's major-axis frame, and solved
//! with the complex root finder. Every algebraic candidate is then
//! verified against the actual geometry before it is reported, so a
//! fuzzy quartic root costs nothing but a rejected candidate.

use crate::curve2d::Curve2d;
use crate::gp::{Ax22d, Circ2d, Elips2d, Hypr2d, Lin2d, Parab2d, Pnt2d};
use crate::intersect::result::{InterferenceList2d, IntersectionPoint2d};
use crate::math::{polynomial_roots, solve_quadratic};
use crate::tolerance::{Tolerance, ToleranceGuard};
use crate::{KernelError, Result};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Relative bound on the imaginary part of an acceptable real root.
const IMAGINARY_EPS: f64 = 1.0e-8;

/// Leniency when clamping trigonometric roots to [-1, 1].
const TRIG_OVERSHOOT: f64 = 1.0e-6;

/// Intersects two analytic curves in closed form.
///
/// Operands must be basis analytic kinds (line or conic); the dispatch
/// layer unwraps bounded and adapted curves before calling this.
pub fn intersect_analytic(a: &Curve2d, b: &Curve2d) -> Result<Vec<IntersectionPoint2d>> {
    if rank(a) > rank(b) {
        let swapped = intersect_analytic(b, a);
        return match swapped {
            Ok(points) => Ok(points.iter().map(|p| p.swapped()).collect()),
            Err(KernelError::IndefiniteSolution(sample)) => {
                Err(KernelError::IndefiniteSolution(Box::new(sample.swapped())))
            }
            Err(e) => Err(e),
        };
    }
    match (a, b) {
        (Curve2d::Line(la), Curve2d::Line(lb)) => line_line(la, lb),
        (Curve2d::Line(l), _) => line_conic(l, b),
        (Curve2d::Circle(ca), Curve2d::Circle(cb)) => circle_circle(a, ca, b, cb),
        (Curve2d::Circle(c), Curve2d::Ellipse(eb)) => {
            let ea = promote(c)?;
            ellipse_ellipse(a, &ea, b, eb)
        }
        (Curve2d::Circle(c), Curve2d::Parabola(pb)) => {
            let ea = promote(c)?;
            ellipse_parabola(a, &ea, b, pb)
        }
        (Curve2d::Circle(c), Curve2d::Hyperbola(hb)) => {
            let ea = promote(c)?;
            ellipse_hyperbola(a, &ea, b, hb)
        }
        (Curve2d::Ellipse(ea), Curve2d::Ellipse(eb)) => ellipse_ellipse(a, ea, b, eb),
        (Curve2d::Ellipse(ea), Curve2d::Parabola(pb)) => ellipse_parabola(a, ea, b, pb),
        (Curve2d::Ellipse(ea), Curve2d::Hyperbola(hb)) => ellipse_hyperbola(a, ea, b, hb),
        _ => Err(KernelError::NotImplemented(format!(
            "closed-form intersection of {} and {}",
            kind_name(a),
            kind_name(b)
        ))),
    }
}

/// True for the curve kinds `intersect_analytic` accepts.
pub fn is_analytic(curve: &Curve2d) -> bool {
    matches!(
        curve,
        Curve2d::Line(_)
            | Curve2d::Circle(_)
            | Curve2d::Ellipse(_)
            | Curve2d::Parabola(_)
            | Curve2d::Hyperbola(_)
    )
}

fn rank(curve: &Curve2d) -> u8 {
    match curve {
        Curve2d::Line(_) => 0,
        Curve2d::Circle(_) => 1,
        Curve2d::Ellipse(_) => 2,
        Curve2d::Parabola(_) => 3,
        Curve2d::Hyperbola(_) => 4,
        _ => 5,
    }
}

fn kind_name(curve: &Curve2d) -> &'static str {
    match curve {
        Curve2d::Line(_) => "line",
        Curve2d::BoundedLine { .. } => "bounded line",
        Curve2d::Circle(_) => "circle",
        Curve2d::Ellipse(_) => "ellipse",
        Curve2d::Parabola(_) => "parabola",
        Curve2d::Hyperbola(_) => "hyperbola",
        Curve2d::Bezier(_) => "bezier",
        Curve2d::Trimmed(_) => "trimmed curve",
        Curve2d::Segment(_) => "curve segment",
        Curve2d::Composite(_) => "composite curve",
    }
}

fn promote(c: &Circ2d) -> Result<Elips2d> {
    Elips2d::new(c.position(), c.radius(), c.radius())
}

fn indefinite(a: &Curve2d, b: &Curve2d) -> KernelError {
    let point = a.point(0.0);
    let param_b = b.point_to_parameter(&point).unwrap_or(0.0);
    KernelError::IndefiniteSolution(Box::new(IntersectionPoint2d::new(point, 0.0, param_b)))
}

fn line_line(la: &Lin2d, lb: &Lin2d) -> Result<Vec<IntersectionPoint2d>> {
    let tol = Tolerance::current();
    let da = la.direction().vec();
    let db = lb.direction().vec();
    let cross = da.crossed(&db);
    let offset = lb.location() - la.location();
    if cross.abs() <= tol.angle.max(1.0e-12) {
        if la.contains(&lb.location(), tol.distance) {
            let point = la.location();
            let pb = lb.parameter_of(&point);
            return Err(KernelError::IndefiniteSolution(Box::new(
                IntersectionPoint2d::new(point, 0.0, pb),
            )));
        }
        return Ok(Vec::new());
    }
    let ta = offset.crossed(&db) / cross;
    let tb = offset.crossed(&da) / cross;
    let point = la.point_at(ta);
    Ok(vec![IntersectionPoint2d::new(point, ta, tb)])
}

/// Line against any conic: substitute the line into the conic's implicit
/// equation in the conic's own frame, solve the quadratic in the line
/// parameter, merge the near-tangent double root.
fn line_conic(line: &Lin2d, conic: &Curve2d) -> Result<Vec<IntersectionPoint2d>> {
    let tol = Tolerance::current();
    let (frame, hyperbolic_branch) = match conic {
        Curve2d::Circle(c) => (c.position(), false),
        Curve2d::Ellipse(e) => (e.position(), false),
        Curve2d::Parabola(p) => (p.position(), false),
        Curve2d::Hyperbola(h) => (h.position(), true),
        _ => {
            return Err(KernelError::NotImplemented(format!(
                "closed-form intersection of line and {}",
                kind_name(conic)
            )))
        }
    };
    let (ox, oy) = frame.to_local(&line.location());
    let dvec = line.direction().vec();
    let dx = dvec.dot(&frame.x_direction().vec());
    let dy = dvec.dot(&frame.y_direction().vec());

    let (c0, c1, c2) = match conic {
        Curve2d::Circle(c) => {
            let r = c.radius();
            (ox * ox + oy * oy - r * r, 2.0 * (ox * dx + oy * dy), 1.0)
        }
        Curve2d::Ellipse(e) => {
            let (a2, b2) = (e.x_radius() * e.x_radius(), e.y_radius() * e.y_radius());
            (
                ox * ox / a2 + oy * oy / b2 - 1.0,
                2.0 * (ox * dx / a2 + oy * dy / b2),
                dx * dx / a2 + dy * dy / b2,
            )
        }
        Curve2d::Parabola(p) => {
            let f4 = 4.0 * p.focal();
            (oy * oy - f4 * ox, 2.0 * oy * dy - f4 * dx, dy * dy)
        }
        Curve2d::Hyperbola(h) => {
            let (a2, b2) = (h.x_radius() * h.x_radius(), h.y_radius() * h.y_radius());
            (
                ox * ox / a2 - oy * oy / b2 - 1.0,
                2.0 * (ox * dx / a2 - oy * dy / b2),
                dx * dx / a2 - dy * dy / b2,
            )
        }
        _ => unreachable!(),
    };

    let mut roots = solve_quadratic(c0, c1, c2);
    // tangency: the direction is unit, so the parameter gap is a length
    if roots.len() == 2 && (roots[1] - roots[0]).abs() <= tol.distance {
        roots = vec![0.5 * (roots[0] + roots[1])];
    }

    let mut list = InterferenceList2d::new();
    for t in roots {
        let point = line.point_at(t);
        if hyperbolic_branch && frame.to_local(&point).0 <= 0.0 {
            continue;
        }
        if let Ok(tb) = conic.point_to_parameter(&point) {
            list.push_point(IntersectionPoint2d::new(point, t, tb));
        }
    }
    Ok(list.into_points())
}

fn circle_circle(
    a: &Curve2d,
    ca: &Circ2d,
    b: &Curve2d,
    cb: &Circ2d,
) -> Result<Vec<IntersectionPoint2d>> {
    let tol = Tolerance::current();
    let (r1, r2) = (ca.radius(), cb.radius());
    let span = cb.center() - ca.center();
    let d = span.magnitude();
    if d <= tol.distance {
        if (r1 - r2).abs() <= tol.distance {
            return Err(indefinite(a, b));
        }
        return Ok(Vec::new());
    }
    // radical line: signed distance of the chord from A's center
    let x0 = (d * d + r1 * r1 - r2 * r2) / (2.0 * d);
    let h2 = r1 * r1 - x0 * x0;
    let u = span.scaled(1.0 / d);
    let v = crate::gp::Vec2d::from_coords(-u.y(), u.x());
    let foot = ca.center().translated(u.scaled(x0));

    let mut list = InterferenceList2d::new();
    let mut push = |point: Pnt2d| -> Result<()> {
        let ta = a.point_to_parameter(&point)?;
        let tb = b.point_to_parameter(&point)?;
        list.push_point(IntersectionPoint2d::new(point, ta, tb));
        Ok(())
    };
    if h2 > tol.distance * r1 {
        let h = h2.sqrt();
        let _ = push(foot.translated(v.scaled(h)));
        let _ = push(foot.translated(v.scaled(-h)));
    } else if h2 > -tol.distance * r1 {
        let _ = push(foot);
    }
    Ok(list.into_points())
}

/// An ellipse reduced to the frame whose x axis carries the major
/// radius. `offset` converts a major-frame angle back to the original
/// parameterization.
struct MajorFrame {
    frame: Ax22d,
    major: f64,
    minor: f64,
    offset: f64,
}

fn major_frame(e: &Elips2d) -> MajorFrame {
    if e.x_radius() >= e.y_radius() {
        MajorFrame {
            frame: e.position(),
            major: e.x_radius(),
            minor: e.y_radius(),
            offset: 0.0,
        }
    } else {
        MajorFrame {
            frame: Ax22d::from_origin_x_direction(e.center(), e.position().y_direction()),
            major: e.y_radius(),
            minor: e.x_radius(),
            offset: FRAC_PI_2,
        }
    }
}

fn coincident_ellipses(ea: &Elips2d, eb: &Elips2d, fa: &MajorFrame, fb: &MajorFrame) -> bool {
    let tol = Tolerance::current();
    if ea.center().distance(&eb.center()) > tol.distance {
        return false;
    }
    if (fa.major - fb.major).abs() > tol.distance || (fa.minor - fb.minor).abs() > tol.distance {
        return false;
    }
    let circular = (fa.major - fa.minor).abs() <= tol.distance;
    let dang = fb.frame.rotation() - fa.frame.rotation();
    circular || dang.sin().abs() <= 1.0e-9
}

/// Keeps the real part of roots whose imaginary part is negligible.
fn real_roots(coeffs: &[f64]) -> Vec<f64> {
    polynomial_roots(coeffs)
        .into_iter()
        .filter(|r| r.im.abs() <= IMAGINARY_EPS * (1.0 + r.re.abs()))
        .map(|r| r.re)
        .collect()
}

/// Clamps a cos/sin-valued root, rejecting clear overshoots.
fn clamp_trig(x: f64) -> Option<f64> {
    if x.abs() > 1.0 + TRIG_OVERSHOOT {
        None
    } else {
        Some(x.clamp(-1.0, 1.0))
    }
}

fn wrap_angle(t: f64) -> f64 {
    t.rem_euclid(TAU)
}

/// Verifies one candidate parameter on B and pushes it when the point
/// also lies on A.
///
/// A quartic root of higher multiplicity carries roughly square-root
/// accuracy, so a candidate that narrowly misses the strict check gets
/// one Newton polish before it is rejected.
fn verify_and_push(list: &mut InterferenceList2d, a: &Curve2d, b: &Curve2d, tb: f64) {
    let point = b.point(tb);
    if let Ok(ta) = a.point_to_parameter(&point) {
        list.push_point(IntersectionPoint2d::new(point, ta, tb));
        return;
    }
    let loose = {
        let _guard = ToleranceGuard::push_distance(Tolerance::current().distance * 100.0);
        a.point_to_parameter(&point).ok()
    };
    if let Some(ta0) = loose {
        if let Some((ta, tb, mid)) = super::newton::refine_2d(a, b, ta0, tb) {
            list.push_point(IntersectionPoint2d::new(
                mid,
                a.parameter_domain().wrap(ta),
                b.parameter_domain().wrap(tb),
            ));
        }
    }
}

/// Ellipse against ellipse, quartic in B's cos T or sin T.
///
/// The substitution variable is chosen from B's center position in A's
/// major frame: when the center sits closer to A's x axis the cos form
/// is better conditioned, otherwise the sin form, and the two quadratic
/// prefactors swap roles accordingly.
fn ellipse_ellipse(
    a: &Curve2d,
    ea: &Elips2d,
    b: &Curve2d,
    eb: &Elips2d,
) -> Result<Vec<IntersectionPoint2d>> {
    let fa = major_frame(ea);
    let fb = major_frame(eb);
    if coincident_ellipses(ea, eb, &fa, &fb) {
        return Err(indefinite(a, b));
    }

    let (aa, ba) = (fa.major, fa.minor);
    let (ab, bb) = (fb.major, fb.minor);
    let dang = fb.frame.rotation() - fa.frame.rotation();
    let (ers, erc) = dang.sin_cos();
    let (cx, cy) = fa.frame.to_local(&eb.center());
    let cos_form = cx.abs() < cy.abs();

    let mut p0 = erc * ab;
    let mut p1 = ers * bb;
    let p2 = 2.0 * p0 * p1 * (aa * aa - ba * ba);
    p0 *= ba;
    p1 *= ba;
    let mut p5 = ers * ab * aa;
    let mut p6 = erc * bb * aa;
    let mut p3 = 2.0 * (p0 * cx * ba + p5 * cy * aa);
    let mut p4 = 2.0 * (p6 * cy * aa - p1 * cx * ba);
    let mut q0 = p0 * p0 + p5 * p5;
    let mut q1 = p1 * p1 + p6 * p6;
    p5 = ba * ba * cx * cx + aa * aa * cy * cy;
    p6 = aa * aa * ba * ba;
    if !cos_form {
        std::mem::swap(&mut q0, &mut q1);
        std::mem::swap(&mut p3, &mut p4);
    }

    let c4_pre = q0 - q1;
    let c0_pre = p5 + q1 - p6;
    let tmp = p2 * p4;
    let c3 = 2.0 * (c4_pre * p3 + tmp);
    let c1 = 2.0 * (c0_pre * p3 - tmp);
    let c2 = 2.0 * c4_pre * c0_pre + p3 * p3 + p4 * p4 - p2 * p2;
    let c4 = c4_pre * c4_pre + p2 * p2;
    let c0 = c0_pre * c0_pre - p4 * p4;

    let mut list = InterferenceList2d::new();
    for root in real_roots(&[c0, c1, c2, c3, c4]) {
        let Some(x) = clamp_trig(root) else { continue };
        let candidates = if cos_form {
            let t = x.acos();
            [t, -t]
        } else {
            let t = x.asin();
            [t, PI - t]
        };
        for t_major in candidates {
            verify_and_push(&mut list, a, b, wrap_angle(t_major + fb.offset));
        }
    }
    Ok(list.into_points())
}

/// Ellipse against parabola, quartic in the parabola parameter.
fn ellipse_parabola(
    a: &Curve2d,
    ea: &Elips2d,
    b: &Curve2d,
    pb: &Parab2d,
) -> Result<Vec<IntersectionPoint2d>> {
    let fa = major_frame(ea);
    let (aa, ba) = (fa.major, fa.minor);
    let (a2, b2) = (aa * aa, ba * ba);
    let dang = pb.position().rotation() - fa.frame.rotation();
    let (ers, erc) = dang.sin_cos();
    let f = pb.focal();
    let (efcos, efsin) = (f * erc, f * ers);
    let (vx, vy) = fa.frame.to_local(&pb.vertex());

    let c4 = (aa * efsin) * (aa * efsin) + (ba * efcos) * (ba * efcos);
    let c3 = 4.0 * (a2 - b2) * efsin * efcos;
    let c2 = 2.0 * (a2 * (vy * efsin + 2.0 * efcos * efcos) + b2 * (vx * efcos + 2.0 * efsin * efsin));
    let c1 = 4.0 * (a2 * vy * efcos - b2 * vx * efsin);
    let c0 = a2 * vy * vy + b2 * vx * vx - a2 * b2;

    let mut list = InterferenceList2d::new();
    for t in real_roots(&[c0, c1, c2, c3, c4]) {
        verify_and_push(&mut list, a, b, t);
    }
    Ok(list.into_points())
}

/// Ellipse against hyperbola, quartic in the hyperbola's sinh T.
fn ellipse_hyperbola(
    a: &Curve2d,
    ea: &Elips2d,
    b: &Curve2d,
    hb: &Hypr2d,
) -> Result<Vec<IntersectionPoint2d>> {
    let fa = major_frame(ea);
    let (aa, ba) = (fa.major, fa.minor);
    let (a2, b2) = (aa * aa, ba * ba);
    let dang = hb.position().rotation() - fa.frame.rotation();
    let (ers, erc) = dang.sin_cos();
    let (e, f) = (hb.x_radius(), hb.y_radius());
    let (cx, cy) = fa.frame.to_local(&hb.center());

    let p0 = e * e * (b2 * erc * erc + a2 * ers * ers);
    let p1 = f * f * (b2 * ers * ers + a2 * erc * erc);
    let p2 = 2.0 * e * f * erc * ers * (a2 - b2);
    let p3 = 2.0 * e * (b2 * cx * erc + a2 * cy * ers);
    let p4 = 2.0 * f * (a2 * cy * erc - b2 * cx * ers);
    let p5 = b2 * cx * cx + a2 * cy * cy - a2 * b2;

    let c4_pre = p1 + p0;
    let c0_pre = p5 + p0;
    let tmp = p2 * p3;
    let c3 = 2.0 * (c4_pre * p4 - tmp);
    let c1 = 2.0 * (c0_pre * p4 - tmp);
    let c2 = 2.0 * c4_pre * c0_pre + p4 * p4 - p2 * p2 - p3 * p3;
    let c4 = c4_pre * c4_pre - p2 * p2;
    let c0 = c0_pre * c0_pre - p3 * p3;

    let mut list = InterferenceList2d::new();
    for s in real_roots(&[c0, c1, c2, c3, c4]) {
        verify_and_push(&mut list, a, b, s.asinh());
    }
    Ok(list.into_points())
}
