//! 2D curves.

mod bezier;
mod composite;

pub use bezier::Bezier2d;
pub use composite::{CompositeCurve2d, CurveSegment2d, TrimmedCurve2d};

use crate::domain::ParameterDomain;
use crate::gp::{Circ2d, Elips2d, Hypr2d, Lin2d, Parab2d, Pnt2d, Vec2d};
use crate::tolerance::Tolerance;
use crate::{KernelError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// A 2D curve.
///
/// A closed set of variants rather than an open trait: the intersection
/// dispatch needs to pattern-match on concrete curve kinds to pick the
/// analytic or subdivision engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Curve2d {
    Line(Lin2d),
    BoundedLine {
        line: Lin2d,
        lower: f64,
        upper: f64,
    },
    Circle(Circ2d),
    Ellipse(Elips2d),
    Parabola(Parab2d),
    Hyperbola(Hypr2d),
    Bezier(Bezier2d),
    Trimmed(TrimmedCurve2d),
    Segment(CurveSegment2d),
    Composite(CompositeCurve2d),
}

impl Curve2d {
    pub fn parameter_domain(&self) -> ParameterDomain {
        match self {
            Curve2d::Line(_) | Curve2d::Parabola(_) | Curve2d::Hyperbola(_) => {
                ParameterDomain::Infinite
            }
            Curve2d::BoundedLine { lower, upper, .. } => ParameterDomain::BoundedOpen {
                lower: *lower,
                upper: *upper,
            },
            Curve2d::Circle(_) | Curve2d::Ellipse(_) => ParameterDomain::BoundedPeriodic {
                lower: 0.0,
                upper: TAU,
            },
            Curve2d::Bezier(b) => b.parameter_domain(),
            Curve2d::Trimmed(t) => t.parameter_domain(),
            Curve2d::Segment(s) => s.parameter_domain(),
            Curve2d::Composite(c) => c.parameter_domain(),
        }
    }

    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.parameter_domain().is_bounded()
    }

    pub fn point(&self, t: f64) -> Pnt2d {
        self.evaluation(t).0
    }

    /// First derivative with respect to the curve parameter.
    pub fn tangent(&self, t: f64) -> Vec2d {
        self.evaluation(t).1
    }

    /// Position, first and second derivative.
    pub fn evaluation(&self, t: f64) -> (Pnt2d, Vec2d, Vec2d) {
        match self {
            Curve2d::Line(l) | Curve2d::BoundedLine { line: l, .. } => {
                (l.point_at(t), l.direction().vec(), Vec2d::new())
            }
            Curve2d::Circle(c) => {
                let r = c.radius();
                let pos = c.position();
                let (s, co) = t.sin_cos();
                (
                    pos.point_at(r * co, r * s),
                    pos.vec_at(-r * s, r * co),
                    pos.vec_at(-r * co, -r * s),
                )
            }
            Curve2d::Ellipse(e) => {
                let (a, b) = (e.x_radius(), e.y_radius());
                let pos = e.position();
                let (s, co) = t.sin_cos();
                (
                    pos.point_at(a * co, b * s),
                    pos.vec_at(-a * s, b * co),
                    pos.vec_at(-a * co, -b * s),
                )
            }
            Curve2d::Parabola(p) => {
                let f = p.focal();
                let pos = p.position();
                (
                    pos.point_at(f * t * t, 2.0 * f * t),
                    pos.vec_at(2.0 * f * t, 2.0 * f),
                    pos.vec_at(2.0 * f, 0.0),
                )
            }
            Curve2d::Hyperbola(h) => {
                let (a, b) = (h.x_radius(), h.y_radius());
                let pos = h.position();
                (
                    pos.point_at(a * t.cosh(), b * t.sinh()),
                    pos.vec_at(a * t.sinh(), b * t.cosh()),
                    pos.vec_at(a * t.cosh(), b * t.sinh()),
                )
            }
            Curve2d::Bezier(b) => b.evaluation(t),
            Curve2d::Trimmed(tr) => tr.evaluation(t),
            Curve2d::Segment(s) => s.evaluation(t),
            Curve2d::Composite(c) => c.evaluation(t),
        }
    }

    /// Unsigned curvature; zero where the tangent vanishes.
    pub fn curvature(&self, t: f64) -> f64 {
        let (_, d1, d2) = self.evaluation(t);
        let speed2 = d1.square_magnitude();
        if speed2 <= crate::precision::RESOLUTION {
            return 0.0;
        }
        d1.crossed(&d2).abs() / (speed2 * speed2.sqrt())
    }

    /// Recovers the parameter of a point lying on an analytic curve.
    ///
    /// The point must sit on the curve within the active distance
    /// tolerance. Freeform and adapted curves have no closed-form
    /// inverse and report `NotImplemented`.
    pub fn point_to_parameter(&self, p: &Pnt2d) -> Result<f64> {
        let tol = Tolerance::current();
        let t = match self {
            Curve2d::Line(l) | Curve2d::BoundedLine { line: l, .. } => l.parameter_of(p),
            Curve2d::Circle(c) => {
                let (lx, ly) = c.position().to_local(p);
                ly.atan2(lx)
            }
            Curve2d::Ellipse(e) => {
                let (lx, ly) = e.position().to_local(p);
                (ly / e.y_radius()).atan2(lx / e.x_radius())
            }
            Curve2d::Parabola(pb) => {
                let (_, ly) = pb.position().to_local(p);
                ly / (2.0 * pb.focal())
            }
            Curve2d::Hyperbola(h) => {
                let (_, ly) = h.position().to_local(p);
                (ly / h.y_radius()).asinh()
            }
            _ => {
                return Err(KernelError::NotImplemented(
                    "parameter recovery on a non-analytic curve".to_string(),
                ))
            }
        };
        let t = self.parameter_domain().wrap(t);
        if self.point(t).distance(p) > tol.distance {
            return Err(KernelError::InvalidGeometry(format!(
                "point ({}, {}) does not lie on the curve",
                p.x(),
                p.y()
            )));
        }
        Ok(t)
    }
}
