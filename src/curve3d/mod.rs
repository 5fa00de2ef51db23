//! 3D curves.

mod bezier;

pub use bezier::Bezier3d;

use crate::domain::ParameterDomain;
use crate::gp::{Circ, Elips, Lin, Pnt, Vec3};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// A 3D curve. Conics carry a placement frame and evaluate in its plane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Curve3d {
    Line(Lin),
    Circle(Circ),
    Ellipse(Elips),
    Bezier(Bezier3d),
}

impl Curve3d {
    pub fn parameter_domain(&self) -> ParameterDomain {
        match self {
            Curve3d::Line(_) => ParameterDomain::Infinite,
            Curve3d::Circle(_) | Curve3d::Ellipse(_) => ParameterDomain::BoundedPeriodic {
                lower: 0.0,
                upper: TAU,
            },
            Curve3d::Bezier(b) => b.parameter_domain(),
        }
    }

    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.parameter_domain().is_bounded()
    }

    pub fn point(&self, t: f64) -> Pnt {
        self.evaluation(t).0
    }

    pub fn tangent(&self, t: f64) -> Vec3 {
        self.evaluation(t).1
    }

    /// Position, first and second derivative.
    pub fn evaluation(&self, t: f64) -> (Pnt, Vec3, Vec3) {
        match self {
            Curve3d::Line(l) => (l.point_at(t), l.direction().vec(), Vec3::new()),
            Curve3d::Circle(c) => {
                let r = c.radius();
                let pos = c.position();
                let (s, co) = t.sin_cos();
                (
                    pos.point_at(r * co, r * s, 0.0),
                    pos.vec_at(-r * s, r * co, 0.0),
                    pos.vec_at(-r * co, -r * s, 0.0),
                )
            }
            Curve3d::Ellipse(e) => {
                let (a, b) = (e.x_radius(), e.y_radius());
                let pos = e.position();
                let (s, co) = t.sin_cos();
                (
                    pos.point_at(a * co, b * s, 0.0),
                    pos.vec_at(-a * s, b * co, 0.0),
                    pos.vec_at(-a * co, -b * s, 0.0),
                )
            }
            Curve3d::Bezier(b) => b.evaluation(t),
        }
    }

    /// Unsigned curvature; zero where the tangent vanishes.
    pub fn curvature(&self, t: f64) -> f64 {
        let (_, d1, d2) = self.evaluation(t);
        let speed2 = d1.square_magnitude();
        if speed2 <= crate::precision::RESOLUTION {
            return 0.0;
        }
        d1.crossed(&d2).magnitude() / (speed2 * speed2.sqrt())
    }
}
