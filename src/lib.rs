//! curvekit: 2D/3D curve intersection kernel
//!
//! Analytic conic pairs resolve through closed-form polynomials;
//! freeform (Bezier) operands run through recursive subdivision with
//! Newton refinement. Curve-against-patch intersection subdivides the
//! patch to planar fragments. All comparisons run against the ambient
//! [`tolerance::Tolerance`], scoped with [`tolerance::ToleranceGuard`].

pub mod bnd;
pub mod curve2d;
pub mod curve3d;
pub mod domain;
pub mod gp;
pub mod intersect;
pub mod math;
pub mod precision;
pub mod surface;
pub mod tolerance;

// Re-exports for convenience
pub use curve2d::Curve2d;
pub use curve3d::Curve3d;
pub use domain::ParameterDomain;
pub use intersect::{
    interfere, intersect, intersect3d, intersect_curve_surface, CurveSurfacePoint, Interference2d,
    IntersectionPoint2d, IntersectionPoint3d, OverlapCurve2d,
};
pub use surface::BezierSurface3d;
pub use tolerance::{Tolerance, ToleranceGuard};

/// Result type for kernel operations
pub type Result<T> = std::result::Result<T, KernelError>;

#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Parameter {parameter} outside [{lower}, {upper}]")]
    ParameterOutOfRange {
        parameter: f64,
        lower: f64,
        upper: f64,
    },

    #[error("Indefinite solution: coincident operands, sample near {0:?}")]
    IndefiniteSolution(Box<IntersectionPoint2d>),

    #[error("Not implemented: {0}")]
    NotImplemented(String),
}
