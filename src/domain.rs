//! Parameter domains of curves and surfaces.
//!
//! A parameter slightly outside a bounded domain is not automatically
//! invalid: the overshoot is measured in real space, by scaling it with
//! the local tangent magnitude, and compared against the ambient distance
//! tolerance. A uniform parameter tolerance would mean different physical
//! distances on differently parameterized curves.

use crate::tolerance::Tolerance;
use crate::{KernelError, Result};
use serde::{Deserialize, Serialize};

/// Classification of a parameter against a domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Validity {
    ProperlyInside,
    ToleratedLowerLimit,
    ToleratedUpperLimit,
    Outside,
}

/// The parameter range of a curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParameterDomain {
    BoundedOpen { lower: f64, upper: f64 },
    BoundedPeriodic { lower: f64, upper: f64 },
    Infinite,
}

impl ParameterDomain {
    /// A bounded, non-periodic domain `[lower, upper]`.
    pub fn bounded_open(lower: f64, upper: f64) -> Result<Self> {
        if lower >= upper {
            return Err(KernelError::InvalidGeometry(format!(
                "domain lower bound {lower} must be below upper bound {upper}"
            )));
        }
        Ok(ParameterDomain::BoundedOpen { lower, upper })
    }

    /// A periodic domain with period `upper - lower`.
    pub fn bounded_periodic(lower: f64, upper: f64) -> Result<Self> {
        if lower >= upper {
            return Err(KernelError::InvalidGeometry(format!(
                "domain lower bound {lower} must be below upper bound {upper}"
            )));
        }
        Ok(ParameterDomain::BoundedPeriodic { lower, upper })
    }

    #[inline]
    pub fn is_bounded(&self) -> bool {
        !matches!(self, ParameterDomain::Infinite)
    }

    #[inline]
    pub fn is_periodic(&self) -> bool {
        matches!(self, ParameterDomain::BoundedPeriodic { .. })
    }

    /// Lower bound, if bounded.
    pub fn lower(&self) -> Option<f64> {
        match *self {
            ParameterDomain::BoundedOpen { lower, .. }
            | ParameterDomain::BoundedPeriodic { lower, .. } => Some(lower),
            ParameterDomain::Infinite => None,
        }
    }

    /// Upper bound, if bounded.
    pub fn upper(&self) -> Option<f64> {
        match *self {
            ParameterDomain::BoundedOpen { upper, .. }
            | ParameterDomain::BoundedPeriodic { upper, .. } => Some(upper),
            ParameterDomain::Infinite => None,
        }
    }

    /// Canonical representative of `t`.
    ///
    /// For periodic domains, maps `t` into `[lower, upper)`; identity for
    /// open and infinite domains.
    pub fn wrap(&self, t: f64) -> f64 {
        match *self {
            ParameterDomain::BoundedPeriodic { lower, upper } => {
                let period = upper - lower;
                let mut w = (t - lower) % period;
                if w < 0.0 {
                    w += period;
                }
                lower + w
            }
            _ => t,
        }
    }

    /// Classifies `t`, converting overshoot into a physical distance via
    /// `tangent_magnitude`.
    ///
    /// Callers must sample the tangent a step inward when it vanishes at
    /// the boundary, so the scaled overshoot stays meaningful.
    pub fn validity(&self, t: f64, tangent_magnitude: f64) -> Validity {
        match *self {
            ParameterDomain::BoundedOpen { lower, upper } => {
                let dtol = Tolerance::current().distance;
                if t < lower {
                    if (lower - t) * tangent_magnitude.abs() <= dtol {
                        Validity::ToleratedLowerLimit
                    } else {
                        Validity::Outside
                    }
                } else if t > upper {
                    if (t - upper) * tangent_magnitude.abs() <= dtol {
                        Validity::ToleratedUpperLimit
                    } else {
                        Validity::Outside
                    }
                } else {
                    Validity::ProperlyInside
                }
            }
            ParameterDomain::BoundedPeriodic { .. } | ParameterDomain::Infinite => {
                Validity::ProperlyInside
            }
        }
    }

    /// Returns true when `validity` is anything but `Outside`.
    pub fn contains(&self, t: f64, tangent_magnitude: f64) -> bool {
        self.validity(t, tangent_magnitude) != Validity::Outside
    }

    /// Forces `t` into the domain: wraps periodic parameters and clamps
    /// open-domain parameters onto the nearest limit.
    pub fn force(&self, t: f64) -> f64 {
        match *self {
            ParameterDomain::BoundedOpen { lower, upper } => t.clamp(lower, upper),
            ParameterDomain::BoundedPeriodic { .. } => self.wrap(t),
            ParameterDomain::Infinite => t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tolerance::ToleranceGuard;
    use std::f64::consts::PI;

    #[test]
    fn test_rejects_inverted_bounds() {
        assert!(ParameterDomain::bounded_open(1.0, 1.0).is_err());
        assert!(ParameterDomain::bounded_periodic(2.0, 1.0).is_err());
    }

    #[test]
    fn test_wrap_periodic() {
        let d = ParameterDomain::bounded_periodic(0.0, 2.0 * PI).unwrap();
        assert!((d.wrap(2.0 * PI) - 0.0).abs() < 1e-12);
        assert!((d.wrap(-PI) - PI).abs() < 1e-12);
        assert!((d.wrap(5.0 * PI) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_wrap_is_identity_for_open_domains() {
        let d = ParameterDomain::bounded_open(0.0, 1.0).unwrap();
        assert_eq!(d.wrap(3.5), 3.5);
        assert_eq!(ParameterDomain::Infinite.wrap(-7.0), -7.0);
    }

    #[test]
    fn test_validity_scales_overshoot_by_tangent() {
        let d = ParameterDomain::bounded_open(0.0, 1.0).unwrap();
        let _guard = ToleranceGuard::push_distance(1.0e-7);
        assert_eq!(d.validity(0.5, 10.0), Validity::ProperlyInside);
        // overshoot 1e-8 at tangent 10 is a 1e-7 physical slip: tolerated
        assert_eq!(d.validity(1.0 + 1.0e-8, 10.0), Validity::ToleratedUpperLimit);
        // same overshoot at tangent 1000 is a 1e-5 slip: outside
        assert_eq!(d.validity(1.0 + 1.0e-8, 1000.0), Validity::Outside);
        assert_eq!(d.validity(-1.0e-8, 10.0), Validity::ToleratedLowerLimit);
    }

    #[test]
    fn test_force() {
        let open = ParameterDomain::bounded_open(0.0, 1.0).unwrap();
        assert_eq!(open.force(1.5), 1.0);
        assert_eq!(open.force(-0.5), 0.0);
        let per = ParameterDomain::bounded_periodic(0.0, 1.0).unwrap();
        assert!((per.force(1.25) - 0.25).abs() < 1e-12);
    }
}
