//! Precision constants for geometric comparisons.
//!
//! The ambient tolerance stack in [`crate::tolerance`] is seeded from these
//! values; algorithms read the stack, not these constants, so that scoped
//! overrides take effect everywhere.

/// Angular tolerance for checking equality of angles (radians).
/// Used for parallelism checks on vectors.
pub const ANGULAR: f64 = 1.0e-12;

/// Confusion tolerance for checking coincidence of two points in real space.
/// Two points are coincident if their distance < CONFUSION.
pub const CONFUSION: f64 = 1.0e-7;

/// Intersection tolerance for iterative intersection algorithms.
pub const INTERSECTION: f64 = CONFUSION * 0.01;

/// Parameter step, as a fraction of the domain span, for sampling away
/// from a degenerate point.
pub const PARAMETRIC_BASE: f64 = 1.0e-3;

/// Fundamental resolution for zero-length checks in normalization.
/// Distinct from CONFUSION: this is a numerical zero check, not a
/// geometric tolerance.
pub const RESOLUTION: f64 = f64::MIN_POSITIVE;

/// "Infinite" value for algorithms that need infinity bounds.
/// Not f64::INFINITY, to keep arithmetic NaN-free.
pub const INFINITE: f64 = 1.0e100;

/// Convert real space precision to parametric space precision.
/// Returns p / t where t is the mean tangent length.
#[inline]
pub const fn parametric(p: f64, t: f64) -> f64 {
    p / t
}

/// Check if a value is considered infinite.
#[inline]
pub fn is_infinite(value: f64) -> bool {
    value.abs() >= INFINITE * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_values() {
        assert_eq!(ANGULAR, 1.0e-12);
        assert_eq!(CONFUSION, 1.0e-7);
        assert_eq!(INTERSECTION, 1.0e-9);
    }

    #[test]
    fn test_infinite() {
        assert!(is_infinite(INFINITE));
        assert!(is_infinite(-INFINITE));
        assert!(!is_infinite(1.0e99));
    }

    #[test]
    fn test_parametric() {
        assert_eq!(parametric(1.0e-7, 10.0), 1.0e-8);
    }
}
