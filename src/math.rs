//! Polynomial root finding.
//!
//! The analytic conic intersectors reduce every pairing to a quadratic or
//! quartic in one parameter. Quadratics are solved in closed form; higher
//! degrees go through Durand-Kerner iteration on the complex plane, which
//! finds all roots simultaneously and needs no derivative.

use num_complex::Complex64;

/// Iteration cap for Durand-Kerner. Well-conditioned quartics converge in
/// well under twenty rounds.
const MAX_ITERATIONS: usize = 100;

/// Convergence threshold on the per-root update magnitude.
const ROOT_EPS: f64 = 1.0e-14;

/// Solves `c0 + c1 t + c2 t^2 = 0`, returning real roots in ascending
/// order. A double root is reported once. Degenerates to the linear and
/// constant cases when leading coefficients vanish.
pub fn solve_quadratic(c0: f64, c1: f64, c2: f64) -> Vec<f64> {
    if c2 == 0.0 {
        if c1 == 0.0 {
            return Vec::new();
        }
        return vec![-c0 / c1];
    }
    let disc = c1 * c1 - 4.0 * c2 * c0;
    if disc < 0.0 {
        return Vec::new();
    }
    if disc == 0.0 {
        return vec![-c1 / (2.0 * c2)];
    }
    // The classic trick avoiding cancellation in the smaller root.
    let q = -0.5 * (c1 + c1.signum() * disc.sqrt());
    let mut roots = vec![q / c2, c0 / q];
    roots.sort_by(|a, b| a.total_cmp(b));
    roots
}

/// Finds all complex roots of `coeffs[0] + coeffs[1] t + ...`, low degree
/// first. Trailing zero coefficients are stripped, so the caller may pass
/// a quartic buffer even when the geometry degenerated to a lower degree.
///
/// Returns the best iterate even when the update never falls below the
/// convergence threshold; callers verify candidates against the geometry
/// afterwards, so a slightly off root is filtered there rather than lost.
pub fn polynomial_roots(coeffs: &[f64]) -> Vec<Complex64> {
    let mut degree = coeffs.len();
    while degree > 0 && coeffs[degree - 1] == 0.0 {
        degree -= 1;
    }
    if degree < 2 {
        return Vec::new();
    }
    let degree = degree - 1;
    if degree == 1 {
        return vec![Complex64::new(-coeffs[0] / coeffs[1], 0.0)];
    }

    let lead = coeffs[degree];
    let monic: Vec<f64> = coeffs[..degree].iter().map(|c| c / lead).collect();

    // Distinct starting points spread around the unit circle.
    let seed = Complex64::new(0.4, 0.9);
    let mut roots: Vec<Complex64> = (0..degree).map(|k| seed.powu(k as u32 + 1)).collect();

    for iteration in 0..MAX_ITERATIONS {
        let mut worst: f64 = 0.0;
        for i in 0..degree {
            let xi = roots[i];
            let mut denom = Complex64::new(1.0, 0.0);
            for (j, &xj) in roots.iter().enumerate() {
                if j != i {
                    denom *= xi - xj;
                }
            }
            if denom.norm_sqr() == 0.0 {
                continue;
            }
            let delta = eval_monic(&monic, xi) / denom;
            roots[i] = xi - delta;
            worst = worst.max(delta.norm());
        }
        if worst < ROOT_EPS {
            return roots;
        }
        if iteration == MAX_ITERATIONS - 1 {
            log::debug!(
                "polynomial iteration stopped at residual {worst:e} for degree {degree}"
            );
        }
    }
    roots
}

fn eval_monic(lower_coeffs: &[f64], x: Complex64) -> Complex64 {
    let mut acc = Complex64::new(1.0, 0.0);
    for &c in lower_coeffs.iter().rev() {
        acc = acc * x + c;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadratic_two_roots() {
        let roots = solve_quadratic(-2.0, -1.0, 1.0);
        assert_eq!(roots.len(), 2);
        assert!((roots[0] + 1.0).abs() < 1e-12);
        assert!((roots[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_quadratic_double_root() {
        let roots = solve_quadratic(1.0, -2.0, 1.0);
        assert_eq!(roots, vec![1.0]);
    }

    #[test]
    fn test_quadratic_no_real_roots() {
        assert!(solve_quadratic(1.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn test_quadratic_degenerates_to_linear() {
        let roots = solve_quadratic(-6.0, 2.0, 0.0);
        assert_eq!(roots, vec![3.0]);
    }

    #[test]
    fn test_quartic_known_roots() {
        // (t - 1)(t + 2)(t - 3)(t + 4) = t^4 + 2t^3 - 13t^2 - 14t + 24
        let roots = polynomial_roots(&[24.0, -14.0, -13.0, 2.0, 1.0]);
        assert_eq!(roots.len(), 4);
        let mut reals: Vec<f64> = roots.iter().map(|r| r.re).collect();
        reals.sort_by(|a, b| a.total_cmp(b));
        for r in &roots {
            assert!(r.im.abs() < 1e-9);
        }
        for (got, want) in reals.iter().zip([-4.0, -2.0, 1.0, 3.0]) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
    }

    #[test]
    fn test_quartic_complex_pair() {
        // (t^2 + 1)(t - 2)(t + 2) = t^4 - 3t^2 - 4
        let roots = polynomial_roots(&[-4.0, 0.0, -3.0, 0.0, 1.0]);
        let real_count = roots.iter().filter(|r| r.im.abs() < 1e-9).count();
        assert_eq!(real_count, 2);
    }

    #[test]
    fn test_trailing_zeros_stripped() {
        // quartic buffer holding a quadratic: t^2 - 4
        let roots = polynomial_roots(&[-4.0, 0.0, 1.0, 0.0, 0.0]);
        assert_eq!(roots.len(), 2);
        for r in &roots {
            assert!((r.re.abs() - 2.0).abs() < 1e-10);
            assert!(r.im.abs() < 1e-10);
        }
    }
}
