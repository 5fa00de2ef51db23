//! 2D Bezier curves, rational and non-rational.

use crate::bnd::BndBox2d;
use crate::domain::ParameterDomain;
use crate::gp::{Pnt2d, Vec2d};
use crate::precision;
use crate::{KernelError, Result};
use serde::{Deserialize, Serialize};

/// A Bezier curve on `[0, 1]`, defined by its control polygon and
/// optional positive weights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bezier2d {
    poles: Vec<Pnt2d>,
    weights: Option<Vec<f64>>,
}

impl Bezier2d {
    /// Creates a non-rational Bezier curve. At least two poles are
    /// required (degree >= 1).
    pub fn new(poles: Vec<Pnt2d>) -> Result<Self> {
        if poles.len() < 2 {
            return Err(KernelError::InvalidGeometry(format!(
                "bezier curve needs at least 2 poles, got {}",
                poles.len()
            )));
        }
        Ok(Self {
            poles,
            weights: None,
        })
    }

    /// Creates a rational Bezier curve. Weights must match the pole count
    /// and be strictly positive.
    pub fn with_weights(poles: Vec<Pnt2d>, weights: Vec<f64>) -> Result<Self> {
        if poles.len() < 2 {
            return Err(KernelError::InvalidGeometry(format!(
                "bezier curve needs at least 2 poles, got {}",
                poles.len()
            )));
        }
        if weights.len() != poles.len() {
            return Err(KernelError::InvalidGeometry(format!(
                "{} weights for {} poles",
                weights.len(),
                poles.len()
            )));
        }
        if weights.iter().any(|w| *w <= precision::RESOLUTION) {
            return Err(KernelError::InvalidGeometry(
                "bezier weights must be strictly positive".to_string(),
            ));
        }
        Ok(Self {
            poles,
            weights: Some(weights),
        })
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.poles.len() - 1
    }

    #[inline]
    pub fn is_rational(&self) -> bool {
        self.weights.is_some()
    }

    #[inline]
    pub fn poles(&self) -> &[Pnt2d] {
        &self.poles
    }

    #[inline]
    pub fn pole(&self, i: usize) -> Pnt2d {
        self.poles[i]
    }

    /// Weight of pole `i`; 1 for non-rational curves.
    pub fn weight(&self, i: usize) -> f64 {
        match &self.weights {
            Some(w) => w[i],
            None => 1.0,
        }
    }

    pub fn parameter_domain(&self) -> ParameterDomain {
        ParameterDomain::BoundedOpen {
            lower: 0.0,
            upper: 1.0,
        }
    }

    /// Box of the control polygon; contains the curve by the convex hull
    /// property (weights are positive).
    pub fn enclosing_box(&self) -> BndBox2d {
        let mut b = BndBox2d::new();
        for p in &self.poles {
            b.add_point(p);
        }
        b
    }

    fn homogeneous(&self) -> Vec<[f64; 3]> {
        self.poles
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let w = self.weight(i);
                [w * p.x(), w * p.y(), w]
            })
            .collect()
    }

    pub fn point(&self, t: f64) -> Pnt2d {
        let [ax, ay, w] = casteljau(&self.homogeneous(), t);
        Pnt2d::from_coords(ax / w, ay / w)
    }

    /// Position with first and second derivative.
    ///
    /// Rational derivatives come from the quotient rule on the
    /// homogeneous form: p' = (A' - W' p) / W and
    /// p'' = (A'' - W'' p - 2 W' p') / W.
    pub fn evaluation(&self, t: f64) -> (Pnt2d, Vec2d, Vec2d) {
        let hom = self.homogeneous();
        let n = self.degree() as f64;

        let h1: Vec<[f64; 3]> = hom
            .windows(2)
            .map(|w| {
                [
                    n * (w[1][0] - w[0][0]),
                    n * (w[1][1] - w[0][1]),
                    n * (w[1][2] - w[0][2]),
                ]
            })
            .collect();

        let a = casteljau(&hom, t);
        let a1 = casteljau(&h1, t);
        let a2 = if h1.len() >= 2 {
            let m = n - 1.0;
            let h2: Vec<[f64; 3]> = h1
                .windows(2)
                .map(|w| {
                    [
                        m * (w[1][0] - w[0][0]),
                        m * (w[1][1] - w[0][1]),
                        m * (w[1][2] - w[0][2]),
                    ]
                })
                .collect();
            casteljau(&h2, t)
        } else {
            [0.0, 0.0, 0.0]
        };

        let w = a[2];
        let p = Pnt2d::from_coords(a[0] / w, a[1] / w);
        let d1 = Vec2d::from_coords((a1[0] - a1[2] * p.x()) / w, (a1[1] - a1[2] * p.y()) / w);
        let d2 = Vec2d::from_coords(
            (a2[0] - a2[2] * p.x() - 2.0 * a1[2] * d1.x()) / w,
            (a2[1] - a2[2] * p.y() - 2.0 * a1[2] * d1.y()) / w,
        );
        (p, d1, d2)
    }

    pub fn d1(&self, t: f64) -> Vec2d {
        self.evaluation(t).1
    }

    /// Splits the curve at `ratio` into the `[0, ratio]` and `[ratio, 1]`
    /// halves, each reparameterized onto `[0, 1]`.
    pub fn divide(&self, ratio: f64) -> Result<(Bezier2d, Bezier2d)> {
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(KernelError::InvalidGeometry(format!(
                "split ratio {ratio} must lie strictly inside (0, 1)"
            )));
        }
        let mut level = self.homogeneous();
        let mut left = vec![level[0]];
        let mut right = vec![*level.last().unwrap_or(&[0.0; 3])];
        while level.len() > 1 {
            level = level
                .windows(2)
                .map(|w| {
                    [
                        w[0][0] + ratio * (w[1][0] - w[0][0]),
                        w[0][1] + ratio * (w[1][1] - w[0][1]),
                        w[0][2] + ratio * (w[1][2] - w[0][2]),
                    ]
                })
                .collect();
            left.push(level[0]);
            right.push(*level.last().unwrap_or(&[0.0; 3]));
        }
        right.reverse();
        Ok((from_homogeneous(&left, self.is_rational()), from_homogeneous(&right, self.is_rational())))
    }
}

fn casteljau(pts: &[[f64; 3]], t: f64) -> [f64; 3] {
    let mut level = pts.to_vec();
    while level.len() > 1 {
        level = level
            .windows(2)
            .map(|w| {
                [
                    w[0][0] + t * (w[1][0] - w[0][0]),
                    w[0][1] + t * (w[1][1] - w[0][1]),
                    w[0][2] + t * (w[1][2] - w[0][2]),
                ]
            })
            .collect();
    }
    level[0]
}

fn from_homogeneous(hom: &[[f64; 3]], rational: bool) -> Bezier2d {
    let poles = hom
        .iter()
        .map(|h| Pnt2d::from_coords(h[0] / h[2], h[1] / h[2]))
        .collect();
    let weights = rational.then(|| hom.iter().map(|h| h[2]).collect());
    Bezier2d { poles, weights }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_TOL: f64 = 1.0e-10;

    fn cubic() -> Bezier2d {
        Bezier2d::new(vec![
            Pnt2d::from_coords(0.0, 0.0),
            Pnt2d::from_coords(1.0, 2.0),
            Pnt2d::from_coords(3.0, 2.0),
            Pnt2d::from_coords(4.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_short_polygon() {
        assert!(Bezier2d::new(vec![Pnt2d::new()]).is_err());
    }

    #[test]
    fn test_endpoint_interpolation() {
        let c = cubic();
        assert!(c.point(0.0).distance(&Pnt2d::from_coords(0.0, 0.0)) < TEST_TOL);
        assert!(c.point(1.0).distance(&Pnt2d::from_coords(4.0, 0.0)) < TEST_TOL);
    }

    #[test]
    fn test_endpoint_derivative_is_scaled_leg() {
        let c = cubic();
        let d = c.d1(0.0);
        assert!((d.x() - 3.0).abs() < TEST_TOL);
        assert!((d.y() - 6.0).abs() < TEST_TOL);
    }

    #[test]
    fn test_rational_quarter_circle_stays_on_circle() {
        let w = std::f64::consts::FRAC_1_SQRT_2;
        let arc = Bezier2d::with_weights(
            vec![
                Pnt2d::from_coords(1.0, 0.0),
                Pnt2d::from_coords(1.0, 1.0),
                Pnt2d::from_coords(0.0, 1.0),
            ],
            vec![1.0, w, 1.0],
        )
        .unwrap();
        for i in 0..=10 {
            let p = arc.point(i as f64 / 10.0);
            let r = (p.x() * p.x() + p.y() * p.y()).sqrt();
            assert!((r - 1.0).abs() < TEST_TOL, "r = {r} at sample {i}");
        }
    }

    #[test]
    fn test_divide_matches_parent() {
        let c = cubic();
        let (left, right) = c.divide(0.5).unwrap();
        assert!(left.point(1.0).distance(&c.point(0.5)) < TEST_TOL);
        assert!(right.point(0.0).distance(&c.point(0.5)) < TEST_TOL);
        assert!(left.point(0.5).distance(&c.point(0.25)) < TEST_TOL);
        assert!(right.point(0.5).distance(&c.point(0.75)) < TEST_TOL);
    }

    #[test]
    fn test_second_derivative_of_line_segment_is_zero() {
        let seg = Bezier2d::new(vec![
            Pnt2d::from_coords(0.0, 0.0),
            Pnt2d::from_coords(2.0, 1.0),
        ])
        .unwrap();
        let (_, d1, d2) = seg.evaluation(0.3);
        assert!((d1.x() - 2.0).abs() < TEST_TOL);
        assert!((d1.y() - 1.0).abs() < TEST_TOL);
        assert!(d2.magnitude() < TEST_TOL);
    }

    #[test]
    fn test_enclosing_box_holds_samples() {
        let c = cubic();
        let mut b = c.enclosing_box();
        b.enlarge(TEST_TOL);
        for i in 0..=20 {
            assert!(!b.is_out_point(&c.point(i as f64 / 20.0)));
        }
    }
}
