//! 3D Bezier curves.

use crate::bnd::BndBox3d;
use crate::domain::ParameterDomain;
use crate::gp::{Pnt, Vec3};
use crate::precision;
use crate::{KernelError, Result};
use serde::{Deserialize, Serialize};

/// A Bezier curve on `[0, 1]` in 3D, with optional positive weights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bezier3d {
    poles: Vec<Pnt>,
    weights: Option<Vec<f64>>,
}

impl Bezier3d {
    pub fn new(poles: Vec<Pnt>) -> Result<Self> {
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

    pub fn with_weights(poles: Vec<Pnt>, weights: Vec<f64>) -> Result<Self> {
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
    pub fn poles(&self) -> &[Pnt] {
        &self.poles
    }

    #[inline]
    pub fn pole(&self, i: usize) -> Pnt {
        self.poles[i]
    }

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

    pub fn enclosing_box(&self) -> BndBox3d {
        let mut b = BndBox3d::new();
        for p in &self.poles {
            b.add_point(p);
        }
        b
    }

    fn homogeneous(&self) -> Vec<[f64; 4]> {
        self.poles
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let w = self.weight(i);
                [w * p.x(), w * p.y(), w * p.z(), w]
            })
            .collect()
    }

    pub fn point(&self, t: f64) -> Pnt {
        let [ax, ay, az, w] = casteljau(&self.homogeneous(), t);
        Pnt::from_coords(ax / w, ay / w, az / w)
    }

    /// Position with first and second derivative, quotient rule on the
    /// homogeneous form for rational curves.
    pub fn evaluation(&self, t: f64) -> (Pnt, Vec3, Vec3) {
        let hom = self.homogeneous();
        let n = self.degree() as f64;

        let h1: Vec<[f64; 4]> = hom
            .windows(2)
            .map(|w| diff_scaled(&w[0], &w[1], n))
            .collect();

        let a = casteljau(&hom, t);
        let a1 = casteljau(&h1, t);
        let a2 = if h1.len() >= 2 {
            let m = n - 1.0;
            let h2: Vec<[f64; 4]> = h1
                .windows(2)
                .map(|w| diff_scaled(&w[0], &w[1], m))
                .collect();
            casteljau(&h2, t)
        } else {
            [0.0; 4]
        };

        let w = a[3];
        let p = Pnt::from_coords(a[0] / w, a[1] / w, a[2] / w);
        let d1 = Vec3::from_coords(
            (a1[0] - a1[3] * p.x()) / w,
            (a1[1] - a1[3] * p.y()) / w,
            (a1[2] - a1[3] * p.z()) / w,
        );
        let d2 = Vec3::from_coords(
            (a2[0] - a2[3] * p.x() - 2.0 * a1[3] * d1.x()) / w,
            (a2[1] - a2[3] * p.y() - 2.0 * a1[3] * d1.y()) / w,
            (a2[2] - a2[3] * p.z() - 2.0 * a1[3] * d1.z()) / w,
        );
        (p, d1, d2)
    }

    pub fn d1(&self, t: f64) -> Vec3 {
        self.evaluation(t).1
    }

    /// Splits at `ratio` into two sub-curves, each on `[0, 1]`.
    pub fn divide(&self, ratio: f64) -> Result<(Bezier3d, Bezier3d)> {
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(KernelError::InvalidGeometry(format!(
                "split ratio {ratio} must lie strictly inside (0, 1)"
            )));
        }
        let mut level = self.homogeneous();
        let mut left = vec![level[0]];
        let mut right = vec![*level.last().unwrap_or(&[0.0; 4])];
        while level.len() > 1 {
            level = level
                .windows(2)
                .map(|w| lerp(&w[0], &w[1], ratio))
                .collect();
            left.push(level[0]);
            right.push(*level.last().unwrap_or(&[0.0; 4]));
        }
        right.reverse();
        Ok((
            from_homogeneous(&left, self.is_rational()),
            from_homogeneous(&right, self.is_rational()),
        ))
    }
}

fn lerp(a: &[f64; 4], b: &[f64; 4], t: f64) -> [f64; 4] {
    [
        a[0] + t * (b[0] - a[0]),
        a[1] + t * (b[1] - a[1]),
        a[2] + t * (b[2] - a[2]),
        a[3] + t * (b[3] - a[3]),
    ]
}

fn diff_scaled(a: &[f64; 4], b: &[f64; 4], s: f64) -> [f64; 4] {
    [
        s * (b[0] - a[0]),
        s * (b[1] - a[1]),
        s * (b[2] - a[2]),
        s * (b[3] - a[3]),
    ]
}

fn casteljau(pts: &[[f64; 4]], t: f64) -> [f64; 4] {
    let mut level = pts.to_vec();
    while level.len() > 1 {
        level = level.windows(2).map(|w| lerp(&w[0], &w[1], t)).collect();
    }
    level[0]
}

fn from_homogeneous(hom: &[[f64; 4]], rational: bool) -> Bezier3d {
    let poles = hom
        .iter()
        .map(|h| Pnt::from_coords(h[0] / h[3], h[1] / h[3], h[2] / h[3]))
        .collect();
    let weights = rational.then(|| hom.iter().map(|h| h[3]).collect());
    Bezier3d { poles, weights }
}
