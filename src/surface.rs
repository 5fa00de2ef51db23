//! Bezier surface patches.

use crate::bnd::BndBox3d;
use crate::gp::{Pnt, Vec3};
use crate::precision;
use crate::{KernelError, Result};
use serde::{Deserialize, Serialize};

/// A tensor-product Bezier patch on `[0, 1] x [0, 1]`.
///
/// The control net is stored row-major: pole `(i, j)` is the `i`-th
/// point along `u` and the `j`-th along `v`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BezierSurface3d {
    nu: usize,
    nv: usize,
    poles: Vec<Pnt>,
    weights: Option<Vec<f64>>,
}

impl BezierSurface3d {
    /// Creates a non-rational patch from a `nu x nv` net, `nu * nv`
    /// poles row-major. Both directions need at least two poles.
    pub fn new(nu: usize, nv: usize, poles: Vec<Pnt>) -> Result<Self> {
        if nu < 2 || nv < 2 {
            return Err(KernelError::InvalidGeometry(format!(
                "bezier patch needs at least a 2x2 net, got {nu}x{nv}"
            )));
        }
        if poles.len() != nu * nv {
            return Err(KernelError::InvalidGeometry(format!(
                "{} poles for a {nu}x{nv} net",
                poles.len()
            )));
        }
        Ok(Self {
            nu,
            nv,
            poles,
            weights: None,
        })
    }

    /// Rational patch; weights row-major, strictly positive.
    pub fn with_weights(nu: usize, nv: usize, poles: Vec<Pnt>, weights: Vec<f64>) -> Result<Self> {
        let mut patch = Self::new(nu, nv, poles)?;
        if weights.len() != nu * nv {
            return Err(KernelError::InvalidGeometry(format!(
                "{} weights for a {nu}x{nv} net",
                weights.len()
            )));
        }
        if weights.iter().any(|w| *w <= precision::RESOLUTION) {
            return Err(KernelError::InvalidGeometry(
                "bezier patch weights must be strictly positive".to_string(),
            ));
        }
        patch.weights = Some(weights);
        Ok(patch)
    }

    #[inline]
    pub fn nu_poles(&self) -> usize {
        self.nu
    }

    #[inline]
    pub fn nv_poles(&self) -> usize {
        self.nv
    }

    #[inline]
    pub fn is_rational(&self) -> bool {
        self.weights.is_some()
    }

    #[inline]
    pub fn pole(&self, i: usize, j: usize) -> Pnt {
        self.poles[i * self.nv + j]
    }

    pub fn weight(&self, i: usize, j: usize) -> f64 {
        match &self.weights {
            Some(w) => w[i * self.nv + j],
            None => 1.0,
        }
    }

    #[inline]
    pub fn poles(&self) -> &[Pnt] {
        &self.poles
    }

    pub fn enclosing_box(&self) -> BndBox3d {
        let mut b = BndBox3d::new();
        for p in &self.poles {
            b.add_point(p);
        }
        b
    }

    fn homogeneous(&self) -> Vec<Vec<[f64; 4]>> {
        (0..self.nu)
            .map(|i| {
                (0..self.nv)
                    .map(|j| {
                        let p = self.pole(i, j);
                        let w = self.weight(i, j);
                        [w * p.x(), w * p.y(), w * p.z(), w]
                    })
                    .collect()
            })
            .collect()
    }

    pub fn point(&self, u: f64, v: f64) -> Pnt {
        let a = eval_net(&self.homogeneous(), u, v);
        Pnt::from_coords(a[0] / a[3], a[1] / a[3], a[2] / a[3])
    }

    /// Position with the two first partial derivatives.
    pub fn tangents(&self, u: f64, v: f64) -> (Pnt, Vec3, Vec3) {
        let net = self.homogeneous();
        let a = eval_net(&net, u, v);
        let w = a[3];
        let p = Pnt::from_coords(a[0] / w, a[1] / w, a[2] / w);

        let mu = (self.nu - 1) as f64;
        let du_net: Vec<Vec<[f64; 4]>> = net
            .windows(2)
            .map(|rows| {
                rows[0]
                    .iter()
                    .zip(&rows[1])
                    .map(|(a, b)| diff_scaled(a, b, mu))
                    .collect()
            })
            .collect();
        let au = eval_net(&du_net, u, v);

        let mv = (self.nv - 1) as f64;
        let dv_net: Vec<Vec<[f64; 4]>> = net
            .iter()
            .map(|row| {
                row.windows(2)
                    .map(|pair| diff_scaled(&pair[0], &pair[1], mv))
                    .collect()
            })
            .collect();
        let av = eval_net(&dv_net, u, v);

        let du = Vec3::from_coords(
            (au[0] - au[3] * p.x()) / w,
            (au[1] - au[3] * p.y()) / w,
            (au[2] - au[3] * p.z()) / w,
        );
        let dv = Vec3::from_coords(
            (av[0] - av[3] * p.x()) / w,
            (av[1] - av[3] * p.y()) / w,
            (av[2] - av[3] * p.z()) / w,
        );
        (p, du, dv)
    }

    /// Splits along `u` into the `[0, ratio]` and `[ratio, 1]` halves.
    pub fn u_divide(&self, ratio: f64) -> Result<(BezierSurface3d, BezierSurface3d)> {
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(KernelError::InvalidGeometry(format!(
                "split ratio {ratio} must lie strictly inside (0, 1)"
            )));
        }
        let net = self.homogeneous();
        let (left, right) = split_rows(&net, ratio);
        Ok((
            self.from_net(&left),
            self.from_net(&right),
        ))
    }

    /// Splits along `v` into the `[0, ratio]` and `[ratio, 1]` halves.
    pub fn v_divide(&self, ratio: f64) -> Result<(BezierSurface3d, BezierSurface3d)> {
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(KernelError::InvalidGeometry(format!(
                "split ratio {ratio} must lie strictly inside (0, 1)"
            )));
        }
        let net = transpose(&self.homogeneous());
        let (left, right) = split_rows(&net, ratio);
        Ok((
            self.from_net(&transpose(&left)),
            self.from_net(&transpose(&right)),
        ))
    }

    fn from_net(&self, net: &[Vec<[f64; 4]>]) -> BezierSurface3d {
        let nu = net.len();
        let nv = net[0].len();
        let mut poles = Vec::with_capacity(nu * nv);
        let mut weights = Vec::with_capacity(nu * nv);
        for row in net {
            for h in row {
                poles.push(Pnt::from_coords(h[0] / h[3], h[1] / h[3], h[2] / h[3]));
                weights.push(h[3]);
            }
        }
        BezierSurface3d {
            nu,
            nv,
            poles,
            weights: self.is_rational().then_some(weights),
        }
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

fn eval_net(net: &[Vec<[f64; 4]>], u: f64, v: f64) -> [f64; 4] {
    let column: Vec<[f64; 4]> = net.iter().map(|row| casteljau(row, v)).collect();
    casteljau(&column, u)
}

/// De Casteljau split of the row sequence, rows lerped elementwise.
fn split_rows(net: &[Vec<[f64; 4]>], ratio: f64) -> (Vec<Vec<[f64; 4]>>, Vec<Vec<[f64; 4]>>) {
    let mut level = net.to_vec();
    let mut left = vec![level[0].clone()];
    let mut right = vec![level[level.len() - 1].clone()];
    while level.len() > 1 {
        level = level
            .windows(2)
            .map(|rows| {
                rows[0]
                    .iter()
                    .zip(&rows[1])
                    .map(|(a, b)| lerp(a, b, ratio))
                    .collect()
            })
            .collect();
        left.push(level[0].clone());
        right.push(level[level.len() - 1].clone());
    }
    right.reverse();
    (left, right)
}

fn transpose(net: &[Vec<[f64; 4]>]) -> Vec<Vec<[f64; 4]>> {
    let nu = net.len();
    let nv = net[0].len();
    (0..nv)
        .map(|j| (0..nu).map(|i| net[i][j]).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_TOL: f64 = 1.0e-10;

    fn saddle() -> BezierSurface3d {
        // bilinear saddle z = (2u - 1)(2v - 1)
        BezierSurface3d::new(
            2,
            2,
            vec![
                Pnt::from_coords(0.0, 0.0, 1.0),
                Pnt::from_coords(0.0, 1.0, -1.0),
                Pnt::from_coords(1.0, 0.0, -1.0),
                Pnt::from_coords(1.0, 1.0, 1.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_corners_interpolated() {
        let s = saddle();
        assert!(s.point(0.0, 0.0).distance(&Pnt::from_coords(0.0, 0.0, 1.0)) < TEST_TOL);
        assert!(s.point(1.0, 1.0).distance(&Pnt::from_coords(1.0, 1.0, 1.0)) < TEST_TOL);
    }

    #[test]
    fn test_center_of_saddle() {
        let s = saddle();
        let p = s.point(0.5, 0.5);
        assert!(p.distance(&Pnt::from_coords(0.5, 0.5, 0.0)) < TEST_TOL);
    }

    #[test]
    fn test_tangents_of_bilinear_patch() {
        let s = saddle();
        let (p, du, dv) = s.tangents(0.5, 0.5);
        assert!(p.z().abs() < TEST_TOL);
        // at the center both partials are horizontal
        assert!((du.x() - 1.0).abs() < TEST_TOL && du.z().abs() < TEST_TOL);
        assert!((dv.y() - 1.0).abs() < TEST_TOL && dv.z().abs() < TEST_TOL);
    }

    #[test]
    fn test_u_divide_matches_parent() {
        let s = saddle();
        let (lo, hi) = s.u_divide(0.5).unwrap();
        assert!(lo.point(1.0, 0.25).distance(&s.point(0.5, 0.25)) < TEST_TOL);
        assert!(hi.point(0.0, 0.75).distance(&s.point(0.5, 0.75)) < TEST_TOL);
        assert!(hi.point(0.5, 0.5).distance(&s.point(0.75, 0.5)) < TEST_TOL);
    }

    #[test]
    fn test_v_divide_matches_parent() {
        let s = saddle();
        let (lo, hi) = s.v_divide(0.5).unwrap();
        assert!(lo.point(0.25, 1.0).distance(&s.point(0.25, 0.5)) < TEST_TOL);
        assert!(hi.point(0.25, 0.0).distance(&s.point(0.25, 0.5)) < TEST_TOL);
    }
}
