//! Trimmed, reversed and composite views over basis curves.
//!
//! All three types reuse the basis curve's evaluation and intersection
//! machinery. A segment never re-derives geometry; it converts the
//! incoming parameter, delegates, and converts parameter-valued results
//! back.

use crate::domain::ParameterDomain;
use crate::gp::{Pnt2d, Vec2d};
use crate::tolerance::Tolerance;
use crate::{KernelError, Result};
use serde::{Deserialize, Serialize};

use super::Curve2d;

/// A window `[lower, upper]` of a basis curve, keeping its
/// parameterization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrimmedCurve2d {
    basis: Box<Curve2d>,
    lower: f64,
    upper: f64,
}

impl TrimmedCurve2d {
    pub fn new(basis: Curve2d, lower: f64, upper: f64) -> Result<Self> {
        if lower >= upper {
            return Err(KernelError::InvalidGeometry(format!(
                "trim bounds [{lower}, {upper}] are inverted or empty"
            )));
        }
        let ptol = Tolerance::current().parameter;
        if let ParameterDomain::BoundedOpen { lower: bl, upper: bu } = basis.parameter_domain() {
            if lower < bl - ptol {
                return Err(KernelError::ParameterOutOfRange {
                    parameter: lower,
                    lower: bl,
                    upper: bu,
                });
            }
            if upper > bu + ptol {
                return Err(KernelError::ParameterOutOfRange {
                    parameter: upper,
                    lower: bl,
                    upper: bu,
                });
            }
        }
        Ok(Self {
            basis: Box::new(basis),
            lower,
            upper,
        })
    }

    #[inline]
    pub fn basis(&self) -> &Curve2d {
        &self.basis
    }

    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn parameter_domain(&self) -> ParameterDomain {
        ParameterDomain::BoundedOpen {
            lower: self.lower,
            upper: self.upper,
        }
    }

    pub fn evaluation(&self, t: f64) -> (Pnt2d, Vec2d, Vec2d) {
        self.basis.evaluation(t)
    }
}

/// A possibly-reversed view of a parent bounded open curve, as assembled
/// into a composite.
///
/// The own parameter runs over the parent's domain. When the sense is
/// reversed the conversion reflects about the domain,
/// `s = upper - (t - lower)`, which is its own inverse.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveSegment2d {
    parent: Box<Curve2d>,
    same_sense: bool,
    lower: f64,
    upper: f64,
}

impl CurveSegment2d {
    /// Wraps a parent curve. The parent must be bounded and non-periodic.
    pub fn new(parent: Curve2d, same_sense: bool) -> Result<Self> {
        let (lower, upper) = match parent.parameter_domain() {
            ParameterDomain::BoundedOpen { lower, upper } => (lower, upper),
            other => {
                return Err(KernelError::InvalidGeometry(format!(
                    "segment parent must be bounded and open, domain is {other:?}"
                )))
            }
        };
        Ok(Self {
            parent: Box::new(parent),
            same_sense,
            lower,
            upper,
        })
    }

    #[inline]
    pub fn parent(&self) -> &Curve2d {
        &self.parent
    }

    #[inline]
    pub fn same_sense(&self) -> bool {
        self.same_sense
    }

    pub fn parameter_domain(&self) -> ParameterDomain {
        ParameterDomain::BoundedOpen {
            lower: self.lower,
            upper: self.upper,
        }
    }

    /// Converts an own parameter into the parent's parameterization.
    pub fn to_basis_parameter(&self, t: f64) -> f64 {
        if self.same_sense {
            t
        } else {
            self.upper - (t - self.lower)
        }
    }

    /// Converts a parent parameter back into the segment's own
    /// parameterization. Inverse of `to_basis_parameter`.
    pub fn to_own_parameter(&self, s: f64) -> f64 {
        // the reflection is an involution
        self.to_basis_parameter(s)
    }

    pub fn evaluation(&self, t: f64) -> (Pnt2d, Vec2d, Vec2d) {
        let (p, d1, d2) = self.parent.evaluation(self.to_basis_parameter(t));
        if self.same_sense {
            (p, d1, d2)
        } else {
            // chain rule through s = c - t: odd derivatives flip sign
            (p, -d1, d2)
        }
    }
}

/// A chain of segments joined end to end, parameterized so segment `i`
/// covers `[i, i + 1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompositeCurve2d {
    segments: Vec<CurveSegment2d>,
}

impl CompositeCurve2d {
    pub fn new(segments: Vec<CurveSegment2d>) -> Result<Self> {
        if segments.is_empty() {
            return Err(KernelError::InvalidGeometry(
                "composite curve needs at least one segment".to_string(),
            ));
        }
        Ok(Self { segments })
    }

    #[inline]
    pub fn segments(&self) -> &[CurveSegment2d] {
        &self.segments
    }

    pub fn parameter_domain(&self) -> ParameterDomain {
        ParameterDomain::BoundedOpen {
            lower: 0.0,
            upper: self.segments.len() as f64,
        }
    }

    /// Splits a composite parameter into segment index and the segment's
    /// own parameter. Parameters at or past the end land on the last
    /// segment.
    pub fn locate(&self, t: f64) -> (usize, f64) {
        let n = self.segments.len();
        let i = (t.floor() as isize).clamp(0, n as isize - 1) as usize;
        let seg = &self.segments[i];
        let (lower, upper) = (seg.lower, seg.upper);
        let local = lower + (t - i as f64) * (upper - lower);
        (i, local)
    }

    /// Re-expresses a segment-own parameter in composite parameterization.
    pub fn to_composite_parameter(&self, index: usize, s: f64) -> f64 {
        let seg = &self.segments[index];
        index as f64 + (s - seg.lower) / (seg.upper - seg.lower)
    }

    pub fn evaluation(&self, t: f64) -> (Pnt2d, Vec2d, Vec2d) {
        let (i, local) = self.locate(t);
        let seg = &self.segments[i];
        let scale = seg.upper - seg.lower;
        let (p, d1, d2) = seg.evaluation(local);
        // unit composite span maps onto the full segment domain
        (p, d1.scaled(scale), d2.scaled(scale * scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve2d::Bezier2d;

    const TEST_TOL: f64 = 1.0e-10;

    fn arch() -> Curve2d {
        Curve2d::Bezier(
            Bezier2d::new(vec![
                Pnt2d::from_coords(0.0, 0.0),
                Pnt2d::from_coords(1.0, 2.0),
                Pnt2d::from_coords(2.0, 0.0),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_segment_rejects_unbounded_parent() {
        use crate::gp::{Dir2d, Lin2d, Pnt2d};
        let line = Curve2d::Line(Lin2d::new(Pnt2d::new(), Dir2d::x_dir()));
        assert!(CurveSegment2d::new(line, true).is_err());
    }

    #[test]
    fn test_parameter_round_trip() {
        let seg = CurveSegment2d::new(arch(), false).unwrap();
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let back = seg.to_own_parameter(seg.to_basis_parameter(t));
            assert!((back - t).abs() < TEST_TOL);
        }
    }

    #[test]
    fn test_reversed_segment_negates_tangent() {
        let parent = arch();
        let seg = CurveSegment2d::new(parent.clone(), false).unwrap();
        let (p, d1, d2) = seg.evaluation(0.25);
        let (bp, bd1, bd2) = parent.evaluation(0.75);
        assert!(p.distance(&bp) < TEST_TOL);
        assert!((d1.x() + bd1.x()).abs() < TEST_TOL);
        assert!((d1.y() + bd1.y()).abs() < TEST_TOL);
        assert!((d2.x() - bd2.x()).abs() < TEST_TOL);
        assert!((d2.y() - bd2.y()).abs() < TEST_TOL);
    }

    #[test]
    fn test_composite_walks_segments_in_order() {
        let a = CurveSegment2d::new(arch(), true).unwrap();
        let b = CurveSegment2d::new(
            Curve2d::Bezier(
                Bezier2d::new(vec![
                    Pnt2d::from_coords(2.0, 0.0),
                    Pnt2d::from_coords(3.0, -2.0),
                    Pnt2d::from_coords(4.0, 0.0),
                ])
                .unwrap(),
            ),
            true,
        )
        .unwrap();
        let comp = CompositeCurve2d::new(vec![a, b]).unwrap();
        assert_eq!(
            comp.parameter_domain(),
            ParameterDomain::BoundedOpen {
                lower: 0.0,
                upper: 2.0
            }
        );
        let (p, _, _) = comp.evaluation(0.5);
        assert!(p.distance(&Pnt2d::from_coords(1.0, 1.0)) < TEST_TOL);
        let (p, _, _) = comp.evaluation(1.5);
        assert!(p.distance(&Pnt2d::from_coords(3.0, -1.0)) < TEST_TOL);
    }

    #[test]
    fn test_composite_parameter_conversion() {
        let a = CurveSegment2d::new(arch(), true).unwrap();
        let comp = CompositeCurve2d::new(vec![a]).unwrap();
        let (i, local) = comp.locate(0.25);
        assert_eq!(i, 0);
        assert!((local - 0.25).abs() < TEST_TOL);
        assert!((comp.to_composite_parameter(i, local) - 0.25).abs() < TEST_TOL);
    }

    #[test]
    fn test_trim_rejects_out_of_domain_window() {
        assert!(TrimmedCurve2d::new(arch(), 0.2, 1.4).is_err());
        assert!(TrimmedCurve2d::new(arch(), 0.6, 0.6).is_err());
        assert!(TrimmedCurve2d::new(arch(), 0.2, 0.8).is_ok());
    }
}
