//! Interference results and their deduplicating collection.

use crate::gp::{Pnt, Pnt2d};
use crate::tolerance::Tolerance;
use serde::{Deserialize, Serialize};

/// A transversal intersection of two 2D curves.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntersectionPoint2d {
    pub point: Pnt2d,
    pub param_a: f64,
    pub param_b: f64,
}

impl IntersectionPoint2d {
    pub const fn new(point: Pnt2d, param_a: f64, param_b: f64) -> Self {
        Self {
            point,
            param_a,
            param_b,
        }
    }

    pub const fn swapped(&self) -> Self {
        Self {
            point: self.point,
            param_a: self.param_b,
            param_b: self.param_a,
        }
    }
}

/// A transversal intersection of two 3D curves.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntersectionPoint3d {
    pub point: Pnt,
    pub param_a: f64,
    pub param_b: f64,
}

impl IntersectionPoint3d {
    pub const fn new(point: Pnt, param_a: f64, param_b: f64) -> Self {
        Self {
            point,
            param_a,
            param_b,
        }
    }

    pub const fn swapped(&self) -> Self {
        Self {
            point: self.point,
            param_a: self.param_b,
            param_b: self.param_a,
        }
    }
}

/// A point where a 3D curve pierces a surface patch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveSurfacePoint {
    pub point: Pnt,
    pub curve_parameter: f64,
    pub u: f64,
    pub v: f64,
}

/// A shared stretch of two overlapping bounded curves, as parameter
/// ranges on each operand.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlapCurve2d {
    pub range_a: (f64, f64),
    pub range_b: (f64, f64),
}

impl OverlapCurve2d {
    pub const fn swapped(&self) -> Self {
        Self {
            range_a: self.range_b,
            range_b: self.range_a,
        }
    }

    fn contains_param_pair(&self, pa: f64, pb: f64, ptol: f64) -> bool {
        in_range(pa, self.range_a, ptol) && in_range(pb, self.range_b, ptol)
    }

    fn contains_overlap(&self, other: &OverlapCurve2d, ptol: f64) -> bool {
        in_range(other.range_a.0, self.range_a, ptol)
            && in_range(other.range_a.1, self.range_a, ptol)
            && in_range(other.range_b.0, self.range_b, ptol)
            && in_range(other.range_b.1, self.range_b, ptol)
    }
}

fn in_range(t: f64, range: (f64, f64), ptol: f64) -> bool {
    let (lo, hi) = if range.0 <= range.1 {
        (range.0, range.1)
    } else {
        (range.1, range.0)
    };
    t >= lo - ptol && t <= hi + ptol
}

/// One interference between two bounded 2D curves.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Interference2d {
    Point(IntersectionPoint2d),
    Overlap(OverlapCurve2d),
}

/// Collects interferences, rejecting duplicates on insertion.
///
/// A point candidate is a duplicate when its position matches an
/// accepted one within the distance tolerance *and* both of its
/// parameters match within the parameter tolerance; tangential near
/// misses that resolve to distinct parameter pairs are kept.
#[derive(Clone, Debug, Default)]
pub struct InterferenceList2d {
    items: Vec<Interference2d>,
}

impl InterferenceList2d {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_point(&mut self, candidate: IntersectionPoint2d) {
        let tol = Tolerance::current();
        let duplicate = self.items.iter().any(|item| match item {
            Interference2d::Point(p) => {
                p.point.distance(&candidate.point) <= tol.distance
                    && (p.param_a - candidate.param_a).abs() <= tol.parameter
                    && (p.param_b - candidate.param_b).abs() <= tol.parameter
            }
            Interference2d::Overlap(_) => false,
        });
        if !duplicate {
            self.items.push(Interference2d::Point(candidate));
        }
    }

    pub fn push_overlap(&mut self, candidate: OverlapCurve2d) {
        let ptol = Tolerance::current().parameter;
        let duplicate = self.items.iter().any(|item| match item {
            Interference2d::Overlap(o) => o.contains_overlap(&candidate, ptol),
            Interference2d::Point(_) => false,
        });
        if !duplicate {
            self.items.push(Interference2d::Overlap(candidate));
        }
    }

    /// Removes overlaps contained in larger overlaps and points lying
    /// inside an overlap's range.
    pub fn cleanup(&mut self) {
        let ptol = Tolerance::current().parameter;
        let overlaps: Vec<OverlapCurve2d> = self
            .items
            .iter()
            .filter_map(|i| match i {
                Interference2d::Overlap(o) => Some(*o),
                _ => None,
            })
            .collect();
        let mut overlap_seen = 0usize;
        self.items.retain(|item| match item {
            Interference2d::Point(p) => !overlaps
                .iter()
                .any(|o| o.contains_param_pair(p.param_a, p.param_b, ptol)),
            Interference2d::Overlap(o) => {
                let me = overlap_seen;
                overlap_seen += 1;
                !overlaps
                    .iter()
                    .enumerate()
                    .any(|(j, other)| j != me && other.contains_overlap(o, ptol))
            }
        });
    }

    /// Re-expresses every entry with the operands exchanged.
    pub fn swap_operands(&mut self) {
        for item in &mut self.items {
            *item = match item {
                Interference2d::Point(p) => Interference2d::Point(p.swapped()),
                Interference2d::Overlap(o) => Interference2d::Overlap(o.swapped()),
            };
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[Interference2d] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Interference2d> {
        self.items
    }

    /// The point entries only.
    pub fn into_points(self) -> Vec<IntersectionPoint2d> {
        self.items
            .into_iter()
            .filter_map(|i| match i {
                Interference2d::Point(p) => Some(p),
                _ => None,
            })
            .collect()
    }
}

/// Insertion dedup for 3D point results, same policy as the 2D list.
pub fn push_unique_3d(points: &mut Vec<IntersectionPoint3d>, candidate: IntersectionPoint3d) {
    let tol = Tolerance::current();
    let duplicate = points.iter().any(|p| {
        p.point.distance(&candidate.point) <= tol.distance
            && (p.param_a - candidate.param_a).abs() <= tol.parameter
            && (p.param_b - candidate.param_b).abs() <= tol.parameter
    });
    if !duplicate {
        points.push(candidate);
    }
}

/// Insertion dedup for curve-on-surface results.
pub fn push_unique_on_surface(points: &mut Vec<CurveSurfacePoint>, candidate: CurveSurfacePoint) {
    let tol = Tolerance::current();
    let duplicate = points.iter().any(|p| {
        p.point.distance(&candidate.point) <= tol.distance
            && (p.curve_parameter - candidate.curve_parameter).abs() <= tol.parameter
    });
    if !duplicate {
        points.push(candidate);
    }
}
