//! 2D bounding box.

use crate::gp::Pnt2d;

/// A 2D axis-aligned bounding box with an additional gap (inflation)
/// applied symmetrically on query.
#[derive(Clone, Copy, Debug)]
pub struct BndBox2d {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
    gap: f64,
    void: bool,
}

impl Default for BndBox2d {
    fn default() -> Self {
        Self::new()
    }
}

impl BndBox2d {
    /// Creates an empty (void) box.
    pub fn new() -> Self {
        BndBox2d {
            xmin: f64::MAX,
            xmax: f64::NEG_INFINITY,
            ymin: f64::MAX,
            ymax: f64::NEG_INFINITY,
            gap: 0.0,
            void: true,
        }
    }

    /// Returns true if this box contains nothing.
    #[inline]
    pub fn is_void(&self) -> bool {
        self.void
    }

    /// Grows the box to contain a point.
    pub fn add_point(&mut self, p: &Pnt2d) {
        if self.void {
            self.xmin = p.x();
            self.xmax = p.x();
            self.ymin = p.y();
            self.ymax = p.y();
            self.void = false;
        } else {
            self.xmin = self.xmin.min(p.x());
            self.xmax = self.xmax.max(p.x());
            self.ymin = self.ymin.min(p.y());
            self.ymax = self.ymax.max(p.y());
        }
    }

    /// Grows the box to contain another box (gap included).
    pub fn add(&mut self, other: &BndBox2d) {
        if other.void {
            return;
        }
        if self.void {
            *self = *other;
            return;
        }
        self.xmin = self.xmin.min(other.xmin - other.gap);
        self.xmax = self.xmax.max(other.xmax + other.gap);
        self.ymin = self.ymin.min(other.ymin - other.gap);
        self.ymax = self.ymax.max(other.ymax + other.gap);
    }

    /// Enlarges the gap.
    pub fn enlarge(&mut self, tol: f64) {
        self.gap = self.gap.max(tol.abs());
    }

    /// Returns the bounds including gap: (xmin, ymin, xmax, ymax).
    pub fn get(&self) -> (f64, f64, f64, f64) {
        (
            self.xmin - self.gap,
            self.ymin - self.gap,
            self.xmax + self.gap,
            self.ymax + self.gap,
        )
    }

    /// Checks if a point lies outside this box.
    pub fn is_out_point(&self, p: &Pnt2d) -> bool {
        if self.void {
            return true;
        }
        let (xmin, ymin, xmax, ymax) = self.get();
        p.x() < xmin || p.x() > xmax || p.y() < ymin || p.y() > ymax
    }

    /// Checks if another box is disjoint from this one.
    pub fn is_out(&self, other: &BndBox2d) -> bool {
        if self.void || other.void {
            return true;
        }
        let (xmin1, ymin1, xmax1, ymax1) = self.get();
        let (xmin2, ymin2, xmax2, ymax2) = other.get();
        xmax2 < xmin1 || xmin2 > xmax1 || ymax2 < ymin1 || ymin2 > ymax1
    }
}
