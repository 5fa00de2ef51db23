//! 3D bounding box.

use crate::gp::Pnt;

/// A 3D axis-aligned bounding box with an additional gap applied
/// symmetrically on query.
#[derive(Clone, Copy, Debug)]
pub struct BndBox3d {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
    zmin: f64,
    zmax: f64,
    gap: f64,
    void: bool,
}

impl Default for BndBox3d {
    fn default() -> Self {
        Self::new()
    }
}

impl BndBox3d {
    /// Creates an empty (void) box.
    pub fn new() -> Self {
        BndBox3d {
            xmin: f64::MAX,
            xmax: f64::NEG_INFINITY,
            ymin: f64::MAX,
            ymax: f64::NEG_INFINITY,
            zmin: f64::MAX,
            zmax: f64::NEG_INFINITY,
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
    pub fn add_point(&mut self, p: &Pnt) {
        if self.void {
            self.xmin = p.x();
            self.xmax = p.x();
            self.ymin = p.y();
            self.ymax = p.y();
            self.zmin = p.z();
            self.zmax = p.z();
            self.void = false;
        } else {
            self.xmin = self.xmin.min(p.x());
            self.xmax = self.xmax.max(p.x());
            self.ymin = self.ymin.min(p.y());
            self.ymax = self.ymax.max(p.y());
            self.zmin = self.zmin.min(p.z());
            self.zmax = self.zmax.max(p.z());
        }
    }

    /// Enlarges the gap.
    pub fn enlarge(&mut self, tol: f64) {
        self.gap = self.gap.max(tol.abs());
    }

    /// Returns the bounds including gap:
    /// (xmin, ymin, zmin, xmax, ymax, zmax).
    pub fn get(&self) -> (f64, f64, f64, f64, f64, f64) {
        (
            self.xmin - self.gap,
            self.ymin - self.gap,
            self.zmin - self.gap,
            self.xmax + self.gap,
            self.ymax + self.gap,
            self.zmax + self.gap,
        )
    }

    /// Checks if a point lies outside this box.
    pub fn is_out_point(&self, p: &Pnt) -> bool {
        if self.void {
            return true;
        }
        let (xmin, ymin, zmin, xmax, ymax, zmax) = self.get();
        p.x() < xmin
            || p.x() > xmax
            || p.y() < ymin
            || p.y() > ymax
            || p.z() < zmin
            || p.z() > zmax
    }

    /// Checks if another box is disjoint from this one.
    pub fn is_out(&self, other: &BndBox3d) -> bool {
        if self.void || other.void {
            return true;
        }
        let (xmin1, ymin1, zmin1, xmax1, ymax1, zmax1) = self.get();
        let (xmin2, ymin2, zmin2, xmax2, ymax2, zmax2) = other.get();
        xmax2 < xmin1
            || xmin2 > xmax1
            || ymax2 < ymin1
            || ymin2 > ymax1
            || zmax2 < zmin1
            || zmin2 > zmax1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_points_and_overlap() {
        let mut a = BndBox3d::new();
        a.add_point(&Pnt::new());
        a.add_point(&Pnt::from_coords(1.0, 1.0, 1.0));

        let mut b = BndBox3d::new();
        b.add_point(&Pnt::from_coords(2.0, 2.0, 2.0));
        assert!(a.is_out(&b));

        b.add_point(&Pnt::from_coords(0.5, 0.5, 0.5));
        assert!(!a.is_out(&b));
        assert!(!a.is_out_point(&Pnt::from_coords(0.5, 0.5, 0.5)));
    }
}
