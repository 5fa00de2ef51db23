//! Ambient tolerance context.
//!
//! Every geometric predicate in the crate (point identity, parameter
//! validity, bounding-box overlap, collinearity) reads the top of a
//! thread-local stack of [`Tolerance`] values. Scoped overrides are done
//! with [`ToleranceGuard`], whose `Drop` restores the previous top, so
//! pushes and pops are strictly nested by construction.

use crate::precision;
use std::cell::RefCell;

/// Distance, angle and parameter thresholds below which two geometric
/// quantities are considered equal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    pub distance: f64,
    pub angle: f64,
    pub parameter: f64,
}

impl Tolerance {
    #[inline]
    pub const fn new(distance: f64, angle: f64, parameter: f64) -> Self {
        Self { distance, angle, parameter }
    }

    /// Squared distance tolerance.
    #[inline]
    pub fn distance2(&self) -> f64 {
        self.distance * self.distance
    }

    /// Returns the active tolerance (top of the thread-local stack).
    pub fn current() -> Tolerance {
        STACK.with(|s| s.borrow().last().copied().unwrap_or_default())
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance {
            distance: precision::CONFUSION,
            angle: precision::ANGULAR,
            parameter: precision::INTERSECTION,
        }
    }
}

thread_local! {
    static STACK: RefCell<Vec<Tolerance>> = RefCell::new(vec![Tolerance::default()]);
}

/// RAII scope handle for a tolerance override.
///
/// The override is visible to every predicate on the current thread until
/// the guard is dropped.
#[must_use = "dropping the guard immediately pops the override"]
pub struct ToleranceGuard {
    _private: (),
}

impl ToleranceGuard {
    /// Pushes a full tolerance triple.
    pub fn push(tolerance: Tolerance) -> Self {
        STACK.with(|s| s.borrow_mut().push(tolerance));
        ToleranceGuard { _private: () }
    }

    /// Pushes the current triple with the distance tolerance replaced.
    pub fn push_distance(distance: f64) -> Self {
        let mut t = Tolerance::current();
        t.distance = distance;
        Self::push(t)
    }

    /// Pushes the current triple with the parameter tolerance replaced.
    pub fn push_parameter(parameter: f64) -> Self {
        let mut t = Tolerance::current();
        t.parameter = parameter;
        Self::push(t)
    }
}

impl Drop for ToleranceGuard {
    fn drop(&mut self) {
        STACK.with(|s| {
            let mut stack = s.borrow_mut();
            // The bottom entry is the process default and never pops.
            if stack.len() > 1 {
                stack.pop();
            }
        });
    }
}
