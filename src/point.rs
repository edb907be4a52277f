#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A two dimensional point.
///
/// This is the basic type used for defining positions of boundary corners, obstacle corners
/// and net endpoints.
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point2 {
    /// The point's x coordinate
    pub x: f64,
    /// The point's y coordinate
    pub y: f64,
}

impl Point2 {
    /// Creates a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point2 { x, y }
    }

    pub(crate) fn mul(&self, factor: f64) -> Self {
        Point2 {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    pub(crate) fn sub(&self, other: Self) -> Self {
        Point2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    pub(crate) fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// The z component of the cross product of `self` and `other`, both embedded in the xy plane.
    pub(crate) fn cross(&self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub(crate) fn all_component_wise(&self, other: Self, f: impl Fn(f64, f64) -> bool) -> bool {
        f(self.x, other.x) && f(self.y, other.y)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
