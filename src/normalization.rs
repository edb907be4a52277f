use crate::{InputError, Point2};

/// Scales coordinates into the unit range and back.
///
/// All coordinates are divided by `max(width, height)` of the domain. Orientation and flip
/// tests are then evaluated on values of similar magnitude regardless of the domain size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    width: f64,
    height: f64,
    scale: f64,
}

impl Normalization {
    /// Creates the normalization for a domain of the given size.
    ///
    /// Both dimensions must be positive and finite; this is guaranteed for validated routing
    /// graphs. Other sizes are rejected by [Self::validate].
    pub fn for_domain(width: f64, height: f64) -> Self {
        Normalization {
            width,
            height,
            scale: width.max(height),
        }
    }

    /// Checks that the domain size yields a usable scale.
    pub fn validate(&self) -> Result<(), InputError> {
        let is_valid = |value: f64| value.is_finite() && value > 0.0;
        if is_valid(self.width) && is_valid(self.height) {
            Ok(())
        } else {
            Err(InputError::InvalidDomainSize {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Returns `true` if `point` is mapped into the unit square.
    pub fn covers(&self, point: Point2) -> bool {
        let normalized = self.normalize(point);
        (0.0..=1.0).contains(&normalized.x) && (0.0..=1.0).contains(&normalized.y)
    }

    /// The factor all coordinates are divided by.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Maps a point from domain units into the unit range.
    pub fn normalize(&self, point: Point2) -> Point2 {
        Point2::new(point.x / self.scale, point.y / self.scale)
    }

    /// Inverse of [Self::normalize].
    pub fn denormalize(&self, point: Point2) -> Point2 {
        point.mul(self.scale)
    }

    /// Normalizes all points in place.
    pub fn normalize_all(&self, points: &mut [Point2]) {
        for point in points {
            *point = self.normalize(*point);
        }
    }

    /// Denormalizes all points in place.
    pub fn denormalize_all(&self, points: &mut [Point2]) {
        for point in points {
            *point = self.denormalize(*point);
        }
    }
}
