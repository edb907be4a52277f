use thiserror::Error;

use crate::mesh_core::FixedTriangleHandle;
use crate::Point2;

/// The error type used for rejecting an input model before any triangulation work starts.
///
/// Input is never clamped or repaired: every violated precondition is reported.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum InputError {
    /// The domain width or height is not a positive, finite number.
    #[error("Domain size must be positive and finite, got {width} x {height}")]
    InvalidDomainSize {
        /// Requested domain width.
        width: f64,
        /// Requested domain height.
        height: f64,
    },
    /// An obstacle's second corner does not strictly exceed its first corner in both axes.
    #[error("Obstacle {index} has corners out of order: {min:?} must be strictly below {max:?}")]
    ObstacleCornersOutOfOrder {
        /// Position of the obstacle in the input list.
        index: usize,
        /// First corner.
        min: Point2,
        /// Second corner.
        max: Point2,
    },
    /// An obstacle corner lies outside of the domain.
    #[error("Obstacle {index} corner {corner:?} lies outside of the domain")]
    ObstacleOutOfBounds {
        /// Position of the obstacle in the input list.
        index: usize,
        /// The offending corner.
        corner: Point2,
    },
    /// A net endpoint lies outside of the domain.
    #[error("Net {index} endpoint {endpoint:?} lies outside of the domain")]
    NetOutOfBounds {
        /// Position of the net in the input list.
        index: usize,
        /// The offending endpoint.
        endpoint: Point2,
    },
    /// A coordinate was NaN or infinite.
    #[error("Non-finite coordinate {position:?}")]
    NonFiniteCoordinate {
        /// The offending position.
        position: Point2,
    },
    /// A point is mapped outside of the unit square by the normalization.
    #[error("Point {position:?} lies outside of the normalized domain")]
    PointOutsideOfDomain {
        /// The offending position, in domain units.
        position: Point2,
    },
    /// A route was assigned to a net that does not exist.
    #[error("Unknown net {net_id}, the graph contains {num_nets} nets")]
    UnknownNet {
        /// The requested net id.
        net_id: usize,
        /// Number of nets in the graph.
        num_nets: usize,
    },
}

/// The error type returned by the triangulation pipeline.
///
/// Only [TriangulationError::InvalidInput] can be caused by the caller. The other variants
/// indicate a broken mesh invariant; see [TriangulationError::is_internal_fault].
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum TriangulationError {
    /// The input model was rejected.
    #[error(transparent)]
    InvalidInput(#[from] InputError),

    /// The point location walk left the mesh or did not terminate.
    #[error("Point location failed for point {point} at {position:?} after {steps} steps")]
    PointLocationFailed {
        /// Index of the point being inserted (post bin-sort order).
        point: usize,
        /// The point's normalized position.
        position: Point2,
        /// Number of walk steps taken before giving up.
        steps: usize,
    },

    /// A triangle refers to a neighbor which does not refer back to it.
    #[error("Asymmetric adjacency: {triangle:?} lists {neighbor:?} as neighbor, but not vice versa")]
    AdjacencyViolation {
        /// The triangle holding the dangling neighbor slot.
        triangle: FixedTriangleHandle,
        /// The neighbor that does not point back.
        neighbor: FixedTriangleHandle,
    },
}

impl TriangulationError {
    /// Returns `true` if this error was caused by a triangulator bug rather than by bad input.
    pub fn is_internal_fault(&self) -> bool {
        !matches!(self, TriangulationError::InvalidInput(_))
    }
}
