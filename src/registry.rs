use crate::{InputError, Point2, Rectangle, RoutingGraph};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An edge that should bound the triangulation, given as two point indices.
///
/// Constraint edges are recorded for every rectangle side but are not enforced during
/// triangulation: the resulting mesh is an unconstrained Delaunay triangulation of all points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintEdge {
    /// Index of the first endpoint
    pub from: usize,
    /// Index of the second endpoint
    pub to: usize,
}

impl ConstraintEdge {
    /// Creates a new constraint edge.
    pub const fn new(from: usize, to: usize) -> Self {
        ConstraintEdge { from, to }
    }
}

/// Flattens a routing graph into an ordered point list and a list of constraint edges.
///
/// Rectangles (the boundary first, then every obstacle) contribute four fresh points each,
/// even if a corner coincides with a corner of another rectangle. Net endpoints are appended
/// last as plain points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointRegistry {
    points: Vec<Point2>,
    constraint_edges: Vec<ConstraintEdge>,
}

impl PointRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry for a whole routing graph.
    ///
    /// The graph is validated first; nothing is registered for an invalid graph.
    pub fn from_graph(graph: &RoutingGraph) -> Result<Self, InputError> {
        graph.validate()?;

        let mut result = PointRegistry {
            points: Vec::with_capacity(4 * (graph.obstacles().len() + 1) + 2 * graph.nets().len()),
            constraint_edges: Vec::with_capacity(4 * (graph.obstacles().len() + 1)),
        };

        result.add_rectangle(graph.boundary());
        for obstacle in graph.obstacles() {
            result.add_rectangle(*obstacle);
        }
        for net in graph.nets() {
            result.add_point(net.from);
            result.add_point(net.to);
        }
        Ok(result)
    }

    /// Appends the four corners and the four sides of a rectangle.
    ///
    /// Returns the index of the first corner. The corners are stored in the order
    /// `(x1,y1)`, `(x2,y1)`, `(x1,y2)`, `(x2,y2)`.
    pub fn add_rectangle(&mut self, rectangle: Rectangle) -> usize {
        let first = self.points.len();
        self.points.extend(rectangle.corners());

        //  c2 ---- c3
        //   |      |
        //  c0 ---- c1
        for (from, to) in [(0, 1), (1, 3), (3, 2), (2, 0)] {
            self.constraint_edges
                .push(ConstraintEdge::new(first + from, first + to));
        }
        first
    }

    /// Appends a single point without any constraint edge and returns its index.
    pub fn add_point(&mut self, point: Point2) -> usize {
        self.points.push(point);
        self.points.len() - 1
    }

    /// All registered points, in registration order.
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// All registered constraint edges.
    pub fn constraint_edges(&self) -> &[ConstraintEdge] {
        &self.constraint_edges
    }

    /// Number of registered points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no point was registered.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<Point2>, Vec<ConstraintEdge>) {
        (self.points, self.constraint_edges)
    }
}
