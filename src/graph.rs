#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{InputError, Point2};

/// An axis aligned rectangle given by two opposite corners.
///
/// For obstacles, `max` must strictly exceed `min` in both axes.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rectangle {
    /// The lower left corner
    pub min: Point2,
    /// The upper right corner
    pub max: Point2,
}

impl Rectangle {
    /// Creates a new rectangle from two corners.
    pub const fn new(min: Point2, max: Point2) -> Self {
        Rectangle { min, max }
    }

    /// Returns `true` if `point` lies strictly inside this rectangle.
    pub fn contains_strictly(&self, point: Point2) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
    }

    /// Returns `true` if the interiors of both rectangles overlap.
    pub fn overlaps(&self, other: &Rectangle) -> bool {
        other.min.x < self.max.x
            && other.min.y < self.max.y
            && other.max.x > self.min.x
            && other.max.y > self.min.y
    }

    /// The four corners in registry order: `(x1,y1)`, `(x2,y1)`, `(x1,y2)`, `(x2,y2)`.
    pub fn corners(&self) -> [Point2; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            Point2::new(self.min.x, self.max.y),
            self.max,
        ]
    }
}

/// A pair of points that should be connected by a route.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Net {
    /// The first endpoint
    pub from: Point2,
    /// The second endpoint
    pub to: Point2,
}

impl Net {
    /// Creates a new net.
    pub const fn new(from: Point2, to: Point2) -> Self {
        Net { from, to }
    }
}

/// An undirected edge given by the positions of its two endpoints.
pub type EdgePositions = [Point2; 2];

/// The routing domain: a rectangular boundary, obstacles and nets.
///
/// The graph is the input of the triangulation pipeline and also receives its output: the
/// extracted mesh edges are stored via [RoutingGraph::set_cdt_edges]. Routes for individual
/// nets can be stored but are not computed by this crate.
///
/// All geometry is validated on construction, see [RoutingGraph::new].
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoutingGraph {
    width: f64,
    height: f64,
    obstacles: Vec<Rectangle>,
    nets: Vec<Net>,
    cdt_edges: Vec<EdgePositions>,
    routes: Vec<Vec<Point2>>,
}

impl RoutingGraph {
    /// Creates a new routing graph.
    ///
    /// Returns an error if
    ///  - `width` or `height` is not positive and finite
    ///  - any obstacle has its corners out of order or lies outside of `[0,width]×[0,height]`
    ///  - any net endpoint lies outside of the domain
    pub fn new(
        width: f64,
        height: f64,
        obstacles: Vec<Rectangle>,
        nets: Vec<Net>,
    ) -> Result<Self, InputError> {
        validate(width, height, &obstacles, &nets)?;
        let routes = vec![Vec::new(); nets.len()];
        Ok(RoutingGraph {
            width,
            height,
            obstacles,
            nets,
            cdt_edges: Vec::new(),
            routes,
        })
    }

    /// Checks all preconditions again.
    ///
    /// Graphs created with [RoutingGraph::new] always pass. Deserialized graphs skip
    /// construction and should be validated before use.
    pub fn validate(&self) -> Result<(), InputError> {
        validate(self.width, self.height, &self.obstacles, &self.nets)
    }

    /// The domain width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// The domain height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The boundary of the domain as rectangle.
    pub fn boundary(&self) -> Rectangle {
        Rectangle::new(Point2::new(0.0, 0.0), Point2::new(self.width, self.height))
    }

    /// All obstacles, in input order.
    pub fn obstacles(&self) -> &[Rectangle] {
        &self.obstacles
    }

    /// All nets, in input order. A net's position in this slice is its id.
    pub fn nets(&self) -> &[Net] {
        &self.nets
    }

    /// The edges of the last triangulation, see [crate::construct_cdt].
    pub fn cdt_edges(&self) -> &[EdgePositions] {
        &self.cdt_edges
    }

    /// Replaces the stored triangulation edges.
    pub fn set_cdt_edges(&mut self, cdt_edges: Vec<EdgePositions>) {
        self.cdt_edges = cdt_edges;
    }

    /// The stored route of each net. Routes are empty until set.
    pub fn routes(&self) -> &[Vec<Point2>] {
        &self.routes
    }

    /// Stores the route of a single net.
    pub fn set_route(&mut self, net_id: usize, route: Vec<Point2>) -> Result<(), InputError> {
        let num_nets = self.nets.len();
        let slot = self
            .routes
            .get_mut(net_id)
            .ok_or(InputError::UnknownNet { net_id, num_nets })?;
        *slot = route;
        Ok(())
    }
}

fn validate(
    width: f64,
    height: f64,
    obstacles: &[Rectangle],
    nets: &[Net],
) -> Result<(), InputError> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(InputError::InvalidDomainSize { width, height });
    }

    let in_domain = |point: Point2| -> Result<bool, InputError> {
        if !point.is_finite() {
            return Err(InputError::NonFiniteCoordinate { position: point });
        }
        Ok(point.x >= 0.0 && point.x <= width && point.y >= 0.0 && point.y <= height)
    };

    for (index, obstacle) in obstacles.iter().enumerate() {
        for corner in [obstacle.min, obstacle.max] {
            if !in_domain(corner)? {
                return Err(InputError::ObstacleOutOfBounds { index, corner });
            }
        }
        if !obstacle.min.all_component_wise(obstacle.max, |a, b| a < b) {
            return Err(InputError::ObstacleCornersOutOfOrder {
                index,
                min: obstacle.min,
                max: obstacle.max,
            });
        }
    }

    for (index, net) in nets.iter().enumerate() {
        for endpoint in [net.from, net.to] {
            if !in_domain(endpoint)? {
                return Err(InputError::NetOutOfBounds { index, endpoint });
            }
        }
    }
    Ok(())
}
