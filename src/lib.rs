//! # Routemesh
//!
//! Routemesh turns a rectangular routing domain into a triangle mesh whose edges can serve
//! as a routing graph.
//!
//! A domain is described by a [RoutingGraph]: a boundary rectangle, a set of rectangular
//! obstacles and a set of nets (point pairs to be connected). All rectangle corners and net
//! endpoints are collected by a [PointRegistry] and inserted into an incremental Delaunay
//! triangulation:
//!  - coordinates are [normalized](Normalization) into the unit square
//!  - points are [bin sorted](bin_sort()) along a serpentine curve for locality
//!  - each point is located by walking the mesh, its triangle is split and the surrounding
//!    edges are legalized by flipping, see [mesh_core::IncrementalTriangulator]
//!  - the edges between input points are [extracted](mesh_core::extract_edges), omitting all
//!    edges touching the enclosing super triangle
//!
//! # Example
//! ```
//! use routemesh::{Net, Point2, Rectangle, RoutingGraph};
//!
//! # fn main() -> Result<(), routemesh::TriangulationError> {
//! let obstacle = Rectangle::new(Point2::new(20.0, 20.0), Point2::new(40.0, 40.0));
//! let net = Net::new(Point2::new(5.0, 50.0), Point2::new(95.0, 50.0));
//! let mut graph = RoutingGraph::new(100.0, 100.0, vec![obstacle], vec![net])?;
//!
//! routemesh::construct_cdt(&mut graph)?;
//! for [from, to] in graph.cdt_edges() {
//!     println!("{:?} -> {:?}", from, to);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Constraint edges
//! Rectangle sides are recorded as [ConstraintEdge]s but are not enforced: the result is an
//! unconstrained triangulation of all input points. Whether a rectangle side appears as an
//! edge depends on the point distribution.
//!
//! # Features
//!  - `serde`: derives `Serialize` and `Deserialize` for the public model types
//!  - `generation`: random routing graphs, see [generation::generate_random_graph]

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bin_sort;
mod error;
mod graph;
mod normalization;
mod observer;
mod parameters;
mod point;
mod registry;
mod triangulation;

/// Random routing graphs for tests and benchmarks.
#[cfg(feature = "generation")]
pub mod generation;
/// The triangle mesh and the incremental triangulation algorithm.
pub mod mesh_core;

pub use crate::bin_sort::{bin_sort, BinSortResult};
pub use crate::error::{InputError, TriangulationError};
pub use crate::graph::{EdgePositions, Net, Rectangle, RoutingGraph};
pub use crate::normalization::Normalization;
pub use crate::observer::{NoopObserver, TracingObserver, TriangulationObserver};
pub use crate::parameters::{AdjacencyCheck, LegalityTest, TriangulationParameters};
pub use crate::point::Point2;
pub use crate::registry::{ConstraintEdge, PointRegistry};
pub use crate::triangulation::{
    construct_cdt, triangulate, triangulate_points, triangulate_with, Triangulation,
};

#[cfg(test)]
mod test_utilities;
