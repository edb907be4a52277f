use smallvec::SmallVec;

use super::handles::{FixedTriangleHandle, SENTINEL_HANDLE};
use super::math;
use super::triangle_mesh::TriangleMesh;
use crate::{
    LegalityTest, Normalization, NoopObserver, Point2, TriangulationError, TriangulationObserver,
    TriangulationParameters,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Normalized positions of the super triangle vertices.
///
/// Normalized input points lie within the unit square, far inside of this triangle.
pub const SUPER_TRIANGLE: [Point2; 3] = [
    Point2::new(-100.0, -100.0),
    Point2::new(100.0, -100.0),
    Point2::new(0.0, 100.0),
];

/// The phase an [IncrementalTriangulator] is currently in.
///
/// ```text
/// Empty -> SuperTriangleReady -> (Locating -> Splitting -> Legalizing)* -> Finalized
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriangulatorState {
    /// No triangle exists yet.
    Empty,
    /// The super triangle exists, no point was inserted.
    SuperTriangleReady,
    /// Searching the triangle enclosing the next point.
    Locating,
    /// Splitting the enclosing triangle.
    Splitting,
    /// Flipping edges around the inserted point.
    Legalizing,
    /// Coordinates were restored, no further points can be inserted.
    Finalized,
}

/// Counters collected while building a triangulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangulationStatistics {
    /// Number of points that became a mesh vertex.
    pub num_inserted: usize,
    /// Number of points skipped because they coincide with an inserted point.
    pub num_merged: usize,
    /// Number of diagonal flips performed while legalizing.
    pub num_flips: usize,
    /// Total number of steps taken by all point location walks.
    pub num_walk_steps: usize,
}

/// Builds a triangle mesh by inserting points one by one into a super triangle.
///
/// Each point is located by walking from the most recently created triangle, the enclosing
/// triangle is split into three and the surrounding edges are legalized by flipping. Input
/// positions are expected to be normalized (see [Normalization]) and ideally bin sorted
/// (see [bin_sort](crate::bin_sort())), which keeps the walks short.
///
/// # Example
/// ```
/// use routemesh::mesh_core::{IncrementalTriangulator, TriangulatorState};
/// use routemesh::{Normalization, NoopObserver, Point2, TriangulationParameters};
///
/// # fn main() -> Result<(), routemesh::TriangulationError> {
/// let points = vec![
///     Point2::new(0.2, 0.2),
///     Point2::new(0.8, 0.3),
///     Point2::new(0.5, 0.9),
/// ];
/// let mut triangulator =
///     IncrementalTriangulator::new(points, TriangulationParameters::new(), NoopObserver);
/// triangulator.insert_all()?;
/// triangulator.finalize(&Normalization::for_domain(1.0, 1.0))?;
///
/// assert_eq!(triangulator.state(), TriangulatorState::Finalized);
/// // The super triangle is split once per inserted point
/// assert_eq!(triangulator.mesh().num_triangles(), 7);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct IncrementalTriangulator<O = NoopObserver> {
    positions: Vec<Point2>,
    num_real_points: usize,
    mesh: TriangleMesh,
    legalization_stack: SmallVec<[FixedTriangleHandle; 16]>,
    state: TriangulatorState,
    parameters: TriangulationParameters,
    observer: O,
    statistics: TriangulationStatistics,
}

impl<O: TriangulationObserver> IncrementalTriangulator<O> {
    /// Creates a triangulator for the given normalized points.
    ///
    /// Points keep their index: point `i` becomes vertex `i` of the mesh.
    pub fn new(points: Vec<Point2>, parameters: TriangulationParameters, observer: O) -> Self {
        let num_real_points = points.len();
        IncrementalTriangulator {
            positions: points,
            num_real_points,
            // Every insertion adds two triangles
            mesh: TriangleMesh::with_capacity(2 * num_real_points + 1),
            legalization_stack: SmallVec::new(),
            state: TriangulatorState::Empty,
            parameters,
            observer,
            statistics: TriangulationStatistics::default(),
        }
    }

    /// Appends the super triangle vertices and creates the initial triangle.
    ///
    /// Does nothing if the super triangle already exists.
    pub fn setup_super_triangle(&mut self) {
        if self.state != TriangulatorState::Empty {
            return;
        }

        let first_vertex = self.positions.len();
        self.positions.extend(SUPER_TRIANGLE);
        self.mesh.create_triangle(
            [first_vertex, first_vertex + 1, first_vertex + 2],
            [SENTINEL_HANDLE; 3],
        );
        self.state = TriangulatorState::SuperTriangleReady;
        self.observer
            .notify_super_triangle(first_vertex, SUPER_TRIANGLE);
    }

    /// Inserts all points in index order.
    pub fn insert_all(&mut self) -> Result<(), TriangulationError> {
        for point in 0..self.num_real_points {
            self.insert_point(point)?;
        }
        Ok(())
    }

    /// Inserts a single point.
    ///
    /// Creates the super triangle first if necessary.
    ///
    /// # Panics
    /// Panics if `point` is not a real point index or if the triangulator is finalized.
    pub fn insert_point(&mut self, point: usize) -> Result<(), TriangulationError> {
        assert!(point < self.num_real_points, "Point index out of range");
        assert_ne!(
            self.state,
            TriangulatorState::Finalized,
            "Cannot insert into a finalized triangulation"
        );
        self.setup_super_triangle();

        self.state = TriangulatorState::Locating;
        let triangle = self.locate(point)?;

        if self.parameters.merges_coincident_points() {
            let position = self.positions[point];
            let existing = self
                .mesh
                .vertices(triangle)
                .into_iter()
                .find(|vertex| self.positions[*vertex] == position);
            if let Some(existing_vertex) = existing {
                self.statistics.num_merged += 1;
                self.observer.notify_point_merged(point, existing_vertex);
                return Ok(());
            }
        }

        self.split(triangle, point);
        self.legalize(point);
        self.statistics.num_inserted += 1;

        if self.parameters.adjacency_check().after_each_insertion() {
            self.mesh.check_adjacency()?;
        }
        Ok(())
    }

    /// Finds the triangle enclosing `point`.
    ///
    /// The walk starts at the most recently created triangle. In each step, the walk crosses
    /// the first edge that has the point strictly on its right side. Points on an edge or a
    /// vertex are located in any triangle touching them.
    pub fn locate(&mut self, point: usize) -> Result<FixedTriangleHandle, TriangulationError> {
        let mut current = self.mesh.last_triangle();
        let mut steps = 0;
        'walk: loop {
            if current.is_sentinel() || steps > self.mesh.num_triangles() {
                return Err(TriangulationError::PointLocationFailed {
                    point,
                    position: self.positions[point],
                    steps,
                });
            }

            for slot in 0..3 {
                if self
                    .mesh
                    .is_right_of(&self.positions, current, (slot + 1) % 3, (slot + 2) % 3, point)
                {
                    current = self.mesh.neighbors(current)[slot];
                    steps += 1;
                    continue 'walk;
                }
            }

            self.statistics.num_walk_steps += steps;
            self.observer.notify_point_located(point, current, steps);
            return Ok(current);
        }
    }

    // Splits `triangle` into three triangles meeting at `point`:
    //
    //            p0                         p0
    //           /  \                       /|\
    //       n2 /    \ n1     ->       n2  / | \  n1
    //         /      \                   /  q  \
    //       p1 ------ p2                / /   \ \
    //            n0                    p1 ----- p2
    //                                      n0
    //
    // `triangle` becomes (q, p1, p2), two new triangles (p0, p1, q) and (p0, q, p2) are
    // appended.
    fn split(&mut self, triangle: FixedTriangleHandle, point: usize) {
        self.state = TriangulatorState::Splitting;

        let [p0, p1, p2] = self.mesh.vertices(triangle);
        let [n0, n1, n2] = self.mesh.neighbors(triangle);

        let first = self.mesh.next_handle();
        let second = FixedTriangleHandle::new(first.index() + 1);

        self.mesh
            .create_triangle([p0, p1, point], [triangle, second, n2]);
        self.mesh
            .create_triangle([p0, point, p2], [triangle, n1, first]);
        self.mesh
            .set_triangle(triangle, [point, p1, p2], [n0, second, first]);

        self.mesh.rewire_neighbor(n2, triangle, first);
        self.mesh.rewire_neighbor(n1, triangle, second);

        self.legalization_stack
            .extend([triangle, first, second]);
        self.observer
            .notify_triangle_split(&self.mesh, point, triangle, [first, second]);
    }

    // Checks the edge opposite of `point` for every triangle on the stack.
    fn legalize(&mut self, point: usize) {
        self.state = TriangulatorState::Legalizing;

        while let Some(triangle) = self.legalization_stack.pop() {
            let entry = self.mesh[triangle];
            let Some(k) = entry.vertex_slot(point) else {
                continue;
            };
            let other = entry.neighbors[k];
            if other.is_sentinel() {
                continue;
            }

            //            a                          a
            //          / | \                      /   \
            //   q_a  /   |   \  a_d        q_a  / t    \  a_d
            //      /     |     \              /          \
            //     q   t  |  o   d     ->     q ---------- d
            //      \     |     /              \          /
            //   b_q  \   |   /  d_b        b_q  \  o   /  d_b
            //          \ | /                      \   /
            //            b                          b
            //
            // t = (q, a, b) is the triangle containing the inserted point, o = (d, b, a) its
            // neighbor across the edge a - b.
            let a = entry.vertices[(k + 1) % 3];
            let b = entry.vertices[(k + 2) % 3];
            let other_entry = self.mesh[other];
            let Some(slot_a) = other_entry.vertex_slot(a) else {
                continue;
            };
            let j = (slot_a + 1) % 3;
            let d = other_entry.vertices[j];

            let [b_position, a_position, d_position, q_position] =
                [b, a, d, point].map(|vertex| self.positions[vertex]);
            let is_illegal = match self.parameters.legality_test() {
                LegalityTest::AngleBranches => {
                    math::should_flip(b_position, a_position, d_position, q_position)
                }
                LegalityTest::Circumcircle => math::contained_in_circumference(
                    b_position, a_position, d_position, q_position,
                ),
            };
            if !is_illegal {
                continue;
            }

            let b_q = entry.neighbors[(k + 1) % 3];
            let q_a = entry.neighbors[(k + 2) % 3];
            let a_d = other_entry.neighbors[(j + 1) % 3];
            let d_b = other_entry.neighbors[(j + 2) % 3];

            self.mesh.set_triangle(triangle, [point, a, d], [a_d, other, q_a]);
            self.mesh.set_triangle(other, [point, d, b], [d_b, b_q, triangle]);
            self.mesh.rewire_neighbor(a_d, other, triangle);
            self.mesh.rewire_neighbor(b_q, triangle, other);

            self.legalization_stack.push(triangle);
            self.legalization_stack.push(other);
            self.statistics.num_flips += 1;
            self.observer
                .notify_edge_flipped(&self.mesh, point, [triangle, other]);
        }
    }

    /// Restores the original coordinate scale.
    ///
    /// Inserts all remaining points if none were inserted yet. Calling this method more
    /// than once has no effect.
    pub fn finalize(&mut self, normalization: &Normalization) -> Result<(), TriangulationError> {
        if self.state == TriangulatorState::Finalized {
            return Ok(());
        }
        if self.state == TriangulatorState::Empty {
            self.insert_all()?;
        }
        // A mesh without any real point still consists of the super triangle
        self.setup_super_triangle();

        if self.parameters.adjacency_check().after_construction() {
            self.mesh.check_adjacency()?;
        }

        normalization.denormalize_all(&mut self.positions);
        self.state = TriangulatorState::Finalized;
        self.observer.notify_finalized(self.mesh.num_triangles());
        Ok(())
    }

    /// The mesh built so far.
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    /// Positions of all mesh vertices, including the three super triangle vertices at the
    /// end once the super triangle exists.
    pub fn positions(&self) -> &[Point2] {
        &self.positions
    }

    /// Number of input points. Vertex indices at or above this value belong to the super
    /// triangle.
    pub fn num_real_points(&self) -> usize {
        self.num_real_points
    }

    /// The current phase.
    pub fn state(&self) -> TriangulatorState {
        self.state
    }

    /// Counters collected so far.
    pub fn statistics(&self) -> TriangulationStatistics {
        self.statistics
    }

    /// The observer receiving all events.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Consumes the triangulator and returns the vertex positions and the mesh.
    pub fn into_parts(self) -> (Vec<Point2>, TriangleMesh) {
        (self.positions, self.mesh)
    }
}
