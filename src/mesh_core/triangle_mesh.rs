use std::collections::VecDeque;

use super::handles::FixedTriangleHandle;
use super::math::{self, EdgeSide};
use crate::{Point2, TriangulationError};

/// Vertex and neighbor indices of a single triangle.
///
/// Vertices are stored in counterclockwise order. Neighbor slot `i` refers to the triangle
/// sharing the edge opposite of vertex slot `i`, that is, the edge from vertex `i + 1` to
/// vertex `i + 2` (indices modulo 3).
///
/// ```text
///            v0
///           /  \
///   n2 --> /    \ <-- n1
///         /      \
///       v1 ------ v2
///            ^
///            n0
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct TriangleEntry {
    /// Point indices, counterclockwise.
    pub vertices: [usize; 3],
    /// Neighbor handles, slot `i` lies opposite of vertex `i`.
    pub neighbors: [FixedTriangleHandle; 3],
}

impl TriangleEntry {
    /// Returns the slot containing `vertex`, if any.
    pub fn vertex_slot(&self, vertex: usize) -> Option<usize> {
        self.vertices.iter().position(|v| *v == vertex)
    }
}

/// An arena of triangles connected by neighbor handles.
///
/// Triangles are only ever appended or overwritten in place, so handles stay valid. The
/// first storage slot belongs to the [SENTINEL_HANDLE](super::SENTINEL_HANDLE) and never
/// describes a real triangle.
///
/// The mesh stores point indices only; positions are passed in by the caller where
/// geometric queries need them.
#[derive(Clone, Debug)]
pub struct TriangleMesh {
    triangles: Vec<TriangleEntry>,
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl TriangleMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with room for `num_triangles` triangles.
    pub fn with_capacity(num_triangles: usize) -> Self {
        let mut triangles = Vec::with_capacity(num_triangles + 1);
        triangles.push(TriangleEntry::default());
        TriangleMesh { triangles }
    }

    /// Number of triangles created so far. The sentinel is not counted.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len() - 1
    }

    /// The most recently created triangle or the sentinel if the mesh is empty.
    pub fn last_triangle(&self) -> FixedTriangleHandle {
        FixedTriangleHandle::new(self.num_triangles())
    }

    /// The handle that the next call to [Self::create_triangle] will return.
    pub fn next_handle(&self) -> FixedTriangleHandle {
        FixedTriangleHandle::new(self.triangles.len())
    }

    /// Iterates over all triangle handles, excluding the sentinel.
    pub fn triangles(&self) -> impl Iterator<Item = FixedTriangleHandle> {
        (1..self.triangles.len()).map(FixedTriangleHandle::new)
    }

    /// Appends a new triangle and returns its handle.
    ///
    /// The caller is responsible for keeping the adjacency symmetric, see
    /// [Self::rewire_neighbor].
    pub fn create_triangle(
        &mut self,
        vertices: [usize; 3],
        neighbors: [FixedTriangleHandle; 3],
    ) -> FixedTriangleHandle {
        let handle = self.next_handle();
        self.triangles.push(TriangleEntry {
            vertices,
            neighbors,
        });
        handle
    }

    /// Replaces the content of an existing triangle while keeping its handle.
    pub fn set_triangle(
        &mut self,
        handle: FixedTriangleHandle,
        vertices: [usize; 3],
        neighbors: [FixedTriangleHandle; 3],
    ) {
        *self.entry_mut(handle) = TriangleEntry {
            vertices,
            neighbors,
        };
    }

    /// Replaces every neighbor slot of `triangle` that refers to `old` with `new`.
    ///
    /// Does nothing if `triangle` is the sentinel.
    pub fn rewire_neighbor(
        &mut self,
        triangle: FixedTriangleHandle,
        old: FixedTriangleHandle,
        new: FixedTriangleHandle,
    ) {
        if triangle.is_sentinel() {
            return;
        }
        for neighbor in &mut self.entry_mut(triangle).neighbors {
            if *neighbor == old {
                *neighbor = new;
            }
        }
    }

    /// Returns the vertices and neighbors of a triangle.
    pub fn entry(&self, handle: FixedTriangleHandle) -> &TriangleEntry {
        debug_assert!(!handle.is_sentinel(), "Sentinel handle dereferenced");
        &self.triangles[handle.index()]
    }

    fn entry_mut(&mut self, handle: FixedTriangleHandle) -> &mut TriangleEntry {
        debug_assert!(!handle.is_sentinel(), "Sentinel handle dereferenced");
        &mut self.triangles[handle.index()]
    }

    /// The counterclockwise vertices of a triangle.
    pub fn vertices(&self, handle: FixedTriangleHandle) -> [usize; 3] {
        self.entry(handle).vertices
    }

    /// The neighbors of a triangle.
    pub fn neighbors(&self, handle: FixedTriangleHandle) -> [FixedTriangleHandle; 3] {
        self.entry(handle).neighbors
    }

    /// Side of `position` relative to the directed edge from vertex `from_slot` to vertex
    /// `to_slot` of `triangle`.
    pub fn side_query(
        &self,
        positions: &[Point2],
        triangle: FixedTriangleHandle,
        from_slot: usize,
        to_slot: usize,
        position: Point2,
    ) -> EdgeSide {
        let vertices = self.vertices(triangle);
        math::side_query(
            positions[vertices[from_slot]],
            positions[vertices[to_slot]],
            position,
        )
    }

    /// Returns `true` if point `point` lies strictly to the right of the directed edge from
    /// vertex `from_slot` to vertex `to_slot` of `triangle`.
    ///
    /// Since triangles are counterclockwise, "right" means outside of the triangle.
    pub fn is_right_of(
        &self,
        positions: &[Point2],
        triangle: FixedTriangleHandle,
        from_slot: usize,
        to_slot: usize,
        point: usize,
    ) -> bool {
        self.side_query(positions, triangle, from_slot, to_slot, positions[point])
            .is_on_right_side()
    }

    /// Verifies that the adjacency is symmetric for every triangle reachable from triangle 1.
    ///
    /// Every non-sentinel neighbor of a reachable triangle must refer back to it in exactly
    /// one slot. Returns the number of visited triangles.
    pub fn check_adjacency(&self) -> Result<usize, TriangulationError> {
        if self.num_triangles() == 0 {
            return Ok(0);
        }

        let mut visited = vec![false; self.triangles.len()];
        let mut queue = VecDeque::new();
        let start = FixedTriangleHandle::new(1);
        visited[start.index()] = true;
        queue.push_back(start);
        let mut num_visited = 0;

        while let Some(triangle) = queue.pop_front() {
            num_visited += 1;
            for neighbor in self.neighbors(triangle) {
                if neighbor.is_sentinel() {
                    continue;
                }
                let back_references = self
                    .neighbors(neighbor)
                    .iter()
                    .filter(|n| **n == triangle)
                    .count();
                if back_references != 1 {
                    return Err(TriangulationError::AdjacencyViolation { triangle, neighbor });
                }
                if !visited[neighbor.index()] {
                    visited[neighbor.index()] = true;
                    queue.push_back(neighbor);
                }
            }
        }
        Ok(num_visited)
    }

    /// Returns `true` if all triangles are strictly counterclockwise.
    #[cfg(test)]
    pub(crate) fn all_counterclockwise(&self, positions: &[Point2]) -> bool {
        self.triangles().all(|triangle| {
            self.side_query(
                positions,
                triangle,
                0,
                1,
                positions[self.vertices(triangle)[2]],
            )
            .is_on_left_side()
        })
    }
}

impl std::ops::Index<FixedTriangleHandle> for TriangleMesh {
    type Output = TriangleEntry;

    fn index(&self, handle: FixedTriangleHandle) -> &TriangleEntry {
        self.entry(handle)
    }
}
