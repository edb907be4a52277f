use std::collections::VecDeque;

use hashbrown::HashSet;

use super::handles::FixedTriangleHandle;
use super::triangle_mesh::TriangleMesh;

/// The undirected edges of a mesh, as produced by [extract_edges].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedEdges {
    /// Edges as `[lower, higher]` vertex index pairs, sorted ascending.
    pub edges: Vec<[usize; 2]>,
    /// Number of triangles reached by the traversal.
    pub num_visited_triangles: usize,
}

/// Collects all edges between real vertices of a mesh.
///
/// The mesh is traversed breadth first, starting at triangle 1. Every triangle is visited
/// once; each of its edges is recorded once, regardless of how many triangles share it.
/// Edges touching a vertex with index `num_real_points` or above (the super triangle) are
/// dropped.
pub fn extract_edges(mesh: &TriangleMesh, num_real_points: usize) -> ExtractedEdges {
    if mesh.num_triangles() == 0 {
        return ExtractedEdges::default();
    }

    let mut visited = vec![false; mesh.num_triangles() + 1];
    let mut queue = VecDeque::new();
    let mut edges = HashSet::new();

    let start = FixedTriangleHandle::new(1);
    visited[start.index()] = true;
    queue.push_back(start);
    let mut num_visited_triangles = 0;

    while let Some(triangle) = queue.pop_front() {
        num_visited_triangles += 1;

        let vertices = mesh.vertices(triangle);
        for slot in 0..3 {
            let from = vertices[slot];
            let to = vertices[(slot + 1) % 3];
            let (lower, higher) = if from < to { (from, to) } else { (to, from) };
            if higher < num_real_points {
                edges.insert([lower, higher]);
            }
        }

        for neighbor in mesh.neighbors(triangle) {
            if !neighbor.is_sentinel() && !visited[neighbor.index()] {
                visited[neighbor.index()] = true;
                queue.push_back(neighbor);
            }
        }
    }

    let mut edges: Vec<_> = edges.into_iter().collect();
    edges.sort_unstable();

    ExtractedEdges {
        edges,
        num_visited_triangles,
    }
}
