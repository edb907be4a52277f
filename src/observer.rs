use crate::mesh_core::{FixedTriangleHandle, TriangleMesh};
use crate::Point2;

/// Receives progress events while a triangulation is being built.
///
/// Observers replace unconditional debug output: the triangulator reports each step to its
/// observer, which can log, count or inspect the mesh. Events that change the mesh pass a
/// read-only reference to it, taken right after the change.
///
/// All methods have empty default implementations and are called synchronously.
///
/// Two observers are provided:
///  - [NoopObserver] ignores all events and is used by default
///  - [TracingObserver] emits [tracing] events
pub trait TriangulationObserver {
    /// Coordinates were divided by `scale`.
    fn notify_normalized(&mut self, _scale: f64) {}

    /// `num_points` points were sorted into `bins_per_axis²` bins.
    fn notify_bin_sorted(&mut self, _num_points: usize, _bins_per_axis: usize) {}

    /// The super triangle was created. Its vertices start at index `first_vertex`.
    fn notify_super_triangle(&mut self, _first_vertex: usize, _positions: [Point2; 3]) {}

    /// The triangle enclosing `point` was found after `steps` walk steps.
    fn notify_point_located(&mut self, _point: usize, _triangle: FixedTriangleHandle, _steps: usize) {
    }

    /// `point` coincides with the existing vertex `existing_vertex` and was not inserted.
    fn notify_point_merged(&mut self, _point: usize, _existing_vertex: usize) {}

    /// `triangle` was split at `point`, creating the two triangles in `created`.
    fn notify_triangle_split(
        &mut self,
        _mesh: &TriangleMesh,
        _point: usize,
        _triangle: FixedTriangleHandle,
        _created: [FixedTriangleHandle; 2],
    ) {
    }

    /// The diagonal shared by both triangles was flipped while legalizing around `point`.
    fn notify_edge_flipped(
        &mut self,
        _mesh: &TriangleMesh,
        _point: usize,
        _triangles: [FixedTriangleHandle; 2],
    ) {
    }

    /// All points were inserted and coordinates were restored.
    fn notify_finalized(&mut self, _num_triangles: usize) {}

    /// The edge skeleton was extracted.
    fn notify_edges_extracted(&mut self, _num_edges: usize, _num_visited_triangles: usize) {}
}

impl<O: TriangulationObserver + ?Sized> TriangulationObserver for &mut O {
    fn notify_normalized(&mut self, scale: f64) {
        (**self).notify_normalized(scale)
    }

    fn notify_bin_sorted(&mut self, num_points: usize, bins_per_axis: usize) {
        (**self).notify_bin_sorted(num_points, bins_per_axis)
    }

    fn notify_super_triangle(&mut self, first_vertex: usize, positions: [Point2; 3]) {
        (**self).notify_super_triangle(first_vertex, positions)
    }

    fn notify_point_located(&mut self, point: usize, triangle: FixedTriangleHandle, steps: usize) {
        (**self).notify_point_located(point, triangle, steps)
    }

    fn notify_point_merged(&mut self, point: usize, existing_vertex: usize) {
        (**self).notify_point_merged(point, existing_vertex)
    }

    fn notify_triangle_split(
        &mut self,
        mesh: &TriangleMesh,
        point: usize,
        triangle: FixedTriangleHandle,
        created: [FixedTriangleHandle; 2],
    ) {
        (**self).notify_triangle_split(mesh, point, triangle, created)
    }

    fn notify_edge_flipped(
        &mut self,
        mesh: &TriangleMesh,
        point: usize,
        triangles: [FixedTriangleHandle; 2],
    ) {
        (**self).notify_edge_flipped(mesh, point, triangles)
    }

    fn notify_finalized(&mut self, num_triangles: usize) {
        (**self).notify_finalized(num_triangles)
    }

    fn notify_edges_extracted(&mut self, num_edges: usize, num_visited_triangles: usize) {
        (**self).notify_edges_extracted(num_edges, num_visited_triangles)
    }
}

/// An observer that ignores all events.
#[derive(Default, Debug, Clone, Copy)]
pub struct NoopObserver;

impl TriangulationObserver for NoopObserver {}

/// An observer that reports every event through [tracing].
///
/// Per-point events are emitted at `TRACE` level, per-phase events at `DEBUG` level.
#[derive(Default, Debug, Clone, Copy)]
pub struct TracingObserver;

impl TriangulationObserver for TracingObserver {
    fn notify_normalized(&mut self, scale: f64) {
        tracing::debug!(scale, "normalized coordinates");
    }

    fn notify_bin_sorted(&mut self, num_points: usize, bins_per_axis: usize) {
        tracing::debug!(num_points, bins_per_axis, "bin sort");
    }

    fn notify_super_triangle(&mut self, first_vertex: usize, positions: [Point2; 3]) {
        tracing::debug!(first_vertex, ?positions, "super triangle");
    }

    fn notify_point_located(&mut self, point: usize, triangle: FixedTriangleHandle, steps: usize) {
        tracing::trace!(point, triangle = triangle.index(), steps, "located enclosing triangle");
    }

    fn notify_point_merged(&mut self, point: usize, existing_vertex: usize) {
        tracing::debug!(point, existing_vertex, "skipped coincident point");
    }

    fn notify_triangle_split(
        &mut self,
        mesh: &TriangleMesh,
        point: usize,
        triangle: FixedTriangleHandle,
        created: [FixedTriangleHandle; 2],
    ) {
        tracing::trace!(
            point,
            triangle = triangle.index(),
            first = created[0].index(),
            second = created[1].index(),
            num_triangles = mesh.num_triangles(),
            "split triangle"
        );
    }

    fn notify_edge_flipped(
        &mut self,
        _mesh: &TriangleMesh,
        point: usize,
        triangles: [FixedTriangleHandle; 2],
    ) {
        tracing::trace!(
            point,
            left = triangles[0].index(),
            right = triangles[1].index(),
            "flipped edge"
        );
    }

    fn notify_finalized(&mut self, num_triangles: usize) {
        tracing::debug!(num_triangles, "triangulation finalized");
    }

    fn notify_edges_extracted(&mut self, num_edges: usize, num_visited_triangles: usize) {
        tracing::debug!(num_edges, num_visited_triangles, "extracted edges");
    }
}
