#![allow(missing_docs)]
use crate::mesh_core::{FixedTriangleHandle, TriangleMesh};
use crate::{Point2, TriangulationError, TriangulationObserver};
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;

pub const SEED: &[u8; 32] = b"wPYxAkIiHcEmSBAxQFoXFrpYToCe1B71";
pub const SEED2: &[u8; 32] = b"14LzG37Y9EHTcmLW8vBDqWwtYsCeVVyF";

pub fn random_points_in_range(
    min: f64,
    max: f64,
    size: usize,
    seed: &[u8; 32],
) -> Vec<Point2> {
    let mut rng = rand::rngs::StdRng::from_seed(*seed);
    let range = Uniform::new(min, max);
    let mut points = Vec::with_capacity(size);
    for _ in 0..size {
        let x = range.sample(&mut rng);
        let y = range.sample(&mut rng);
        points.push(Point2::new(x, y));
    }
    points
}

/// Random points within the unit square, as produced by normalization.
pub fn random_unit_points(size: usize, seed: &[u8; 32]) -> Vec<Point2> {
    random_points_in_range(0.0, 1.0, size, seed)
}

/// Verifies the mesh adjacency after every split and every flip.
#[derive(Debug, Default)]
pub struct AdjacencyRecorder {
    pub num_events: usize,
    pub violations: Vec<TriangulationError>,
}

impl AdjacencyRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&mut self, mesh: &TriangleMesh) {
        self.num_events += 1;
        if let Err(violation) = mesh.check_adjacency() {
            self.violations.push(violation);
        }
    }
}

impl TriangulationObserver for AdjacencyRecorder {
    fn notify_triangle_split(
        &mut self,
        mesh: &TriangleMesh,
        _point: usize,
        _triangle: FixedTriangleHandle,
        _created: [FixedTriangleHandle; 2],
    ) {
        self.check(mesh);
    }

    fn notify_edge_flipped(
        &mut self,
        mesh: &TriangleMesh,
        _point: usize,
        _triangles: [FixedTriangleHandle; 2],
    ) {
        self.check(mesh);
    }
}
