mod edge_extractor;
mod handles;
pub(crate) mod math;
mod triangle_mesh;
mod triangulator;

pub use edge_extractor::{extract_edges, ExtractedEdges};
pub use handles::{FixedTriangleHandle, SENTINEL_HANDLE};
pub use math::{contained_in_circumference, should_flip, side_query, EdgeSide};
pub use triangle_mesh::{TriangleEntry, TriangleMesh};
pub use triangulator::{
    IncrementalTriangulator, TriangulationStatistics, TriangulatorState, SUPER_TRIANGLE,
};
