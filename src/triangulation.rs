use crate::mesh_core::{extract_edges, IncrementalTriangulator, TriangulationStatistics};
use crate::{
    bin_sort, ConstraintEdge, EdgePositions, InputError, Normalization, NoopObserver, Point2,
    PointRegistry, RoutingGraph, TriangulationError, TriangulationObserver,
    TriangulationParameters,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The edge skeleton of a triangulated point set.
///
/// Points are stored in insertion order, which is the bin sorted order and generally differs
/// from the order in which they were registered. All coordinates are given in original,
/// denormalized units.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangulation {
    points: Vec<Point2>,
    edges: Vec<[usize; 2]>,
    constraint_edges: Vec<ConstraintEdge>,
    bins_per_axis: usize,
    num_triangles: usize,
    statistics: TriangulationStatistics,
}

impl Triangulation {
    /// All input points, in insertion order.
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// All edges as `[lower, higher]` pairs of point indices.
    ///
    /// Edges are sorted by their lower index first, then by their higher index. No edge
    /// touches a super triangle vertex.
    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }

    /// Number of extracted edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// The constraint edges of the input, referring to indices of [Self::points].
    ///
    /// Constraint edges are not enforced; they may or may not be contained in
    /// [Self::edges].
    pub fn constraint_edges(&self) -> &[ConstraintEdge] {
        &self.constraint_edges
    }

    /// Returns an iterator over the positions of each edge's endpoints.
    pub fn edge_positions(&self) -> impl Iterator<Item = EdgePositions> + '_ {
        self.edges
            .iter()
            .map(move |[from, to]| [self.points[*from], self.points[*to]])
    }

    /// Returns `true` if the edge skeleton connects point `from` with point `to`.
    pub fn contains_edge(&self, from: usize, to: usize) -> bool {
        let edge = if from < to { [from, to] } else { [to, from] };
        self.edges.binary_search(&edge).is_ok()
    }

    /// Returns `true` if any edge connects two points at the given positions.
    pub fn contains_edge_between(&self, from: Point2, to: Point2) -> bool {
        self.edge_positions()
            .any(|[p0, p1]| (p0 == from && p1 == to) || (p0 == to && p1 == from))
    }

    /// Number of bins per axis used for sorting the points.
    pub fn bins_per_axis(&self) -> usize {
        self.bins_per_axis
    }

    /// Number of triangles of the mesh the edges were extracted from, including triangles
    /// touching the super triangle.
    pub fn num_triangles(&self) -> usize {
        self.num_triangles
    }

    /// Counters collected during construction.
    pub fn statistics(&self) -> TriangulationStatistics {
        self.statistics
    }
}

/// Triangulates all points of a routing graph with default parameters.
///
/// # Example
/// ```
/// use routemesh::{Net, Point2, RoutingGraph};
///
/// # fn main() -> Result<(), routemesh::TriangulationError> {
/// let net = Net::new(Point2::new(10.0, 10.0), Point2::new(90.0, 90.0));
/// let graph = RoutingGraph::new(100.0, 100.0, Vec::new(), vec![net])?;
///
/// let triangulation = routemesh::triangulate(&graph)?;
/// assert_eq!(triangulation.points().len(), 6);
/// assert!(triangulation.contains_edge_between(Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)));
/// # Ok(())
/// # }
/// ```
pub fn triangulate(graph: &RoutingGraph) -> Result<Triangulation, TriangulationError> {
    triangulate_with(graph, TriangulationParameters::default(), NoopObserver)
}

/// Triangulates all points of a routing graph.
///
/// The boundary corners come first, followed by the corners of each obstacle and the
/// endpoints of each net, see [PointRegistry::from_graph]. Coordinates are normalized by
/// the larger domain dimension.
pub fn triangulate_with<O: TriangulationObserver>(
    graph: &RoutingGraph,
    parameters: TriangulationParameters,
    observer: O,
) -> Result<Triangulation, TriangulationError> {
    let registry = PointRegistry::from_graph(graph)?;
    let normalization = Normalization::for_domain(graph.width(), graph.height());
    triangulate_points(registry, normalization, parameters, observer)
}

/// Triangulates the points of a registry.
///
/// After normalization, all points must lie within the unit square. A point outside of it
/// is rejected with [InputError::PointOutsideOfDomain], an unusable domain size with
/// [InputError::InvalidDomainSize].
pub fn triangulate_points<O: TriangulationObserver>(
    registry: PointRegistry,
    normalization: Normalization,
    parameters: TriangulationParameters,
    mut observer: O,
) -> Result<Triangulation, TriangulationError> {
    let (mut points, constraint_edges) = registry.into_parts();
    if let Some(position) = points.iter().find(|point| !point.is_finite()) {
        return Err(InputError::NonFiniteCoordinate {
            position: *position,
        }
        .into());
    }
    normalization.validate()?;
    if let Some(position) = points.iter().find(|point| !normalization.covers(**point)) {
        return Err(InputError::PointOutsideOfDomain {
            position: *position,
        }
        .into());
    }

    normalization.normalize_all(&mut points);
    observer.notify_normalized(normalization.scale());

    let sorted = bin_sort(&mut points);
    observer.notify_bin_sorted(points.len(), sorted.bins_per_axis);

    let inverse = sorted.inverse_permutation();
    let constraint_edges = constraint_edges
        .into_iter()
        .map(|edge| ConstraintEdge::new(inverse[edge.from], inverse[edge.to]))
        .collect();

    let mut triangulator = IncrementalTriangulator::new(points, parameters, &mut observer);
    triangulator.insert_all()?;
    triangulator.finalize(&normalization)?;

    let num_real_points = triangulator.num_real_points();
    let statistics = triangulator.statistics();
    let (mut points, mesh) = triangulator.into_parts();

    let extracted = extract_edges(&mesh, num_real_points);
    observer.notify_edges_extracted(extracted.edges.len(), extracted.num_visited_triangles);
    points.truncate(num_real_points);

    Ok(Triangulation {
        points,
        edges: extracted.edges,
        constraint_edges,
        bins_per_axis: sorted.bins_per_axis,
        num_triangles: mesh.num_triangles(),
        statistics,
    })
}

/// Triangulates a routing graph and stores the resulting edges in it.
///
/// Previously stored edges are replaced. The graph is left unchanged if the triangulation
/// fails.
pub fn construct_cdt(graph: &mut RoutingGraph) -> Result<(), TriangulationError> {
    let triangulation = triangulate(graph)?;
    graph.set_cdt_edges(triangulation.edge_positions().collect());
    Ok(())
}

#[cfg(test)]
mod test {
    use anyhow::Result;

    use super::{construct_cdt, triangulate, triangulate_points, triangulate_with};
    use crate::test_utilities::{random_points_in_range, AdjacencyRecorder, SEED};
    use crate::{
        AdjacencyCheck, InputError, LegalityTest, Net, Normalization, NoopObserver, Point2,
        PointRegistry, Rectangle, RoutingGraph, TracingObserver, TriangulationError,
        TriangulationParameters,
    };

    fn checked_parameters() -> TriangulationParameters {
        TriangulationParameters::new().with_adjacency_check(AdjacencyCheck::AfterEachInsertion)
    }

    fn scenario_a() -> Result<RoutingGraph, InputError> {
        RoutingGraph::new(
            100.0,
            100.0,
            Vec::new(),
            vec![Net::new(Point2::new(10.0, 10.0), Point2::new(90.0, 90.0))],
        )
    }

    fn scenario_b() -> Result<RoutingGraph, InputError> {
        RoutingGraph::new(
            100.0,
            100.0,
            vec![Rectangle::new(
                Point2::new(20.0, 20.0),
                Point2::new(40.0, 40.0),
            )],
            Vec::new(),
        )
    }

    fn rectangle_sides(min: (f64, f64), max: (f64, f64)) -> [[Point2; 2]; 4] {
        let c0 = Point2::new(min.0, min.1);
        let c1 = Point2::new(max.0, min.1);
        let c2 = Point2::new(min.0, max.1);
        let c3 = Point2::new(max.0, max.1);
        [[c0, c1], [c1, c3], [c3, c2], [c2, c0]]
    }

    #[test]
    fn test_scenario_a() -> Result<()> {
        let graph = scenario_a()?;
        let parameters = checked_parameters().with_legality_test(LegalityTest::Circumcircle);
        let triangulation = triangulate_with(&graph, parameters, NoopObserver)?;

        assert_eq!(triangulation.points().len(), 6);
        assert_eq!(triangulation.statistics().num_inserted, 6);
        assert!(triangulation.edges().iter().all(|[_, to]| *to < 6));
        for [from, to] in rectangle_sides((0.0, 0.0), (100.0, 100.0)) {
            assert!(triangulation.contains_edge_between(from, to));
        }
        // 3n - 3 - h edges for n points with h points on the convex hull
        assert_eq!(triangulation.num_edges(), 11);
        assert!(triangulation
            .contains_edge_between(Point2::new(10.0, 10.0), Point2::new(90.0, 90.0)));
        Ok(())
    }

    #[test]
    fn test_scenario_a_angle_branches() -> Result<()> {
        let triangulation = triangulate_with(&scenario_a()?, checked_parameters(), NoopObserver)?;

        assert_eq!(triangulation.points().len(), 6);
        assert!(triangulation.edges().iter().all(|[_, to]| *to < 6));
        let [bottom, right, top, left] = rectangle_sides((0.0, 0.0), (100.0, 100.0));
        for [from, to] in [bottom, right, left] {
            assert!(triangulation.contains_edge_between(from, to));
        }
        // Not a Delaunay triangulation: the quad formed by (100, 0), (100, 100), (0, 100)
        // and the upper super triangle vertex has two obtuse corners opposite of its
        // diagonal, which is therefore never flipped into the top boundary edge.
        assert!(!triangulation.contains_edge_between(top[0], top[1]));
        assert_eq!(triangulation.num_edges(), 9);
        Ok(())
    }

    #[test]
    fn test_scenario_b() -> Result<()> {
        for legality_test in [LegalityTest::AngleBranches, LegalityTest::Circumcircle] {
            let mut recorder = AdjacencyRecorder::new();
            let parameters = checked_parameters().with_legality_test(legality_test);
            let triangulation = triangulate_with(&scenario_b()?, parameters, &mut recorder)?;

            assert_eq!(triangulation.points().len(), 8);
            assert_eq!(triangulation.num_triangles(), 17);
            assert!(triangulation.edges().iter().all(|[_, to]| *to < 8));
            assert!(recorder.violations.is_empty());
            assert!(recorder.num_events >= 8);
        }

        let parameters = checked_parameters().with_legality_test(LegalityTest::Circumcircle);
        let triangulation = triangulate_with(&scenario_b()?, parameters, NoopObserver)?;
        assert_eq!(triangulation.num_edges(), 17);
        for [from, to] in rectangle_sides((20.0, 20.0), (40.0, 40.0)) {
            assert!(triangulation.contains_edge_between(from, to));
        }
        Ok(())
    }

    #[test]
    fn test_scenario_c() -> Result<()> {
        let mut registry = PointRegistry::new();
        registry.add_point(Point2::new(0.0, 0.0));
        registry.add_point(Point2::new(50.0, 0.0));
        registry.add_point(Point2::new(0.0, 50.0));
        // Removed as a duplicate
        registry.add_point(Point2::new(50.0, 0.0));

        let triangulation = triangulate_points(
            registry,
            Normalization::for_domain(50.0, 50.0),
            checked_parameters(),
            NoopObserver,
        )?;
        assert_eq!(triangulation.statistics().num_merged, 1);
        assert_eq!(triangulation.statistics().num_inserted, 3);
        assert_eq!(triangulation.edges(), &[[0, 1], [0, 2], [1, 2]]);
        Ok(())
    }

    #[test]
    fn test_empty_registry() -> Result<()> {
        let triangulation = triangulate_points(
            PointRegistry::new(),
            Normalization::for_domain(1.0, 1.0),
            checked_parameters(),
            NoopObserver,
        )?;
        assert!(triangulation.points().is_empty());
        assert!(triangulation.edges().is_empty());
        assert_eq!(triangulation.num_triangles(), 1);
        Ok(())
    }

    #[test]
    fn test_denormalized_output() -> Result<()> {
        let graph = RoutingGraph::new(
            400.0,
            100.0,
            vec![Rectangle::new(
                Point2::new(150.0, 25.0),
                Point2::new(250.0, 75.0),
            )],
            vec![Net::new(Point2::new(10.0, 50.0), Point2::new(390.0, 50.0))],
        )?;
        let parameters = checked_parameters().with_legality_test(LegalityTest::Circumcircle);
        let triangulation = triangulate_with(&graph, parameters, NoopObserver)?;

        let mut expected = PointRegistry::from_graph(&graph)?.points().to_vec();
        let mut actual = triangulation.points().to_vec();
        expected.sort_by(|p0, p1| p0.partial_cmp(p1).unwrap());
        actual.sort_by(|p0, p1| p0.partial_cmp(p1).unwrap());
        assert_eq!(actual, expected);

        for [from, to] in triangulation.edge_positions() {
            assert!(expected.contains(&from));
            assert!(expected.contains(&to));
        }
        Ok(())
    }

    #[test]
    fn test_constraint_edges_follow_sorting() -> Result<()> {
        let graph = RoutingGraph::new(
            100.0,
            100.0,
            vec![
                Rectangle::new(Point2::new(10.0, 60.0), Point2::new(30.0, 90.0)),
                Rectangle::new(Point2::new(60.0, 5.0), Point2::new(95.0, 45.0)),
            ],
            vec![Net::new(Point2::new(5.0, 5.0), Point2::new(50.0, 95.0))],
        )?;
        let registry = PointRegistry::from_graph(&graph)?;
        let expected: Vec<_> = registry
            .constraint_edges()
            .iter()
            .map(|edge| [registry.points()[edge.from], registry.points()[edge.to]])
            .collect();

        let triangulation = triangulate(&graph)?;
        let actual: Vec<_> = triangulation
            .constraint_edges()
            .iter()
            .map(|edge| [triangulation.points()[edge.from], triangulation.points()[edge.to]])
            .collect();
        assert_eq!(actual, expected);
        assert_eq!(triangulation.constraint_edges().len(), 12);
        Ok(())
    }

    #[test]
    fn test_determinism() -> Result<()> {
        let graph = scenario_b()?;
        let first = triangulate(&graph)?;
        let second = triangulate(&graph)?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_random_points() -> Result<()> {
        let mut registry = PointRegistry::new();
        for point in random_points_in_range(0.0, 1000.0, 400, SEED) {
            registry.add_point(point);
        }
        let parameters = checked_parameters().with_legality_test(LegalityTest::Circumcircle);
        let mut recorder = AdjacencyRecorder::new();
        let triangulation = triangulate_points(
            registry,
            Normalization::for_domain(1000.0, 1000.0),
            parameters,
            &mut recorder,
        )?;

        assert_eq!(triangulation.bins_per_axis(), 4);
        assert_eq!(triangulation.num_triangles(), 801);
        assert!(recorder.violations.is_empty());
        assert!(triangulation.edges().windows(2).all(|pair| pair[0] < pair[1]));
        assert!(triangulation.edges().iter().all(|[_, to]| *to < 400));
        for [from, to] in triangulation.edges() {
            assert!(triangulation.contains_edge(*to, *from));
        }
        Ok(())
    }

    #[test]
    fn test_non_finite_point() {
        let mut registry = PointRegistry::new();
        registry.add_point(Point2::new(0.5, 0.5));
        registry.add_point(Point2::new(f64::NAN, 0.5));

        let result = triangulate_points(
            registry,
            Normalization::for_domain(1.0, 1.0),
            TriangulationParameters::new(),
            NoopObserver,
        );
        assert!(matches!(
            result,
            Err(TriangulationError::InvalidInput(
                InputError::NonFiniteCoordinate { .. }
            ))
        ));
    }

    #[test]
    fn test_point_outside_of_domain() {
        let mut registry = PointRegistry::new();
        registry.add_point(Point2::new(0.5, 0.5));
        registry.add_point(Point2::new(2.5, 0.5));

        let result = triangulate_points(
            registry,
            Normalization::for_domain(1.0, 1.0),
            TriangulationParameters::new(),
            NoopObserver,
        );
        match result {
            Err(TriangulationError::InvalidInput(error)) => {
                assert_eq!(
                    error,
                    InputError::PointOutsideOfDomain {
                        position: Point2::new(2.5, 0.5)
                    }
                );
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_normalization() {
        let mut registry = PointRegistry::new();
        registry.add_rectangle(Rectangle::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)));

        let result = triangulate_points(
            registry,
            Normalization::for_domain(0.0, 0.0),
            TriangulationParameters::new(),
            NoopObserver,
        );
        assert_eq!(
            result,
            Err(InputError::InvalidDomainSize {
                width: 0.0,
                height: 0.0
            }
            .into())
        );
    }

    #[test]
    fn test_construct_cdt() -> Result<()> {
        let mut graph = scenario_b()?;
        construct_cdt(&mut graph)?;
        let expected: Vec<_> = triangulate(&graph)?.edge_positions().collect();
        assert_eq!(graph.cdt_edges(), &expected[..]);
        assert!(!graph.cdt_edges().is_empty());
        Ok(())
    }

    #[test]
    fn test_tracing_observer() -> Result<()> {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let triangulation = triangulate_with(&scenario_b()?, checked_parameters(), TracingObserver)?;
        assert_eq!(triangulation.points().len(), 8);
        Ok(())
    }
}
