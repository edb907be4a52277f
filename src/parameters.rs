/// Controls when the symmetric adjacency of the mesh is verified.
///
/// A failed check aborts the triangulation with
/// [TriangulationError::AdjacencyViolation](crate::TriangulationError::AdjacencyViolation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AdjacencyCheck {
    /// Never check.
    Never,
    /// Check after every point insertion, but only in builds with debug assertions.
    #[default]
    DebugOnly,
    /// Check after every point insertion.
    AfterEachInsertion,
    /// Check once, after all points have been inserted.
    AfterConstruction,
}

impl AdjacencyCheck {
    pub(crate) fn after_each_insertion(self) -> bool {
        match self {
            AdjacencyCheck::AfterEachInsertion => true,
            AdjacencyCheck::DebugOnly => cfg!(debug_assertions),
            AdjacencyCheck::Never | AdjacencyCheck::AfterConstruction => false,
        }
    }

    pub(crate) fn after_construction(self) -> bool {
        self == AdjacencyCheck::AfterConstruction
    }
}

/// Selects the test deciding whether the diagonal of a quad is flipped during legalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LegalityTest {
    /// The angle based test of [should_flip](crate::mesh_core::should_flip).
    ///
    /// Quads whose two corners opposite of the diagonal are both obtuse are never flipped.
    /// The resulting mesh is therefore not always a Delaunay triangulation; edges along the
    /// convex hull may be missing, and in rare cases point location fails since the walk
    /// can cycle in such a mesh.
    #[default]
    AngleBranches,
    /// Exact empty circumcircle test, see
    /// [contained_in_circumference](crate::mesh_core::contained_in_circumference).
    ///
    /// Produces a Delaunay triangulation.
    Circumcircle,
}

/// Controls how a triangulation is built.
///
/// # Example
/// ```
/// use routemesh::{AdjacencyCheck, LegalityTest, TriangulationParameters};
///
/// let parameters = TriangulationParameters::new()
///     .with_adjacency_check(AdjacencyCheck::AfterEachInsertion)
///     .with_legality_test(LegalityTest::Circumcircle)
///     .keep_coincident_points();
/// assert!(!parameters.merges_coincident_points());
/// assert_eq!(parameters.legality_test(), LegalityTest::Circumcircle);
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct TriangulationParameters {
    adjacency_check: AdjacencyCheck,
    legality_test: LegalityTest,
    merge_coincident_points: bool,
}

impl Default for TriangulationParameters {
    fn default() -> Self {
        Self {
            adjacency_check: AdjacencyCheck::default(),
            legality_test: LegalityTest::default(),
            merge_coincident_points: true,
        }
    }
}

impl TriangulationParameters {
    /// Creates a new set of `TriangulationParameters`.
    ///
    /// Refer to the [struct definition](Self) for more information.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specifies when the mesh adjacency is verified.
    ///
    /// Defaults to [AdjacencyCheck::DebugOnly].
    pub fn with_adjacency_check(mut self, adjacency_check: AdjacencyCheck) -> Self {
        self.adjacency_check = adjacency_check;
        self
    }

    /// Specifies the test used to decide whether an edge is flipped.
    ///
    /// Defaults to [LegalityTest::AngleBranches].
    pub fn with_legality_test(mut self, legality_test: LegalityTest) -> Self {
        self.legality_test = legality_test;
        self
    }

    /// Inserts points even if they coincide exactly with an already inserted point.
    ///
    /// By default, such points are skipped: they keep their index but do not become a mesh
    /// vertex. Inserting them creates zero area triangles.
    pub fn keep_coincident_points(mut self) -> Self {
        self.merge_coincident_points = false;
        self
    }

    /// Returns when the adjacency is verified.
    pub fn adjacency_check(&self) -> AdjacencyCheck {
        self.adjacency_check
    }

    /// Returns the test used for deciding about edge flips.
    pub fn legality_test(&self) -> LegalityTest {
        self.legality_test
    }

    /// Returns `true` if coincident points are skipped.
    pub fn merges_coincident_points(&self) -> bool {
        self.merge_coincident_points
    }
}

#[cfg(test)]
mod test {
    use super::{AdjacencyCheck, LegalityTest, TriangulationParameters};

    #[test]
    fn test_defaults() {
        let parameters = TriangulationParameters::default();
        assert_eq!(parameters.adjacency_check(), AdjacencyCheck::DebugOnly);
        assert!(parameters.merges_coincident_points());
        assert_eq!(parameters.legality_test(), LegalityTest::AngleBranches);
        assert_eq!(
            AdjacencyCheck::DebugOnly.after_each_insertion(),
            cfg!(debug_assertions)
        );
    }

    #[test]
    fn test_check_modes() {
        assert!(AdjacencyCheck::AfterEachInsertion.after_each_insertion());
        assert!(!AdjacencyCheck::AfterEachInsertion.after_construction());
        assert!(AdjacencyCheck::AfterConstruction.after_construction());
        assert!(!AdjacencyCheck::Never.after_each_insertion());
        assert!(!AdjacencyCheck::Never.after_construction());
    }
}
