use crate::Point2;

/// Describes on which side of a directed edge a point lies.
///
/// Created by [TriangleMesh::side_query](crate::mesh_core::TriangleMesh::side_query).
#[derive(Debug, Clone, Copy)]
pub struct EdgeSide {
    signed_side: f64,
}

impl EdgeSide {
    #[inline]
    pub(crate) fn from_determinant(s: f64) -> EdgeSide {
        EdgeSide { signed_side: s }
    }

    /// Returns `true` if a point lies strictly on the left side of the edge.
    pub fn is_on_left_side(&self) -> bool {
        self.signed_side > 0.0
    }

    /// Returns `true` if a point lies strictly on the right side of the edge.
    ///
    /// For a counterclockwise triangle, this means the point lies outside of the triangle,
    /// beyond this edge.
    pub fn is_on_right_side(&self) -> bool {
        self.signed_side < 0.0
    }

    /// Returns `true` if a point lies exactly on the line through the edge.
    #[inline]
    pub fn is_on_line(self) -> bool {
        self.signed_side.abs() == 0.0
    }
}

fn to_robust_coord(point: Point2) -> robust::Coord<f64> {
    robust::Coord {
        x: point.x,
        y: point.y,
    }
}

/// Exact orientation of `query_point` relative to the directed edge `from -> to`.
pub fn side_query(from: Point2, to: Point2, query_point: Point2) -> EdgeSide {
    let result = robust::orient2d(
        to_robust_coord(from),
        to_robust_coord(to),
        to_robust_coord(query_point),
    );
    EdgeSide::from_determinant(result)
}

/// Angle based legality test for the diagonal `edge_from -> edge_to` of a quad.
///
/// `opposite` lies on the left of the diagonal, `inserted` on its right. The diagonal is
/// judged by the two quad corners it does not touch:
///  - both corner angles at most 90°: the diagonal is kept
///  - both corner angles above 90°: the diagonal is kept as well
///  - otherwise it is flipped if the corner angles add up to more than 180°, which is
///    evaluated as `sin(a + b) < 0`.
///
/// Note that the second case deliberately does not flip, even though two obtuse corners
/// always add up to more than 180°.
pub fn should_flip(
    edge_from: Point2,
    edge_to: Point2,
    opposite: Point2,
    inserted: Point2,
) -> bool {
    let from_opposite = edge_from.sub(opposite);
    let to_opposite = edge_to.sub(opposite);
    let from_inserted = edge_from.sub(inserted);
    let to_inserted = edge_to.sub(inserted);

    let cos_a = from_opposite.dot(to_opposite);
    let cos_b = to_inserted.dot(from_inserted);

    if (cos_a >= 0.0) == (cos_b >= 0.0) {
        return false;
    }

    let sin_a = from_opposite.cross(to_opposite);
    let sin_b = to_inserted.cross(from_inserted);
    sin_a * cos_b + sin_b * cos_a < 0.0
}

/// Returns `true` if `p` lies strictly within the circumcircle of the counterclockwise
/// triangle `v1, v2, v3`.
pub fn contained_in_circumference(
    v1: Point2,
    v2: Point2,
    v3: Point2,
    p: Point2,
) -> bool {
    let v1 = to_robust_coord(v1);
    let v2 = to_robust_coord(v2);
    let v3 = to_robust_coord(v3);
    let p = to_robust_coord(p);

    // incircle expects all vertices to be ordered CW for right handed systems.
    robust::incircle(v3, v2, v1, p) < 0.0
}

#[cfg(test)]
mod test {
    use super::{contained_in_circumference, should_flip, side_query};
    use crate::Point2;

    #[test]
    fn test_edge_side() {
        let p1 = Point2::new(0.0, 0.0);
        let p2 = Point2::new(1.0, 1.0);

        assert!(side_query(p1, p2, Point2::new(1.0, 0.0)).is_on_right_side());
        assert!(side_query(p1, p2, Point2::new(0.0, 1.0)).is_on_left_side());
        assert!(side_query(p1, p2, Point2::new(0.5, 0.5)).is_on_line());
        assert!(!side_query(p1, p2, Point2::new(0.5, 0.5)).is_on_right_side());
    }

    // All quads share the diagonal (-1, 0) -> (1, 0). The opposite vertex lies at (0, h),
    // the inserted vertex at (0, -k).
    fn quad_should_flip(h: f64, k: f64) -> bool {
        should_flip(
            Point2::new(-1.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, h),
            Point2::new(0.0, -k),
        )
    }

    #[test]
    fn test_acute_corners_are_kept() {
        // Both corner angles are ~53°
        assert!(!quad_should_flip(2.0, 2.0));
        // Cocircular: both corners are right angles
        assert!(!quad_should_flip(1.0, 1.0));
    }

    #[test]
    fn test_mixed_corners() {
        // 126.9° + 90°: the inserted vertex lies within the circumcircle
        assert!(quad_should_flip(0.5, 1.0));
        assert!(quad_should_flip(1.0, 0.5));
        // 126.9° + 36.9°: legal
        assert!(!quad_should_flip(0.5, 3.0));
        // 126.9° + 53.1°: cocircular, no flip
        assert!(!quad_should_flip(0.5, 2.0));
    }

    #[test]
    fn test_obtuse_pair_is_kept() {
        // Both corners are 126.9°. A textbook Delaunay test would flip here.
        assert!(!quad_should_flip(0.5, 0.5));
        assert!(contained_in_circumference(
            Point2::new(-1.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 0.5),
            Point2::new(0.0, -0.5),
        ));
    }

    #[test]
    fn test_contained_in_circumference() {
        let v1 = Point2::new(-1.0, 0.0);
        let v2 = Point2::new(1.0, 0.0);
        let v3 = Point2::new(0.0, 1.0);
        assert!(contained_in_circumference(v1, v2, v3, Point2::new(0.0, -0.5)));
        assert!(!contained_in_circumference(v1, v2, v3, Point2::new(0.0, -2.0)));
        // On the circle
        assert!(!contained_in_circumference(v1, v2, v3, Point2::new(0.0, -1.0)));
    }
}
