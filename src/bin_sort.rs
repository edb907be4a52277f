use crate::Point2;

/// The result of sorting points into a serpentine grid of bins.
#[derive(Debug, Clone, PartialEq)]
pub struct BinSortResult {
    /// Number of bins per axis.
    pub bins_per_axis: usize,
    /// `permutation[new_index]` is the index the point had before sorting.
    pub permutation: Vec<usize>,
}

impl BinSortResult {
    /// Returns `inverse[old_index] = new_index`.
    pub fn inverse_permutation(&self) -> Vec<usize> {
        let mut inverse = vec![0; self.permutation.len()];
        for (new_index, &old_index) in self.permutation.iter().enumerate() {
            inverse[old_index] = new_index;
        }
        inverse
    }
}

/// Reorders normalized points so that consecutive points tend to be spatially close.
///
/// The unit square is divided into `ndiv × ndiv` bins with `ndiv = floor(N^0.25)`. Bins are
/// numbered row by row, alternating the direction of each row, so that consecutive bin ids are
/// always adjacent. Points are then sorted by bin id.
///
/// The sort is stable: points within the same bin keep their relative order.
///
/// Expects all coordinates to lie within `[0, 1]`. Points outside of this range are assigned
/// to the nearest border bin.
pub fn bin_sort(points: &mut Vec<Point2>) -> BinSortResult {
    let bins_per_axis = (points.len() as f64).powf(0.25) as usize;
    let scale = bins_per_axis as f64 * 0.99;

    let mut keyed: Vec<(usize, usize)> = points
        .iter()
        .enumerate()
        .map(|(index, point)| (bin_id(*point, bins_per_axis, scale), index))
        .collect();
    keyed.sort_by_key(|&(bin, _)| bin);

    let permutation: Vec<usize> = keyed.into_iter().map(|(_, index)| index).collect();
    let sorted = permutation.iter().map(|&index| points[index]).collect();
    *points = sorted;

    BinSortResult {
        bins_per_axis,
        permutation,
    }
}

fn bin_id(point: Point2, bins_per_axis: usize, scale: f64) -> usize {
    let last = bins_per_axis.saturating_sub(1);
    let row = ((point.y * scale) as usize).min(last);
    let column = ((point.x * scale) as usize).min(last);
    if row & 1 == 1 {
        row * bins_per_axis + column + 1
    } else {
        (row + 1) * bins_per_axis - column
    }
}
