//! Cached pairwise dissimilarities shared by every trial of a fit.

use super::selected_set::SelectedSet;
use crate::calculator::DistanceCalculator;
use crate::distance::{Distance, Scalar};
use crate::error::{Error, Result};
use crate::parallelism::{Parallelism, Serial};
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

/// Square `n x n` matrix of point-to-point distances plus per-row sums.
///
/// Built once per fit and read-only afterwards: initializers and maximizers
/// look up data-to-medoid distances as the columns named by the current
/// [`SelectedSet`], so changing medoids never requires a rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix<T> {
    matrix: Array2<T>,
    row_sums: Vec<T>,
}

impl<T: Scalar> DistanceMatrix<T> {
    /// Compute all pairwise distances of `data` with `calculator`.
    pub fn build<P: Parallelism, D: Distance<T>>(
        calculator: &DistanceCalculator<T, P, D>,
        data: ArrayView2<'_, T>,
    ) -> Self {
        let matrix = calculator.pairwise(data);
        let row_sums = calculator.distance_sums(matrix.view());
        Self { matrix, row_sums }
    }

    /// Wrap a precomputed dissimilarity matrix.
    ///
    /// The matrix must be square; values are taken as given.
    pub fn from_array(matrix: Array2<T>) -> Result<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(Error::shape((rows, rows), (rows, cols)));
        }
        let row_sums = Serial::row_sums(matrix.view());
        Ok(Self { matrix, row_sums })
    }

    /// Distance from point `i` to point `j`.
    ///
    /// # Panics
    ///
    /// If either index is out of bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.matrix[[i, j]]
    }

    /// Distances from point `i` to every point.
    #[inline]
    pub fn row(&self, i: usize) -> ArrayView1<'_, T> {
        self.matrix.row(i)
    }

    /// Sum of distances from each point to all points.
    #[inline]
    pub fn row_sums(&self) -> &[T] {
        &self.row_sums
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.matrix.nrows()
    }

    /// Whether the matrix covers no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matrix.nrows() == 0
    }

    /// Borrow the underlying matrix.
    pub fn view(&self) -> ArrayView2<'_, T> {
        self.matrix.view()
    }

    /// The `n x k` data-to-medoid matrix for `selected`, columns in slot order.
    pub fn to_medoids(&self, selected: &SelectedSet) -> Array2<T> {
        self.matrix.select(Axis(1), selected.indices())
    }

    /// Unwrap into the raw matrix.
    pub fn into_inner(self) -> Array2<T> {
        self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::L1Norm;
    use ndarray::array;

    fn line() -> DistanceMatrix<f64> {
        let calc = DistanceCalculator::<f64, Serial, L1Norm>::default();
        DistanceMatrix::build(&calc, array![[0.0], [1.0], [10.0], [11.0]].view())
    }

    #[test]
    fn test_build() {
        let dist = line();
        assert_eq!(dist.len(), 4);
        assert_eq!(dist.get(1, 3), 10.0);
        assert_eq!(dist.row(2).to_vec(), vec![10.0, 9.0, 0.0, 1.0]);
        assert_eq!(dist.row_sums(), &[22.0, 20.0, 20.0, 22.0]);
    }

    #[test]
    fn test_to_medoids_follows_slot_order() {
        let dist = line();
        let mut selected = SelectedSet::with_capacity(2, 4);
        selected.insert(3);
        selected.insert(0);
        let rect = dist.to_medoids(&selected);
        assert_eq!(rect, array![[11.0, 0.0], [10.0, 1.0], [1.0, 10.0], [0.0, 11.0]]);
    }

    #[test]
    fn test_from_array_requires_square() {
        assert!(DistanceMatrix::from_array(Array2::<f32>::zeros((2, 3))).is_err());

        let dist = DistanceMatrix::from_array(array![[0.0, 2.0], [2.0, 0.0]]).unwrap();
        assert_eq!(dist.row_sums(), &[2.0, 2.0]);
        assert_eq!(dist.into_inner(), array![[0.0, 2.0], [2.0, 0.0]]);
    }

    #[test]
    fn test_empty() {
        let calc = DistanceCalculator::<f32, Serial, L1Norm>::default();
        let dist = DistanceMatrix::build(&calc, Array2::<f32>::zeros((0, 2)).view());
        assert!(dist.is_empty());
        assert!(dist.row_sums().is_empty());
    }
}
