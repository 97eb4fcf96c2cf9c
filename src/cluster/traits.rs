//! Clustering traits.

use super::kmedoids::KMedoids;
use crate::distance::{Distance, Scalar};
use crate::error::{Error, Result};
use crate::parallelism::Parallelism;
use ndarray::Array2;

/// Trait for clustering algorithms.
pub trait Clustering {
    /// Fit the model to data and return cluster assignments.
    ///
    /// Returns a vector of cluster labels, one per input point.
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>>;

    /// Get the number of clusters.
    fn n_clusters(&self) -> usize;
}

/// Pack equal-length rows into a dense matrix.
pub fn rows_to_array<T: Scalar>(data: &[Vec<T>]) -> Result<Array2<T>> {
    if data.is_empty() {
        return Err(Error::EmptyInput);
    }

    let n = data.len();
    let d = data[0].len();
    let mut flat: Vec<T> = Vec::with_capacity(n * d);
    for point in data {
        if point.len() != d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: point.len(),
            });
        }
        flat.extend_from_slice(point);
    }
    Array2::from_shape_vec((n, d), flat).map_err(|e| Error::Other(e.to_string()))
}

/// Fits a private copy of the engine, so repeated calls are independent and
/// the receiver's retained result is untouched. Uses the counts set by
/// [`KMedoids::with_clusters`].
impl<P, D> Clustering for KMedoids<f32, P, D>
where
    P: Parallelism,
    D: Distance<f32> + Clone,
{
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        let data = rows_to_array(data)?;
        let (n_clusters, n_repeats) = self.configured_counts();

        let mut engine = self.clone();
        engine.reset();
        engine.fit(&data, n_clusters, n_repeats)?;
        if !engine.has_result() {
            return Err(Error::NotFitted);
        }
        Ok(engine.results().labels().to_vec())
    }

    fn n_clusters(&self) -> usize {
        self.configured_counts().0
    }
}
