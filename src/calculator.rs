//! Pairwise distance computation under a compile-time execution policy.
//!
//! ```text
//! D[i][j] = d(a_i, b_j)      shape |a| x |b|
//! ```
//!
//! The calculator owns the metric; the policy type parameter decides how the
//! outer loop over rows of `a` is scheduled. Each output row is produced by a
//! single kernel invocation, so results never depend on the policy.
//!
//! For distributed runs, a caller computes its share of rows with
//! [`row_partition`] and [`DistanceCalculator::distance_block`], then
//! stitches the gathered blocks back together with [`assemble_blocks`].

use crate::distance::{Distance, L1Norm, Scalar};
use crate::error::{Error, Result};
use crate::parallelism::{Parallelism, Serial};
use ndarray::{concatenate, s, Array2, ArrayView2, ArrayViewMut2, Axis};
use std::marker::PhantomData;
use std::ops::Range;

/// Computes distance matrices with metric `D` under policy `P`.
#[derive(Debug, Clone)]
pub struct DistanceCalculator<T, P = Serial, D = L1Norm> {
    metric: D,
    _marker: PhantomData<fn() -> (T, P)>,
}

impl<T: Scalar, P: Parallelism, D: Distance<T> + Default> Default for DistanceCalculator<T, P, D> {
    fn default() -> Self {
        Self::new(D::default())
    }
}

impl<T: Scalar, P: Parallelism, D: Distance<T>> DistanceCalculator<T, P, D> {
    /// Create a calculator around `metric`.
    pub fn new(metric: D) -> Self {
        Self {
            metric,
            _marker: PhantomData,
        }
    }

    /// The metric this calculator evaluates.
    pub fn metric(&self) -> &D {
        &self.metric
    }

    /// Allocate and fill the `|a| x |b|` distance matrix.
    ///
    /// Either set being empty yields a matrix with zero rows or columns.
    pub fn distance_matrix(&self, a: ArrayView2<'_, T>, b: ArrayView2<'_, T>) -> Result<Array2<T>> {
        let mut out = Array2::from_elem((a.nrows(), b.nrows()), T::max_value());
        self.distance_matrix_into(a, b, out.view_mut())?;
        Ok(out)
    }

    /// Fill a caller-provided `|a| x |b|` matrix.
    pub fn distance_matrix_into(
        &self,
        a: ArrayView2<'_, T>,
        b: ArrayView2<'_, T>,
        out: ArrayViewMut2<'_, T>,
    ) -> Result<()> {
        check_dims(&a, &b)?;
        if out.dim() != (a.nrows(), b.nrows()) {
            return Err(Error::shape((a.nrows(), b.nrows()), out.dim()));
        }

        let metric = &self.metric;
        P::fill_rows(out, a, |_, a_row, mut out_row| {
            for (j, cell) in out_row.iter_mut().enumerate() {
                *cell = metric.distance(a_row, b.row(j));
            }
        });
        Ok(())
    }

    /// Square distance matrix of `data` against itself.
    ///
    /// The diagonal is exactly zero. For symmetric metrics only the upper
    /// triangle is evaluated and mirrored; otherwise every off-diagonal entry
    /// is computed.
    pub fn pairwise(&self, data: ArrayView2<'_, T>) -> Array2<T> {
        let n = data.nrows();
        let mut out = Array2::<T>::zeros((n, n));
        let metric = &self.metric;

        if metric.is_symmetric() {
            P::fill_rows(out.view_mut(), data, |i, a_row, mut out_row| {
                for j in (i + 1)..n {
                    out_row[j] = metric.distance(a_row, data.row(j));
                }
            });
            for i in 1..n {
                for j in 0..i {
                    out[[i, j]] = out[[j, i]];
                }
            }
        } else {
            P::fill_rows(out.view_mut(), data, |i, a_row, mut out_row| {
                for j in (0..n).filter(|&j| j != i) {
                    out_row[j] = metric.distance(a_row, data.row(j));
                }
            });
        }

        out
    }

    /// Sum of each row of a distance matrix.
    ///
    /// Used to rank candidate medoids by total dissimilarity.
    pub fn distance_sums(&self, dist: ArrayView2<'_, T>) -> Vec<T> {
        P::row_sums(dist)
    }

    /// Rows `rows` of the `|a| x |b|` matrix, as one process of a
    /// distributed run would compute them.
    pub fn distance_block(
        &self,
        a: ArrayView2<'_, T>,
        b: ArrayView2<'_, T>,
        rows: Range<usize>,
    ) -> Result<Array2<T>> {
        if rows.start > rows.end || rows.end > a.nrows() {
            return Err(Error::InvalidParameter {
                name: "rows",
                message: "row range exceeds the first point set",
            });
        }
        self.distance_matrix(a.slice(s![rows, ..]), b)
    }
}

/// Contiguous static partition of `n_rows` rows into `n_parts` parts.
///
/// The first `n_rows % n_parts` parts receive one extra row.
pub fn row_partition(n_rows: usize, n_parts: usize, part: usize) -> Result<Range<usize>> {
    if n_parts == 0 {
        return Err(Error::InvalidParameter {
            name: "n_parts",
            message: "must be at least 1",
        });
    }
    if part >= n_parts {
        return Err(Error::InvalidParameter {
            name: "part",
            message: "must be less than n_parts",
        });
    }

    let base = n_rows / n_parts;
    let extra = n_rows % n_parts;
    let start = part * base + part.min(extra);
    let len = base + usize::from(part < extra);
    Ok(start..start + len)
}

/// Stack row blocks (in partition order) into one matrix.
pub fn assemble_blocks<T: Scalar>(blocks: &[Array2<T>]) -> Result<Array2<T>> {
    if blocks.is_empty() {
        return Ok(Array2::zeros((0, 0)));
    }
    let views: Vec<ArrayView2<'_, T>> = blocks.iter().map(|b| b.view()).collect();
    concatenate(Axis(0), &views).map_err(|e| Error::Other(e.to_string()))
}

fn check_dims<T>(a: &ArrayView2<'_, T>, b: &ArrayView2<'_, T>) -> Result<()> {
    if a.nrows() > 0 && b.nrows() > 0 && a.ncols() != b.ncols() {
        return Err(Error::DimensionMismatch {
            expected: a.ncols(),
            found: b.ncols(),
        });
    }
    Ok(())
}
