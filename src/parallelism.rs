//! Execution policies for the distance loop nest.
//!
//! A policy is chosen at compile time as a type parameter, never per call.
//! Every policy runs the same per-row kernel, so for a deterministic metric
//! they all produce bit-identical matrices.
//!
//! | Policy | Local behavior | Across processes |
//! |--------|----------------|------------------|
//! | [`Serial`] | one thread, row by row | - |
//! | [`Threaded`] | rows split across the rayon pool | - |
//! | [`Distributed`] | same as [`Serial`] | caller partitions rows |
//! | [`Hybrid`] | same as [`Threaded`] | caller partitions rows |
//!
//! For the distributed policies the row partitioning and result gathering
//! live above this crate; see [`crate::calculator::row_partition`],
//! [`crate::calculator::DistanceCalculator::distance_block`] and
//! [`crate::calculator::assemble_blocks`].
//!
//! `Threaded` and `Hybrid` require the `parallel` feature.

use crate::distance::Scalar;
use ndarray::{ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2, Zip};
use std::fmt::Debug;

/// A closed set of execution strategies for row-parallel loops.
pub trait Parallelism: Debug + Default + Clone + Copy + Send + Sync + 'static {
    /// Policy name used in log events.
    const NAME: &'static str;

    /// Whether rows are processed concurrently.
    const CONCURRENT: bool;

    /// Run `kernel(i, src_row_i, out_row_i)` for every row `i`.
    ///
    /// `out` and `src` must have the same number of rows. Each invocation
    /// writes only its own output row.
    fn fill_rows<T, F>(out: ArrayViewMut2<'_, T>, src: ArrayView2<'_, T>, kernel: F)
    where
        T: Scalar,
        F: Fn(usize, ArrayView1<'_, T>, ArrayViewMut1<'_, T>) + Send + Sync;

    /// Sum of every row, each summed left to right.
    fn row_sums<T: Scalar>(mat: ArrayView2<'_, T>) -> Vec<T>;
}

#[inline]
fn sum_row<T: Scalar>(row: ArrayView1<'_, T>) -> T {
    row.iter().fold(T::zero(), |acc, &x| acc + x)
}

/// Single-threaded nested loops.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Serial;

impl Parallelism for Serial {
    const NAME: &'static str = "serial";
    const CONCURRENT: bool = false;

    fn fill_rows<T, F>(mut out: ArrayViewMut2<'_, T>, src: ArrayView2<'_, T>, kernel: F)
    where
        T: Scalar,
        F: Fn(usize, ArrayView1<'_, T>, ArrayViewMut1<'_, T>) + Send + Sync,
    {
        Zip::indexed(out.rows_mut())
            .and(src.rows())
            .for_each(|i, out_row, src_row| kernel(i, src_row, out_row));
    }

    fn row_sums<T: Scalar>(mat: ArrayView2<'_, T>) -> Vec<T> {
        mat.rows().into_iter().map(sum_row).collect()
    }
}

/// Placeholder for process-level distribution: runs the serial path on
/// whatever rows the local process owns.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Distributed;

impl Parallelism for Distributed {
    const NAME: &'static str = "distributed";
    const CONCURRENT: bool = false;

    fn fill_rows<T, F>(out: ArrayViewMut2<'_, T>, src: ArrayView2<'_, T>, kernel: F)
    where
        T: Scalar,
        F: Fn(usize, ArrayView1<'_, T>, ArrayViewMut1<'_, T>) + Send + Sync,
    {
        Serial::fill_rows(out, src, kernel);
    }

    fn row_sums<T: Scalar>(mat: ArrayView2<'_, T>) -> Vec<T> {
        Serial::row_sums(mat)
    }
}

/// Shared-memory parallelism: rows are split statically across the rayon
/// pool. Workers write disjoint rows, so the output needs no locking; the
/// call returns only after every worker has joined.
#[cfg(feature = "parallel")]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Threaded;

#[cfg(feature = "parallel")]
impl Parallelism for Threaded {
    const NAME: &'static str = "threaded";
    const CONCURRENT: bool = true;

    fn fill_rows<T, F>(mut out: ArrayViewMut2<'_, T>, src: ArrayView2<'_, T>, kernel: F)
    where
        T: Scalar,
        F: Fn(usize, ArrayView1<'_, T>, ArrayViewMut1<'_, T>) + Send + Sync,
    {
        Zip::indexed(out.rows_mut())
            .and(src.rows())
            .par_for_each(|i, out_row, src_row| kernel(i, src_row, out_row));
    }

    fn row_sums<T: Scalar>(mat: ArrayView2<'_, T>) -> Vec<T> {
        let mut sums = ndarray::Array1::<T>::zeros(mat.nrows());
        Zip::from(&mut sums)
            .and(mat.rows())
            .par_for_each(|sum, row| *sum = sum_row(row));
        sums.to_vec()
    }
}

/// Shared-memory parallelism inside one process of a distributed run.
#[cfg(feature = "parallel")]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Hybrid;

#[cfg(feature = "parallel")]
impl Parallelism for Hybrid {
    const NAME: &'static str = "hybrid";
    const CONCURRENT: bool = true;

    fn fill_rows<T, F>(out: ArrayViewMut2<'_, T>, src: ArrayView2<'_, T>, kernel: F)
    where
        T: Scalar,
        F: Fn(usize, ArrayView1<'_, T>, ArrayViewMut1<'_, T>) + Send + Sync,
    {
        Threaded::fill_rows(out, src, kernel);
    }

    fn row_sums<T: Scalar>(mat: ArrayView2<'_, T>) -> Vec<T> {
        Threaded::row_sums(mat)
    }
}
