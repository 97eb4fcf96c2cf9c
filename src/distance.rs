//! Distance functions between observations.
//!
//! A [`Distance`] maps two equal-length rows to a single non-negative scalar.
//! Everything downstream (distance matrices, medoid costs, swap evaluation)
//! assumes the metric is:
//!
//! - **deterministic**: the same pair always yields the same bits, which is
//!   what lets every execution policy produce identical matrices;
//! - **non-negative**, with `d(x, x) = 0`;
//! - **symmetric**, unless [`Distance::is_symmetric`] says otherwise. Pairwise
//!   matrices only evaluate the upper triangle for symmetric metrics.
//!
//! NaN or negative outputs are not checked and propagate into cost
//! comparisons.
//!
//! | Metric | Formula |
//! |--------|---------|
//! | [`L1Norm`] | Σ \|aᵢ - bᵢ\| |
//! | [`L2Norm`] | sqrt(Σ (aᵢ - bᵢ)²) |

use ndarray::ArrayView1;
use num_traits::Float;
use std::fmt::Debug;

/// Element type of datasets and distance matrices (`f32`, `f64`).
pub trait Scalar: Float + Send + Sync + Debug + 'static {}

impl<T> Scalar for T where T: Float + Send + Sync + Debug + 'static {}

/// A distance between two observations.
///
/// Implementations are invoked concurrently from worker threads on disjoint
/// rows, hence the `Send + Sync` bound.
pub trait Distance<T: Scalar>: Send + Sync {
    /// Compute the distance between `a` and `b`.
    fn distance(&self, a: ArrayView1<'_, T>, b: ArrayView1<'_, T>) -> T;

    /// Whether `distance(a, b) == distance(b, a)` for all inputs.
    fn is_symmetric(&self) -> bool {
        true
    }
}

/// Manhattan distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct L1Norm;

impl<T: Scalar> Distance<T> for L1Norm {
    #[inline]
    fn distance(&self, a: ArrayView1<'_, T>, b: ArrayView1<'_, T>) -> T {
        a.iter()
            .zip(b.iter())
            .fold(T::zero(), |acc, (&x, &y)| acc + (x - y).abs())
    }
}

/// Euclidean distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct L2Norm;

impl<T: Scalar> Distance<T> for L2Norm {
    #[inline]
    fn distance(&self, a: ArrayView1<'_, T>, b: ArrayView1<'_, T>) -> T {
        a.iter()
            .zip(b.iter())
            .fold(T::zero(), |acc, (&x, &y)| {
                let diff = x - y;
                acc + diff * diff
            })
            .sqrt()
    }
}
