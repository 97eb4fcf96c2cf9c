//! Build phase: choosing a starting medoid set.
//!
//! | Name | Strategy | Randomized |
//! |------|----------|------------|
//! | `random` | k rows sampled uniformly without replacement | yes |
//! | `build` | PAM BUILD: most central row, then greedy cost reduction | first pick only |
//! | `first` | rows `0..k` | no |
//!
//! ## PAM BUILD
//!
//! The first medoid is the row with the smallest total distance to all
//! others (ties drawn at random). Each further medoid is the row that lowers
//! the total cost the most:
//!
//! ```text
//! m_next = argmin_c Σᵢ min(D(i, nearest medoid), D(i, c))
//! ```
//!
//! O(k n²) distance lookups; no metric evaluations, since the distance
//! matrix is already built.

use super::clusters::Clusters;
use super::distance_matrix::DistanceMatrix;
use crate::distance::Scalar;
use crate::error::{Error, Result};
use ndarray::ArrayView2;
use rand::{Rng, RngCore};
use std::fmt;
use std::str::FromStr;

/// Produces a starting clustering.
///
/// Implementations select exactly `clusters.n_clusters()` distinct rows,
/// then assign every point (see [`Clusters::assign_all`]). Randomized
/// strategies must draw only from `rng`, so that a seeded run is
/// reproducible and separate trials get separate starting points.
pub trait Initializer<T: Scalar>: fmt::Debug + Send + Sync {
    /// Fill `clusters` with an initial medoid set and assignments.
    fn initialize(
        &self,
        data: ArrayView2<'_, T>,
        clusters: &mut Clusters<T>,
        dist: &DistanceMatrix<T>,
        rng: &mut dyn RngCore,
    ) -> Result<()>;

    /// Strategy name.
    fn name(&self) -> &'static str;
}

/// Check the request and clear any previous selection. Returns k.
fn prepare<T: Scalar>(
    data: ArrayView2<'_, T>,
    clusters: &mut Clusters<T>,
    dist: &DistanceMatrix<T>,
) -> Result<usize> {
    let n = data.nrows();
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    if dist.len() != n {
        return Err(Error::shape((n, n), (dist.len(), dist.len())));
    }
    if clusters.n_points() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: clusters.n_points(),
        });
    }

    let k = clusters.n_clusters();
    if k == 0 || k > n {
        return Err(Error::InvalidClusterCount {
            requested: k,
            n_items: n,
        });
    }

    clusters.selected_mut().clear();
    Ok(k)
}

/// Uniform random medoids.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomInitializer;

impl<T: Scalar> Initializer<T> for RandomInitializer {
    fn initialize(
        &self,
        data: ArrayView2<'_, T>,
        clusters: &mut Clusters<T>,
        dist: &DistanceMatrix<T>,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        let k = prepare(data, clusters, dist)?;
        for index in rand::seq::index::sample(rng, data.nrows(), k) {
            clusters.selected_mut().insert(index);
        }
        clusters.assign_all(dist)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// PAM BUILD.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildInitializer;

impl<T: Scalar> Initializer<T> for BuildInitializer {
    fn initialize(
        &self,
        data: ArrayView2<'_, T>,
        clusters: &mut Clusters<T>,
        dist: &DistanceMatrix<T>,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        prepare(data, clusters, dist)?;
        let n = dist.len();

        // Most central row; random among exact ties.
        let sums = dist.row_sums();
        let min_sum = sums.iter().copied().fold(T::infinity(), T::min);
        let central: Vec<usize> = (0..n).filter(|&i| sums[i] == min_sum).collect();
        let first = match central.len() {
            // Only reachable when every sum is NaN.
            0 => 0,
            1 => central[0],
            len => central[rng.random_range(0..len)],
        };
        clusters.selected_mut().insert(first);

        // nearest[i] = distance from i to its closest chosen medoid
        let mut nearest: Vec<T> = (0..n).map(|i| dist.get(i, first)).collect();

        while !clusters.selected().is_full() {
            let mut best: Option<(usize, T)> = None;

            for c in 0..n {
                if clusters.selected().contains(c) {
                    continue;
                }
                let total = nearest
                    .iter()
                    .enumerate()
                    .fold(T::zero(), |acc, (i, &d)| acc + d.min(dist.get(i, c)));
                let better = match best {
                    None => true,
                    Some((_, best_total)) => total < best_total,
                };
                if better {
                    best = Some((c, total));
                }
            }

            let Some((chosen, _)) = best else {
                return Err(Error::InvalidClusterCount {
                    requested: clusters.n_clusters(),
                    n_items: n,
                });
            };
            clusters.selected_mut().insert(chosen);
            for (i, d) in nearest.iter_mut().enumerate() {
                *d = d.min(dist.get(i, chosen));
            }
        }

        clusters.assign_all(dist)
    }

    fn name(&self) -> &'static str {
        "build"
    }
}

/// The first k rows. Deterministic; mostly useful for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstRowsInitializer;

impl<T: Scalar> Initializer<T> for FirstRowsInitializer {
    fn initialize(
        &self,
        data: ArrayView2<'_, T>,
        clusters: &mut Clusters<T>,
        dist: &DistanceMatrix<T>,
        _rng: &mut dyn RngCore,
    ) -> Result<()> {
        let k = prepare(data, clusters, dist)?;
        for index in 0..k {
            clusters.selected_mut().insert(index);
        }
        clusters.assign_all(dist)
    }

    fn name(&self) -> &'static str {
        "first"
    }
}

/// The closed set of built-in initializers, selectable by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InitializerKind {
    /// [`RandomInitializer`].
    Random,
    /// [`BuildInitializer`].
    #[default]
    Build,
    /// [`FirstRowsInitializer`].
    First,
}

impl InitializerKind {
    /// Every built-in initializer.
    pub const ALL: [InitializerKind; 3] = [Self::Random, Self::Build, Self::First];

    /// Name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Build => "build",
            Self::First => "first",
        }
    }

    /// Create the strategy object.
    pub fn instantiate<T: Scalar>(self) -> Box<dyn Initializer<T>> {
        match self {
            Self::Random => Box::new(RandomInitializer),
            Self::Build => Box::new(BuildInitializer),
            Self::First => Box::new(FirstRowsInitializer),
        }
    }
}

impl FromStr for InitializerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownStrategy {
                kind: "initializer",
                name: s.to_string(),
            })
    }
}

impl fmt::Display for InitializerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
