//! Swap phase: local search over medoid replacements.
//!
//! A swap replaces the medoid in one slot with a non-medoid row. Its cost is
//! evaluated in O(n) from each point's nearest and second-nearest medoid
//! distances (see [`Clusters::swap_cost`]), and it is committed only when it
//! strictly lowers the total cost. The cost therefore never increases, and
//! the search stops at a local optimum or after `max_iter` passes.
//!
//! | Name | Per pass |
//! |------|----------|
//! | `pam` | evaluate all k(n-k) swaps, commit the best one |
//! | `greedy` | commit each improving swap as soon as it is found |
//!
//! `greedy` usually needs fewer full passes; `pam` follows the steepest path.
//! Neither is guaranteed to find the global optimum.

use super::clusters::Clusters;
use super::distance_matrix::DistanceMatrix;
use crate::distance::Scalar;
use crate::error::{Error, Result};
use ndarray::ArrayView2;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Default cap on swap passes.
pub const DEFAULT_MAX_ITER: usize = 100;

/// Refines a clustering in place.
///
/// Implementations must never increase `clusters.cost()`, must keep the
/// assignment/cost invariant after every committed swap, and must not
/// modify `data` or `dist`.
pub trait Maximizer<T: Scalar>: fmt::Debug + Send + Sync {
    /// Run the local search.
    fn maximize(
        &self,
        data: ArrayView2<'_, T>,
        clusters: &mut Clusters<T>,
        dist: &DistanceMatrix<T>,
    ) -> Result<SwapStats>;

    /// Strategy name.
    fn name(&self) -> &'static str;
}

/// Work done by one local search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapStats {
    /// Passes over the candidate swaps.
    pub iterations: usize,
    /// Committed swaps.
    pub swaps: usize,
    /// Candidate swaps whose cost was evaluated.
    pub evaluated: u64,
    /// Whether the search ended at a local optimum rather than the cap.
    pub converged: bool,
}

fn check_ready<T: Scalar>(
    data: ArrayView2<'_, T>,
    clusters: &Clusters<T>,
    dist: &DistanceMatrix<T>,
) -> Result<()> {
    if clusters.is_empty() {
        return Err(Error::InvalidParameter {
            name: "clusters",
            message: "local search needs an initialized clustering",
        });
    }
    let n = data.nrows();
    if dist.len() != n || clusters.n_points() != n {
        return Err(Error::shape((n, n), (dist.len(), clusters.n_points())));
    }
    Ok(())
}

/// Best-improvement swap search (classic PAM SWAP).
#[derive(Debug, Clone, Copy)]
pub struct PamSwap {
    max_iter: usize,
}

impl Default for PamSwap {
    fn default() -> Self {
        Self::new()
    }
}

impl PamSwap {
    /// Create with the default iteration cap.
    pub fn new() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
        }
    }

    /// Set maximum passes.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }
}

impl<T: Scalar> Maximizer<T> for PamSwap {
    fn maximize(
        &self,
        data: ArrayView2<'_, T>,
        clusters: &mut Clusters<T>,
        dist: &DistanceMatrix<T>,
    ) -> Result<SwapStats> {
        check_ready(data, clusters, dist)?;
        let n = dist.len();
        let k = clusters.medoids().len();
        let mut stats = SwapStats::default();

        for _ in 0..self.max_iter {
            stats.iterations += 1;
            let mut best_cost = clusters.cost();
            let mut best_move = None;

            for slot in 0..k {
                for candidate in 0..n {
                    if clusters.selected().contains(candidate) {
                        continue;
                    }
                    stats.evaluated += 1;
                    let cost = clusters.swap_cost(dist, slot, candidate);
                    if cost < best_cost {
                        best_cost = cost;
                        best_move = Some((slot, candidate));
                    }
                }
            }

            let Some((slot, candidate)) = best_move else {
                stats.converged = true;
                break;
            };
            let before = clusters.cost();
            clusters.swap(dist, slot, candidate)?;
            stats.swaps += 1;
            trace!(slot, candidate, before = ?before, after = ?clusters.cost(), "pam swap");
        }

        debug!(
            iterations = stats.iterations,
            swaps = stats.swaps,
            evaluated = stats.evaluated,
            converged = stats.converged,
            cost = ?clusters.cost(),
            "pam local search finished"
        );
        Ok(stats)
    }

    fn name(&self) -> &'static str {
        "pam"
    }
}

/// First-improvement swap search.
#[derive(Debug, Clone, Copy)]
pub struct GreedySwap {
    max_iter: usize,
}

impl Default for GreedySwap {
    fn default() -> Self {
        Self::new()
    }
}

impl GreedySwap {
    /// Create with the default iteration cap.
    pub fn new() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
        }
    }

    /// Set maximum passes.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }
}

impl<T: Scalar> Maximizer<T> for GreedySwap {
    fn maximize(
        &self,
        data: ArrayView2<'_, T>,
        clusters: &mut Clusters<T>,
        dist: &DistanceMatrix<T>,
    ) -> Result<SwapStats> {
        check_ready(data, clusters, dist)?;
        let n = dist.len();
        let k = clusters.medoids().len();
        let mut stats = SwapStats::default();

        for _ in 0..self.max_iter {
            stats.iterations += 1;
            let mut improved = false;

            for slot in 0..k {
                for candidate in 0..n {
                    if clusters.selected().contains(candidate) {
                        continue;
                    }
                    stats.evaluated += 1;
                    let before = clusters.cost();
                    if clusters.swap_cost(dist, slot, candidate) < before {
                        clusters.swap(dist, slot, candidate)?;
                        stats.swaps += 1;
                        improved = true;
                        trace!(slot, candidate, before = ?before, after = ?clusters.cost(), "greedy swap");
                    }
                }
            }

            if !improved {
                stats.converged = true;
                break;
            }
        }

        debug!(
            iterations = stats.iterations,
            swaps = stats.swaps,
            evaluated = stats.evaluated,
            converged = stats.converged,
            cost = ?clusters.cost(),
            "greedy local search finished"
        );
        Ok(stats)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// The closed set of built-in maximizers, selectable by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MaximizerKind {
    /// [`PamSwap`].
    #[default]
    Pam,
    /// [`GreedySwap`].
    Greedy,
}

impl MaximizerKind {
    /// Every built-in maximizer.
    pub const ALL: [MaximizerKind; 2] = [Self::Pam, Self::Greedy];

    /// Name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Pam => "pam",
            Self::Greedy => "greedy",
        }
    }

    /// Create the strategy object with an iteration cap.
    pub fn instantiate<T: Scalar>(self, max_iter: usize) -> Box<dyn Maximizer<T>> {
        match self {
            Self::Pam => Box::new(PamSwap::new().with_max_iter(max_iter)),
            Self::Greedy => Box::new(GreedySwap::new().with_max_iter(max_iter)),
        }
    }
}

impl FromStr for MaximizerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownStrategy {
                kind: "maximizer",
                name: s.to_string(),
            })
    }
}

impl fmt::Display for MaximizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::DistanceCalculator;
    use crate::cluster::initializer::{Initializer, RandomInitializer};
    use crate::distance::L2Norm;
    use crate::parallelism::Serial;
    use ndarray::{array, Array2};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup(data: &Array2<f64>) -> DistanceMatrix<f64> {
        let calc = DistanceCalculator::<f64, Serial, L2Norm>::default();
        DistanceMatrix::build(&calc, data.view())
    }

    fn with_medoids(n: usize, medoids: &[usize], dist: &DistanceMatrix<f64>) -> Clusters<f64> {
        let mut clusters = Clusters::new(n, medoids.len());
        for &m in medoids {
            clusters.selected_mut().insert(m);
        }
        clusters.assign_all(dist).unwrap();
        clusters
    }

    fn blobs() -> Array2<f64> {
        // Three groups of five around (0,0), (10,0), (0,10).
        let centers = [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)];
        Array2::from_shape_fn((15, 2), |(i, j)| {
            let (cx, cy) = centers[i / 5];
            let jitter = ((i % 5) as f64 - 2.0) * 0.3;
            if j == 0 {
                cx + jitter
            } else {
                cy - jitter * 0.5
            }
        })
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("pam".parse::<MaximizerKind>(), Ok(MaximizerKind::Pam));
        assert_eq!("Greedy".parse::<MaximizerKind>(), Ok(MaximizerKind::Greedy));
        assert!(matches!(
            "clarans".parse::<MaximizerKind>(),
            Err(Error::UnknownStrategy { kind: "maximizer", .. })
        ));
        for kind in MaximizerKind::ALL {
            assert_eq!(kind.instantiate::<f64>(5).name(), kind.name());
        }
    }

    #[test]
    fn test_swap_fixes_bad_start() {
        let data = array![[0.0], [1.0], [10.0], [11.0]];
        let dist = setup(&data);

        for kind in MaximizerKind::ALL {
            let mut clusters = with_medoids(4, &[0, 1], &dist);
            let stats = kind
                .instantiate::<f64>(DEFAULT_MAX_ITER)
                .maximize(data.view(), &mut clusters, &dist)
                .unwrap();

            assert_eq!(clusters.cost(), 2.0, "{kind}");
            assert!(stats.converged);
            assert!(stats.swaps >= 1);
            let labels = clusters.labels();
            assert_eq!(labels[0], labels[1]);
            assert_eq!(labels[2], labels[3]);
            assert_ne!(labels[0], labels[2]);
        }
    }

    #[test]
    fn test_local_optimum_is_left_alone() {
        let data = array![[0.0], [1.0], [10.0], [11.0]];
        let dist = setup(&data);
        let mut clusters = with_medoids(4, &[0, 3], &dist);
        let stats = PamSwap::new()
            .maximize(data.view(), &mut clusters, &dist)
            .unwrap();
        assert_eq!(stats.swaps, 0);
        assert_eq!(stats.iterations, 1);
        assert_eq!(clusters.medoids(), &[0, 3]);
    }

    #[test]
    fn test_cost_never_increases_from_random_starts() {
        let data = blobs();
        let dist = setup(&data);

        for seed in 0..10 {
            for kind in MaximizerKind::ALL {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let mut clusters = Clusters::new(15, 3);
                RandomInitializer
                    .initialize(data.view(), &mut clusters, &dist, &mut rng)
                    .unwrap();
                let before = clusters.cost();

                kind.instantiate::<f64>(DEFAULT_MAX_ITER)
                    .maximize(data.view(), &mut clusters, &dist)
                    .unwrap();
                assert!(clusters.cost() <= before);

                let recomputed: f64 = clusters
                    .assignments()
                    .iter()
                    .enumerate()
                    .map(|(i, &slot)| dist.get(i, clusters.medoids()[slot]))
                    .sum();
                assert_eq!(clusters.cost(), recomputed);
            }
        }
    }

    #[test]
    fn test_pam_recovers_blobs() {
        let data = blobs();
        let dist = setup(&data);
        let mut clusters = with_medoids(15, &[0, 1, 2], &dist);
        PamSwap::new()
            .maximize(data.view(), &mut clusters, &dist)
            .unwrap();

        let labels = clusters.labels();
        for group in 0..3 {
            let first = labels[group * 5];
            assert!(labels[group * 5..group * 5 + 5].iter().all(|&l| l == first));
        }
        assert_eq!(clusters.cluster_sizes(), vec![5, 5, 5]);
    }

    #[test]
    fn test_iteration_cap() {
        let data = blobs();
        let dist = setup(&data);
        let mut clusters = with_medoids(15, &[0, 1, 2], &dist);
        let stats = PamSwap::new()
            .with_max_iter(1)
            .maximize(data.view(), &mut clusters, &dist)
            .unwrap();
        assert_eq!(stats.iterations, 1);
        assert_eq!(stats.swaps, 1);
        assert!(!stats.converged);

        let mut clusters = with_medoids(15, &[0, 1, 2], &dist);
        let before = clusters.cost();
        let stats = GreedySwap::new()
            .with_max_iter(0)
            .maximize(data.view(), &mut clusters, &dist)
            .unwrap();
        assert_eq!(stats, SwapStats::default());
        assert_eq!(clusters.cost(), before);
    }

    #[test]
    fn test_uninitialized_clusters_rejected() {
        let data = blobs();
        let dist = setup(&data);
        let mut clusters = Clusters::new(15, 3);
        assert!(GreedySwap::new()
            .maximize(data.view(), &mut clusters, &dist)
            .is_err());
    }

    #[test]
    fn test_k_equals_n_has_nothing_to_swap() {
        let data = array![[0.0], [5.0]];
        let dist = setup(&data);
        let mut clusters = with_medoids(2, &[0, 1], &dist);
        let stats = PamSwap::new()
            .maximize(data.view(), &mut clusters, &dist)
            .unwrap();
        assert_eq!(stats.evaluated, 0);
        assert_eq!(clusters.cost(), 0.0);
    }
}
