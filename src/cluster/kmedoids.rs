//! K-medoids with repeated restarts.
//!
//! Like k-means, k-medoids partitions n points into k clusters, but every
//! cluster center is an actual observation (a *medoid*) and the objective is
//! the plain sum of distances rather than squared Euclidean error:
//!
//! ```text
//! cost = Σᵢ d(xᵢ, m(xᵢ))
//! ```
//!
//! Any metric works, since only point-to-point distances are ever needed.
//!
//! # One fit
//!
//! 1. Build the `n x n` distance matrix once, under the policy `P`.
//! 2. For each of `n_repeats` trials: fresh [`Clusters`], initializer (build
//!    phase), maximizer (swap phase).
//! 3. Keep the trial with strictly lowest cost. Equal cost keeps the earlier
//!    result.
//!
//! Each trial draws from its own ChaCha8 stream of the base seed, so a
//! seeded fit is reproducible and trials never share random state. That also
//! makes the trials independent enough to run in parallel
//! ([`KMedoids::with_parallel_trials`]) with the same outcome.
//!
//! # Failure Modes
//!
//! - **Local optima**: swap search stops at the first configuration no single
//!   swap improves. More repeats with a randomized initializer help.
//! - **Memory**: the distance matrix is O(n²).
//! - **Zero repeats**: no trial runs; [`KMedoids::results`] stays the
//!   default clustering (no medoids, `T::max_value()` cost).

use super::clusters::Clusters;
use super::distance_matrix::DistanceMatrix;
use super::initializer::{Initializer, InitializerKind};
use super::maximizer::{Maximizer, MaximizerKind, SwapStats, DEFAULT_MAX_ITER};
use crate::calculator::DistanceCalculator;
use crate::distance::{Distance, L1Norm, Scalar};
use crate::error::{Error, Result};
use crate::parallelism::{Parallelism, Serial};
use ndarray::{Array2, ArrayBase, ArrayView2, Data, Ix2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Settings for [`KMedoids::from_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KMedoidsConfig {
    /// Initializer name (`random`, `build`, `first`).
    pub initializer: String,
    /// Maximizer name (`pam`, `greedy`).
    pub maximizer: String,
    /// Clusters used by [`crate::Clustering::fit_predict`].
    pub n_clusters: usize,
    /// Trials used by [`crate::Clustering::fit_predict`].
    pub n_repeats: usize,
    /// Cap on swap passes per trial.
    pub max_iter: usize,
    /// Base random seed; `None` draws one per fit.
    pub seed: Option<u64>,
    /// Run trials concurrently (needs the `parallel` feature).
    pub parallel_trials: bool,
}

impl Default for KMedoidsConfig {
    fn default() -> Self {
        Self {
            initializer: InitializerKind::default().name().to_string(),
            maximizer: MaximizerKind::default().name().to_string(),
            n_clusters: 2,
            n_repeats: 10,
            max_iter: DEFAULT_MAX_ITER,
            seed: None,
            parallel_trials: false,
        }
    }
}

/// Outcome of one trial of the last fit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialSummary<T> {
    /// Trial number (also its RNG stream).
    pub trial: usize,
    /// Cost after the swap phase.
    pub cost: T,
    /// Swap phase statistics.
    pub stats: SwapStats,
}

/// K-medoids clustering engine.
///
/// `P` picks the execution policy for distance computation at compile time;
/// `D` is the metric. Strategy names are the only runtime choice.
///
/// ```rust
/// use medoid::{KMedoids, L1Norm, Serial};
/// use ndarray::array;
///
/// let data = array![[0.0], [1.0], [10.0], [11.0]];
/// let mut model = KMedoids::<f64, Serial, L1Norm>::new("build", "pam")
///     .unwrap()
///     .with_seed(42);
///
/// let best = model.fit(&data, 2, 5).unwrap();
/// assert_eq!(best.cost(), 2.0);
/// assert_eq!(best.labels()[0], best.labels()[1]);
/// assert_ne!(best.labels()[0], best.labels()[2]);
/// ```
#[derive(Debug, Clone)]
pub struct KMedoids<T, P = Serial, D = L1Norm> {
    initializer: InitializerKind,
    maximizer: MaximizerKind,
    max_iter: usize,
    seed: Option<u64>,
    parallel_trials: bool,
    n_clusters: usize,
    n_repeats: usize,
    calculator: DistanceCalculator<T, P, D>,
    best: Clusters<T>,
    best_medoids: Array2<T>,
    trials: Vec<TrialSummary<T>>,
}

impl<T: Scalar, P: Parallelism, D: Distance<T> + Default> KMedoids<T, P, D> {
    /// Create an engine from strategy names.
    ///
    /// Unknown names fail with [`Error::UnknownStrategy`].
    pub fn new(initializer: &str, maximizer: &str) -> Result<Self> {
        Ok(Self::with_strategies(initializer.parse()?, maximizer.parse()?))
    }

    /// Create an engine from already-resolved strategies.
    pub fn with_strategies(initializer: InitializerKind, maximizer: MaximizerKind) -> Self {
        let defaults = KMedoidsConfig::default();
        Self {
            initializer,
            maximizer,
            max_iter: defaults.max_iter,
            seed: None,
            parallel_trials: false,
            n_clusters: defaults.n_clusters,
            n_repeats: defaults.n_repeats,
            calculator: DistanceCalculator::default(),
            best: Clusters::default(),
            best_medoids: Array2::zeros((0, 0)),
            trials: Vec::new(),
        }
    }

    /// Create an engine from a configuration.
    pub fn from_config(config: &KMedoidsConfig) -> Result<Self> {
        let mut model = Self::new(&config.initializer, &config.maximizer)?
            .with_max_iter(config.max_iter)
            .with_clusters(config.n_clusters, config.n_repeats);
        model.seed = config.seed;
        model.parallel_trials = config.parallel_trials;
        Ok(model)
    }
}

impl<T: Scalar, P: Parallelism, D: Distance<T>> KMedoids<T, P, D> {
    /// Set the metric.
    pub fn with_metric(mut self, metric: D) -> Self {
        self.calculator = DistanceCalculator::new(metric);
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set maximum swap passes per trial.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the cluster and trial counts used by [`crate::Clustering`].
    pub fn with_clusters(mut self, n_clusters: usize, n_repeats: usize) -> Self {
        self.n_clusters = n_clusters;
        self.n_repeats = n_repeats;
        self
    }

    /// Run trials concurrently on the rayon pool.
    ///
    /// Results are merged in trial order, so the outcome matches a
    /// sequential fit. Ignored without the `parallel` feature.
    pub fn with_parallel_trials(mut self, enabled: bool) -> Self {
        self.parallel_trials = enabled;
        self
    }

    /// Configured initializer.
    pub fn initializer(&self) -> InitializerKind {
        self.initializer
    }

    /// Configured maximizer.
    pub fn maximizer(&self) -> MaximizerKind {
        self.maximizer
    }

    /// The distance calculator (policy + metric) used by this engine.
    pub fn calculator(&self) -> &DistanceCalculator<T, P, D> {
        &self.calculator
    }

    /// Cluster `data` into `n_clusters` groups, best of `n_repeats` trials.
    ///
    /// Accepts an owned matrix or a view. A result retained from an earlier
    /// fit on the same number of rows is kept unless a trial is strictly
    /// cheaper, so the returned clustering may come from that earlier fit
    /// while [`KMedoids::trials`] describes only this one. A retained result
    /// with a different row count is discarded first. Call
    /// [`KMedoids::reset`] to start from nothing.
    pub fn fit<S>(
        &mut self,
        data: &ArrayBase<S, Ix2>,
        n_clusters: usize,
        n_repeats: usize,
    ) -> Result<&Clusters<T>>
    where
        S: Data<Elem = T>,
    {
        let initializer = self.initializer.instantiate::<T>();
        let maximizer = self.maximizer.instantiate::<T>(self.max_iter);
        self.fit_with(
            data.view(),
            n_clusters,
            n_repeats,
            initializer.as_ref(),
            maximizer.as_ref(),
        )
    }

    /// Like [`KMedoids::fit`], with caller-supplied strategies.
    ///
    /// Either every trial succeeds and is recorded, or the first error is
    /// returned and the retained result and trial log are left untouched.
    pub fn fit_with(
        &mut self,
        data: ArrayView2<'_, T>,
        n_clusters: usize,
        n_repeats: usize,
        initializer: &dyn Initializer<T>,
        maximizer: &dyn Maximizer<T>,
    ) -> Result<&Clusters<T>> {
        let n = data.nrows();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if n_clusters == 0 || n_clusters > n {
            return Err(Error::InvalidClusterCount {
                requested: n_clusters,
                n_items: n,
            });
        }

        debug!(
            n_points = n,
            n_features = data.ncols(),
            n_clusters,
            n_repeats,
            policy = P::NAME,
            initializer = initializer.name(),
            maximizer = maximizer.name(),
            parallel_trials = self.parallel_trials,
            "fitting k-medoids"
        );

        let dist = DistanceMatrix::build(&self.calculator, data);
        let base_seed = self.seed.unwrap_or_else(|| rand::rng().random());
        let run = |trial| {
            run_trial(data, &dist, n_clusters, base_seed, trial, initializer, maximizer)
        };

        #[cfg(feature = "parallel")]
        let outcomes = if self.parallel_trials {
            (0..n_repeats).into_par_iter().map(run).collect::<Result<Vec<_>>>()?
        } else {
            (0..n_repeats).map(run).collect::<Result<Vec<_>>>()?
        };
        #[cfg(not(feature = "parallel"))]
        let outcomes = (0..n_repeats).map(run).collect::<Result<Vec<_>>>()?;

        if !self.best.is_empty() && self.best.n_points() != n {
            debug!(
                retained_points = self.best.n_points(),
                n_points = n,
                "discarding result retained from a different dataset"
            );
            self.reset();
        }
        self.trials.clear();
        for (trial, (candidate, stats)) in outcomes.into_iter().enumerate() {
            self.consider(data, trial, candidate, stats);
        }
        Ok(self.finish())
    }

    fn consider(
        &mut self,
        data: ArrayView2<'_, T>,
        trial: usize,
        candidate: Clusters<T>,
        stats: SwapStats,
    ) {
        debug!(
            trial,
            cost = ?candidate.cost(),
            swaps = stats.swaps,
            converged = stats.converged,
            "trial finished"
        );
        self.trials.push(TrialSummary {
            trial,
            cost: candidate.cost(),
            stats,
        });

        if candidate.is_better_than(&self.best) {
            debug!(trial, cost = ?candidate.cost(), "new best clustering");
            self.best_medoids = candidate.medoid_rows(data);
            self.best = candidate;
        }
    }

    fn finish(&self) -> &Clusters<T> {
        info!(
            trials = self.trials.len(),
            best_cost = ?self.best.cost(),
            medoids = ?self.best.medoids(),
            "k-medoids fit finished"
        );
        &self.best
    }

    /// Best clustering retained so far (the default value if none).
    pub fn results(&self) -> &Clusters<T> {
        &self.best
    }

    /// Whether any trial has produced a clustering.
    pub fn has_result(&self) -> bool {
        !self.best.is_empty()
    }

    /// Coordinates of the retained medoids, one row per cluster.
    pub fn medoids(&self) -> ArrayView2<'_, T> {
        self.best_medoids.view()
    }

    /// Per-trial outcomes of the last fit, in trial order.
    pub fn trials(&self) -> &[TrialSummary<T>] {
        &self.trials
    }

    /// Forget the retained result.
    pub fn reset(&mut self) {
        self.best = Clusters::default();
        self.best_medoids = Array2::zeros((0, 0));
        self.trials.clear();
    }

    /// Nearest retained medoid for each row of `points`.
    ///
    /// Ties go to the lowest cluster index.
    pub fn predict(&self, points: ArrayView2<'_, T>) -> Result<Vec<usize>> {
        if !self.has_result() {
            return Err(Error::NotFitted);
        }
        let dist = self
            .calculator
            .distance_matrix(points, self.best_medoids.view())?;

        Ok(dist
            .rows()
            .into_iter()
            .map(|row| {
                let mut best_slot = 0;
                let mut best = row[0];
                for (slot, &d) in row.iter().enumerate().skip(1) {
                    if d < best {
                        best = d;
                        best_slot = slot;
                    }
                }
                best_slot
            })
            .collect())
    }

    pub(crate) fn configured_counts(&self) -> (usize, usize) {
        (self.n_clusters, self.n_repeats)
    }
}

fn run_trial<T: Scalar>(
    data: ArrayView2<'_, T>,
    dist: &DistanceMatrix<T>,
    n_clusters: usize,
    base_seed: u64,
    trial: usize,
    initializer: &dyn Initializer<T>,
    maximizer: &dyn Maximizer<T>,
) -> Result<(Clusters<T>, SwapStats)> {
    let mut rng = ChaCha8Rng::seed_from_u64(base_seed);
    rng.set_stream(trial as u64);

    let mut clusters = Clusters::new(data.nrows(), n_clusters);
    initializer.initialize(data, &mut clusters, dist, &mut rng)?;
    let stats = maximizer.maximize(data, &mut clusters, dist)?;
    Ok((clusters, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::initializer::FirstRowsInitializer;
    use crate::cluster::maximizer::PamSwap;
    use crate::distance::L2Norm;
    use ndarray::{array, s};
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    fn line() -> Array2<f64> {
        array![[0.0], [1.0], [10.0], [11.0]]
    }

    #[test]
    fn test_line_converges_to_cost_two() {
        for init in InitializerKind::ALL {
            for max in MaximizerKind::ALL {
                let mut model = KMedoids::<f64>::with_strategies(init, max).with_seed(42);
                let best = model.fit(&line(), 2, 4).unwrap();

                assert_eq!(best.cost(), 2.0, "{init}/{max}");
                let labels = best.labels();
                assert_eq!(labels[0], labels[1]);
                assert_eq!(labels[2], labels[3]);
                assert_ne!(labels[0], labels[2]);
                let mut medoids = best.medoids().to_vec();
                medoids.sort_unstable();
                assert!(matches!(medoids[0], 0 | 1));
                assert!(matches!(medoids[1], 2 | 3));
            }
        }
    }

    #[test]
    fn test_unknown_strategy_names() {
        assert!(matches!(
            KMedoids::<f64>::new("nope", "pam"),
            Err(Error::UnknownStrategy { kind: "initializer", .. })
        ));
        assert!(matches!(
            KMedoids::<f64>::new("random", "nope"),
            Err(Error::UnknownStrategy { kind: "maximizer", .. })
        ));
    }

    #[test]
    fn test_invalid_cluster_counts() {
        let mut model = KMedoids::<f64>::new("random", "pam").unwrap();
        assert_eq!(
            model.fit(&line(), 5, 1).unwrap_err(),
            Error::InvalidClusterCount {
                requested: 5,
                n_items: 4
            }
        );
        assert!(model.fit(&line(), 0, 1).is_err());
        assert_eq!(
            model.fit(&Array2::zeros((0, 1)), 1, 1).unwrap_err(),
            Error::EmptyInput
        );
        assert!(!model.has_result());
    }

    #[test]
    fn test_zero_repeats_yields_default() {
        let mut model = KMedoids::<f64>::new("random", "pam").unwrap();
        let best = model.fit(&line(), 2, 0).unwrap();
        assert!(best.is_empty());
        assert_eq!(best.cost(), f64::MAX);
        assert!(!model.has_result());
        assert!(model.trials().is_empty());
        assert_eq!(model.predict(line().view()), Err(Error::NotFitted));
    }

    #[test]
    fn test_k_equals_n() {
        let mut model = KMedoids::<f64, Serial, L2Norm>::new("random", "greedy")
            .unwrap()
            .with_seed(1);
        let best = model.fit(&line(), 4, 3).unwrap();
        assert_eq!(best.cost(), 0.0);
        let mut medoids = best.medoids().to_vec();
        medoids.sort_unstable();
        assert_eq!(medoids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_best_is_minimum_of_trials() {
        let data = Array2::from_shape_fn((30, 2), |(i, j)| ((i * 13 + j * 5) % 17) as f64);
        let mut model = KMedoids::<f64>::new("random", "greedy")
            .unwrap()
            .with_seed(5)
            .with_max_iter(2);
        let best_cost = model.fit(&data, 4, 8).unwrap().cost();

        assert_eq!(model.trials().len(), 8);
        for trial in model.trials() {
            assert!(best_cost <= trial.cost);
        }
        let min = model
            .trials()
            .iter()
            .map(|t| t.cost)
            .fold(f64::MAX, f64::min);
        assert_eq!(best_cost, min);
    }

    #[test]
    fn test_reset_then_refit_matches_fresh() {
        let data = Array2::from_shape_fn((25, 3), |(i, j)| ((i * 7 + j * 11) % 19) as f64 * 0.5);
        let fresh = {
            let mut model = KMedoids::<f64>::new("random", "pam").unwrap().with_seed(77);
            model.fit(&data, 3, 4).unwrap().clone()
        };

        let mut model = KMedoids::<f64>::new("random", "pam").unwrap().with_seed(77);
        model.fit(&line(), 2, 2).unwrap();
        model.reset();
        assert!(!model.has_result());
        let refit = model.fit(&data, 3, 4).unwrap();

        assert_eq!(refit.medoids(), fresh.medoids());
        assert_eq!(refit.assignments(), fresh.assignments());
        assert_eq!(refit.cost(), fresh.cost());
    }

    #[test]
    fn test_retained_best_survives_worse_refit() {
        let mut model = KMedoids::<f64>::new("first", "pam").unwrap();
        model.fit(&line(), 2, 1).unwrap();
        let first_cost = model.results().cost();

        // With a zero iteration cap the first-rows start is kept as is,
        // which is strictly worse than the retained optimum.
        let mut capped = model.clone().with_max_iter(0);
        capped.fit(&line(), 2, 1).unwrap();
        assert_eq!(capped.results().cost(), first_cost);
        assert!(capped.trials()[0].cost > first_cost);
    }

    #[test]
    fn test_predict_uses_retained_medoids() {
        let mut model = KMedoids::<f64>::new("build", "pam").unwrap().with_seed(3);
        model.fit(&line(), 2, 1).unwrap();
        assert_eq!(model.medoids().nrows(), 2);

        let labels = model.predict(array![[-5.0], [0.4], [10.6], [50.0]].view()).unwrap();
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
        assert_eq!(labels[1], model.results().labels()[0]);

        assert!(matches!(
            model.predict(array![[1.0, 2.0]].view()),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_from_config() {
        let config = KMedoidsConfig {
            initializer: "first".into(),
            maximizer: "greedy".into(),
            max_iter: 7,
            seed: Some(11),
            ..KMedoidsConfig::default()
        };
        let model = KMedoids::<f32>::from_config(&config).unwrap();
        assert_eq!(model.initializer(), InitializerKind::First);
        assert_eq!(model.maximizer(), MaximizerKind::Greedy);
        assert_eq!(model.configured_counts(), (2, 10));

        let bad = KMedoidsConfig {
            maximizer: "swap".into(),
            ..KMedoidsConfig::default()
        };
        assert!(KMedoids::<f32>::from_config(&bad).is_err());
    }

    #[test]
    fn test_custom_strategies_via_fit_with() {
        use crate::cluster::maximizer::GreedySwap;

        let mut model = KMedoids::<f64>::new("random", "pam").unwrap();
        let best = model
            .fit_with(
                line().view(),
                2,
                1,
                &FirstRowsInitializer,
                &GreedySwap::new(),
            )
            .unwrap();
        assert_eq!(best.cost(), 2.0);
        assert_eq!(model.trials()[0].stats.swaps, 1);
    }

    #[test]
    fn test_overflowing_distances_still_produce_a_result() {
        // Every off-diagonal f32 L2 distance here is inf.
        let data = array![[0.0f32], [1e20], [2e20], [3e20]];
        for init in InitializerKind::ALL {
            let mut model =
                KMedoids::<f32, Serial, L2Norm>::with_strategies(init, MaximizerKind::Pam)
                    .with_seed(6);
            let best = model.fit(&data, 2, 3).unwrap();
            assert_eq!(best.medoids().len(), 2, "{init}");
            assert_eq!(best.cost(), f32::INFINITY);
            assert!(model.has_result());
            assert_eq!(model.medoids().nrows(), 2);
            assert_eq!(model.trials().len(), 3);
        }
    }

    #[test]
    fn test_refit_on_other_row_count_discards_retained() {
        let data = Array2::from_shape_fn((25, 3), |(i, j)| ((i * 7 + j * 11) % 19) as f64 * 0.5);
        let fresh = KMedoids::<f64>::new("random", "pam")
            .unwrap()
            .with_seed(77)
            .fit(&data, 3, 4)
            .unwrap()
            .clone();

        let mut model = KMedoids::<f64>::new("random", "pam").unwrap().with_seed(77);
        model.fit(&line(), 2, 2).unwrap();
        let refit = model.fit(&data, 3, 4).unwrap();

        assert_eq!(refit.n_points(), 25);
        assert_eq!(refit.medoids(), fresh.medoids());
        assert_eq!(refit.cost(), fresh.cost());
        assert_eq!(model.medoids().dim(), (3, 3));
    }

    #[test]
    fn test_fit_accepts_views() {
        let data = array![[0.0], [1.0], [10.0], [11.0], [500.0]];
        let mut model = KMedoids::<f64>::new("build", "pam").unwrap().with_seed(2);
        let best = model.fit(&data.slice(s![..4, ..]), 2, 2).unwrap();
        assert_eq!(best.n_points(), 4);
        assert_eq!(best.cost(), 2.0);
    }

    #[derive(Debug)]
    struct FailingInitializer {
        calls: AtomicUsize,
        fail_at: usize,
    }

    impl FailingInitializer {
        fn new(fail_at: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_at,
            }
        }
    }

    impl<T: Scalar> Initializer<T> for FailingInitializer {
        fn initialize(
            &self,
            data: ArrayView2<'_, T>,
            clusters: &mut Clusters<T>,
            dist: &DistanceMatrix<T>,
            rng: &mut dyn rand::RngCore,
        ) -> Result<()> {
            if self.calls.fetch_add(1, AtomicOrdering::SeqCst) == self.fail_at {
                return Err(Error::Other("initializer failed".into()));
            }
            FirstRowsInitializer.initialize(data, clusters, dist, rng)
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn test_failed_fit_leaves_state_untouched() {
        let mut model = KMedoids::<f64>::new("first", "pam").unwrap();
        model.fit(&line(), 2, 1).unwrap();
        let before = model.results().clone();

        #[cfg_attr(not(feature = "parallel"), allow(unused_mut))]
        let mut engines = vec![model.clone()];
        #[cfg(feature = "parallel")]
        engines.push(model.clone().with_parallel_trials(true));

        for mut engine in engines {
            let err = engine
                .fit_with(line().view(), 2, 4, &FailingInitializer::new(2), &PamSwap::new())
                .unwrap_err();
            assert_eq!(err, Error::Other("initializer failed".into()));
            assert_eq!(engine.results().medoids(), before.medoids());
            assert_eq!(engine.results().cost(), before.cost());
            assert_eq!(engine.trials().len(), 1);
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_trials_match_sequential() {
        let data = Array2::from_shape_fn((40, 2), |(i, j)| ((i * 29 + j * 3) % 23) as f64);
        let mut sequential = KMedoids::<f64>::new("random", "pam").unwrap().with_seed(8);
        let mut parallel = sequential.clone().with_parallel_trials(true);

        let a = sequential.fit(&data, 5, 6).unwrap().clone();
        let b = parallel.fit(&data, 5, 6).unwrap().clone();
        assert_eq!(a.medoids(), b.medoids());
        assert_eq!(a.assignments(), b.assignments());
        assert_eq!(sequential.trials(), parallel.trials());
    }
}
