//! K-medoids clustering: medoid sets, build and swap strategies, and the
//! restart driver.
//!
//! ## Medoids vs Centroids
//!
//! A k-means centroid is the mean of its cluster, generally not a data point,
//! and only meaningful under squared Euclidean distance. A **medoid** is the
//! cluster member with the smallest total distance to the other members.
//! Because only point-to-point distances are needed, any metric works and the
//! centers stay interpretable (they are real observations).
//!
//! ## Objective
//!
//! ```text
//! cost = Σᵢ d(xᵢ, m(xᵢ))      m(x) = nearest medoid of x
//! ```
//!
//! Finding the optimal medoids is NP-hard; PAM-style local search finds a
//! local optimum, and restarting from several starting points keeps the best.
//!
//! ## Pieces
//!
//! | Type | Role |
//! |------|------|
//! | [`DistanceMatrix`] | all pairwise distances, computed once per fit |
//! | [`SelectedSet`] | which rows are medoids |
//! | [`Clusters`] | medoids + assignments + cost |
//! | [`Initializer`] | build phase (`random`, `build`, `first`) |
//! | [`Maximizer`] | swap phase (`pam`, `greedy`) |
//! | [`KMedoids`] | runs trials, keeps the cheapest |
//!
//! ## Usage
//!
//! ```rust
//! use medoid::cluster::{Clustering, KMedoids};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! let model = KMedoids::<f32>::new("build", "pam")
//!     .unwrap()
//!     .with_clusters(2, 5)
//!     .with_seed(7);
//! let labels = model.fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//! ```

mod clusters;
mod distance_matrix;
mod initializer;
mod kmedoids;
mod maximizer;
mod selected_set;
mod traits;

pub use clusters::Clusters;
pub use distance_matrix::DistanceMatrix;
pub use initializer::{
    BuildInitializer, FirstRowsInitializer, Initializer, InitializerKind, RandomInitializer,
};
pub use kmedoids::{KMedoids, KMedoidsConfig, TrialSummary};
pub use maximizer::{GreedySwap, Maximizer, MaximizerKind, PamSwap, SwapStats, DEFAULT_MAX_ITER};
pub use selected_set::SelectedSet;
pub use traits::{rows_to_array, Clustering};
