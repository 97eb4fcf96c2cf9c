//! # medoid
//!
//! K-medoids clustering over dense numeric matrices.
//!
//! The expensive part of k-medoids is the pairwise distance matrix, so it is
//! computed once per fit under an execution policy chosen at compile time
//! ([`Serial`], [`Threaded`], [`Distributed`], [`Hybrid`]) and then shared by
//! every restart. Build and swap strategies are picked by name at
//! construction.
//!
//! ```rust
//! use medoid::{KMedoids, L2Norm, Serial};
//! use ndarray::array;
//!
//! let data = array![[0.0, 0.0], [0.2, 0.1], [5.0, 5.0], [5.1, 4.9], [5.2, 5.0]];
//! let mut model = KMedoids::<f64, Serial, L2Norm>::new("random", "pam")
//!     .unwrap()
//!     .with_seed(1);
//!
//! let best = model.fit(&data, 2, 10).unwrap();
//! assert_eq!(best.cluster_sizes().iter().sum::<usize>(), 5);
//! ```
//!
//! **Features**: `parallel` (default) enables the rayon-backed policies and
//! parallel trials; `serde` derives serialization for configs and results.
//!
//! Log events go through `tracing`; install a subscriber to see them.

pub mod calculator;
pub mod cluster;
pub mod distance;
/// Error types used across `medoid`.
pub mod error;
pub mod parallelism;


pub use calculator::{assemble_blocks, row_partition, DistanceCalculator};
pub use cluster::{
    Clustering, Clusters, DistanceMatrix, Initializer, InitializerKind, KMedoids, KMedoidsConfig,
    Maximizer, MaximizerKind, SelectedSet, SwapStats,
};
pub use distance::{Distance, L1Norm, L2Norm, Scalar};
pub use error::{Error, Result};
pub use parallelism::{Distributed, Parallelism, Serial};

#[cfg(feature = "parallel")]
pub use parallelism::{Hybrid, Threaded};
