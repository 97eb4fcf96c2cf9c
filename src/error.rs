use thiserror::Error;

/// Result alias for `medoid`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the distance calculator, the strategies and the
/// k-medoids engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input was empty.
    #[error("empty input provided")]
    EmptyInput,

    /// Point sets disagree on their number of features.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Shape mismatch between a matrix and what the operation needs.
    #[error("shape mismatch: expected {expected}, actual {actual}")]
    ShapeMismatch {
        /// Expected shape description.
        expected: String,
        /// Actual shape description.
        actual: String,
    },

    /// Invalid number of clusters requested.
    #[error("cannot create {requested} clusters from {n_items} items")]
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of items.
        n_items: usize,
    },

    /// An initializer or maximizer name that maps to no known strategy.
    #[error("unknown {kind} strategy '{name}'")]
    UnknownStrategy {
        /// Strategy family ("initializer" or "maximizer").
        kind: &'static str,
        /// The name that was requested.
        name: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// A prediction was requested before any trial produced a clustering.
    #[error("model has no fitted medoids")]
    NotFitted,

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn shape(expected: (usize, usize), actual: (usize, usize)) -> Self {
        Error::ShapeMismatch {
            expected: format!("{}x{}", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }
}
