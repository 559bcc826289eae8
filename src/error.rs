use thiserror::Error;

/// Errors returned by clustering and detection operations in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_points} points")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of points in the dataset.
        n_points: usize,
    },

    /// A query was issued against a detector that has not been trained.
    #[error("detector not trained: call train() before verify()")]
    NotTrained,
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
