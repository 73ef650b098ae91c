//! Error type shared by every solver entry point.

use thiserror::Error as ThisError;

/// Errors surfaced to callers of the solver entry points.
///
/// Degenerate geometry (coincident nodes) and failed Lin-Kernighan
/// reconstructions are recovered inside the engines and never appear here.
#[derive(Debug, ThisError)]
pub enum SolveError {
    /// The node list cannot be solved (too few nodes, non-finite coordinates).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A tunable constant is out of its allowed range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// The caller's [`CancelToken`](crate::CancelToken) fired before the solve finished.
    #[error("solve cancelled")]
    Cancelled,
    /// Request or response text could not be (de)serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SolveError>;

impl SolveError {
    /// Builds a [`SolveError::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Builds a [`SolveError::InvalidConfig`].
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            SolveError::invalid_input("need at least 2 nodes").to_string(),
            "invalid input: need at least 2 nodes"
        );
        assert_eq!(
            SolveError::invalid_config("rho").to_string(),
            "invalid config: rho"
        );
        assert_eq!(SolveError::Cancelled.to_string(), "solve cancelled");
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<u32>("not json").expect_err("must fail");
        let solve: SolveError = err.into();
        assert!(matches!(solve, SolveError::Json(_)));
    }
}
