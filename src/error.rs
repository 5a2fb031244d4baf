//! Error types for the aggregation library.
//!
//! Library operations return [`AggregateError`]; the binary wraps these in
//! `anyhow` at the application boundary.

use thiserror::Error;

/// Errors raised by aggregation operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// A caller-supplied parameter was malformed (e.g. a negative count).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A numeric result was requested over an empty sequence.
    #[error("cannot compute statistics over an empty sequence")]
    EmptyInput,
}

/// Convenience alias for library results.
pub type Result<T> = std::result::Result<T, AggregateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AggregateError::InvalidArgument("n must be non-negative, got -1".to_string());
        assert_eq!(err.to_string(), "invalid argument: n must be non-negative, got -1");
        assert_eq!(
            AggregateError::EmptyInput.to_string(),
            "cannot compute statistics over an empty sequence"
        );
    }

    #[test]
    fn test_converts_into_anyhow() {
        fn fails() -> anyhow::Result<()> {
            Err(AggregateError::EmptyInput)?;
            Ok(())
        }

        let err = fails().unwrap_err();
        assert!(err.downcast_ref::<AggregateError>().is_some());
    }
}
