//! Error types for multimethod.
//!
//! - [`MultiMethodError`] - Configuration errors raised by the dispatch table
//! - [`BoxError`] - Failures returned by user handlers, propagated unchanged

use thiserror::Error;

/// A boxed error type for handler failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while configuring a dispatch table.
///
/// A missing match is never an error; it is routed to the default handler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MultiMethodError {
    /// The projection was neither a procedure nor a field-name string.
    #[error("dispatch requires a function or a string, got {found}")]
    InvalidProjection {
        /// Kind of the rejected value.
        found: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_projection_display() {
        let err = MultiMethodError::InvalidProjection { found: "number" };
        assert_eq!(
            err.to_string(),
            "dispatch requires a function or a string, got number"
        );
    }
}
