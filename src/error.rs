//! Error type shared by every collection in this crate.

use thiserror::Error;

/// Errors reported by collection operations.
///
/// Every fallible operation validates its input before touching state, so
/// an `Err` always leaves the collection exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// An argument violates the operation's precondition.
    #[error("invalid argument `{name}`: {message}")]
    InvalidArgument {
        /// Name of the offending parameter.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// A positional access fell outside the valid range.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Length of the collection at the time of the call.
        len: usize,
    },

    /// The requested item is not present in the collection.
    #[error("item not found")]
    NotFound,
}

impl CollectionError {
    pub(crate) fn invalid_argument(name: &'static str, message: impl Into<String>) -> Self {
        CollectionError::InvalidArgument {
            name,
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CollectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_argument() {
        let err = CollectionError::invalid_argument("units", "must be >= 1, got 0");
        assert_eq!(
            err.to_string(),
            "invalid argument `units`: must be >= 1, got 0"
        );
    }

    #[test]
    fn test_display_index_out_of_range() {
        let err = CollectionError::IndexOutOfRange { index: 4, len: 3 };
        assert_eq!(err.to_string(), "index 4 out of range for length 3");
    }

    #[test]
    fn test_display_not_found() {
        assert_eq!(CollectionError::NotFound.to_string(), "item not found");
    }

    #[test]
    fn test_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&CollectionError::NotFound);
    }
}
