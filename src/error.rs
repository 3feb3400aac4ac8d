use thiserror::Error;

/// Errors returned by fallible [`AvlTree`](crate::AvlTree) operations.
///
/// A failed call never modifies the tree.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AvlError {
    /// An argument can never be satisfied, such as an inverted range bound.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The requested value is not stored in the tree.
    #[error("value not found in tree")]
    NotFound,
}

/// A [`Result`](std::result::Result) defaulting to [`AvlError`].
pub type Result<T, E = AvlError> = std::result::Result<T, E>;
