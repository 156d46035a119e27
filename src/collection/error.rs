//! Error types for container operations.
//!
//! This module provides the error taxonomy shared by all container shapes:
//! out-of-range indexed access and operations that require a non-empty
//! container. All errors are returned synchronously from the call site that
//! detects the violation; nothing is retried or recovered internally.

/// Represents an indexed access outside the valid range `[0, length)`.
///
/// # Examples
///
/// ```rust
/// use lazy_collections::collection::OutOfRangeError;
///
/// let error = OutOfRangeError { index: 5, length: 3 };
/// assert_eq!(
///     format!("{}", error),
///     "index 5 out of range for collection of length 3"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRangeError {
    /// The index that was requested.
    pub index: usize,
    /// The length of the collection at the time of the access.
    pub length: usize,
}

impl std::fmt::Display for OutOfRangeError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "index {} out of range for collection of length {}",
            self.index, self.length
        )
    }
}

impl std::error::Error for OutOfRangeError {}

/// Represents an operation that requires a non-empty container.
///
/// Returned by `head`, `tail`, `last`, `fold_left`, and `reduce_left` when
/// the container has no elements.
///
/// # Examples
///
/// ```rust
/// use lazy_collections::collection::EmptyCollectionError;
///
/// let error = EmptyCollectionError {
///     shape: "Sequence",
///     operation: "head",
/// };
/// assert_eq!(format!("{}", error), "Sequence::head: collection is empty");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyCollectionError {
    /// The shape the operation was invoked on.
    pub shape: &'static str,
    /// The name of the operation that required a non-empty container.
    pub operation: &'static str,
}

impl std::fmt::Display for EmptyCollectionError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}::{}: collection is empty",
            self.shape, self.operation
        )
    }
}

impl std::error::Error for EmptyCollectionError {}

/// Represents errors that can occur when operating on a container.
///
/// This enum provides a unified error type for all container operations.
///
/// # Examples
///
/// ```rust
/// use lazy_collections::prelude::*;
///
/// let sequence: Sequence<i32> = sequence![1, 2, 3];
/// let error = sequence.get(3).unwrap_err();
/// assert!(matches!(error, CollectionError::OutOfRange(_)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionError {
    /// Indexed access outside `[0, length)`.
    OutOfRange(OutOfRangeError),
    /// An operation that requires a non-empty container was invoked on an
    /// empty one.
    Empty(EmptyCollectionError),
}

impl CollectionError {
    /// Builds the out-of-range variant.
    pub(crate) const fn out_of_range(index: usize, length: usize) -> Self {
        Self::OutOfRange(OutOfRangeError { index, length })
    }

    /// Builds the empty-container variant.
    pub(crate) const fn empty(shape: &'static str, operation: &'static str) -> Self {
        Self::Empty(EmptyCollectionError { shape, operation })
    }
}

impl std::fmt::Display for CollectionError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange(error) => write!(formatter, "{error}"),
            Self::Empty(error) => write!(formatter, "{error}"),
        }
    }
}

impl std::error::Error for CollectionError {}

impl From<OutOfRangeError> for CollectionError {
    fn from(error: OutOfRangeError) -> Self {
        Self::OutOfRange(error)
    }
}

impl From<EmptyCollectionError> for CollectionError {
    fn from(error: EmptyCollectionError) -> Self {
        Self::Empty(error)
    }
}
