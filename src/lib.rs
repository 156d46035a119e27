//! # lazy-collections
//!
//! Immutable, functional-style container shapes with deferred realization.
//!
//! ## Overview
//!
//! This library provides three immutable container shapes that share a
//! uniform combinator API and a lazy realization model:
//!
//! - [`Sequence`]: ordered, duplicate-permitting container
//! - [`Mapping`]: key-to-value container with unique keys
//! - [`UniqueSet`]: unordered container of unique elements
//!
//! Each container starts either *realized* (built from concrete elements) or
//! *deferred* (holding a consume-once [`Source`]). A deferred container
//! transitions exactly once into an immutable concrete structure the first
//! time an operation needs concrete shape (indexing, length, equality,
//! hashing). Transformation combinators (`map`, `filter`, `take_while`,
//! `flat_map`) never force the receiver; they wrap its content or source in
//! a new deferred instance.
//!
//! ## Example
//!
//! ```rust
//! use lazy_collections::prelude::*;
//!
//! let doubled = sequence![1, 2, 3]
//!     .map(|x| x * 2)
//!     .filter(|x| *x > 2);
//!
//! assert_eq!(doubled.to_vec(), vec![4, 6]);
//! ```
//!
//! ## Deferred sources
//!
//! ```rust
//! use lazy_collections::prelude::*;
//!
//! let numbers = Source::named("numbers", 1..=5);
//! let sequence = Sequence::from_source(numbers);
//!
//! // Nothing has been produced yet.
//! assert!(!sequence.is_realized());
//! assert_eq!(sequence.mk_string(", "), "Sequence(<deferred: numbers>)");
//!
//! // The first operation that needs concrete structure realizes it.
//! assert_eq!(sequence.len(), 5);
//! assert!(sequence.is_realized());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the three container shapes, the shared [`Collection`] trait,
/// the deferred [`Source`] type, and the error types.
///
/// # Usage
///
/// ```rust
/// use lazy_collections::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collection::*;
    pub use crate::source::*;
    pub use crate::{mapping, sequence, unique_set};
}

pub mod collection;
pub mod source;

pub use collection::{Collection, CollectionError, Mapping, Sequence, UniqueSet};
pub use source::Source;
