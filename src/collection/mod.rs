//! Immutable container shapes with deferred realization.
//!
//! This module provides the three container shapes and their shared
//! contract:
//!
//! - [`Sequence`]: ordered, duplicate-permitting container
//! - [`Mapping`]: key-to-value container with unique keys
//! - [`UniqueSet`]: unordered container of unique elements
//!
//! All three implement the [`Collection`] trait, which carries the
//! realization lifecycle and every operation that needs concrete structure
//! (length, containment, counting, folding, iteration). Transformation
//! combinators stay lazy: they wrap the receiver's content or deferred
//! source in a new instance without forcing it.
//!
//! # Examples
//!
//! ## `Sequence`
//!
//! ```rust
//! use lazy_collections::prelude::*;
//!
//! let sequence = sequence![3, 1, 2];
//! assert_eq!(sequence.sorted().to_vec(), vec![1, 2, 3]);
//! assert_eq!(sequence.head(), Ok(3));
//! ```
//!
//! ## `Mapping`
//!
//! ```rust
//! use lazy_collections::prelude::*;
//!
//! let mapping = mapping! { "a" => 1, "b" => 2 };
//! assert_eq!(mapping.get(&"a"), Some(1));
//! assert_eq!(mapping.get(&"z"), None);
//! assert_eq!(mapping.get_or_else(&"z", 0), 0);
//! ```
//!
//! ## `UniqueSet`
//!
//! ```rust
//! use lazy_collections::prelude::*;
//!
//! let left = unique_set![1, 2, 3];
//! let right = unique_set![3, 4];
//! assert_eq!(left.union(&right).len(), 4);
//! assert_eq!(left.intersect(&right).to_vec(), vec![3]);
//! ```

mod error;
mod mapping;
pub(crate) mod realize;
mod sequence;
mod unique_set;

pub use error::{CollectionError, EmptyCollectionError, OutOfRangeError};
pub use mapping::Mapping;
pub use sequence::Sequence;
pub use unique_set::UniqueSet;

/// The contract shared by every container shape.
///
/// A collection is a dual-state value: it is either *deferred* (holding a
/// consume-once [`Source`](crate::source::Source)) or *realized* (holding an
/// immutable concrete structure). Every operation on this trait that needs
/// concrete structure forces realization first; the transition happens at
/// most once per instance and is never reversed.
///
/// The required methods are the shape-specific kernel: realization, length,
/// and in-order visitation. Everything else is provided on top of them as
/// plain iterative scans.
///
/// # Examples
///
/// ```rust
/// use lazy_collections::prelude::*;
///
/// fn describe<C: Collection>(collection: &C) -> String
/// where
///     C::Item: std::fmt::Display,
/// {
///     format!("{} of {} items", C::SHAPE_NAME, collection.len())
/// }
///
/// assert_eq!(describe(&sequence![1, 2, 3]), "Sequence of 3 items");
/// assert_eq!(describe(&unique_set![1, 1, 2]), "UniqueSet of 2 items");
/// ```
pub trait Collection {
    /// The element type visited by iteration-order scans. For [`Mapping`]
    /// this is the key-value pair.
    type Item: Clone + 'static;

    /// The shape name used in diagnostics and error messages.
    const SHAPE_NAME: &'static str;

    /// Forces realization of this collection.
    ///
    /// Drains the deferred source (if any) and builds the concrete
    /// structure. Idempotent: calling this on a realized collection is a
    /// no-op.
    fn force(&self);

    /// Returns whether this collection has been realized.
    ///
    /// Never forces realization.
    fn is_realized(&self) -> bool;

    /// Returns the number of elements, forcing realization.
    ///
    /// Needing a definite count from a possibly single-shot source is
    /// exactly what realization is for; there is no way around it.
    fn len(&self) -> usize;

    /// Visits every item in iteration order until the visitor returns
    /// `false`, forcing realization first.
    fn visit_items(&self, visitor: &mut dyn FnMut(&Self::Item) -> bool);

    /// Returns the deferred source name, or `None` once realized.
    ///
    /// Never forces realization.
    fn deferred_source_name(&self) -> Option<String>;

    /// Returns whether the collection has no elements, forcing realization.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether the collection contains the given item.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let sequence = sequence![1, 2, 3];
    /// assert!(sequence.contains(&2));
    /// assert!(!sequence.contains(&9));
    /// ```
    fn contains(&self, item: &Self::Item) -> bool
    where
        Self::Item: PartialEq,
    {
        let mut found = false;
        self.visit_items(&mut |candidate| {
            if candidate == item {
                found = true;
            }
            !found
        });
        found
    }

    /// Counts the items satisfying the predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let sequence = sequence![1, 2, 3, 4];
    /// assert_eq!(sequence.count_by(|x| x % 2 == 0), 2);
    /// ```
    fn count_by<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&Self::Item) -> bool,
    {
        let mut count = 0;
        self.visit_items(&mut |item| {
            if predicate(item) {
                count += 1;
            }
            true
        });
        count
    }

    /// Returns the first item in iteration order satisfying the predicate.
    ///
    /// Absence is a normal outcome, not an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let sequence = sequence![1, 2, 3];
    /// assert_eq!(sequence.find_by(|x| *x > 1), Some(2));
    /// assert_eq!(sequence.find_by(|x| *x > 9), None);
    /// ```
    fn find_by<P>(&self, mut predicate: P) -> Option<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        let mut found = None;
        self.visit_items(&mut |item| {
            if predicate(item) {
                found = Some(item.clone());
            }
            found.is_none()
        });
        found
    }

    /// Returns whether every item satisfies the predicate.
    ///
    /// This is a full scan: the count of satisfying items must equal the
    /// length. It does not short-circuit on the first failure.
    fn for_all<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.count_by(predicate) == self.len()
    }

    /// Applies an action to every item for its side effects.
    fn for_each<F>(&self, mut action: F)
    where
        F: FnMut(&Self::Item),
    {
        self.visit_items(&mut |item| {
            action(item);
            true
        });
    }

    /// Left-folds the items with `initial` as the seed.
    ///
    /// # Errors
    ///
    /// Returns an empty-container error if the collection is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let sequence = sequence![1, 2, 3];
    /// assert_eq!(sequence.fold_left(10, |acc, x| acc + x), Ok(16));
    ///
    /// let empty: Sequence<i32> = Sequence::new();
    /// assert!(empty.fold_left(0, |acc, x| acc + x).is_err());
    /// ```
    fn fold_left<B, F>(&self, initial: B, function: F) -> Result<B, CollectionError>
    where
        F: FnMut(B, Self::Item) -> B,
    {
        if self.is_empty() {
            return Err(CollectionError::empty(Self::SHAPE_NAME, "fold_left"));
        }
        Ok(self.to_vec().into_iter().fold(initial, function))
    }

    /// Left-folds the items using the first item as the seed.
    ///
    /// # Errors
    ///
    /// Returns an empty-container error if the collection is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let sequence = sequence![1, 2, 3];
    /// assert_eq!(sequence.reduce_left(|acc, x| acc + x), Ok(6));
    /// ```
    fn reduce_left<F>(&self, function: F) -> Result<Self::Item, CollectionError>
    where
        F: FnMut(Self::Item, Self::Item) -> Self::Item,
    {
        let mut items = self.to_vec().into_iter();
        items.next().map_or(
            Err(CollectionError::empty(Self::SHAPE_NAME, "reduce_left")),
            |first| Ok(items.fold(first, function)),
        )
    }

    /// Joins the rendered items with the separator.
    ///
    /// On a deferred collection this returns a diagnostic naming the
    /// deferred source **without forcing realization**. This is the escape
    /// hatch for inspecting a collection whose one-shot source must not be
    /// consumed yet.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// assert_eq!(sequence![1, 2, 3].mk_string(", "), "1, 2, 3");
    ///
    /// let deferred = Sequence::from_source(Source::named("numbers", 1..=3));
    /// assert_eq!(deferred.mk_string(", "), "Sequence(<deferred: numbers>)");
    /// assert!(!deferred.is_realized());
    /// ```
    fn mk_string(&self, separator: &str) -> String
    where
        Self::Item: std::fmt::Display,
    {
        if let Some(name) = self.deferred_source_name() {
            return format!("{}(<deferred: {name}>)", Self::SHAPE_NAME);
        }
        let mut rendered = Vec::with_capacity(self.len());
        self.visit_items(&mut |item| {
            rendered.push(item.to_string());
            true
        });
        rendered.join(separator)
    }

    /// Materializes the items into a `Vec` in iteration order, forcing
    /// realization.
    fn to_vec(&self) -> Vec<Self::Item> {
        let mut items = Vec::with_capacity(self.len());
        self.visit_items(&mut |item| {
            items.push(item.clone());
            true
        });
        items
    }
}
