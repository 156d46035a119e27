//! Consume-once data sources for deferred container construction.
//!
//! This module provides the [`Source`] type, a named, consume-once producer
//! of elements. A `Source` is moved into exactly one container; the
//! container drains it the first time an operation needs concrete structure.
//!
//! # One-shot semantics
//!
//! A `Source` may wrap a producer that cannot be restarted (a channel drain,
//! a file reader, a generator). Draining it is therefore destructive: the
//! first container to realize takes every element, and any other instance
//! aliasing the same source afterwards sees an empty drain. `Source` is not
//! `Clone`, so aliasing can only arise through the lazy combinators
//! (`map`, `filter`, ...) and through cloning a deferred container, both of
//! which document the hazard.
//!
//! # Examples
//!
//! ```rust
//! use lazy_collections::prelude::*;
//!
//! let source = Source::named("squares", (1..=4).map(|x| x * x));
//! let sequence = Sequence::from_source(source);
//!
//! assert!(!sequence.is_realized());
//! assert_eq!(sequence.to_vec(), vec![1, 4, 9, 16]);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// The name given to sources constructed without an explicit one.
const ANONYMOUS_NAME: &str = "<anonymous>";

/// A named, consume-once producer of elements.
///
/// `Source<T>` wraps an arbitrary finite iterator together with a diagnostic
/// name. It is the deferred entry point of every container shape: passing a
/// `Source` to [`Sequence::from_source`], [`Mapping::from_source`], or
/// [`UniqueSet::from_source`] constructs an unrealized container that drains
/// the source on first need.
///
/// `Source` is intentionally **not** `Clone`. Moving it into a container
/// transfers exclusive ownership, which is what makes the one-shot contract
/// checkable by the type system instead of by convention.
///
/// [`Sequence::from_source`]: crate::collection::Sequence::from_source
/// [`Mapping::from_source`]: crate::collection::Mapping::from_source
/// [`UniqueSet::from_source`]: crate::collection::UniqueSet::from_source
///
/// # Examples
///
/// ```rust
/// use lazy_collections::Source;
///
/// let anonymous = Source::new(vec![1, 2, 3]);
/// assert_eq!(anonymous.name(), "<anonymous>");
///
/// let named = Source::named("fibonacci", [1, 1, 2, 3, 5]);
/// assert_eq!(named.name(), "fibonacci");
/// ```
pub struct Source<T> {
    name: String,
    iterator: Box<dyn Iterator<Item = T>>,
}

impl<T> Source<T> {
    /// Creates an anonymous source from any finite iterable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::Source;
    ///
    /// let source = Source::new(1..=3);
    /// assert_eq!(source.name(), "<anonymous>");
    /// ```
    pub fn new<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::named(ANONYMOUS_NAME, iterable)
    }

    /// Creates a named source from any finite iterable.
    ///
    /// The name is carried through realization and shows up in diagnostics
    /// (`Debug` output and `mk_string` on unrealized containers), which is
    /// the only way to inspect a deferred container without consuming its
    /// producer.
    ///
    /// # Arguments
    ///
    /// * `name` - A diagnostic label for the producer
    /// * `iterable` - The elements to produce
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::Source;
    ///
    /// let source = Source::named("readings", vec![0.1, 0.4, 0.9]);
    /// assert_eq!(source.name(), "readings");
    /// ```
    pub fn named<I>(name: impl Into<String>, iterable: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self {
            name: name.into(),
            iterator: Box::new(iterable.into_iter()),
        }
    }

    /// Creates a source that produces no elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::Source;
    ///
    /// let source: Source<i32> = Source::empty();
    /// assert_eq!(source.name(), "<empty>");
    /// ```
    #[must_use]
    pub fn empty() -> Self
    where
        T: 'static,
    {
        Self {
            name: String::from("<empty>"),
            iterator: Box::new(std::iter::empty()),
        }
    }

    /// Returns the diagnostic name of this source.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Converts this source into the shared consume-once handle used by the
    /// container internals.
    pub(crate) fn into_shared(self) -> Rc<SharedSource<T>> {
        Rc::new(SharedSource {
            name: self.name,
            iterator: RefCell::new(Some(self.iterator)),
        })
    }
}

impl<T> fmt::Debug for Source<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Source").field(&self.name).finish()
    }
}

// =============================================================================
// SharedSource
// =============================================================================

/// The shared consume-once handle behind every deferred container.
///
/// Lazy combinators alias this handle instead of copying elements: whichever
/// aliasing instance realizes first takes the iterator, and every later
/// drain yields nothing. The name outlives consumption so diagnostics keep
/// working after the elements are gone.
pub(crate) struct SharedSource<T> {
    name: String,
    iterator: RefCell<Option<Box<dyn Iterator<Item = T>>>>,
}

impl<T> SharedSource<T> {
    /// Returns the diagnostic name of the underlying source.
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Takes every remaining element out of the source.
    ///
    /// Returns an empty vector if the source has already been consumed by
    /// another aliasing instance.
    pub(crate) fn drain(&self) -> Vec<T> {
        self.iterator
            .borrow_mut()
            .take()
            .map_or_else(Vec::new, Iterator::collect)
    }

    /// Returns an iterator that takes the source on first advance.
    ///
    /// The take is deferred: building the reader does not consume anything,
    /// so the original container keeps its claim on the elements until one
    /// of the aliasing instances actually realizes.
    pub(crate) fn reader(self: &Rc<Self>) -> Box<dyn Iterator<Item = T>>
    where
        T: 'static,
    {
        let shared = Rc::clone(self);
        Box::new(
            std::iter::once_with(move || {
                shared
                    .iterator
                    .borrow_mut()
                    .take()
                    .map_or_else(|| Box::new(std::iter::empty()) as Box<dyn Iterator<Item = T>>, |iterator| iterator)
            })
            .flatten(),
        )
    }
}

impl<T> fmt::Debug for SharedSource<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.iterator.borrow().is_some() {
            "pending"
        } else {
            "consumed"
        };
        formatter
            .debug_struct("SharedSource")
            .field("name", &self.name)
            .field("state", &state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn source_carries_its_name() {
        let source = Source::named("numbers", 1..=3);
        assert_eq!(source.name(), "numbers");
    }

    #[rstest]
    fn anonymous_source_uses_placeholder_name() {
        let source = Source::new(vec!["a", "b"]);
        assert_eq!(source.name(), "<anonymous>");
    }

    #[rstest]
    fn shared_source_drains_once() {
        let shared = Source::named("once", 1..=3).into_shared();
        assert_eq!(shared.drain(), vec![1, 2, 3]);
        assert_eq!(shared.drain(), Vec::<i32>::new());
    }

    #[rstest]
    fn reader_defers_the_take() {
        let shared = Source::named("deferred", 1..=3).into_shared();
        let reader = shared.reader();

        // Building the reader must not consume the source.
        assert_eq!(shared.drain(), vec![1, 2, 3]);

        // The reader lost the race and sees nothing.
        assert_eq!(reader.count(), 0);
    }

    #[rstest]
    fn reader_takes_the_source_on_first_advance() {
        let shared = Source::named("race", 1..=3).into_shared();
        let collected: Vec<i32> = shared.reader().collect();
        assert_eq!(collected, vec![1, 2, 3]);
        assert_eq!(shared.drain(), Vec::<i32>::new());
    }
}
