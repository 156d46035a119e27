//! Ordered, duplicate-permitting container with deferred realization.
//!
//! This module provides [`Sequence`], an immutable ordered container that
//! realizes into a `Vec` the first time an operation needs concrete
//! structure. Positional operations (`get`, `head`, `take`, `index_of`)
//! force realization; `map`, `filter`, `take_while`, and `flat_map` stay
//! lazy and return a new deferred sequence.
//!
//! # Examples
//!
//! ```rust
//! use lazy_collections::prelude::*;
//!
//! let sequence = sequence![1, 2, 3];
//!
//! assert_eq!(sequence.get(0), Ok(1));
//! assert_eq!(sequence.reverse().to_vec(), vec![3, 2, 1]);
//!
//! // Transformations never mutate; they build new sequences.
//! let doubled = sequence.map(|x| x * 2);
//! assert_eq!(sequence.to_vec(), vec![1, 2, 3]);
//! assert_eq!(doubled.to_vec(), vec![2, 4, 6]);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Add;
use std::rc::Rc;

use super::Collection;
use super::error::CollectionError;
use super::realize::RealizeCell;
use crate::source::Source;

/// An immutable ordered container with 0-based positional access.
///
/// Duplicates are permitted and insertion order is preserved. A sequence is
/// either realized (content behind an `Rc<Vec<T>>`) or deferred (holding a
/// consume-once [`Source`]); see the [`Collection`] trait for the shared
/// realization contract.
///
/// Indices are `usize`, so negative indexing does not exist in this API;
/// any access outside `[0, len)` is an out-of-range error.
///
/// # One-shot sources
///
/// The lazy combinators (`map`, `filter`, `take_while`, `flat_map`) and
/// `Clone` alias the deferred source rather than copying elements. The
/// first aliasing instance to realize takes every element; later realizers
/// see an empty sequence. Treat a deferred source as owned by whichever
/// instance you intend to realize.
///
/// # Examples
///
/// ```rust
/// use lazy_collections::prelude::*;
///
/// let evens = Sequence::from_source(Source::named("evens", (1..=10).filter(|x| x % 2 == 0)));
/// assert!(!evens.is_realized());
/// assert_eq!(evens.to_vec(), vec![2, 4, 6, 8, 10]);
/// ```
pub struct Sequence<T> {
    cell: RealizeCell<T, Vec<T>>,
}

impl<T: Clone + 'static> Sequence<T> {
    /// Creates a new empty sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let sequence: Sequence<i32> = Sequence::new();
    /// assert!(sequence.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            cell: RealizeCell::realized(Vec::new()),
        }
    }

    /// Creates a sequence containing a single element.
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::from_elements(vec![element])
    }

    /// Creates a sequence from concrete elements.
    ///
    /// The sequence is realized immediately; there is no deferral benefit
    /// when the elements are already concrete.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let sequence = Sequence::from_elements(vec![1, 2, 3]);
    /// assert!(sequence.is_realized());
    /// ```
    #[must_use]
    pub fn from_elements(elements: Vec<T>) -> Self {
        Self {
            cell: RealizeCell::realized(elements),
        }
    }

    /// Creates a deferred sequence over a consume-once source.
    ///
    /// Nothing is produced until the first operation that needs concrete
    /// structure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let sequence = Sequence::from_source(Source::named("numbers", 1..=3));
    /// assert!(!sequence.is_realized());
    /// assert_eq!(sequence.len(), 3);
    /// assert!(sequence.is_realized());
    /// ```
    #[must_use]
    pub fn from_source(source: Source<T>) -> Self {
        Self {
            cell: RealizeCell::deferred(source),
        }
    }

    /// Realizes and returns the shared concrete content.
    fn realized(&self) -> Rc<Vec<T>> {
        self.cell.force_with(|items| items)
    }

    /// Returns the element at the given index.
    ///
    /// # Errors
    ///
    /// Returns an out-of-range error when `index` is outside `[0, len)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let sequence = sequence![1, 2, 3];
    /// assert_eq!(sequence.get(1), Ok(2));
    /// assert!(sequence.get(3).is_err());
    /// ```
    pub fn get(&self, index: usize) -> Result<T, CollectionError> {
        let content = self.realized();
        content
            .get(index)
            .cloned()
            .ok_or(CollectionError::out_of_range(index, content.len()))
    }

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// Returns an empty-container error on an empty sequence.
    pub fn head(&self) -> Result<T, CollectionError> {
        self.realized()
            .first()
            .cloned()
            .ok_or(CollectionError::empty(Self::SHAPE_NAME, "head"))
    }

    /// Returns the last element.
    ///
    /// # Errors
    ///
    /// Returns an empty-container error on an empty sequence.
    pub fn last(&self) -> Result<T, CollectionError> {
        self.realized()
            .last()
            .cloned()
            .ok_or(CollectionError::empty(Self::SHAPE_NAME, "last"))
    }

    /// Returns the sequence without its first element.
    ///
    /// # Errors
    ///
    /// Returns an empty-container error on an empty sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let sequence = sequence![1, 2, 3];
    /// assert_eq!(sequence.tail().unwrap().to_vec(), vec![2, 3]);
    /// ```
    pub fn tail(&self) -> Result<Self, CollectionError> {
        let content = self.realized();
        if content.is_empty() {
            return Err(CollectionError::empty(Self::SHAPE_NAME, "tail"));
        }
        Ok(Self::from_elements(content[1..].to_vec()))
    }

    /// Returns a sequence of the first `count` elements.
    ///
    /// `count` is clamped to the length; asking for more than is available
    /// returns the whole sequence.
    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        let content = self.realized();
        Self::from_elements(content.iter().take(count).cloned().collect())
    }

    /// Returns a sequence of the last `count` elements, preserving order.
    ///
    /// `count` is clamped to the length.
    #[must_use]
    pub fn take_right(&self, count: usize) -> Self {
        let content = self.realized();
        let skip = content.len().saturating_sub(count);
        Self::from_elements(content[skip..].to_vec())
    }

    /// Returns the longest prefix of elements satisfying the predicate.
    ///
    /// Lazy: the receiver is not realized; the truncation is applied to its
    /// content or deferred source when the *result* first realizes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let sequence = sequence![1, 2, 9, 1];
    /// assert_eq!(sequence.take_while(|x| *x < 5).to_vec(), vec![1, 2]);
    /// ```
    #[must_use]
    pub fn take_while<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool + 'static,
    {
        let name = format!("take_while({})", self.cell.provenance(Self::SHAPE_NAME));
        Self::from_source(Source::named(
            name,
            self.cell.item_reader().take_while(move |item| predicate(item)),
        ))
    }

    /// Transforms every element, producing a new deferred sequence.
    ///
    /// Lazy: the receiver is not realized and `function` does not run until
    /// the result first realizes. If the receiver is itself deferred, the
    /// result aliases its one-shot source, and the first of the two to
    /// realize takes the elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let sequence = sequence![1, 2, 3];
    /// assert_eq!(sequence.map(|x| x * 10).to_vec(), vec![10, 20, 30]);
    /// ```
    #[must_use]
    pub fn map<U, F>(&self, function: F) -> Sequence<U>
    where
        U: Clone + 'static,
        F: FnMut(T) -> U + 'static,
    {
        let name = format!("map({})", self.cell.provenance(Self::SHAPE_NAME));
        Sequence::from_source(Source::named(name, self.cell.item_reader().map(function)))
    }

    /// Keeps the elements satisfying the predicate, producing a new deferred
    /// sequence.
    ///
    /// Lazy, with the same aliasing rule as [`map`](Self::map).
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool + 'static,
    {
        let name = format!("filter({})", self.cell.provenance(Self::SHAPE_NAME));
        Self::from_source(Source::named(
            name,
            self.cell.item_reader().filter(move |item| predicate(item)),
        ))
    }

    /// Maps every element to a sequence and concatenates the results,
    /// producing a new deferred sequence.
    ///
    /// Lazy, with the same aliasing rule as [`map`](Self::map).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let sequence = sequence![1, 2];
    /// let repeated = sequence.flat_map(|x| sequence![x, x]);
    /// assert_eq!(repeated.to_vec(), vec![1, 1, 2, 2]);
    /// ```
    #[must_use]
    pub fn flat_map<U, F>(&self, mut function: F) -> Sequence<U>
    where
        U: Clone + 'static,
        F: FnMut(T) -> Sequence<U> + 'static,
    {
        let name = format!("flat_map({})", self.cell.provenance(Self::SHAPE_NAME));
        Sequence::from_source(Source::named(
            name,
            self.cell
                .item_reader()
                .flat_map(move |item| function(item).to_vec()),
        ))
    }

    /// Returns the elements in ascending order.
    ///
    /// The sort is stable.
    #[must_use]
    pub fn sorted(&self) -> Self
    where
        T: Ord,
    {
        let mut items = self.to_vec();
        items.sort();
        Self::from_elements(items)
    }

    /// Returns the elements ordered by the given key function.
    ///
    /// The sort is stable: elements with equal keys keep their relative
    /// order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let words = sequence!["ccc", "a", "bb"];
    /// assert_eq!(
    ///     words.sorted_by_key(|word| word.len()).to_vec(),
    ///     vec!["a", "bb", "ccc"]
    /// );
    /// ```
    #[must_use]
    pub fn sorted_by_key<K, F>(&self, key_function: F) -> Self
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        let mut items = self.to_vec();
        items.sort_by_key(key_function);
        Self::from_elements(items)
    }

    /// Returns the elements in reversed order.
    #[must_use]
    pub fn reverse(&self) -> Self {
        let mut items = self.to_vec();
        items.reverse();
        Self::from_elements(items)
    }

    /// Sums the elements.
    ///
    /// Only available for element types with a numeric sum; summing anything
    /// else is rejected at compile time.
    #[must_use]
    pub fn sum(&self) -> T
    where
        T: std::iter::Sum<T>,
    {
        self.to_vec().into_iter().sum()
    }

    /// Returns the index of the first occurrence of `item`.
    ///
    /// Absence is reported as `None`, consistent with `find_by`.
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.index_of_from(item, 0)
    }

    /// Returns the index of the first occurrence of `item` at or after
    /// `start`.
    pub fn index_of_from(&self, item: &T, start: usize) -> Option<usize>
    where
        T: PartialEq,
    {
        self.index_where_from(|candidate| candidate == item, start)
    }

    /// Returns the index of the first element satisfying the predicate.
    pub fn index_where<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.index_where_from(predicate, 0)
    }

    /// Returns the index of the first element at or after `start` satisfying
    /// the predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let sequence = sequence![1, 8, 1, 8];
    /// assert_eq!(sequence.index_where_from(|x| *x == 8, 2), Some(3));
    /// assert_eq!(sequence.index_where_from(|x| *x == 2, 0), None);
    /// ```
    pub fn index_where_from<P>(&self, mut predicate: P, start: usize) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        let content = self.realized();
        content
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, item)| predicate(item))
            .map(|(index, _)| index)
    }

    /// Concatenates two sequences in order, realizing both.
    ///
    /// Also available through the `+` operator.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        let mut items = self.to_vec();
        items.extend(other.to_vec());
        Self::from_elements(items)
    }

    /// Pairs the elements of two sequences positionally, realizing both.
    ///
    /// The result is as long as the shorter input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let left = sequence![1, 2, 3];
    /// let right = sequence![9, 8];
    /// assert_eq!(left.zip(&right).to_vec(), vec![(1, 9), (2, 8)]);
    /// ```
    #[must_use]
    pub fn zip<U: Clone + 'static>(&self, other: &Sequence<U>) -> Sequence<(T, U)> {
        let left = self.realized();
        let right = other.realized();
        Sequence::from_elements(left.iter().cloned().zip(right.iter().cloned()).collect())
    }

    /// Pairs every element with its position.
    #[must_use]
    pub fn zip_with_index(&self) -> Sequence<(T, usize)> {
        let content = self.realized();
        Sequence::from_elements(
            content
                .iter()
                .cloned()
                .enumerate()
                .map(|(index, item)| (item, index))
                .collect(),
        )
    }

    /// Returns a new sequence with `element` appended at the back.
    #[must_use]
    pub fn appended(&self, element: T) -> Self {
        let mut items = self.to_vec();
        items.push(element);
        Self::from_elements(items)
    }

    /// Returns a new sequence with `element` at the front.
    #[must_use]
    pub fn prepended(&self, element: T) -> Self {
        let mut items = self.to_vec();
        items.insert(0, element);
        Self::from_elements(items)
    }
}

impl<T: Clone + 'static> Sequence<Sequence<T>> {
    /// Concatenates one level of nested sequences, realizing the outer
    /// sequence and every inner one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let nested = sequence![sequence![1, 2], sequence![3]];
    /// assert_eq!(nested.flatten().to_vec(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn flatten(&self) -> Sequence<T> {
        let outer = self.realized();
        let mut items = Vec::new();
        for inner in outer.iter() {
            items.extend(inner.to_vec());
        }
        Sequence::from_elements(items)
    }
}

impl<T: Clone + 'static> Collection for Sequence<T> {
    type Item = T;

    const SHAPE_NAME: &'static str = "Sequence";

    fn force(&self) {
        self.realized();
    }

    fn is_realized(&self) -> bool {
        self.cell.is_realized()
    }

    fn len(&self) -> usize {
        self.realized().len()
    }

    fn visit_items(&self, visitor: &mut dyn FnMut(&Self::Item) -> bool) {
        let content = self.realized();
        for item in content.iter() {
            if !visitor(item) {
                break;
            }
        }
    }

    fn deferred_source_name(&self) -> Option<String> {
        self.cell.deferred_name()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T> Clone for Sequence<T> {
    /// Shallow clone. A realized sequence shares its content; a deferred
    /// sequence shares its consume-once source, so of the clone and the
    /// original, whichever realizes first takes the elements.
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}

impl<T: Clone + 'static> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + PartialEq + 'static> PartialEq for Sequence<T> {
    /// Realizes both sequences and compares their concrete content.
    fn eq(&self, other: &Self) -> bool {
        *self.realized() == *other.realized()
    }
}

impl<T: Clone + Eq + 'static> Eq for Sequence<T> {}

impl<T: Clone + PartialOrd + 'static> PartialOrd for Sequence<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        (*self.realized()).partial_cmp(&*other.realized())
    }
}

impl<T: Clone + Ord + 'static> Ord for Sequence<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (*self.realized()).cmp(&*other.realized())
    }
}

/// Computes a hash over the realized content: length first, then every
/// element in order, so equal sequences hash equally.
impl<T: Clone + Hash + 'static> Hash for Sequence<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let content = self.realized();
        content.len().hash(state);
        for element in content.iter() {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    /// Renders the realized content, or the deferred source name without
    /// forcing realization.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.content() {
            Some(content) => {
                write!(formatter, "Sequence")?;
                formatter.debug_list().entries(content.iter()).finish()
            }
            None => write!(
                formatter,
                "Sequence(<deferred: {}>)",
                self.cell.deferred_name().unwrap_or_default()
            ),
        }
    }
}

impl<T: Clone + fmt::Display + 'static> fmt::Display for Sequence<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_realized() {
            write!(formatter, "Sequence({})", self.mk_string(", "))
        } else {
            write!(formatter, "{}", self.mk_string(", "))
        }
    }
}

impl<T: Clone + 'static> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iterable: I) -> Self {
        Self::from_elements(iterable.into_iter().collect())
    }
}

impl<T: Clone + 'static> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    /// Realizes the sequence and iterates its elements in order.
    fn into_iter(self) -> Self::IntoIter {
        self.to_vec().into_iter()
    }
}

impl<T: Clone + 'static> Add for Sequence<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.concat(&other)
    }
}

impl<T: Clone + 'static> Add for &Sequence<T> {
    type Output = Sequence<T>;

    fn add(self, other: Self) -> Sequence<T> {
        self.concat(other)
    }
}

/// Creates a [`Sequence`] from a variadic list of elements.
///
/// The sequence is realized immediately, like
/// [`Sequence::from_elements`].
///
/// # Examples
///
/// ```rust
/// use lazy_collections::prelude::*;
///
/// let sequence = sequence![1, 2, 3];
/// assert_eq!(sequence.len(), 3);
///
/// let empty: Sequence<i32> = sequence![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! sequence {
    () => {
        $crate::collection::Sequence::new()
    };
    ($($element:expr),+ $(,)?) => {
        $crate::collection::Sequence::from_elements(vec![$($element),+])
    };
}
