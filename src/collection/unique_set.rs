//! Unordered container of unique elements with deferred realization.
//!
//! This module provides [`UniqueSet`], an immutable duplicate-free
//! container that realizes into an ordered set the first time an operation
//! needs concrete structure. There are no positional operations; iteration
//! visits elements in ascending order, which is stable for a given realized
//! instance.
//!
//! # Examples
//!
//! ```rust
//! use lazy_collections::prelude::*;
//!
//! let left = unique_set![1, 2, 3];
//! let right = unique_set![3, 4];
//!
//! assert_eq!(left.union(&right).to_vec(), vec![1, 2, 3, 4]);
//! assert_eq!(left.intersect(&right).to_vec(), vec![3]);
//! ```

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use super::Collection;
use super::realize::RealizeCell;
use crate::source::Source;

/// An immutable container of unique elements.
///
/// Elements are unique under `Ord`-consistent equality; duplicates produced
/// by a source or a transformation collapse at realization. A set is either
/// realized (content behind an `Rc<BTreeSet<T>>`) or deferred (holding a
/// consume-once [`Source`]); see the [`Collection`] trait for the shared
/// realization contract.
///
/// # Examples
///
/// ```rust
/// use lazy_collections::prelude::*;
///
/// let noisy = Source::named("noisy", vec![3, 1, 3, 2, 1]);
/// let set = UniqueSet::from_source(noisy);
///
/// assert!(!set.is_realized());
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.to_vec(), vec![1, 2, 3]);
/// ```
pub struct UniqueSet<T> {
    cell: RealizeCell<T, BTreeSet<T>>,
}

impl<T: Ord + Clone + 'static> UniqueSet<T> {
    /// Creates a new empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cell: RealizeCell::realized(BTreeSet::new()),
        }
    }

    /// Creates a set containing a single element.
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::from_elements(vec![element])
    }

    /// Creates a set from concrete elements, collapsing duplicates.
    ///
    /// The set is realized immediately.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let set = UniqueSet::from_elements(vec![1, 1, 2]);
    /// assert_eq!(set.len(), 2);
    /// ```
    #[must_use]
    pub fn from_elements(elements: Vec<T>) -> Self {
        Self {
            cell: RealizeCell::realized(elements.into_iter().collect()),
        }
    }

    /// Creates a deferred set over a consume-once source.
    ///
    /// Duplicates collapse when the set realizes.
    #[must_use]
    pub fn from_source(source: Source<T>) -> Self {
        Self {
            cell: RealizeCell::deferred(source),
        }
    }

    /// Realizes and returns the shared concrete content.
    fn realized(&self) -> Rc<BTreeSet<T>> {
        self.cell.force_with(|items| items.into_iter().collect())
    }

    /// Returns the union of two sets, realizing both.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let union = unique_set![1, 2].union(&unique_set![2, 3]);
    /// assert_eq!(union.to_vec(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut content = (*self.realized()).clone();
        content.extend(other.to_vec());
        Self {
            cell: RealizeCell::realized(content),
        }
    }

    /// Returns the intersection of two sets, realizing both.
    ///
    /// Scans the smaller side and probes the larger one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let intersection = unique_set![1, 2, 3].intersect(&unique_set![2, 3, 4]);
    /// assert_eq!(intersection.to_vec(), vec![2, 3]);
    /// ```
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let left = self.realized();
        let right = other.realized();
        let (smaller, larger) = if left.len() <= right.len() {
            (&left, &right)
        } else {
            (&right, &left)
        };

        let mut content = BTreeSet::new();
        for element in smaller.iter() {
            if larger.contains(element) {
                content.insert(element.clone());
            }
        }
        Self {
            cell: RealizeCell::realized(content),
        }
    }

    /// Returns the elements of this set that are not in `other`, realizing
    /// both.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        let left = self.realized();
        let right = other.realized();
        let mut content = BTreeSet::new();
        for element in left.iter() {
            if !right.contains(element) {
                content.insert(element.clone());
            }
        }
        Self {
            cell: RealizeCell::realized(content),
        }
    }

    /// Transforms every element, producing a new deferred set.
    ///
    /// Elements mapped to the same value collapse at realization. Lazy: the
    /// receiver is not realized; if it is deferred, the result aliases its
    /// one-shot source, and the first of the two to realize takes the
    /// elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let set = unique_set![1, 2, 3];
    /// assert_eq!(set.map(|x| x / 2).to_vec(), vec![0, 1]);
    /// ```
    #[must_use]
    pub fn map<U, F>(&self, function: F) -> UniqueSet<U>
    where
        U: Ord + Clone + 'static,
        F: FnMut(T) -> U + 'static,
    {
        let name = format!("map({})", self.cell.provenance(Self::SHAPE_NAME));
        UniqueSet::from_source(Source::named(name, self.cell.item_reader().map(function)))
    }

    /// Keeps the elements satisfying the predicate, producing a new
    /// deferred set.
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

    /// Maps every element to a set and unions the results, producing a new
    /// deferred set.
    ///
    /// Lazy, with the same aliasing rule as [`map`](Self::map).
    #[must_use]
    pub fn flat_map<U, F>(&self, mut function: F) -> UniqueSet<U>
    where
        U: Ord + Clone + 'static,
        F: FnMut(T) -> UniqueSet<U> + 'static,
    {
        let name = format!("flat_map({})", self.cell.provenance(Self::SHAPE_NAME));
        UniqueSet::from_source(Source::named(
            name,
            self.cell
                .item_reader()
                .flat_map(move |item| function(item).to_vec()),
        ))
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

    /// Pairs the elements of two sets positionally over their iteration
    /// orders, realizing both.
    ///
    /// The result has as many pairs as the smaller input.
    #[must_use]
    pub fn zip<U>(&self, other: &UniqueSet<U>) -> UniqueSet<(T, U)>
    where
        U: Ord + Clone + 'static,
    {
        let pairs = self
            .to_vec()
            .into_iter()
            .zip(other.to_vec())
            .collect();
        UniqueSet::from_elements(pairs)
    }

    /// Pairs every element with its position in iteration order.
    #[must_use]
    pub fn zip_with_index(&self) -> UniqueSet<(T, usize)> {
        let pairs = self
            .to_vec()
            .into_iter()
            .enumerate()
            .map(|(index, element)| (element, index))
            .collect();
        UniqueSet::from_elements(pairs)
    }

    /// Returns a new set with the element added.
    ///
    /// Returns an equal set when the element is already present.
    #[must_use]
    pub fn inserted(&self, element: T) -> Self {
        let mut content = (*self.realized()).clone();
        content.insert(element);
        Self {
            cell: RealizeCell::realized(content),
        }
    }

    /// Returns a new set without the given element.
    #[must_use]
    pub fn removed<Q>(&self, element: &Q) -> Self
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut content = (*self.realized()).clone();
        content.remove(element);
        Self {
            cell: RealizeCell::realized(content),
        }
    }
}

impl<T: Ord + Clone + 'static> UniqueSet<UniqueSet<T>> {
    /// Unions one level of nested sets, realizing the outer set and every
    /// inner one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let nested = unique_set![unique_set![1, 2], unique_set![2, 3]];
    /// assert_eq!(nested.flatten().to_vec(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn flatten(&self) -> UniqueSet<T> {
        let outer = self.realized();
        let mut content = BTreeSet::new();
        for inner in outer.iter() {
            content.extend(inner.to_vec());
        }
        UniqueSet {
            cell: RealizeCell::realized(content),
        }
    }
}

impl<T: Ord + Clone + 'static> Collection for UniqueSet<T> {
    type Item = T;

    const SHAPE_NAME: &'static str = "UniqueSet";

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

impl<T> Clone for UniqueSet<T> {
    /// Shallow clone. A realized set shares its content; a deferred set
    /// shares its consume-once source, so of the clone and the original,
    /// whichever realizes first takes the elements.
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}

impl<T: Ord + Clone + 'static> Default for UniqueSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone + 'static> PartialEq for UniqueSet<T> {
    /// Realizes both sets and compares their concrete content.
    fn eq(&self, other: &Self) -> bool {
        *self.realized() == *other.realized()
    }
}

impl<T: Ord + Clone + 'static> Eq for UniqueSet<T> {}

impl<T: Ord + Clone + 'static> PartialOrd for UniqueSet<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord + Clone + 'static> Ord for UniqueSet<T> {
    /// Realizes both sets and compares their concrete content, so sets can
    /// nest inside ordered containers.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (*self.realized()).cmp(&*other.realized())
    }
}

/// Computes a hash over the realized content: length first, then every
/// element in ascending order, so equal sets hash equally.
impl<T: Ord + Clone + Hash + 'static> Hash for UniqueSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let content = self.realized();
        content.len().hash(state);
        for element in content.iter() {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for UniqueSet<T> {
    /// Renders the realized content, or the deferred source name without
    /// forcing realization.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.content() {
            Some(content) => {
                write!(formatter, "UniqueSet")?;
                formatter.debug_set().entries(content.iter()).finish()
            }
            None => write!(
                formatter,
                "UniqueSet(<deferred: {}>)",
                self.cell.deferred_name().unwrap_or_default()
            ),
        }
    }
}

impl<T: Ord + Clone + fmt::Display + 'static> fmt::Display for UniqueSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_realized() {
            write!(formatter, "UniqueSet({})", self.mk_string(", "))
        } else {
            write!(formatter, "{}", self.mk_string(", "))
        }
    }
}

impl<T: Ord + Clone + 'static> FromIterator<T> for UniqueSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iterable: I) -> Self {
        Self::from_elements(iterable.into_iter().collect())
    }
}

impl<T: Ord + Clone + 'static> IntoIterator for UniqueSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    /// Realizes the set and iterates its elements in ascending order.
    fn into_iter(self) -> Self::IntoIter {
        self.to_vec().into_iter()
    }
}

/// Creates a [`UniqueSet`] from a variadic list of elements.
///
/// The set is realized immediately, like [`UniqueSet::from_elements`];
/// duplicates collapse.
///
/// # Examples
///
/// ```rust
/// use lazy_collections::prelude::*;
///
/// let set = unique_set![1, 2, 2, 3];
/// assert_eq!(set.len(), 3);
///
/// let empty: UniqueSet<i32> = unique_set![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! unique_set {
    () => {
        $crate::collection::UniqueSet::new()
    };
    ($($element:expr),+ $(,)?) => {
        $crate::collection::UniqueSet::from_elements(vec![$($element),+])
    };
}
