//! Key-to-value container with unique keys and deferred realization.
//!
//! This module provides [`Mapping`], an immutable associative container
//! that realizes into an ordered map the first time an operation needs
//! concrete structure. Keys are unique; when a deferred source produces the
//! same key twice, the later pair wins. Iteration visits pairs in ascending
//! key order.
//!
//! # Examples
//!
//! ```rust
//! use lazy_collections::prelude::*;
//!
//! let scores = mapping! { "ada" => 10, "grace" => 12 };
//!
//! assert_eq!(scores.get(&"ada"), Some(10));
//! assert_eq!(scores.get(&"linus"), None);
//! assert_eq!(scores.get_or_else(&"linus", 0), 0);
//! ```

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use super::Collection;
use super::error::CollectionError;
use super::realize::RealizeCell;
use crate::source::Source;

/// An immutable key-to-value container with unique keys.
///
/// A mapping is either realized (content behind an `Rc<BTreeMap<K, V>>`) or
/// deferred (holding a consume-once [`Source`] of key-value pairs); see the
/// [`Collection`] trait for the shared realization contract. The item type
/// visited by the shared operations is the pair `(K, V)`.
///
/// Iteration order is the realized structure's natural order: ascending by
/// key. `head` and `last` are the first and last pair in that order.
///
/// # Examples
///
/// ```rust
/// use lazy_collections::prelude::*;
///
/// let pairs = Source::named("pairs", vec![("b", 2), ("a", 1), ("a", 7)]);
/// let mapping = Mapping::from_source(pairs);
///
/// assert!(!mapping.is_realized());
/// // Later pair wins on duplicate keys.
/// assert_eq!(mapping.get(&"a"), Some(7));
/// assert_eq!(mapping.head(), Ok(("a", 7)));
/// ```
pub struct Mapping<K, V> {
    cell: RealizeCell<(K, V), BTreeMap<K, V>>,
}

impl<K, V> Mapping<K, V>
where
    K: Ord + Clone + 'static,
    V: Clone + 'static,
{
    /// Creates a new empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cell: RealizeCell::realized(BTreeMap::new()),
        }
    }

    /// Creates a mapping containing a single key-value pair.
    #[must_use]
    pub fn singleton(key: K, value: V) -> Self {
        Self::from_pairs(vec![(key, value)])
    }

    /// Creates a mapping from concrete key-value pairs.
    ///
    /// The mapping is realized immediately. Duplicate keys collapse, later
    /// pair wins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let mapping = Mapping::from_pairs(vec![("a", 1), ("b", 2), ("a", 3)]);
    /// assert_eq!(mapping.len(), 2);
    /// assert_eq!(mapping.get(&"a"), Some(3));
    /// ```
    #[must_use]
    pub fn from_pairs(pairs: Vec<(K, V)>) -> Self {
        Self {
            cell: RealizeCell::realized(pairs.into_iter().collect()),
        }
    }

    /// Creates a deferred mapping over a consume-once source of pairs.
    ///
    /// Nothing is produced until the first operation that needs concrete
    /// structure.
    #[must_use]
    pub fn from_source(source: Source<(K, V)>) -> Self {
        Self {
            cell: RealizeCell::deferred(source),
        }
    }

    /// Realizes and returns the shared concrete content.
    fn realized(&self) -> Rc<BTreeMap<K, V>> {
        self.cell.force_with(|pairs| pairs.into_iter().collect())
    }

    /// Returns the value for the given key, or `None` if the key is absent.
    ///
    /// Absence is a normal outcome, not an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let mapping = mapping! { "a" => 1 };
    /// assert_eq!(mapping.get(&"a"), Some(1));
    /// assert_eq!(mapping.get(&"z"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.realized().get(key).cloned()
    }

    /// Returns the value for the given key, or `default` if the key is
    /// absent.
    pub fn get_or_else<Q>(&self, key: &Q, default: V) -> V
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).unwrap_or(default)
    }

    /// Returns whether the mapping has a value for the given key.
    pub fn is_defined_at<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.realized().contains_key(key)
    }

    /// Returns the first key-value pair in iteration order.
    ///
    /// # Errors
    ///
    /// Returns an empty-container error on an empty mapping.
    pub fn head(&self) -> Result<(K, V), CollectionError> {
        self.realized()
            .iter()
            .next()
            .map(|(key, value)| (key.clone(), value.clone()))
            .ok_or(CollectionError::empty(Self::SHAPE_NAME, "head"))
    }

    /// Returns the last key-value pair in iteration order.
    ///
    /// # Errors
    ///
    /// Returns an empty-container error on an empty mapping.
    pub fn last(&self) -> Result<(K, V), CollectionError> {
        self.realized()
            .iter()
            .next_back()
            .map(|(key, value)| (key.clone(), value.clone()))
            .ok_or(CollectionError::empty(Self::SHAPE_NAME, "last"))
    }

    /// Returns the prefix of pairs, in iteration order, for which the
    /// predicate holds, stopping at the first failure.
    ///
    /// This is a prefix, not a filter: a pair after the first failing one is
    /// excluded even if it would satisfy the predicate. Forces realization
    /// (the prefix is defined by the realized order).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let mapping = mapping! { 1 => "a", 2 => "b", 3 => "a", 4 => "a" };
    /// let prefix = mapping.take_while(|(_, value)| *value == "a");
    /// assert_eq!(prefix.to_vec(), vec![(1, "a")]);
    /// ```
    #[must_use]
    pub fn take_while<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&(K, V)) -> bool,
    {
        let content = self.realized();
        let mut pairs = Vec::new();
        for (key, value) in content.iter() {
            let pair = (key.clone(), value.clone());
            if !predicate(&pair) {
                break;
            }
            pairs.push(pair);
        }
        Self::from_pairs(pairs)
    }

    /// Transforms every key-value pair, producing a new deferred mapping.
    ///
    /// The function receives the whole pair and returns a replacement pair,
    /// so re-keying is supported. Duplicate result keys collapse, later pair
    /// wins. Lazy: the receiver is not realized; if it is deferred, the
    /// result aliases its one-shot source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_collections::prelude::*;
    ///
    /// let mapping = mapping! { "a" => 1, "b" => 2 };
    /// let swapped = mapping.map(|(key, value)| (value, key));
    /// assert_eq!(swapped.get(&2), Some("b"));
    /// ```
    #[must_use]
    pub fn map<K2, V2, F>(&self, function: F) -> Mapping<K2, V2>
    where
        K2: Ord + Clone + 'static,
        V2: Clone + 'static,
        F: FnMut((K, V)) -> (K2, V2) + 'static,
    {
        let name = format!("map({})", self.cell.provenance(Self::SHAPE_NAME));
        Mapping::from_source(Source::named(name, self.cell.item_reader().map(function)))
    }

    /// Keeps the pairs satisfying the predicate, producing a new deferred
    /// mapping.
    ///
    /// Lazy, with the same aliasing rule as [`map`](Self::map).
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&(K, V)) -> bool + 'static,
    {
        let name = format!("filter({})", self.cell.provenance(Self::SHAPE_NAME));
        Self::from_source(Source::named(
            name,
            self.cell.item_reader().filter(move |pair| predicate(pair)),
        ))
    }

    /// Returns the keys in iteration order as a [`Sequence`].
    #[must_use]
    pub fn keys(&self) -> crate::collection::Sequence<K> {
        self.realized().keys().cloned().collect()
    }

    /// Returns the values in iteration order as a [`Sequence`].
    #[must_use]
    pub fn values(&self) -> crate::collection::Sequence<V> {
        self.realized().values().cloned().collect()
    }

    /// Returns a new mapping with the given entry added or replaced.
    #[must_use]
    pub fn updated(&self, key: K, value: V) -> Self {
        let mut content = (*self.realized()).clone();
        content.insert(key, value);
        Self {
            cell: RealizeCell::realized(content),
        }
    }

    /// Returns a new mapping without the given key.
    ///
    /// Returns an equal mapping when the key is absent.
    #[must_use]
    pub fn removed<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut content = (*self.realized()).clone();
        content.remove(key);
        Self {
            cell: RealizeCell::realized(content),
        }
    }

    /// Pairs the items of two mappings positionally, realizing both.
    ///
    /// The result is keyed by the left pair and truncated to the shorter
    /// input.
    #[must_use]
    pub fn zip<K2, V2>(&self, other: &Mapping<K2, V2>) -> Mapping<(K, V), (K2, V2)>
    where
        V: Ord,
        K2: Ord + Clone + 'static,
        V2: Clone + 'static,
    {
        let left = self.to_vec();
        let right = other.to_vec();
        Mapping::from_pairs(left.into_iter().zip(right).collect())
    }

    /// Pairs every item with its position in iteration order.
    #[must_use]
    pub fn zip_with_index(&self) -> Mapping<(K, V), usize>
    where
        V: Ord,
    {
        let pairs = self
            .to_vec()
            .into_iter()
            .enumerate()
            .map(|(index, pair)| (pair, index))
            .collect();
        Mapping::from_pairs(pairs)
    }

    /// Joins the rendered pairs with the separator.
    ///
    /// Pairs render as `key -> value`. On a deferred mapping this returns a
    /// diagnostic naming the deferred source without forcing realization.
    pub fn mk_string(&self, separator: &str) -> String
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        if let Some(name) = self.cell.deferred_name() {
            return format!("{}(<deferred: {name}>)", Self::SHAPE_NAME);
        }
        self.realized()
            .iter()
            .map(|(key, value)| format!("{key} -> {value}"))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl<K, V> Collection for Mapping<K, V>
where
    K: Ord + Clone + 'static,
    V: Clone + 'static,
{
    type Item = (K, V);

    const SHAPE_NAME: &'static str = "Mapping";

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
        for (key, value) in content.iter() {
            let pair = (key.clone(), value.clone());
            if !visitor(&pair) {
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

impl<K, V> Clone for Mapping<K, V> {
    /// Shallow clone. A realized mapping shares its content; a deferred
    /// mapping shares its consume-once source, so of the clone and the
    /// original, whichever realizes first takes the pairs.
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}

impl<K, V> Default for Mapping<K, V>
where
    K: Ord + Clone + 'static,
    V: Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> PartialEq for Mapping<K, V>
where
    K: Ord + Clone + 'static,
    V: Clone + PartialEq + 'static,
{
    /// Realizes both mappings and compares their concrete content.
    fn eq(&self, other: &Self) -> bool {
        *self.realized() == *other.realized()
    }
}

impl<K, V> Eq for Mapping<K, V>
where
    K: Ord + Clone + 'static,
    V: Clone + Eq + 'static,
{
}

/// Computes a hash over the realized content: length first, then every pair
/// in key order, so equal mappings hash equally.
impl<K, V> Hash for Mapping<K, V>
where
    K: Ord + Clone + Hash + 'static,
    V: Clone + Hash + 'static,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        let content = self.realized();
        content.len().hash(state);
        for (key, value) in content.iter() {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Mapping<K, V> {
    /// Renders the realized content, or the deferred source name without
    /// forcing realization.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.content() {
            Some(content) => {
                write!(formatter, "Mapping")?;
                formatter.debug_map().entries(content.iter()).finish()
            }
            None => write!(
                formatter,
                "Mapping(<deferred: {}>)",
                self.cell.deferred_name().unwrap_or_default()
            ),
        }
    }
}

impl<K, V> fmt::Display for Mapping<K, V>
where
    K: Ord + Clone + fmt::Display + 'static,
    V: Clone + fmt::Display + 'static,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_realized() {
            write!(formatter, "Mapping({})", self.mk_string(", "))
        } else {
            write!(formatter, "{}", self.mk_string(", "))
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Mapping<K, V>
where
    K: Ord + Clone + 'static,
    V: Clone + 'static,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iterable: I) -> Self {
        Self::from_pairs(iterable.into_iter().collect())
    }
}

impl<K, V> IntoIterator for Mapping<K, V>
where
    K: Ord + Clone + 'static,
    V: Clone + 'static,
{
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    /// Realizes the mapping and iterates its pairs in ascending key order.
    fn into_iter(self) -> Self::IntoIter {
        self.to_vec().into_iter()
    }
}

/// Creates a [`Mapping`] from a variadic list of `key => value` entries.
///
/// The mapping is realized immediately, like [`Mapping::from_pairs`];
/// duplicate keys collapse, later entry wins.
///
/// # Examples
///
/// ```rust
/// use lazy_collections::prelude::*;
///
/// let mapping = mapping! { "a" => 1, "b" => 2 };
/// assert_eq!(mapping.len(), 2);
///
/// let empty: Mapping<&str, i32> = mapping! {};
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! mapping {
    () => {
        $crate::collection::Mapping::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::collection::Mapping::from_pairs(vec![$(($key, $value)),+])
    };
}
