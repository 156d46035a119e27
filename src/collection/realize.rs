//! The dual-state realization cell shared by every container shape.
//!
//! A [`RealizeCell`] holds either a deferred consume-once source or the
//! realized concrete structure. The transition between the two is
//! one-directional and idempotent: `force_with` drains the source, builds
//! the concrete form, and rewrites the state exactly once. The state is only
//! rewritten after the concrete structure has been fully built, so a
//! panicking producer can never leave a cell half-realized.

use std::cell::RefCell;
use std::rc::Rc;

use crate::source::{SharedSource, Source};

/// The internal state of a container: deferred or realized.
pub(crate) enum RealizeState<I, C> {
    /// Not yet realized. Holds the shared consume-once source handle.
    Deferred(Rc<SharedSource<I>>),
    /// Realized. Holds the immutable concrete structure.
    Realized(Rc<C>),
}

/// The lazy realization cell embedded in every shape.
///
/// `I` is the item type produced by the source; `C` is the concrete
/// structure the shape realizes into (`Vec`, `BTreeMap`, `BTreeSet`).
pub(crate) struct RealizeCell<I, C> {
    state: RefCell<RealizeState<I, C>>,
}

impl<I, C> RealizeCell<I, C> {
    /// Creates a cell that is realized from the start.
    ///
    /// Used by the eager constructors: building from concrete elements has
    /// no deferral benefit, so the concrete structure is built immediately.
    pub(crate) fn realized(content: C) -> Self {
        Self {
            state: RefCell::new(RealizeState::Realized(Rc::new(content))),
        }
    }

    /// Creates a deferred cell owning the given source.
    pub(crate) fn deferred(source: Source<I>) -> Self {
        Self {
            state: RefCell::new(RealizeState::Deferred(source.into_shared())),
        }
    }

    /// Returns whether the cell has transitioned to the realized state.
    pub(crate) fn is_realized(&self) -> bool {
        matches!(&*self.state.borrow(), RealizeState::Realized(_))
    }

    /// Returns the source name if the cell is still deferred.
    pub(crate) fn deferred_name(&self) -> Option<String> {
        match &*self.state.borrow() {
            RealizeState::Deferred(source) => Some(source.name().to_string()),
            RealizeState::Realized(_) => None,
        }
    }

    /// Returns a label describing where this cell's items come from.
    ///
    /// Deferred cells report their source name; realized cells report the
    /// shape name. Lazy combinators use this to name derived sources, e.g.
    /// `map(numbers)`.
    pub(crate) fn provenance(&self, shape: &str) -> String {
        self.deferred_name()
            .unwrap_or_else(|| shape.to_string())
    }

    /// Returns the realized content without forcing realization.
    pub(crate) fn content(&self) -> Option<Rc<C>> {
        match &*self.state.borrow() {
            RealizeState::Realized(content) => Some(Rc::clone(content)),
            RealizeState::Deferred(_) => None,
        }
    }

    /// Realizes the cell, building the concrete structure from the drained
    /// source items on the first call.
    ///
    /// Idempotent: once realized, `build` is never invoked again and the
    /// cached content is returned. If `build` panics, the state is left
    /// untouched (still deferred).
    pub(crate) fn force_with(&self, build: impl FnOnce(Vec<I>) -> C) -> Rc<C> {
        let source = match &*self.state.borrow() {
            RealizeState::Realized(content) => return Rc::clone(content),
            RealizeState::Deferred(source) => Rc::clone(source),
        };

        let content = Rc::new(build(source.drain()));
        *self.state.borrow_mut() = RealizeState::Realized(Rc::clone(&content));
        content
    }
}

impl<I, C> RealizeCell<I, C>
where
    I: Clone + 'static,
    C: Clone + IntoIterator<Item = I> + 'static,
{
    /// Returns an owning iterator over this cell's items without forcing
    /// realization.
    ///
    /// Realized cells hand out a deferred clone of their content; deferred
    /// cells hand out a reader that takes the shared source on first
    /// advance. Either way, building the iterator observes nothing and
    /// consumes nothing, which is what lets `map`/`filter` stay lazy.
    pub(crate) fn item_reader(&self) -> Box<dyn Iterator<Item = I>> {
        match &*self.state.borrow() {
            RealizeState::Realized(content) => {
                let content = Rc::clone(content);
                Box::new(std::iter::once_with(move || (*content).clone().into_iter()).flatten())
            }
            RealizeState::Deferred(source) => source.reader(),
        }
    }
}

impl<I, C> Clone for RealizeCell<I, C> {
    /// Shallow clone: realized cells share the concrete structure, deferred
    /// cells share the consume-once handle. Cloning a deferred cell aliases
    /// the one-shot source; the first clone to realize wins the elements.
    fn clone(&self) -> Self {
        let state = match &*self.state.borrow() {
            RealizeState::Realized(content) => RealizeState::Realized(Rc::clone(content)),
            RealizeState::Deferred(source) => RealizeState::Deferred(Rc::clone(source)),
        };
        Self {
            state: RefCell::new(state),
        }
    }
}
