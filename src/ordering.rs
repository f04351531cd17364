//! Presentation orderings for books.
//!
//! Each policy is a stateless value implementing [`BookOrdering`]. Policies
//! are combined with [`CompositeOrdering`], which consults them in turn until
//! one of them breaks the tie.

use std::{cmp::Ordering, fmt};

use crate::book::Book;

/// A way of comparing two books
pub trait BookOrdering {
    /// Compare `a` with `b`
    fn compare(&self, a: &Book, b: &Book) -> Ordering;
}

/// Title, case-insensitive; untitled books come last
#[derive(Debug, Clone, Copy, Default)]
pub struct ByTitle;

impl BookOrdering for ByTitle {
    fn compare(&self, a: &Book, b: &Book) -> Ordering {
        match (a.title(), b.title()) {
            (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Publication year, newest first
#[derive(Debug, Clone, Copy, Default)]
pub struct ByYearDesc;

impl BookOrdering for ByYearDesc {
    fn compare(&self, a: &Book, b: &Book) -> Ordering {
        b.year().cmp(&a.year())
    }
}

/// Available books before lent-out ones
#[derive(Debug, Clone, Copy, Default)]
pub struct ByAvailability;

impl BookOrdering for ByAvailability {
    fn compare(&self, a: &Book, b: &Book) -> Ordering {
        b.is_available().cmp(&a.is_available())
    }
}

/// Genre in natural order, then [`ByTitle`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ByGenreThenTitle;

impl BookOrdering for ByGenreThenTitle {
    fn compare(&self, a: &Book, b: &Book) -> Ordering {
        a.genre().cmp(&b.genre()).then_with(|| ByTitle.compare(a, b))
    }
}

/// Chains policies: the first one that does not report a tie decides.
///
/// An empty composite considers all books equal.
#[derive(Default)]
pub struct CompositeOrdering {
    /// Policies in priority order
    policies: Vec<Box<dyn BookOrdering>>,
}

impl fmt::Debug for CompositeOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeOrdering").field("policies", &self.policies.len()).finish()
    }
}

impl CompositeOrdering {
    /// Composite with no policies
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a policy consulted after the ones already added
    #[must_use]
    pub fn then(mut self, policy: impl BookOrdering + 'static) -> Self {
        self.policies.push(Box::new(policy));
        self
    }

    /// Whether no policy has been added
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl BookOrdering for CompositeOrdering {
    fn compare(&self, a: &Book, b: &Book) -> Ordering {
        self.policies
            .iter()
            .map(|policy| policy.compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}
