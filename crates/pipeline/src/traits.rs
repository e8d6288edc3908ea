//! Core traits for the list pipeline.
//!
//! This module defines the two seams of a list view:
//! - `Filter<T>`: one named predicate in the filter chain
//! - `SortOrder<T>`: the closed set of comparators a view offers

use std::cmp::Ordering;

/// Core trait for filtering list items.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows a configured view to be shared with other tasks
/// - Filters are pure: `matches` must depend only on the item and the
///   filter's own configuration
/// - `apply` takes ownership of the Vec and returns the survivors in their
///   original relative order
pub trait Filter<T>: Send + Sync {
    /// Returns the name of this filter (for logging and replacement)
    fn name(&self) -> &str;

    /// Whether the filter constrains anything. Inactive filters are skipped.
    fn is_active(&self) -> bool {
        true
    }

    /// Returns true if the item passes this filter.
    fn matches(&self, item: &T) -> bool;

    /// Apply this filter to a set of items.
    fn apply(&self, items: Vec<T>) -> Vec<T> {
        if !self.is_active() {
            return items;
        }
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}

/// A closed set of comparators for one kind of item.
///
/// Implemented by small fieldless enums. The name is the value used in the
/// `sort` query parameter.
pub trait SortOrder<T>: Copy + Eq + Default + Send + Sync + 'static {
    /// Every comparator the view offers
    fn all() -> &'static [Self];

    /// Stable identifier, e.g. `newest` or `amount-desc`
    fn name(&self) -> &'static str;

    /// Total order between two items
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Look a comparator up by name (case-insensitive).
    fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|order| order.name().eq_ignore_ascii_case(name))
    }
}
