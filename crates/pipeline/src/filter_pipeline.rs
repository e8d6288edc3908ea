//! The FilterPipeline chains multiple filters.
//!
//! This module provides the FilterPipeline struct that holds an ordered set
//! of named filters, built with the builder pattern and edited in place as
//! the user changes filter selections.

use crate::traits::Filter;

/// Chains multiple filters together into a processing pipeline.
///
/// Filters are identified by name: setting a filter whose name is already
/// present replaces it in place, keeping the chain order stable.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(TextSearchFilter::new("search", "ali", order_search_fields))
///     .add_filter(EnumFilter::new("status", Selection::from("pending"), order_status));
///
/// let filtered = pipeline.apply(orders);
/// ```
pub struct FilterPipeline<T> {
    filters: Vec<Box<dyn Filter<T>>>,
}

impl<T> FilterPipeline<T> {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter<T> + 'static) -> Self {
        self.set_filter(filter);
        self
    }

    /// Insert a filter, replacing any filter with the same name.
    pub fn set_filter(&mut self, filter: impl Filter<T> + 'static) {
        let filter: Box<dyn Filter<T>> = Box::new(filter);
        match self.filters.iter().position(|f| f.name() == filter.name()) {
            Some(idx) => self.filters[idx] = filter,
            None => self.filters.push(filter),
        }
    }

    /// Remove a filter by name. Returns true if one was removed.
    pub fn remove_filter(&mut self, name: &str) -> bool {
        let before = self.filters.len();
        self.filters.retain(|f| f.name() != name);
        self.filters.len() != before
    }

    pub fn get(&self, name: &str) -> Option<&dyn Filter<T>> {
        self.filters
            .iter()
            .find(|f| f.name() == name)
            .map(|f| f.as_ref())
    }

    /// Filter names, in chain order.
    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Number of filters currently constraining the result.
    pub fn active_count(&self) -> usize {
        self.filters.iter().filter(|f| f.is_active()).count()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns true if the item passes every active filter.
    pub fn matches(&self, item: &T) -> bool {
        self.filters
            .iter()
            .filter(|f| f.is_active())
            .all(|f| f.matches(item))
    }

    /// Apply all filters in sequence to the items.
    ///
    /// ## Algorithm
    /// 1. Start with the input items
    /// 2. For each active filter in order:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Return final filtered set, in original relative order
    pub fn apply(&self, items: Vec<T>) -> Vec<T> {
        let mut current = items;
        for filter in self.filters.iter().filter(|f| f.is_active()) {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl<T> Default for FilterPipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}
