//! The seam between a record kind and the generic list pipeline.
//!
//! A `ViewDefinition` names which fields a page searches, which enum
//! parameters it filters on, which timestamp the date filter reads and
//! which comparators it offers. The free functions here turn a decoded
//! `ViewState` into a configured `ListView`.

use crate::schema::ViewSchema;
use crate::url_state::{DATE, SEARCH, ViewState};
use chrono::{DateTime, Utc};
use pipeline::filters::{
    DateRange, DateRangeFilter, EnumFilter, FieldValue, Selection, TextSearchFilter,
};
use pipeline::{ListView, SortOrder};
use serde::Serialize;
use store::{CsvExportable, Dataset, Record, RecordStore};

pub trait ViewDefinition: 'static {
    type Item: Record + CsvExportable + Serialize + 'static;
    type Sort: SortOrder<Self::Item> + std::fmt::Debug;

    /// Route segment of the page, e.g. `orders`
    const ROUTE: &'static str;

    fn schema() -> ViewSchema;

    /// Fields the search box matches against
    fn search_fields(item: &Self::Item) -> Vec<&str>;

    /// Field read by the enum parameter `param`, if the view has one
    fn enum_field(param: &str) -> Option<FieldValue<Self::Item>>;

    /// Timestamp read by the date filter
    fn timestamp(item: &Self::Item) -> Option<DateTime<Utc>>;

    fn store(dataset: &Dataset) -> &RecordStore<Self::Item>;

    fn store_mut(dataset: &mut Dataset) -> &mut RecordStore<Self::Item>;
}

pub fn search_filter<V: ViewDefinition>(term: &str) -> TextSearchFilter<V::Item> {
    TextSearchFilter::new(SEARCH, term, V::search_fields)
}

/// `None` if the view has no enum parameter called `param`.
pub fn enum_filter<V: ViewDefinition>(
    param: &str,
    selection: Selection,
) -> Option<EnumFilter<V::Item>> {
    V::enum_field(param).map(|field| EnumFilter::new(param, selection, field))
}

pub fn date_filter<V: ViewDefinition>(range: &DateRange, now: DateTime<Utc>) -> DateRangeFilter<V::Item> {
    DateRangeFilter::new(DATE, range, now, V::timestamp)
}

/// Comparator named in the state, or the view default.
pub fn sort_for<V: ViewDefinition>(name: &str) -> V::Sort {
    pipeline::resolve_sort::<V::Item, V::Sort>(Some(name))
}

/// Build a list view over `source` configured from `state`.
///
/// A page number past the end (e.g. from an old bookmark) is clamped.
pub fn build_view<V: ViewDefinition>(
    source: Vec<V::Item>,
    state: &ViewState,
    now: DateTime<Utc>,
) -> ListView<V::Item, V::Sort> {
    let schema = V::schema();
    let mut view = ListView::new(source)
        .with_sort(sort_for::<V>(&state.sort))
        .with_filter(search_filter::<V>(&state.search));

    for param in &schema.enum_params {
        if let Some(filter) = enum_filter::<V>(param.name, state.selection(param.name)) {
            view = view.with_filter(filter);
        }
    }
    if schema.has_date {
        view = view.with_filter(date_filter::<V>(&state.date, now));
    }

    view.with_page_size(state.limit).with_page(state.page)
}
