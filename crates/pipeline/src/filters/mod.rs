//! Filter implementations for the list pipeline.
//!
//! This module contains the concrete filters that can be composed
//! into a FilterPipeline. All of them are generic over the item type and
//! read item fields through plain function pointers supplied by the view.

pub mod date_range;
pub mod enum_match;
pub mod predicate;
pub mod text_search;

// Re-export for convenience
pub use date_range::{DatePreset, DateRange, DateRangeFilter, TimeWindow, Timestamp};
pub use enum_match::{EnumFilter, FieldValue, Selection};
pub use predicate::PredicateFilter;
pub use text_search::{TextFields, TextSearchFilter};
