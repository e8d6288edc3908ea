//! Filtered list pipeline for the admin list pages.
//!
//! This crate provides:
//! - Filter trait and implementations (text search, enum match, date range)
//! - FilterPipeline for composing filters
//! - Sort stage over a closed per-view set of comparators
//! - Paginator with a fixed set of page sizes
//! - ListView owning the state of one list page
//! - Debouncer for committing search text after a quiet period
//!
//! ## Architecture
//! Every list page processes its rows in stages:
//! 1. Filters remove rows that fail any active predicate
//! 2. The selected comparator orders the survivors (stable)
//! 3. The paginator slices out the current page
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::filters::*;
//! use pipeline::ListView;
//!
//! let mut view: ListView<Order, OrderSort> = ListView::new(orders)
//!     .with_filter(TextSearchFilter::new("search", "ali", order_search_fields))
//!     .with_filter(EnumFilter::new("status", Selection::from("pending"), order_status));
//!
//! view.set_page_size(20)?;
//! let page = view.current_page();
//! ```

pub mod debounce;
pub mod error;
pub mod filter_pipeline;
pub mod filters;
pub mod list_view;
pub mod paginator;
pub mod sort;
pub mod traits;

// Re-export main types
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use error::{PipelineError, Result};
pub use filter_pipeline::FilterPipeline;
pub use list_view::ListView;
pub use paginator::{DEFAULT_PAGE_SIZE, PAGE_SIZES, Page, PageSize, paginate, total_pages};
pub use sort::{resolve_sort, sort_items};
pub use traits::{Filter, SortOrder};
