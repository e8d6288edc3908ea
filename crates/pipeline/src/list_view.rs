//! ListView owns the state of one filtered list page.
//!
//! ## Data flow
//! source -> FilterPipeline -> sort stage -> paginator -> rows
//!
//! The filtered and sorted sequence is recomputed synchronously after every
//! change, so `total_pages` and the current page are always consistent.
//! Any change to a filter or the comparator sends the user back to page 1.

use crate::error::{PipelineError, Result};
use crate::filter_pipeline::FilterPipeline;
use crate::paginator::{Page, PageSize, page_slice, total_pages};
use crate::sort::sort_items;
use crate::traits::{Filter, SortOrder};

pub struct ListView<T, S> {
    source: Vec<T>,
    filters: FilterPipeline<T>,
    sort: S,
    page: usize,
    page_size: PageSize,
    /// Filtered and sorted, not paginated
    rows: Vec<T>,
}

impl<T: Clone, S: SortOrder<T>> ListView<T, S> {
    /// Create a view over `source` with no filters, the default sort,
    /// page 1 and the default page size.
    pub fn new(source: Vec<T>) -> Self {
        let mut view = Self {
            rows: Vec::new(),
            source,
            filters: FilterPipeline::new(),
            sort: S::default(),
            page: 1,
            page_size: PageSize::default(),
        };
        view.recompute();
        view
    }

    /// Add a filter (builder pattern).
    pub fn with_filter(mut self, filter: impl Filter<T> + 'static) -> Self {
        self.filters.set_filter(filter);
        self.recompute();
        self
    }

    pub fn with_sort(mut self, sort: S) -> Self {
        self.sort = sort;
        self.recompute();
        self
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self.clamp_page();
        self
    }

    /// Seed the page from a bookmarked URL. Out-of-range pages are clamped.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self.clamp_page();
        self
    }

    /// Replace the source sequence, e.g. after a store mutation.
    ///
    /// The current page is kept when still valid, otherwise clamped.
    pub fn set_source(&mut self, source: Vec<T>) {
        self.source = source;
        self.recompute();
        self.clamp_page();
    }

    /// Insert or replace a filter by name and reset to page 1.
    pub fn set_filter(&mut self, filter: impl Filter<T> + 'static) {
        self.filters.set_filter(filter);
        self.page = 1;
        self.recompute();
    }

    /// Remove a filter by name. Resets to page 1 if one was removed.
    pub fn remove_filter(&mut self, name: &str) -> bool {
        let removed = self.filters.remove_filter(name);
        if removed {
            self.page = 1;
            self.recompute();
        }
        removed
    }

    /// Select a comparator and reset to page 1.
    pub fn set_sort(&mut self, sort: S) {
        self.sort = sort;
        self.page = 1;
        self.recompute();
    }

    /// Change the page size and reset to page 1.
    ///
    /// A size outside the allowed set is rejected and nothing changes.
    pub fn set_page_size(&mut self, size: usize) -> Result<()> {
        self.page_size = PageSize::new(size)?;
        self.page = 1;
        Ok(())
    }

    /// Jump to `page`; rejected with no state change when out of range.
    pub fn go_to_page(&mut self, page: usize) -> Result<()> {
        let total_pages = self.total_pages();
        if page == 0 || page > total_pages {
            tracing::warn!("Rejected page {} (total pages: {})", page, total_pages);
            return Err(PipelineError::PageOutOfRange { page, total_pages });
        }
        self.page = page;
        Ok(())
    }

    pub fn next_page(&mut self) -> Result<()> {
        self.go_to_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> Result<()> {
        self.go_to_page(self.page.saturating_sub(1))
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn sort(&self) -> S {
        self.sort
    }

    pub fn filters(&self) -> &FilterPipeline<T> {
        &self.filters
    }

    pub fn source(&self) -> &[T] {
        &self.source
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.rows.len(), self.page_size)
    }

    /// Number of rows surviving the filters
    pub fn total_items(&self) -> usize {
        self.rows.len()
    }

    /// Filtered and sorted rows across all pages (what an export writes).
    pub fn filtered(&self) -> &[T] {
        &self.rows
    }

    /// Rows of the current page with pager state.
    pub fn current_page(&self) -> Page<T> {
        page_slice(&self.rows, self.page, self.page_size)
    }

    fn recompute(&mut self) {
        let mut rows = self.filters.apply(self.source.clone());
        sort_items(&mut rows, self.sort);
        tracing::debug!(
            "Recomputed list: {} of {} rows, sort {}",
            rows.len(),
            self.source.len(),
            self.sort.name()
        );
        self.rows = rows;
    }

    fn clamp_page(&mut self) {
        self.page = self.page.clamp(1, self.total_pages());
    }
}
