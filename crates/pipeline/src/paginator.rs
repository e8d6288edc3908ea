//! Paginator: fixed-size pages over the filtered, sorted sequence.

use crate::error::{PipelineError, Result};
use serde::Serialize;
use std::fmt;

/// Page sizes offered by every list view
pub const PAGE_SIZES: [usize; 5] = [10, 20, 30, 40, 50];

/// Page size a list view starts with
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A page size from the allowed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PageSize(usize);

impl PageSize {
    pub fn new(size: usize) -> Result<Self> {
        if PAGE_SIZES.contains(&size) {
            Ok(PageSize(size))
        } else {
            Err(PipelineError::InvalidPageSize {
                size,
                allowed: &PAGE_SIZES,
            })
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(DEFAULT_PAGE_SIZE)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = PipelineError;

    fn try_from(size: usize) -> Result<Self> {
        PageSize::new(size)
    }
}

/// One page of rows plus the boundary state the pager renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// `max(1, ceil(len / size))`
pub fn total_pages(len: usize, size: PageSize) -> usize {
    len.div_ceil(size.get()).max(1)
}

/// Slice out page `page` (1-based) of `items`.
///
/// Fails with `PageOutOfRange` outside `[1, total_pages]`. The last page
/// may be short; an empty sequence has exactly one empty page.
pub fn paginate<T: Clone>(items: &[T], page: usize, size: PageSize) -> Result<Page<T>> {
    let total_pages = total_pages(items.len(), size);
    if page == 0 || page > total_pages {
        return Err(PipelineError::PageOutOfRange { page, total_pages });
    }

    Ok(page_slice(items, page, size))
}

/// Page `page` with bounds clamped; callers validate the page number.
pub(crate) fn page_slice<T: Clone>(items: &[T], page: usize, size: PageSize) -> Page<T> {
    let total_pages = total_pages(items.len(), size);
    let page = page.clamp(1, total_pages);
    let start = ((page - 1) * size.get()).min(items.len());
    let end = (page * size.get()).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        page,
        page_size: size.get(),
        total_items: items.len(),
        total_pages,
        has_prev: page > 1,
        has_next: page < total_pages,
    }
}
