//! Error types for the pipeline crate.

use thiserror::Error;

/// Validation failures raised by the paginator and list view.
///
/// A failed call never changes the state of the list view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Requested page is outside `[1, total_pages]`
    #[error("Page {page} is out of range (1..={total_pages})")]
    PageOutOfRange { page: usize, total_pages: usize },

    /// Page size is not one of the allowed sizes
    #[error("Invalid page size {size}; allowed sizes are {allowed:?}")]
    InvalidPageSize {
        size: usize,
        allowed: &'static [usize],
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, PipelineError>;
