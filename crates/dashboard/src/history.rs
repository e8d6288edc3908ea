//! Browser history as seen by a list page.
//!
//! Filter changes rewrite the current entry instead of pushing a new one,
//! so the back button leaves the page rather than undoing a keystroke.

/// The query string of the current location plus the ability to replace it.
pub trait History {
    /// Current query string, without the leading `?`
    fn query(&self) -> &str;

    /// Replace the current entry's query string (never pushes).
    fn replace(&mut self, query: &str);
}

/// In-process history used by the CLI and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHistory {
    path: String,
    query: String,
    replacements: usize,
}

impl MemoryHistory {
    /// Start at `path?query`; a leading `?` on `query` is dropped.
    pub fn new(path: impl Into<String>, query: &str) -> Self {
        Self {
            path: path.into(),
            query: query.trim_start_matches('?').to_string(),
            replacements: 0,
        }
    }

    /// Parse a relative URL such as `/orders?status=pending`.
    pub fn from_url(url: &str) -> Self {
        match url.split_once('?') {
            Some((path, query)) => Self::new(path, query),
            None => Self::new(url, ""),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of times the entry was replaced
    pub fn replacements(&self) -> usize {
        self.replacements
    }

    /// Full relative URL of the current entry.
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

impl History for MemoryHistory {
    fn query(&self) -> &str {
        &self.query
    }

    fn replace(&mut self, query: &str) {
        self.query = query.trim_start_matches('?').to_string();
        self.replacements += 1;
    }
}
