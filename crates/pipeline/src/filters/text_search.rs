//! Case-insensitive substring search across several fields.
//!
//! An item matches when ANY of its designated fields contains the term.
//! A blank term makes the filter inactive.

use crate::traits::Filter;

/// Extracts the searchable fields of an item.
pub type TextFields<T> = for<'a> fn(&'a T) -> Vec<&'a str>;

pub struct TextSearchFilter<T> {
    name: String,
    /// Lower-cased, trimmed search term
    term: String,
    fields: TextFields<T>,
}

impl<T> TextSearchFilter<T> {
    /// Create a new TextSearchFilter.
    ///
    /// # Arguments
    /// * `name` - Filter name, usually `search`
    /// * `term` - Committed search text; surrounding whitespace is ignored
    /// * `fields` - Returns the fields to search, e.g. id, name and phone
    pub fn new(name: impl Into<String>, term: &str, fields: TextFields<T>) -> Self {
        Self {
            name: name.into(),
            term: term.trim().to_lowercase(),
            fields,
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }
}

impl<T> Filter<T> for TextSearchFilter<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        !self.term.is_empty()
    }

    fn matches(&self, item: &T) -> bool {
        if self.term.is_empty() {
            return true;
        }
        (self.fields)(item)
            .into_iter()
            .any(|field| field.to_lowercase().contains(&self.term))
    }
}
