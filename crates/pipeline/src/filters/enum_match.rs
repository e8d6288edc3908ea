//! Exact-equality filter on one enumerated field.

use crate::traits::Filter;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reads the wire value of one field of an item.
pub type FieldValue<T> = for<'a> fn(&'a T) -> &'a str;

/// A dropdown selection: a concrete value or the `all` sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Value(String),
}

impl Selection {
    /// Wire value of the sentinel
    pub const ALL: &'static str = "all";

    /// Parse a selection; blank input and `all` (any case) mean `All`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Self::ALL) {
            Selection::All
        } else {
            Selection::Value(trimmed.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selection::All => Self::ALL,
            Selection::Value(v) => v,
        }
    }
}

impl From<&str> for Selection {
    fn from(raw: &str) -> Self {
        Selection::parse(raw)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keeps items whose field equals the selected value.
///
/// With `Selection::All` the filter is inactive and keeps everything.
pub struct EnumFilter<T> {
    name: String,
    selection: Selection,
    field: FieldValue<T>,
}

impl<T> EnumFilter<T> {
    pub fn new(name: impl Into<String>, selection: Selection, field: FieldValue<T>) -> Self {
        Self {
            name: name.into(),
            selection,
            field,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }
}

impl<T> Filter<T> for EnumFilter<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        !self.selection.is_all()
    }

    fn matches(&self, item: &T) -> bool {
        match &self.selection {
            Selection::All => true,
            Selection::Value(value) => (self.field)(item) == value,
        }
    }
}
