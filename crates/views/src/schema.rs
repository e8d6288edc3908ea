//! What a list page tracks in its query string.

use pipeline::SortOrder;
use pipeline::filters::Selection;
use serde::Serialize;

/// A dropdown filter bound to one query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumParam {
    pub name: &'static str,
    /// Allowed wire values; `None` accepts any non-blank value
    pub values: Option<Vec<&'static str>>,
}

impl EnumParam {
    /// A parameter restricted to a fixed set of values.
    pub fn closed(name: &'static str, values: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            name,
            values: Some(values.into_iter().collect()),
        }
    }

    /// A parameter whose values come from the data, e.g. product categories.
    pub fn open(name: &'static str) -> Self {
        Self { name, values: None }
    }

    /// Validate a raw query value. Known values are returned in their
    /// canonical spelling; anything else is `None`.
    pub fn accept(&self, raw: &str) -> Option<Selection> {
        match Selection::parse(raw) {
            Selection::All => Some(Selection::All),
            Selection::Value(value) => match &self.values {
                None => Some(Selection::Value(value)),
                Some(values) => values
                    .iter()
                    .find(|v| v.eq_ignore_ascii_case(&value))
                    .map(|v| Selection::Value(v.to_string())),
            },
        }
    }
}

/// Parameters, comparators and capabilities of one list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSchema {
    pub name: &'static str,
    /// Enum parameters, in query-string order
    pub enum_params: Vec<EnumParam>,
    pub sorts: Vec<&'static str>,
    pub default_sort: &'static str,
    pub has_date: bool,
}

impl ViewSchema {
    /// Start a schema whose sorts are every comparator of `S`.
    pub fn new<T, S: SortOrder<T>>(name: &'static str) -> Self {
        Self {
            name,
            enum_params: Vec::new(),
            sorts: S::all().iter().map(|s| s.name()).collect(),
            default_sort: S::default().name(),
            has_date: false,
        }
    }

    /// Add an enum parameter (builder pattern).
    pub fn with_enum(mut self, param: EnumParam) -> Self {
        self.enum_params.push(param);
        self
    }

    /// Enable the date filter (`date`, `startDate`, `endDate`).
    pub fn with_date(mut self) -> Self {
        self.has_date = true;
        self
    }

    pub fn enum_param(&self, name: &str) -> Option<&EnumParam> {
        self.enum_params.iter().find(|p| p.name == name)
    }

    /// Canonical spelling of a comparator name, if the view offers it.
    pub fn canonical_sort(&self, raw: &str) -> Option<&'static str> {
        let raw = raw.trim();
        self.sorts.iter().copied().find(|s| s.eq_ignore_ascii_case(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_param_canonicalizes() {
        let param = EnumParam::closed("status", ["pending", "delivered"]);

        assert_eq!(param.accept("PENDING"), Some(Selection::Value("pending".to_string())));
        assert_eq!(param.accept("all"), Some(Selection::All));
        assert_eq!(param.accept("shipped"), None);
    }

    #[test]
    fn test_open_param_accepts_any_value() {
        let param = EnumParam::open("category");

        assert_eq!(param.accept("Coffee"), Some(Selection::Value("Coffee".to_string())));
        assert_eq!(param.accept(""), Some(Selection::All));
    }
}
