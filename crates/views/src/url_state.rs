//! Query-string codec for list page state.
//!
//! `decode_state` never fails: malformed or unknown parameters are skipped
//! and the default is kept. `encode_state` writes only non-default values,
//! in a fixed order, so a bookmarked URL reproduces the same view.

use crate::schema::ViewSchema;
use chrono::NaiveDate;
use pipeline::PageSize;
use pipeline::filters::{DatePreset, DateRange, Selection};
use serde::Serialize;
use std::collections::BTreeMap;

pub const SEARCH: &str = "search";
pub const DATE: &str = "date";
pub const START_DATE: &str = "startDate";
pub const END_DATE: &str = "endDate";
pub const SORT: &str = "sort";
pub const PAGE: &str = "page";
pub const LIMIT: &str = "limit";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Everything a list page mirrors into its URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub search: String,
    /// Enum selections by parameter name; absent means `all`
    pub filters: BTreeMap<String, Selection>,
    pub date: DateRange,
    pub sort: String,
    pub page: usize,
    pub limit: PageSize,
}

impl ViewState {
    /// The default state of a view: nothing filtered, first page.
    pub fn new(schema: &ViewSchema) -> Self {
        Self {
            search: String::new(),
            filters: BTreeMap::new(),
            date: DateRange::default(),
            sort: schema.default_sort.to_string(),
            page: 1,
            limit: PageSize::default(),
        }
    }

    pub fn selection(&self, param: &str) -> Selection {
        self.filters.get(param).cloned().unwrap_or_default()
    }

    pub fn set_selection(&mut self, param: &str, selection: Selection) {
        match selection {
            Selection::All => {
                self.filters.remove(param);
            }
            value => {
                self.filters.insert(param.to_string(), value);
            }
        }
    }
}

/// Read a view state from a query string (with or without the leading `?`).
///
/// Repeated keys keep the last well-formed value.
pub fn decode_state(query: &str, schema: &ViewSchema) -> ViewState {
    let mut state = ViewState::new(schema);
    let query = query.trim().trim_start_matches('?');

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let (Some(key), Some(value)) = (decode_component(raw_key), decode_component(raw_value))
        else {
            tracing::warn!("Ignoring undecodable query parameter: {}", pair);
            continue;
        };

        if !apply_param(&mut state, schema, &key, value.trim()) {
            tracing::warn!("Ignoring query parameter {}={}", key, value);
        }
    }

    tracing::debug!("Decoded {} state: {:?}", schema.name, state);
    state
}

/// Returns false when the parameter is unknown or its value malformed.
fn apply_param(state: &mut ViewState, schema: &ViewSchema, key: &str, value: &str) -> bool {
    match key {
        SEARCH => {
            state.search = value.to_string();
            true
        }
        DATE if schema.has_date => {
            if value.is_empty() || value.eq_ignore_ascii_case(Selection::ALL) {
                state.date.preset = None;
                return true;
            }
            match value.parse::<DatePreset>() {
                Ok(preset) => {
                    state.date.preset = Some(preset);
                    true
                }
                Err(_) => false,
            }
        }
        START_DATE if schema.has_date => match parse_date(value) {
            Some(date) => {
                state.date.start = Some(date);
                true
            }
            None => false,
        },
        END_DATE if schema.has_date => match parse_date(value) {
            Some(date) => {
                state.date.end = Some(date);
                true
            }
            None => false,
        },
        SORT => match schema.canonical_sort(value) {
            Some(sort) => {
                state.sort = sort.to_string();
                true
            }
            None => false,
        },
        PAGE => match value.parse::<usize>() {
            Ok(page) if page >= 1 => {
                state.page = page;
                true
            }
            _ => false,
        },
        LIMIT => match value.parse::<usize>().ok().and_then(|n| PageSize::new(n).ok()) {
            Some(limit) => {
                state.limit = limit;
                true
            }
            None => false,
        },
        _ => match schema.enum_param(key).and_then(|param| param.accept(value)) {
            Some(selection) => {
                state.set_selection(key, selection);
                true
            }
            None => false,
        },
    }
}

/// Write the non-default parts of `state` as a query string (no leading `?`).
///
/// Parameter order: search, enum parameters in schema order, date,
/// startDate, endDate, sort, page, limit.
pub fn encode_state(state: &ViewState, schema: &ViewSchema) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();

    if !state.search.trim().is_empty() {
        pairs.push((SEARCH, state.search.trim().to_string()));
    }
    for param in &schema.enum_params {
        if let Selection::Value(value) = state.selection(param.name) {
            pairs.push((param.name, value));
        }
    }
    if schema.has_date {
        if let Some(preset) = state.date.preset {
            pairs.push((DATE, preset.as_str().to_string()));
        }
        if let Some(start) = state.date.start {
            pairs.push((START_DATE, start.format(DATE_FORMAT).to_string()));
        }
        if let Some(end) = state.date.end {
            pairs.push((END_DATE, end.format(DATE_FORMAT).to_string()));
        }
    }
    if state.sort != schema.default_sort {
        pairs.push((SORT, state.sort.clone()));
    }
    if state.page > 1 {
        pairs.push((PAGE, state.page.to_string()));
    }
    if state.limit != PageSize::default() {
        pairs.push((LIMIT, state.limit.to_string()));
    }

    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn decode_component(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .ok()
        .map(|s| s.into_owned())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    // chrono accepts unpadded fields; the URL format is strictly zero-padded
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}
