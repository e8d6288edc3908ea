//! Date-range filter: relative presets or explicit calendar bounds.
//!
//! Calendar dates are interpreted in UTC. An explicit end date is inclusive
//! up to the last millisecond of that day.

use crate::traits::Filter;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reads the timestamp an item is filtered on.
pub type Timestamp<T> = fn(&T) -> Option<DateTime<Utc>>;

/// Relative window ending at `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePreset {
    Today,
    Week,
    Month,
}

impl DatePreset {
    pub const ALL: [DatePreset; 3] = [DatePreset::Today, DatePreset::Week, DatePreset::Month];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatePreset::Today => "today",
            DatePreset::Week => "week",
            DatePreset::Month => "month",
        }
    }

    /// Length of the window: 1, 7 or 30 days.
    pub fn period(&self) -> Duration {
        match self {
            DatePreset::Today => Duration::days(1),
            DatePreset::Week => Duration::days(7),
            DatePreset::Month => Duration::days(30),
        }
    }
}

impl fmt::Display for DatePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown date preset: {}", s))
    }
}

/// Closed interval of instants; a missing side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl TimeWindow {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| instant >= from) && self.to.is_none_or(|to| instant <= to)
    }
}

/// The user's date selection as it appears in the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub preset: Option<DatePreset>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn preset(preset: DatePreset) -> Self {
        Self {
            preset: Some(preset),
            ..Self::default()
        }
    }

    pub fn between(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            preset: None,
            start,
            end,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.preset.is_none() && self.start.is_none() && self.end.is_none()
    }

    /// Resolve to a concrete window. Explicit bounds win over the preset.
    pub fn window(&self, now: DateTime<Utc>) -> Option<TimeWindow> {
        if self.start.is_some() || self.end.is_some() {
            return Some(TimeWindow {
                from: self.start.map(start_of_day),
                to: self.end.map(end_of_day),
            });
        }
        self.preset.map(|preset| TimeWindow {
            from: Some(now - preset.period()),
            to: Some(now),
        })
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let last = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(last).and_utc()
}

/// Keeps items whose timestamp falls inside the resolved window.
pub struct DateRangeFilter<T> {
    name: String,
    window: Option<TimeWindow>,
    timestamp: Timestamp<T>,
}

impl<T> DateRangeFilter<T> {
    /// Create a new DateRangeFilter.
    ///
    /// # Arguments
    /// * `name` - Filter name, usually `date`
    /// * `range` - Preset and/or explicit bounds
    /// * `now` - Reference instant for relative presets
    /// * `timestamp` - Reads the item's timestamp
    pub fn new(
        name: impl Into<String>,
        range: &DateRange,
        now: DateTime<Utc>,
        timestamp: Timestamp<T>,
    ) -> Self {
        Self {
            name: name.into(),
            window: range.window(now),
            timestamp,
        }
    }

    pub fn window(&self) -> Option<TimeWindow> {
        self.window
    }
}

impl<T> Filter<T> for DateRangeFilter<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.window.is_some()
    }

    fn matches(&self, item: &T) -> bool {
        match self.window {
            None => true,
            Some(window) => (self.timestamp)(item).is_some_and(|ts| window.contains(ts)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug, Clone)]
    struct Event {
        id: u32,
        at: Option<DateTime<Utc>>,
    }

    fn event_at(e: &Event) -> Option<DateTime<Utc>> {
        e.at
    }

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn create_test_events() -> Vec<Event> {
        vec![
            Event { id: 1, at: Some(ts(2024, 3, 10, 9, 0)) },
            Event { id: 2, at: Some(ts(2024, 3, 14, 23, 59)) },
            Event { id: 3, at: Some(ts(2024, 3, 15, 0, 0)) },
            Event { id: 4, at: None },
            Event { id: 5, at: Some(ts(2024, 2, 1, 12, 0)) },
        ]
    }

    fn ids(events: &[Event]) -> Vec<u32> {
        events.iter().map(|e| e.id).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!("Week".parse::<DatePreset>(), Ok(DatePreset::Week));
        assert!("year".parse::<DatePreset>().is_err());
    }

    #[test]
    fn test_explicit_bounds_are_inclusive() {
        let range = DateRange::between(Some(date(2024, 3, 10)), Some(date(2024, 3, 14)));
        let filter = DateRangeFilter::new("date", &range, ts(2024, 3, 20, 0, 0), event_at);

        assert_eq!(ids(&filter.apply(create_test_events())), vec![1, 2]);
    }

    #[test]
    fn test_one_sided_bound_is_open() {
        let range = DateRange::between(Some(date(2024, 3, 14)), None);
        let filter = DateRangeFilter::new("date", &range, ts(2024, 3, 20, 0, 0), event_at);

        assert_eq!(ids(&filter.apply(create_test_events())), vec![2, 3]);
    }

    #[test]
    fn test_week_preset_window() {
        let now = ts(2024, 3, 15, 12, 0);
        let filter = DateRangeFilter::new("date", &DateRange::preset(DatePreset::Week), now, event_at);

        // 2024-03-08 12:00 .. 2024-03-15 12:00
        assert_eq!(ids(&filter.apply(create_test_events())), vec![1, 2, 3]);
    }

    #[test]
    fn test_explicit_bounds_override_preset() {
        let range = DateRange {
            preset: Some(DatePreset::Today),
            start: Some(date(2024, 2, 1)),
            end: Some(date(2024, 2, 1)),
        };
        let filter = DateRangeFilter::new("date", &range, ts(2024, 3, 15, 12, 0), event_at);

        assert_eq!(ids(&filter.apply(create_test_events())), vec![5]);
    }

    #[test]
    fn test_empty_range_is_inactive() {
        let filter = DateRangeFilter::new("date", &DateRange::default(), Utc::now(), event_at);

        assert!(!filter.is_active());
        assert_eq!(filter.apply(create_test_events()).len(), 5);
    }
}
