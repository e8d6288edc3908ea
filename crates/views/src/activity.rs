//! Activity log page: search by actor, entity or description; filter by
//! action and time.

use crate::definition::ViewDefinition;
use crate::schema::{EnumParam, ViewSchema};
use chrono::{DateTime, Utc};
use pipeline::filters::FieldValue;
use store::{ActivityAction, ActivityEntry, Dataset, RecordStore};

sort_order! {
    ActivitySort for ActivityEntry {
        Newest => "newest", |a, b| b.timestamp.cmp(&a.timestamp);
        Oldest => "oldest", |a, b| a.timestamp.cmp(&b.timestamp);
    }
}

pub struct ActivityView;

fn activity_action(entry: &ActivityEntry) -> &str {
    entry.action.as_str()
}

impl ViewDefinition for ActivityView {
    type Item = ActivityEntry;
    type Sort = ActivitySort;

    const ROUTE: &'static str = "activity-log";

    fn schema() -> ViewSchema {
        ViewSchema::new::<ActivityEntry, ActivitySort>(Self::ROUTE)
            .with_enum(EnumParam::closed(
                "action",
                ActivityAction::ALL.iter().map(|a| a.as_str()),
            ))
            .with_date()
    }

    fn search_fields(entry: &ActivityEntry) -> Vec<&str> {
        vec![&entry.actor, &entry.entity, &entry.description]
    }

    fn enum_field(param: &str) -> Option<FieldValue<ActivityEntry>> {
        let field: FieldValue<ActivityEntry> = match param {
            "action" => activity_action,
            _ => return None,
        };
        Some(field)
    }

    fn timestamp(entry: &ActivityEntry) -> Option<DateTime<Utc>> {
        Some(entry.timestamp)
    }

    fn store(dataset: &Dataset) -> &RecordStore<ActivityEntry> {
        &dataset.activity
    }

    fn store_mut(dataset: &mut Dataset) -> &mut RecordStore<ActivityEntry> {
        &mut dataset.activity
    }
}
