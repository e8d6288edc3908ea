//! CSV export of list views.
//!
//! Each exportable record type supplies a fixed header row and a row
//! renderer. Fields containing the separator, quotes or line breaks are
//! wrapped in quotes with inner quotes doubled.

use crate::error::{Result, StoreError};
use crate::types::{ActivityEntry, Client, Order, Product, Promotion};
use chrono::{DateTime, SecondsFormat, Utc};
use std::io::Write;

/// Records that can be written as one CSV row each.
pub trait CsvExportable {
    /// Column headers, in row order
    fn headers() -> Vec<&'static str>;

    /// Cell values, one per header
    fn to_csv_row(&self) -> Vec<String>;
}

/// Write `items` with a header row to any writer.
pub fn write_csv<T: CsvExportable, W: Write>(items: &[T], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    csv_writer.write_record(T::headers())?;
    for item in items {
        csv_writer.write_record(item.to_csv_row())?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render `items` with a header row as a CSV document.
pub fn export_csv<T: CsvExportable>(items: &[T]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(items, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| StoreError::InvalidValue {
        field: "csv".to_string(),
        reason: e.to_string(),
    })
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

fn timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl CsvExportable for Order {
    fn headers() -> Vec<&'static str> {
        vec!["Order ID", "Customer", "Phone", "Email", "Status", "Payment", "Items", "Total", "Date"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.customer_name.clone(),
            self.phone.clone(),
            self.email.clone(),
            self.status.to_string(),
            self.payment_method.to_string(),
            self.item_count.to_string(),
            money(self.total),
            timestamp(&self.created_at),
        ]
    }
}

impl CsvExportable for Product {
    // Matches the import layout so an export can be re-imported.
    fn headers() -> Vec<&'static str> {
        vec!["id", "name", "sku", "category", "price", "stock", "status"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.sku.clone(),
            self.category.clone(),
            money(self.price),
            self.stock.to_string(),
            self.status.to_string(),
        ]
    }
}

impl CsvExportable for Promotion {
    fn headers() -> Vec<&'static str> {
        vec!["Code", "Name", "Type", "Value", "Status", "Starts", "Ends", "Uses"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.code.clone(),
            self.name.clone(),
            self.kind.to_string(),
            money(self.value),
            self.status.to_string(),
            timestamp(&self.starts_at),
            timestamp(&self.ends_at),
            self.usage_count.to_string(),
        ]
    }
}

impl CsvExportable for ActivityEntry {
    fn headers() -> Vec<&'static str> {
        vec!["Timestamp", "User", "Action", "Entity", "Description"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            timestamp(&self.timestamp),
            self.actor.clone(),
            self.action.to_string(),
            self.entity.clone(),
            self.description.clone(),
        ]
    }
}

impl CsvExportable for Client {
    fn headers() -> Vec<&'static str> {
        vec!["Client ID", "Name", "Email", "Phone", "Orders", "Total Spent", "Joined"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.order_count.to_string(),
            money(self.total_spent),
            timestamp(&self.joined_at),
        ]
    }
}
