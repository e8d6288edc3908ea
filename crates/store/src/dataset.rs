//! The full back-office dataset.
//!
//! `Dataset` owns one `RecordStore` per entity kind. It is the data-access
//! side of every list view: views read snapshots from it and send
//! create/update/delete requests to it.

use crate::collection::RecordStore;
use crate::error::Result;
use crate::mock;
use crate::types::*;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub orders: RecordStore<Order>,
    pub products: RecordStore<Product>,
    pub categories: RecordStore<Category>,
    pub promotions: RecordStore<Promotion>,
    pub activity: RecordStore<ActivityEntry>,
    pub clients: RecordStore<Client>,
}

/// Order totals shown on the dashboard landing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub total_orders: usize,
    pub by_status: BTreeMap<String, usize>,
    /// Sum of totals over delivered orders
    pub revenue: f64,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a complete mock dataset.
    ///
    /// Steps:
    /// 1. Generate each record kind from the shared seed
    /// 2. Load them into their stores (ids are unique by construction)
    pub fn mock(seed: u64, order_count: u32, now: DateTime<Utc>) -> Result<Self> {
        tracing::info!("Generating mock dataset (seed {}, {} orders)", seed, order_count);

        let (orders, (products, promotions)) = rayon::join(
            || mock::generate_orders(order_count, seed, now),
            || {
                rayon::join(
                    || mock::generate_products(seed, now),
                    || mock::generate_promotions(12, seed, now),
                )
            },
        );

        let dataset = Self {
            orders: RecordStore::from_records(orders)?,
            products: RecordStore::from_records(products)?,
            categories: RecordStore::from_records(mock::generate_categories())?,
            promotions: RecordStore::from_records(promotions)?,
            activity: RecordStore::from_records(mock::generate_activity(120, seed, now))?,
            clients: RecordStore::from_records(mock::generate_clients(40, seed, now))?,
        };

        let counts = dataset.counts();
        tracing::info!(
            "Dataset ready: {} orders, {} products, {} promotions, {} activity entries, {} clients",
            counts.orders,
            counts.products,
            counts.promotions,
            counts.activity,
            counts.clients
        );
        Ok(dataset)
    }

    /// Replace the product catalog, e.g. after a CSV import.
    pub fn replace_products(&mut self, products: Vec<Product>) -> Result<()> {
        self.products = RecordStore::from_records(products)?;
        Ok(())
    }

    /// Record counts per collection, for logging and validation
    pub fn counts(&self) -> DatasetCounts {
        DatasetCounts {
            orders: self.orders.len(),
            products: self.products.len(),
            categories: self.categories.len(),
            promotions: self.promotions.len(),
            activity: self.activity.len(),
            clients: self.clients.len(),
        }
    }

    pub fn order_summary(&self) -> OrderSummary {
        let mut by_status: BTreeMap<String, usize> = OrderStatus::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        let mut revenue = 0.0;
        for order in self.orders.iter() {
            *by_status.entry(order.status.as_str().to_string()).or_insert(0) += 1;
            if order.status == OrderStatus::Delivered {
                revenue += order.total;
            }
        }
        OrderSummary {
            total_orders: self.orders.len(),
            by_status,
            revenue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetCounts {
    pub orders: usize,
    pub products: usize,
    pub categories: usize,
    pub promotions: usize,
    pub activity: usize,
    pub clients: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_mock_dataset_counts() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap();
        let dataset = Dataset::mock(42, 50, now).unwrap();
        let counts = dataset.counts();

        assert_eq!(counts.orders, 50);
        assert_eq!(counts.promotions, 12);
        assert!(counts.products > 0);
        assert!(counts.categories > 0);
    }

    #[test]
    fn test_order_summary_counts_every_status() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap();
        let dataset = Dataset::mock(42, 50, now).unwrap();
        let summary = dataset.order_summary();

        assert_eq!(summary.by_status.len(), 4);
        assert_eq!(summary.by_status.values().sum::<usize>(), 50);
        let delivered: f64 = dataset
            .orders
            .iter()
            .filter(|o| o.status == OrderStatus::Delivered)
            .map(|o| o.total)
            .sum();
        assert!((summary.revenue - delivered).abs() < 1e-9);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::new();
        assert_eq!(dataset.counts().orders, 0);
        assert_eq!(dataset.order_summary().revenue, 0.0);
    }
}
