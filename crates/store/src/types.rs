//! Core domain types for the storefront back office.
//!
//! Every record carries a string id and a creation/occurrence timestamp.
//! Enumerated fields have a stable lower-case wire value (`as_str`) used in
//! query strings and CSV files, and parse back case-insensitively.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A value did not match any variant of an enumerated field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value for {field}: {value}")]
pub struct UnknownVariant {
    pub field: &'static str,
    pub value: String,
}

/// Declares a fieldless enum with a wire value per variant.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident, $field:literal { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The lower-case wire value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($wire) {
                        return Ok($name::$variant);
                    }
                )+
                Err(UnknownVariant { field: $field, value: s.to_string() })
            }
        }
    };
}

/// Anything kept in a `RecordStore`.
pub trait Record: Clone + Send + Sync {
    /// Entity name used in messages ("order", "product", ...)
    const ENTITY: &'static str;

    fn id(&self) -> &str;
}

// =============================================================================
// Orders
// =============================================================================

wire_enum! {
    /// Lifecycle of an order
    OrderStatus, "status" {
        Pending => "pending",
        Processing => "processing",
        Delivered => "delivered",
        Cancelled => "cancelled",
    }
}

wire_enum! {
    PaymentMethod, "payment" {
        Card => "card",
        Cash => "cash",
        Transfer => "transfer",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Display id, e.g. `ORD-000012`
    pub id: String,
    pub customer_name: String,
    pub phone: String,
    pub email: String,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    /// Order total in the store currency
    pub total: f64,
    pub item_count: u32,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Formats a sequence number as an order id (`7` -> `ORD-000007`).
    pub fn format_id(sequence: u32) -> String {
        format!("ORD-{:06}", sequence)
    }
}

impl Record for Order {
    const ENTITY: &'static str = "order";

    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// Catalog
// =============================================================================

wire_enum! {
    ProductStatus, "status" {
        Active => "active",
        Draft => "draft",
        Archived => "archived",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sku: String,
    /// Category name, matching `Category::name`
    pub category: String,
    pub price: f64,
    pub stock: u32,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
}

impl Record for Product {
    const ENTITY: &'static str = "product";

    fn id(&self) -> &str {
        &self.id
    }
}

/// A node of the catalog hierarchy, stored flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    /// Position among siblings, 0-based
    pub position: u32,
}

impl Record for Category {
    const ENTITY: &'static str = "category";

    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// Promotions
// =============================================================================

wire_enum! {
    DiscountKind, "type" {
        Percentage => "percentage",
        Fixed => "fixed",
    }
}

wire_enum! {
    PromotionStatus, "status" {
        Active => "active",
        Scheduled => "scheduled",
        Expired => "expired",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: String,
    /// Coupon code customers type at checkout
    pub code: String,
    pub name: String,
    pub kind: DiscountKind,
    /// Percent off for `Percentage`, currency amount for `Fixed`
    pub value: f64,
    pub status: PromotionStatus,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub usage_count: u32,
}

impl Record for Promotion {
    const ENTITY: &'static str = "promotion";

    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// Activity log and clients
// =============================================================================

wire_enum! {
    ActivityAction, "action" {
        Create => "create",
        Update => "update",
        Delete => "delete",
        Login => "login",
        Export => "export",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: String,
    /// Who performed the action
    pub actor: String,
    pub action: ActivityAction,
    /// Kind of record touched ("order", "product", ...)
    pub entity: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl Record for ActivityEntry {
    const ENTITY: &'static str = "activity";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub order_count: u32,
    pub total_spent: f64,
    pub joined_at: DateTime<Utc>,
}

impl Record for Client {
    const ENTITY: &'static str = "client";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_values_parse_case_insensitively() {
        assert_eq!("Cancelled".parse::<OrderStatus>(), Ok(OrderStatus::Cancelled));
        assert_eq!(" draft ".parse::<ProductStatus>(), Ok(ProductStatus::Draft));
        assert_eq!(ActivityAction::Login.as_str(), "login");

        let err = "shipped".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.field, "status");
        assert_eq!(err.value, "shipped");
    }

    #[test]
    fn test_order_id_format() {
        assert_eq!(Order::format_id(12), "ORD-000012");
        assert_eq!(Order::format_id(123456), "ORD-123456");
    }

    #[test]
    fn test_enum_serializes_as_wire_value() {
        let json = serde_json::to_string(&PaymentMethod::Transfer).unwrap();
        assert_eq!(json, "\"transfer\"");
    }
}
