//! # Store Crate
//!
//! Records and data access for the storefront back office.
//!
//! ## Main Components
//!
//! - **types**: Domain records (Order, Product, Promotion, ActivityEntry, Client, Category)
//! - **collection**: `RecordStore<T>`, a keyed collection with create/update/delete
//! - **dataset**: `Dataset`, one store per record kind, plus mock generation
//! - **parser**: Product CSV import with whole-file validation
//! - **export**: CSV export of list views
//! - **categories**: Category tree building and sibling reordering
//! - **error**: Error types for store operations and imports
//!
//! ## Example Usage
//!
//! ```ignore
//! use store::{Dataset, parse_products, export_csv};
//!
//! let mut dataset = Dataset::mock(42, 50, chrono::Utc::now())?;
//!
//! let products = parse_products(&csv_text, chrono::Utc::now())?;
//! dataset.replace_products(products)?;
//!
//! let csv = export_csv(&dataset.orders.list())?;
//! ```

pub mod categories;
pub mod collection;
pub mod dataset;
pub mod error;
pub mod export;
pub mod mock;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use categories::{CategoryNode, build_tree, reorder};
pub use collection::RecordStore;
pub use dataset::{Dataset, DatasetCounts, OrderSummary};
pub use error::{ImportError, Result, RowError, StoreError};
pub use export::{CsvExportable, export_csv, write_csv};
pub use parser::{REQUIRED_COLUMNS, parse_products, parse_products_file};
pub use types::{
    // Records
    ActivityEntry,
    Category,
    Client,
    Order,
    Product,
    Promotion,
    Record,
    // Enums
    ActivityAction,
    DiscountKind,
    OrderStatus,
    PaymentMethod,
    ProductStatus,
    PromotionStatus,
    UnknownVariant,
};
