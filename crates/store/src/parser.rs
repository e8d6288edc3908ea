//! Parser for product catalog CSV imports.
//!
//! Expected layout: a header row followed by one product per line.
//!
//! - Required columns: `name`, `sku`, `price`, `stock`, `category`
//! - Optional columns: `id`, `status`
//! - Header names match case-insensitively and may appear in any order;
//!   unknown columns are ignored
//!
//! An import is all-or-nothing. A missing required column rejects the file
//! before any row is read; otherwise every row is validated and all row
//! problems are reported together. A file with a header and no products is
//! rejected too.

use crate::error::{ImportError, RowError};
use crate::types::{Product, ProductStatus};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::Path;

/// Columns every import file must have.
pub const REQUIRED_COLUMNS: &[&str] = &["name", "sku", "price", "stock", "category"];

/// Column positions resolved from the header row.
struct Columns {
    id: Option<usize>,
    name: usize,
    sku: usize,
    price: usize,
    stock: usize,
    category: usize,
    status: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, ImportError> {
        let find = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|&&c| find(c).is_none())
            .map(|&c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }

        // Every required column was found above.
        let required = |name: &str| find(name).unwrap_or_default();
        Ok(Self {
            id: find("id"),
            name: required("name"),
            sku: required("sku"),
            price: required("price"),
            stock: required("stock"),
            category: required("category"),
            status: find("status"),
        })
    }
}

/// Parse a product CSV document.
///
/// `imported_at` becomes the `created_at` of every product.
/// Products without an `id` get `PRD-<SKU>`.
pub fn parse_products(input: &str, imported_at: DateTime<Utc>) -> Result<Vec<Product>, ImportError> {
    // Spreadsheet exports often start with a UTF-8 BOM
    let text = input.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(ImportError::Empty);
    }
    let columns = Columns::resolve(&headers)?;

    let mut products = Vec::new();
    let mut errors = Vec::new();
    let mut seen_skus: HashMap<String, usize> = HashMap::new();
    let mut seen_ids: HashMap<String, usize> = HashMap::new();

    for (idx, result) in reader.records().enumerate() {
        let fallback_line = idx + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                errors.push(RowError {
                    line: fallback_line,
                    messages: vec![format!("unreadable row: {}", e)],
                });
                continue;
            }
        };
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback_line);

        match parse_row(&record, &columns, imported_at) {
            Ok(product) => {
                let mut messages = Vec::new();
                let sku_key = product.sku.to_ascii_lowercase();
                if let Some(first_line) = seen_skus.get(&sku_key) {
                    messages.push(format!(
                        "duplicate sku {} (first seen on line {})",
                        product.sku, first_line
                    ));
                }
                if let Some(first_line) = seen_ids.get(&product.id) {
                    messages.push(format!(
                        "duplicate id {} (first seen on line {})",
                        product.id, first_line
                    ));
                }

                if messages.is_empty() {
                    seen_skus.insert(sku_key, line);
                    seen_ids.insert(product.id.clone(), line);
                    products.push(product);
                } else {
                    errors.push(RowError { line, messages });
                }
            }
            Err(messages) => errors.push(RowError { line, messages }),
        }
    }

    if !errors.is_empty() {
        tracing::warn!(
            "Rejected product import: {} invalid row(s) out of {}",
            errors.len(),
            errors.len() + products.len()
        );
        return Err(ImportError::InvalidRows(errors));
    }

    if products.is_empty() {
        tracing::warn!("Rejected product import: header row only");
        return Err(ImportError::NoRows);
    }

    tracing::info!("Parsed {} products from CSV", products.len());
    Ok(products)
}

/// Read and parse a product CSV file.
pub fn parse_products_file(path: &Path, imported_at: DateTime<Utc>) -> Result<Vec<Product>, ImportError> {
    let text = std::fs::read_to_string(path)?;
    parse_products(&text, imported_at)
}

/// Validate one data row, collecting every problem it has.
fn parse_row(
    record: &csv::StringRecord,
    columns: &Columns,
    imported_at: DateTime<Utc>,
) -> Result<Product, Vec<String>> {
    let field = |idx: usize| record.get(idx).unwrap_or("");
    let mut messages = Vec::new();

    let mut required = |name: &str, idx: usize| {
        let value = field(idx);
        if value.is_empty() {
            messages.push(format!("{} is required", name));
        }
        value.to_string()
    };
    let name = required("name", columns.name);
    let sku = required("sku", columns.sku);
    let category = required("category", columns.category);
    let price_raw = required("price", columns.price);
    let stock_raw = required("stock", columns.stock);

    let price = if price_raw.is_empty() {
        None
    } else {
        match price_raw.parse::<f64>() {
            Ok(p) if p.is_finite() && p >= 0.0 => Some(p),
            _ => {
                messages.push(format!("price must be a non-negative number, got {:?}", price_raw));
                None
            }
        }
    };

    let stock = if stock_raw.is_empty() {
        None
    } else {
        match stock_raw.parse::<u32>() {
            Ok(s) => Some(s),
            Err(_) => {
                messages.push(format!("stock must be a non-negative integer, got {:?}", stock_raw));
                None
            }
        }
    };

    let status = match columns.status.map(field).filter(|s| !s.is_empty()) {
        None => ProductStatus::Active,
        Some(raw) => match raw.parse::<ProductStatus>() {
            Ok(status) => status,
            Err(e) => {
                messages.push(e.to_string());
                ProductStatus::Active
            }
        },
    };

    match (price, stock) {
        (Some(price), Some(stock)) if messages.is_empty() => {
            let id = columns
                .id
                .map(field)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("PRD-{}", sku.to_ascii_uppercase()));
            Ok(Product {
                id,
                name,
                sku,
                category,
                price,
                stock,
                status,
                created_at: imported_at,
            })
        }
        _ => Err(messages),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_valid_file() {
        let input = "Name,SKU,Price,Stock,Category,Status\n\
                     Espresso,ESP-1,2.50,100,Coffee,active\n\
                     \"Cake, chocolate\",CK-2,4.00,12,Desserts,draft\n";

        let products = parse_products(input, now()).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, "PRD-ESP-1");
        assert_eq!(products[0].price, 2.5);
        assert_eq!(products[1].name, "Cake, chocolate");
        assert_eq!(products[1].status, ProductStatus::Draft);
        assert_eq!(products[1].created_at, now());
    }

    #[test]
    fn test_columns_in_any_order_with_extras() {
        let input = "category,notes,stock,id,price,sku,name\n\
                     Tea,ignored,5,p-9,1.25,TEA-1,Green tea\n";

        let products = parse_products(input, now()).unwrap();
        assert_eq!(products[0].id, "p-9");
        assert_eq!(products[0].category, "Tea");
        assert_eq!(products[0].stock, 5);
    }

    #[test]
    fn test_missing_price_column_rejects_file() {
        let input = "name,sku,stock,category\nEspresso,ESP-1,100,Coffee\n";

        match parse_products(input, now()) {
            Err(ImportError::MissingColumns(columns)) => assert_eq!(columns, vec!["price"]),
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_one_bad_price_holds_back_whole_file() {
        let input = "name,sku,price,stock,category\n\
                     Espresso,ESP-1,2.50,100,Coffee\n\
                     Latte,LAT-1,abc,40,Coffee\n\
                     Mocha,MOC-1,3.10,20,Coffee\n";

        match parse_products(input, now()) {
            Err(ImportError::InvalidRows(rows)) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].line, 3);
                assert!(rows[0].messages[0].contains("price"));
            }
            other => panic!("expected InvalidRows, got {:?}", other),
        }
    }

    #[test]
    fn test_row_errors_are_all_collected() {
        let input = "name,sku,price,stock,category\n\
                     ,ESP-1,-1,x,Coffee\n\
                     Latte,LAT-1,3,4,\n";

        let err = parse_products(input, now()).unwrap_err();
        let messages = err.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("line 2:"));
        assert!(messages[0].contains("name is required"));
        assert!(messages[0].contains("price must be"));
        assert!(messages[0].contains("stock must be"));
        assert!(messages[1].contains("category is required"));
    }

    #[test]
    fn test_duplicate_sku_is_a_row_error() {
        let input = "name,sku,price,stock,category\n\
                     A,X-1,1,1,C\n\
                     B,x-1,1,1,C\n";

        match parse_products(input, now()) {
            Err(ImportError::InvalidRows(rows)) => {
                assert_eq!(rows[0].line, 3);
                assert!(rows[0].messages[0].contains("first seen on line 2"));
            }
            other => panic!("expected InvalidRows, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_explicit_id_is_reported_with_other_rows() {
        let input = "id,name,sku,price,stock,category\n\
                     P1,A,A-1,1,1,C\n\
                     P1,B,B-1,1,1,C\n\
                     P2,D,D-1,x,1,C\n";

        match parse_products(input, now()) {
            Err(ImportError::InvalidRows(rows)) => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0].line, 3);
                assert_eq!(rows[0].messages, vec!["duplicate id P1 (first seen on line 2)"]);
                assert_eq!(rows[1].line, 4);
                assert!(rows[1].messages[0].contains("price"));
            }
            other => panic!("expected InvalidRows, got {:?}", other),
        }
    }

    #[test]
    fn test_explicit_id_clashing_with_generated_id() {
        let input = "id,name,sku,price,stock,category\n\
                     ,Espresso,ESP-1,2.5,10,Coffee\n\
                     PRD-ESP-1,Latte,LAT-1,3,10,Coffee\n";

        let err = parse_products(input, now()).unwrap_err();
        assert_eq!(
            err.messages(),
            vec!["line 3: duplicate id PRD-ESP-1 (first seen on line 2)"]
        );
    }

    #[test]
    fn test_header_only_file_is_rejected() {
        let input = "name,sku,price,stock,category\n";

        assert!(matches!(parse_products(input, now()), Err(ImportError::NoRows)));
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(parse_products("", now()), Err(ImportError::Empty)));
    }
}
