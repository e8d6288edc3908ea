//! Integration tests for catalog import and export.
//!
//! These tests drive the public API the way the products page does:
//! import a file, swap the catalog, export it again.

use chrono::{TimeZone, Utc};
use store::{Dataset, ImportError, export_csv, parse_products};

const GOOD_FILE: &str = "name,sku,price,stock,category,status\n\
                         Espresso,ESP-1,2.50,100,Coffee,active\n\
                         Latte,LAT-1,3.20,80,Coffee,active\n\
                         Brownie,BRW-1,2.80,15,Desserts,draft\n";

#[test]
fn test_import_replaces_catalog() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let mut dataset = Dataset::mock(1, 10, now).unwrap();

    let products = parse_products(GOOD_FILE, now).unwrap();
    dataset.replace_products(products).unwrap();

    assert_eq!(dataset.products.len(), 3);
    assert!(dataset.products.contains("PRD-ESP-1"));
}

#[test]
fn test_rejected_import_leaves_catalog_untouched() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let mut dataset = Dataset::mock(1, 10, now).unwrap();
    let before = dataset.products.list();

    let bad = GOOD_FILE.replace("3.20", "three");
    let result = parse_products(&bad, now);

    match result {
        Err(ImportError::InvalidRows(rows)) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].line, 3);
        }
        other => panic!("expected InvalidRows, got {:?}", other),
    }
    if let Ok(products) = parse_products(&bad, now) {
        dataset.replace_products(products).unwrap();
    }
    assert_eq!(dataset.products.list(), before);
}

#[test]
fn test_missing_column_message_names_column() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let input = "name,sku,stock,category\nEspresso,ESP-1,100,Coffee\n";

    let err = parse_products(input, now).unwrap_err();
    assert_eq!(err.messages(), vec!["Missing required column: price".to_string()]);
    assert!(err.to_string().contains("price"));
}

#[test]
fn test_order_export_has_one_row_per_order() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let dataset = Dataset::mock(9, 25, now).unwrap();

    let csv = export_csv(&dataset.orders.list()).unwrap();
    let mut lines = csv.lines();

    assert_eq!(
        lines.next().unwrap(),
        "Order ID,Customer,Phone,Email,Status,Payment,Items,Total,Date"
    );
    assert_eq!(lines.count(), 25);
}

#[test]
fn test_header_only_file_leaves_catalog_untouched() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let mut dataset = Dataset::mock(1, 10, now).unwrap();
    let before = dataset.products.list();

    let err = parse_products("name,sku,price,stock,category\n", now).unwrap_err();

    assert!(matches!(err, ImportError::NoRows));
    assert_eq!(err.messages(), vec!["File has no product rows".to_string()]);
    assert_eq!(dataset.products.list(), before);
    assert!(!before.is_empty());
}

#[test]
fn test_duplicate_ids_reported_per_row() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let input = "id,name,sku,price,stock,category\n\
                 P1,A,A-1,1,1,C\n\
                 P1,B,B-1,1,1,C\n\
                 P2,D,D-1,x,1,C\n";

    let messages = parse_products(input, now).unwrap_err().messages();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], "line 3: duplicate id P1 (first seen on line 2)");
    assert!(messages[1].starts_with("line 4: price"));
}
