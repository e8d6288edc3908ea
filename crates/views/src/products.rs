//! Products page: search by name, SKU or category; filter by status,
//! category and creation date.

use crate::definition::ViewDefinition;
use crate::schema::{EnumParam, ViewSchema};
use chrono::{DateTime, Utc};
use pipeline::filters::FieldValue;
use store::{Dataset, Product, ProductStatus, RecordStore};

sort_order! {
    /// Comparators offered on the products page
    ProductSort for Product {
        Newest => "newest", |a, b| b.created_at.cmp(&a.created_at);
        Name => "name", |a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase());
        PriceAsc => "price-asc", |a, b| a.price.total_cmp(&b.price);
        PriceDesc => "price-desc", |a, b| b.price.total_cmp(&a.price);
        StockAsc => "stock-asc", |a, b| a.stock.cmp(&b.stock);
    }
}

pub struct ProductsView;

fn product_status(product: &Product) -> &str {
    product.status.as_str()
}

fn product_category(product: &Product) -> &str {
    &product.category
}

impl ViewDefinition for ProductsView {
    type Item = Product;
    type Sort = ProductSort;

    const ROUTE: &'static str = "products";

    fn schema() -> ViewSchema {
        ViewSchema::new::<Product, ProductSort>(Self::ROUTE)
            .with_enum(EnumParam::closed(
                "status",
                ProductStatus::ALL.iter().map(|s| s.as_str()),
            ))
            // categories are data, not a fixed set
            .with_enum(EnumParam::open("category"))
            .with_date()
    }

    fn search_fields(product: &Product) -> Vec<&str> {
        vec![&product.name, &product.sku, &product.category]
    }

    fn enum_field(param: &str) -> Option<FieldValue<Product>> {
        let field: FieldValue<Product> = match param {
            "status" => product_status,
            "category" => product_category,
            _ => return None,
        };
        Some(field)
    }

    fn timestamp(product: &Product) -> Option<DateTime<Utc>> {
        Some(product.created_at)
    }

    fn store(dataset: &Dataset) -> &RecordStore<Product> {
        &dataset.products
    }

    fn store_mut(dataset: &mut Dataset) -> &mut RecordStore<Product> {
        &mut dataset.products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::build_view;
    use crate::url_state::decode_state;
    use chrono::TimeZone;
    use store::mock::generate_products;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_category_filter_is_exact() {
        let products = generate_products(11, now());
        let category = products[0].category.clone();
        let expected = products.iter().filter(|p| p.category == category).count();

        let query = format!("category={}", urlencoding::encode(&category));
        let state = decode_state(&query, &ProductsView::schema());
        let view = build_view::<ProductsView>(products, &state, now());

        assert_eq!(view.total_items(), expected);
        assert!(view.filtered().iter().all(|p| p.category == category));
    }

    #[test]
    fn test_price_sort_ascending() {
        let state = decode_state("sort=price-asc&limit=50", &ProductsView::schema());
        let view = build_view::<ProductsView>(generate_products(11, now()), &state, now());

        assert!(view.filtered().windows(2).all(|w| w[0].price <= w[1].price));
        assert_eq!(view.page_size().get(), 50);
    }

    #[test]
    fn test_search_matches_sku() {
        let products = generate_products(11, now());
        let sku = products[0].sku.to_lowercase();

        let state = decode_state(&format!("search={}", sku), &ProductsView::schema());
        let view = build_view::<ProductsView>(products, &state, now());

        assert!(view.total_items() >= 1);
        assert!(view.filtered().iter().any(|p| p.sku.to_lowercase() == sku));
    }
}
