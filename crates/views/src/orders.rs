//! Orders page: search by order id, customer, phone or email; filter by
//! status, payment method and order date.

use crate::definition::ViewDefinition;
use crate::schema::{EnumParam, ViewSchema};
use chrono::{DateTime, Utc};
use pipeline::filters::FieldValue;
use store::{Dataset, Order, OrderStatus, PaymentMethod, RecordStore};

sort_order! {
    /// Comparators offered on the orders page
    OrderSort for Order {
        Newest => "newest", |a, b| b.created_at.cmp(&a.created_at);
        Oldest => "oldest", |a, b| a.created_at.cmp(&b.created_at);
        AmountDesc => "amount-desc", |a, b| b.total.total_cmp(&a.total);
        AmountAsc => "amount-asc", |a, b| a.total.total_cmp(&b.total);
        Customer => "customer", |a, b| a.customer_name.to_lowercase().cmp(&b.customer_name.to_lowercase());
    }
}

pub struct OrdersView;

fn order_status(order: &Order) -> &str {
    order.status.as_str()
}

fn payment_method(order: &Order) -> &str {
    order.payment_method.as_str()
}

impl ViewDefinition for OrdersView {
    type Item = Order;
    type Sort = OrderSort;

    const ROUTE: &'static str = "orders";

    fn schema() -> ViewSchema {
        ViewSchema::new::<Order, OrderSort>(Self::ROUTE)
            .with_enum(EnumParam::closed(
                "status",
                OrderStatus::ALL.iter().map(|s| s.as_str()),
            ))
            .with_enum(EnumParam::closed(
                "payment",
                PaymentMethod::ALL.iter().map(|p| p.as_str()),
            ))
            .with_date()
    }

    fn search_fields(order: &Order) -> Vec<&str> {
        vec![&order.id, &order.customer_name, &order.phone, &order.email]
    }

    fn enum_field(param: &str) -> Option<FieldValue<Order>> {
        let field: FieldValue<Order> = match param {
            "status" => order_status,
            "payment" => payment_method,
            _ => return None,
        };
        Some(field)
    }

    fn timestamp(order: &Order) -> Option<DateTime<Utc>> {
        Some(order.created_at)
    }

    fn store(dataset: &Dataset) -> &RecordStore<Order> {
        &dataset.orders
    }

    fn store_mut(dataset: &mut Dataset) -> &mut RecordStore<Order> {
        &mut dataset.orders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::build_view;
    use crate::url_state::decode_state;
    use chrono::{Duration, TimeZone};
    use store::mock::generate_orders;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_search_by_order_number() {
        let schema = OrdersView::schema();
        let state = decode_state("search=000012", &schema);
        let view = build_view::<OrdersView>(generate_orders(50, 7, now()), &state, now());

        let ids: Vec<_> = view.filtered().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["ORD-000012"]);
    }

    #[test]
    fn test_status_filter_equals_reference() {
        let orders = generate_orders(50, 7, now());
        let mut reference: Vec<Order> = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Cancelled)
            .cloned()
            .collect();
        reference.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let state = decode_state("status=cancelled", &OrdersView::schema());
        let view = build_view::<OrdersView>(orders, &state, now());

        assert_eq!(view.filtered(), reference.as_slice());
    }

    #[test]
    fn test_week_preset_uses_created_at() {
        let state = decode_state("date=week&sort=oldest", &OrdersView::schema());
        let view = build_view::<OrdersView>(generate_orders(50, 7, now()), &state, now());

        let from = now() - Duration::days(7);
        assert!(view.filtered().iter().all(|o| o.created_at >= from && o.created_at <= now()));
        assert!(
            view.filtered()
                .windows(2)
                .all(|w| w[0].created_at <= w[1].created_at)
        );
    }

    #[test]
    fn test_amount_sort() {
        let state = decode_state("sort=amount-desc", &OrdersView::schema());
        let view = build_view::<OrdersView>(generate_orders(30, 3, now()), &state, now());

        assert_eq!(view.sort(), OrderSort::AmountDesc);
        assert!(view.filtered().windows(2).all(|w| w[0].total >= w[1].total));
    }
}
