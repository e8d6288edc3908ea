//! Deterministic mock data for every list view.
//!
//! Each record is derived from its own `StdRng` seeded with
//! `seed + index`, so records can be generated in parallel with Rayon and
//! the output is identical for identical inputs regardless of thread count.

use crate::types::*;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

const FIRST_NAMES: &[&str] = &[
    "Alice", "Ali", "Bruno", "Chen", "Dana", "Elif", "Farah", "Goran", "Hana", "Ivan", "Julia",
    "Kwame", "Lucia", "Malik", "Nora", "Omar",
];

const LAST_NAMES: &[&str] = &[
    "Khan", "Silva", "Novak", "Garcia", "Okafor", "Tanaka", "Meyer", "Rossi", "Dubois", "Haddad",
];

const STAFF: &[&str] = &["admin", "maria.ops", "kitchen.lead", "support"];

/// Catalog categories as (name, products).
const CATALOG: &[(&str, &[&str])] = &[
    ("Coffee", &["Espresso", "Latte", "Cappuccino", "Flat White", "Cold Brew"]),
    ("Tea", &["Green Tea", "Chai Latte", "Earl Grey"]),
    ("Bakery", &["Croissant", "Sourdough Loaf", "Cinnamon Roll", "Bagel"]),
    ("Meals", &["Chicken Wrap", "Veggie Bowl", "Club Sandwich", "Tomato Soup"]),
    ("Desserts", &["Cheesecake", "Brownie", "Fruit Tart"]),
];

fn rng_for(seed: u64, index: u32) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add(index as u64))
}

fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
    &items[rng.random_range(0..items.len())]
}

fn person(rng: &mut StdRng) -> (String, String, String) {
    let first = *pick(rng, FIRST_NAMES);
    let last = *pick(rng, LAST_NAMES);
    let name = format!("{} {}", first, last);
    let email = format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase());
    let phone = format!("+1 555 {:03} {:04}", rng.random_range(0..1000), rng.random_range(0..10000));
    (name, email, phone)
}

/// Minutes back from `now`, uniformly within `days`.
fn minutes_ago(rng: &mut StdRng, now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::minutes(rng.random_range(0..days * 24 * 60))
}

/// Orders `ORD-000001..ORD-<count>` spread over the last 60 days.
pub fn generate_orders(count: u32, seed: u64, now: DateTime<Utc>) -> Vec<Order> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let mut rng = rng_for(seed, i);
            let (customer_name, email, phone) = person(&mut rng);
            let item_count = rng.random_range(1..8);
            let cents: u32 = rng.random_range(450..25_000);
            Order {
                id: Order::format_id(i + 1),
                customer_name,
                phone,
                email,
                status: *pick(&mut rng, OrderStatus::ALL),
                payment_method: *pick(&mut rng, PaymentMethod::ALL),
                total: cents as f64 / 100.0,
                item_count,
                created_at: minutes_ago(&mut rng, now, 60),
            }
        })
        .collect()
}

/// One product per catalog entry, ids `PRD-0001..`.
pub fn generate_products(seed: u64, now: DateTime<Utc>) -> Vec<Product> {
    let entries: Vec<(&str, &str)> = CATALOG
        .iter()
        .flat_map(|(category, names)| names.iter().map(move |name| (*category, *name)))
        .collect();

    entries
        .par_iter()
        .enumerate()
        .map(|(i, (category, name))| {
            let mut rng = rng_for(seed, i as u32);
            let prefix: String = category.chars().take(3).collect::<String>().to_uppercase();
            Product {
                id: format!("PRD-{:04}", i + 1),
                name: name.to_string(),
                sku: format!("{}-{:03}", prefix, i + 1),
                category: category.to_string(),
                price: rng.random_range(150..1800) as f64 / 100.0,
                stock: rng.random_range(0..200),
                status: if rng.random_bool(0.8) {
                    ProductStatus::Active
                } else {
                    *pick(&mut rng, ProductStatus::ALL)
                },
                created_at: minutes_ago(&mut rng, now, 365),
            }
        })
        .collect()
}

/// Top-level categories from the mock catalog, plus a couple of subcategories.
pub fn generate_categories() -> Vec<Category> {
    let mut categories: Vec<Category> = CATALOG
        .iter()
        .enumerate()
        .map(|(i, (name, _))| Category {
            id: format!("cat-{}", name.to_lowercase()),
            name: name.to_string(),
            parent_id: None,
            position: i as u32,
        })
        .collect();
    for (position, name) in ["Hot", "Iced"].iter().enumerate() {
        categories.push(Category {
            id: format!("cat-coffee-{}", name.to_lowercase()),
            name: name.to_string(),
            parent_id: Some("cat-coffee".to_string()),
            position: position as u32,
        });
    }
    categories
}

pub fn generate_promotions(count: u32, seed: u64, now: DateTime<Utc>) -> Vec<Promotion> {
    const NAMES: &[&str] = &["Happy Hour", "Weekend Brunch", "First Order", "Loyalty", "Lunch Deal"];

    (0..count)
        .into_par_iter()
        .map(|i| {
            let mut rng = rng_for(seed, i);
            let kind = *pick(&mut rng, DiscountKind::ALL);
            let starts_at = now + Duration::days(rng.random_range(-60..30));
            let ends_at = starts_at + Duration::days(rng.random_range(7..45));
            let status = if starts_at > now {
                PromotionStatus::Scheduled
            } else if ends_at < now {
                PromotionStatus::Expired
            } else {
                PromotionStatus::Active
            };
            let name = *pick(&mut rng, NAMES);
            Promotion {
                id: format!("PRM-{:04}", i + 1),
                code: format!("{}{}", name.split_whitespace().map(|w| &w[..1]).collect::<String>(), 10 + i),
                name: name.to_string(),
                kind,
                value: match kind {
                    DiscountKind::Percentage => rng.random_range(5..50) as f64,
                    DiscountKind::Fixed => rng.random_range(1..20) as f64,
                },
                status,
                starts_at,
                ends_at,
                usage_count: rng.random_range(0..500),
            }
        })
        .collect()
}

pub fn generate_activity(count: u32, seed: u64, now: DateTime<Utc>) -> Vec<ActivityEntry> {
    const ENTITIES: &[&str] = &["order", "product", "promotion", "client", "settings"];

    (0..count)
        .into_par_iter()
        .map(|i| {
            let mut rng = rng_for(seed, i);
            let action = *pick(&mut rng, ActivityAction::ALL);
            let entity = if action == ActivityAction::Login {
                "session"
            } else {
                *pick(&mut rng, ENTITIES)
            };
            let actor = *pick(&mut rng, STAFF);
            ActivityEntry {
                id: format!("LOG-{:06}", i + 1),
                actor: actor.to_string(),
                action,
                entity: entity.to_string(),
                description: format!("{} performed {} on {}", actor, action, entity),
                timestamp: minutes_ago(&mut rng, now, 45),
            }
        })
        .collect()
}

pub fn generate_clients(count: u32, seed: u64, now: DateTime<Utc>) -> Vec<Client> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let mut rng = rng_for(seed, i);
            let (name, email, phone) = person(&mut rng);
            let order_count = rng.random_range(0..40);
            Client {
                id: format!("CLI-{:05}", i + 1),
                name,
                email,
                phone,
                order_count,
                total_spent: (order_count * rng.random_range(800..3_000)) as f64 / 100.0,
                joined_at: minutes_ago(&mut rng, now, 720),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_orders_are_sequential_and_deterministic() {
        let a = generate_orders(50, 7, now());
        let b = generate_orders(50, 7, now());

        assert_eq!(a, b);
        assert_eq!(a.first().unwrap().id, "ORD-000001");
        assert_eq!(a.last().unwrap().id, "ORD-000050");
        assert!(a.iter().all(|o| o.created_at <= now()));
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(generate_orders(20, 1, now()), generate_orders(20, 2, now()));
    }

    #[test]
    fn test_promotion_status_matches_window() {
        for promo in generate_promotions(30, 3, now()) {
            match promo.status {
                PromotionStatus::Scheduled => assert!(promo.starts_at > now()),
                PromotionStatus::Expired => assert!(promo.ends_at < now()),
                PromotionStatus::Active => {
                    assert!(promo.starts_at <= now() && promo.ends_at >= now())
                }
            }
        }
    }

    #[test]
    fn test_products_cover_catalog() {
        let products = generate_products(1, now());
        let expected: usize = CATALOG.iter().map(|(_, names)| names.len()).sum();
        assert_eq!(products.len(), expected);
        assert!(products.iter().all(|p| p.price > 0.0));
    }
}
