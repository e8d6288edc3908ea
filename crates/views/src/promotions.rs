//! Promotions page: search by code or name; filter by status, discount type
//! and start date.

use crate::definition::ViewDefinition;
use crate::schema::{EnumParam, ViewSchema};
use chrono::{DateTime, Utc};
use pipeline::filters::FieldValue;
use store::{Dataset, DiscountKind, Promotion, PromotionStatus, RecordStore};

sort_order! {
    /// Comparators offered on the promotions page
    PromotionSort for Promotion {
        Newest => "newest", |a, b| b.starts_at.cmp(&a.starts_at);
        EndingSoon => "ending-soon", |a, b| a.ends_at.cmp(&b.ends_at);
        MostUsed => "usage-desc", |a, b| b.usage_count.cmp(&a.usage_count);
        Code => "code", |a, b| a.code.cmp(&b.code);
    }
}

pub struct PromotionsView;

fn promotion_status(promotion: &Promotion) -> &str {
    promotion.status.as_str()
}

fn discount_kind(promotion: &Promotion) -> &str {
    promotion.kind.as_str()
}

impl ViewDefinition for PromotionsView {
    type Item = Promotion;
    type Sort = PromotionSort;

    const ROUTE: &'static str = "promotions";

    fn schema() -> ViewSchema {
        ViewSchema::new::<Promotion, PromotionSort>(Self::ROUTE)
            .with_enum(EnumParam::closed(
                "status",
                PromotionStatus::ALL.iter().map(|s| s.as_str()),
            ))
            .with_enum(EnumParam::closed(
                "type",
                DiscountKind::ALL.iter().map(|k| k.as_str()),
            ))
            .with_date()
    }

    fn search_fields(promotion: &Promotion) -> Vec<&str> {
        vec![&promotion.code, &promotion.name]
    }

    fn enum_field(param: &str) -> Option<FieldValue<Promotion>> {
        let field: FieldValue<Promotion> = match param {
            "status" => promotion_status,
            "type" => discount_kind,
            _ => return None,
        };
        Some(field)
    }

    fn timestamp(promotion: &Promotion) -> Option<DateTime<Utc>> {
        Some(promotion.starts_at)
    }

    fn store(dataset: &Dataset) -> &RecordStore<Promotion> {
        &dataset.promotions
    }

    fn store_mut(dataset: &mut Dataset) -> &mut RecordStore<Promotion> {
        &mut dataset.promotions
    }
}
