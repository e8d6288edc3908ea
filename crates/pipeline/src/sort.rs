//! Sort stage: one comparator from a closed set, applied stably.

use crate::traits::SortOrder;

/// Sort items in place with the given comparator.
///
/// `sort_by` is stable, so items that compare equal keep their source order.
pub fn sort_items<T, S: SortOrder<T>>(items: &mut [T], order: S) {
    items.sort_by(|a, b| order.compare(a, b));
    tracing::debug!("Sorted {} items by {}", items.len(), order.name());
}

/// Resolve a comparator name, falling back to the view default.
pub fn resolve_sort<T, S: SortOrder<T>>(name: Option<&str>) -> S {
    match name.and_then(S::from_name) {
        Some(order) => order,
        None => {
            if let Some(name) = name {
                tracing::warn!("Unknown sort '{}', using '{}'", name, S::default().name());
            }
            S::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: &'static str,
        amount: u32,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    enum RowSort {
        #[default]
        AmountDesc,
        AmountAsc,
    }

    impl SortOrder<Row> for RowSort {
        fn all() -> &'static [Self] {
            &[RowSort::AmountDesc, RowSort::AmountAsc]
        }

        fn name(&self) -> &'static str {
            match self {
                RowSort::AmountDesc => "amount-desc",
                RowSort::AmountAsc => "amount-asc",
            }
        }

        fn compare(&self, a: &Row, b: &Row) -> Ordering {
            match self {
                RowSort::AmountDesc => b.amount.cmp(&a.amount),
                RowSort::AmountAsc => a.amount.cmp(&b.amount),
            }
        }
    }

    fn create_test_rows() -> Vec<Row> {
        vec![
            Row { id: "a", amount: 5 },
            Row { id: "b", amount: 9 },
            Row { id: "c", amount: 5 },
            Row { id: "d", amount: 1 },
        ]
    }

    #[test]
    fn test_sort_is_stable() {
        let mut rows = create_test_rows();
        sort_items(&mut rows, RowSort::AmountAsc);

        let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["d", "a", "c", "b"]);
    }

    #[test]
    fn test_resolve_sort_falls_back_to_default() {
        assert_eq!(resolve_sort::<Row, RowSort>(Some("AMOUNT-ASC")), RowSort::AmountAsc);
        assert_eq!(resolve_sort::<Row, RowSort>(Some("bogus")), RowSort::AmountDesc);
        assert_eq!(resolve_sort::<Row, RowSort>(None), RowSort::AmountDesc);
    }
}
