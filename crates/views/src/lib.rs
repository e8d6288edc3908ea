//! # Views Crate
//!
//! Per-page list definitions for the back office and the query-string codec
//! that mirrors their state.
//!
//! ## Components
//!
//! ### View definitions
//! One `ViewDefinition` per list page, binding a record kind to the generic
//! pipeline:
//! - `OrdersView`: search id/customer/phone/email, `status`, `payment`, date
//! - `ProductsView`: search name/sku/category, `status`, `category`, date
//! - `PromotionsView`: search code/name, `status`, `type`, date
//! - `ActivityView`: search actor/entity/description, `action`, date
//! - `ClientsView`: search name/email/phone
//!
//! ### URL state
//! `decode_state` / `encode_state` convert between a query string and a
//! `ViewState`; `build_view` turns a `ViewState` into a `ListView`.
//!
//! ## Example Usage
//!
//! ```ignore
//! use views::{OrdersView, ViewDefinition, build_view, decode_state, encode_state};
//!
//! let schema = OrdersView::schema();
//! let state = decode_state("?search=ali&status=pending&page=2", &schema);
//! let view = build_view::<OrdersView>(dataset.orders.list(), &state, Utc::now());
//!
//! assert_eq!(encode_state(&state, &schema), "search=ali&status=pending&page=2");
//! ```

/// Declares a view's comparator enum and its `SortOrder` impl.
///
/// The first variant is the default.
macro_rules! sort_order {
    (
        $(#[$meta:meta])*
        $name:ident for $item:ty {
            $($variant:ident => $wire:literal, |$a:ident, $b:ident| $cmp:expr;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl Default for $name {
            fn default() -> Self {
                <$name as ::pipeline::SortOrder<$item>>::all()[0]
            }
        }

        impl ::pipeline::SortOrder<$item> for $name {
            fn all() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            fn compare(&self, left: &$item, right: &$item) -> ::std::cmp::Ordering {
                match self {
                    $($name::$variant => (|$a: &$item, $b: &$item| $cmp)(left, right)),+
                }
            }
        }
    };
}

pub mod activity;
pub mod clients;
pub mod definition;
pub mod orders;
pub mod products;
pub mod promotions;
pub mod schema;
pub mod url_state;

// Re-export main types
pub use activity::{ActivitySort, ActivityView};
pub use clients::{ClientSort, ClientsView};
pub use definition::{ViewDefinition, build_view, date_filter, enum_filter, search_filter, sort_for};
pub use orders::{OrderSort, OrdersView};
pub use products::{ProductSort, ProductsView};
pub use promotions::{PromotionSort, PromotionsView};
pub use schema::{EnumParam, ViewSchema};
pub use url_state::{ViewState, decode_state, encode_state};
