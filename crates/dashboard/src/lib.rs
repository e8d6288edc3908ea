//! Dashboard crate for the storefront back office.
//!
//! This crate contains the list controller that coordinates the store,
//! a view definition and the URL, plus the breadcrumb resolver shared by
//! every page.

pub mod breadcrumbs;
pub mod controller;
pub mod history;
pub mod notice;

pub use breadcrumbs::{Breadcrumb, breadcrumbs, route_name};
pub use controller::ListController;
pub use history::{History, MemoryHistory};
pub use notice::{Notice, NoticeKind};
