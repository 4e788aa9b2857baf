//! Merchant domain types for the dashboard.
//!
//! - **Catalog**: products with price, stock and status
//! - **Orders**: orders with line items and totals
//! - **Clients**: customer records with spend and order counts
//! - **Notifications**: feed items with read tracking
//! - **Queries**: client-side filtering and sorting for list views
//! - **Mock data**: a deterministic `MockStore` for producers and demos

pub mod error;
pub mod ids;
pub mod money;

pub mod client;
pub mod mock;
pub mod notification;
pub mod order;
pub mod product;
pub mod query;

pub use error::DomainError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::DomainError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    pub use crate::client::{Client, ClientStatus};
    pub use crate::mock::MockStore;
    pub use crate::notification::{Notification, NotificationFeed, NotificationKind};
    pub use crate::order::{Order, OrderLine, OrderStatus};
    pub use crate::product::{Product, ProductStatus};
    pub use crate::query::{
        ClientQuery, ClientSort, OrderQuery, OrderSort, ProductQuery, ProductSort, SortDirection,
    };
}

pub(crate) fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
