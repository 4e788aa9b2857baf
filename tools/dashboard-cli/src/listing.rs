//! Table rendering for fetched resources.

use dashboard_domain::prelude::*;
use serde::Serialize;

use crate::output::{format_date, status_badge};

/// A list value that can be fetched and printed as a table.
pub trait Listing: Clone + Default + Serialize + Send + Sync + 'static {
    fn headers() -> &'static [&'static str];
    fn rows(&self) -> Vec<Vec<String>>;
    fn count(&self) -> usize;
}

impl Listing for Vec<Product> {
    fn headers() -> &'static [&'static str] {
        &["ID", "SKU", "NAME", "CATEGORY", "PRICE", "STOCK", "STATUS"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|p| {
                vec![
                    p.id.to_string(),
                    p.sku.clone(),
                    p.name.clone(),
                    p.category.clone(),
                    p.price.display(),
                    p.stock.to_string(),
                    status_badge(p.status.as_str()),
                ]
            })
            .collect()
    }

    fn count(&self) -> usize {
        self.len()
    }
}

impl Listing for Vec<Order> {
    fn headers() -> &'static [&'static str] {
        &["ID", "CLIENT", "DATE", "ITEMS", "TOTAL", "STATUS"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|o| {
                let total = o
                    .total()
                    .map(|m| m.display())
                    .unwrap_or_else(|e| e.to_string());
                vec![
                    o.id.to_string(),
                    o.client_id.to_string(),
                    format_date(o.created_at),
                    o.item_count().to_string(),
                    total,
                    status_badge(o.status.as_str()),
                ]
            })
            .collect()
    }

    fn count(&self) -> usize {
        self.len()
    }
}

impl Listing for Vec<Client> {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "COMPANY", "STATUS", "ORDERS", "SPENT", "JOINED"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|c| {
                vec![
                    c.id.to_string(),
                    c.name.clone(),
                    c.company.clone().unwrap_or_else(|| "-".to_string()),
                    status_badge(c.status.as_str()),
                    c.order_count.to_string(),
                    c.total_spent.display(),
                    format_date(c.joined_at),
                ]
            })
            .collect()
    }

    fn count(&self) -> usize {
        self.len()
    }
}

impl Listing for Vec<Notification> {
    fn headers() -> &'static [&'static str] {
        &["ID", "KIND", "TITLE", "DATE", "READ"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|n| {
                vec![
                    n.id.to_string(),
                    n.kind.as_str().to_string(),
                    n.title.clone(),
                    format_date(n.created_at),
                    if n.read { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect()
    }

    fn count(&self) -> usize {
        self.len()
    }
}
