//! Client-side filtering and sorting for list views.
//!
//! Every `apply` is pure: it never mutates its input and sorts stably, so
//! rows with equal keys keep their incoming order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::client::{Client, ClientStatus};
use crate::error::DomainError;
use crate::ids::ClientId;
use crate::money::Money;
use crate::order::{Order, OrderStatus};
use crate::product::{Product, ProductStatus};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Client list sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ClientSort {
    #[default]
    Name,
    TotalSpent,
    OrderCount,
    JoinedAt,
}

impl ClientSort {
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "name" => Ok(ClientSort::Name),
            "totalspent" | "spent" => Ok(ClientSort::TotalSpent),
            "ordercount" | "orders" => Ok(ClientSort::OrderCount),
            "joinedat" | "joined" => Ok(ClientSort::JoinedAt),
            _ => Err(DomainError::UnknownValue {
                field: "client sort",
                value: s.to_string(),
            }),
        }
    }

    fn compare(self, a: &Client, b: &Client) -> Ordering {
        match self {
            ClientSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            ClientSort::TotalSpent => a.total_spent.amount_cents.cmp(&b.total_spent.amount_cents),
            ClientSort::OrderCount => a.order_count.cmp(&b.order_count),
            ClientSort::JoinedAt => a.joined_at.cmp(&b.joined_at),
        }
    }
}

/// Filter and sort for the clients table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientQuery {
    /// Case-insensitive text over name, email and company.
    pub text: Option<String>,
    /// Only clients with this status.
    pub status: Option<ClientStatus>,
    pub sort: ClientSort,
    pub direction: SortDirection,
}

impl ClientQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = if text.trim().is_empty() { None } else { Some(text) };
        self
    }

    pub fn status(mut self, status: ClientStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn sort(mut self, sort: ClientSort, direction: SortDirection) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }

    pub fn matches(&self, client: &Client) -> bool {
        if let Some(status) = self.status {
            if client.status != status {
                return false;
            }
        }
        match &self.text {
            Some(text) => client.matches_text(text.trim()),
            None => true,
        }
    }

    pub fn apply(&self, clients: &[Client]) -> Vec<Client> {
        let mut rows: Vec<Client> = clients.iter().filter(|c| self.matches(c)).cloned().collect();
        rows.sort_by(|a, b| self.direction.apply(self.sort.compare(a, b)));
        rows
    }
}

/// Product list sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProductSort {
    #[default]
    Name,
    Price,
    Stock,
    Newest,
}

impl ProductSort {
    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            ProductSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            ProductSort::Price => a.price.amount_cents.cmp(&b.price.amount_cents),
            ProductSort::Stock => a.stock.cmp(&b.stock),
            ProductSort::Newest => b.created_at.cmp(&a.created_at),
        }
    }
}

/// Filter and sort for the product catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    pub text: Option<String>,
    pub category: Option<String>,
    pub status: Option<ProductStatus>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    pub in_stock_only: bool,
    pub sort: ProductSort,
    pub direction: SortDirection,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn status(mut self, status: ProductStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn in_stock(mut self) -> Self {
        self.in_stock_only = true;
        self
    }

    pub fn sort(mut self, sort: ProductSort, direction: SortDirection) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(ref text) = self.text {
            let needle = text.to_lowercase();
            if !product.name.to_lowercase().contains(&needle)
                && !product.sku.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if !product.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if product.status != status {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if product.price.amount_cents < min.amount_cents {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price.amount_cents > max.amount_cents {
                return false;
            }
        }
        !self.in_stock_only || product.is_in_stock()
    }

    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut rows: Vec<Product> = products.iter().filter(|p| self.matches(p)).cloned().collect();
        rows.sort_by(|a, b| self.direction.apply(self.sort.compare(a, b)));
        rows
    }
}

/// Order list sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrderSort {
    #[default]
    Date,
    Total,
}

/// Filter and sort for the orders table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderQuery {
    pub status: Option<OrderStatus>,
    pub client_id: Option<ClientId>,
    /// Inclusive lower bound (unix seconds).
    pub from: Option<i64>,
    /// Inclusive upper bound (unix seconds).
    pub to: Option<i64>,
    pub sort: OrderSort,
    pub direction: SortDirection,
}

impl OrderQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn date_range(mut self, from: Option<i64>, to: Option<i64>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn sort(mut self, sort: OrderSort, direction: SortDirection) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }

    pub fn matches(&self, order: &Order) -> bool {
        if self.status.is_some_and(|s| s != order.status) {
            return false;
        }
        if self.client_id.as_ref().is_some_and(|c| c != &order.client_id) {
            return false;
        }
        if self.from.is_some_and(|from| order.created_at < from) {
            return false;
        }
        !self.to.is_some_and(|to| order.created_at > to)
    }

    /// Orders whose totals cannot be computed sort as zero.
    pub fn apply(&self, orders: &[Order]) -> Vec<Order> {
        let mut rows: Vec<Order> = orders.iter().filter(|o| self.matches(o)).cloned().collect();
        match self.sort {
            OrderSort::Date => {
                rows.sort_by(|a, b| self.direction.apply(a.created_at.cmp(&b.created_at)))
            }
            OrderSort::Total => {
                let mut keyed: Vec<(i64, Order)> = rows
                    .into_iter()
                    .map(|o| (o.total().map(|m| m.amount_cents).unwrap_or(0), o))
                    .collect();
                keyed.sort_by(|a, b| self.direction.apply(a.0.cmp(&b.0)));
                rows = keyed.into_iter().map(|(_, o)| o).collect();
            }
        }
        rows
    }
}
