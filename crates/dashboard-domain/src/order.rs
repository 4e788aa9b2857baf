//! Orders.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{ClientId, OrderId, ProductId};
use crate::money::{Currency, Money};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order being prepared.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(DomainError::UnknownValue {
                field: "order status",
                value: s.to_string(),
            }),
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// A line on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Ordered product.
    pub product_id: ProductId,
    /// Product name at time of order.
    pub name: String,
    /// Units ordered.
    pub quantity: i64,
    /// Price per unit at time of order.
    pub unit_price: Money,
}

impl OrderLine {
    /// Create a line, rejecting non-positive quantities.
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Result<Self, DomainError> {
        if quantity <= 0 {
            return Err(DomainError::InvalidQuantity(quantity));
        }
        Ok(Self {
            product_id,
            name: name.into(),
            quantity,
            unit_price,
        })
    }

    /// Line total.
    pub fn total(&self) -> Result<Money, DomainError> {
        self.unit_price.checked_mul(self.quantity)
    }
}

/// A client's order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Ordering client.
    pub client_id: ClientId,
    /// Ordered lines.
    pub lines: Vec<OrderLine>,
    /// Fulfilment status.
    pub status: OrderStatus,
    /// Order currency.
    pub currency: Currency,
    /// Unix timestamp of placement.
    pub created_at: i64,
}

impl Order {
    /// Create a pending order with no lines.
    pub fn new(client_id: ClientId, currency: Currency) -> Self {
        Self {
            id: OrderId::generate(),
            client_id,
            lines: Vec::new(),
            status: OrderStatus::Pending,
            currency,
            created_at: crate::current_timestamp(),
        }
    }

    /// Add a line.
    pub fn with_line(mut self, line: OrderLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    /// Sum of line totals.
    pub fn total(&self) -> Result<Money, DomainError> {
        self.lines
            .iter()
            .try_fold(Money::zero(self.currency), |acc, line| {
                acc.checked_add(line.total()?)
            })
    }

    /// Total units across lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(qty: i64, cents: i64) -> OrderLine {
        OrderLine::new(ProductId::new("p"), "Item", qty, Money::new(cents, Currency::USD)).unwrap()
    }

    #[test]
    fn test_order_total() {
        let order = Order::new(ClientId::new("c"), Currency::USD)
            .with_line(line(2, 450))
            .with_line(line(1, 1299));
        assert_eq!(order.total().unwrap().amount_cents, 2199);
        assert_eq!(order.item_count(), 3);
    }

    #[test]
    fn test_empty_order_total_is_zero() {
        let order = Order::new(ClientId::new("c"), Currency::EUR);
        assert_eq!(order.total().unwrap(), Money::zero(Currency::EUR));
    }

    #[test]
    fn test_invalid_quantity() {
        let result = OrderLine::new(ProductId::new("p"), "Item", 0, Money::zero(Currency::USD));
        assert_eq!(result, Err(DomainError::InvalidQuantity(0)));
    }

    #[test]
    fn test_mixed_currency_line_fails_total() {
        let order = Order::new(ClientId::new("c"), Currency::USD).with_line(
            OrderLine::new(ProductId::new("p"), "Item", 1, Money::new(100, Currency::GBP)).unwrap(),
        );
        assert!(order.total().is_err());
    }

    #[test]
    fn test_status_terminal() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
        assert_eq!(OrderStatus::parse("SHIPPED"), Ok(OrderStatus::Shipped));
    }
}
