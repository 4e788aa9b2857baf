//! Catalog products.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::ProductId;
use crate::money::Money;

/// Product status in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Product is listed and can be ordered.
    #[default]
    Active,
    /// Product is being prepared, not listed.
    Draft,
    /// Product is retired but kept for order history.
    Archived,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Draft => "draft",
            ProductStatus::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.to_lowercase().as_str() {
            "active" => Ok(ProductStatus::Active),
            "draft" => Ok(ProductStatus::Draft),
            "archived" => Ok(ProductStatus::Archived),
            _ => Err(DomainError::UnknownValue {
                field: "product status",
                value: s.to_string(),
            }),
        }
    }
}

/// A product in the merchant's catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Stock keeping unit.
    pub sku: String,
    /// Display name.
    pub name: String,
    /// Category label (e.g., "Beverages").
    pub category: String,
    /// Listing status.
    pub status: ProductStatus,
    /// Unit price.
    pub price: Money,
    /// Units on hand.
    pub stock: i64,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Product {
    /// Create a new active product with no stock.
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: ProductId::generate(),
            sku: sku.into(),
            name: name.into(),
            category: category.into(),
            status: ProductStatus::Active,
            price,
            stock: 0,
            created_at: crate::current_timestamp(),
        }
    }

    /// Set units on hand.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Set the listing status.
    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether at least one unit is on hand.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Whether stock is at or below `threshold` (low-stock alert).
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.status == ProductStatus::Active && self.stock <= threshold
    }
}
