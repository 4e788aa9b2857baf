//! Merchant clients.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::ClientId;
use crate::money::{Currency, Money};

/// Client relationship status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    /// Ordering client.
    #[default]
    Active,
    /// No recent orders.
    Inactive,
    /// Prospect without orders.
    Lead,
}

impl ClientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Active => "active",
            ClientStatus::Inactive => "inactive",
            ClientStatus::Lead => "lead",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.to_lowercase().as_str() {
            "active" => Ok(ClientStatus::Active),
            "inactive" => Ok(ClientStatus::Inactive),
            "lead" => Ok(ClientStatus::Lead),
            _ => Err(DomainError::UnknownValue {
                field: "client status",
                value: s.to_string(),
            }),
        }
    }
}

/// A client of the merchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Unique client identifier.
    pub id: ClientId,
    /// Contact name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Company name, if any.
    pub company: Option<String>,
    /// Relationship status.
    pub status: ClientStatus,
    /// Number of orders placed.
    pub order_count: u32,
    /// Lifetime spend.
    pub total_spent: Money,
    /// Unix timestamp of first contact.
    pub joined_at: i64,
}

impl Client {
    /// Create a lead with no orders.
    pub fn new(name: impl Into<String>, email: impl Into<String>, currency: Currency) -> Self {
        Self {
            id: ClientId::generate(),
            name: name.into(),
            email: email.into(),
            company: None,
            status: ClientStatus::Lead,
            order_count: 0,
            total_spent: Money::zero(currency),
            joined_at: crate::current_timestamp(),
        }
    }

    /// Set the company name.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Record a placed order; a lead becomes active.
    pub fn record_order(&mut self, total: Money) -> Result<(), DomainError> {
        self.total_spent = self.total_spent.checked_add(total)?;
        self.order_count += 1;
        if self.status == ClientStatus::Lead {
            self.status = ClientStatus::Active;
        }
        Ok(())
    }

    /// Case-insensitive match on name, email or company.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.email.to_lowercase().contains(&needle)
            || self
                .company
                .as_deref()
                .map(|c| c.to_lowercase().contains(&needle))
                .unwrap_or(false)
    }
}
