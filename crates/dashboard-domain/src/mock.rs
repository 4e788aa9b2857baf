//! Deterministic sample data.
//!
//! Stands in for the dashboard's REST backend in demos and tests. IDs and
//! timestamps are fixed so output is reproducible.

use serde::Serialize;

use crate::client::{Client, ClientStatus};
use crate::error::DomainError;
use crate::ids::{ClientId, NotificationId, OrderId, ProductId};
use crate::money::{Currency, Money};
use crate::notification::{Notification, NotificationKind};
use crate::order::{Order, OrderLine, OrderStatus};
use crate::product::{Product, ProductStatus};

/// Base timestamp for sample data (2024-01-01T00:00:00Z).
const EPOCH: i64 = 1_704_067_200;
const DAY: i64 = 86_400;

/// Low-stock threshold used by the summary.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// In-memory merchant data.
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    products: Vec<Product>,
    orders: Vec<Order>,
    clients: Vec<Client>,
    notifications: Vec<Notification>,
}

/// Headline numbers for the dashboard overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSummary {
    pub products: usize,
    pub low_stock: usize,
    pub open_orders: usize,
    pub revenue: Money,
    pub unread_notifications: usize,
}

fn usd(cents: i64) -> Money {
    Money::new(cents, Currency::USD)
}

fn product(id: &str, sku: &str, name: &str, category: &str, cents: i64, stock: i64, day: i64) -> Product {
    let mut p = Product::new(sku, name, category, usd(cents)).with_stock(stock);
    p.id = ProductId::new(id);
    p.created_at = EPOCH + day * DAY;
    p
}

fn client(id: &str, name: &str, email: &str, company: Option<&str>, day: i64) -> Client {
    let mut c = Client::new(name, email, Currency::USD);
    c.id = ClientId::new(id);
    c.company = company.map(str::to_string);
    c.joined_at = EPOCH + day * DAY;
    c
}

impl MockStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store populated with a fixed catalog, clients, orders and notifications.
    pub fn seeded() -> Result<Self, DomainError> {
        let products = vec![
            product("prod-1", "TEA-GRN-250", "Green Tea 250g", "Beverages", 899, 42, 0),
            product("prod-2", "TEA-BLK-250", "Black Tea 250g", "Beverages", 799, 3, 2),
            product("prod-3", "MUG-CER-01", "Ceramic Mug", "Kitchen", 1299, 0, 5),
            product("prod-4", "KTL-STL-01", "Steel Kettle", "Kitchen", 3499, 12, 9),
            product("prod-5", "GFT-BOX-01", "Gift Box", "Gifts", 2499, 7, 14)
                .with_status(ProductStatus::Draft),
        ];

        let mut clients = vec![
            client("cli-1", "Amina Okafor", "amina@brightcafe.com", Some("Bright Cafe"), 1),
            client("cli-2", "Lucas Meyer", "lucas@meyer-deli.de", Some("Meyer Deli"), 3),
            client("cli-3", "Sofia Rossi", "sofia.rossi@example.com", None, 8),
            client("cli-4", "Kenji Sato", "kenji@teahouse.jp", Some("Sato Teahouse"), 20),
        ];

        let line = |p: &Product, qty: i64| OrderLine::new(p.id.clone(), p.name.clone(), qty, p.price);
        let order = |id: &str, client: &str, day: i64, status: OrderStatus, lines: Vec<OrderLine>| {
            let mut o = Order::new(ClientId::new(client), Currency::USD).with_status(status);
            o.id = OrderId::new(id);
            o.created_at = EPOCH + day * DAY;
            o.lines = lines;
            o
        };

        let orders = vec![
            order("ord-1", "cli-1", 4, OrderStatus::Delivered, vec![line(&products[0], 10)?, line(&products[2], 4)?]),
            order("ord-2", "cli-2", 6, OrderStatus::Shipped, vec![line(&products[1], 6)?]),
            order("ord-3", "cli-1", 11, OrderStatus::Processing, vec![line(&products[3], 2)?]),
            order("ord-4", "cli-3", 15, OrderStatus::Pending, vec![line(&products[0], 1)?, line(&products[1], 1)?]),
            order("ord-5", "cli-2", 16, OrderStatus::Cancelled, vec![line(&products[3], 1)?]),
        ];

        for o in &orders {
            if o.status == OrderStatus::Cancelled {
                continue;
            }
            if let Some(c) = clients.iter_mut().find(|c| c.id == o.client_id) {
                c.record_order(o.total()?)?;
            }
        }
        if let Some(c) = clients.iter_mut().find(|c| c.id.as_str() == "cli-2") {
            c.status = ClientStatus::Inactive;
        }

        let notification = |id: &str, kind, title: &str, body: &str, day: i64, read: bool| {
            let mut n = Notification::new(kind, title, body);
            n.id = NotificationId::new(id);
            n.created_at = EPOCH + day * DAY;
            n.read = read;
            n
        };
        let notifications = vec![
            notification("ntf-1", NotificationKind::Order, "New order", "Sofia Rossi placed ord-4", 15, false),
            notification("ntf-2", NotificationKind::Stock, "Low stock", "Black Tea 250g has 3 units left", 16, false),
            notification("ntf-3", NotificationKind::Message, "Message from Lucas Meyer", "Can you ship on Friday?", 12, true),
            notification("ntf-4", NotificationKind::System, "Plan renewed", "Your subscription renews in 30 days", 10, true),
        ];

        Ok(Self {
            products,
            orders,
            clients,
            notifications,
        })
    }

    pub fn products(&self) -> Vec<Product> {
        self.products.clone()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.orders.clone()
    }

    pub fn clients(&self) -> Vec<Client> {
        self.clients.clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.clone()
    }

    /// Overview numbers. Revenue counts every non-cancelled order.
    pub fn summary(&self) -> Result<StoreSummary, DomainError> {
        let revenue = self
            .orders
            .iter()
            .filter(|o| o.status != OrderStatus::Cancelled)
            .try_fold(usd(0), |acc, o| acc.checked_add(o.total()?))?;

        Ok(StoreSummary {
            products: self.products.len(),
            low_stock: self
                .products
                .iter()
                .filter(|p| p.is_low_stock(LOW_STOCK_THRESHOLD))
                .count(),
            open_orders: self.orders.iter().filter(|o| !o.status.is_terminal()).count(),
            revenue,
            unread_notifications: self.notifications.iter().filter(|n| !n.read).count(),
        })
    }
}
