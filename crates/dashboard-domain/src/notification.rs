//! Dashboard notifications.

use serde::{Deserialize, Serialize};

use crate::ids::NotificationId;

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Order,
    Stock,
    Message,
    System,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Order => "order",
            NotificationKind::Stock => "stock",
            NotificationKind::Message => "message",
            NotificationKind::System => "system",
        }
    }
}

/// A feed item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub read: bool,
    /// Unix timestamp.
    pub created_at: i64,
}

impl Notification {
    /// Create an unread notification.
    pub fn new(kind: NotificationKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: NotificationId::generate(),
            kind,
            title: title.into(),
            body: body.into(),
            read: false,
            created_at: crate::current_timestamp(),
        }
    }

    pub fn mark_read(&mut self) {
        self.read = true;
    }
}

/// Notification list owned by the composing view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationFeed {
    items: Vec<Notification>,
}

impl NotificationFeed {
    pub fn new(items: Vec<Notification>) -> Self {
        Self { items }
    }

    pub fn push(&mut self, notification: Notification) {
        self.items.push(notification);
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    /// Mark one item read. Returns `false` if the ID is unknown.
    pub fn mark_read(&mut self, id: &NotificationId) -> bool {
        match self.items.iter_mut().find(|n| &n.id == id) {
            Some(notification) => {
                notification.mark_read();
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        self.items.iter_mut().for_each(Notification::mark_read);
    }

    /// Newest `limit` items, newest first.
    pub fn latest(&self, limit: usize) -> Vec<&Notification> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items.truncate(limit);
        items
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }
}
