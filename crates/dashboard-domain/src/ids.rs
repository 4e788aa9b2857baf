//! Newtype IDs for type-safe identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new unique ID.
            pub fn generate() -> Self {
                Self(generate_id($prefix))
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

define_id!(ProductId, "prod");
define_id!(OrderId, "ord");
define_id!(ClientId, "cli");
define_id!(NotificationId, "ntf");

fn generate_id(prefix: &str) -> String {
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(1);

    let timestamp = crate::current_timestamp() as u64;
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}-{:x}{:04x}", prefix, timestamp, counter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_generation_is_unique_and_prefixed() {
        let a = OrderId::generate();
        let b = OrderId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("ord-"));
    }

    #[test]
    fn test_id_from_str() {
        let id: ClientId = "cli-1".into();
        assert_eq!(id.to_string(), "cli-1");
        assert_eq!(id, ClientId::new("cli-1"));
    }
}
