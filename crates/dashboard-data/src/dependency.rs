//! Dependency key tracking.

/// Tracks the dependency key a subscription currently fetches for.
///
/// Keys are compared with `PartialEq`; tuples of plain values give the
/// shallow comparison views expect.
#[derive(Debug, Clone)]
pub struct DependencyTracker<K> {
    current: K,
    changes: u64,
}

impl<K: PartialEq> DependencyTracker<K> {
    /// Start tracking from an initial key.
    pub fn new(initial: K) -> Self {
        Self {
            current: initial,
            changes: 0,
        }
    }

    /// Replace the key. Returns `true` if it differs from the current one.
    pub fn update(&mut self, key: K) -> bool {
        if key == self.current {
            return false;
        }
        self.current = key;
        self.changes += 1;
        true
    }

    /// The key in effect.
    pub fn current(&self) -> &K {
        &self.current
    }

    /// How many times the key has changed.
    pub fn changes(&self) -> u64 {
        self.changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_key_is_not_a_change() {
        let mut deps = DependencyTracker::new(("electronics", 1u32));
        assert!(!deps.update(("electronics", 1)));
        assert_eq!(deps.changes(), 0);
    }

    #[test]
    fn test_different_key_is_a_change() {
        let mut deps = DependencyTracker::new(("electronics", 1u32));
        assert!(deps.update(("electronics", 2)));
        assert_eq!(deps.current(), &("electronics", 2));
        assert_eq!(deps.changes(), 1);
    }
}
