//! Process-unique store identity.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`StoreId`] allocation.
static STORE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for an [`OddlyEven`](crate::OddlyEven) store.
///
/// Allocated from a monotonic atomic counter. Two stores never share an ID,
/// even when one is dropped and the next is allocated at the same address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreId(u64);

impl StoreId {
    /// Allocate a fresh ID. Thread-safe.
    pub fn next() -> Self {
        Self(STORE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let a = StoreId::next();
        let b = StoreId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn display_is_hash_prefixed() {
        let id = StoreId::next();
        assert_eq!(id.to_string(), format!("#{}", id.get()));
    }
}
