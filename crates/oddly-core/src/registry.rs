//! Shared reference registry.
//!
//! Pins host-heap values so the host's collector keeps them alive while a
//! store refers to them. One registry is shared by every store of a host
//! (clone the [`Registry`] handle); handles from independent acquisitions
//! never collide.
//!
//! The table sits behind a mutex because hosts may release their own
//! interpreter lock around native calls. Released values are dropped only
//! after the lock is released: dropping a host value can run host code
//! that re-enters the registry.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::RegistryConfig;
use crate::error::ConfigError;
use crate::handle::{HandleTable, RefHandle};
use crate::value::HostValue;

/// Registry counters, snapshotted by [`Registry::stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Handles acquired and not yet released.
    pub outstanding: usize,
    /// Highest `outstanding` seen.
    pub peak_outstanding: usize,
    /// Total successful acquisitions.
    pub acquired_total: u64,
    /// Total successful releases.
    pub released_total: u64,
    /// Releases of handles that were already released or never issued.
    pub stale_releases: u64,
}

struct RegistryInner<V> {
    table: HandleTable<V>,
    stats: RegistryStats,
}

/// Cloneable handle to a shared reference table.
pub struct Registry<V> {
    inner: Arc<Mutex<RegistryInner<V>>>,
}

impl<V> Clone for Registry<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Default for Registry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Registry<V> {
    /// Create a registry with the default configuration.
    pub fn new() -> Self {
        Self::build(&RegistryConfig::default())
    }

    /// Create a registry from a validated configuration.
    pub fn with_config(config: &RegistryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &RegistryConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RegistryInner {
                table: HandleTable::with_capacity(config.initial_capacity),
                stats: RegistryStats::default(),
            })),
        }
    }

    /// Lock the table. A poisoned lock is recovered: every table operation
    /// leaves the table consistent before it can panic.
    fn lock(&self) -> MutexGuard<'_, RegistryInner<V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pin `value` and return a fresh handle to it.
    pub fn acquire(&self, value: V) -> RefHandle {
        let mut inner = self.lock();
        let handle = inner.table.insert(value);
        let live = inner.table.len();
        let stats = &mut inner.stats;
        stats.acquired_total += 1;
        stats.outstanding = live;
        stats.peak_outstanding = stats.peak_outstanding.max(live);
        handle
    }

    /// Unpin the value behind `handle`.
    ///
    /// Returns `false`, and does nothing else, if the handle was already
    /// released or never issued.
    pub fn release(&self, handle: RefHandle) -> bool {
        let removed = {
            let mut inner = self.lock();
            let removed = inner.table.remove(handle);
            let live = inner.table.len();
            let stats = &mut inner.stats;
            if removed.is_some() {
                stats.released_total += 1;
                stats.outstanding = live;
            } else {
                stats.stale_releases += 1;
            }
            removed
        };
        removed.is_some()
    }

    /// Whether `handle` is currently acquired.
    pub fn contains(&self, handle: RefHandle) -> bool {
        self.lock().table.get(handle).is_some()
    }

    /// Number of handles acquired and not yet released.
    pub fn outstanding(&self) -> usize {
        self.lock().table.len()
    }

    /// Snapshot of the registry counters.
    pub fn stats(&self) -> RegistryStats {
        self.lock().stats
    }

    /// Whether both handles refer to the same table.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<V: HostValue> Registry<V> {
    /// Another reference to the value behind `handle`.
    ///
    /// Returns `None` if the handle was released or never issued.
    pub fn resolve(&self, handle: RefHandle) -> Option<V> {
        self.lock().table.get(handle).map(HostValue::share)
    }
}
