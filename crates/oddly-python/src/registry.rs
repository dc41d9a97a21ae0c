//! The process-wide reference registry and its Python-facing stats.

use std::sync::OnceLock;

use pyo3::prelude::*;
use pyo3::types::PyDict;

use oddly_core::Registry;

use crate::value::PyValue;

static REGISTRY: OnceLock<Registry<PyValue>> = OnceLock::new();

/// The registry every store in this interpreter pins its objects in.
pub(crate) fn shared() -> &'static Registry<PyValue> {
    REGISTRY.get_or_init(Registry::new)
}

/// Snapshot of the shared registry's counters.
#[pyclass]
pub(crate) struct RegistryStats {
    pub(crate) outstanding: usize,
    pub(crate) peak_outstanding: usize,
    pub(crate) acquired_total: u64,
    pub(crate) released_total: u64,
    pub(crate) stale_releases: u64,
}

#[pymethods]
impl RegistryStats {
    /// Objects currently pinned by live stores.
    #[getter]
    fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Highest ``outstanding`` seen since import.
    #[getter]
    fn peak_outstanding(&self) -> usize {
        self.peak_outstanding
    }

    #[getter]
    fn acquired_total(&self) -> u64 {
        self.acquired_total
    }

    #[getter]
    fn released_total(&self) -> u64 {
        self.released_total
    }

    /// Releases of handles that were no longer live. Nonzero means a bug.
    #[getter]
    fn stale_releases(&self) -> u64 {
        self.stale_releases
    }

    /// Convert to a plain Python dict.
    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let d = PyDict::new(py);
        d.set_item("outstanding", self.outstanding)?;
        d.set_item("peak_outstanding", self.peak_outstanding)?;
        d.set_item("acquired_total", self.acquired_total)?;
        d.set_item("released_total", self.released_total)?;
        d.set_item("stale_releases", self.stale_releases)?;
        Ok(d)
    }

    fn __repr__(&self) -> String {
        format!(
            "RegistryStats(outstanding={}, peak={}, acquired={}, released={}, stale={})",
            self.outstanding,
            self.peak_outstanding,
            self.acquired_total,
            self.released_total,
            self.stale_releases,
        )
    }
}

impl From<oddly_core::RegistryStats> for RegistryStats {
    fn from(s: oddly_core::RegistryStats) -> Self {
        RegistryStats {
            outstanding: s.outstanding,
            peak_outstanding: s.peak_outstanding,
            acquired_total: s.acquired_total,
            released_total: s.released_total,
            stale_releases: s.stale_releases,
        }
    }
}

/// Counters of the shared registry.
#[pyfunction]
pub(crate) fn registry_stats() -> RegistryStats {
    shared().stats().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_every_counter() {
        let core = oddly_core::RegistryStats {
            outstanding: 1,
            peak_outstanding: 2,
            acquired_total: 3,
            released_total: 2,
            stale_releases: 0,
        };
        let s = RegistryStats::from(core);
        assert_eq!(s.outstanding, 1);
        assert_eq!(s.peak_outstanding, 2);
        assert_eq!(s.acquired_total, 3);
        assert_eq!(s.released_total, 2);
        assert_eq!(s.stale_releases, 0);
    }

    #[test]
    fn shared_registry_is_a_singleton() {
        assert!(shared().ptr_eq(shared()));
    }
}
