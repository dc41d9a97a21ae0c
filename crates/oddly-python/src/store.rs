//! Store: the `OddlyEven` Python class.
//!
//! Indexing follows parity (`h[0] is h[2]`), `len(h)` is always 2, and
//! iterating a store walks both slots like `entries()`. CPython deallocation
//! drops the wrapped store, which releases every registry handle it holds.

use pyo3::prelude::*;

use oddly_core::{IterVariant, OddlyEven, StorageStrategy, StoreConfig, SLOT_COUNT};

use crate::error::config_error;
use crate::iter::StoreIter;
use crate::registry::shared;
use crate::value::{index_arg, PyValue};

/// A two-slot value store addressed by index parity.
///
/// Args:
///     strategy: ``"tagged"`` keeps scalars inline and pins only heap
///         objects; ``"registry"`` pins every non-None value.
///     label: Name shown by ``str()``. Defaults to ``"OddlyEven"``.
#[pyclass(name = "OddlyEven", module = "oddly._oddly")]
pub(crate) struct Store {
    pub(crate) inner: OddlyEven<PyValue>,
}

#[pymethods]
impl Store {
    #[new]
    #[pyo3(signature = (strategy="tagged", label=None))]
    fn new(strategy: &str, label: Option<String>) -> PyResult<Self> {
        let strategy: StorageStrategy = strategy.parse().map_err(|e| config_error(&e))?;
        let config = StoreConfig {
            strategy,
            label: label.unwrap_or_else(|| StoreConfig::DEFAULT_LABEL.to_string()),
        };
        let inner = OddlyEven::with_config(shared(), config).map_err(|e| config_error(&e))?;
        Ok(Store { inner })
    }

    fn __setitem__(&mut self, index: &Bound<'_, PyAny>, value: &Bound<'_, PyAny>) -> PyResult<()> {
        let index = index_arg(index, 2)?;
        self.inner.set(index, PyValue::from_bound(value));
        Ok(())
    }

    fn __getitem__(&self, py: Python<'_>, index: &Bound<'_, PyAny>) -> PyResult<Py<PyAny>> {
        let index = index_arg(index, 2)?;
        self.inner.get(index).to_object(py)
    }

    fn __len__(&self) -> usize {
        SLOT_COUNT
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "<{} strategy={} kinds=[{}, {}]>",
            self.inner,
            self.inner.config().strategy,
            self.inner.kind(0),
            self.inner.kind(1),
        )
    }

    fn __iter__(slf: &Bound<'_, Self>) -> StoreIter {
        StoreIter::new(slf.clone().unbind(), IterVariant::Entries)
    }

    /// Iterate ``(index, value)`` over both slots, empty ones included.
    fn entries(slf: &Bound<'_, Self>) -> StoreIter {
        StoreIter::new(slf.clone().unbind(), IterVariant::Entries)
    }

    /// Iterate ``(key, value)`` for keys 1 then 2, stopping at the first
    /// None.
    fn keys(slf: &Bound<'_, Self>) -> StoreIter {
        StoreIter::new(slf.clone().unbind(), IterVariant::Keys)
    }

    /// Kind name of the slot addressed by ``index``.
    fn kind(&self, index: &Bound<'_, PyAny>) -> PyResult<&'static str> {
        let index = index_arg(index, 2)?;
        Ok(self.inner.kind(index).name())
    }

    /// Values dropped to None because their kind is unsupported.
    #[getter]
    fn degraded_total(&self) -> u64 {
        self.inner.degraded_total()
    }

    /// Storage strategy name.
    #[getter]
    fn strategy(&self) -> &'static str {
        self.inner.config().strategy.name()
    }

    #[getter]
    fn label(&self) -> String {
        self.inner.config().label.clone()
    }

    /// Process-unique store number.
    #[getter]
    fn id(&self) -> u64 {
        self.inner.id().get()
    }

    /// Raw registry handles this store currently owns.
    #[getter]
    fn held_handles(&self) -> Vec<u64> {
        self.inner
            .held_handles()
            .into_iter()
            .map(|h| h.into_raw())
            .collect()
    }
}
