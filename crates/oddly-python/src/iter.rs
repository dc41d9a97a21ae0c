//! Iteration: factory triples, step functions and the Python iterator.
//!
//! `iter_entries(h)` and `iter_keys(h)` return `(step, h, control)`. Calling
//! `step(h, control)` gives `(next_control, value)` or None when finished,
//! so a manual loop looks like:
//!
//! ```python
//! step, state, control = iter_entries(h)
//! while (item := step(state, control)) is not None:
//!     control, value = item
//! ```

use pyo3::prelude::*;
use pyo3::types::PyCFunction;

use oddly_core::{ArgumentError, IterVariant};

use crate::error::argument_error;
use crate::store::Store;
use crate::value::{control_arg, type_name, PyValue};

/// Iterator over a store, driven by one of the step functions.
#[pyclass]
pub(crate) struct StoreIter {
    store: Py<Store>,
    variant: IterVariant,
    control: i64,
    done: bool,
}

impl StoreIter {
    pub(crate) fn new(store: Py<Store>, variant: IterVariant) -> Self {
        StoreIter {
            store,
            variant,
            control: variant.initial_control(),
            done: false,
        }
    }
}

#[pymethods]
impl StoreIter {
    fn __iter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        slf
    }

    fn __next__(&mut self, py: Python<'_>) -> PyResult<Option<(i64, Py<PyAny>)>> {
        if self.done {
            return Ok(None);
        }
        let step = self.variant.step_fn::<PyValue>();
        let result = {
            let store = self.store.bind(py).try_borrow()?;
            step(&store.inner, self.control)
        };
        match result {
            Some((control, value)) => {
                self.control = control;
                Ok(Some((control, value.to_object(py)?)))
            }
            None => {
                self.done = true;
                Ok(None)
            }
        }
    }

    /// Last control value produced.
    #[getter]
    fn control(&self) -> i64 {
        self.control
    }
}

fn triple<'py>(
    store: Bound<'py, Store>,
    variant: IterVariant,
) -> PyResult<(Bound<'py, PyCFunction>, Bound<'py, Store>, i64)> {
    let py = store.py();
    let step = match variant {
        IterVariant::Entries => wrap_pyfunction!(next_entry, py)?,
        IterVariant::Keys => wrap_pyfunction!(next_key, py)?,
    };
    Ok((step, store, variant.initial_control()))
}

/// Factory for the full-entries enumeration: ``(next_entry, h, -1)``.
#[pyfunction]
pub(crate) fn iter_entries(
    store: Bound<'_, Store>,
) -> PyResult<(Bound<'_, PyCFunction>, Bound<'_, Store>, i64)> {
    triple(store, IterVariant::Entries)
}

/// Factory for the keys-only enumeration: ``(next_key, h, 0)``.
#[pyfunction]
pub(crate) fn iter_keys(
    store: Bound<'_, Store>,
) -> PyResult<(Bound<'_, PyCFunction>, Bound<'_, Store>, i64)> {
    triple(store, IterVariant::Keys)
}

/// Step of the full-entries enumeration.
#[pyfunction]
pub(crate) fn next_entry(
    store: &Bound<'_, PyAny>,
    control: &Bound<'_, PyAny>,
) -> PyResult<Option<(i64, Py<PyAny>)>> {
    step(store, control, IterVariant::Entries)
}

/// Step of the keys-only enumeration.
#[pyfunction]
pub(crate) fn next_key(
    store: &Bound<'_, PyAny>,
    control: &Bound<'_, PyAny>,
) -> PyResult<Option<(i64, Py<PyAny>)>> {
    step(store, control, IterVariant::Keys)
}

fn step(
    store: &Bound<'_, PyAny>,
    control: &Bound<'_, PyAny>,
    variant: IterVariant,
) -> PyResult<Option<(i64, Py<PyAny>)>> {
    let py = store.py();
    let store = store.cast::<Store>().map_err(|_| {
        argument_error(&ArgumentError::NotAStore {
            position: 1,
            found: type_name(store),
        })
    })?;
    let control = control_arg(control, 2)?;
    let result = {
        let store = store.try_borrow()?;
        variant.step_fn::<PyValue>()(&store.inner, control)
    };
    result
        .map(|(next, value)| Ok((next, value.to_object(py)?)))
        .transpose()
}
