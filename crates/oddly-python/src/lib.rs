//! Python bindings for the OddlyEven value store.
//!
//! The native extension is named `_oddly` and is imported by the pure-Python
//! `oddly` package. Python is the host runtime: its objects are pinned in a
//! process-wide registry, and CPython's deallocation of an `OddlyEven`
//! object runs the store's finalizer.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use pyo3::prelude::*;

mod error;
mod iter;
mod registry;
mod store;
mod value;

/// The native `_oddly` extension module.
#[pymodule]
fn _oddly(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Classes
    m.add_class::<store::Store>()?;
    m.add_class::<iter::StoreIter>()?;
    m.add_class::<registry::RegistryStats>()?;

    // Iteration protocol
    m.add_function(wrap_pyfunction!(iter::iter_entries, m)?)?;
    m.add_function(wrap_pyfunction!(iter::iter_keys, m)?)?;
    m.add_function(wrap_pyfunction!(iter::next_entry, m)?)?;
    m.add_function(wrap_pyfunction!(iter::next_key, m)?)?;

    // Introspection
    m.add_function(wrap_pyfunction!(registry::registry_stats, m)?)?;
    m.add("SLOT_COUNT", oddly_core::SLOT_COUNT)?;

    Ok(())
}
