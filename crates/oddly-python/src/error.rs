//! OddlyStatus -> Python exception mapping with recovery hints.

use pyo3::exceptions::{PyRuntimeError, PyTypeError, PyValueError};
use pyo3::PyErr;

use oddly_core::{ArgumentError, ConfigError, OddlyStatus};

/// Raise a bad-argument error as `TypeError`.
pub(crate) fn argument_error(e: &ArgumentError) -> PyErr {
    to_py_err(OddlyStatus::from(e), &e.to_string())
}

/// Raise a configuration error as `ValueError`.
pub(crate) fn config_error(e: &ConfigError) -> PyErr {
    to_py_err(OddlyStatus::from(e), &e.to_string())
}

/// Build the Python exception for a failing status. The first line is the
/// error's own message so it reads like a host argument error.
fn to_py_err(status: OddlyStatus, message: &str) -> PyErr {
    let (_, hint) = error_detail(status);
    let full = format!("{message}\n  Hint: {hint}");
    match status {
        // Wrong argument type → TypeError
        OddlyStatus::NotAStore | OddlyStatus::NonIntegerIndex => PyTypeError::new_err(full),

        // Bad constructor arguments → ValueError
        OddlyStatus::ConfigError => PyValueError::new_err(full),

        OddlyStatus::Ok => PyRuntimeError::new_err(full),
    }
}

/// Returns `(summary, recovery_hint)` for each status.
fn error_detail(status: OddlyStatus) -> (&'static str, &'static str) {
    match status {
        OddlyStatus::Ok => (
            "no error",
            "A success status was raised as an error. This is a bug in the \
             bindings; please report it.",
        ),
        OddlyStatus::NotAStore => (
            "argument is not an OddlyEven store",
            "The iterator functions take the store as their first argument. \
             Pass the state value returned by iter_entries()/iter_keys() \
             unchanged.",
        ),
        OddlyStatus::NonIntegerIndex => (
            "index is not an integer",
            "Indices and control values must be int, or a float with an \
             exact integer value. Only the parity of an index matters.",
        ),
        OddlyStatus::ConfigError => (
            "invalid store configuration",
            "strategy must be \"tagged\" or \"registry\", and label must be \
             a non-empty string without control characters.",
        ),
    }
}
