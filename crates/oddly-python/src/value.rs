//! PyValue: Python objects as seen by the store.
//!
//! Kind mapping: `None` is nil, `bool` is Bool, `int` in i64 range is Int,
//! `float` is Float, `str` is String (UTF-8 bytes). Everything else,
//! `bytes`, big ints and containers included, is a heap reference.

use pyo3::prelude::*;
use pyo3::types::{PyBool, PyFloat, PyInt, PyString};
use pyo3::IntoPyObjectExt;

use oddly_core::{parse_index, HostValue, HostView, Inline};

use crate::error::argument_error;

/// A Python value, classified.
#[derive(Debug)]
pub(crate) enum PyValue {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Object(Py<PyAny>),
}

impl PyValue {
    /// Classify a Python object.
    pub(crate) fn from_bound(obj: &Bound<'_, PyAny>) -> Self {
        if obj.is_none() {
            return Self::Nil;
        }
        // bool before int: bool is an int subclass.
        if obj.is_instance_of::<PyBool>() {
            if let Ok(b) = obj.extract::<bool>() {
                return Self::Bool(b);
            }
        } else if obj.is_instance_of::<PyInt>() {
            if let Ok(i) = obj.extract::<i64>() {
                return Self::Int(i);
            }
        } else if obj.is_instance_of::<PyFloat>() {
            if let Ok(x) = obj.extract::<f64>() {
                return Self::Float(x);
            }
        } else if obj.is_instance_of::<PyString>() {
            // Lone surrogates do not encode; keep those strings by reference.
            if let Ok(s) = obj.extract::<String>() {
                return Self::Str(s);
            }
        }
        Self::Object(obj.clone().unbind())
    }

    /// Build the Python object for this value.
    pub(crate) fn to_object(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        match self {
            Self::Nil => Ok(py.None()),
            Self::Bool(b) => b.into_py_any(py),
            Self::Int(i) => i.into_py_any(py),
            Self::Float(x) => x.into_py_any(py),
            Self::Str(s) => s.as_str().into_py_any(py),
            Self::Object(obj) => Ok(obj.clone_ref(py)),
        }
    }
}

impl HostValue for PyValue {
    fn view(&self) -> HostView<'_> {
        match self {
            Self::Nil => HostView::Nil,
            Self::Bool(b) => HostView::Bool(*b),
            Self::Int(i) => HostView::Int(*i),
            Self::Float(x) => HostView::Float(*x),
            Self::Str(s) => HostView::Bytes(s.as_bytes()),
            Self::Object(_) => HostView::Reference,
        }
    }

    fn nil() -> Self {
        Self::Nil
    }

    fn from_inline(inline: Inline<'_>) -> Self {
        match inline {
            Inline::Bool(b) => Self::Bool(b),
            Inline::Int(i) => Self::Int(i),
            Inline::Float(x) => Self::Float(x),
            // Only valid UTF-8 is ever stored inline, so this never replaces.
            Inline::Bytes(bytes) => Self::Str(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    fn share(&self) -> Self {
        match self {
            Self::Nil => Self::Nil,
            Self::Bool(b) => Self::Bool(*b),
            Self::Int(i) => Self::Int(*i),
            Self::Float(x) => Self::Float(*x),
            Self::Str(s) => Self::Str(s.clone()),
            // Every binding entry point already holds the GIL.
            Self::Object(obj) => Python::attach(|py| Self::Object(obj.clone_ref(py))),
        }
    }
}

/// Read a slot index, raising `TypeError` for non-integers.
///
/// Ints outside i64 are reduced to their parity.
pub(crate) fn index_arg(obj: &Bound<'_, PyAny>, position: u8) -> PyResult<i64> {
    int_arg(obj, position, |big| big.rem(2)?.extract::<i64>())
}

/// Read an iteration control value, raising `TypeError` for non-integers.
///
/// Ints outside i64 saturate, which keeps their side of every bound the
/// step functions check.
pub(crate) fn control_arg(obj: &Bound<'_, PyAny>, position: u8) -> PyResult<i64> {
    int_arg(obj, position, |big| {
        Ok(if big.gt(0)? { i64::MAX } else { i64::MIN })
    })
}

fn int_arg(
    obj: &Bound<'_, PyAny>,
    position: u8,
    oversized: impl FnOnce(&Bound<'_, PyAny>) -> PyResult<i64>,
) -> PyResult<i64> {
    // bool is an int subclass.
    if let Ok(b) = obj.cast::<PyBool>() {
        return Ok(i64::from(b.is_true()));
    }
    if obj.is_instance_of::<PyInt>() {
        return match obj.extract::<i64>() {
            Ok(i) => Ok(i),
            Err(_) => oversized(obj),
        };
    }
    let value = PyValue::from_bound(obj);
    parse_index(value.view(), position).map_err(|e| argument_error(&e.with_found(type_name(obj))))
}

/// Python type name of `obj`, for error messages.
pub(crate) fn type_name(obj: &Bound<'_, PyAny>) -> String {
    obj.get_type()
        .name()
        .map(|n| n.to_string())
        .unwrap_or_else(|_| "<unknown>".to_string())
}
