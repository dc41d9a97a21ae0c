//! Mock host values and fixtures for OddlyEven development.
//!
//! [`MockValue`] models a small dynamic host: nil, booleans, integers,
//! floats, byte strings, heap objects with pointer identity, and a tag the
//! store does not understand. Heap objects are `Arc`-counted so tests can
//! observe when the registry pins or releases them.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::fmt;
use std::sync::Arc;

use oddly_core::{HostValue, HostView, Inline, OddlyEven, Registry, StorageStrategy, StoreConfig};

/// Host type of a heap object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Table,
    Function,
    Thread,
    Userdata,
    LightUserdata,
}

impl ObjectKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Function => "function",
            Self::Thread => "thread",
            Self::Userdata => "userdata",
            Self::LightUserdata => "lightuserdata",
        }
    }
}

/// A heap object owned by the mock host.
#[derive(Debug)]
pub struct MockObject {
    pub kind: ObjectKind,
    pub name: String,
}

/// A mock host value.
///
/// Equality follows host rules: scalars compare by value, objects by
/// identity.
#[derive(Clone, Debug)]
pub enum MockValue {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Vec<u8>),
    Object(Arc<MockObject>),
    /// A host type tag outside the store's taxonomy.
    Foreign(u8),
}

impl MockValue {
    pub fn str(s: &str) -> Self {
        Self::Str(s.as_bytes().to_vec())
    }

    pub fn object(kind: ObjectKind, name: &str) -> Self {
        Self::Object(Arc::new(MockObject {
            kind,
            name: name.to_string(),
        }))
    }

    pub fn table(name: &str) -> Self {
        Self::object(ObjectKind::Table, name)
    }

    pub fn function(name: &str) -> Self {
        Self::object(ObjectKind::Function, name)
    }

    /// Strong references to the heap object, or `None` for scalars.
    pub fn ref_count(&self) -> Option<usize> {
        match self {
            Self::Object(obj) => Some(Arc::strong_count(obj)),
            _ => None,
        }
    }

    /// Identity comparison for heap objects, value comparison otherwise.
    pub fn is_same(&self, other: &Self) -> bool {
        self == other
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "boolean",
            Self::Int(_) | Self::Float(_) => "number",
            Self::Str(_) => "string",
            Self::Object(obj) => obj.kind.name(),
            Self::Foreign(_) => "foreign",
        }
    }
}

impl PartialEq for MockValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            (Self::Foreign(a), Self::Foreign(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for MockValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{:?}", String::from_utf8_lossy(s)),
            Self::Object(obj) => write!(f, "{}: {}", obj.kind.name(), obj.name),
            Self::Foreign(tag) => write!(f, "foreign({tag})"),
        }
    }
}

impl HostValue for MockValue {
    fn view(&self) -> HostView<'_> {
        match self {
            Self::Nil => HostView::Nil,
            Self::Bool(b) => HostView::Bool(*b),
            Self::Int(i) => HostView::Int(*i),
            Self::Float(x) => HostView::Float(*x),
            Self::Str(s) => HostView::Bytes(s),
            Self::Object(_) => HostView::Reference,
            Self::Foreign(_) => HostView::Unsupported,
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
            Inline::Bytes(s) => Self::Str(s.to_vec()),
        }
    }

    fn share(&self) -> Self {
        self.clone()
    }
}

/// A fresh, private registry.
pub fn registry() -> Registry<MockValue> {
    Registry::new()
}

/// A store with the given strategy over `registry`.
pub fn store_with(registry: &Registry<MockValue>, strategy: StorageStrategy) -> OddlyEven<MockValue> {
    OddlyEven::with_config(registry, StoreConfig::new(strategy))
        .expect("default label is valid")
}

/// One representative value per supported kind, plus nil.
pub fn sample_values() -> Vec<MockValue> {
    vec![
        MockValue::Nil,
        MockValue::Bool(true),
        MockValue::Bool(false),
        MockValue::Int(42),
        MockValue::Int(i64::MIN),
        MockValue::Float(3.25),
        MockValue::str("hello"),
        MockValue::Str(b"nul\0inside".to_vec()),
        MockValue::table("t"),
        MockValue::function("f"),
        MockValue::object(ObjectKind::Thread, "co"),
        MockValue::object(ObjectKind::Userdata, "ud"),
        MockValue::object(ObjectKind::LightUserdata, "p"),
    ]
}
