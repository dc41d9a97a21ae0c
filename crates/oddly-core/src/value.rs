//! Tagged values: the native representation of one stored host value.
//!
//! A [`TaggedValue`] is a sum type. Inline payloads (`Bool`, `Int`, `Float`,
//! `String`) and the registry payload (`Indirect`) are separate variants, so
//! a slot can never hold bytes and a handle at the same time.

use std::fmt;

use crate::handle::RefHandle;

/// Kind discriminator of a [`TaggedValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Empty slot / host nil.
    None,
    /// Boolean, stored inline.
    Bool,
    /// 64-bit signed integer, stored inline.
    Int,
    /// 64-bit float, stored inline.
    Float,
    /// Byte string of exact length, stored inline.
    String,
    /// Host-heap value pinned in the registry.
    Indirect,
}

impl ValueKind {
    /// Lower-case name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Indirect => "indirect",
        }
    }

    /// Whether values of this kind are copied into the slot.
    pub fn is_inline(self) -> bool {
        matches!(self, Self::Bool | Self::Int | Self::Float | Self::String)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a host value presents itself to the store.
///
/// Hosts map their dynamic type tags onto this fixed taxonomy. Everything
/// that lives in the host's managed heap (tables, functions, coroutines,
/// userdata, opaque pointers) reports [`HostView::Reference`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostView<'a> {
    /// The host's nil / absent value.
    Nil,
    /// A boolean.
    Bool(bool),
    /// An integral number.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A byte or character sequence. May contain zero bytes.
    Bytes(&'a [u8]),
    /// A value owned by the host heap; stored by registry reference.
    Reference,
    /// A kind the store cannot represent.
    Unsupported,
}

impl HostView<'_> {
    /// Type name used in argument errors, following host conventions.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "boolean",
            Self::Int(_) | Self::Float(_) => "number",
            Self::Bytes(_) => "string",
            Self::Reference => "reference",
            Self::Unsupported => "unsupported",
        }
    }
}

/// An inline payload handed back to the host by `get`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Inline<'a> {
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A float.
    Float(f64),
    /// A byte string, exact length.
    Bytes(&'a [u8]),
}

/// A value of the embedding host, as seen by the store.
///
/// Implementations are thin: the store only needs to classify a value,
/// rebuild scalars, produce nil, and take another reference to a heap value.
pub trait HostValue: Sized {
    /// Classify this value.
    fn view(&self) -> HostView<'_>;

    /// The host's nil value.
    fn nil() -> Self;

    /// Rebuild a host value from an inline payload.
    fn from_inline(inline: Inline<'_>) -> Self;

    /// Another reference to the same host value. Identity must be preserved.
    fn share(&self) -> Self;

    /// Whether this is the host's nil value.
    fn is_nil(&self) -> bool {
        matches!(self.view(), HostView::Nil)
    }
}

/// One stored value: a kind tag plus its payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TaggedValue {
    /// Nothing stored.
    #[default]
    None,
    /// Inline boolean.
    Bool(bool),
    /// Inline integer.
    Int(i64),
    /// Inline float.
    Float(f64),
    /// Inline byte string. Length-prefixed, zero bytes preserved.
    String(Box<[u8]>),
    /// Registry reference to a host-heap value.
    Indirect(RefHandle),
}

impl TaggedValue {
    /// Copy a scalar view into an inline value.
    ///
    /// Returns `None` for views that cannot be stored inline
    /// ([`HostView::Reference`] and [`HostView::Unsupported`]).
    pub fn from_scalar(view: HostView<'_>) -> Option<Self> {
        match view {
            HostView::Nil => Some(Self::None),
            HostView::Bool(b) => Some(Self::Bool(b)),
            HostView::Int(i) => Some(Self::Int(i)),
            HostView::Float(x) => Some(Self::Float(x)),
            HostView::Bytes(bytes) => Some(Self::String(bytes.into())),
            HostView::Reference | HostView::Unsupported => None,
        }
    }

    /// The kind tag.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::None => ValueKind::None,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Indirect(_) => ValueKind::Indirect,
        }
    }

    /// The registry handle, for `Indirect` values.
    pub fn handle(&self) -> Option<RefHandle> {
        match self {
            Self::Indirect(h) => Some(*h),
            _ => None,
        }
    }

    /// The inline payload, for scalar values.
    pub fn inline(&self) -> Option<Inline<'_>> {
        match self {
            Self::Bool(b) => Some(Inline::Bool(*b)),
            Self::Int(i) => Some(Inline::Int(*i)),
            Self::Float(x) => Some(Inline::Float(*x)),
            Self::String(bytes) => Some(Inline::Bytes(bytes)),
            Self::None | Self::Indirect(_) => None,
        }
    }

    /// Whether the slot is empty.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_views_copy_inline() {
        assert_eq!(TaggedValue::from_scalar(HostView::Nil), Some(TaggedValue::None));
        assert_eq!(
            TaggedValue::from_scalar(HostView::Bool(true)),
            Some(TaggedValue::Bool(true))
        );
        assert_eq!(
            TaggedValue::from_scalar(HostView::Int(-7)),
            Some(TaggedValue::Int(-7))
        );
        assert_eq!(
            TaggedValue::from_scalar(HostView::Float(2.5)),
            Some(TaggedValue::Float(2.5))
        );
    }

    #[test]
    fn string_copy_keeps_embedded_zeros() {
        let raw = b"ab\0cd\0";
        let tagged = TaggedValue::from_scalar(HostView::Bytes(raw)).unwrap();
        assert_eq!(tagged.kind(), ValueKind::String);
        assert_eq!(tagged.inline(), Some(Inline::Bytes(&raw[..])));
    }

    #[test]
    fn heap_views_are_not_inline() {
        assert_eq!(TaggedValue::from_scalar(HostView::Reference), None);
        assert_eq!(TaggedValue::from_scalar(HostView::Unsupported), None);
    }

    #[test]
    fn payloads_are_exclusive() {
        let h = RefHandle::from_raw(5);
        let indirect = TaggedValue::Indirect(h);
        assert_eq!(indirect.handle(), Some(h));
        assert_eq!(indirect.inline(), None);

        let int = TaggedValue::Int(3);
        assert_eq!(int.handle(), None);
        assert_eq!(int.inline(), Some(Inline::Int(3)));
    }

    #[test]
    fn default_is_empty() {
        let t = TaggedValue::default();
        assert!(t.is_none());
        assert_eq!(t.kind(), ValueKind::None);
    }

    #[test]
    fn inline_kinds() {
        assert!(ValueKind::String.is_inline());
        assert!(!ValueKind::Indirect.is_inline());
        assert!(!ValueKind::None.is_inline());
        assert_eq!(HostView::Float(1.0).type_name(), "number");
    }
}
