//! The OddlyEven store: two tagged slots addressed by index parity.

use std::fmt;

use crate::config::{StorageStrategy, StoreConfig};
use crate::error::{ArgumentError, ConfigError};
use crate::handle::RefHandle;
use crate::id::StoreId;
use crate::iter::{IterTriple, IterVariant, Steps};
use crate::registry::Registry;
use crate::value::{HostValue, HostView, TaggedValue, ValueKind};

/// Number of slots in every store.
pub const SLOT_COUNT: usize = 2;

/// Map any integer index to a slot: even indices to slot 0, odd to slot 1.
///
/// Negative indices follow the same parity (`-1` is odd).
pub fn slot_index(index: i64) -> usize {
    index.rem_euclid(SLOT_COUNT as i64) as usize
}

/// Read an index argument the way the host's integer check does.
///
/// Integers pass through; floats with an exact integral value are
/// converted. Everything else is rejected with `found` set to the view's
/// type name.
pub fn parse_index(view: HostView<'_>, position: u8) -> Result<i64, ArgumentError> {
    match view {
        HostView::Int(i) => Ok(i),
        HostView::Float(x) if x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 => {
            Ok(x as i64)
        }
        other => Err(ArgumentError::NonIntegerIndex {
            position,
            found: other.type_name().to_string(),
        }),
    }
}

/// A fixed two-slot container for arbitrary host values.
///
/// Dropping the store is its finalizer: every registry handle it holds is
/// released exactly once. There is no other way to run the finalizer.
pub struct OddlyEven<V: HostValue> {
    id: StoreId,
    config: StoreConfig,
    registry: Registry<V>,
    slots: [TaggedValue; SLOT_COUNT],
    degraded_total: u64,
}

impl<V: HostValue> OddlyEven<V> {
    /// Create an empty store using the default configuration.
    pub fn new(registry: &Registry<V>) -> Self {
        Self::build(registry, StoreConfig::default())
    }

    /// Create an empty store from a validated configuration.
    pub fn with_config(registry: &Registry<V>, config: StoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(registry, config))
    }

    fn build(registry: &Registry<V>, config: StoreConfig) -> Self {
        Self {
            id: StoreId::next(),
            config,
            registry: registry.clone(),
            slots: Default::default(),
            degraded_total: 0,
        }
    }

    /// Store `value` in the slot addressed by `index`.
    ///
    /// Any handle the slot held is released first. Values whose kind the
    /// store cannot represent are stored as `None` and counted in
    /// [`degraded_total`](Self::degraded_total).
    pub fn set(&mut self, index: i64, value: V) {
        let slot = slot_index(index);
        self.clear_slot(slot);
        let tagged = self.classify(value);
        self.slots[slot] = tagged;
    }

    fn classify(&mut self, value: V) -> TaggedValue {
        let tagged_strategy = self.config.strategy == StorageStrategy::Tagged;
        match value.view() {
            HostView::Nil => return TaggedValue::None,
            HostView::Reference => {}
            HostView::Unsupported if tagged_strategy => {
                self.degraded_total += 1;
                return TaggedValue::None;
            }
            scalar if tagged_strategy => {
                return TaggedValue::from_scalar(scalar).unwrap_or_default();
            }
            // Registry strategy pins everything that is not nil.
            _ => {}
        }
        TaggedValue::Indirect(self.registry.acquire(value))
    }

    /// The value in the slot addressed by `index`, or the host's nil.
    pub fn get(&self, index: i64) -> V {
        self.decode(&self.slots[slot_index(index)])
    }

    fn decode(&self, tagged: &TaggedValue) -> V {
        match tagged {
            TaggedValue::None => V::nil(),
            TaggedValue::Indirect(h) => self.registry.resolve(*h).unwrap_or_else(V::nil),
            inline => inline.inline().map(V::from_inline).unwrap_or_else(V::nil),
        }
    }

    /// Number of slots. Always [`SLOT_COUNT`].
    pub fn size(&self) -> usize {
        SLOT_COUNT
    }

    /// The raw tagged value in the slot addressed by `index`.
    pub fn tagged(&self, index: i64) -> &TaggedValue {
        &self.slots[slot_index(index)]
    }

    /// Kind of the value in the slot addressed by `index`.
    pub fn kind(&self, index: i64) -> ValueKind {
        self.tagged(index).kind()
    }

    /// Registry handles currently owned by this store.
    pub fn held_handles(&self) -> Vec<RefHandle> {
        self.slots.iter().filter_map(TaggedValue::handle).collect()
    }

    /// How many values were degraded to `None` because their kind is
    /// unsupported.
    pub fn degraded_total(&self) -> u64 {
        self.degraded_total
    }

    /// Unique identity of this store.
    pub fn id(&self) -> StoreId {
        self.id
    }

    /// The configuration the store was created with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The registry this store pins its heap values in.
    pub fn registry(&self) -> &Registry<V> {
        &self.registry
    }

    /// Factory for the full-entries enumeration: `(next_entry, self, -1)`.
    pub fn iter_entries(&self) -> IterTriple<'_, V> {
        IterTriple::new(IterVariant::Entries, self)
    }

    /// Factory for the keys-only enumeration: `(next_key, self, 0)`.
    pub fn iter_keys(&self) -> IterTriple<'_, V> {
        IterTriple::new(IterVariant::Keys, self)
    }

    /// Both slots as `(index, value)`, empty slots included.
    pub fn entries(&self) -> Steps<'_, V> {
        self.iter_entries().into_iter()
    }

    /// Keys-only enumeration; stops at the first empty slot it visits.
    pub fn keys(&self) -> Steps<'_, V> {
        self.iter_keys().into_iter()
    }

    fn clear_slot(&mut self, slot: usize) {
        let old = std::mem::take(&mut self.slots[slot]);
        if let TaggedValue::Indirect(h) = old {
            self.registry.release(h);
        }
    }

}

impl<V: HostValue> Drop for OddlyEven<V> {
    fn drop(&mut self) {
        for slot in 0..SLOT_COUNT {
            self.clear_slot(slot);
        }
    }
}

impl<V: HostValue> fmt::Display for OddlyEven<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) @ {}", self.config.label, SLOT_COUNT, self.id)
    }
}

impl<V: HostValue> fmt::Debug for OddlyEven<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OddlyEven")
            .field("id", &self.id)
            .field("strategy", &self.config.strategy)
            .field("slots", &self.slots)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_maps_any_integer() {
        assert_eq!(slot_index(0), 0);
        assert_eq!(slot_index(1), 1);
        assert_eq!(slot_index(2), 0);
        assert_eq!(slot_index(3), 1);
        assert_eq!(slot_index(-1), 1);
        assert_eq!(slot_index(-2), 0);
        assert_eq!(slot_index(i64::MIN), 0);
        assert_eq!(slot_index(i64::MAX), 1);
    }

    #[test]
    fn integral_floats_are_indices() {
        assert_eq!(parse_index(HostView::Int(5), 2), Ok(5));
        assert_eq!(parse_index(HostView::Float(4.0), 2), Ok(4));
        assert_eq!(parse_index(HostView::Float(-3.0), 2), Ok(-3));
    }

    #[test]
    fn non_integers_are_rejected() {
        for view in [
            HostView::Float(1.5),
            HostView::Float(f64::NAN),
            HostView::Float(f64::INFINITY),
            HostView::Bool(true),
            HostView::Nil,
            HostView::Bytes(b"1"),
            HostView::Reference,
        ] {
            let err = parse_index(view, 2).unwrap_err();
            assert!(matches!(err, ArgumentError::NonIntegerIndex { position: 2, .. }));
        }
    }
}
