//! Slot+generation handle table backing the reference registry.
//!
//! Released handles have stale generation counters and resolve to `None`
//! instead of aliasing whatever value reuses their slot. Double release is
//! a safe no-op.

use std::fmt;

/// Handle encoding: upper 32 bits = slot index, lower 32 bits = generation.
fn encode(slot: u32, generation: u32) -> u64 {
    ((slot as u64) << 32) | (generation as u64)
}

fn decode(handle: u64) -> (u32, u32) {
    let slot = (handle >> 32) as u32;
    let generation = handle as u32;
    (slot, generation)
}

/// Opaque key for one registry acquisition.
///
/// Two acquisitions of the same host value get different handles. A handle
/// stays valid until it is released; afterwards it never resolves again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefHandle(u64);

impl RefHandle {
    /// Rebuild a handle from its raw encoding.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw `u64` encoding, suitable for passing through a host.
    pub const fn into_raw(self) -> u64 {
        self.0
    }

    /// Table slot this handle points at.
    pub fn slot(self) -> u32 {
        decode(self.0).0
    }

    /// Generation of the slot at acquisition time.
    pub fn generation(self) -> u32 {
        decode(self.0).1
    }
}

impl fmt::Display for RefHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = decode(self.0);
        write!(f, "ref({slot}:{generation})")
    }
}

struct Slot<T> {
    generation: u32,
    data: Option<T>,
}

/// A slot+generation table mapping [`RefHandle`]s to owned values.
///
/// Reuses slots via a free list. Generation counters increment on removal,
/// making stale handles detectable.
pub(crate) struct HandleTable<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
    live: usize,
}

impl<T> HandleTable<T> {
    /// Create an empty table with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            live: 0,
        }
    }

    /// Insert a value and return its handle.
    pub fn insert(&mut self, value: T) -> RefHandle {
        self.live += 1;
        if let Some(slot_idx) = self.free_list.pop() {
            let slot = &mut self.slots[slot_idx as usize];
            slot.data = Some(value);
            RefHandle(encode(slot_idx, slot.generation))
        } else {
            let slot_idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                data: Some(value),
            });
            RefHandle(encode(slot_idx, 0))
        }
    }

    /// The value behind a handle.
    ///
    /// Returns `None` if the handle is stale or was never valid.
    pub fn get(&self, handle: RefHandle) -> Option<&T> {
        let (slot_idx, generation) = decode(handle.0);
        let slot = self.slots.get(slot_idx as usize)?;
        if slot.generation != generation {
            return None;
        }
        slot.data.as_ref()
    }

    /// Remove the value behind a handle, returning it.
    ///
    /// Bumps the slot generation. A slot whose generation wraps to 0 is
    /// retired rather than recycled, so handles from its first epoch can
    /// never resolve again. Returns `None` if the handle is stale.
    pub fn remove(&mut self, handle: RefHandle) -> Option<T> {
        let (slot_idx, generation) = decode(handle.0);
        let slot = self.slots.get_mut(slot_idx as usize)?;
        if slot.generation != generation {
            return None;
        }
        let value = slot.data.take()?;
        self.live -= 1;
        slot.generation = slot.generation.wrapping_add(1);
        if slot.generation != 0 {
            self.free_list.push(slot_idx);
        }
        Some(value)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.live
    }
}
