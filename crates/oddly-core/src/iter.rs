//! Generic-for iteration protocol.
//!
//! A host's generic `for` loop calls a factory once, getting back
//! `(iterator_fn, invariant_state, initial_control)`, then calls
//! `iterator_fn(invariant_state, control)` until it returns no control
//! value. Here the invariant state is the store, the control variable is an
//! `i64` owned by the driver, and "no control value" is `None`.
//!
//! Two variants share the mechanism:
//!
//! - **Entries** starts at `-1` and yields `(0, slot 0)` then `(1, slot 1)`,
//!   empty slots included.
//! - **Keys** starts at `0` and yields `(1, slot 1)` then `(2, slot 0)`,
//!   stopping at the first empty slot it visits.
//!
//! Neither variant mutates the store. Restarting means calling the factory
//! again.

use std::iter::FusedIterator;

use crate::store::OddlyEven;
use crate::value::HostValue;

/// An iterator function: `(state, control) -> Some((next_control, value))`
/// or `None` to stop.
pub type StepFn<V> = fn(&OddlyEven<V>, i64) -> Option<(i64, V)>;

/// Which enumeration a factory produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IterVariant {
    /// Both slots, unconditionally.
    Entries,
    /// Slots in key order `1, 2`, stopping at the first empty one.
    Keys,
}

impl IterVariant {
    /// Initial control value handed to the driver.
    pub const fn initial_control(self) -> i64 {
        match self {
            Self::Entries => -1,
            Self::Keys => 0,
        }
    }

    /// The iterator function for this variant.
    pub fn step_fn<V: HostValue>(self) -> StepFn<V> {
        match self {
            Self::Entries => next_entry::<V>,
            Self::Keys => next_key::<V>,
        }
    }
}

/// Iterator function of the full-entries variant.
///
/// Negative controls restart at index 0, so an enumeration never yields
/// more than two steps.
pub fn next_entry<V: HostValue>(store: &OddlyEven<V>, control: i64) -> Option<(i64, V)> {
    let next = if control < 0 { 0 } else { control.checked_add(1)? };
    if next > 1 {
        return None;
    }
    Some((next, store.get(next)))
}

/// Iterator function of the keys-only variant.
///
/// Key `next` reads slot `next mod 2`. A nil value ends the enumeration
/// even when a later slot holds something.
pub fn next_key<V: HostValue>(store: &OddlyEven<V>, control: i64) -> Option<(i64, V)> {
    let next = control.checked_add(1)?;
    if next > 2 {
        return None;
    }
    let value = store.get(next);
    if value.is_nil() {
        return None;
    }
    Some((next, value))
}

/// The factory result: iterator function, invariant state, initial control.
pub struct IterTriple<'a, V: HostValue> {
    /// Iterator function.
    pub step: StepFn<V>,
    /// Invariant state, passed unchanged on every step.
    pub state: &'a OddlyEven<V>,
    /// Initial control value.
    pub control: i64,
}

impl<'a, V: HostValue> IterTriple<'a, V> {
    /// Build the triple for `variant` over `store`. No side effects.
    pub fn new(variant: IterVariant, store: &'a OddlyEven<V>) -> Self {
        Self {
            step: variant.step_fn(),
            state: store,
            control: variant.initial_control(),
        }
    }
}

impl<'a, V: HostValue> IntoIterator for IterTriple<'a, V> {
    type Item = (i64, V);
    type IntoIter = Steps<'a, V>;

    fn into_iter(self) -> Steps<'a, V> {
        Steps {
            triple: self,
            done: false,
        }
    }
}

/// Drives an [`IterTriple`] as a Rust iterator.
///
/// Once the iterator function returns `None` the sequence stays finished.
pub struct Steps<'a, V: HostValue> {
    triple: IterTriple<'a, V>,
    done: bool,
}

impl<V: HostValue> Steps<'_, V> {
    /// The current control value.
    pub fn control(&self) -> i64 {
        self.triple.control
    }
}

impl<V: HostValue> Iterator for Steps<'_, V> {
    type Item = (i64, V);

    fn next(&mut self) -> Option<(i64, V)> {
        if self.done {
            return None;
        }
        match (self.triple.step)(self.triple.state, self.triple.control) {
            Some((control, value)) => {
                self.triple.control = control;
                Some((control, value))
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl<V: HostValue> FusedIterator for Steps<'_, V> {}
