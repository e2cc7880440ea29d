//! Fixed-capacity entity slots
//!
//! Entities are never allocated or freed. A slot is claimed by the first
//! linear-scan hit on an inactive entry and released by clearing its flag.

/// An entry in a fixed-size entity array
pub trait Slot {
    fn is_active(&self) -> bool;
}

/// First inactive slot, if any
pub fn free_slot<T: Slot>(slots: &mut [T]) -> Option<&mut T> {
    slots.iter_mut().find(|s| !s.is_active())
}

/// Iterate over the active entries only
pub fn active<T: Slot>(slots: &[T]) -> impl Iterator<Item = &T> {
    slots.iter().filter(|s| s.is_active())
}

pub fn active_count<T: Slot>(slots: &[T]) -> usize {
    active(slots).count()
}
