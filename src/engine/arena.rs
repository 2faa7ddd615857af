// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Generational arena holding the calls of one tree.
//!
//! Calls refer to each other by [`CallId`] rather than by reference, so the
//! parent/child links of the tree never form ownership cycles. Slots freed
//! when a subtree collapses are reused, and each reuse bumps the slot's
//! generation so that a handle to a discarded call stays dead.

/// Handle to a call in a [`CallTree`](super::CallTree).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CallId {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

#[derive(Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    live: usize,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    pub(crate) fn insert(&mut self, value: T) -> CallId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return CallId {
                index,
                generation: slot.generation,
            };
        }
        let index = u32::try_from(self.slots.len()).unwrap_or_else(|_| panic!("Arena overflow"));
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        CallId {
            index,
            generation: 0,
        }
    }

    pub(crate) fn get(&self, id: CallId) -> Option<&T> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: CallId) -> Option<&mut T> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub(crate) fn contains(&self, id: CallId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn remove(&mut self, id: CallId) -> Option<T> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?;
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(value)
    }

    /// Number of live values.
    pub(crate) fn len(&self) -> usize {
        self.live
    }
}
