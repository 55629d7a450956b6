//! Arena registry behind the `isotherm_arena_*` exports.
//!
//! A C host holds each library-owned arena as an opaque `u64`. After
//! `isotherm_arena_destroy` that number must not reach a later arena, so
//! every lookup checks a per-slot generation and a stale handle surfaces as
//! `InvalidHandle`.

/// Handle encoding: upper 32 bits = slot index, lower 32 bits = generation.
fn encode(slot: u32, generation: u32) -> u64 {
    ((slot as u64) << 32) | (generation as u64)
}

fn decode(handle: u64) -> (u32, u32) {
    ((handle >> 32) as u32, handle as u32)
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Generational handle table. Freed slots are recycled through a free list.
pub(crate) struct HandleTable<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
}

impl<T> HandleTable<T> {
    /// Create an empty table. `const` so it can back a `static Mutex`.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Store `value` and return its handle.
    pub fn insert(&mut self, value: T) -> u64 {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return encode(index, slot.generation);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        encode(index, 0)
    }

    fn live_slot(&self, handle: u64) -> Option<&Slot<T>> {
        let (index, generation) = decode(handle);
        self.slots
            .get(index as usize)
            .filter(|slot| slot.generation == generation)
    }

    /// Shared access to the value behind `handle`, if it is live.
    pub fn get(&self, handle: u64) -> Option<&T> {
        self.live_slot(handle)?.value.as_ref()
    }

    /// Mutable access to the value behind `handle`, if it is live.
    pub fn get_mut(&mut self, handle: u64) -> Option<&mut T> {
        let (index, generation) = decode(handle);
        let slot = self.slots.get_mut(index as usize)?;
        if slot.generation != generation {
            return None;
        }
        slot.value.as_mut()
    }

    /// Take the value out and invalidate `handle`.
    ///
    /// A slot whose generation wraps back to 0 is retired instead of
    /// recycled, so an ancient handle can never alias a new arena.
    pub fn remove(&mut self, handle: u64) -> Option<T> {
        let (index, generation) = decode(handle);
        let slot = self.slots.get_mut(index as usize)?;
        if slot.generation != generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        if slot.generation != 0 {
            self.free.push(index);
        }
        Some(value)
    }
}
