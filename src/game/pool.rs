//! Fixed-capacity entity slot pool.
//!
//! All transient entities (bullets, enemies, particles, pickups) live in
//! preallocated arrays with an active flag per slot. "Spawning" claims the
//! first inactive slot; "despawning" clears the flag. The pool never grows,
//! and a full pool silently drops spawn requests — capacity exhaustion is a
//! soft cap, not an error.

/// A slot that knows whether it currently holds a live entity.
pub trait PoolSlot {
    fn is_active(&self) -> bool;
    fn deactivate(&mut self);
}

/// Fixed-capacity pool with linear-scan acquisition.
///
/// Slot order carries no gameplay meaning; iteration is index order but
/// entities are independent, so the order is not observable.
pub struct SlotPool<T: PoolSlot> {
    slots: Vec<T>,
}

impl<T: PoolSlot + Default> SlotPool<T> {
    /// Preallocate `capacity` inactive slots.
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, T::default);
        Self { slots }
    }
}

impl<T: PoolSlot> SlotPool<T> {
    /// Claim the first inactive slot, or `None` if the pool is full.
    ///
    /// The returned slot still holds stale data from its previous occupant;
    /// the caller is responsible for re-initializing every field.
    pub fn acquire(&mut self) -> Option<&mut T> {
        self.slots.iter_mut().find(|slot| !slot.is_active())
    }

    /// Release a slot by index.
    pub fn release(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.deactivate();
        }
    }

    /// Deactivate every slot.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.deactivate();
        }
    }

    /// Number of currently active slots.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_active()).count()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Iterate over active slots.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter(|slot| slot.is_active())
    }

    /// Iterate mutably over active slots.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter(|slot| slot.is_active())
    }

    /// Iterate over active slots with their indices (for targeted release).
    pub fn iter_indexed(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_active())
    }

    /// Iterate mutably over active slots with their indices.
    pub fn iter_indexed_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, slot)| slot.is_active())
    }

    /// Direct slot access (active or not).
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    /// Direct mutable slot access (active or not).
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }
}
