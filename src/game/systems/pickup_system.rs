//! Pickup (item) system.
//!
//! World items dropped by dying enemies: heals and experience orbs. A
//! pickup is collected on player proximity or despawns on timeout. The
//! heal/exp split is a balance tunable, not a contract.

use glam::Vec3;
use rand::Rng;

use crate::game::config::PickupBalance;
use crate::game::pool::{PoolSlot, SlotPool};

/// Presentation spin rate (radians per second).
const SPIN_RATE: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickupKind {
    #[default]
    Heal,
    Experience,
}

/// One pooled pickup slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pickup {
    pub active: bool,
    pub kind: PickupKind,
    pub position: Vec3,
    /// Seconds until the uncollected pickup despawns.
    pub life_time: f32,
    /// Presentation-only rotation.
    pub rotation: f32,
}

impl PoolSlot for Pickup {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Manages pickup drops, aging, and iteration.
pub struct PickupSystem {
    pool: SlotPool<Pickup>,
}

impl PickupSystem {
    pub fn new(capacity: usize) -> Self {
        Self {
            pool: SlotPool::new(capacity),
        }
    }

    /// Roll the drop chance for a dying enemy and spawn a weighted-random
    /// pickup on success.
    pub fn roll_drop(&mut self, position: Vec3, balance: &PickupBalance, rng: &mut impl Rng) {
        if !rng.gen_bool(balance.drop_chance) {
            return;
        }
        let total = balance.heal_weight + balance.exp_weight;
        if total == 0 {
            return;
        }
        let kind = if rng.gen_range(0..total) < balance.heal_weight {
            PickupKind::Heal
        } else {
            PickupKind::Experience
        };
        self.spawn(position, kind, balance);
    }

    /// Place a pickup directly (used by tests and scripted drops).
    pub fn spawn(&mut self, position: Vec3, kind: PickupKind, balance: &PickupBalance) {
        if let Some(slot) = self.pool.acquire() {
            slot.active = true;
            slot.kind = kind;
            slot.position = Vec3::new(position.x, 0.0, position.z);
            slot.life_time = balance.lifetime;
            slot.rotation = 0.0;
        }
    }

    /// Age pickups and spin them for presentation.
    pub fn update(&mut self, dt: f32) {
        for pickup in self.pool.iter_mut() {
            pickup.life_time -= dt;
            pickup.rotation += SPIN_RATE * dt;
            if pickup.life_time <= 0.0 {
                pickup.active = false;
            }
        }
    }

    /// Release a collected pickup.
    pub fn release(&mut self, index: usize) {
        self.pool.release(index);
    }

    pub fn clear(&mut self) {
        self.pool.clear();
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pickup> {
        self.pool.iter()
    }

    pub fn iter_indexed(&self) -> impl Iterator<Item = (usize, &Pickup)> {
        self.pool.iter_indexed()
    }

    /// Index/snapshot pairs for the collision resolver.
    pub fn snapshot(&self) -> Vec<(usize, Pickup)> {
        self.pool.iter_indexed().map(|(i, p)| (i, *p)).collect()
    }
}
