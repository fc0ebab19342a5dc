//! Bullet lifecycle management system.
//!
//! Owns the fixed-capacity bullet pool, providing fire / advect / expire /
//! iterate operations. Collision resolution lives elsewhere; this system
//! only moves bullets and retires the ones that time out or leave the
//! arena. Bullets are non-piercing — the collision resolver releases a
//! bullet's slot on its first successful hit.

use glam::Vec3;

use crate::game::pool::{PoolSlot, SlotPool};
use crate::game::types::BulletOwner;

/// Collision radius shared by every bullet.
pub const BULLET_RADIUS: f32 = 0.3;
/// Bullets that drift this far past the wall are retired.
const OUT_OF_BOUNDS_MARGIN: f32 = 5.0;

/// One pooled bullet slot.
#[derive(Debug, Clone, Copy)]
pub struct Bullet {
    pub active: bool,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Remaining seconds before the bullet expires unspent.
    pub life_time: f32,
    pub damage: i32,
    pub owner: BulletOwner,
}

impl Default for Bullet {
    fn default() -> Self {
        Self {
            active: false,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            life_time: 0.0,
            damage: 0,
            owner: BulletOwner::Enemy,
        }
    }
}

impl PoolSlot for Bullet {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Manages the full lifecycle of bullets for every shooter in the arena.
pub struct BulletSystem {
    pool: SlotPool<Bullet>,
}

impl BulletSystem {
    pub fn new(capacity: usize) -> Self {
        Self {
            pool: SlotPool::new(capacity),
        }
    }

    /// Spawn a bullet if a slot is free. A full pool silently drops the
    /// request — capacity exhaustion is a soft cap, never an error.
    pub fn fire(
        &mut self,
        position: Vec3,
        direction: Vec3,
        speed: f32,
        life_time: f32,
        damage: i32,
        owner: BulletOwner,
    ) {
        if let Some(slot) = self.pool.acquire() {
            slot.active = true;
            slot.position = position;
            slot.velocity = direction * speed;
            slot.life_time = life_time;
            slot.damage = damage;
            slot.owner = owner;
        }
    }

    /// Advect every active bullet and retire expired or escaped ones.
    pub fn update(&mut self, dt: f32, arena_half_extent: f32) {
        let bound = arena_half_extent + OUT_OF_BOUNDS_MARGIN;
        for bullet in self.pool.iter_mut() {
            bullet.position += bullet.velocity * dt;
            bullet.life_time -= dt;
            if bullet.life_time <= 0.0
                || bullet.position.x.abs() > bound
                || bullet.position.z.abs() > bound
            {
                bullet.active = false;
            }
        }
    }

    /// Release a bullet that hit something (non-piercing).
    pub fn release(&mut self, index: usize) {
        self.pool.release(index);
    }

    pub fn clear(&mut self) {
        self.pool.clear();
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bullet> {
        self.pool.iter()
    }

    pub fn iter_indexed(&self) -> impl Iterator<Item = (usize, &Bullet)> {
        self.pool.iter_indexed()
    }

    /// Collect index/snapshot pairs so the collision resolver can walk
    /// bullets while mutating other state, then release hits by index.
    pub fn snapshot(&self) -> Vec<(usize, Bullet)> {
        self.pool.iter_indexed().map(|(i, b)| (i, *b)).collect()
    }
}
