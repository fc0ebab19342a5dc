//! Particle burst system.
//!
//! Purely cosmetic debris spawned in batches by damage, death, dash, and
//! landing events. Particles never affect gameplay; the pool is sized so
//! heavy fights degrade gracefully by dropping bursts instead of growing.

use glam::Vec3;
use rand::Rng;

use crate::game::pool::{PoolSlot, SlotPool};

/// Seconds a burst particle lives.
const PARTICLE_LIFE: f32 = 0.4;

/// RGBA color for presentation; the simulation only stores it.
pub type ParticleColor = [u8; 4];

pub const COLOR_WHITE: ParticleColor = [255, 255, 255, 255];
pub const COLOR_SKYBLUE: ParticleColor = [102, 191, 255, 255];
pub const COLOR_YELLOW: ParticleColor = [253, 249, 0, 255];
pub const COLOR_ORANGE: ParticleColor = [255, 161, 0, 255];
pub const COLOR_RED: ParticleColor = [230, 41, 55, 255];
pub const COLOR_PURPLE: ParticleColor = [112, 31, 126, 255];
pub const COLOR_DUST: ParticleColor = [200, 200, 200, 255];

/// One pooled particle slot.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub active: bool,
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: ParticleColor,
    pub life: f32,
    /// Initial life, kept so renderers can fade on life/initial_life.
    pub initial_life: f32,
    pub size: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            active: false,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            color: COLOR_WHITE,
            life: 0.0,
            initial_life: PARTICLE_LIFE,
            size: 0.0,
        }
    }
}

impl PoolSlot for Particle {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Manages the cosmetic particle pool.
pub struct ParticleSystem {
    pool: SlotPool<Particle>,
}

impl ParticleSystem {
    pub fn new(capacity: usize) -> Self {
        Self {
            pool: SlotPool::new(capacity),
        }
    }

    /// Spawn an upward-biased burst of `count` particles at `position`.
    ///
    /// Bursts that do not fit in the pool are truncated silently.
    pub fn burst(
        &mut self,
        position: Vec3,
        color: ParticleColor,
        count: usize,
        rng: &mut impl Rng,
    ) {
        for _ in 0..count {
            let Some(slot) = self.pool.acquire() else {
                break;
            };
            slot.active = true;
            slot.position = position;
            slot.color = color;
            slot.life = PARTICLE_LIFE;
            slot.initial_life = PARTICLE_LIFE;
            slot.size = rng.gen_range(0.2..=0.5);
            slot.velocity = Vec3::new(
                rng.gen_range(-10.0..=10.0),
                rng.gen_range(4.0..=16.0),
                rng.gen_range(-10.0..=10.0),
            );
        }
    }

    /// Advect particles and expire the spent ones.
    pub fn update(&mut self, dt: f32) {
        for particle in self.pool.iter_mut() {
            particle.position += particle.velocity * dt;
            particle.life -= dt;
            if particle.life <= 0.0 {
                particle.active = false;
            }
        }
    }

    pub fn clear(&mut self) {
        self.pool.clear();
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.pool.iter()
    }
}
