//! Arena Configuration
//!
//! Centralized configuration for the arena layout, entity pool capacities,
//! and spawn pacing. `Default` returns the shipped values.

use serde::{Deserialize, Serialize};

/// Enemy spawn pacing and placement tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Seconds between spawn attempts at stage 1.
    pub base_interval: f32,
    /// Interval reduction per stage after the first.
    pub interval_per_stage: f32,
    /// Lower bound on the spawn interval.
    pub min_interval: f32,
    /// Interval multiplier in Hard difficulty (< 1.0 spawns faster).
    pub hard_interval_multiplier: f32,
    /// Radius of the ground-spawn ring around the player.
    pub ring_radius: f32,
    /// Chance of an airborne drop-in instead of a ring spawn (Hard only).
    pub airborne_chance: f64,
    /// Spawn altitude for airborne drop-ins.
    pub airborne_height: f32,
    /// Half-extent of the square around the player where drop-ins land.
    pub airborne_spread: f32,
    /// Tank probability at stage 1.
    pub base_tank_chance: f64,
    /// Tank probability increase per stage after the first.
    pub tank_chance_per_stage: f64,
    /// Upper bound on tank probability.
    pub max_tank_chance: f64,
}

/// Arena layout and entity pool capacities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Half-extent of the square arena; positions are clamped to
    /// `[-half_extent, half_extent]` on both planar axes (hard wall).
    pub half_extent: f32,
    /// Downward acceleration for airborne enemies.
    pub gravity: f32,
    /// Distance under which a grounded enemy lands melee hits.
    pub melee_range: f32,
    /// Radius of the landing press-hit around a touching-down enemy.
    pub landing_press_radius: f32,
    /// Damage dealt by a landing press hit.
    pub landing_press_damage: i32,
    /// Spawn positions for the two versus-mode combatants (±x).
    pub versus_spawn_offset: f32,
    pub max_bullets: usize,
    pub max_enemies: usize,
    pub max_particles: usize,
    pub max_pickups: usize,
    pub spawn: SpawnConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            half_extent: 40.0,
            gravity: 40.0,
            melee_range: 1.5,
            landing_press_radius: 3.0,
            landing_press_damage: 10,
            versus_spawn_offset: 12.0,
            max_bullets: 200,
            max_enemies: 80,
            max_particles: 400,
            max_pickups: 40,
            spawn: SpawnConfig {
                base_interval: 2.0,
                interval_per_stage: 0.15,
                min_interval: 0.5,
                hard_interval_multiplier: 0.66,
                ring_radius: 30.0,
                airborne_chance: 0.4,
                airborne_height: 20.0,
                airborne_spread: 15.0,
                base_tank_chance: 0.2,
                tank_chance_per_stage: 0.05,
                max_tank_chance: 0.5,
            },
        }
    }
}

impl ArenaConfig {
    /// Spawn interval for a given stage and difficulty.
    pub fn spawn_interval(&self, stage: u32, hard: bool) -> f32 {
        let scaled = self.spawn.base_interval
            - self.spawn.interval_per_stage * stage.saturating_sub(1) as f32;
        let interval = scaled.max(self.spawn.min_interval);
        if hard {
            interval * self.spawn.hard_interval_multiplier
        } else {
            interval
        }
    }

    /// Tank probability for a given stage.
    pub fn tank_chance(&self, stage: u32) -> f64 {
        (self.spawn.base_tank_chance
            + self.spawn.tank_chance_per_stage * stage.saturating_sub(1) as f64)
            .min(self.spawn.max_tank_chance)
    }
}
