//! Spawn director.
//!
//! Time-driven enemy generation with stage and difficulty scaling. The
//! director accumulates real elapsed time and attempts exactly one spawn
//! each time the stage-scaled interval elapses — spawn cadence is
//! frame-rate-independent by construction. Boss summoning is driven by the
//! kill quota and handled through [`SpawnDirector::spawn_boss`]; while a
//! boss is active the caller simply stops ticking the director.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::game::config::{ArenaConfig, BalanceConfig, EnemyKindBalance};
use crate::game::enemy::{Enemy, EnemyKind, EnemySpawnParams};
use crate::game::pool::SlotPool;
use crate::game::types::Difficulty;

/// Time- and stage-driven enemy generator.
pub struct SpawnDirector {
    /// Accumulated real time since the last spawn attempt.
    timer: f32,
}

impl Default for SpawnDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnDirector {
    pub fn new() -> Self {
        Self { timer: 0.0 }
    }

    /// Drop any accumulated time (stage start, mode start).
    pub fn reset(&mut self) {
        self.timer = 0.0;
    }

    /// Accumulate `dt` and spawn one enemy when the interval elapses.
    ///
    /// Returns `true` if an enemy was spawned. Callers suppress the call
    /// entirely while a boss is active.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        dt: f32,
        stage: u32,
        difficulty: Difficulty,
        player_pos: Vec3,
        enemies: &mut SlotPool<Enemy>,
        balance: &BalanceConfig,
        arena: &ArenaConfig,
        rng: &mut impl Rng,
    ) -> bool {
        self.timer += dt;
        let interval = arena.spawn_interval(stage, difficulty == Difficulty::Hard);
        if self.timer < interval {
            return false;
        }
        self.timer = 0.0;
        self.spawn_regular(stage, difficulty, player_pos, enemies, balance, arena, rng)
    }

    /// One spawn attempt: pick placement and kind, then claim a slot.
    #[allow(clippy::too_many_arguments)]
    fn spawn_regular(
        &mut self,
        stage: u32,
        difficulty: Difficulty,
        player_pos: Vec3,
        enemies: &mut SlotPool<Enemy>,
        balance: &BalanceConfig,
        arena: &ArenaConfig,
        rng: &mut impl Rng,
    ) -> bool {
        let hard = difficulty == Difficulty::Hard;

        // Skyfall drop-ins are a hard-mode threat: the enemy appears above
        // the player and falls under gravity until it lands.
        let airborne = hard && rng.gen_bool(arena.spawn.airborne_chance);
        let position = if airborne {
            Vec3::new(
                player_pos.x + rng.gen_range(-arena.spawn.airborne_spread..=arena.spawn.airborne_spread),
                arena.spawn.airborne_height,
                player_pos.z + rng.gen_range(-arena.spawn.airborne_spread..=arena.spawn.airborne_spread),
            )
        } else {
            let angle = rng.gen_range(0.0..TAU);
            Vec3::new(
                player_pos.x + angle.cos() * arena.spawn.ring_radius,
                0.0,
                player_pos.z + angle.sin() * arena.spawn.ring_radius,
            )
        };

        let is_tank = rng.gen_bool(arena.tank_chance(stage));
        let (kind, stats) = if is_tank {
            (EnemyKind::Tank, &balance.tank)
        } else {
            (EnemyKind::Drone, &balance.drone)
        };

        let Some(slot) = enemies.acquire() else {
            // Pool full: the request is dropped, not queued.
            return false;
        };
        slot.init(Self::regular_params(
            kind, stats, position, airborne, stage, hard, balance,
        ));
        true
    }

    /// Stage-scaled spawn parameters for a regular enemy.
    fn regular_params(
        kind: EnemyKind,
        stats: &EnemyKindBalance,
        position: Vec3,
        airborne: bool,
        stage: u32,
        hard: bool,
        balance: &BalanceConfig,
    ) -> EnemySpawnParams {
        // Tanks only arm their ranged attack in hard mode. Armed ranges
        // grow with the stage on the same curve as speed.
        let attack_range = if kind == EnemyKind::Tank && !hard {
            None
        } else {
            stats
                .attack_range
                .map(|range| range * balance.stage_speed_multiplier(stage))
        };
        EnemySpawnParams {
            kind,
            position,
            airborne,
            speed: stats.speed * balance.stage_speed_multiplier(stage),
            max_hp: stats.max_hp * balance.stage_hp_multiplier(stage),
            contact_damage: stats.contact_damage,
            exp_reward: stats.exp_reward,
            attack_range,
            shoot_interval: stats.shoot_cooldown,
            bullet_damage: stats.bullet_damage,
        }
    }

    /// Spawn exactly one boss on the spawn ring with stage-scaled hp.
    ///
    /// Returns `false` only if the enemy pool is exhausted (the caller
    /// force-clears regular enemies first, so a slot is always free in
    /// practice).
    pub fn spawn_boss(
        &mut self,
        stage: u32,
        player_pos: Vec3,
        enemies: &mut SlotPool<Enemy>,
        balance: &BalanceConfig,
        arena: &ArenaConfig,
        rng: &mut impl Rng,
    ) -> bool {
        let angle = rng.gen_range(0.0..TAU);
        let position = Vec3::new(
            player_pos.x + angle.cos() * arena.spawn.ring_radius,
            0.0,
            player_pos.z + angle.sin() * arena.spawn.ring_radius,
        );
        let boss = &balance.boss;
        let Some(slot) = enemies.acquire() else {
            return false;
        };
        slot.init(EnemySpawnParams {
            kind: EnemyKind::Boss,
            position,
            airborne: false,
            speed: boss.speed * balance.stage_speed_multiplier(stage),
            max_hp: balance.boss_hp(stage),
            contact_damage: boss.contact_damage,
            exp_reward: 0,
            attack_range: Some(boss.attack_range),
            shoot_interval: boss.shoot_cooldown,
            bullet_damage: boss.bullet_damage,
        });
        log::info!("stage {stage} boss spawned");
        true
    }
}
