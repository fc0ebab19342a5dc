//! Game State
//!
//! Central state struct that holds all game systems together. Owns the
//! entity pools, the combatants, the progression counters, the RNG, and the
//! phase machine; [`GameState::update`] is the single entry point for the
//! entire per-frame simulation. No ambient globals — callers own exactly
//! one `GameState` and pass input in, and the presentation layer reads a
//! [`FrameView`] snapshot back out after each update.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game::combatant::{Combatant, MUZZLE_HEIGHT, TRAIL_LEN};
use crate::game::config::{ArenaConfig, BalanceConfig};
use crate::game::enemy::{Enemy, EnemyKind};
use crate::game::input::FrameInput;
use crate::game::phase::{GamePhase, PhaseMachine};
use crate::game::pool::SlotPool;
use crate::game::progression::Progression;
use crate::game::systems::particle_system::{
    COLOR_DUST, COLOR_ORANGE, COLOR_RED, COLOR_SKYBLUE, COLOR_WHITE, ParticleColor,
};
use crate::game::systems::{
    BulletSystem, CollisionSystem, ParticleSystem, PickupKind, PickupSystem, SpawnDirector,
};
use crate::game::types::{BulletOwner, Difficulty, GameMode, PlayerId};

/// Central game state holding all systems.
pub struct GameState {
    // === Configuration ===
    pub balance: BalanceConfig,
    pub arena: ArenaConfig,
    pub mode: GameMode,
    pub difficulty: Difficulty,

    // === Phase machine ===
    phase: PhaseMachine,

    // === Actors & pools ===
    combatants: Vec<Combatant>,
    enemies: SlotPool<Enemy>,
    bullets: BulletSystem,
    particles: ParticleSystem,
    pickups: PickupSystem,

    // === Directors ===
    spawn: SpawnDirector,
    progression: Progression,

    // === Bookkeeping ===
    /// Unpaused seconds since the current game started.
    pub game_time: f32,
    rng: StdRng,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Create a state with default tuning and an entropy-seeded RNG.
    pub fn new() -> Self {
        Self::with_configs(
            BalanceConfig::default(),
            ArenaConfig::default(),
            rand::thread_rng().r#gen(),
        )
    }

    /// Create a state with a fixed RNG seed (deterministic runs and tests).
    pub fn with_seed(seed: u64) -> Self {
        Self::with_configs(BalanceConfig::default(), ArenaConfig::default(), seed)
    }

    /// Create a state from explicit tuning tables.
    pub fn with_configs(balance: BalanceConfig, arena: ArenaConfig, seed: u64) -> Self {
        Self {
            phase: PhaseMachine::new(),
            combatants: Vec::new(),
            enemies: SlotPool::new(arena.max_enemies),
            bullets: BulletSystem::new(arena.max_bullets),
            particles: ParticleSystem::new(arena.max_particles),
            pickups: PickupSystem::new(arena.max_pickups),
            spawn: SpawnDirector::new(),
            progression: Progression::new(&balance),
            game_time: 0.0,
            rng: StdRng::seed_from_u64(seed),
            mode: GameMode::Survival,
            difficulty: Difficulty::Normal,
            balance,
            arena,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase.current()
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub fn active_enemy_count(&self) -> usize {
        self.enemies.active_count()
    }

    pub fn active_bullet_count(&self) -> usize {
        self.bullets.active_count()
    }

    /// Start a fresh game from the title screen: resets every pool, the
    /// progression counters, and the clock, then enters the gameplay phase
    /// for the selected mode.
    pub fn start_game(&mut self, mode: GameMode, difficulty: Difficulty) {
        self.mode = mode;
        self.difficulty = difficulty;
        self.game_time = 0.0;
        self.enemies.clear();
        self.bullets.clear();
        self.particles.clear();
        self.pickups.clear();
        self.spawn.reset();
        self.progression = Progression::new(&self.balance);

        let versus = mode == GameMode::Versus;
        self.combatants.clear();
        if versus {
            let offset = self.arena.versus_spawn_offset;
            self.combatants.push(Combatant::new(
                PlayerId::One,
                Vec3::new(-offset, 0.0, 0.0),
                &self.balance.combatant,
                true,
            ));
            self.combatants.push(Combatant::new(
                PlayerId::Two,
                Vec3::new(offset, 0.0, 0.0),
                &self.balance.combatant,
                true,
            ));
            self.phase.transition(GamePhase::Versus);
        } else {
            self.combatants.push(Combatant::new(
                PlayerId::One,
                Vec3::ZERO,
                &self.balance.combatant,
                false,
            ));
            self.phase.transition(GamePhase::Playing);
        }
        log::info!("game started: {mode:?} / {difficulty:?}");
    }

    /// Acknowledge a result screen and return to the title.
    pub fn acknowledge(&mut self) {
        if matches!(
            self.phase.current(),
            GamePhase::GameOver | GamePhase::VersusResult(_)
        ) {
            self.phase.transition(GamePhase::Title);
        }
    }

    /// Advance the simulation by one frame of `dt` seconds.
    ///
    /// Ordering within the frame is load-bearing: combatants move first,
    /// the spawn director injects, enemies act, bullets advect, then the
    /// collision resolver mutates, then progression checks may transition
    /// the phase — all synchronously in this one call.
    pub fn update(&mut self, dt: f32, input: &FrameInput) {
        if input.pause_pressed {
            self.phase.toggle_pause();
        }

        match self.phase.current() {
            GamePhase::Playing => self.update_survival(dt, input),
            GamePhase::Versus => self.update_versus(dt, input),
            GamePhase::BossIntro => self.update_boss_intro(dt, input),
            GamePhase::StageClear => self.update_stage_clear(dt),
            // Title, results, and Paused advance no simulation time.
            GamePhase::Title
            | GamePhase::GameOver
            | GamePhase::VersusResult(_)
            | GamePhase::Paused => {}
        }
    }

    // === Per-phase update routines ===

    fn update_survival(&mut self, dt: f32, input: &FrameInput) {
        self.phase.tick(dt);
        self.game_time += dt;

        self.update_combatants(dt, input, &[0]);

        // The spawn director is suppressed for the whole boss fight and
        // once the quota is met (the remaining wave gets force-cleared).
        if !self.progression.boss_active && !self.progression.quota_met() {
            let player_pos = self.combatants[0].position;
            self.spawn.update(
                dt,
                self.progression.stage,
                self.difficulty,
                player_pos,
                &mut self.enemies,
                &self.balance,
                &self.arena,
                &mut self.rng,
            );
        }

        let mut contact_death = false;
        self.update_enemies(dt, &mut contact_death);

        self.bullets.update(dt, self.arena.half_extent);

        let outcome = CollisionSystem::resolve(
            &mut self.combatants,
            &mut self.enemies,
            &mut self.bullets,
            &mut self.pickups,
            &mut self.particles,
            &self.balance,
            &mut self.rng,
        );

        self.pickups.update(dt);
        self.particles.update(dt);

        // Progression checks run last so same-frame kills count.
        self.progression.add_kills(outcome.kills);

        if outcome.deaths[0] || contact_death {
            self.phase.transition(GamePhase::GameOver);
            return;
        }

        if outcome.boss_died {
            self.progression.boss_killed();
            log::info!("stage {} boss defeated", self.progression.stage);
            self.phase.transition(GamePhase::StageClear);
            return;
        }

        if self.progression.quota_met() {
            self.clear_enemies_with_bursts();
            self.phase.transition(GamePhase::BossIntro);
        }
    }

    fn update_versus(&mut self, dt: f32, input: &FrameInput) {
        self.phase.tick(dt);
        self.game_time += dt;

        self.update_combatants(dt, input, &[0, 1]);
        self.bullets.update(dt, self.arena.half_extent);

        let outcome = CollisionSystem::resolve(
            &mut self.combatants,
            &mut self.enemies,
            &mut self.bullets,
            &mut self.pickups,
            &mut self.particles,
            &self.balance,
            &mut self.rng,
        );

        self.particles.update(dt);

        // Simultaneous knockouts award player two.
        for id in [PlayerId::One, PlayerId::Two] {
            if outcome.deaths[id.index()] {
                self.phase.transition(GamePhase::VersusResult(id.opponent()));
                break;
            }
        }
    }

    fn update_boss_intro(&mut self, dt: f32, input: &FrameInput) {
        self.phase.tick(dt);
        self.game_time += dt;

        // The player can reposition during the intro; nothing hostile acts.
        self.update_combatants(dt, input, &[0]);
        self.bullets.update(dt, self.arena.half_extent);
        self.pickups.update(dt);
        self.particles.update(dt);

        if self.phase.elapsed >= self.balance.stage.boss_intro_delay {
            let player_pos = self.combatants[0].position;
            self.spawn.spawn_boss(
                self.progression.stage,
                player_pos,
                &mut self.enemies,
                &self.balance,
                &self.arena,
                &mut self.rng,
            );
            self.progression.boss_spawned();
            self.phase.transition(GamePhase::Playing);
        }
    }

    fn update_stage_clear(&mut self, dt: f32) {
        self.phase.tick(dt);
        self.game_time += dt;
        self.particles.update(dt);

        if self.phase.elapsed >= self.balance.stage.stage_clear_delay {
            self.progression.advance_stage(&self.balance);
            self.enemies.clear();
            self.bullets.clear();
            self.pickups.clear();
            self.particles.clear();
            self.spawn.reset();
            self.phase.transition(GamePhase::Playing);
        }
    }

    // === Shared frame pieces ===

    /// Update the combatants at `slots` and service their spawn requests.
    fn update_combatants(&mut self, dt: f32, input: &FrameInput, slots: &[usize]) {
        for &slot in slots {
            let Some(combatant) = self.combatants.get_mut(slot) else {
                continue;
            };
            let player_input = &input.players[slot];
            let events = combatant.update(
                dt,
                player_input.move_dir,
                player_input.aim_point,
                player_input.dash_pressed,
                player_input.fire_held,
                &self.balance.combatant,
                &self.arena,
            );

            let position = combatant.position;
            let id = combatant.id;
            let tier = combatant.weapon_tier;
            let damage = combatant.bullet_damage(&self.balance.combatant);

            if events.dash_started {
                self.particles.burst(position, COLOR_WHITE, 5, &mut self.rng);
            }
            if events.dashing {
                self.particles.burst(position, COLOR_SKYBLUE, 1, &mut self.rng);
            }
            if let Some(dir) = events.fire_dir {
                let spread = self.balance.combatant.weapon_tiers[tier].spread;
                let dir = if spread > 0.0 {
                    rotate_planar(dir, self.rng.gen_range(-spread..=spread))
                } else {
                    dir
                };
                let muzzle = Vec3::new(position.x, MUZZLE_HEIGHT, position.z);
                self.bullets.fire(
                    muzzle,
                    dir,
                    self.balance.combatant.bullet_speed,
                    self.balance.combatant.bullet_lifetime,
                    damage,
                    BulletOwner::Player(id),
                );
            }
        }
    }

    /// Advance enemy AI and apply melee / landing / ranged consequences.
    fn update_enemies(&mut self, dt: f32, contact_death: &mut bool) {
        for index in 0..self.enemies.capacity() {
            let Some(enemy) = self.enemies.get_mut(index) else {
                break;
            };
            if !enemy.active {
                continue;
            }

            let target = nearest_combatant_pos(&self.combatants, enemy.position);
            let step = enemy.update(dt, self.arena.gravity, target, self.arena.melee_range);

            let enemy_pos = enemy.position;
            let contact_damage = enemy.contact_damage;
            let bullet_damage = enemy.bullet_damage;

            if step.landed {
                self.particles.burst(enemy_pos, COLOR_DUST, 5, &mut self.rng);
                // Press attack: touching down on the player hurts.
                for combatant in &mut self.combatants {
                    if combatant.position.distance(enemy_pos) < self.arena.landing_press_radius
                        && combatant.take_damage(
                            self.arena.landing_press_damage,
                            &self.balance.combatant,
                        )
                    {
                        self.particles
                            .burst(combatant.position, COLOR_RED, 10, &mut self.rng);
                        *contact_death |= combatant.is_dead();
                    }
                }
            }

            if step.melee_attack {
                for combatant in &mut self.combatants {
                    if combatant.position.distance(enemy_pos) < self.arena.melee_range
                        && combatant.take_damage(contact_damage, &self.balance.combatant)
                    {
                        self.particles
                            .burst(combatant.position, COLOR_ORANGE, 4, &mut self.rng);
                        *contact_death |= combatant.is_dead();
                    }
                }
            }

            if step.fire {
                let muzzle = Vec3::new(enemy_pos.x, MUZZLE_HEIGHT, enemy_pos.z);
                let mut dir = target - enemy_pos;
                dir.y = 0.0;
                let dir = dir.normalize_or(Vec3::Z);
                self.bullets.fire(
                    muzzle,
                    dir,
                    self.balance.combatant.bullet_speed,
                    self.balance.combatant.bullet_lifetime,
                    bullet_damage,
                    BulletOwner::Enemy,
                );
            }
        }
    }

    /// Force-clear the remaining wave before a boss intro: effect bursts,
    /// no kill credit.
    fn clear_enemies_with_bursts(&mut self) {
        let positions: Vec<Vec3> = self.enemies.iter().map(|e| e.position).collect();
        for position in positions {
            self.particles.burst(position, COLOR_WHITE, 5, &mut self.rng);
        }
        self.enemies.clear();
        log::info!(
            "stage {} quota met, summoning boss",
            self.progression.stage
        );
    }

    // === Presentation snapshot ===

    /// Build the read-only view the renderer consumes this frame.
    pub fn frame_view(&self) -> FrameView {
        FrameView {
            phase: self.phase.current(),
            combatants: self
                .combatants
                .iter()
                .map(|c| CombatantView {
                    id: c.id,
                    position: c.position,
                    facing_angle: c.facing_angle,
                    hp: c.hp,
                    max_hp: c.max_hp,
                    hp_ratio: c.hp_ratio(),
                    level: c.level,
                    dashing: c.dash_duration > 0.0,
                    invincible: c.invincibility_timer > 0.0,
                    dash_cooldown: c.dash_cooldown,
                    walk_anim_timer: c.walk_anim_timer,
                    trail: c.trail(),
                })
                .collect(),
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyView {
                    position: e.position,
                    kind: e.kind,
                    hp_ratio: e.hp_ratio(),
                    flashing: e.flash_timer > 0.0,
                    grounded: e.is_grounded,
                    anim_timer: e.anim_timer,
                })
                .collect(),
            bullets: self
                .bullets
                .iter()
                .map(|b| BulletView {
                    position: b.position,
                    owner: b.owner,
                })
                .collect(),
            particles: self
                .particles
                .iter()
                .map(|p| ParticleView {
                    position: p.position,
                    color: p.color,
                    size: p.size,
                    life_ratio: if p.initial_life > 0.0 {
                        (p.life / p.initial_life).max(0.0)
                    } else {
                        0.0
                    },
                })
                .collect(),
            pickups: self
                .pickups
                .iter()
                .map(|p| PickupView {
                    position: p.position,
                    kind: p.kind,
                    rotation: p.rotation,
                })
                .collect(),
            focal_points: self.combatants.iter().map(|c| c.position).collect(),
            hud: HudView {
                mode: self.mode,
                difficulty: self.difficulty,
                stage: self.progression.stage,
                stage_kills: self.progression.stage_kills,
                kills_required: self.progression.kills_required,
                boss_active: self.progression.boss_active,
                game_time: self.game_time,
            },
        }
    }
}

/// Position of the combatant nearest to `from` (the aggro target).
fn nearest_combatant_pos(combatants: &[Combatant], from: Vec3) -> Vec3 {
    combatants
        .iter()
        .min_by(|a, b| {
            a.position
                .distance_squared(from)
                .total_cmp(&b.position.distance_squared(from))
        })
        .map(|c| c.position)
        .unwrap_or(Vec3::ZERO)
}

/// Rotate a planar direction around the vertical axis.
fn rotate_planar(dir: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(dir.x * cos - dir.z * sin, 0.0, dir.x * sin + dir.z * cos)
}

// === Render-facing snapshot types ===

/// Read-only snapshot handed to the presentation layer each frame.
#[derive(Debug, Clone)]
pub struct FrameView {
    pub phase: GamePhase,
    pub combatants: Vec<CombatantView>,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub particles: Vec<ParticleView>,
    pub pickups: Vec<PickupView>,
    /// Camera focal point(s): one per controlled combatant.
    pub focal_points: Vec<Vec3>,
    pub hud: HudView,
}

#[derive(Debug, Clone)]
pub struct CombatantView {
    pub id: PlayerId,
    pub position: Vec3,
    pub facing_angle: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub hp_ratio: f32,
    pub level: i32,
    pub dashing: bool,
    pub invincible: bool,
    pub dash_cooldown: f32,
    pub walk_anim_timer: f32,
    pub trail: [Vec3; TRAIL_LEN],
}

#[derive(Debug, Clone, Copy)]
pub struct EnemyView {
    pub position: Vec3,
    pub kind: EnemyKind,
    pub hp_ratio: f32,
    pub flashing: bool,
    pub grounded: bool,
    pub anim_timer: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct BulletView {
    pub position: Vec3,
    pub owner: BulletOwner,
}

#[derive(Debug, Clone, Copy)]
pub struct ParticleView {
    pub position: Vec3,
    pub color: ParticleColor,
    pub size: f32,
    pub life_ratio: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct PickupView {
    pub position: Vec3,
    pub kind: PickupKind,
    pub rotation: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct HudView {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub stage: u32,
    pub stage_kills: u32,
    pub kills_required: u32,
    pub boss_active: bool,
    pub game_time: f32,
}
