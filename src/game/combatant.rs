//! Combatant Module
//!
//! The player-controlled mech (one in survival, two in versus). Per-frame
//! motion, dashing, cooldowns, facing, arena clamping, and the leveling
//! bookkeeping all live here; bullet/particle spawning is requested through
//! the returned [`CombatantEvents`] so the caller owns the pools.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use crate::game::config::{ArenaConfig, CombatantBalance};
use crate::game::types::PlayerId;

/// Bullets leave the muzzle at this height and travel horizontally.
pub const MUZZLE_HEIGHT: f32 = 1.5;
/// Length of the motion-trail ring buffer.
pub const TRAIL_LEN: usize = 8;
/// Fallback dash direction when there is no movement and no usable aim.
const DEFAULT_DASH_DIR: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Spawn requests produced by one combatant update.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombatantEvents {
    /// Planar direction to fire a bullet in, if the trigger landed this frame.
    pub fire_dir: Option<Vec3>,
    /// A dash started this frame (burst effect at the start position).
    pub dash_started: bool,
    /// The combatant is mid-dash (per-frame trail effect).
    pub dashing: bool,
}

/// A player-controlled actor.
#[derive(Debug, Clone)]
pub struct Combatant {
    pub id: PlayerId,
    /// World position; y stays 0 (the mech never leaves the ground).
    pub position: Vec3,
    pub speed: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub level: i32,
    pub exp: i32,
    pub next_level_exp: i32,
    /// Index into the balance weapon-tier table.
    pub weapon_tier: usize,
    /// Ground-plane facing derived from the aim point every frame.
    pub facing_angle: f32,
    pub shoot_cooldown: f32,
    pub dash_cooldown: f32,
    /// Remaining dash time; > 0 means the dash is active.
    pub dash_duration: f32,
    /// Fixed for the whole dash; does not respond to input mid-dash.
    pub dash_dir: Vec3,
    /// Recharge window applied when a dash triggers (mode-dependent).
    pub dash_cooldown_window: f32,
    /// Remaining post-hit invulnerability.
    pub invincibility_timer: f32,
    /// Advances only while walking; drives the leg animation.
    pub walk_anim_timer: f32,
    /// Ring buffer of recent positions for the motion trail.
    trail: [Vec3; TRAIL_LEN],
    trail_head: usize,
}

impl Combatant {
    /// Spawn a fresh combatant at `position` with stage-1 stats.
    pub fn new(id: PlayerId, position: Vec3, balance: &CombatantBalance, versus: bool) -> Self {
        Self {
            id,
            position,
            speed: balance.speed,
            hp: balance.max_hp,
            max_hp: balance.max_hp,
            level: 1,
            exp: 0,
            next_level_exp: balance.base_next_level_exp,
            weapon_tier: 0,
            facing_angle: 0.0,
            shoot_cooldown: 0.0,
            dash_cooldown: 0.0,
            dash_duration: 0.0,
            dash_dir: DEFAULT_DASH_DIR,
            dash_cooldown_window: if versus {
                balance.dash.cooldown_versus
            } else {
                balance.dash.cooldown_survival
            },
            invincibility_timer: 0.0,
            walk_anim_timer: 0.0,
            trail: [position; TRAIL_LEN],
            trail_head: 0,
        }
    }

    /// True while neither the dash window nor the post-hit window protects
    /// this combatant. Dashing grants immunity to both contact and bullets.
    pub fn vulnerable(&self) -> bool {
        self.dash_duration <= 0.0 && self.invincibility_timer <= 0.0
    }

    /// Apply damage if vulnerable. Returns `true` when the hit landed.
    ///
    /// Landing a hit opens the invincibility window so a single contact
    /// cannot drain hp over consecutive frames.
    pub fn take_damage(&mut self, amount: i32, balance: &CombatantBalance) -> bool {
        if !self.vulnerable() {
            return false;
        }
        self.hp = (self.hp - amount).max(0);
        self.invincibility_timer = balance.invincibility_window;
        true
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Restore hp, clamped to the maximum.
    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    /// Add experience; returns `true` on level-up.
    ///
    /// Leveling refills hp, raises the max, and may promote the weapon tier.
    /// All three effects are strictly monotonic.
    pub fn grant_exp(&mut self, amount: i32, balance: &CombatantBalance) -> bool {
        self.exp += amount;
        if self.exp < self.next_level_exp {
            return false;
        }
        self.level += 1;
        self.exp = 0;
        self.next_level_exp = (self.next_level_exp as f32 * balance.exp_growth) as i32;
        self.max_hp += balance.hp_per_level;
        self.hp = self.max_hp;
        if self.level >= balance.spread_weapon_level {
            self.weapon_tier = 1;
        }
        log::info!("player {:?} reached level {}", self.id, self.level);
        true
    }

    /// Bullet damage at the current level.
    pub fn bullet_damage(&self, balance: &CombatantBalance) -> i32 {
        balance.bullet_damage + balance.damage_per_level * (self.level - 1)
    }

    /// Hp as a 0..=1 ratio for presentation.
    pub fn hp_ratio(&self) -> f32 {
        if self.max_hp <= 0 {
            0.0
        } else {
            self.hp as f32 / self.max_hp as f32
        }
    }

    /// Recent positions, oldest first.
    pub fn trail(&self) -> [Vec3; TRAIL_LEN] {
        let mut out = [Vec3::ZERO; TRAIL_LEN];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.trail[(self.trail_head + i) % TRAIL_LEN];
        }
        out
    }

    /// Advance one frame of combatant logic.
    ///
    /// Ordering matters: cooldowns tick first so a dash/shot released this
    /// frame sees the post-decrement values, then motion integrates, then
    /// the position is clamped to the arena.
    pub fn update(
        &mut self,
        dt: f32,
        move_dir: Vec2,
        aim_point: Vec3,
        dash_pressed: bool,
        fire_held: bool,
        balance: &CombatantBalance,
        arena: &ArenaConfig,
    ) -> CombatantEvents {
        let mut events = CombatantEvents::default();

        // 1. Tick every timer down, clamping at zero.
        self.shoot_cooldown = (self.shoot_cooldown - dt).max(0.0);
        self.dash_cooldown = (self.dash_cooldown - dt).max(0.0);
        self.invincibility_timer = (self.invincibility_timer - dt).max(0.0);

        // Facing follows the aim point, not the movement direction.
        let to_aim = aim_point - self.position;
        if Vec2::new(to_aim.x, to_aim.z).length_squared() > 1e-6 {
            self.facing_angle = -to_aim.z.atan2(to_aim.x) + PI / 2.0;
        }

        // 2. Dash trigger: edge event, gated strictly by the cooldown.
        if dash_pressed && self.dash_cooldown <= 0.0 {
            self.dash_duration = balance.dash.duration;
            self.dash_cooldown = self.dash_cooldown_window;
            self.dash_dir = Self::pick_dash_dir(move_dir, to_aim);
            events.dash_started = true;
        }

        // 3. Motion: a live dash overrides movement input entirely.
        if self.dash_duration > 0.0 {
            self.dash_duration -= dt;
            self.position += self.dash_dir * (self.speed * balance.dash.speed_multiplier * dt);
            events.dashing = true;
        } else {
            let dir = move_dir.normalize_or_zero();
            if dir != Vec2::ZERO {
                self.position += Vec3::new(dir.x, 0.0, dir.y) * (self.speed * dt);
                self.walk_anim_timer += dt;
            } else {
                self.walk_anim_timer = 0.0;
            }
        }

        // 4. Hard wall: pin to the square arena boundary.
        self.position.x = self.position.x.clamp(-arena.half_extent, arena.half_extent);
        self.position.z = self.position.z.clamp(-arena.half_extent, arena.half_extent);

        // 5. Record the motion trail after movement settles.
        self.trail[self.trail_head] = self.position;
        self.trail_head = (self.trail_head + 1) % TRAIL_LEN;

        // 6. Firing: vertical aim is ignored, bullets travel horizontally.
        if fire_held && self.shoot_cooldown <= 0.0 {
            let mut aim = to_aim;
            aim.y = 0.0;
            let dir = aim.normalize_or(DEFAULT_DASH_DIR);
            self.shoot_cooldown = balance.weapon_tiers[self.weapon_tier].cooldown;
            events.fire_dir = Some(dir);
        }

        events
    }

    /// Dash direction priority: movement intent, then planar aim, then the
    /// fixed forward fallback. Degenerate vectors never leak through.
    fn pick_dash_dir(move_dir: Vec2, to_aim: Vec3) -> Vec3 {
        let input = move_dir.normalize_or_zero();
        if input != Vec2::ZERO {
            return Vec3::new(input.x, 0.0, input.y);
        }
        let planar_aim = Vec3::new(to_aim.x, 0.0, to_aim.z);
        planar_aim.normalize_or(DEFAULT_DASH_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::BalanceConfig;

    fn test_combatant() -> (Combatant, BalanceConfig, ArenaConfig) {
        let balance = BalanceConfig::default();
        let arena = ArenaConfig::default();
        let combatant = Combatant::new(PlayerId::One, Vec3::ZERO, &balance.combatant, false);
        (combatant, balance, arena)
    }

    #[test]
    fn test_diagonal_move_is_not_faster() {
        let (mut c, balance, arena) = test_combatant();
        c.update(
            0.1,
            Vec2::new(1.0, 1.0),
            Vec3::new(0.0, 0.0, -5.0),
            false,
            false,
            &balance.combatant,
            &arena,
        );

        let expected = balance.combatant.speed * 0.1;
        assert!((c.position.length() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_dash_cooldown_gates_retrigger() {
        let (mut c, balance, arena) = test_combatant();
        let aim = Vec3::new(0.0, 0.0, -5.0);

        let ev = c.update(0.01, Vec2::X, aim, true, false, &balance.combatant, &arena);
        assert!(ev.dash_started);
        let first_duration = c.dash_duration;

        // Second press while the cooldown runs must not restart the dash
        // or consume another cooldown cycle.
        let cooldown_before = c.dash_cooldown;
        let ev = c.update(0.01, Vec2::X, aim, true, false, &balance.combatant, &arena);
        assert!(!ev.dash_started);
        assert!(c.dash_duration < first_duration);
        assert!((cooldown_before - c.dash_cooldown - 0.01).abs() < 1e-5);
    }

    #[test]
    fn test_dash_direction_fixed_for_whole_dash() {
        let (mut c, balance, arena) = test_combatant();
        let aim = Vec3::new(0.0, 0.0, -5.0);

        c.update(0.01, Vec2::X, aim, true, false, &balance.combatant, &arena);
        let dir = c.dash_dir;

        // New movement input mid-dash must not steer the dash.
        c.update(0.01, Vec2::NEG_Y, aim, false, false, &balance.combatant, &arena);
        assert_eq!(c.dash_dir, dir);
        assert!(c.position.x > 0.0);
    }

    #[test]
    fn test_dash_falls_back_to_aim_direction() {
        let (mut c, balance, arena) = test_combatant();
        let aim = Vec3::new(0.0, 0.0, 10.0);

        c.update(0.01, Vec2::ZERO, aim, true, false, &balance.combatant, &arena);
        assert!((c.dash_dir - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn test_arena_clamp_is_hard_wall() {
        let (mut c, balance, arena) = test_combatant();
        c.position = Vec3::new(arena.half_extent - 0.1, 0.0, 0.0);

        for _ in 0..10 {
            c.update(
                0.1,
                Vec2::X,
                Vec3::new(50.0, 0.0, 0.0),
                false,
                false,
                &balance.combatant,
                &arena,
            );
        }
        assert_eq!(c.position.x, arena.half_extent);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let (mut c, balance, arena) = test_combatant();
        let aim = Vec3::new(5.0, 0.0, 0.0);

        let ev = c.update(0.01, Vec2::ZERO, aim, false, true, &balance.combatant, &arena);
        assert!(ev.fire_dir.is_some());

        let ev = c.update(0.01, Vec2::ZERO, aim, false, true, &balance.combatant, &arena);
        assert!(ev.fire_dir.is_none());
    }

    #[test]
    fn test_fired_bullets_travel_horizontally() {
        let (mut c, balance, arena) = test_combatant();
        let aim = Vec3::new(5.0, 3.0, 0.0);

        let ev = c.update(0.01, Vec2::ZERO, aim, false, true, &balance.combatant, &arena);
        let dir = ev.fire_dir.unwrap();
        assert_eq!(dir.y, 0.0);
        assert!((dir.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_damage_clamps_at_zero_and_opens_window() {
        let (mut c, balance, _) = test_combatant();

        assert!(c.take_damage(250, &balance.combatant));
        assert_eq!(c.hp, 0);
        assert!(c.invincibility_timer > 0.0);
        assert!(c.is_dead());
    }

    #[test]
    fn test_invincibility_blocks_followup_hits() {
        let (mut c, balance, _) = test_combatant();

        assert!(c.take_damage(10, &balance.combatant));
        assert!(!c.take_damage(10, &balance.combatant));
        assert_eq!(c.hp, balance.combatant.max_hp - 10);
    }

    #[test]
    fn test_dash_blocks_damage() {
        let (mut c, balance, arena) = test_combatant();
        c.update(
            0.01,
            Vec2::X,
            Vec3::new(5.0, 0.0, 0.0),
            true,
            false,
            &balance.combatant,
            &arena,
        );

        assert!(c.dash_duration > 0.0);
        assert!(!c.take_damage(10, &balance.combatant));
        assert_eq!(c.hp, balance.combatant.max_hp);
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let (mut c, balance, _) = test_combatant();
        c.take_damage(10, &balance.combatant);
        c.heal(100);

        assert_eq!(c.hp, c.max_hp);
    }

    #[test]
    fn test_level_up_refills_and_promotes() {
        let (mut c, balance, _) = test_combatant();
        c.hp = 50;

        // Level 2
        assert!(c.grant_exp(10, &balance.combatant));
        assert_eq!(c.level, 2);
        assert_eq!(c.exp, 0);
        assert_eq!(c.max_hp, balance.combatant.max_hp + balance.combatant.hp_per_level);
        assert_eq!(c.hp, c.max_hp);
        assert_eq!(c.weapon_tier, 0);
        assert_eq!(c.next_level_exp, 15);

        // Level 3 unlocks the spread weapon
        assert!(c.grant_exp(15, &balance.combatant));
        assert_eq!(c.weapon_tier, 1);
        assert_eq!(
            c.bullet_damage(&balance.combatant),
            balance.combatant.bullet_damage + 2 * balance.combatant.damage_per_level
        );
    }

    #[test]
    fn test_trail_records_recent_positions() {
        let (mut c, balance, arena) = test_combatant();
        for _ in 0..TRAIL_LEN {
            c.update(
                0.1,
                Vec2::X,
                Vec3::new(50.0, 0.0, 0.0),
                false,
                false,
                &balance.combatant,
                &arena,
            );
        }

        let trail = c.trail();
        // Oldest-first: x positions strictly increase along the trail.
        for pair in trail.windows(2) {
            assert!(pair[0].x < pair[1].x);
        }
    }
}
