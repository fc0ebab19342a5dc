//! Enemy Module
//!
//! Pooled enemy slots and their per-frame AI. An enemy is either airborne
//! (only vertical motion integrates, under constant gravity) or grounded
//! (seek-and-attack motion) — never both in the same frame. Stats come from
//! the balance tables at spawn time so this module has no inline tuning.

use glam::Vec3;

use crate::game::pool::PoolSlot;
use crate::physics::collision::Aabb;

/// Enemy type tiers, increasing in size and hp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyKind {
    #[default]
    Drone,
    Tank,
    Boss,
}

/// Parameters applied to a slot when it is claimed.
#[derive(Debug, Clone, Copy)]
pub struct EnemySpawnParams {
    pub kind: EnemyKind,
    pub position: Vec3,
    /// Airborne spawns fall under gravity until they touch the ground.
    pub airborne: bool,
    pub speed: f32,
    pub max_hp: f32,
    pub contact_damage: i32,
    pub exp_reward: i32,
    /// Ranged attack reach; `None` disarms the ranged attack.
    pub attack_range: Option<f32>,
    pub shoot_interval: f32,
    pub bullet_damage: i32,
}

/// What an enemy did this frame; the caller applies the consequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnemyStep {
    /// Touched down this frame (landing dust + press-hit check).
    pub landed: bool,
    /// Within melee range of the target; attempt one contact hit.
    pub melee_attack: bool,
    /// Ranged attack triggered; fire a bullet toward the target.
    pub fire: bool,
}

/// One pooled enemy slot.
#[derive(Debug, Clone, Default)]
pub struct Enemy {
    pub active: bool,
    pub kind: EnemyKind,
    pub position: Vec3,
    pub speed: f32,
    pub hp: f32,
    pub max_hp: f32,
    /// Accumulated impulse from bullet hits; decays geometrically.
    pub knockback: Vec3,
    /// Hit-flash presentation timer.
    pub flash_timer: f32,
    /// Walk-cycle timer, advances only while grounded.
    pub anim_timer: f32,
    /// Downward speed while airborne.
    pub vertical_speed: f32,
    pub is_grounded: bool,
    pub shoot_cooldown: f32,
    shoot_interval: f32,
    pub attack_range: Option<f32>,
    pub contact_damage: i32,
    pub bullet_damage: i32,
    pub exp_reward: i32,
}

impl PoolSlot for Enemy {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Knockback impulse magnitude added per bullet hit.
pub const KNOCKBACK_IMPULSE: f32 = 20.0;
/// Per-frame geometric decay factor; never explicitly zeroed.
pub const KNOCKBACK_DECAY: f32 = 0.85;
/// Hit-flash duration after taking a bullet.
pub const FLASH_DURATION: f32 = 0.1;

impl Enemy {
    /// Re-initialize a claimed slot. Every field is overwritten — pool slots
    /// keep stale data from their previous occupant.
    pub fn init(&mut self, params: EnemySpawnParams) {
        self.active = true;
        self.kind = params.kind;
        self.position = params.position;
        self.speed = params.speed;
        self.hp = params.max_hp;
        self.max_hp = params.max_hp;
        self.knockback = Vec3::ZERO;
        self.flash_timer = 0.0;
        self.anim_timer = 0.0;
        self.vertical_speed = 0.0;
        self.is_grounded = !params.airborne;
        self.shoot_cooldown = params.shoot_interval;
        self.shoot_interval = params.shoot_interval;
        self.attack_range = params.attack_range;
        self.contact_damage = params.contact_damage;
        self.bullet_damage = params.bullet_damage;
        self.exp_reward = params.exp_reward;
    }

    /// Bullet hit-box: a box around the mech, doubled for the boss.
    pub fn hit_box(&self) -> Aabb {
        let (half_xz, height) = match self.kind {
            EnemyKind::Boss => (2.0, 4.0),
            _ => (1.0, 2.0),
        };
        Aabb::from_center(
            Vec3::new(self.position.x, height * 0.5, self.position.z),
            Vec3::new(half_xz, height * 0.5, half_xz),
        )
    }

    /// Add a knockback impulse. Bosses hold their ground.
    pub fn apply_knockback(&mut self, direction: Vec3) {
        if self.kind != EnemyKind::Boss {
            self.knockback += direction * KNOCKBACK_IMPULSE;
        }
    }

    /// Subtract hp and start the hit flash. Returns `true` on death.
    ///
    /// Enemies die only through damage, never on their own.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.hp -= amount;
        self.flash_timer = FLASH_DURATION;
        self.hp <= 0.0
    }

    pub fn hp_ratio(&self) -> f32 {
        if self.max_hp <= 0.0 {
            0.0
        } else {
            (self.hp / self.max_hp).max(0.0)
        }
    }

    /// Advance one frame of AI.
    ///
    /// `target` is the position of the combatant this enemy is hunting and
    /// `melee_range` the contact-damage threshold. Airborne enemies only
    /// fall; the frame they land they still do not move horizontally.
    pub fn update(&mut self, dt: f32, gravity: f32, target: Vec3, melee_range: f32) -> EnemyStep {
        let mut step = EnemyStep::default();

        if !self.is_grounded {
            self.vertical_speed -= gravity * dt;
            self.position.y += self.vertical_speed * dt;
            if self.position.y <= 0.0 {
                self.position.y = 0.0;
                self.is_grounded = true;
                self.vertical_speed = 0.0;
                step.landed = true;
            }
            return step;
        }

        self.anim_timer += dt;
        if self.flash_timer > 0.0 {
            self.flash_timer -= dt;
        }

        let to_target = target - self.position;
        let dist = to_target.length();
        let seek_dir = to_target.normalize_or_zero();

        // Seek plus the decaying knockback contribution. The decay is
        // geometric and asymptotic, never explicitly zeroed.
        self.position += seek_dir * (self.speed * dt) + self.knockback * dt;
        self.knockback *= KNOCKBACK_DECAY;

        if dist < melee_range {
            step.melee_attack = true;
        }

        if let Some(range) = self.attack_range {
            self.shoot_cooldown = (self.shoot_cooldown - dt).max(0.0);
            if dist <= range && self.shoot_cooldown <= 0.0 {
                self.shoot_cooldown = self.shoot_interval;
                step.fire = true;
            }
        }

        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drone_at(position: Vec3, airborne: bool) -> Enemy {
        let mut enemy = Enemy::default();
        enemy.init(EnemySpawnParams {
            kind: EnemyKind::Drone,
            position,
            airborne,
            speed: 7.0,
            max_hp: 20.0,
            contact_damage: 5,
            exp_reward: 10,
            attack_range: None,
            shoot_interval: 0.0,
            bullet_damage: 0,
        });
        enemy
    }

    fn boss_at(position: Vec3) -> Enemy {
        let mut enemy = Enemy::default();
        enemy.init(EnemySpawnParams {
            kind: EnemyKind::Boss,
            position,
            airborne: false,
            speed: 2.5,
            max_hp: 500.0,
            contact_damage: 15,
            exp_reward: 0,
            attack_range: Some(25.0),
            shoot_interval: 1.2,
            bullet_damage: 8,
        });
        enemy
    }

    #[test]
    fn test_airborne_enemy_only_falls() {
        let mut enemy = drone_at(Vec3::new(5.0, 20.0, 5.0), true);
        let step = enemy.update(0.1, 40.0, Vec3::ZERO, 1.5);

        assert!(!step.landed);
        assert!(!enemy.is_grounded);
        assert!(enemy.position.y < 20.0);
        // No horizontal motion while airborne.
        assert_eq!(enemy.position.x, 5.0);
        assert_eq!(enemy.position.z, 5.0);
    }

    #[test]
    fn test_landing_snaps_to_ground() {
        let mut enemy = drone_at(Vec3::new(0.0, 0.5, 0.0), true);
        enemy.vertical_speed = -20.0;

        let step = enemy.update(0.1, 40.0, Vec3::new(10.0, 0.0, 0.0), 1.5);
        assert!(step.landed);
        assert!(enemy.is_grounded);
        assert_eq!(enemy.position.y, 0.0);
        // Landing frame still performs no horizontal seek.
        assert_eq!(enemy.position.x, 0.0);
    }

    #[test]
    fn test_grounded_enemy_seeks_target() {
        let mut enemy = drone_at(Vec3::ZERO, false);
        enemy.update(0.1, 40.0, Vec3::new(10.0, 0.0, 0.0), 1.5);

        assert!(enemy.position.x > 0.0);
        assert_eq!(enemy.position.y, 0.0);
    }

    #[test]
    fn test_melee_flag_inside_range() {
        let mut enemy = drone_at(Vec3::ZERO, false);
        let step = enemy.update(0.016, 40.0, Vec3::ZERO, 1.5);

        assert!(step.melee_attack);
    }

    #[test]
    fn test_knockback_decays_geometrically() {
        let mut enemy = drone_at(Vec3::ZERO, false);
        enemy.apply_knockback(Vec3::X);
        assert_eq!(enemy.knockback.x, KNOCKBACK_IMPULSE);

        enemy.update(0.016, 40.0, Vec3::new(100.0, 0.0, 0.0), 1.5);
        assert!((enemy.knockback.x - KNOCKBACK_IMPULSE * KNOCKBACK_DECAY).abs() < 1e-4);
    }

    #[test]
    fn test_boss_is_knockback_exempt() {
        let mut boss = boss_at(Vec3::ZERO);
        boss.apply_knockback(Vec3::X);

        assert_eq!(boss.knockback, Vec3::ZERO);
    }

    #[test]
    fn test_ranged_attack_cadence() {
        let mut boss = boss_at(Vec3::ZERO);
        let target = Vec3::new(10.0, 0.0, 0.0);

        // Initial cooldown must elapse first.
        let step = boss.update(0.016, 40.0, target, 1.5);
        assert!(!step.fire);

        let step = boss.update(1.3, 40.0, target, 1.5);
        assert!(step.fire);

        // Cooldown resets after firing.
        let step = boss.update(0.016, 40.0, target, 1.5);
        assert!(!step.fire);
    }

    #[test]
    fn test_ranged_attack_requires_range() {
        let mut boss = boss_at(Vec3::ZERO);
        let step = boss.update(2.0, 40.0, Vec3::new(100.0, 0.0, 0.0), 1.5);

        assert!(!step.fire);
    }

    #[test]
    fn test_boss_hit_box_is_larger() {
        let drone = drone_at(Vec3::ZERO, false);
        let boss = boss_at(Vec3::ZERO);

        assert!(boss.hit_box().max.y > drone.hit_box().max.y);
        assert!(boss.hit_box().max.x > drone.hit_box().max.x);
    }

    #[test]
    fn test_damage_and_death() {
        let mut enemy = drone_at(Vec3::ZERO, false);

        assert!(!enemy.take_damage(10.0));
        assert!(enemy.flash_timer > 0.0);
        assert!(enemy.take_damage(10.0));
    }
}
