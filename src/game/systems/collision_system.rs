//! Collision & damage resolver.
//!
//! Runs once per frame, after all motion has integrated, in a fixed order:
//! bullets against combatants, then bullets against enemies, then pickups
//! against players. Damage, death consequences, knockback, and effect
//! bursts are all applied here in the same pass, so a kill and its drops
//! land on the frame the fatal hit connects.

use glam::Vec3;
use rand::Rng;

use crate::game::combatant::Combatant;
use crate::game::config::BalanceConfig;
use crate::game::enemy::{Enemy, EnemyKind};
use crate::game::pool::SlotPool;
use crate::game::systems::bullet_system::{BULLET_RADIUS, BulletSystem};
use crate::game::systems::particle_system::{
    COLOR_ORANGE, COLOR_PURPLE, COLOR_RED, COLOR_YELLOW, ParticleSystem,
};
use crate::game::systems::pickup_system::{PickupKind, PickupSystem};
use crate::game::types::BulletOwner;
use crate::physics::collision::{check_box_sphere, check_sphere_sphere};

/// Combatant body sphere radius for bullet overlap tests.
const COMBATANT_RADIUS: f32 = 1.0;
/// Combatant body center sits at chest height.
const COMBATANT_CENTER_HEIGHT: f32 = 1.0;

/// What the resolver decided this frame; the caller owns the phase
/// transitions these imply.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionOutcome {
    /// Per-combatant death flags (index = PlayerId::index()).
    pub deaths: [bool; 2],
    /// The boss was destroyed this frame.
    pub boss_died: bool,
    /// Regular enemies killed this frame (kill credit for the quota).
    pub kills: u32,
}

/// Stateless resolver over all collision pairs.
pub struct CollisionSystem;

impl CollisionSystem {
    /// Resolve every pairwise interaction for this frame.
    pub fn resolve(
        combatants: &mut [Combatant],
        enemies: &mut SlotPool<Enemy>,
        bullets: &mut BulletSystem,
        pickups: &mut PickupSystem,
        particles: &mut ParticleSystem,
        balance: &BalanceConfig,
        rng: &mut impl Rng,
    ) -> CollisionOutcome {
        let mut outcome = CollisionOutcome::default();

        // Snapshot bullet slots once; `consumed` keeps a bullet from
        // damaging a second target after its slot has been released.
        let mut bullet_shots = bullets.snapshot();

        // 1. Bullets vs combatants. A bullet never damages its own firer;
        //    dash and post-hit invincibility let bullets pass through.
        for (index, bullet) in bullet_shots.iter_mut() {
            for combatant in combatants.iter_mut() {
                if bullet.owner == BulletOwner::Player(combatant.id) {
                    continue;
                }
                let center = combatant.position + Vec3::Y * COMBATANT_CENTER_HEIGHT;
                if !check_sphere_sphere(bullet.position, BULLET_RADIUS, center, COMBATANT_RADIUS) {
                    continue;
                }
                if combatant.take_damage(bullet.damage, &balance.combatant) {
                    bullets.release(*index);
                    bullet.active = false;
                    particles.burst(bullet.position, COLOR_RED, 2, rng);
                    if combatant.is_dead() {
                        outcome.deaths[combatant.id.index()] = true;
                    }
                    break;
                }
            }
        }

        // 2. Player bullets vs enemy hit-boxes. Airborne enemies are still
        //    falling and cannot be shot until they land.
        for enemy_index in 0..enemies.capacity() {
            let Some(enemy) = enemies.get_mut(enemy_index) else {
                break;
            };
            if !enemy.active || !enemy.is_grounded {
                continue;
            }
            let hit_box = enemy.hit_box();

            for (bullet_index, bullet) in bullet_shots.iter_mut() {
                if !bullet.active || !bullet.owner.is_player() {
                    continue;
                }
                if !check_box_sphere(&hit_box, bullet.position, BULLET_RADIUS) {
                    continue;
                }

                bullets.release(*bullet_index);
                bullet.active = false;
                enemy.apply_knockback(bullet.velocity.normalize_or_zero());
                particles.burst(bullet.position, COLOR_YELLOW, 2, rng);

                if enemy.take_damage(bullet.damage as f32) {
                    enemy.active = false;
                    let position = enemy.position;
                    let kind = enemy.kind;
                    let exp_reward = enemy.exp_reward;

                    match kind {
                        EnemyKind::Boss => {
                            particles.burst(position, COLOR_PURPLE, 10, rng);
                            outcome.boss_died = true;
                        }
                        EnemyKind::Tank | EnemyKind::Drone => {
                            let color = if kind == EnemyKind::Tank {
                                COLOR_RED
                            } else {
                                COLOR_ORANGE
                            };
                            particles.burst(position, color, 10, rng);
                            outcome.kills += 1;
                            pickups.roll_drop(position, &balance.pickup, rng);
                            // Kill credit and exp go to whoever fired.
                            if let BulletOwner::Player(id) = bullet.owner {
                                if let Some(shooter) =
                                    combatants.iter_mut().find(|c| c.id == id)
                                {
                                    shooter.grant_exp(exp_reward, &balance.combatant);
                                }
                            }
                        }
                    }
                    break;
                }
            }
        }

        // 3. Pickups vs players (proximity collection).
        for (index, pickup) in pickups.snapshot() {
            for combatant in combatants.iter_mut() {
                if !check_sphere_sphere(
                    pickup.position,
                    balance.pickup.pickup_radius,
                    combatant.position,
                    0.0,
                ) {
                    continue;
                }
                match pickup.kind {
                    PickupKind::Heal => combatant.heal(balance.pickup.heal_amount),
                    PickupKind::Experience => {
                        combatant.grant_exp(balance.pickup.exp_amount, &balance.combatant);
                    }
                }
                pickups.release(index);
                break;
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::enemy::EnemySpawnParams;
    use crate::game::types::PlayerId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn world() -> (
        Vec<Combatant>,
        SlotPool<Enemy>,
        BulletSystem,
        PickupSystem,
        ParticleSystem,
        BalanceConfig,
        StdRng,
    ) {
        let balance = BalanceConfig::default();
        let combatants = vec![Combatant::new(
            PlayerId::One,
            Vec3::ZERO,
            &balance.combatant,
            false,
        )];
        (
            combatants,
            SlotPool::new(16),
            BulletSystem::new(32),
            PickupSystem::new(8),
            ParticleSystem::new(128),
            balance,
            StdRng::seed_from_u64(3),
        )
    }

    fn spawn_drone(enemies: &mut SlotPool<Enemy>, position: Vec3) {
        enemies.acquire().unwrap().init(EnemySpawnParams {
            kind: EnemyKind::Drone,
            position,
            airborne: false,
            speed: 7.0,
            max_hp: 20.0,
            contact_damage: 5,
            exp_reward: 10,
            attack_range: None,
            shoot_interval: 0.0,
            bullet_damage: 0,
        });
    }

    #[test]
    fn test_falling_enemy_cannot_be_shot() {
        let (mut combatants, mut enemies, mut bullets, mut pickups, mut particles, balance, mut rng) =
            world();
        enemies.acquire().unwrap().init(EnemySpawnParams {
            kind: EnemyKind::Drone,
            position: Vec3::new(5.0, 20.0, 0.0),
            airborne: true,
            speed: 7.0,
            max_hp: 20.0,
            contact_damage: 5,
            exp_reward: 10,
            attack_range: None,
            shoot_interval: 0.0,
            bullet_damage: 0,
        });
        // A bullet passing far below the falling enemy on the ground plane.
        bullets.fire(
            Vec3::new(5.0, 1.5, 0.0),
            Vec3::X,
            30.0,
            1.0,
            10,
            BulletOwner::Player(PlayerId::One),
        );

        CollisionSystem::resolve(
            &mut combatants,
            &mut enemies,
            &mut bullets,
            &mut pickups,
            &mut particles,
            &balance,
            &mut rng,
        );

        let enemy = enemies.iter().next().unwrap();
        assert_eq!(enemy.hp, 20.0);
        assert_eq!(bullets.active_count(), 1);
    }

    #[test]
    fn test_bullet_hits_enemy_once() {
        let (mut combatants, mut enemies, mut bullets, mut pickups, mut particles, balance, mut rng) =
            world();
        spawn_drone(&mut enemies, Vec3::new(5.0, 0.0, 0.0));
        // Two overlapping enemies: one bullet may only damage one.
        spawn_drone(&mut enemies, Vec3::new(5.2, 0.0, 0.0));
        bullets.fire(
            Vec3::new(5.0, 1.0, 0.0),
            Vec3::X,
            30.0,
            1.0,
            10,
            BulletOwner::Player(PlayerId::One),
        );

        let outcome = CollisionSystem::resolve(
            &mut combatants,
            &mut enemies,
            &mut bullets,
            &mut pickups,
            &mut particles,
            &balance,
            &mut rng,
        );

        assert_eq!(outcome.kills, 0);
        assert_eq!(bullets.active_count(), 0);
        let damaged: Vec<f32> = enemies.iter().map(|e| e.hp).collect();
        assert_eq!(damaged.iter().filter(|&&hp| hp < 20.0).count(), 1);
    }

    #[test]
    fn test_bullet_kill_grants_exp_and_knockback() {
        let (mut combatants, mut enemies, mut bullets, mut pickups, mut particles, balance, mut rng) =
            world();
        spawn_drone(&mut enemies, Vec3::new(5.0, 0.0, 0.0));
        // Weaken the drone so one bullet finishes it.
        enemies.get_mut(0).unwrap().hp = 5.0;
        bullets.fire(
            Vec3::new(5.0, 1.0, 0.0),
            Vec3::X,
            30.0,
            1.0,
            10,
            BulletOwner::Player(PlayerId::One),
        );

        let outcome = CollisionSystem::resolve(
            &mut combatants,
            &mut enemies,
            &mut bullets,
            &mut pickups,
            &mut particles,
            &balance,
            &mut rng,
        );

        assert_eq!(outcome.kills, 1);
        assert_eq!(enemies.active_count(), 0);
        // The drone's 10 exp meets the level-1 threshold exactly, so the
        // shooter levels up and the counter resets.
        assert_eq!(combatants[0].level, 2);
        assert_eq!(combatants[0].exp, 0);
    }

    #[test]
    fn test_surviving_enemy_receives_knockback() {
        let (mut combatants, mut enemies, mut bullets, mut pickups, mut particles, balance, mut rng) =
            world();
        spawn_drone(&mut enemies, Vec3::new(5.0, 0.0, 0.0));
        bullets.fire(
            Vec3::new(5.0, 1.0, 0.0),
            Vec3::X,
            30.0,
            1.0,
            10,
            BulletOwner::Player(PlayerId::One),
        );

        CollisionSystem::resolve(
            &mut combatants,
            &mut enemies,
            &mut bullets,
            &mut pickups,
            &mut particles,
            &balance,
            &mut rng,
        );

        let enemy = enemies.iter().next().unwrap();
        assert!(enemy.knockback.x > 0.0);
        assert!(enemy.flash_timer > 0.0);
    }

    #[test]
    fn test_enemy_bullet_damages_player() {
        let (mut combatants, mut enemies, mut bullets, mut pickups, mut particles, balance, mut rng) =
            world();
        bullets.fire(Vec3::new(0.0, 1.0, 0.0), Vec3::X, 30.0, 1.0, 5, BulletOwner::Enemy);

        let outcome = CollisionSystem::resolve(
            &mut combatants,
            &mut enemies,
            &mut bullets,
            &mut pickups,
            &mut particles,
            &balance,
            &mut rng,
        );

        assert_eq!(combatants[0].hp, balance.combatant.max_hp - 5);
        assert!(combatants[0].invincibility_timer > 0.0);
        assert_eq!(bullets.active_count(), 0);
        assert!(!outcome.deaths[0]);
    }

    #[test]
    fn test_own_bullet_never_hurts_firer() {
        let (mut combatants, mut enemies, mut bullets, mut pickups, mut particles, balance, mut rng) =
            world();
        bullets.fire(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::X,
            30.0,
            1.0,
            10,
            BulletOwner::Player(PlayerId::One),
        );

        CollisionSystem::resolve(
            &mut combatants,
            &mut enemies,
            &mut bullets,
            &mut pickups,
            &mut particles,
            &balance,
            &mut rng,
        );

        assert_eq!(combatants[0].hp, balance.combatant.max_hp);
        assert_eq!(bullets.active_count(), 1);
    }

    #[test]
    fn test_dashing_player_ignores_bullets() {
        let (mut combatants, mut enemies, mut bullets, mut pickups, mut particles, balance, mut rng) =
            world();
        combatants[0].dash_duration = 0.2;
        bullets.fire(Vec3::new(0.0, 1.0, 0.0), Vec3::X, 30.0, 1.0, 5, BulletOwner::Enemy);

        CollisionSystem::resolve(
            &mut combatants,
            &mut enemies,
            &mut bullets,
            &mut pickups,
            &mut particles,
            &balance,
            &mut rng,
        );

        assert_eq!(combatants[0].hp, balance.combatant.max_hp);
        // Immunity lets the bullet pass through rather than consuming it.
        assert_eq!(bullets.active_count(), 1);
    }

    #[test]
    fn test_boss_death_reported_without_kill_credit() {
        let (mut combatants, mut enemies, mut bullets, mut pickups, mut particles, balance, mut rng) =
            world();
        enemies.acquire().unwrap().init(EnemySpawnParams {
            kind: EnemyKind::Boss,
            position: Vec3::new(5.0, 0.0, 0.0),
            airborne: false,
            speed: 2.5,
            max_hp: 10.0,
            contact_damage: 15,
            exp_reward: 0,
            attack_range: Some(25.0),
            shoot_interval: 1.2,
            bullet_damage: 8,
        });
        bullets.fire(
            Vec3::new(5.0, 1.0, 0.0),
            Vec3::X,
            30.0,
            1.0,
            10,
            BulletOwner::Player(PlayerId::One),
        );

        let outcome = CollisionSystem::resolve(
            &mut combatants,
            &mut enemies,
            &mut bullets,
            &mut pickups,
            &mut particles,
            &balance,
            &mut rng,
        );

        assert!(outcome.boss_died);
        assert_eq!(outcome.kills, 0);
        assert_eq!(enemies.active_count(), 0);
    }

    #[test]
    fn test_pickup_collection() {
        let (mut combatants, mut enemies, mut bullets, mut pickups, mut particles, balance, mut rng) =
            world();
        combatants[0].hp = 50;
        pickups.spawn(Vec3::new(0.5, 0.0, 0.0), PickupKind::Heal, &balance.pickup);

        CollisionSystem::resolve(
            &mut combatants,
            &mut enemies,
            &mut bullets,
            &mut pickups,
            &mut particles,
            &balance,
            &mut rng,
        );

        assert_eq!(combatants[0].hp, 50 + balance.pickup.heal_amount);
        assert_eq!(pickups.active_count(), 0);
    }

    #[test]
    fn test_distant_pickup_not_collected() {
        let (mut combatants, mut enemies, mut bullets, mut pickups, mut particles, balance, mut rng) =
            world();
        pickups.spawn(Vec3::new(10.0, 0.0, 0.0), PickupKind::Heal, &balance.pickup);

        CollisionSystem::resolve(
            &mut combatants,
            &mut enemies,
            &mut bullets,
            &mut pickups,
            &mut particles,
            &balance,
            &mut rng,
        );

        assert_eq!(pickups.active_count(), 1);
    }
}
