//! Balance Configuration
//!
//! Per-type combat stat tables. Keeping every damage number, cooldown, and
//! scaling factor here — instead of inline where it is consumed — makes the
//! tuning centralized and testable. `Default` reproduces the shipped balance.

use serde::{Deserialize, Serialize};

/// One weapon tier: fire cadence and spread.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeaponTier {
    /// Seconds between shots.
    pub cooldown: f32,
    /// Random spread half-angle in radians (0 = perfectly straight).
    pub spread: f32,
}

/// Dash tuning for a controlled combatant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DashBalance {
    /// Seconds the dash lasts.
    pub duration: f32,
    /// Recharge window in survival mode.
    pub cooldown_survival: f32,
    /// Recharge window in versus mode (slightly forgiving for duels).
    pub cooldown_versus: f32,
    /// Speed multiplier applied to base speed while dashing.
    pub speed_multiplier: f32,
}

/// Controlled-combatant stats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CombatantBalance {
    /// Planar movement speed (m/s).
    pub speed: f32,
    pub max_hp: i32,
    /// Seconds of invulnerability after taking a hit.
    pub invincibility_window: f32,
    /// Base bullet damage at level 1.
    pub bullet_damage: i32,
    /// Extra bullet damage per level gained.
    pub damage_per_level: i32,
    /// Max-hp increase per level gained (hp also refills on level-up).
    pub hp_per_level: i32,
    /// Experience required for the first level-up.
    pub base_next_level_exp: i32,
    /// Threshold multiplier applied after each level-up.
    pub exp_growth: f32,
    /// Level at which the combatant is promoted to weapon tier 1.
    pub spread_weapon_level: i32,
    pub dash: DashBalance,
    /// Tier 0 then tier 1; the active tier is picked by level.
    pub weapon_tiers: [WeaponTier; 2],
    /// Bullet muzzle speed (m/s). Bullets travel horizontally at height 1.5.
    pub bullet_speed: f32,
    /// Seconds before an unspent bullet expires.
    pub bullet_lifetime: f32,
}

/// Stats for one regular enemy kind (drone or tank) at stage 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyKindBalance {
    pub speed: f32,
    pub max_hp: f32,
    /// Damage dealt by one melee contact hit.
    pub contact_damage: i32,
    /// Experience awarded on kill.
    pub exp_reward: i32,
    /// Ranged attack reach; `None` means melee only.
    pub attack_range: Option<f32>,
    /// Seconds between ranged shots (unused when `attack_range` is `None`).
    pub shoot_cooldown: f32,
    /// Damage per ranged bullet.
    pub bullet_damage: i32,
}

/// Boss stats. HP scales per stage; exactly one boss exists at a time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BossBalance {
    pub speed: f32,
    pub base_hp: f32,
    /// Additional hp per stage after the first.
    pub hp_per_stage: f32,
    pub contact_damage: i32,
    pub attack_range: f32,
    pub shoot_cooldown: f32,
    pub bullet_damage: i32,
}

/// Stage progression and per-stage enemy scaling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StageBalance {
    /// Kills required to summon the stage-1 boss.
    pub base_kill_quota: u32,
    /// Extra kills required per stage after the first.
    pub kill_quota_per_stage: u32,
    /// Fractional hp increase per stage after the first (0.2 = +20%).
    pub enemy_hp_scaling: f32,
    /// Fractional speed increase per stage after the first.
    pub enemy_speed_scaling: f32,
    /// Seconds of boss-intro delay before the boss spawns.
    pub boss_intro_delay: f32,
    /// Seconds of stage-clear celebration before the next stage starts.
    pub stage_clear_delay: f32,
}

/// Pickup drop and effect tuning.
///
/// The heal/exp split is a tunable, not a contract — setting `exp_weight`
/// to 0 restores the heal-only behavior of earlier builds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PickupBalance {
    /// Chance that a regular enemy kill drops a pickup.
    pub drop_chance: f64,
    /// Relative weight of heal drops.
    pub heal_weight: u32,
    /// Relative weight of experience drops.
    pub exp_weight: u32,
    /// HP restored by a heal pickup (clamped to max hp).
    pub heal_amount: i32,
    /// Experience granted by an exp pickup.
    pub exp_amount: i32,
    /// Seconds before an uncollected pickup despawns.
    pub lifetime: f32,
    /// Collection radius around the player.
    pub pickup_radius: f32,
}

/// Central balance table for the entire simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BalanceConfig {
    pub combatant: CombatantBalance,
    pub drone: EnemyKindBalance,
    pub tank: EnemyKindBalance,
    pub boss: BossBalance,
    pub stage: StageBalance,
    pub pickup: PickupBalance,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            combatant: CombatantBalance {
                speed: 10.0,
                max_hp: 100,
                invincibility_window: 0.5,
                bullet_damage: 10,
                damage_per_level: 2,
                hp_per_level: 10,
                base_next_level_exp: 10,
                exp_growth: 1.5,
                spread_weapon_level: 3,
                dash: DashBalance {
                    duration: 0.2,
                    cooldown_survival: 2.0,
                    cooldown_versus: 1.5,
                    speed_multiplier: 3.0,
                },
                weapon_tiers: [
                    WeaponTier {
                        cooldown: 0.2,
                        spread: 0.0,
                    },
                    WeaponTier {
                        cooldown: 0.08,
                        spread: 15.0_f32.to_radians(),
                    },
                ],
                bullet_speed: 30.0,
                bullet_lifetime: 1.0,
            },
            drone: EnemyKindBalance {
                speed: 7.0,
                max_hp: 20.0,
                contact_damage: 5,
                exp_reward: 10,
                attack_range: None,
                shoot_cooldown: 0.0,
                bullet_damage: 0,
            },
            tank: EnemyKindBalance {
                speed: 3.0,
                max_hp: 100.0,
                contact_damage: 10,
                exp_reward: 50,
                // Range is only armed in Hard difficulty (spawn director).
                attack_range: Some(15.0),
                shoot_cooldown: 2.5,
                bullet_damage: 5,
            },
            boss: BossBalance {
                speed: 2.5,
                base_hp: 500.0,
                hp_per_stage: 250.0,
                contact_damage: 15,
                attack_range: 25.0,
                shoot_cooldown: 1.2,
                bullet_damage: 8,
            },
            stage: StageBalance {
                base_kill_quota: 10,
                kill_quota_per_stage: 5,
                enemy_hp_scaling: 0.2,
                enemy_speed_scaling: 0.05,
                boss_intro_delay: 2.0,
                stage_clear_delay: 3.0,
            },
            pickup: PickupBalance {
                drop_chance: 0.25,
                heal_weight: 60,
                exp_weight: 40,
                heal_amount: 25,
                exp_amount: 10,
                lifetime: 10.0,
                pickup_radius: 1.2,
            },
        }
    }
}

impl BalanceConfig {
    /// Kill quota for a given 1-based stage number.
    pub fn kill_quota(&self, stage: u32) -> u32 {
        self.stage.base_kill_quota + self.stage.kill_quota_per_stage * stage.saturating_sub(1)
    }

    /// Hp multiplier for regular enemies at a given stage.
    pub fn stage_hp_multiplier(&self, stage: u32) -> f32 {
        1.0 + self.stage.enemy_hp_scaling * stage.saturating_sub(1) as f32
    }

    /// Speed multiplier for regular enemies at a given stage.
    pub fn stage_speed_multiplier(&self, stage: u32) -> f32 {
        1.0 + self.stage.enemy_speed_scaling * stage.saturating_sub(1) as f32
    }

    /// Boss hp for a given stage.
    pub fn boss_hp(&self, stage: u32) -> f32 {
        self.boss.base_hp + self.boss.hp_per_stage * stage.saturating_sub(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kill_quota_scales_linearly() {
        let balance = BalanceConfig::default();

        assert_eq!(balance.kill_quota(1), 10);
        assert_eq!(balance.kill_quota(2), 15);
        assert_eq!(balance.kill_quota(5), 30);
    }

    #[test]
    fn test_stage_one_has_no_scaling() {
        let balance = BalanceConfig::default();

        assert_eq!(balance.stage_hp_multiplier(1), 1.0);
        assert_eq!(balance.stage_speed_multiplier(1), 1.0);
        assert_eq!(balance.boss_hp(1), balance.boss.base_hp);
    }

    #[test]
    fn test_boss_hp_scales_per_stage() {
        let balance = BalanceConfig::default();

        assert_eq!(balance.boss_hp(3), 500.0 + 2.0 * 250.0);
    }
}
