//! Stage / progression controller.
//!
//! Tracks the kill quota, boss gating, and stage advancement for survival
//! mode. The kill counter resets to exactly zero at stage start; the quota
//! grows linearly with the stage number; `boss_active` is true for exactly
//! the span between boss spawn and boss death.

use crate::game::config::BalanceConfig;

/// Survival-mode progression state.
#[derive(Debug, Clone)]
pub struct Progression {
    /// 1-based stage number.
    pub stage: u32,
    /// Kills accumulated this stage.
    pub stage_kills: u32,
    /// Kills required to summon this stage's boss.
    pub kills_required: u32,
    /// True between boss spawn and boss death.
    pub boss_active: bool,
}

impl Progression {
    pub fn new(balance: &BalanceConfig) -> Self {
        Self {
            stage: 1,
            stage_kills: 0,
            kills_required: balance.kill_quota(1),
            boss_active: false,
        }
    }

    /// Credit regular-enemy kills toward the quota.
    pub fn add_kills(&mut self, kills: u32) {
        self.stage_kills += kills;
    }

    /// True when the quota is met and no boss has been summoned yet.
    pub fn quota_met(&self) -> bool {
        !self.boss_active && self.stage_kills >= self.kills_required
    }

    /// Mark the boss as spawned. No second boss can spawn while one lives.
    pub fn boss_spawned(&mut self) {
        self.boss_active = true;
    }

    /// Mark the boss as dead (stage-clear condition).
    pub fn boss_killed(&mut self) {
        self.boss_active = false;
    }

    /// Start the next stage: bump the number, reset the counter, recompute
    /// the quota.
    pub fn advance_stage(&mut self, balance: &BalanceConfig) {
        self.stage += 1;
        self.stage_kills = 0;
        self.kills_required = balance.kill_quota(self.stage);
        log::info!(
            "stage {} started (quota {})",
            self.stage,
            self.kills_required
        );
    }
}
