//! Game Configuration
//!
//! Centralized tuning for the simulation: per-type combat stats in
//! [`BalanceConfig`], arena layout / pool capacities / spawn pacing in
//! [`ArenaConfig`]. `Default` for every struct reproduces the shipped
//! balance; both can also be loaded from JSON for tuning without rebuilds.

pub mod arena;
pub mod balance;

use std::path::Path;

use serde::de::DeserializeOwned;

pub use arena::ArenaConfig;
pub use balance::{
    BalanceConfig, BossBalance, CombatantBalance, DashBalance, EnemyKindBalance, PickupBalance,
    StageBalance, WeaponTier,
};

/// Errors from loading a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load any config struct from a JSON file.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
