//! Game Module
//!
//! The complete arena simulation: data model, per-frame systems, and the
//! top-level phase state machine. Everything routes through
//! [`state::GameState`].

pub mod combatant;
pub mod config;
pub mod enemy;
pub mod input;
pub mod phase;
pub mod pool;
pub mod progression;
pub mod state;
pub mod systems;
pub mod types;

// Re-exports for the common entry points
pub use combatant::Combatant;
pub use config::{ArenaConfig, BalanceConfig};
pub use enemy::{Enemy, EnemyKind};
pub use input::{FrameInput, PlayerInput};
pub use phase::{GamePhase, PhaseMachine};
pub use progression::Progression;
pub use state::{FrameView, GameState};
pub use types::{Difficulty, GameMode, PlayerId};
