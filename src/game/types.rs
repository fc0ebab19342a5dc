//! Shared Types Module
//!
//! Small enums and identifiers shared across game modules.

use serde::{Deserialize, Serialize};

/// Top-level game mode, selected once on the title screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Single-player wave survival with stages and bosses.
    Survival,
    /// Local two-player duel. No enemies, no progression.
    Versus,
}

/// Difficulty selected once at game start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Normal,
    /// Faster spawns, airborne drop-in enemies, ranged tanks.
    Hard,
}

/// Identifies one of the (up to) two controlled combatants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

/// Who fired a bullet. Determines which targets it can damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOwner {
    Player(PlayerId),
    Enemy,
}

impl BulletOwner {
    /// True for bullets fired by either controlled combatant.
    pub fn is_player(self) -> bool {
        matches!(self, BulletOwner::Player(_))
    }
}
