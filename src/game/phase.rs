//! Game phase state machine.
//!
//! Exactly one phase is active at a time. Transitions fire synchronously
//! within the frame that detects their trigger, never deferred. Pausing
//! stores the interrupted phase in a depth-1 slot and resumes into exactly
//! that phase — pausing during BossIntro or StageClear must not silently
//! drop the game back to Playing.

use crate::game::types::PlayerId;

/// One state of the top-level game state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Title,
    /// Single-player survival.
    Playing,
    /// Local two-player duel.
    Versus,
    /// Timed window between quota completion and boss spawn.
    BossIntro,
    /// Timed celebration after a boss kill, before the next stage.
    StageClear,
    GameOver,
    /// Versus result screen; records the surviving side.
    VersusResult(PlayerId),
    Paused,
}

impl GamePhase {
    /// Phases from which the pause toggle is honored.
    pub fn pausable(self) -> bool {
        matches!(
            self,
            GamePhase::Playing | GamePhase::Versus | GamePhase::BossIntro | GamePhase::StageClear
        )
    }
}

/// The phase machine: current phase, a depth-1 interrupted slot for pause,
/// and a generic elapsed timer reused by the timed phases.
#[derive(Debug, Clone)]
pub struct PhaseMachine {
    phase: GamePhase,
    /// Phase interrupted by pause; depth 1 is sufficient since Paused
    /// itself is not pausable.
    interrupted: Option<GamePhase>,
    /// Seconds spent in the current phase (drives BossIntro/StageClear).
    pub elapsed: f32,
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Title,
            interrupted: None,
            elapsed: 0.0,
        }
    }

    pub fn current(&self) -> GamePhase {
        self.phase
    }

    /// Enter `next`, resetting the phase timer.
    pub fn transition(&mut self, next: GamePhase) {
        if self.phase == next {
            return;
        }
        log::debug!("phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
        self.elapsed = 0.0;
    }

    /// Advance the phase timer (call once per unpaused frame).
    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Toggle pause. Ignored in non-pausable phases; resuming restores
    /// exactly the interrupted phase with its timer intact.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Paused => {
                if let Some(previous) = self.interrupted.take() {
                    log::debug!("resume into {previous:?}");
                    self.phase = previous;
                }
            }
            phase if phase.pausable() => {
                self.interrupted = Some(phase);
                self.phase = GamePhase::Paused;
            }
            _ => {}
        }
    }
}
