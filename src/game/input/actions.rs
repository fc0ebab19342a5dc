//! Input Actions
//!
//! Defines the abstracted input intent for decoupled input handling.
//! Movement is a raw planar vector (the combatant normalizes it), the aim
//! point is already resolved to world space by the caller's camera ray, and
//! dash/pause are edge events — true only on the frame they were pressed.

use glam::{Vec2, Vec3};

/// One controlled combatant's intent for a single frame.
#[derive(Debug, Clone, Copy)]
pub struct PlayerInput {
    /// Planar movement intent on the XZ ground plane. Need not be
    /// normalized; zero means no movement.
    pub move_dir: Vec2,
    /// World-space point the combatant is aiming at (ground plane).
    pub aim_point: Vec3,
    /// Dash was pressed this frame (edge, not held).
    pub dash_pressed: bool,
    /// Fire button is currently held.
    pub fire_held: bool,
}

impl Default for PlayerInput {
    fn default() -> Self {
        Self {
            move_dir: Vec2::ZERO,
            // A default aim straight ahead keeps facing math well-defined.
            aim_point: Vec3::new(0.0, 0.0, -1.0),
            dash_pressed: false,
            fire_held: false,
        }
    }
}

impl PlayerInput {
    /// Normalized planar movement direction, or zero if there is no input
    /// (so diagonal input is never faster than cardinal input).
    pub fn move_direction(&self) -> Vec2 {
        self.move_dir.normalize_or_zero()
    }
}

/// Full input for one simulation frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Intent per combatant; slot 1 is ignored outside Versus mode.
    pub players: [PlayerInput; 2],
    /// Pause was toggled this frame (edge event).
    pub pause_pressed: bool,
}
