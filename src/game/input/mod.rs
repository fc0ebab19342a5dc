//! Input Module
//!
//! Abstract per-frame intent consumed by the simulation. The core never
//! polls devices; the presentation layer translates keys/mouse/gamepad into
//! these structures.

pub mod actions;

pub use actions::{FrameInput, PlayerInput};
