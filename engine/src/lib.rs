//! Skyfall Engine Library
//!
//! Simulation core for a top-down 3D mech arena survival game.  The crate
//! owns the full per-frame game logic — combatants, enemy AI, projectiles,
//! spawning, collision resolution, stage progression, and the top-level
//! phase state machine.  Rendering, window management, and raw input are
//! external collaborators: they read a [`game::state::FrameView`] after each
//! update and feed abstracted intent back in via [`game::input::FrameInput`].
//!
//! # Modules
//!
//! - [`physics`] - Overlap primitives (sphere/sphere, box/sphere)
//! - [`game`] - All gameplay systems and the central [`game::GameState`]
//!
//! # Example
//!
//! ```ignore
//! use skyfall_engine::game::{GameState, GameMode, Difficulty};
//! use skyfall_engine::game::input::FrameInput;
//!
//! let mut state = GameState::new();
//! state.start_game(GameMode::Survival, Difficulty::Normal);
//!
//! // Once per frame:
//! let input = FrameInput::default();
//! state.update(1.0 / 60.0, &input);
//! let view = state.frame_view();
//! ```

pub mod physics;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export the entry-point types at crate level for convenience
pub use game::input::{FrameInput, PlayerInput};
pub use game::phase::GamePhase;
pub use game::state::{FrameView, GameState};
pub use game::types::{Difficulty, GameMode, PlayerId};
