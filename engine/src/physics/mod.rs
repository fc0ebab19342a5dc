//! Physics module for the Skyfall engine
//!
//! Overlap primitives for the arena simulation, built from scratch without
//! an external physics library dependency (no Rapier).  The game only needs
//! two tests per frame: sphere-vs-sphere (bullets against combatants,
//! pickups against players) and AABB-vs-sphere (bullets against enemy
//! hit-boxes), so that is all this module provides.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²

pub mod collision;

// Re-export commonly used types at the physics module level
pub use collision::{Aabb, check_box_sphere, check_sphere_sphere};
