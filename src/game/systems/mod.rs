//! Game Systems
//!
//! Extracted per-concern systems composed by [`crate::game::state::GameState`].
//! Each owns one entity pool (or is stateless, like the collision resolver)
//! and exposes spawn / update / clear / iterate operations.

pub mod bullet_system;
pub mod collision_system;
pub mod particle_system;
pub mod pickup_system;
pub mod spawn_system;

pub use bullet_system::{Bullet, BulletSystem};
pub use collision_system::{CollisionOutcome, CollisionSystem};
pub use particle_system::{Particle, ParticleSystem};
pub use pickup_system::{Pickup, PickupKind, PickupSystem};
pub use spawn_system::SpawnDirector;
