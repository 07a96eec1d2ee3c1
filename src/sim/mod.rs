//! Gameplay simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Arena dimensions are passed in explicitly, never read from globals
//! - Frame-time scaled steps (not fixed-step deterministic)
//! - Seeded RNG only (cosmetic particle scatter)

pub mod arena;
pub mod collision;
pub mod entity;
pub mod particles;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use collision::{CollisionReport, MalletContact, resolve, resolve_mallet};
pub use entity::{Body, Color, Integrate, Mallet, Particle, Player, Puck};
pub use particles::ParticlePool;
pub use state::{MatchPhase, MatchState, RespawnHandle, Score};
pub use tick::{FrameState, GameEvent, Pointer, Simulation, TickInput};
