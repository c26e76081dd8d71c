//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Capped delta time only
//! - Seeded RNG only
//! - No rendering, audio, or platform dependencies

pub mod collision;
pub mod formation;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::resolve_collisions;
pub use formation::step_formation;
pub use state::{
    Bullet, BulletOwner, Enemy, FrameResult, GameEvent, GamePhase, GameState, Player, Rect,
    SpriteId,
};
pub use tick::{TickInput, tick};
pub use wave::{formation_cleared, reset_game, rows_for_level, spawn_wave};
