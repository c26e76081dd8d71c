//! Gesture Invaders - a Space Invaders core driven by hand gestures
//!
//! Core modules:
//! - `gesture`: Hand-landmark signal processing (smoothing, pinch-to-fire,
//!   the cross-thread control mailbox, the capture thread)
//! - `sim`: Deterministic simulation (formation movement, collisions, waves)
//! - `session`: Wires the capture thread and the simulation loop together
//! - `highscore`: JSON highscore persistence
//! - `config`: Tuning constants grouped into one value

pub mod config;
pub mod gesture;
pub mod highscore;
pub mod session;
pub mod sim;

pub use config::Tuning;
pub use gesture::{ControlMailbox, GestureSample, SignalFilter};
pub use session::Session;

/// Screen and entity geometry constants
pub mod consts {
    /// Playfield dimensions in pixels
    pub const WIDTH: i32 = 900;
    pub const HEIGHT: i32 = 700;

    /// Target simulation tick rate
    pub const TICK_HZ: u32 = 60;

    /// Horizontal margin the formation reverses at
    pub const EDGE_MARGIN: i32 = 10;

    /// Player ship size and bounds
    pub const PLAYER_WIDTH: i32 = 100;
    pub const PLAYER_HEIGHT: i32 = 66;
    pub const PLAYER_MIN_X: i32 = 20;
    pub const PLAYER_MAX_X: i32 = WIDTH - 20;

    /// Enemy fallback size (used for hitboxes when no sprite is loaded)
    pub const ENEMY_WIDTH: i32 = 40;
    pub const ENEMY_HEIGHT: i32 = 30;

    /// Bullet size and speeds (px per tick at 60 Hz)
    pub const BULLET_WIDTH: i32 = 4;
    pub const BULLET_HEIGHT: i32 = 12;
    pub const PLAYER_BULLET_VEL: f32 = -7.0;
    pub const ENEMY_BULLET_VEL: f32 = 4.0;

    /// Formation grid layout
    pub const GRID_X0: f32 = 80.0;
    pub const GRID_Y0: f32 = 50.0;
    pub const GRID_SPACING_X: f32 = 70.0;
    pub const GRID_SPACING_Y: f32 = 55.0;
    pub const GRID_COLS: u32 = 7;

    /// Score per destroyed enemy
    pub const KILL_SCORE: u64 = 10;

    /// Starting lives
    pub const START_LIVES: u8 = 3;
}
