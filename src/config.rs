//! Tuning constants grouped into one immutable configuration value
//!
//! Every threshold the gesture pipeline and the simulation depend on lives
//! here, so tests can vary them without touching shared state.

use serde::{Deserialize, Serialize};

/// Tuning knobs for the gesture pipeline and simulation.
///
/// Constructed once at startup and passed by reference into each component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    // === Gesture pipeline ===
    /// Raw-position changes below this are ignored as jitter
    pub deadzone: f32,
    /// Exponential low-pass factor; lower = smoother, higher = more responsive
    pub smoothing_alpha: f32,
    /// Thumb-index distance (normalized) that triggers fire
    pub pinch_threshold: f32,
    /// Minimum detection confidence for the fire gesture
    pub min_confidence: f32,
    /// Sleep between acquisition iterations (seconds)
    pub capture_interval: f32,

    // === Simulation safety limits ===
    /// Per-frame dt cap (seconds)
    pub max_dt: f32,
    /// Per-frame enemy movement clamp (px)
    pub max_move_per_frame: f32,

    // === Formation ===
    /// Vertical drop when the formation hits an edge (px)
    pub drop_step: f32,
    /// Level 1 horizontal speed (px/s)
    pub base_enemy_speed: f32,
    /// Speed added per level (px/s)
    pub speed_step_per_level: f32,
    /// Per-tick enemy fire probability at level 0
    pub base_fire_chance: f32,
    /// Fire probability added per level
    pub fire_chance_per_level: f32,

    // === Player ===
    /// Seconds between player shots
    pub fire_cooldown: f32,
    /// Keyboard fallback nudge per tick (normalized units)
    pub kb_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            // Gesture pipeline
            deadzone: 0.03,
            smoothing_alpha: 0.35,
            pinch_threshold: 0.06,
            min_confidence: 0.5,
            capture_interval: 0.01,

            // Safety limits
            max_dt: 0.05,
            max_move_per_frame: 12.0,

            // Formation
            drop_step: 12.0,
            base_enemy_speed: 45.0,
            speed_step_per_level: 8.0,
            base_fire_chance: 0.012,
            fire_chance_per_level: 0.002,

            // Player
            fire_cooldown: 0.32,
            kb_step: 0.015,
        }
    }
}

impl Tuning {
    /// Horizontal formation speed for a level (px/s)
    pub fn enemy_speed(&self, level: u32) -> f32 {
        self.base_enemy_speed + (level.saturating_sub(1)) as f32 * self.speed_step_per_level
    }

    /// Per-tick enemy fire probability for a level
    pub fn enemy_fire_chance(&self, level: u32) -> f32 {
        self.base_fire_chance + level as f32 * self.fire_chance_per_level
    }
}
