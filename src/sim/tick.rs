//! Per-frame simulation tick
//!
//! Orchestrates one frame: control sample in, player/bullets/formation/
//! collisions/wave progression, events out. The caller builds the
//! [`FrameResult`](crate::sim::state::FrameResult) snapshot afterwards via
//! [`GameState::snapshot`].

use crate::config::Tuning;
use crate::consts::*;
use crate::sim::collision::resolve_collisions;
use crate::sim::formation::step_formation;
use crate::sim::state::{Bullet, GameEvent, GamePhase, GameState};
use crate::sim::wave::{advance_wave, formation_cleared, reset_game};

/// Gap between the player's rect top and a freshly spawned bullet
const MUZZLE_OFFSET: i32 = 6;

/// Input commands for a single tick.
///
/// `pause` and `reset` are one-shot flags; the caller clears them after the
/// tick consumed them.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Target player position from the control pipeline, `None` when absent
    pub x_norm: Option<f32>,
    /// Fire request (pinch gesture or space bar)
    pub fire: bool,
    /// Toggle Playing <-> Paused
    pub pause: bool,
    /// Explicit new-game reset, honored in every phase
    pub reset: bool,
}

/// Advance the game by one frame of wall time.
///
/// `raw_dt` is capped at [`Tuning::max_dt`] before any movement math, so a
/// slow frame or a resume-after-pause gap never teleports entities.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    raw_dt: f32,
    tuning: &Tuning,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let dt = raw_dt.min(tuning.max_dt);

    if input.reset {
        reset_game(state, tuning);
    }

    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("paused");
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("resumed");
            }
            GamePhase::GameOver => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return events;
    }

    // Player movement and fire
    if let Some(x_norm) = input.x_norm {
        state.player.move_to(x_norm);
    }
    state.player.shot_timer = (state.player.shot_timer - dt).max(0.0);
    if input.fire && state.player.can_shoot() {
        state.player.make_shot(tuning.fire_cooldown);
        let rect = state.player.rect();
        state
            .bullets
            .push(Bullet::player_shot(rect.center_x(), rect.y - MUZZLE_OFFSET));
    }

    // Advance bullets and cull off-screen ones before collision testing
    for bullet in &mut state.bullets {
        bullet.advance();
    }
    state.bullets.retain(|b| b.rect().bottom() >= 0);
    for bullet in &mut state.enemy_bullets {
        bullet.advance();
    }
    state.enemy_bullets.retain(|b| b.rect().y <= HEIGHT);

    step_formation(state, dt, tuning);
    resolve_collisions(state, &mut events);

    // Wave progression; skipped if the session just ended
    if state.phase == GamePhase::Playing && formation_cleared(state) {
        advance_wave(state, tuning);
        events.push(GameEvent::WaveCleared {
            new_level: state.level,
        });
    }

    events
}
