//! Wave progression: clear detection, grid spawning, difficulty scaling

use rand::Rng;

use crate::config::Tuning;
use crate::consts::*;
use crate::sim::state::{Enemy, GamePhase, GameState, Player};

/// Spawn jitter applied once per enemy, so perfectly aligned columns don't
/// trigger simultaneous edge checks
const SPAWN_JITTER: f32 = 1.5;

/// Rows in the formation grid for a level: 3, 3, 4, 4, 5, ...
pub fn rows_for_level(level: u32) -> u32 {
    3 + (level.saturating_sub(1)) / 2
}

/// True when the current formation is fully defeated.
pub fn formation_cleared(state: &GameState) -> bool {
    !state.enemies.is_empty() && state.enemies.iter().all(|e| !e.alive)
}

/// Replace the formation with a fresh grid scaled to `level`.
pub fn spawn_wave(state: &mut GameState, level: u32, tuning: &Tuning) {
    let GameState { enemies, rng, .. } = state;

    enemies.clear();
    let rows = rows_for_level(level);
    for row in 0..rows {
        for col in 0..GRID_COLS {
            let x = GRID_X0 + col as f32 * GRID_SPACING_X + rng.random_range(-SPAWN_JITTER..=SPAWN_JITTER);
            let y = GRID_Y0 + row as f32 * GRID_SPACING_Y;
            enemies.push(Enemy::new(x, y, None));
        }
    }

    state.level = level;
    state.direction = 1.0;
    state.enemy_speed = tuning.enemy_speed(level);

    log::info!(
        "wave spawned: level {} with {} enemies ({} rows) at {} px/s",
        level,
        state.enemies.len(),
        rows,
        state.enemy_speed,
    );
}

/// Advance to the next level and spawn its formation.
pub fn advance_wave(state: &mut GameState, tuning: &Tuning) {
    let next = state.level + 1;
    spawn_wave(state, next, tuning);
}

/// Explicit new-game reset: level 1, zero score, fresh player, no bullets.
pub fn reset_game(state: &mut GameState, tuning: &Tuning) {
    state.player = Player::new(state.player.sprite);
    state.score = 0;
    state.bullets.clear();
    state.enemy_bullets.clear();
    state.phase = GamePhase::Playing;
    spawn_wave(state, 1, tuning);
    log::info!("game reset");
}
