//! Collision resolution: bullets against enemies and the player
//!
//! Off-screen bullets are culled in the tick before this runs, so every rect
//! tested here is on-screen. All outcomes are reported as [`GameEvent`]s for
//! the audio/render shell; the engine itself only mutates simulation state.

use crate::consts::KILL_SCORE;
use crate::sim::state::{GameEvent, GamePhase, GameState};

/// Resolve all bullet collisions for one tick, appending events to `events`.
pub fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    player_bullets_vs_enemies(state, events);
    enemy_bullets_vs_player(state, events);
}

/// Each player bullet kills at most one living enemy (first overlap wins)
/// and is consumed by the hit.
fn player_bullets_vs_enemies(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let GameState {
        bullets,
        enemies,
        score,
        ..
    } = state;

    bullets.retain(|bullet| {
        let bullet_rect = bullet.rect();
        for enemy in enemies.iter_mut() {
            if enemy.alive && bullet_rect.intersects(&enemy.rect()) {
                enemy.alive = false;
                *score += KILL_SCORE;
                let rect = enemy.rect();
                events.push(GameEvent::EnemyDestroyed {
                    x: rect.center_x(),
                    y: rect.y + rect.h / 2,
                });
                return false;
            }
        }
        true
    });
}

/// Enemy bullets against the player hitbox. Reaching zero lives ends the
/// session on this same tick.
fn enemy_bullets_vs_player(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player_rect = state.player.rect();
    let score = state.score;
    let GameState {
        enemy_bullets,
        player,
        phase,
        ..
    } = state;

    enemy_bullets.retain(|bullet| {
        if *phase == GamePhase::GameOver {
            return true;
        }
        if !bullet.rect().intersects(&player_rect) {
            return true;
        }
        player.lives = player.lives.saturating_sub(1);
        events.push(GameEvent::PlayerHit {
            lives_left: player.lives,
        });
        if player.lives == 0 {
            *phase = GamePhase::GameOver;
            events.push(GameEvent::GameOver { score });
        }
        false
    });
}
