//! Formation movement: the classic march, hit edge, drop and reverse
//!
//! Two effective states: marching horizontally, or an instantaneous drop
//! within the tick that would have crossed a margin. Horizontal movement is
//! clamped per frame so a dt or speed spike can never teleport the grid.

use rand::Rng;

use crate::config::Tuning;
use crate::consts::*;
use crate::sim::state::{Bullet, GameState};

/// Vertical offset of enemy shots below the shooter's rect
const MUZZLE_OFFSET: i32 = 8;

/// Advance the formation by one tick of capped `dt`.
///
/// If any living enemy's prospective position would cross a screen margin,
/// the whole formation drops [`Tuning::drop_step`] and reverses instead of
/// moving horizontally. Otherwise every living enemy moves by the same
/// clamped amount.
pub fn step_formation(state: &mut GameState, dt: f32, tuning: &Tuning) {
    if state.enemies.is_empty() {
        return;
    }

    let dt = dt.min(tuning.max_dt);
    let mut move_px = state.enemy_speed * dt * state.direction;
    if move_px.abs() > tuning.max_move_per_frame {
        move_px = tuning.max_move_per_frame.copysign(move_px);
    }

    let right_limit = (WIDTH - EDGE_MARGIN) as f32;
    let left_limit = EDGE_MARGIN as f32;
    let will_hit_edge = state.living_enemies().any(|e| {
        let new_x = e.float_pos.x + move_px;
        new_x + ENEMY_WIDTH as f32 >= right_limit || new_x <= left_limit
    });

    if will_hit_edge {
        state.direction = -state.direction;
        for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
            enemy.float_pos.y += tuning.drop_step;
        }
    } else {
        for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
            enemy.float_pos.x += move_px;
        }
    }

    maybe_enemy_fire(state, tuning);
}

/// Occasional enemy shot: one uniformly chosen living enemy fires from its
/// bottom-center.
fn maybe_enemy_fire(state: &mut GameState, tuning: &Tuning) {
    let chance = tuning.enemy_fire_chance(state.level);
    if state.rng.random::<f32>() >= chance {
        return;
    }

    let shooters: Vec<usize> = state
        .enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.alive)
        .map(|(i, _)| i)
        .collect();
    if shooters.is_empty() {
        return;
    }

    let idx = shooters[state.rng.random_range(0..shooters.len())];
    let rect = state.enemies[idx].rect();
    state
        .enemy_bullets
        .push(Bullet::enemy_shot(rect.center_x(), rect.bottom() + MUZZLE_OFFSET));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Enemy;
    use crate::sim::wave::spawn_wave;
    use proptest::prelude::*;

    fn state_with_one_enemy(x: f32, direction: f32) -> GameState {
        let mut state = GameState::new(7);
        state.enemies.push(Enemy::new(x, 50.0, None));
        state.direction = direction;
        state.enemy_speed = 45.0;
        state
    }

    /// Tuning with enemy fire disabled, so movement tests stay deterministic.
    fn quiet_tuning() -> Tuning {
        Tuning {
            base_fire_chance: 0.0,
            fire_chance_per_level: 0.0,
            ..Tuning::default()
        }
    }

    #[test]
    fn marches_uniformly() {
        let tuning = quiet_tuning();
        let mut state = GameState::new(7);
        state.enemies.push(Enemy::new(100.0, 50.0, None));
        state.enemies.push(Enemy::new(200.0, 50.0, None));
        state.direction = 1.0;
        state.enemy_speed = 60.0;

        step_formation(&mut state, 1.0 / 60.0, &tuning);

        let moved = 60.0 / 60.0;
        assert!((state.enemies[0].float_pos.x - (100.0 + moved)).abs() < 1e-4);
        assert!((state.enemies[1].float_pos.x - (200.0 + moved)).abs() < 1e-4);
        assert_eq!(state.enemies[0].float_pos.y, 50.0);
    }

    #[test]
    fn dead_enemies_do_not_trigger_edges() {
        let tuning = quiet_tuning();
        let mut state = state_with_one_enemy(400.0, 1.0);
        // A dead enemy parked on the right margin
        let mut dead = Enemy::new((WIDTH - EDGE_MARGIN - ENEMY_WIDTH) as f32, 50.0, None);
        dead.alive = false;
        state.enemies.push(dead);

        step_formation(&mut state, 1.0 / 60.0, &tuning);
        assert_eq!(state.direction, 1.0);
        assert!(state.enemies[0].float_pos.x > 400.0);
    }

    #[test]
    fn edge_hit_drops_and_reverses_without_horizontal_move() {
        let tuning = quiet_tuning();
        let start_x = (WIDTH - EDGE_MARGIN - ENEMY_WIDTH) as f32 - 0.25;
        let mut state = state_with_one_enemy(start_x, 1.0);

        step_formation(&mut state, 1.0 / 60.0, &tuning);

        assert_eq!(state.direction, -1.0);
        assert_eq!(state.enemies[0].float_pos.x, start_x);
        assert_eq!(state.enemies[0].float_pos.y, 50.0 + tuning.drop_step);
    }

    #[test]
    fn left_edge_reverses_too() {
        let tuning = quiet_tuning();
        let mut state = state_with_one_enemy(EDGE_MARGIN as f32 + 0.25, -1.0);

        step_formation(&mut state, 1.0 / 60.0, &tuning);
        assert_eq!(state.direction, 1.0);
    }

    #[test]
    fn no_tunneling_through_margins() {
        // A fast formation stepped many times never puts an edge past the
        // margins before reversing.
        let tuning = quiet_tuning();
        let mut state = GameState::new(3);
        spawn_wave(&mut state, 9, &tuning);
        state.enemy_speed = 5000.0;

        for _ in 0..2000 {
            step_formation(&mut state, tuning.max_dt, &tuning);
            for enemy in state.living_enemies() {
                let left = enemy.float_pos.x;
                let right = left + ENEMY_WIDTH as f32;
                assert!(left > 0.0, "enemy past left screen edge");
                assert!(right < WIDTH as f32, "enemy past right screen edge");
            }
        }
    }

    #[test]
    fn enemy_fire_spawns_from_a_living_enemy() {
        let tuning = Tuning {
            base_fire_chance: 1.0,
            ..Tuning::default()
        };
        let mut state = state_with_one_enemy(300.0, 1.0);
        let mut dead = Enemy::new(500.0, 50.0, None);
        dead.alive = false;
        state.enemies.push(dead);

        step_formation(&mut state, 1.0 / 60.0, &tuning);

        assert_eq!(state.enemy_bullets.len(), 1);
        let shot = state.enemy_bullets[0].rect();
        let shooter = state.enemies[0].rect();
        assert_eq!(shot.center_x(), shooter.center_x());
        assert!(shot.y >= shooter.bottom());
    }

    proptest! {
        /// Per-tick movement magnitude never exceeds the clamp, whatever the
        /// dt or speed.
        #[test]
        fn movement_never_exceeds_clamp(
            dt in 0.0f32..10.0,
            speed in 0.0f32..100_000.0,
            dir in prop_oneof![Just(1.0f32), Just(-1.0f32)],
        ) {
            let tuning = quiet_tuning();
            let mut state = state_with_one_enemy(400.0, dir);
            state.enemy_speed = speed;

            let before = state.enemies[0].float_pos;
            step_formation(&mut state, dt, &tuning);
            let after = state.enemies[0].float_pos;

            prop_assert!((after.x - before.x).abs() <= tuning.max_move_per_frame + 1e-3);
            // A drop is fixed-size regardless of dt
            let dy = after.y - before.y;
            prop_assert!(dy == 0.0 || (dy - tuning.drop_step).abs() < 1e-6);
        }
    }
}
