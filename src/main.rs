//! Gesture Invaders entry point
//!
//! The rendering/windowing front-end is a separate collaborator; this binary
//! brings the core up headless: it starts a session (gesture capture falls
//! back to keyboard mode without a camera backend), runs the simulation at
//! the target tick rate for a short demonstration, and shuts down cleanly.

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use gesture_invaders::consts::TICK_HZ;
use gesture_invaders::gesture::NullTracker;
use gesture_invaders::highscore::Highscore;
use gesture_invaders::session::KeyState;
use gesture_invaders::{Session, Tuning};

/// How long the headless smoke run lasts
const DEMO_SECS: u64 = 5;

fn main() {
    env_logger::init();
    log::info!("Gesture Invaders (headless) starting...");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
        ^ std::process::id() as u64;
    let tuning = Tuning::default();
    let highscore = Highscore::load_default();
    log::info!("best score on record: {}", highscore.best());

    let mut session = Session::new(seed, tuning, NullTracker, highscore);
    if !session.gesture_enabled() {
        log::info!("running with keyboard-equivalent controls");
    }

    let tick = Duration::from_secs_f64(1.0 / TICK_HZ as f64);
    let deadline = Instant::now() + Duration::from_secs(DEMO_SECS);
    let mut last = Instant::now();
    // Hold fire so the demo actually shoots something down
    let keys = KeyState {
        fire: true,
        ..Default::default()
    };

    while Instant::now() < deadline {
        let now = Instant::now();
        let dt = (now - last).as_secs_f32();
        last = now;

        let frame = session.frame(&keys, dt);
        for event in &frame.events {
            log::debug!("event: {event:?}");
        }

        thread::sleep(tick);
    }

    let state = session.state();
    log::info!(
        "demo finished: score {} lives {} level {}",
        state.score,
        state.player.lives,
        state.level,
    );
    session.quit();
}
