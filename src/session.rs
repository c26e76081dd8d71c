//! Session shell: ties the capture thread and the simulation loop together
//!
//! Once per frame the session reads the latest control sample from the
//! mailbox (or synthesizes one from the keyboard when gesture capture is
//! disabled), runs one simulation tick, and hands back a frame snapshot plus
//! the tick's events for the rendering/audio collaborators.

use crate::config::Tuning;
use crate::gesture::{ControlMailbox, GestureController, HandTracker, PreviewFrame};
use crate::highscore::Highscore;
use crate::sim::state::{FrameResult, GameEvent, GameState};
use crate::sim::tick::{TickInput, tick};
use crate::sim::wave::spawn_wave;

/// Keyboard state sampled by the windowing shell each frame
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Everything one frame produces for the collaborators
#[derive(Debug)]
pub struct SessionFrame {
    pub result: FrameResult,
    pub events: Vec<GameEvent>,
    /// Annotated camera preview, passed through untouched
    pub preview: Option<PreviewFrame>,
}

/// One play session: simulation state, control source, highscore tracking.
pub struct Session {
    tuning: Tuning,
    state: GameState,
    controller: Option<GestureController>,
    mailbox: Option<ControlMailbox>,
    /// Keyboard-tracked normalized position, used when gesture is disabled
    kb_x: f32,
    highscore: Highscore,
    /// One-shot commands pending for the next frame
    pending: TickInput,
}

impl Session {
    /// Start a session, attempting to bring up gesture capture with the
    /// given tracker. A tracker that fails at startup leaves the session in
    /// keyboard mode for its whole lifetime.
    pub fn new(seed: u64, tuning: Tuning, tracker: impl HandTracker, highscore: Highscore) -> Self {
        let controller = GestureController::spawn(tracker, tuning.clone());
        if controller.is_none() {
            log::warn!("gesture control unavailable; using keyboard fallback");
        }
        let mailbox = controller.as_ref().map(|c| c.mailbox());

        let mut state = GameState::new(seed);
        spawn_wave(&mut state, 1, &tuning);
        log::info!("session started with seed {seed}");

        Self {
            tuning,
            state,
            controller,
            mailbox,
            kb_x: 0.5,
            highscore,
            pending: TickInput::default(),
        }
    }

    /// Whether the gesture pipeline is driving the player.
    pub fn gesture_enabled(&self) -> bool {
        self.mailbox.is_some()
    }

    /// Run one frame: read controls, tick the simulation, snapshot.
    pub fn frame(&mut self, keys: &KeyState, raw_dt: f32) -> SessionFrame {
        let mut input = std::mem::take(&mut self.pending);

        let preview = if let Some(mailbox) = &self.mailbox {
            let sample = mailbox.latest();
            input.x_norm = sample.x_norm;
            input.fire = sample.fire;
            sample.preview
        } else {
            if keys.left {
                self.kb_x -= self.tuning.kb_step;
            }
            if keys.right {
                self.kb_x += self.tuning.kb_step;
            }
            self.kb_x = self.kb_x.clamp(0.0, 1.0);
            input.x_norm = Some(self.kb_x);
            input.fire = keys.fire;
            None
        };

        let events = tick(&mut self.state, &input, raw_dt, &self.tuning);
        for event in &events {
            if let GameEvent::GameOver { score } = event {
                log::info!("game over with score {score}");
                self.highscore.submit(*score);
            }
        }

        SessionFrame {
            result: self.state.snapshot(),
            events,
            preview,
        }
    }

    /// Queue a new-game reset for the next frame.
    pub fn reset(&mut self) {
        self.pending.reset = true;
    }

    /// Queue a pause toggle for the next frame.
    pub fn toggle_pause(&mut self) {
        self.pending.pause = true;
    }

    /// End the session: persist the highscore and shut down gesture capture
    /// with a bounded wait.
    pub fn quit(&mut self) {
        self.highscore.submit(self.state.score);
        self.highscore.save();
        if let Some(mut controller) = self.controller.take() {
            controller.stop();
        }
        self.mailbox = None;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn best_score(&self) -> u64 {
        self.highscore.best()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(mut controller) = self.controller.take() {
            controller.stop();
        }
    }
}
