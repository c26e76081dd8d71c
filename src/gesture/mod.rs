//! Hand-gesture input pipeline
//!
//! Turns raw per-frame hand-landmark detections into a stable control signal
//! (smoothed horizontal position, pinch-to-fire trigger, confidence) and
//! shares it across the capture thread and the simulation loop:
//! - Capture thread: `HandTracker` -> `SignalFilter` -> `ControlMailbox`
//! - Simulation loop: reads the mailbox once per tick, never blocking

pub mod capture;
pub mod filter;
pub mod mailbox;

pub use capture::{CaptureError, GestureController, HandTracker, NullTracker};
pub use filter::{
    GestureSample, HandDetection, Landmark, PreviewFrame, SignalFilter, in_deadzone, smooth_pos,
};
pub use mailbox::ControlMailbox;
