//! Gesture signal processing
//!
//! Converts a raw 21-point hand-landmark detection into one control sample:
//! a smoothed, deadzone-filtered horizontal position plus a pinch-to-fire
//! trigger. The smoothing law is kept as pure functions so it can be tested
//! in isolation.

use std::sync::Arc;

use crate::config::Tuning;

/// MediaPipe-style hand landmark indices used by the pipeline
const THUMB_TIP: usize = 4;
const INDEX_TIP: usize = 8;
/// Middle finger MCP, used as the x reference point
const X_REFERENCE: usize = 9;

/// One normalized landmark point, both coordinates in `[0, 1]`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in normalized space
    pub fn distance(&self, other: &Landmark) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A single detected hand: the full 21-point landmark set
#[derive(Debug, Clone)]
pub struct HandDetection {
    pub landmarks: [Landmark; 21],
}

impl HandDetection {
    pub fn new(landmarks: [Landmark; 21]) -> Self {
        Self { landmarks }
    }

    /// Distance between thumb tip and index tip (the pinch gesture)
    pub fn pinch_distance(&self) -> f32 {
        self.landmarks[THUMB_TIP].distance(&self.landmarks[INDEX_TIP])
    }

    /// Reference x coordinate, clamped to `[0, 1]`
    pub fn reference_x(&self) -> f32 {
        self.landmarks[X_REFERENCE].x.clamp(0.0, 1.0)
    }
}

/// Opaque annotated camera frame, passed through untouched for rendering.
///
/// The simulation core never inspects the pixel data.
#[derive(Debug, Clone)]
pub struct PreviewFrame {
    pub width: u32,
    pub height: u32,
    pub data: Arc<[u8]>,
}

/// One processed control sample, published once per acquired camera frame
#[derive(Debug, Clone, Default)]
pub struct GestureSample {
    /// Smoothed horizontal position in `[0, 1]`, `None` when no hand is seen
    pub x_norm: Option<f32>,
    /// Pinch-to-fire trigger
    pub fire: bool,
    /// Detection confidence in `[0, 1]`
    pub confidence: f32,
    /// Annotated camera frame for the renderer overlay
    pub preview: Option<PreviewFrame>,
}

/// Exponential low-pass: first sample passes through unchanged.
pub fn smooth_pos(prev: Option<f32>, new: f32, alpha: f32) -> f32 {
    match prev {
        None => new,
        Some(prev) => prev * (1.0 - alpha) + new * alpha,
    }
}

/// True when `value` sits within the jitter tolerance band around `center`.
pub fn in_deadzone(center: f32, value: f32, dz: f32) -> bool {
    (value - center).abs() < dz
}

/// Stateful filter turning raw detections into [`GestureSample`]s.
///
/// Owns the previous smoothed position across frames; reset only by
/// [`SignalFilter::reset`].
#[derive(Debug)]
pub struct SignalFilter {
    tuning: Tuning,
    prev_x: Option<f32>,
}

impl SignalFilter {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            prev_x: None,
        }
    }

    /// Process one acquired frame.
    ///
    /// No detection leaves the smoothing state untouched: the consumer sees
    /// an absent position and freezes at its last value.
    pub fn process(&mut self, detection: Option<&HandDetection>) -> GestureSample {
        let Some(hand) = detection else {
            return GestureSample::default();
        };

        let raw_x = hand.reference_x();

        // Detectors on this seam report no per-landmark score, so confidence
        // is pinned at 1.0 and the min_confidence gate is always satisfied.
        let confidence = 1.0;
        let fire = hand.pinch_distance() < self.tuning.pinch_threshold
            && confidence > self.tuning.min_confidence;

        match self.prev_x {
            None => self.prev_x = Some(raw_x),
            Some(prev) if !in_deadzone(prev, raw_x, self.tuning.deadzone) => {
                self.prev_x = Some(smooth_pos(Some(prev), raw_x, self.tuning.smoothing_alpha));
            }
            Some(_) => {}
        }

        GestureSample {
            x_norm: self.prev_x,
            fire,
            confidence,
            preview: None,
        }
    }

    /// Forget the smoothing history (explicit controller restart).
    pub fn reset(&mut self) {
        self.prev_x = None;
    }
}
