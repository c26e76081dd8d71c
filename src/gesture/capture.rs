//! Camera acquisition thread
//!
//! Runs the [`HandTracker`] at whatever cadence the camera delivers frames,
//! filters each detection, and publishes the result into the
//! [`ControlMailbox`]. Independent of the simulation tick rate.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::filter::{GestureSample, HandDetection, PreviewFrame, SignalFilter};
use super::mailbox::ControlMailbox;
use crate::config::Tuning;

/// How long `stop()` waits for the capture thread before abandoning it
const JOIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Errors surfaced by a tracker backend
#[derive(Debug)]
pub enum CaptureError {
    /// Camera or detector could not be opened at startup
    DeviceUnavailable(String),
    /// The camera returned no frame this iteration (transient)
    FrameDropped,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::DeviceUnavailable(reason) => {
                write!(f, "capture device unavailable: {reason}")
            }
            CaptureError::FrameDropped => write!(f, "camera returned no frame"),
        }
    }
}

impl std::error::Error for CaptureError {}

/// The seam where a camera + hand-landmark backend plugs in.
///
/// Implementations block on frame acquisition; the capture thread owns the
/// tracker and drops it (releasing device resources) when the loop exits.
pub trait HandTracker: Send + 'static {
    /// Acquire the next frame and run detection on it.
    ///
    /// `Ok(None)` means a frame was acquired but no hand was found.
    fn next_detection(&mut self) -> Result<Option<HandDetection>, CaptureError>;

    /// Annotated preview of the last acquired frame, if the backend draws one.
    fn preview(&self) -> Option<PreviewFrame> {
        None
    }
}

/// Tracker for camera-less sessions: reports the device as unavailable.
pub struct NullTracker;

impl HandTracker for NullTracker {
    fn next_detection(&mut self) -> Result<Option<HandDetection>, CaptureError> {
        Err(CaptureError::DeviceUnavailable("no camera backend".into()))
    }
}

/// Owns the capture thread and its shutdown signal.
pub struct GestureController {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    done_rx: mpsc::Receiver<()>,
    mailbox: ControlMailbox,
}

impl GestureController {
    /// Spawn the acquisition loop on its own thread.
    ///
    /// Returns `None` when the tracker cannot deliver a single detection
    /// attempt at startup; callers treat that as degraded mode and fall back
    /// to keyboard control.
    pub fn spawn<T: HandTracker>(mut tracker: T, tuning: Tuning) -> Option<Self> {
        // Probe once so startup failure is reported synchronously.
        let first = match tracker.next_detection() {
            Err(CaptureError::DeviceUnavailable(reason)) => {
                log::warn!("gesture capture disabled: {reason}");
                return None;
            }
            Err(CaptureError::FrameDropped) => None,
            Ok(detection) => detection,
        };

        let mailbox = ControlMailbox::new();
        let running = Arc::new(AtomicBool::new(true));
        let (done_tx, done_rx) = mpsc::channel();

        let handle = {
            let running = Arc::clone(&running);
            let mailbox = mailbox.clone();
            thread::spawn(move || {
                run_capture_loop(tracker, first, &running, &mailbox, &tuning);
                // Tracker dropped here, releasing camera/detector resources.
                let _ = done_tx.send(());
            })
        };

        log::info!("gesture capture started");
        Some(Self {
            running,
            handle: Some(handle),
            done_rx,
            mailbox,
        })
    }

    /// Handle for the simulation loop to read samples from.
    pub fn mailbox(&self) -> ControlMailbox {
        self.mailbox.clone()
    }

    /// Signal the loop to stop and wait a bounded time for it to exit.
    ///
    /// If the tracker is stuck inside a device call the thread is abandoned
    /// rather than hanging application shutdown.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        let Some(handle) = self.handle.take() else {
            return;
        };
        match self.done_rx.recv_timeout(JOIN_TIMEOUT) {
            Ok(()) => {
                let _ = handle.join();
                log::info!("gesture capture stopped");
            }
            Err(RecvTimeoutError::Timeout) => {
                log::warn!("gesture capture thread did not stop in time; detaching");
            }
            Err(RecvTimeoutError::Disconnected) => {
                // Thread panicked; reap it.
                let _ = handle.join();
            }
        }
    }
}

impl Drop for GestureController {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_capture_loop<T: HandTracker>(
    mut tracker: T,
    first: Option<HandDetection>,
    running: &AtomicBool,
    mailbox: &ControlMailbox,
    tuning: &Tuning,
) {
    let interval = Duration::from_secs_f32(tuning.capture_interval);
    let mut filter = SignalFilter::new(tuning.clone());
    let mut pending = Some(first);

    while running.load(Ordering::Acquire) {
        let detection = match pending.take() {
            Some(probed) => probed,
            None => match tracker.next_detection() {
                Ok(detection) => detection,
                Err(CaptureError::FrameDropped) => None,
                Err(CaptureError::DeviceUnavailable(reason)) => {
                    // Device vanished mid-session. Leave the "no hand"
                    // sample in place and let the loop wind down.
                    log::warn!("gesture capture lost its device: {reason}");
                    mailbox.publish(GestureSample::default());
                    return;
                }
            },
        };

        let mut sample = filter.process(detection.as_ref());
        sample.preview = tracker.preview();
        mailbox.publish(sample);

        thread::sleep(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::filter::Landmark;
    use std::time::Instant;

    /// Replays a fixed script of detections, then repeats the last entry.
    struct ScriptedTracker {
        script: Vec<Option<f32>>,
        cursor: usize,
    }

    impl ScriptedTracker {
        fn new(script: Vec<Option<f32>>) -> Self {
            Self { script, cursor: 0 }
        }
    }

    impl HandTracker for ScriptedTracker {
        fn next_detection(&mut self) -> Result<Option<HandDetection>, CaptureError> {
            let idx = self.cursor.min(self.script.len() - 1);
            self.cursor += 1;
            Ok(self.script[idx].map(|x| {
                let mut landmarks = [Landmark::new(x, 0.5); 21];
                // Thumb and index far apart: no pinch.
                landmarks[4] = Landmark::new(0.1, 0.1);
                landmarks[8] = Landmark::new(0.9, 0.9);
                HandDetection::new(landmarks)
            }))
        }
    }

    fn fast_tuning() -> Tuning {
        Tuning {
            capture_interval: 0.001,
            ..Tuning::default()
        }
    }

    #[test]
    fn unavailable_device_reports_disabled() {
        assert!(GestureController::spawn(NullTracker, Tuning::default()).is_none());
    }

    #[test]
    fn scripted_detections_reach_the_mailbox() {
        let tracker = ScriptedTracker::new(vec![Some(0.5); 4]);
        let mut controller =
            GestureController::spawn(tracker, fast_tuning()).expect("tracker available");
        let mailbox = controller.mailbox();

        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            if mailbox.latest().x_norm == Some(0.5) {
                break;
            }
            assert!(Instant::now() < deadline, "sample never arrived");
            thread::sleep(Duration::from_millis(1));
        }
        controller.stop();
    }

    #[test]
    fn lost_frames_publish_no_detection() {
        let tracker = ScriptedTracker::new(vec![Some(0.5), None]);
        let mut controller =
            GestureController::spawn(tracker, fast_tuning()).expect("tracker available");
        let mailbox = controller.mailbox();

        // First the detection arrives, then the dropped frame replaces it.
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            if mailbox.latest().x_norm == Some(0.5) {
                break;
            }
            assert!(Instant::now() < deadline, "detection never arrived");
            thread::sleep(Duration::from_millis(1));
        }
        loop {
            let sample = mailbox.latest();
            if sample.x_norm.is_none() && sample.confidence == 0.0 {
                break;
            }
            assert!(Instant::now() < deadline, "no-detection sample never arrived");
            thread::sleep(Duration::from_millis(1));
        }
        controller.stop();
    }

    #[test]
    fn stop_joins_within_the_bound() {
        let tracker = ScriptedTracker::new(vec![Some(0.5)]);
        let mut controller =
            GestureController::spawn(tracker, fast_tuning()).expect("tracker available");

        let start = Instant::now();
        controller.stop();
        assert!(start.elapsed() < JOIN_TIMEOUT + Duration::from_millis(500));
        // Second stop is a no-op.
        controller.stop();
    }
}
