//! Single-slot control mailbox shared between the capture thread and the
//! simulation loop
//!
//! Overwrite-on-write, last-value-wins: the capture thread publishes whatever
//! it just processed, the simulation loop reads whatever is current. Older
//! samples are silently discarded; neither side ever waits on the other
//! beyond the mutex itself.

use std::sync::{Arc, Mutex};

use super::filter::GestureSample;

/// Lock-guarded single-slot mailbox for the latest [`GestureSample`].
///
/// Cloning the mailbox clones the handle, not the slot.
#[derive(Debug, Clone, Default)]
pub struct ControlMailbox {
    slot: Arc<Mutex<GestureSample>>,
}

impl ControlMailbox {
    /// Create a mailbox holding the "no hand detected" default sample.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the slot with a fresh sample.
    pub fn publish(&self, sample: GestureSample) {
        // A poisoned lock means the other thread panicked mid-access; the
        // slot itself is still a whole sample, so keep going.
        let mut slot = match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = sample;
    }

    /// Read the most recent sample without consuming it.
    pub fn latest(&self) -> GestureSample {
        let slot = match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        slot.clone()
    }
}
