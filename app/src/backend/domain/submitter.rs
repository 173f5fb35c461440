//! Submit-button state machine.
//!
//! `Idle -> Validating -> Sending -> (Succeeded | Failed) -> Idle`, with
//! `Validating -> Idle` on rejection. The submit control is enabled only in
//! `Idle`, which is what keeps a second click from dispatching the same draft
//! while a send is in flight.

use log::{debug, warn};

pub const CONFIRM_LABEL: &str = "Confirm Booking";
pub const SENDING_LABEL: &str = "Sending...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Sending,
    Succeeded,
    Failed,
}

impl SubmissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Sending => "sending",
            SubmissionState::Succeeded => "succeeded",
            SubmissionState::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BookingSubmitter {
    state: SubmissionState,
}

impl BookingSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn submit_enabled(&self) -> bool {
        self.state == SubmissionState::Idle
    }

    pub fn submit_label(&self) -> &'static str {
        if self.state == SubmissionState::Sending {
            SENDING_LABEL
        } else {
            CONFIRM_LABEL
        }
    }

    /// Submit click. Returns false when the control is disabled.
    pub fn begin(&mut self) -> bool {
        self.advance(&[SubmissionState::Idle], SubmissionState::Validating)
    }

    pub fn reject(&mut self) -> bool {
        self.advance(&[SubmissionState::Validating], SubmissionState::Idle)
    }

    pub fn start_sending(&mut self) -> bool {
        self.advance(&[SubmissionState::Validating], SubmissionState::Sending)
    }

    pub fn delivered(&mut self) -> bool {
        self.advance(&[SubmissionState::Sending], SubmissionState::Succeeded)
    }

    pub fn failed(&mut self) -> bool {
        self.advance(&[SubmissionState::Sending], SubmissionState::Failed)
    }

    /// Back to `Idle` once the outcome has been reported
    pub fn settle(&mut self) -> bool {
        self.advance(
            &[SubmissionState::Succeeded, SubmissionState::Failed],
            SubmissionState::Idle,
        )
    }

    fn advance(&mut self, from: &[SubmissionState], to: SubmissionState) -> bool {
        if !from.contains(&self.state) {
            warn!("Ignoring submission transition {:?} -> {:?}", self.state, to);
            return false;
        }
        debug!("Submission state {:?} -> {:?}", self.state, to);
        self.state = to;
        true
    }
}
