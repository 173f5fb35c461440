//! Booking draft validation.
//!
//! Checks run in a fixed order and stop at the first failure. The challenge is
//! always checked last.

use log::info;

use crate::backend::domain::challenge_service::ChallengeService;
use crate::backend::domain::models::booking::BookingDraft;
use crate::backend::domain::models::challenge::Challenge;

/// Why a draft was turned away. `Display` is the text shown to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BookingRejection {
    #[error("Please select a date")]
    MissingDate,
    #[error("Please select a time slot")]
    MissingTime,
    #[error("Please select a service type")]
    MissingServiceType,
    #[error("Please fill in your name and email")]
    MissingContactInfo,
    #[error("Incorrect math answer. Please try again.")]
    ChallengeFailed,
}

impl BookingRejection {
    /// Stable reason code for API consumers
    pub fn code(&self) -> &'static str {
        match self {
            BookingRejection::MissingDate => "missing_date",
            BookingRejection::MissingTime => "missing_time",
            BookingRejection::MissingServiceType => "missing_service_type",
            BookingRejection::MissingContactInfo => "missing_contact_info",
            BookingRejection::ChallengeFailed => "challenge_failed",
        }
    }
}

pub type ValidationResult = Result<(), BookingRejection>;

#[derive(Clone, Default)]
pub struct BookingValidator {
    challenges: ChallengeService,
}

impl BookingValidator {
    pub fn new(challenges: ChallengeService) -> Self {
        Self { challenges }
    }

    pub fn validate(&self, draft: &BookingDraft, challenge: &Challenge) -> ValidationResult {
        let result = self.check(draft, challenge);
        if let Err(rejection) = &result {
            info!("Booking draft rejected: {}", rejection.code());
        }
        result
    }

    fn check(&self, draft: &BookingDraft, challenge: &Challenge) -> ValidationResult {
        if draft.selected_date.is_none() {
            return Err(BookingRejection::MissingDate);
        }
        if draft.selected_time.as_deref().map_or(true, |t| t.trim().is_empty()) {
            return Err(BookingRejection::MissingTime);
        }
        if draft.fields.service_type.trim().is_empty() {
            return Err(BookingRejection::MissingServiceType);
        }
        if draft.fields.name.trim().is_empty() || draft.fields.email.trim().is_empty() {
            return Err(BookingRejection::MissingContactInfo);
        }
        if !self.challenges.verify(&draft.fields.challenge_answer, challenge) {
            return Err(BookingRejection::ChallengeFailed);
        }
        Ok(())
    }
}
