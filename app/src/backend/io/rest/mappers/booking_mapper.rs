//! app/src/backend/io/rest/mappers/booking_mapper.rs

use crate::backend::domain::commands::selection::{SelectDateCommand, SelectTimeCommand};
use crate::backend::domain::SubmitOutcome;
use shared::{
    SelectDateRequest, SelectTimeRequest, SessionView, SubmitBookingResponse, SubmitOutcomeKind,
};

/// Mapper between booking DTOs and domain commands/outcomes.
pub struct BookingMapper;

impl BookingMapper {
    pub fn to_select_date_command(dto: SelectDateRequest) -> SelectDateCommand {
        SelectDateCommand {
            year: dto.year,
            month: dto.month,
            day: dto.day,
        }
    }

    pub fn to_select_time_command(dto: SelectTimeRequest) -> SelectTimeCommand {
        SelectTimeCommand { slot: dto.slot }
    }

    pub fn to_submit_response(
        outcome: &SubmitOutcome,
        session: SessionView,
        dismiss_after_ms: u64,
    ) -> SubmitBookingResponse {
        let (kind, reason) = match outcome {
            SubmitOutcome::Ignored => (SubmitOutcomeKind::Ignored, None),
            SubmitOutcome::Rejected { rejection, .. } => {
                (SubmitOutcomeKind::Rejected, Some(rejection.code().to_string()))
            }
            SubmitOutcome::Delivered { .. } => (SubmitOutcomeKind::Delivered, None),
            SubmitOutcome::DeliveryFailed { .. } => (SubmitOutcomeKind::DeliveryFailed, None),
        };

        SubmitBookingResponse {
            outcome: kind,
            reason,
            notification: outcome.notification().map(|n| n.to_dto(dismiss_after_ms)),
            session,
        }
    }
}
