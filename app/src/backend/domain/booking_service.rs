//! Booking widget orchestration.
//!
//! `BookingService` is stateless; every operation works on an explicit
//! [`BookingSession`]. Submission runs the validate, send, report cycle of
//! [`BookingSubmitter`]. The session lock is released while the email is in
//! flight, so other requests still see the `Sending` state and a second
//! submit is turned away rather than queued.

use chrono::Datelike;
use log::{error, info, warn};
use shared::{BookingFormFields, NotificationKind, SessionView, SubmitButtonView, TimeSlotView};
use std::sync::Arc;

use crate::backend::config::AppConfig;
use crate::backend::delivery::{template_params, DeliveryError, DeliveryReceipt, EmailDelivery, EmailTemplate};
use crate::backend::domain::calendar::{CalendarCursor, CalendarError, CalendarService};
use crate::backend::domain::challenge_service::ChallengeService;
use crate::backend::domain::clock::Clock;
use crate::backend::domain::commands::selection::{SelectDateCommand, SelectTimeCommand};
use crate::backend::domain::models::booking::{BookingDraft, BookingRequest};
use crate::backend::domain::models::notification::Notification;
use crate::backend::domain::notifications::NotificationSink;
use crate::backend::domain::selection::SelectionError;
use crate::backend::domain::session::{BookingSession, SessionState};
use crate::backend::domain::validation::{BookingRejection, BookingValidator};

pub const NO_DATE_SELECTED: &str = "No date selected";
pub const DELIVERY_FAILED_MESSAGE: &str =
    "Booking failed to send email. Please try again or contact us directly.";

/// Site-specific settings the booking flow needs
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSettings {
    pub recipient_name: String,
    pub time_slots: Vec<String>,
    pub service_types: Vec<String>,
    pub notification_ttl_ms: u64,
}

impl From<&AppConfig> for BookingSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            recipient_name: config.recipient_name.clone(),
            time_slots: config.time_slots.clone(),
            service_types: config.service_types.clone(),
            notification_ttl_ms: config.notification_ttl_ms,
        }
    }
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingInputError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// How a submit click ended
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Control disabled: another send is in flight
    Ignored,
    Rejected {
        rejection: BookingRejection,
        notification: Notification,
    },
    Delivered {
        request: BookingRequest,
        notification: Notification,
    },
    DeliveryFailed {
        error: String,
        notification: Notification,
    },
}

impl SubmitOutcome {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            SubmitOutcome::Ignored => None,
            SubmitOutcome::Rejected { notification, .. }
            | SubmitOutcome::Delivered { notification, .. }
            | SubmitOutcome::DeliveryFailed { notification, .. } => Some(notification),
        }
    }
}

#[derive(Clone)]
pub struct BookingService {
    calendar: CalendarService,
    challenges: ChallengeService,
    validator: BookingValidator,
    delivery: Arc<dyn EmailDelivery>,
    clock: Arc<dyn Clock>,
    settings: Arc<BookingSettings>,
}

impl BookingService {
    pub fn new(
        settings: BookingSettings,
        challenges: ChallengeService,
        delivery: Arc<dyn EmailDelivery>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            calendar: CalendarService::new(),
            validator: BookingValidator::new(challenges.clone()),
            challenges,
            delivery,
            clock,
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &BookingSettings {
        &self.settings
    }

    /// Fresh session on the current month with a new challenge
    pub fn open_session(&self) -> BookingSession {
        let cursor = CalendarCursor::containing(self.clock.today());
        let state = SessionState::new(cursor, self.challenges.generate());
        let session = BookingSession::new(state, self.clock.clone(), self.settings.notification_ttl_ms);
        info!("Opened booking session {}", session.id());
        session
    }

    /// Render the whole widget for `session`
    pub fn render(&self, session: &BookingSession) -> Result<SessionView, CalendarError> {
        let today = self.clock.today();
        let state = session.lock();

        let mut calendar = self
            .calendar
            .generate_calendar_month(state.cursor.year, state.cursor.month, today)?;

        let selected_date = state.selection.selected_date();
        if let Some(date) = selected_date.filter(|d| state.cursor.contains(*d)) {
            for slot in calendar
                .days
                .iter_mut()
                .filter(|slot| slot.in_current_month && slot.day_number == date.day())
            {
                slot.is_selected = true;
            }
        }

        let slots_enabled = state.selection.time_slots_enabled();
        let time_slots = self
            .settings
            .time_slots
            .iter()
            .map(|slot| TimeSlotView {
                slot: slot.clone(),
                enabled: slots_enabled,
                selected: state.selection.selected_time() == Some(slot.as_str()),
            })
            .collect();

        Ok(SessionView {
            session_id: session.id(),
            calendar,
            selected_date: selected_date.map(|d| d.format("%Y-%m-%d").to_string()),
            selected_date_display: selected_date
                .map(|d| self.calendar.format_long_date(d))
                .unwrap_or_else(|| NO_DATE_SELECTED.to_string()),
            time_slots,
            service_types: self.settings.service_types.clone(),
            form: state.fields.clone(),
            challenge_question: state.challenge.question(),
            submit_button: SubmitButtonView {
                enabled: state.submitter.submit_enabled(),
                label: state.submitter.submit_label().to_string(),
            },
            submission_state: state.submitter.state().as_str().to_string(),
        })
    }

    pub fn previous_month(&self, session: &BookingSession) -> CalendarCursor {
        let mut state = session.lock();
        state.cursor = state.cursor.previous();
        state.cursor
    }

    pub fn next_month(&self, session: &BookingSession) -> CalendarCursor {
        let mut state = session.lock();
        state.cursor = state.cursor.next();
        state.cursor
    }

    /// Day click. Only non-past days of the displayed month are accepted.
    pub fn select_date(
        &self,
        session: &BookingSession,
        command: SelectDateCommand,
    ) -> Result<(), BookingInputError> {
        let date = self.calendar.resolve_date(command.year, command.month, command.day)?;
        let mut state = session.lock();

        if !state.cursor.contains(date) || !self.calendar.is_selectable(date, self.clock.today()) {
            return Err(SelectionError::DayNotSelectable(date).into());
        }

        state.selection.select_date(date);
        info!("Session {} selected {}", session.id(), date);
        Ok(())
    }

    /// Time-slot click. The slot must exist and a date must already be chosen.
    pub fn select_time(
        &self,
        session: &BookingSession,
        command: SelectTimeCommand,
    ) -> Result<(), BookingInputError> {
        if !self.settings.time_slots.contains(&command.slot) {
            return Err(SelectionError::UnknownTimeSlot(command.slot).into());
        }
        session.lock().selection.select_time(command.slot)?;
        Ok(())
    }

    pub fn update_form(&self, session: &BookingSession, fields: BookingFormFields) {
        session.lock().fields = fields;
    }

    /// Submit click: validate, send once, report, reset or keep the draft
    pub async fn submit(&self, session: &BookingSession) -> SubmitOutcome {
        let request = {
            let mut state = session.lock();
            if !state.submitter.begin() {
                info!("Submit ignored for session {}: booking already sending", session.id());
                return SubmitOutcome::Ignored;
            }

            let draft = state.draft();
            let checked = self
                .validator
                .validate(&draft, &state.challenge)
                .and_then(|_| self.build_request(&draft).ok_or(BookingRejection::MissingDate));

            match checked {
                Ok(request) => {
                    state.submitter.start_sending();
                    request
                }
                Err(rejection) => {
                    if rejection == BookingRejection::ChallengeFailed {
                        state.challenge = self.challenges.generate();
                        state.fields.challenge_answer.clear();
                    }
                    state.submitter.reject();
                    let notification = session
                        .notifications()
                        .notify(NotificationKind::Error, &rejection.to_string());
                    return SubmitOutcome::Rejected { rejection, notification };
                }
            }
        };

        info!(
            "Booking confirmed by {} for {} at {} ({}), sending email",
            request.from_name, request.booking_date, request.booking_time, request.service_type
        );

        let result = self.dispatch(&request).await;

        let mut state = session.lock();
        match result {
            Ok(receipt) => {
                info!("Booking email sent ({} {})", receipt.status, receipt.text);
                state.submitter.delivered();
                let notification = session.notifications().notify(
                    NotificationKind::Success,
                    &format!(
                        "Booking confirmed for {} at {}! Email sent.",
                        request.booking_date, request.booking_time
                    ),
                );
                state.fields = BookingFormFields::default();
                state.selection.reset();
                state.challenge = self.challenges.generate();
                state.submitter.settle();
                SubmitOutcome::Delivered { request, notification }
            }
            Err(e) => {
                error!("Booking email failed for session {}: {}", session.id(), e);
                state.submitter.failed();
                let notification = session
                    .notifications()
                    .notify(NotificationKind::Error, DELIVERY_FAILED_MESSAGE);
                state.submitter.settle();
                SubmitOutcome::DeliveryFailed {
                    error: e.to_string(),
                    notification,
                }
            }
        }
    }

    fn build_request(&self, draft: &BookingDraft) -> Option<BookingRequest> {
        let date = draft.selected_date?;
        let time = draft.selected_time.clone()?;
        let fields = &draft.fields;
        Some(BookingRequest {
            to_name: self.settings.recipient_name.clone(),
            from_name: fields.name.trim().to_string(),
            from_email: fields.email.trim().to_string(),
            phone_number: fields.phone.trim().to_string(),
            service_type: fields.service_type.trim().to_string(),
            booking_date: self.calendar.format_us_date(date),
            booking_time: time,
            message: fields.notes.clone(),
        })
    }

    async fn dispatch(&self, request: &BookingRequest) -> Result<DeliveryReceipt, DeliveryError> {
        let params = template_params(request).map_err(|e| {
            warn!("Could not encode booking template: {}", e);
            e
        })?;
        self.delivery.send(EmailTemplate::Booking, params).await
    }
}
