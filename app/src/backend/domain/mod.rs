//! # Domain Module
//!
//! Business logic of the booking widget, independent of HTTP and of the email
//! provider.
//!
//! ## Module Organization
//!
//! - **calendar**: 42-cell month grid, month cursor, date formatting
//! - **clock**: injectable source of "today"
//! - **selection**: selected date and time slot
//! - **challenge_service**: arithmetic human-verification puzzle
//! - **validation**: ordered draft checks
//! - **submitter**: submit-button state machine
//! - **booking_service**: session operations and the submit cycle
//! - **notifications**: transient success/error messages
//! - **contact_service**: general contact form
//! - **session**: per-visitor controller state and registry
//!
//! ## Business Rules
//!
//! - Only today and later days of the displayed month can be selected
//! - Time slots unlock once a date is selected
//! - A failed challenge is never reused
//! - One email send per session at a time; failures keep the draft

pub mod calendar;
pub mod clock;
pub mod selection;
pub mod challenge_service;
pub mod validation;
pub mod submitter;
pub mod booking_service;
pub mod notifications;
pub mod contact_service;
pub mod session;
pub mod commands;
pub mod models;

pub use calendar::*;
pub use clock::*;
pub use selection::*;
pub use challenge_service::{ChallengeService, OperandSource, RandomOperands};
pub use validation::*;
pub use submitter::*;
pub use booking_service::*;
pub use notifications::*;
pub use contact_service::*;
pub use session::*;
