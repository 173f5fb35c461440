//! # REST API Interface Layer
//!
//! HTTP endpoints the booking page calls. This layer handles:
//! - JSON request/response serialization
//! - Mapping shared DTOs to domain commands
//! - Error translation from domain to HTTP status codes
//! - Request logging
//!
//! Submission outcomes (including validation rejections) are reported with
//! `200 OK` and an outcome payload; only malformed input and unknown sessions
//! are HTTP errors.

pub mod calendar_apis;
pub mod session_apis;
pub mod contact_apis;
pub mod logging_apis;
pub mod mappers;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use log::warn;
use std::sync::Arc;
use uuid::Uuid;

use crate::backend::domain::BookingSession;
use crate::backend::AppState;

/// All `/api` routes
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/calendar", calendar_apis::router())
        .nest("/sessions", session_apis::router())
        .route("/contact", post(contact_apis::submit_contact))
        .route("/logs", post(logging_apis::log_message))
}

/// Look up a live session and mark it as recently used
pub(crate) fn find_session(state: &AppState, id: &Uuid) -> Result<Arc<BookingSession>, Response> {
    match state.sessions.get(id) {
        Some(session) => {
            session.touch(state.clock.now());
            Ok(session)
        }
        None => {
            warn!("Unknown booking session {}", id);
            Err((StatusCode::NOT_FOUND, format!("Unknown session: {}", id)).into_response())
        }
    }
}
