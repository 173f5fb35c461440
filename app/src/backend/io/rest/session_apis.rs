//! Per-visitor booking widget endpoints.
//!
//! Every mutating call answers with the freshly rendered [`SessionView`] so
//! the page can redraw from a single payload.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use log::{error, info, warn};
use shared::{
    BookingFormFields, NotificationListResponse, SelectDateRequest, SelectTimeRequest, SessionView,
};
use uuid::Uuid;

use crate::backend::domain::{BookingInputError, BookingSession};
use crate::backend::io::rest::find_session;
use crate::backend::io::rest::mappers::booking_mapper::BookingMapper;
use crate::backend::AppState;

/// Create a router for booking session APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/:id", get(get_session))
        .route("/:id/calendar/previous", post(previous_month))
        .route("/:id/calendar/next", post(next_month))
        .route("/:id/selection/date", post(select_date))
        .route("/:id/selection/time", post(select_time))
        .route("/:id/form", put(update_form))
        .route("/:id/submit", post(submit_booking))
        .route("/:id/notifications", get(list_notifications))
}

fn render(state: &AppState, session: &BookingSession) -> Result<SessionView, Response> {
    state.booking_service.render(session).map_err(|e| {
        error!("Failed to render session {}: {}", session.id(), e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
    })
}

fn render_response(state: &AppState, session: &BookingSession, status: StatusCode) -> Response {
    match render(state, session) {
        Ok(view) => (status, Json(view)).into_response(),
        Err(response) => response,
    }
}

fn input_error(session: &BookingSession, e: BookingInputError) -> Response {
    warn!("Rejected input for session {}: {}", session.id(), e);
    (StatusCode::BAD_REQUEST, e.to_string()).into_response()
}

/// Open a new booking session on the current month
async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/sessions");

    state.sessions.prune_idle(state.clock.now());
    let session = state.sessions.insert(state.booking_service.open_session());
    render_response(&state, &session, StatusCode::CREATED)
}

async fn get_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    info!("GET /api/sessions/{}", id);

    match find_session(&state, &id) {
        Ok(session) => render_response(&state, &session, StatusCode::OK),
        Err(response) => response,
    }
}

async fn previous_month(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    info!("POST /api/sessions/{}/calendar/previous", id);

    match find_session(&state, &id) {
        Ok(session) => {
            state.booking_service.previous_month(&session);
            render_response(&state, &session, StatusCode::OK)
        }
        Err(response) => response,
    }
}

async fn next_month(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    info!("POST /api/sessions/{}/calendar/next", id);

    match find_session(&state, &id) {
        Ok(session) => {
            state.booking_service.next_month(&session);
            render_response(&state, &session, StatusCode::OK)
        }
        Err(response) => response,
    }
}

async fn select_date(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectDateRequest>,
) -> impl IntoResponse {
    info!("POST /api/sessions/{}/selection/date - request: {:?}", id, request);

    let session = match find_session(&state, &id) {
        Ok(session) => session,
        Err(response) => return response,
    };

    let command = BookingMapper::to_select_date_command(request);
    match state.booking_service.select_date(&session, command) {
        Ok(()) => render_response(&state, &session, StatusCode::OK),
        Err(e) => input_error(&session, e),
    }
}

async fn select_time(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectTimeRequest>,
) -> impl IntoResponse {
    info!("POST /api/sessions/{}/selection/time - request: {:?}", id, request);

    let session = match find_session(&state, &id) {
        Ok(session) => session,
        Err(response) => return response,
    };

    let command = BookingMapper::to_select_time_command(request);
    match state.booking_service.select_time(&session, command) {
        Ok(()) => render_response(&state, &session, StatusCode::OK),
        Err(e) => input_error(&session, e),
    }
}

async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(fields): Json<BookingFormFields>,
) -> impl IntoResponse {
    info!("PUT /api/sessions/{}/form", id);

    match find_session(&state, &id) {
        Ok(session) => {
            state.booking_service.update_form(&session, fields);
            render_response(&state, &session, StatusCode::OK)
        }
        Err(response) => response,
    }
}

/// Submit the booking. Validation failures are reported in the payload, not as HTTP errors.
async fn submit_booking(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    info!("POST /api/sessions/{}/submit", id);

    let session = match find_session(&state, &id) {
        Ok(session) => session,
        Err(response) => return response,
    };

    // Runs detached so a dropped connection cannot strand the session in Sending
    let service = state.booking_service.clone();
    let submitting = session.clone();
    let outcome = match tokio::spawn(async move { service.submit(&submitting).await }).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Submit task for session {} failed: {}", id, e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Submit failed".to_string()).into_response();
        }
    };

    let view = match render(&state, &session) {
        Ok(view) => view,
        Err(response) => return response,
    };

    let response = BookingMapper::to_submit_response(&outcome, view, state.config.notification_ttl_ms);
    (StatusCode::OK, Json(response)).into_response()
}

/// Notifications that have not yet expired, oldest first
async fn list_notifications(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match find_session(&state, &id) {
        Ok(session) => {
            let notifications = session.notifications().active();
            (StatusCode::OK, Json(NotificationListResponse { notifications })).into_response()
        }
        Err(response) => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::delivery::recording::RecordingDelivery;
    use crate::backend::io::rest::test_support::{call, test_app_state, test_router};
    use axum::http::Method;
    use serde_json::json;
    use shared::{SubmitBookingResponse, SubmitOutcomeKind};
    use std::sync::Arc;

    async fn create(app: &Router) -> Result<SessionView, Box<dyn std::error::Error>> {
        let (status, body) = call(app, Method::POST, "/api/sessions", None).await?;
        assert_eq!(status, StatusCode::CREATED);
        Ok(serde_json::from_value(body)?)
    }

    #[tokio::test]
    async fn test_full_booking_flow() -> Result<(), Box<dyn std::error::Error>> {
        let delivery = Arc::new(RecordingDelivery::succeeding());
        let state = test_app_state(delivery.clone());
        let app = test_router(&state);

        let view = create(&app).await?;
        assert_eq!(view.calendar.title, "February 2024");
        assert_eq!(view.challenge_question, "3 + 4 = ?");
        let base = format!("/api/sessions/{}", view.session_id);

        let (status, body) = call(
            &app,
            Method::POST,
            &format!("{}/selection/date", base),
            Some(json!({ "year": 2024, "month": 1, "day": 20 })),
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["selected_date_display"], "Tuesday, February 20, 2024");

        let (status, _) = call(
            &app,
            Method::POST,
            &format!("{}/selection/time", base),
            Some(json!({ "slot": "14:00" })),
        )
        .await?;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(
            &app,
            Method::PUT,
            &format!("{}/form", base),
            Some(json!({
                "service_type": "Career Coaching",
                "name": "Jane",
                "email": "jane@x.com",
                "challenge_answer": "7"
            })),
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["form"]["name"], "Jane");

        let (status, body) = call(&app, Method::POST, &format!("{}/submit", base), None).await?;
        assert_eq!(status, StatusCode::OK);
        let submitted: SubmitBookingResponse = serde_json::from_value(body)?;
        assert_eq!(submitted.outcome, SubmitOutcomeKind::Delivered);
        assert!(submitted.notification.is_some());
        assert_eq!(submitted.session.selected_date, None);
        assert_eq!(submitted.session.form, BookingFormFields::default());
        assert_eq!(submitted.session.challenge_question, "5 + 6 = ?");
        assert!(submitted.session.submit_button.enabled);

        let calls = delivery.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1["booking_date"], "2/20/2024");
        assert_eq!(calls[0].1["booking_time"], "14:00");

        let (status, body) = call(&app, Method::GET, &format!("{}/notifications", base), None).await?;
        assert_eq!(status, StatusCode::OK);
        let list: NotificationListResponse = serde_json::from_value(body)?;
        assert_eq!(list.notifications.len(), 1);
        assert_eq!(
            list.notifications[0].message,
            "Booking confirmed for 2/20/2024 at 14:00! Email sent."
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_without_date_is_rejected_in_payload() -> Result<(), Box<dyn std::error::Error>> {
        let delivery = Arc::new(RecordingDelivery::succeeding());
        let state = test_app_state(delivery.clone());
        let app = test_router(&state);

        let view = create(&app).await?;
        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/api/sessions/{}/submit", view.session_id),
            None,
        )
        .await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "rejected");
        assert_eq!(body["reason"], "missing_date");
        assert_eq!(body["notification"]["kind"], "error");
        assert_eq!(body["session"]["submission_state"], "idle");
        assert_eq!(delivery.call_count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_navigation_endpoints() -> Result<(), Box<dyn std::error::Error>> {
        let state = test_app_state(Arc::new(RecordingDelivery::succeeding()));
        let app = test_router(&state);

        let view = create(&app).await?;
        let base = format!("/api/sessions/{}", view.session_id);

        let (_, body) = call(&app, Method::POST, &format!("{}/calendar/previous", base), None).await?;
        assert_eq!(body["calendar"]["title"], "January 2024");
        let (_, body) = call(&app, Method::POST, &format!("{}/calendar/next", base), None).await?;
        let (_, body2) = call(&app, Method::POST, &format!("{}/calendar/next", base), None).await?;
        assert_eq!(body["calendar"]["title"], "February 2024");
        assert_eq!(body2["calendar"]["title"], "March 2024");

        let (status, body) = call(&app, Method::GET, &base, None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["calendar"]["title"], "March 2024");
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
        let state = test_app_state(Arc::new(RecordingDelivery::succeeding()));
        let app = test_router(&state);

        let uri = format!("/api/sessions/{}", Uuid::new_v4());
        let (status, _) = call(&app, Method::GET, &uri, None).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(&app, Method::POST, &format!("{}/submit", uri), None).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_selection_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
        let state = test_app_state(Arc::new(RecordingDelivery::succeeding()));
        let app = test_router(&state);

        let view = create(&app).await?;
        let base = format!("/api/sessions/{}", view.session_id);

        let (status, _) = call(
            &app,
            Method::POST,
            &format!("{}/selection/date", base),
            Some(json!({ "year": 2024, "month": 1, "day": 13 })),
        )
        .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(
            &app,
            Method::POST,
            &format!("{}/selection/time", base),
            Some(json!({ "slot": "09:00" })),
        )
        .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(
            &app,
            Method::POST,
            &format!("{}/selection/date", base),
            Some(json!({ "year": 2024, "month": 1, "day": 30 })),
        )
        .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        Ok(())
    }
}
