use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::{info, warn};

use crate::backend::AppState;
use shared::CalendarMonthRequest;

/// Create a router for stateless calendar APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/month", get(get_calendar_month))
        .route("/current-date", get(get_current_date))
}

/// Get the 42-cell grid for a month (zero-based) relative to today
async fn get_calendar_month(
    State(state): State<AppState>,
    Query(query): Query<CalendarMonthRequest>,
) -> impl IntoResponse {
    info!("GET /api/calendar/month - query: {:?}", query);

    let today = state.clock.today();
    match state.calendar_service.generate_calendar_month(query.year, query.month, today) {
        Ok(calendar_month) => (StatusCode::OK, Json(calendar_month)).into_response(),
        Err(e) => {
            warn!("Rejected calendar request: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Get current date information from the backend clock
async fn get_current_date(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/calendar/current-date");

    let current_date = state.calendar_service.current_date(state.clock.today());
    (StatusCode::OK, Json(current_date)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::delivery::recording::RecordingDelivery;
    use crate::backend::io::rest::test_support::{call, test_app_state, test_router};
    use axum::http::Method;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_get_calendar_month() -> Result<(), Box<dyn std::error::Error>> {
        let state = test_app_state(Arc::new(RecordingDelivery::succeeding()));
        let app = test_router(&state);

        let (status, body) = call(&app, Method::GET, "/api/calendar/month?year=2024&month=1", None).await?;
        assert_eq!(status, StatusCode::OK);

        let month: shared::CalendarMonth = serde_json::from_value(body)?;
        assert_eq!(month.title, "February 2024");
        assert_eq!(month.days.len(), 42);
        assert_eq!(month.first_day_of_week, 4);

        let today: Vec<_> = month.days.iter().filter(|d| d.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].day_number, 14);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_calendar_month_invalid_month() -> Result<(), Box<dyn std::error::Error>> {
        let state = test_app_state(Arc::new(RecordingDelivery::succeeding()));
        let app = test_router(&state);

        let (status, _) = call(&app, Method::GET, "/api/calendar/month?year=2024&month=12", None).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_current_date() -> Result<(), Box<dyn std::error::Error>> {
        let state = test_app_state(Arc::new(RecordingDelivery::succeeding()));
        let app = test_router(&state);

        let (status, body) = call(&app, Method::GET, "/api/calendar/current-date", None).await?;
        assert_eq!(status, StatusCode::OK);
        let current: shared::CurrentDateResponse = serde_json::from_value(body)?;
        assert_eq!(current.iso_date, "2024-02-14");
        assert_eq!(current.month, 1);
        assert_eq!(current.formatted_date, "February 14, 2024");
        Ok(())
    }
}
