use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;

use crate::backend::io::rest::mappers::contact_mapper::ContactMapper;
use crate::backend::AppState;
use shared::ContactRequest;

/// Submit the general contact form
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> impl IntoResponse {
    info!("POST /api/contact");

    let command = ContactMapper::to_command(request);
    let result = state.contact_service.submit(command).await;
    let response = ContactMapper::to_response(result, state.config.notification_ttl_ms);

    (StatusCode::OK, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use crate::backend::delivery::recording::RecordingDelivery;
    use crate::backend::domain::{CONTACT_INCOMPLETE_MESSAGE, CONTACT_SENT_MESSAGE};
    use crate::backend::io::rest::test_support::{call, test_app_state, test_router};
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_submit_contact() -> Result<(), Box<dyn std::error::Error>> {
        let delivery = Arc::new(RecordingDelivery::succeeding());
        let state = test_app_state(delivery.clone());
        let app = test_router(&state);

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/contact",
            Some(json!({ "name": "Jane", "email": "jane@x.com", "message": "Hello" })),
        )
        .await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["notification"]["kind"], "success");
        assert_eq!(body["notification"]["message"], CONTACT_SENT_MESSAGE);
        assert_eq!(body["notification"]["dismiss_after_ms"], 4000);
        assert_eq!(delivery.call_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_contact_missing_fields() -> Result<(), Box<dyn std::error::Error>> {
        let delivery = Arc::new(RecordingDelivery::succeeding());
        let state = test_app_state(delivery.clone());
        let app = test_router(&state);

        let (status, body) = call(&app, Method::POST, "/api/contact", Some(json!({ "name": "Jane" }))).await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["notification"]["kind"], "error");
        assert_eq!(body["notification"]["message"], CONTACT_INCOMPLETE_MESSAGE);
        assert_eq!(delivery.call_count(), 0);
        Ok(())
    }
}
