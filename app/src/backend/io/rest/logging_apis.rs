use axum::{extract::State, http::StatusCode, response::Json};
use log::{debug, error, info, trace, warn};

use crate::backend::AppState;
use shared::{LogEntry, LogResponse};

/// Forward a page-side log line into the server log
pub async fn log_message(
    State(_state): State<AppState>,
    Json(entry): Json<LogEntry>,
) -> Result<Json<LogResponse>, StatusCode> {
    let component = entry.component.as_deref().unwrap_or("booking-page");
    let line = format!("[{}] {}", component, entry.message);

    match entry.level.to_lowercase().as_str() {
        "trace" => trace!("{}", line),
        "debug" => debug!("{}", line),
        "warn" | "warning" => warn!("{}", line),
        "error" => error!("{}", line),
        _ => info!("{}", line),
    }

    Ok(Json(LogResponse { success: true }))
}
