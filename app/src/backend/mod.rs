//! # Backend Module
//!
//! Contains all non-UI logic for the booking widget.
//!
//! ## Architecture
//!
//! ```text
//! Page script (calendar, form, notifications)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (calendar, selection, validation, submission)
//!     ↓
//! Delivery Layer (EmailJS)
//! ```

pub mod config;
pub mod delivery;
pub mod domain;
pub mod io;

use anyhow::Result;
use axum::{http::HeaderValue, http::Method, Router};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::backend::config::AppConfig;
use crate::backend::delivery::{delivery_from_config, EmailDelivery};
use crate::backend::domain::{
    BookingService, BookingSettings, CalendarService, ChallengeService, Clock, ContactService,
    OperandSource, RandomOperands, SessionRegistry, SystemClock,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub clock: Arc<dyn Clock>,
    pub calendar_service: CalendarService,
    pub booking_service: BookingService,
    pub contact_service: ContactService,
    pub sessions: Arc<SessionRegistry>,
}

/// Initialize the backend with the real clock, RNG and configured email delivery
pub fn initialize_backend(config: AppConfig) -> Result<AppState> {
    info!("Setting up email delivery");
    let delivery = delivery_from_config(&config.email)?;
    Ok(initialize_backend_with(
        config,
        delivery,
        Arc::new(SystemClock),
        Arc::new(RandomOperands),
    ))
}

/// Initialize the backend with explicit collaborators
pub fn initialize_backend_with(
    config: AppConfig,
    delivery: Arc<dyn EmailDelivery>,
    clock: Arc<dyn Clock>,
    operands: Arc<dyn OperandSource>,
) -> AppState {
    info!("Setting up domain model");
    let challenges = ChallengeService::new(operands);
    let booking_service = BookingService::new(
        BookingSettings::from(&config),
        challenges,
        delivery.clone(),
        clock.clone(),
    );
    let contact_service = ContactService::new(config.recipient_name.clone(), delivery, clock.clone());
    let sessions = Arc::new(SessionRegistry::new(config.session_idle_minutes));

    AppState {
        config: Arc::new(config),
        clock,
        calendar_service: CalendarService::new(),
        booking_service,
        contact_service,
        sessions,
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    let cors = cors_layer(app_state.config.allowed_origin.as_deref());

    Router::new()
        .nest("/api", io::rest::api_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

fn cors_layer(allowed_origin: Option<&str>) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any);

    match allowed_origin.map(str::parse::<HeaderValue>) {
        Some(Ok(origin)) => base.allow_origin(origin),
        Some(Err(e)) => {
            warn!("Ignoring invalid allowed_origin: {}", e);
            base.allow_origin(Any)
        }
        None => base.allow_origin(Any),
    }
}
