//! Booking calendar backend: month grid, date/time selection, human-check
//! challenge, validation and email submission behind a small REST API.

pub mod backend;

pub use backend::{create_router, initialize_backend, AppState};
