//! # IO Module
//!
//! Interface layer between the booking page and the domain logic.
//!
//! Translates JSON requests into domain commands, domain results into the
//! DTOs of the `shared` crate, and domain errors into HTTP status codes.
//!
//! ## Current Implementation
//!
//! - **Web Framework**: Axum
//! - **Serialization**: Serde JSON
//! - **State Management**: `AppState` injected through Axum's `State` extractor

pub mod rest;

pub use rest::*;
