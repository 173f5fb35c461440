//! # Delivery Module
//!
//! Outbound collaborators of the booking flow. The domain layer only sees the
//! [`EmailDelivery`] trait; this module provides the EmailJS REST client and a
//! disabled stand-in used when no email account is configured.

pub mod traits;
pub mod emailjs;
pub mod disabled;
#[cfg(test)]
pub mod recording;

use std::sync::Arc;

use log::{info, warn};

use crate::backend::config::EmailJsConfig;

pub use disabled::DisabledDelivery;
pub use emailjs::EmailJsClient;
pub use traits::*;

/// Pick the delivery implementation for the given email settings
pub fn delivery_from_config(config: &EmailJsConfig) -> anyhow::Result<Arc<dyn EmailDelivery>> {
    if config.is_configured() {
        info!("📧 Email delivery via EmailJS at {}", config.endpoint);
        Ok(Arc::new(EmailJsClient::new(config.clone())?))
    } else {
        warn!("📧 Email delivery is not configured; bookings will fail to send");
        Ok(Arc::new(DisabledDelivery))
    }
}
