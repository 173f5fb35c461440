//! # Delivery Traits
//!
//! Abstraction over the third-party transactional email service so the
//! booking flow can be driven by a real client or a test double.

use async_trait::async_trait;
use serde_json::{Map, Value};

/// Opaque success signal from the email service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub status: u16,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Email delivery is not configured")]
    NotConfigured,
    #[error("Email service unreachable: {0}")]
    Transport(String),
    #[error("Email service rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("Could not encode template parameters: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Which email template a message is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTemplate {
    Booking,
    Contact,
}

/// Sends a flat map of named string fields through an email template.
///
/// A single attempt per call; retries are left to the visitor.
#[async_trait]
pub trait EmailDelivery: Send + Sync {
    async fn send(
        &self,
        template: EmailTemplate,
        params: Map<String, Value>,
    ) -> Result<DeliveryReceipt, DeliveryError>;

    /// Whether `template` can be sent at all
    fn supports(&self, template: EmailTemplate) -> bool;
}

/// Flatten a serializable template struct into the string map the service expects
pub fn template_params<T: serde::Serialize>(value: &T) -> Result<Map<String, Value>, DeliveryError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            Ok(map)
        }
    }
}
