use async_trait::async_trait;
use log::warn;
use serde_json::{Map, Value};

use super::traits::{DeliveryError, DeliveryReceipt, EmailDelivery, EmailTemplate};

/// Stand-in used when no email account is configured. Every send fails so a
/// booking is never confirmed without an email going out.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledDelivery;

#[async_trait]
impl EmailDelivery for DisabledDelivery {
    async fn send(
        &self,
        template: EmailTemplate,
        _params: Map<String, Value>,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        warn!("📧 Dropping {:?} email: delivery not configured", template);
        Err(DeliveryError::NotConfigured)
    }

    fn supports(&self, _template: EmailTemplate) -> bool {
        false
    }
}
