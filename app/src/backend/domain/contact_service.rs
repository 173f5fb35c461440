//! General contact form ("send us a message").
//!
//! Name, email and message are required. The message is always logged and is
//! additionally emailed when a contact template is configured.

use log::{error, info};
use shared::NotificationKind;
use std::sync::Arc;

use crate::backend::delivery::{template_params, EmailDelivery, EmailTemplate};
use crate::backend::domain::clock::Clock;
use crate::backend::domain::commands::contact::{SubmitContactCommand, SubmitContactResult};
use crate::backend::domain::models::booking::ContactMessage;
use crate::backend::domain::models::notification::Notification;

pub const CONTACT_SENT_MESSAGE: &str = "Message Sent! We'll get back to you soon.";
pub const CONTACT_INCOMPLETE_MESSAGE: &str = "Please fill in your name, email and message";
pub const CONTACT_FAILED_MESSAGE: &str = "Message failed to send. Please try again or contact us directly.";

#[derive(Clone)]
pub struct ContactService {
    recipient_name: String,
    delivery: Arc<dyn EmailDelivery>,
    clock: Arc<dyn Clock>,
}

impl ContactService {
    pub fn new(recipient_name: String, delivery: Arc<dyn EmailDelivery>, clock: Arc<dyn Clock>) -> Self {
        Self {
            recipient_name,
            delivery,
            clock,
        }
    }

    pub async fn submit(&self, command: SubmitContactCommand) -> SubmitContactResult {
        let name = command.name.trim();
        let email = command.email.trim();
        let message = command.message.trim();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            info!("Contact form rejected: missing required fields");
            return self.result(false, NotificationKind::Error, CONTACT_INCOMPLETE_MESSAGE);
        }

        info!(
            "Contact form submitted by {} ({} characters, company: {:?})",
            name,
            message.len(),
            command.company.trim()
        );

        if !self.delivery.supports(EmailTemplate::Contact) {
            return self.result(true, NotificationKind::Success, CONTACT_SENT_MESSAGE);
        }

        let contact = ContactMessage {
            to_name: self.recipient_name.clone(),
            from_name: name.to_string(),
            from_email: email.to_string(),
            company: command.company.trim().to_string(),
            message: message.to_string(),
        };

        let sent = match template_params(&contact) {
            Ok(params) => self.delivery.send(EmailTemplate::Contact, params).await,
            Err(e) => Err(e),
        };

        match sent {
            Ok(_) => self.result(true, NotificationKind::Success, CONTACT_SENT_MESSAGE),
            Err(e) => {
                error!("Contact email failed: {}", e);
                self.result(false, NotificationKind::Error, CONTACT_FAILED_MESSAGE)
            }
        }
    }

    fn result(&self, success: bool, kind: NotificationKind, message: &str) -> SubmitContactResult {
        SubmitContactResult {
            success,
            notification: Notification::new(kind, message, self.clock.now()),
        }
    }
}
