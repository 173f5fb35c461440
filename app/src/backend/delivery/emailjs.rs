//! EmailJS REST client.
//!
//! EmailJS renders a stored template with the posted parameters and sends it
//! from the configured email service. The account is identified by its public
//! key, sent as `user_id`.

use anyhow::Context;
use async_trait::async_trait;
use log::{error, info};
use serde::Serialize;
use serde_json::{Map, Value};

use super::traits::{DeliveryError, DeliveryReceipt, EmailDelivery, EmailTemplate};
use crate::backend::config::EmailJsConfig;

const SEND_PATH: &str = "/api/v1.0/email/send";

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: Map<String, Value>,
}

#[derive(Clone)]
pub struct EmailJsClient {
    config: EmailJsConfig,
    http: reqwest::Client,
}

impl EmailJsClient {
    pub fn new(config: EmailJsConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("booking-app/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client for EmailJS")?;
        Ok(Self { config, http })
    }

    fn send_url(&self) -> String {
        format!("{}{}", self.config.endpoint.trim_end_matches('/'), SEND_PATH)
    }

    fn template_id(&self, template: EmailTemplate) -> Option<&str> {
        let id = match template {
            EmailTemplate::Booking => Some(self.config.template_id.as_str()),
            EmailTemplate::Contact => self.config.contact_template_id.as_deref(),
        };
        id.filter(|id| !id.trim().is_empty())
    }
}

#[async_trait]
impl EmailDelivery for EmailJsClient {
    async fn send(
        &self,
        template: EmailTemplate,
        params: Map<String, Value>,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let template_id = self.template_id(template).ok_or(DeliveryError::NotConfigured)?;

        let request = SendRequest {
            service_id: &self.config.service_id,
            template_id,
            user_id: &self.config.public_key,
            template_params: params,
        };

        let response = self
            .http
            .post(self.send_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("📧 EmailJS request failed: {}", e);
                DeliveryError::Transport(e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        if status.is_success() {
            info!("📧 EmailJS accepted {:?} email ({} {})", template, status.as_u16(), text);
            Ok(DeliveryReceipt {
                status: status.as_u16(),
                text,
            })
        } else {
            error!("📧 EmailJS rejected {:?} email ({}): {}", template, status.as_u16(), text);
            Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body: text,
            })
        }
    }

    fn supports(&self, template: EmailTemplate) -> bool {
        self.template_id(template).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    type Captured = Arc<Mutex<Vec<Value>>>;

    async fn spawn_fake_emailjs(status: StatusCode, reply: &'static str) -> (String, Captured) {
        let captured: Captured = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route(
                SEND_PATH,
                post(move |State(store): State<Captured>, Json(body): Json<Value>| async move {
                    store.lock().unwrap().push(body);
                    (status, reply)
                }),
            )
            .with_state(captured.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), captured)
    }

    fn config(endpoint: String) -> EmailJsConfig {
        EmailJsConfig {
            endpoint,
            service_id: "service_test".to_string(),
            template_id: "template_booking".to_string(),
            contact_template_id: None,
            public_key: "public_key".to_string(),
        }
    }

    fn params() -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("from_name".to_string(), Value::String("Jane".to_string()));
        map.insert("booking_time".to_string(), Value::String("09:00".to_string()));
        map
    }

    #[tokio::test]
    async fn test_send_posts_emailjs_payload() {
        let (endpoint, captured) = spawn_fake_emailjs(StatusCode::OK, "OK").await;
        let client = EmailJsClient::new(config(endpoint)).unwrap();

        let receipt = client.send(EmailTemplate::Booking, params()).await.unwrap();
        assert_eq!(receipt, DeliveryReceipt { status: 200, text: "OK".to_string() });

        let bodies = captured.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["service_id"], "service_test");
        assert_eq!(bodies[0]["template_id"], "template_booking");
        assert_eq!(bodies[0]["user_id"], "public_key");
        assert_eq!(bodies[0]["template_params"]["from_name"], "Jane");
    }

    #[tokio::test]
    async fn test_non_success_status_is_rejection() {
        let (endpoint, _captured) =
            spawn_fake_emailjs(StatusCode::BAD_REQUEST, "The Public Key is invalid").await;
        let client = EmailJsClient::new(config(endpoint)).unwrap();

        match client.send(EmailTemplate::Booking, params()).await {
            Err(DeliveryError::Rejected { status, body }) => {
                assert_eq!(status, 400);
                assert_eq!(body, "The Public Key is invalid");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = EmailJsClient::new(config(format!("http://{}", addr))).unwrap();
        let result = client.send(EmailTemplate::Booking, params()).await;
        assert!(matches!(result, Err(DeliveryError::Transport(_))));
    }

    #[tokio::test]
    async fn test_contact_template_requires_configuration() {
        let client = EmailJsClient::new(config("http://127.0.0.1:9".to_string())).unwrap();
        assert!(client.supports(EmailTemplate::Booking));
        assert!(!client.supports(EmailTemplate::Contact));

        let result = client.send(EmailTemplate::Contact, params()).await;
        assert!(matches!(result, Err(DeliveryError::NotConfigured)));
    }
}
