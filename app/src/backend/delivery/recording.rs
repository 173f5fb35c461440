//! In-memory delivery double for tests.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use super::traits::{DeliveryError, DeliveryReceipt, EmailDelivery, EmailTemplate};

pub struct RecordingDelivery {
    fail: bool,
    calls: Mutex<Vec<(EmailTemplate, Map<String, Value>)>>,
    /// When set, each send waits for a permit before answering
    gate: Option<Arc<Notify>>,
    started: Arc<Notify>,
}

impl RecordingDelivery {
    pub fn succeeding() -> Self {
        Self::build(false, None)
    }

    pub fn failing() -> Self {
        Self::build(true, None)
    }

    /// Sends block until `gate.notify_one()` is called
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self::build(false, Some(gate))
    }

    fn build(fail: bool, gate: Option<Arc<Notify>>) -> Self {
        Self {
            fail,
            calls: Mutex::new(Vec::new()),
            gate,
            started: Arc::new(Notify::new()),
        }
    }

    /// Notified every time a send begins
    pub fn started(&self) -> Arc<Notify> {
        self.started.clone()
    }

    pub fn calls(&self) -> Vec<(EmailTemplate, Map<String, Value>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailDelivery for RecordingDelivery {
    async fn send(
        &self,
        template: EmailTemplate,
        params: Map<String, Value>,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        self.calls.lock().unwrap().push((template, params));
        self.started.notify_one();
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail {
            Err(DeliveryError::Transport("connection reset".to_string()))
        } else {
            Ok(DeliveryReceipt {
                status: 200,
                text: "OK".to_string(),
            })
        }
    }

    fn supports(&self, _template: EmailTemplate) -> bool {
        true
    }
}
