//! # Configuration
//!
//! The backend reads a single YAML file (path from `BOOKING_CONFIG`, default
//! `booking.yaml`). Every field has a default, so a missing or broken file
//! still yields a working server with email delivery disabled.
//!
//! ```yaml
//! bind_address: "127.0.0.1:3000"
//! allowed_origin: "https://example.com"
//! recipient_name: "Alessandro Marangi"
//! time_slots: ["09:00", "10:00", "11:00", "14:00", "15:00", "16:00"]
//! service_types: ["Career Coaching", "CV Review"]
//! notification_ttl_ms: 4000
//! session_idle_minutes: 60
//! email:
//!   endpoint: "https://api.emailjs.com"
//!   service_id: "service_xxx"
//!   template_id: "template_xxx"
//!   contact_template_id: "template_yyy"
//!   public_key: "xxxx"
//! ```

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::backend::domain::models::notification::DEFAULT_NOTIFICATION_TTL_MS;

pub const CONFIG_PATH_ENV: &str = "BOOKING_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "booking.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailJsConfig {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub contact_template_id: Option<String>,
    pub public_key: String,
}

impl Default for EmailJsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.emailjs.com".to_string(),
            service_id: String::new(),
            template_id: String::new(),
            contact_template_id: None,
            public_key: String::new(),
        }
    }
}

impl EmailJsConfig {
    /// Delivery needs a service, a template and the account key
    pub fn is_configured(&self) -> bool {
        !self.service_id.trim().is_empty()
            && !self.template_id.trim().is_empty()
            && !self.public_key.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_address: String,
    pub allowed_origin: Option<String>,
    pub recipient_name: String,
    pub time_slots: Vec<String>,
    pub service_types: Vec<String>,
    pub notification_ttl_ms: u64,
    pub session_idle_minutes: i64,
    pub email: EmailJsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            allowed_origin: None,
            recipient_name: "Alessandro Marangi".to_string(),
            time_slots: ["09:00", "10:00", "11:00", "14:00", "15:00", "16:00"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            service_types: [
                "Career Coaching",
                "CV Review",
                "Interview Preparation",
                "LinkedIn Optimization",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
            session_idle_minutes: 60,
            email: EmailJsConfig::default(),
        }
    }
}

pub struct ConfigService;

impl ConfigService {
    pub fn load_config(config_path: &Path) -> Result<AppConfig> {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: AppConfig =
            serde_yaml::from_str(&content).with_context(|| "Failed to parse booking config YAML")?;

        if config.time_slots.is_empty() {
            return Err(anyhow::anyhow!("At least one time slot is required"));
        }

        Ok(config)
    }

    pub fn load_config_or_default(config_path: &Path) -> AppConfig {
        match Self::load_config(config_path) {
            Ok(config) => {
                info!("Loaded booking config from {:?}", config_path);
                config
            }
            Err(e) => {
                warn!("Failed to load booking config from {:?}: {:#}", config_path, e);
                info!("Using default booking config (email delivery disabled)");
                AppConfig::default()
            }
        }
    }
}
