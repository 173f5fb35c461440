use chrono::{DateTime, Local};
use shared::{NotificationDto, NotificationKind};
use uuid::Uuid;

/// Default lifetime of a transient notification
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 4000;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Local>,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>, created_at: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            created_at,
        }
    }

    pub fn to_dto(&self, dismiss_after_ms: u64) -> NotificationDto {
        NotificationDto {
            id: self.id,
            kind: self.kind,
            message: self.message.clone(),
            dismiss_after_ms,
        }
    }
}
