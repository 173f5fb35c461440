//! Transient success/error messages for the page.
//!
//! Messages auto-dismiss: listing only returns those younger than the
//! configured lifetime, measured against the injected clock.

use chrono::Duration;
use log::debug;
use shared::{NotificationDto, NotificationKind};
use std::sync::{Arc, Mutex};

use crate::backend::domain::clock::Clock;
use crate::backend::domain::models::notification::Notification;

/// Where the domain layer sends user-visible messages
pub trait NotificationSink: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str) -> Notification;
}

pub struct NotificationCenter {
    clock: Arc<dyn Clock>,
    ttl_ms: u64,
    entries: Mutex<Vec<Notification>>,
}

impl NotificationCenter {
    pub fn new(clock: Arc<dyn Clock>, ttl_ms: u64) -> Self {
        Self {
            clock,
            ttl_ms,
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    /// Notifications still on screen, oldest first. Expired ones are dropped.
    pub fn active(&self) -> Vec<NotificationDto> {
        let now = self.clock.now();
        let ttl = Duration::milliseconds(self.ttl_ms as i64);
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.retain(|n| now - n.created_at < ttl);
        entries.iter().map(|n| n.to_dto(self.ttl_ms)).collect()
    }
}

impl NotificationSink for NotificationCenter {
    fn notify(&self, kind: NotificationKind, message: &str) -> Notification {
        debug!("Notification ({:?}): {}", kind, message);
        let notification = Notification::new(kind, message, self.clock.now());
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification.clone());
        notification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::clock::FixedClock;
    use chrono::NaiveDate;

    fn setup() -> (Arc<FixedClock>, NotificationCenter) {
        let clock = Arc::new(FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
        let center = NotificationCenter::new(clock.clone(), 4000);
        (clock, center)
    }

    #[test]
    fn test_notifications_listed_oldest_first() {
        let (_clock, center) = setup();
        center.notify(NotificationKind::Error, "Please select a date");
        center.notify(NotificationKind::Success, "Booked");

        let active = center.active();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].message, "Please select a date");
        assert_eq!(active[0].kind, NotificationKind::Error);
        assert_eq!(active[1].dismiss_after_ms, 4000);
    }

    #[test]
    fn test_notifications_expire_after_ttl() {
        let (clock, center) = setup();
        center.notify(NotificationKind::Error, "old");
        clock.advance(Duration::milliseconds(3000));
        center.notify(NotificationKind::Success, "new");
        clock.advance(Duration::milliseconds(1500));

        let active = center.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "new");

        clock.advance(Duration::milliseconds(4000));
        assert!(center.active().is_empty());
    }
}
