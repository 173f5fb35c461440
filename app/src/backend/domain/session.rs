//! Per-visitor booking controller state.
//!
//! One `BookingSession` owns everything the widget mutates: the month cursor,
//! the selection, the live challenge, the form fields and the submit state.
//! Handlers receive the session explicitly instead of touching shared globals.

use chrono::{DateTime, Duration, Local};
use log::info;
use shared::BookingFormFields;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use uuid::Uuid;

use crate::backend::domain::calendar::CalendarCursor;
use crate::backend::domain::clock::Clock;
use crate::backend::domain::models::booking::BookingDraft;
use crate::backend::domain::models::challenge::Challenge;
use crate::backend::domain::notifications::NotificationCenter;
use crate::backend::domain::selection::SelectionState;
use crate::backend::domain::submitter::BookingSubmitter;

#[derive(Debug, Clone)]
pub struct SessionState {
    pub cursor: CalendarCursor,
    pub selection: SelectionState,
    pub challenge: Challenge,
    pub fields: BookingFormFields,
    pub submitter: BookingSubmitter,
}

impl SessionState {
    pub fn new(cursor: CalendarCursor, challenge: Challenge) -> Self {
        Self {
            cursor,
            selection: SelectionState::new(),
            challenge,
            fields: BookingFormFields::default(),
            submitter: BookingSubmitter::new(),
        }
    }

    /// Snapshot of the form and selections as they stand right now
    pub fn draft(&self) -> BookingDraft {
        BookingDraft {
            selected_date: self.selection.selected_date(),
            selected_time: self.selection.selected_time().map(str::to_string),
            fields: self.fields.clone(),
        }
    }
}

pub struct BookingSession {
    id: Uuid,
    state: Mutex<SessionState>,
    notifications: NotificationCenter,
    last_seen: Mutex<DateTime<Local>>,
}

impl BookingSession {
    pub fn new(state: SessionState, clock: Arc<dyn Clock>, notification_ttl_ms: u64) -> Self {
        let now = clock.now();
        Self {
            id: Uuid::new_v4(),
            state: Mutex::new(state),
            notifications: NotificationCenter::new(clock, notification_ttl_ms),
            last_seen: Mutex::new(now),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn touch(&self, now: DateTime<Local>) {
        *self.last_seen.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn last_seen(&self) -> DateTime<Local> {
        *self.last_seen.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// All live sessions, keyed by id
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<BookingSession>>>,
    idle_timeout: Duration,
}

impl SessionRegistry {
    pub fn new(idle_minutes: i64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout: Duration::minutes(idle_minutes.max(1)),
        }
    }

    pub fn insert(&self, session: BookingSession) -> Arc<BookingSession> {
        let session = Arc::new(session);
        self.sessions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(session.id(), session.clone());
        session
    }

    pub fn get(&self, id: &Uuid) -> Option<Arc<BookingSession>> {
        self.sessions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
    }

    /// Drop sessions not seen within the idle timeout. Returns how many were removed.
    pub fn prune_idle(&self, now: DateTime<Local>) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        let before = sessions.len();
        sessions.retain(|_, session| now - session.last_seen() < self.idle_timeout);
        let removed = before - sessions.len();
        if removed > 0 {
            info!("Pruned {} idle booking sessions", removed);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
