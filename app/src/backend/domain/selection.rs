//! Date and time-slot selection for one booking draft.
//!
//! Time slots are only eligible once a date is chosen. Picking a different
//! date drops the previously chosen slot so a booking never carries a time the
//! visitor confirmed for another day.

use chrono::NaiveDate;
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Please select a date first")]
    DateRequired,
    #[error("{0} cannot be booked")]
    DayNotSelectable(NaiveDate),
    #[error("Unknown time slot: {0}")]
    UnknownTimeSlot(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected_date: Option<NaiveDate>,
    selected_time: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selected date; time slots become eligible
    pub fn select_date(&mut self, date: NaiveDate) {
        if self.selected_date != Some(date) && self.selected_time.take().is_some() {
            debug!("Date changed to {}, clearing chosen time slot", date);
        }
        self.selected_date = Some(date);
    }

    /// Replace the selected time slot; requires a date
    pub fn select_time(&mut self, slot: impl Into<String>) -> Result<(), SelectionError> {
        if !self.time_slots_enabled() {
            return Err(SelectionError::DateRequired);
        }
        self.selected_time = Some(slot.into());
        Ok(())
    }

    pub fn reset(&mut self) {
        self.selected_date = None;
        self.selected_time = None;
    }

    pub fn time_slots_enabled(&self) -> bool {
        self.selected_date.is_some()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_time(&self) -> Option<&str> {
        self.selected_time.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, day).unwrap()
    }

    #[test]
    fn test_time_requires_date() {
        let mut selection = SelectionState::new();
        assert!(!selection.time_slots_enabled());
        assert_eq!(selection.select_time("09:00"), Err(SelectionError::DateRequired));
        assert_eq!(selection.selected_time(), None);
    }

    #[test]
    fn test_select_date_then_time() {
        let mut selection = SelectionState::new();
        selection.select_date(date(20));
        assert!(selection.time_slots_enabled());
        selection.select_time("10:00").unwrap();
        selection.select_time("14:00").unwrap();
        assert_eq!(selection.selected_date(), Some(date(20)));
        assert_eq!(selection.selected_time(), Some("14:00"));
    }

    #[test]
    fn test_changing_date_clears_time() {
        let mut selection = SelectionState::new();
        selection.select_date(date(20));
        selection.select_time("10:00").unwrap();
        selection.select_date(date(21));
        assert_eq!(selection.selected_time(), None);
    }

    #[test]
    fn test_reselecting_same_date_keeps_time() {
        let mut selection = SelectionState::new();
        selection.select_date(date(20));
        selection.select_time("10:00").unwrap();
        selection.select_date(date(20));
        assert_eq!(selection.selected_time(), Some("10:00"));
    }

    #[test]
    fn test_reset_clears_both() {
        let mut selection = SelectionState::new();
        selection.select_date(date(20));
        selection.select_time("10:00").unwrap();
        selection.reset();
        assert_eq!(selection, SelectionState::default());
        assert!(!selection.time_slots_enabled());
    }
}
