//! Wire types shared between the booking page and the booking backend.
//!
//! Months are zero-based throughout (0 = January, 11 = December), matching the
//! page script's calendar cursor.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which part of the 6x7 grid a cell belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CalendarDayType {
    /// Trailing day of the previous month shown before day 1
    PaddingBefore,
    /// Actual day within the displayed month
    MonthDay,
    /// Leading day of the next month filling the grid up to 42 cells
    PaddingAfter,
}

/// One cell of the month grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DaySlot {
    pub day_number: u32,
    pub day_type: CalendarDayType,
    pub in_current_month: bool,
    pub is_today: bool,
    pub is_past: bool,
    pub is_selectable: bool,
    /// Set only when rendered for a session whose selected date is this day
    pub is_selected: bool,
    /// ISO date (`YYYY-MM-DD`) for days of the displayed month
    pub iso_date: Option<String>,
}

/// A fully rendered month, always 42 cells
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub title: String, // e.g. "February 2024"
    pub first_day_of_week: u32, // 0 = Sunday
    pub days: Vec<DaySlot>,
}

/// Query for a stateless month grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarMonthRequest {
    pub year: i32,
    pub month: u32,
}

/// Current date information from the backend clock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentDateResponse {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub formatted_date: String, // e.g., "October 19, 2026"
    pub iso_date: String,       // e.g., "2026-10-19"
}

/// A bookable time of day and its current UI status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSlotView {
    pub slot: String,
    pub enabled: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectDateRequest {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectTimeRequest {
    pub slot: String,
}

/// Free-text inputs of the booking form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookingFormFields {
    #[serde(default)]
    pub service_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub challenge_answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmitButtonView {
    pub enabled: bool,
    pub label: String,
}

/// Everything the page needs to render the booking widget for one visitor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionView {
    pub session_id: Uuid,
    pub calendar: CalendarMonth,
    pub selected_date: Option<String>,
    pub selected_date_display: String,
    pub time_slots: Vec<TimeSlotView>,
    pub service_types: Vec<String>,
    pub form: BookingFormFields,
    pub challenge_question: String,
    pub submit_button: SubmitButtonView,
    pub submission_state: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationDto {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub dismiss_after_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationDto>,
}

/// How a submit click ended
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcomeKind {
    /// The control was disabled (a send is already in flight)
    Ignored,
    Rejected,
    Delivered,
    DeliveryFailed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmitBookingResponse {
    pub outcome: SubmitOutcomeKind,
    /// Rejection reason code, e.g. "missing_date"
    pub reason: Option<String>,
    pub notification: Option<NotificationDto>,
    pub session: SessionView,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactResponse {
    pub success: bool,
    pub notification: NotificationDto,
}

/// A log line forwarded from the page script
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogResponse {
    pub success: bool,
}
