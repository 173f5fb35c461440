use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::BookingFormFields;

/// Form contents plus current selections, read at submit time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingDraft {
    pub selected_date: Option<NaiveDate>,
    pub selected_time: Option<String>,
    pub fields: BookingFormFields,
}

/// Flat template fields handed to the email-delivery collaborator.
///
/// Field names are the template variable names of the booking email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub to_name: String,
    pub from_name: String,
    pub from_email: String,
    pub phone_number: String,
    pub service_type: String,
    pub booking_date: String,
    pub booking_time: String,
    pub message: String,
}

/// Template fields of the general contact form email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub to_name: String,
    pub from_name: String,
    pub from_email: String,
    pub company: String,
    pub message: String,
}
