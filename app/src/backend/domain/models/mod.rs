pub mod booking;
pub mod challenge;
pub mod notification;
