//! Domain-level command and result types.
//! The REST layer maps the public DTOs in the `shared` crate onto these.

pub mod selection {
    /// Day click on the calendar grid (month is zero-based)
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SelectDateCommand {
        pub year: i32,
        pub month: u32,
        pub day: u32,
    }

    /// Click on a time-slot button
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SelectTimeCommand {
        pub slot: String,
    }
}

pub mod contact {
    use crate::backend::domain::models::notification::Notification;

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct SubmitContactCommand {
        pub name: String,
        pub email: String,
        pub company: String,
        pub message: String,
    }

    #[derive(Debug, Clone)]
    pub struct SubmitContactResult {
        pub success: bool,
        pub notification: Notification,
    }
}
