//! app/src/backend/io/rest/mappers/contact_mapper.rs

use crate::backend::domain::commands::contact::{SubmitContactCommand, SubmitContactResult};
use shared::{ContactRequest, ContactResponse};

pub struct ContactMapper;

impl ContactMapper {
    pub fn to_command(dto: ContactRequest) -> SubmitContactCommand {
        SubmitContactCommand {
            name: dto.name,
            email: dto.email,
            company: dto.company,
            message: dto.message,
        }
    }

    pub fn to_response(result: SubmitContactResult, dismiss_after_ms: u64) -> ContactResponse {
        ContactResponse {
            success: result.success,
            notification: result.notification.to_dto(dismiss_after_ms),
        }
    }
}
