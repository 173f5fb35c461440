pub mod booking_mapper;
pub mod contact_mapper;
