//! Portal services: crew authentication and SMS delivery.

pub mod auth;
pub mod sms;

pub use auth::CrewAuthService;
pub use sms::TwilioSms;
