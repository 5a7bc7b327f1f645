//! Value objects exchanged with callers of the core services.

pub mod auth_response;
pub mod registration_profile;

// Re-export commonly used types
pub use auth_response::{AuthResponse, OtpRequestAck};
pub use registration_profile::RegistrationProfile;
