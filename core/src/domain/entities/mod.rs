//! Domain entities representing core business objects.

pub mod otp_challenge;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use otp_challenge::{OtpChallenge, CODE_LENGTH, DEFAULT_TTL_SECONDS};
pub use token::Claims;
pub use user::{User, UserRole, UserStatus};
