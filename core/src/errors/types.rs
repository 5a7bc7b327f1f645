//! Domain-specific error types for authentication and token operations
//!
//! Error-to-code conversion happens here so every surface reports the same
//! taxonomy. OTP, user-existence, and role failures all convert to the
//! single `UNAUTHORIZED` code: callers must not be able to tell a wrong
//! code from an expired one, or either from an unknown email.

use thiserror::Error;
use vm_shared::errors::{error_codes, ErrorResponse};

/// Authentication-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Invalid email format: {email}")]
    InvalidEmailFormat { email: String },

    #[error("Invalid or expired verification code")]
    InvalidOrExpiredCode,

    #[error("User not found")]
    UserNotFound,

    #[error("Role does not match registered user")]
    RoleMismatch,

    #[error("Resend cooldown active, retry in {seconds} seconds")]
    CooldownActive { seconds: u32 },

    #[error("No verification code request found for this email")]
    NoPendingChallenge,

    #[error("Email delivery failure")]
    MailDeliveryFailure,

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Token-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Convert AuthError to ErrorResponse
impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let error_code = match &err {
            AuthError::EmailAlreadyRegistered => error_codes::CONFLICT,
            AuthError::InvalidEmailFormat { .. } => error_codes::INVALID_EMAIL,
            // Merged on purpose: do not reveal which check failed
            AuthError::InvalidOrExpiredCode
            | AuthError::UserNotFound
            | AuthError::RoleMismatch => error_codes::UNAUTHORIZED,
            AuthError::CooldownActive { .. } => error_codes::COOLDOWN_ACTIVE,
            AuthError::NoPendingChallenge => error_codes::NO_CHALLENGE,
            AuthError::MailDeliveryFailure => error_codes::DELIVERY_FAILED,
            AuthError::InsufficientPermissions => error_codes::INSUFFICIENT_PERMISSIONS,
        };

        match &err {
            AuthError::CooldownActive { seconds } => {
                ErrorResponse::new(error_code, err.to_string())
                    .add_detail("retry_after_seconds", seconds)
            }
            _ => ErrorResponse::new(error_code, err.to_string()),
        }
    }
}

/// Convert TokenError to ErrorResponse
impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        let error_code = match &err {
            // Rejected tokens are uniformly unauthorized at the boundary
            TokenError::TokenExpired
            | TokenError::InvalidTokenFormat
            | TokenError::InvalidSignature
            | TokenError::InvalidClaims => error_codes::UNAUTHORIZED,
            TokenError::TokenGenerationFailed => error_codes::TOKEN_GENERATION_FAILED,
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}
