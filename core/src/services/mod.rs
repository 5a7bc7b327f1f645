//! Service layer of the authentication core.

pub mod auth;
pub mod otp;
pub mod token;

pub use auth::{AuthService, AuthServiceConfig, Mailer};
pub use otp::{Clock, OtpRegistry, SystemClock};
pub use token::{JwtTokenService, TokenIssuer, TokenServiceConfig};
