//! Session token module
//!
//! Issues and verifies the signed JWT session tokens handed out after a
//! successful OTP confirmation.

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::{JwtTokenService, TokenIssuer};
