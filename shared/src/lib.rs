//! Shared utilities and common types for the VeriMail server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types (JWT, OTP, environment)
//! - Error response structures shared by every API surface

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{AppConfig, Environment, JwtConfig, LoggingConfig, OtpConfig};
pub use errors::{error_codes, ApiResult, ErrorResponse, IntoErrorResponse};
