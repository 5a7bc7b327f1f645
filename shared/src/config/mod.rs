//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT session token configuration
//! - `otp` - OTP issuance, expiry, and resend cooldown configuration
//! - `environment` - Environment detection and logging configuration

pub mod auth;
pub mod environment;
pub mod otp;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::JwtConfig;
pub use environment::{Environment, LoggingConfig};
pub use otp::OtpConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// OTP configuration
    pub otp: OtpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load the full configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            jwt: JwtConfig::from_env(),
            otp: OtpConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let environment = Environment::default();
        Self {
            environment,
            jwt: JwtConfig::default(),
            otp: OtpConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }
}
