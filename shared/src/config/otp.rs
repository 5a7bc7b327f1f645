//! OTP issuance and resend cooldown configuration

use serde::{Deserialize, Serialize};

/// Configuration for OTP challenges
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Seconds before an issued code expires
    pub ttl_seconds: i64,

    /// Minimum seconds between code resend requests for the same email
    pub cooldown_seconds: i64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 300,    // 5 minutes
            cooldown_seconds: 60, // 1 minute
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    ///
    /// Reads `OTP_TTL_SECONDS` and `OTP_RESEND_COOLDOWN_SECONDS`, falling
    /// back to defaults when unset or malformed.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let ttl_seconds = std::env::var("OTP_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.ttl_seconds);
        let cooldown_seconds = std::env::var("OTP_RESEND_COOLDOWN_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.cooldown_seconds);

        Self {
            ttl_seconds,
            cooldown_seconds,
        }
    }

    /// Set the code TTL in minutes
    pub fn with_ttl_minutes(mut self, minutes: i64) -> Self {
        self.ttl_seconds = minutes * 60;
        self
    }

    /// Set the resend cooldown in seconds
    pub fn with_cooldown_seconds(mut self, seconds: i64) -> Self {
        self.cooldown_seconds = seconds;
        self
    }
}
