//! Configuration for the token service

use vm_shared::config::auth::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone, Default)]
pub struct TokenServiceConfig {
    /// JWT signing configuration
    pub jwt: JwtConfig,
}

impl TokenServiceConfig {
    /// Create a configuration around explicit JWT settings
    pub fn new(jwt: JwtConfig) -> Self {
        Self { jwt }
    }

    /// Load from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
        }
    }
}
