//! Configuration for the authentication service

use crate::domain::entities::user::UserRole;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Role assigned to new registrations that do not request one
    pub default_role: UserRole,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            default_role: UserRole::User,
        }
    }
}
