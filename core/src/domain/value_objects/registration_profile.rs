//! Profile fields supplied with a registration request.

use serde::{Deserialize, Serialize};

use crate::domain::entities::user::UserRole;

/// Profile fields a registrant supplies alongside their email
///
/// No user row exists until the OTP is confirmed, so these fields are held
/// by the caller across the two registration phases and only persisted on
/// `confirm_registration`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationProfile {
    /// Given name
    pub first_name: Option<String>,

    /// Family name
    pub last_name: Option<String>,

    /// Contact phone number
    pub phone: Option<String>,

    /// Requested role; the service falls back to its configured default
    pub role: Option<UserRole>,
}

impl RegistrationProfile {
    /// Creates an empty profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name fields
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    /// Sets the phone field
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the requested role
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }
}
