//! Authentication response value objects returned by the auth service.

use serde::{Deserialize, Serialize};

use crate::domain::entities::user::UserRole;

/// Acknowledgement that an OTP was issued and handed to the notifier
///
/// Returned by the request/resend operations. Deliberately carries nothing
/// beyond the email it echoes back; in particular it never exposes the code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRequestAck {
    /// Email address the code was sent to
    pub email: String,
}

impl OtpRequestAck {
    /// Creates an acknowledgement for the given email
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// Authentication response containing the session token
///
/// Returned after successful OTP confirmation. `role` is populated on login
/// only; registration tokens carry no role claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Signed JWT session token
    pub access_token: String,

    /// Role of the authenticated user, present on login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

impl AuthResponse {
    /// Creates a registration response (no role claim)
    pub fn registered(access_token: String) -> Self {
        Self {
            access_token,
            role: None,
        }
    }

    /// Creates a login response carrying the user's role
    pub fn logged_in(access_token: String, role: UserRole) -> Self {
        Self {
            access_token,
            role: Some(role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_carries_role() {
        let response = AuthResponse::logged_in("token".to_string(), UserRole::Admin);
        assert_eq!(response.role, Some(UserRole::Admin));

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"admin\""));
    }

    #[test]
    fn test_registration_response_omits_role() {
        let response = AuthResponse::registered("token".to_string());
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("role"));
    }
}
