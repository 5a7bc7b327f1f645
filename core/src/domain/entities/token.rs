//! Session token claims for authenticated API access.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::UserRole;

/// Claims carried by a signed session token
///
/// Registration tokens carry `sub` and `email` only; login tokens add the
/// user's role so downstream role checks need no extra lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's unique identifier
    pub sub: Uuid,

    /// Email address the token was issued for
    pub email: String,

    /// Role claim, present on login tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Issued-at timestamp (seconds since epoch)
    pub iat: i64,

    /// Expiry timestamp (seconds since epoch)
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Creates claims for a session token
    pub fn new(
        user_id: Uuid,
        email: impl Into<String>,
        role: Option<UserRole>,
        issued_at: DateTime<Utc>,
        expiry_seconds: i64,
        issuer: impl Into<String>,
    ) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: user_id,
            email: email.into(),
            role: role.map(|r| r.as_str().to_string()),
            iat,
            exp: iat + expiry_seconds,
            iss: issuer.into(),
        }
    }

    /// Parses the role claim back into a `UserRole`, if present and valid
    pub fn user_role(&self) -> Option<UserRole> {
        self.role.as_deref().and_then(|r| r.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_expiry_window() {
        let now = Utc::now();
        let claims = Claims::new(Uuid::new_v4(), "a@x.com", None, now, 3600, "verimail");

        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.iss, "verimail");
        assert!(claims.role.is_none());
    }

    #[test]
    fn test_role_claim_round_trip() {
        let claims = Claims::new(
            Uuid::new_v4(),
            "a@x.com",
            Some(UserRole::Admin),
            Utc::now(),
            60,
            "verimail",
        );

        assert_eq!(claims.role.as_deref(), Some("admin"));
        assert_eq!(claims.user_role(), Some(UserRole::Admin));
    }

    #[test]
    fn test_role_claim_skipped_when_absent() {
        let claims = Claims::new(Uuid::new_v4(), "a@x.com", None, Utc::now(), 60, "verimail");
        let json = serde_json::to_string(&claims).unwrap();
        assert!(!json.contains("role"));
    }
}
