//! User entity representing a registered user in the VeriMail system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular user
    User,
    /// Administrator
    Admin,
}

impl UserRole {
    /// Stable string form used in token claims
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::User
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("Invalid role: {}", other)),
        }
    }
}

/// Lifecycle status of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Created but not yet activated
    Pending,
    /// Active account
    Active,
    /// Suspended by an administrator
    Suspended,
}

impl Default for UserStatus {
    fn default() -> Self {
        UserStatus::Pending
    }
}

/// User entity representing a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address, unique per user, stored lowercase
    pub email: String,

    /// Given name
    pub first_name: Option<String>,

    /// Family name
    pub last_name: Option<String>,

    /// Contact phone number
    pub phone: Option<String>,

    /// Role of the account
    pub role: UserRole,

    /// Lifecycle status of the account
    pub status: UserStatus,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance with default role and pending status
    pub fn new(email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into().to_lowercase(),
            first_name: None,
            last_name: None,
            phone: None,
            role: UserRole::default(),
            status: UserStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the role
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    /// Sets the profile fields
    pub fn with_profile(
        mut self,
        first_name: Option<String>,
        last_name: Option<String>,
        phone: Option<String>,
    ) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self.phone = phone;
        self
    }

    /// Marks the account as active
    pub fn activate(&mut self) {
        self.status = UserStatus::Active;
        self.updated_at = Utc::now();
    }

    /// Suspends the account
    pub fn suspend(&mut self) {
        self.status = UserStatus::Suspended;
        self.updated_at = Utc::now();
    }

    /// Updates the mutable profile fields, leaving unset fields untouched
    pub fn update_profile(
        &mut self,
        first_name: Option<String>,
        last_name: Option<String>,
        phone: Option<String>,
    ) {
        if first_name.is_some() {
            self.first_name = first_name;
        }
        if last_name.is_some() {
            self.last_name = last_name;
        }
        if phone.is_some() {
            self.phone = phone;
        }
        self.updated_at = Utc::now();
    }

    /// Checks if the user is an administrator
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Checks if the account is suspended
    pub fn is_suspended(&self) -> bool {
        self.status == UserStatus::Suspended
    }
}
