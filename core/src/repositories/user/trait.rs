//! User repository trait defining the interface for user data persistence.
//!
//! The authentication core never touches a database directly; it reaches
//! persistence through this trait. Implementations live outside the core
//! (an in-memory one is provided for tests and demos).

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Lookups return `Ok(None)` rather than an error when no user matches;
/// "not found" is a normal answer for the registration flow, not a failure.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email address
    ///
    /// Emails are compared case-insensitively; implementations should store
    /// and match the lowercase form.
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered for this email
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user with any store-generated fields
    /// * `Err(DomainError)` - Creation failed (e.g. duplicate email)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    ///
    /// # Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(DomainError)` - Update failed (e.g. user not found)
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// List all users
    async fn list_all(&self) -> Result<Vec<User>, DomainError>;

    /// Check if a user exists with the given email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;
}
