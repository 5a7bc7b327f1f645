//! Traits for outbound notifier integration

use async_trait::async_trait;

/// Trait for the email delivery service
///
/// The core hands the plaintext code to an implementation of this trait
/// and never learns how it is delivered. Implementations live outside the
/// core (SMTP, an HTTP mail API, a capture mock in tests).
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a verification code to an email address
    ///
    /// Returns the provider's message id on success.
    async fn send_code(&self, email: &str, code: &str) -> Result<String, String>;
}
