//! Authentication service orchestrating the email OTP flows.
//!
//! Registration and login are both two-phase: a request phase that issues
//! a code and hands it to the mailer, and a confirm phase that verifies
//! the code and signs a session token. The service owns no state of its
//! own; challenges live in the [`OtpRegistry`] and users in the
//! [`UserRepository`].

use std::sync::Arc;

use crate::domain::entities::user::{User, UserRole};
use crate::domain::value_objects::{AuthResponse, OtpRequestAck, RegistrationProfile};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::user::r#trait::UserRepository;
use crate::services::otp::{Clock, OtpRegistry};
use crate::services::token::TokenIssuer;

use super::config::AuthServiceConfig;
use super::email_utils::{mask_email, normalize_email, validate_email};
use super::traits::Mailer;

/// Service for email OTP registration and login
pub struct AuthService<U, M, T, C>
where
    U: UserRepository,
    M: Mailer,
    T: TokenIssuer,
    C: Clock,
{
    user_repository: Arc<U>,
    otp_registry: Arc<OtpRegistry<C>>,
    token_service: Arc<T>,
    mailer: Arc<M>,
    config: AuthServiceConfig,
}

impl<U, M, T, C> AuthService<U, M, T, C>
where
    U: UserRepository,
    M: Mailer,
    T: TokenIssuer,
    C: Clock,
{
    /// Creates a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        otp_registry: Arc<OtpRegistry<C>>,
        token_service: Arc<T>,
        mailer: Arc<M>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            otp_registry,
            token_service,
            mailer,
            config,
        }
    }

    /// Start a registration: issue a code for an unregistered email
    ///
    /// The profile fields are echoed through the flow but nothing is
    /// persisted here; the user row is only created on confirmation.
    ///
    /// # Errors
    /// * `InvalidEmailFormat` - Malformed email address
    /// * `EmailAlreadyRegistered` - A user already exists for this email
    /// * `MailDeliveryFailure` - The mailer rejected the send
    pub async fn request_registration(
        &self,
        email: &str,
        profile: &RegistrationProfile,
    ) -> DomainResult<OtpRequestAck> {
        let email = self.checked_email(email)?;

        if self.user_repository.find_by_email(&email).await?.is_some() {
            tracing::warn!(
                email = %mask_email(&email),
                event = "registration_conflict",
                "Registration requested for an already registered email"
            );
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        tracing::debug!(
            email = %mask_email(&email),
            requested_role = ?profile.role,
            event = "registration_requested",
            "Registration OTP requested"
        );
        self.send_challenge(&email).await?;
        Ok(OtpRequestAck::new(email))
    }

    /// Complete a registration: verify the code and create the user
    ///
    /// The conflict check runs again here; another registration may have
    /// completed for the same email between the two phases.
    ///
    /// # Errors
    /// * `InvalidEmailFormat` - Malformed email address
    /// * `EmailAlreadyRegistered` - A user was created since the request
    /// * `InvalidOrExpiredCode` - Wrong, expired, or missing code
    pub async fn confirm_registration(
        &self,
        email: &str,
        code: &str,
        profile: RegistrationProfile,
    ) -> DomainResult<AuthResponse> {
        let email = self.checked_email(email)?;

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        self.otp_registry.verify(&email, code)?;

        let role = profile.role.unwrap_or(self.config.default_role);
        let user = User::new(email)
            .with_role(role)
            .with_profile(profile.first_name, profile.last_name, profile.phone);
        let created = self.user_repository.create(user).await?;

        let token = self
            .token_service
            .sign_session(created.id, &created.email, None)?;

        tracing::info!(
            user_id = %created.id,
            email = %mask_email(&created.email),
            role = %created.role.as_str(),
            event = "registration_confirmed",
            "User registered"
        );
        Ok(AuthResponse::registered(token))
    }

    /// Start a login: issue a code for a registered email
    ///
    /// When `expected_role` is given, the account's role must match it;
    /// a role-scoped login surface can refuse to send codes to accounts
    /// of the wrong kind.
    ///
    /// # Errors
    /// * `InvalidEmailFormat` - Malformed email address
    /// * `UserNotFound` - No user registered for this email
    /// * `RoleMismatch` - Account role differs from `expected_role`
    /// * `MailDeliveryFailure` - The mailer rejected the send
    pub async fn request_login(
        &self,
        email: &str,
        expected_role: Option<UserRole>,
    ) -> DomainResult<OtpRequestAck> {
        let email = self.checked_email(email)?;

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if let Some(expected) = expected_role {
            if user.role != expected {
                tracing::warn!(
                    email = %mask_email(&email),
                    expected = %expected.as_str(),
                    event = "login_role_mismatch",
                    "Login requested with a mismatched role"
                );
                return Err(AuthError::RoleMismatch.into());
            }
        }

        self.send_challenge(&email).await?;
        Ok(OtpRequestAck::new(email))
    }

    /// Complete a login: verify the code and sign a session token
    ///
    /// The token carries the user's role; the response echoes it so the
    /// caller can route without decoding the token.
    ///
    /// # Errors
    /// * `InvalidEmailFormat` - Malformed email address
    /// * `UserNotFound` - No user registered for this email
    /// * `InvalidOrExpiredCode` - Wrong, expired, or missing code
    pub async fn confirm_login(&self, email: &str, code: &str) -> DomainResult<AuthResponse> {
        let email = self.checked_email(email)?;

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.otp_registry.verify(&email, code)?;

        let token = self
            .token_service
            .sign_session(user.id, &user.email, Some(user.role))?;

        tracing::info!(
            user_id = %user.id,
            email = %mask_email(&user.email),
            event = "login_confirmed",
            "User logged in"
        );
        Ok(AuthResponse::logged_in(token, user.role))
    }

    /// Re-issue and re-send the code for an outstanding challenge
    ///
    /// Checks run in a fixed order: cooldown, outstanding challenge, then
    /// role. The cooldown only starts once the re-issued code has been
    /// handed to the mailer, so a failed send can be retried immediately.
    ///
    /// # Errors
    /// * `InvalidEmailFormat` - Malformed email address
    /// * `CooldownActive` - A resend happened within the cooldown window
    /// * `NoPendingChallenge` - No challenge was ever issued for this email
    /// * `RoleMismatch` - Account missing or role differs from `expected_role`
    /// * `MailDeliveryFailure` - The mailer rejected the send
    pub async fn resend(
        &self,
        email: &str,
        expected_role: Option<UserRole>,
    ) -> DomainResult<OtpRequestAck> {
        let email = self.checked_email(email)?;

        if let Some(remaining) = self.otp_registry.resend_available_in(&email) {
            let seconds = remaining.num_seconds().max(1) as u32;
            tracing::debug!(
                email = %mask_email(&email),
                retry_after = seconds,
                event = "resend_throttled",
                "Resend requested during cooldown"
            );
            return Err(AuthError::CooldownActive { seconds }.into());
        }

        if !self.otp_registry.has_outstanding_challenge(&email) {
            return Err(AuthError::NoPendingChallenge.into());
        }

        if let Some(expected) = expected_role {
            let matches = self
                .user_repository
                .find_by_email(&email)
                .await?
                .map(|user| user.role == expected)
                .unwrap_or(false);
            if !matches {
                return Err(AuthError::RoleMismatch.into());
            }
        }

        self.send_challenge(&email).await?;
        self.otp_registry.mark_resent(&email);

        tracing::info!(
            email = %mask_email(&email),
            event = "otp_resent",
            "Verification code resent"
        );
        Ok(OtpRequestAck::new(email))
    }

    /// Fetch the profile of the user a session token belongs to
    ///
    /// # Errors
    /// * `TokenError` - Token rejected (expired, bad signature, bad claims)
    /// * `UserNotFound` - The token's subject no longer exists
    pub async fn profile(&self, access_token: &str) -> DomainResult<User> {
        let claims = self.token_service.verify(access_token)?;
        self.user_repository
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Update the profile fields of the user a session token belongs to
    ///
    /// Unset fields are left untouched. Role and email are not updatable
    /// through this path.
    pub async fn update_profile(
        &self,
        access_token: &str,
        first_name: Option<String>,
        last_name: Option<String>,
        phone: Option<String>,
    ) -> DomainResult<User> {
        let mut user = self.profile(access_token).await?;
        user.update_profile(first_name, last_name, phone);
        let updated = self.user_repository.update(user).await?;

        tracing::info!(
            user_id = %updated.id,
            event = "profile_updated",
            "User profile updated"
        );
        Ok(updated)
    }

    /// List every registered user; admin tokens only
    ///
    /// # Errors
    /// * `TokenError` - Token rejected (expired, bad signature, bad claims)
    /// * `InsufficientPermissions` - Token does not carry the admin role
    pub async fn list_users(&self, access_token: &str) -> DomainResult<Vec<User>> {
        let claims = self.token_service.verify(access_token)?;
        if claims.user_role() != Some(UserRole::Admin) {
            tracing::warn!(
                user_id = %claims.sub,
                event = "list_users_denied",
                "Non-admin token attempted to list users"
            );
            return Err(AuthError::InsufficientPermissions.into());
        }
        self.user_repository.list_all().await
    }

    /// Validate and normalize an email before any state is touched
    fn checked_email(&self, email: &str) -> DomainResult<String> {
        if !validate_email(email.trim()) {
            return Err(AuthError::InvalidEmailFormat {
                email: mask_email(email),
            }
            .into());
        }
        Ok(normalize_email(email))
    }

    /// Issue a challenge and hand its code to the mailer
    ///
    /// The challenge stays in the registry when delivery fails; a retry
    /// simply replaces it.
    async fn send_challenge(&self, email: &str) -> DomainResult<()> {
        let challenge = self.otp_registry.issue(email);

        match self.mailer.send_code(email, &challenge.code).await {
            Ok(message_id) => {
                tracing::debug!(
                    email = %mask_email(email),
                    message_id = %message_id,
                    event = "otp_dispatched",
                    "Verification code handed to mailer"
                );
                Ok(())
            }
            Err(error) => {
                tracing::error!(
                    email = %mask_email(email),
                    error = %error,
                    event = "otp_delivery_failed",
                    "Mailer failed to deliver verification code"
                );
                Err(AuthError::MailDeliveryFailure.into())
            }
        }
    }
}
