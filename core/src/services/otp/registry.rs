//! In-memory OTP challenge registry.
//!
//! The registry is the sole owner of per-email challenge and cooldown
//! state. Entries live in a fixed set of mutex-guarded shards picked by a
//! hash of the email, so concurrent requests for different addresses do
//! not contend on one lock while operations on the same address stay
//! mutually exclusive.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use vm_shared::config::otp::OtpConfig;

use crate::domain::entities::otp_challenge::OtpChallenge;
use crate::errors::{AuthError, DomainResult};
use crate::services::auth::email_utils::{mask_email, normalize_email};

use super::clock::Clock;

/// Number of lock shards; email keys are hashed across these
const SHARD_COUNT: usize = 16;

#[derive(Default)]
struct OtpShard {
    /// Live challenge per email; at most one entry per address
    challenges: HashMap<String, OtpChallenge>,
    /// Last resend instant per email; never pruned for the process lifetime
    cooldowns: HashMap<String, DateTime<Utc>>,
}

/// Authoritative store of OTP challenge and resend-cooldown state
///
/// All state is process-local and non-durable: a restart drops every
/// outstanding challenge, and nothing is shared across instances. Expiry
/// is enforced lazily at verification time; no background eviction runs.
pub struct OtpRegistry<C: Clock> {
    shards: Vec<Mutex<OtpShard>>,
    config: OtpConfig,
    clock: C,
}

impl<C: Clock> OtpRegistry<C> {
    /// Create a registry with the given configuration and clock
    pub fn new(config: OtpConfig, clock: C) -> Self {
        let shards = (0..SHARD_COUNT)
            .map(|_| Mutex::new(OtpShard::default()))
            .collect();
        Self {
            shards,
            config,
            clock,
        }
    }

    /// Issue a fresh challenge for an email, replacing any prior one
    ///
    /// Replacement is silent and last-writer-wins: when two issuances race
    /// for the same address, only the later code verifies. The plaintext
    /// code is returned inside the challenge so the caller can hand it to
    /// the notifier; it is never logged.
    pub fn issue(&self, email: &str) -> OtpChallenge {
        let email = normalize_email(email);
        let now = self.clock.now();
        let challenge = OtpChallenge::new(email.clone(), now, self.config.ttl_seconds);

        let mut shard = self.lock_shard(&email);
        let replaced = shard
            .challenges
            .insert(email.clone(), challenge.clone())
            .is_some();
        drop(shard);

        tracing::info!(
            email = %mask_email(&email),
            replaced = replaced,
            expires_at = %challenge.expires_at,
            event = "otp_issued",
            "Issued verification code"
        );

        challenge
    }

    /// Whether a resend is currently allowed for this email
    ///
    /// True when no resend was ever recorded, or the cooldown window has
    /// fully elapsed since the last one. Side-effect free.
    pub fn can_resend(&self, email: &str) -> bool {
        self.resend_available_in(email).is_none()
    }

    /// Remaining cooldown before the next resend, if one is active
    pub fn resend_available_in(&self, email: &str) -> Option<Duration> {
        let email = normalize_email(email);
        let now = self.clock.now();
        let window = Duration::seconds(self.config.cooldown_seconds);

        let shard = self.lock_shard(&email);
        let last = *shard.cooldowns.get(&email)?;
        let elapsed = now.signed_duration_since(last);
        if elapsed < window {
            Some(window - elapsed)
        } else {
            None
        }
    }

    /// Record that a resend happened now
    ///
    /// Must be called only after the re-issued code was handed to the
    /// notifier, so a failed send does not start a cooldown.
    pub fn mark_resent(&self, email: &str) {
        let email = normalize_email(email);
        let now = self.clock.now();

        let mut shard = self.lock_shard(&email);
        shard.cooldowns.insert(email, now);
    }

    /// Verify a submitted code and consume the challenge on success
    ///
    /// Fails with the same invalid-or-expired error whether no challenge
    /// exists, the code mismatches, or the challenge has expired; callers
    /// cannot distinguish the cases. Expired entries are removed here
    /// (lazy invalidation), mismatches leave the challenge in place, and
    /// a successful verification deletes it (one-time use).
    pub fn verify(&self, email: &str, submitted: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        let now = self.clock.now();

        let mut shard = self.lock_shard(&email);
        match shard.challenges.get(&email) {
            None => {
                drop(shard);
                tracing::warn!(
                    email = %mask_email(&email),
                    event = "otp_verify_no_challenge",
                    "Verification attempted with no outstanding challenge"
                );
                Err(AuthError::InvalidOrExpiredCode.into())
            }
            Some(challenge) if challenge.is_expired(now) => {
                shard.challenges.remove(&email);
                drop(shard);
                tracing::warn!(
                    email = %mask_email(&email),
                    event = "otp_verify_expired",
                    "Verification attempted with an expired code"
                );
                Err(AuthError::InvalidOrExpiredCode.into())
            }
            Some(challenge) if !challenge.matches(submitted) => {
                drop(shard);
                tracing::warn!(
                    email = %mask_email(&email),
                    event = "otp_verify_mismatch",
                    "Verification attempted with a wrong code"
                );
                Err(AuthError::InvalidOrExpiredCode.into())
            }
            Some(_) => {
                shard.challenges.remove(&email);
                drop(shard);
                tracing::info!(
                    email = %mask_email(&email),
                    event = "otp_verified",
                    "Verification code accepted"
                );
                Ok(())
            }
        }
    }

    /// Whether a challenge is outstanding for this email
    ///
    /// Used to gate resend: there is nothing to resend without a prior
    /// issuance. An expired-but-unverified entry still counts, matching
    /// the lazy-expiry model.
    pub fn has_outstanding_challenge(&self, email: &str) -> bool {
        let email = normalize_email(email);
        let shard = self.lock_shard(&email);
        shard.challenges.contains_key(&email)
    }

    fn lock_shard(&self, email: &str) -> std::sync::MutexGuard<'_, OtpShard> {
        let mut hasher = DefaultHasher::new();
        email.hash(&mut hasher);
        let index = (hasher.finish() as usize) % SHARD_COUNT;
        // A poisoned shard only means another thread panicked mid-update of
        // a HashMap entry; the maps themselves are still coherent.
        self.shards[index]
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
