//! OTP challenge entity for email-based authentication.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Length of the one-time passcode
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of an issued code (5 minutes)
pub const DEFAULT_TTL_SECONDS: i64 = 300;

/// One outstanding OTP challenge for one email address
///
/// A challenge is the live `(code, expires_at)` pair awaiting verification.
/// At most one challenge exists per email; issuing a new one replaces the
/// previous one. Expiry is lazy: nothing evicts a stale challenge until a
/// verification attempt compares `expires_at` against the current time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpChallenge {
    /// Email address this code was sent to (lowercase)
    pub email: String,

    /// The 6-digit passcode
    pub code: String,

    /// Timestamp when the code was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl OtpChallenge {
    /// Creates a new challenge with a fresh random code
    ///
    /// # Arguments
    ///
    /// * `email` - The address the code is bound to
    /// * `now` - Current time from the injected clock
    /// * `ttl_seconds` - Lifetime of the code in seconds
    pub fn new(email: impl Into<String>, now: DateTime<Utc>, ttl_seconds: i64) -> Self {
        Self {
            email: email.into().to_lowercase(),
            code: Self::generate_code(),
            issued_at: now,
            expires_at: now + Duration::seconds(ttl_seconds),
        }
    }

    /// Generates a uniformly random 6-digit code using the OS CSPRNG
    ///
    /// The range is `100000..=999999` so the code is always exactly six
    /// digits with no leading zero.
    pub fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(100_000..1_000_000);
        code.to_string()
    }

    /// Checks whether the code has expired at the given instant
    ///
    /// A code is expired at exactly `expires_at`, not one tick later.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Compares a submitted code against this challenge in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        self.code.len() == submitted.len()
            && constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Gets the time remaining until expiration, or zero if expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
