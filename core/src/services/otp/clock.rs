//! Clock abstraction so TTL and cooldown logic is testable.

use chrono::{DateTime, Utc};

/// Source of the current time
///
/// The registry never calls `Utc::now()` directly; every time comparison
/// goes through this trait so tests can drive expiry and cooldown windows
/// deterministically.
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
