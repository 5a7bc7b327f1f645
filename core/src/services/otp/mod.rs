//! OTP challenge registry module
//!
//! Owns the complete in-memory lifecycle of an OTP challenge per email:
//! issuance, cooldown-gated resend bookkeeping, lazy expiry, and one-time
//! consumption on verification. State does not survive a process restart
//! and is not shared across instances.

mod clock;
mod registry;

#[cfg(test)]
mod tests;

pub use clock::{Clock, SystemClock};
pub use registry::OtpRegistry;
