//! Unit tests for the OTP challenge registry

use std::sync::Arc;

use chrono::Duration;
use vm_shared::config::otp::OtpConfig;

use crate::domain::entities::otp_challenge::CODE_LENGTH;
use crate::errors::{AuthError, DomainError};
use crate::services::otp::clock::Clock;
use crate::services::otp::OtpRegistry;

use super::mocks::MockClock;

fn registry() -> (OtpRegistry<MockClock>, MockClock) {
    let clock = MockClock::new();
    (OtpRegistry::new(OtpConfig::default(), clock.clone()), clock)
}

fn assert_invalid_or_expired(result: Result<(), DomainError>) {
    match result {
        Err(DomainError::Auth(AuthError::InvalidOrExpiredCode)) => {}
        other => panic!("expected InvalidOrExpiredCode, got {:?}", other),
    }
}

#[test]
fn test_issue_shape_and_ttl() {
    let (registry, clock) = registry();

    let challenge = registry.issue("a@x.com");

    assert_eq!(challenge.code.len(), CODE_LENGTH);
    assert!(challenge.code.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(challenge.expires_at, clock.now() + Duration::seconds(300));
    assert!(registry.has_outstanding_challenge("a@x.com"));
}

#[test]
fn test_issue_normalizes_email_key() {
    let (registry, _clock) = registry();

    let challenge = registry.issue("  Person@Example.COM ");

    assert_eq!(challenge.email, "person@example.com");
    assert!(registry.has_outstanding_challenge("person@example.com"));
    assert!(registry.verify("PERSON@example.com", &challenge.code).is_ok());
}

#[test]
fn test_reissue_leaves_only_latest_code_valid() {
    let (registry, _clock) = registry();

    let first = registry.issue("a@x.com");
    let second = registry.issue("a@x.com");

    // The earlier code was silently replaced; a failed attempt with it
    // does not consume the live challenge
    if first.code != second.code {
        assert_invalid_or_expired(registry.verify("a@x.com", &first.code));
    }
    assert!(registry.verify("a@x.com", &second.code).is_ok());
}

#[test]
fn test_verify_is_one_time_use() {
    let (registry, _clock) = registry();

    let challenge = registry.issue("a@x.com");

    assert!(registry.verify("a@x.com", &challenge.code).is_ok());
    assert!(!registry.has_outstanding_challenge("a@x.com"));
    assert_invalid_or_expired(registry.verify("a@x.com", &challenge.code));
}

#[test]
fn test_verify_unknown_email_fails() {
    let (registry, _clock) = registry();
    assert_invalid_or_expired(registry.verify("nobody@x.com", "123456"));
}

#[test]
fn test_verify_wrong_code_keeps_challenge() {
    let (registry, _clock) = registry();

    let challenge = registry.issue("a@x.com");

    assert_invalid_or_expired(registry.verify("a@x.com", "000000"));
    assert!(registry.has_outstanding_challenge("a@x.com"));
    assert!(registry.verify("a@x.com", &challenge.code).is_ok());
}

#[test]
fn test_expiry_boundary() {
    let (registry, clock) = registry();

    let challenge = registry.issue("a@x.com");

    clock.advance_secs(299);
    assert!(registry.verify("a@x.com", &challenge.code).is_ok());

    // Re-issue and let it expire: fails at exactly expires_at
    let challenge = registry.issue("a@x.com");
    clock.advance_secs(300);
    assert_invalid_or_expired(registry.verify("a@x.com", &challenge.code));
    // Expired entry was lazily removed
    assert!(!registry.has_outstanding_challenge("a@x.com"));
}

#[test]
fn test_expired_challenge_still_counts_as_outstanding() {
    let (registry, clock) = registry();

    registry.issue("a@x.com");
    clock.advance_secs(10_000);

    // Lazy expiry: nothing evicts the entry until a verification attempt
    assert!(registry.has_outstanding_challenge("a@x.com"));
}

#[test]
fn test_cooldown_window() {
    let (registry, clock) = registry();

    assert!(registry.can_resend("a@x.com"));
    registry.mark_resent("a@x.com");

    assert!(!registry.can_resend("a@x.com"));
    clock.advance_secs(59);
    assert!(!registry.can_resend("a@x.com"));
    assert_eq!(
        registry.resend_available_in("a@x.com"),
        Some(Duration::seconds(1))
    );

    clock.advance_secs(1);
    assert!(registry.can_resend("a@x.com"));
    assert_eq!(registry.resend_available_in("a@x.com"), None);
}

#[test]
fn test_cooldown_is_per_email() {
    let (registry, _clock) = registry();

    registry.mark_resent("a@x.com");

    assert!(!registry.can_resend("a@x.com"));
    assert!(registry.can_resend("b@x.com"));
}

#[test]
fn test_full_challenge_timeline() {
    // issue -> cooldown at +10s, clear at +61s -> verify at +299s -> gone
    let (registry, clock) = registry();

    let challenge = registry.issue("a@x.com");
    registry.mark_resent("a@x.com");

    clock.advance_secs(10);
    assert!(!registry.can_resend("a@x.com"));

    clock.advance_secs(51);
    assert!(registry.can_resend("a@x.com"));

    clock.advance_secs(238); // now at +299s from issuance
    assert!(registry.verify("a@x.com", &challenge.code).is_ok());
    assert!(!registry.has_outstanding_challenge("a@x.com"));
}

#[test]
fn test_concurrent_issue_last_writer_wins() {
    let (registry, _clock) = registry();
    let registry = Arc::new(registry);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || registry.issue("race@x.com").code)
        })
        .collect();

    let codes: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // Exactly one issued code survives; verifying it consumes the challenge
    let successes = codes
        .iter()
        .filter(|code| registry.verify("race@x.com", code).is_ok())
        .count();
    assert_eq!(successes, 1);
    assert!(!registry.has_outstanding_challenge("race@x.com"));
}

#[test]
fn test_independent_emails_do_not_interfere() {
    let (registry, _clock) = registry();

    let a = registry.issue("a@x.com");
    let b = registry.issue("b@x.com");

    assert!(registry.verify("b@x.com", &b.code).is_ok());
    assert!(registry.has_outstanding_challenge("a@x.com"));
    assert!(registry.verify("a@x.com", &a.code).is_ok());
}
