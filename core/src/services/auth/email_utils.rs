//! Email address helpers: format validation and masking for logs.

use once_cell::sync::Lazy;
use regex::Regex;

/// Pragmatic email shape check: one `@`, a non-empty local part, and a
/// domain with at least one dot. Full RFC 5321 validation is the mail
/// provider's problem; this only rejects obviously malformed input before
/// a code is issued for it.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
        .expect("email regex must compile")
});

/// Check whether a string looks like a deliverable email address
pub fn validate_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Mask an email address for logging and error payloads
///
/// Keeps the first character of the local part and the domain, e.g.
/// `alice@example.com` becomes `a***@example.com`. Malformed input is
/// masked entirely.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap_or('*');
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

/// Normalize an email address for use as a registry/store key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_accepts_common_forms() {
        assert!(validate_email("a@x.com"));
        assert!(validate_email("first.last+tag@sub.example.co"));
        assert!(validate_email("USER@EXAMPLE.COM"));
    }

    #[test]
    fn test_validate_email_rejects_malformed() {
        assert!(!validate_email(""));
        assert!(!validate_email("no-at-sign"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("user@no-dot"));
        assert!(!validate_email("user@example.com extra"));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("b@x.co"), "b***@x.co");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  User@Example.COM "), "user@example.com");
    }
}
