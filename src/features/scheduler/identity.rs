//! # Reminder Identity
//!
//! The deterministic key that keeps repeated calendar payloads for the
//! same logical reminder idempotent across runs. Isolated here so the
//! hashing scheme can be swapped without touching call sites.
//!
//! Known limitation, accepted: editing a subject or treatment string after
//! creation changes the identity, so the edited record shows up as a new
//! calendar event.
//!
//! - **Version**: 1.0.0
//! - **Since**: 2.1.0

use crate::core::dates::format_iso_date;
use chrono::NaiveDate;
use sha2::{Digest, Sha256};

/// Length of the hex prefix taken from the digest.
const IDENTITY_HEX_LEN: usize = 32;

/// Derive the stable reminder key from (subject, treatment, due date).
///
/// The fields are hashed with a separator byte so `("ab", "c")` and
/// `("a", "bc")` cannot collide, and the due date in ISO form pins the
/// key to one occurrence.
pub fn reminder_identity(subject: &str, treatment: &str, due_date: NaiveDate) -> String {
    let mut hasher = Sha256::new();
    hasher.update(subject.as_bytes());
    hasher.update([0u8]);
    hasher.update(treatment.as_bytes());
    hasher.update([0u8]);
    hasher.update(format_iso_date(due_date).as_bytes());

    let digest = hasher.finalize();
    let mut hex = String::with_capacity(IDENTITY_HEX_LEN + 8);
    for byte in digest.iter().take(IDENTITY_HEX_LEN / 2) {
        hex.push_str(&format!("{byte:02x}"));
    }
    format!("{hex}@patilog")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_identity_is_deterministic() {
        let a = reminder_identity("Max", "Kuduz", date(2025, 6, 3));
        let b = reminder_identity("Max", "Kuduz", date(2025, 6, 3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_identity_shape() {
        let id = reminder_identity("Max", "Kuduz", date(2025, 6, 3));
        assert!(id.ends_with("@patilog"));
        let hex = id.trim_end_matches("@patilog");
        assert_eq!(hex.len(), IDENTITY_HEX_LEN);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_identity_sensitive_to_each_component() {
        let base = reminder_identity("Max", "Kuduz", date(2025, 6, 3));
        assert_ne!(base, reminder_identity("max", "Kuduz", date(2025, 6, 3)));
        assert_ne!(base, reminder_identity("Max", "Karma", date(2025, 6, 3)));
        assert_ne!(base, reminder_identity("Max", "Kuduz", date(2025, 6, 4)));
    }

    #[test]
    fn test_field_boundaries_do_not_collide() {
        assert_ne!(
            reminder_identity("MaxK", "uduz", date(2025, 6, 3)),
            reminder_identity("Max", "Kuduz", date(2025, 6, 3))
        );
    }
}
