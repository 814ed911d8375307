//! Record identifier helpers.
//!
//! Upstream identifiers come in two shapes, both preserved here:
//!
//! - ledger records: `"{prefix}_{timestamp_ms}"`; two records created in
//!   the same millisecond collide, and callers accept this
//! - proposals and votes: `"{prefix}_{timestamp_ms}_{suffix}"` with a short
//!   base-36 suffix derived from injected entropy
//!
//! Tests assert on prefix and structure only, never on exact values.

/// Number of entropy bytes (and resulting characters) in an id suffix.
pub const ID_SUFFIX_LEN: usize = 9;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Build a timestamp-scoped identifier: `"{prefix}_{now_ms}"`.
pub fn scoped_id(prefix: &str, now_ms: u64) -> String {
    format!("{prefix}_{now_ms}")
}

/// Build a suffixed identifier: `"{prefix}_{now_ms}_{suffix}"`.
///
/// The suffix is one lowercase base-36 character per entropy byte.
pub fn suffixed_id(prefix: &str, now_ms: u64, entropy: &[u8]) -> String {
    format!("{prefix}_{now_ms}_{}", base36_suffix(entropy))
}

/// Map entropy bytes to a lowercase base-36 string, one character per byte.
pub fn base36_suffix(entropy: &[u8]) -> String {
    entropy
        .iter()
        .map(|b| BASE36[(*b as usize) % BASE36.len()] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_id_joins_prefix_and_timestamp() {
        assert_eq!(scoped_id("sui_stake", 1_700_000_000_000), "sui_stake_1700000000000");
    }

    #[test]
    fn suffixed_id_appends_base36_suffix() {
        let id = suffixed_id("proposal", 1_700_000_000_000, &[0, 9, 10, 35, 36, 255, 1, 2, 3]);
        let mut parts = id.splitn(3, '_');
        assert_eq!(parts.next(), Some("proposal"));
        assert_eq!(parts.next(), Some("1700000000000"));
        let suffix = parts.next().unwrap();
        assert_eq!(suffix.len(), 9);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn base36_wraps_bytes_into_alphabet() {
        assert_eq!(base36_suffix(&[0, 9, 10, 35]), "09az");
        assert_eq!(base36_suffix(&[36]), "0");
        assert_eq!(base36_suffix(&[]), "");
    }
}
