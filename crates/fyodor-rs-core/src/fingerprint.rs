//! Content fingerprints used as duplicate keys.

use sha2::{Digest, Sha256};

/// Length of a fingerprint in hex characters.
pub const FINGERPRINT_HEX_LEN: usize = 64;

/// Lowercase hex SHA-256 of the UTF-8 bytes of normalized text.
pub fn fingerprint(normalized: &str) -> String {
    hex::encode(Sha256::digest(normalized.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::{FINGERPRINT_HEX_LEN, fingerprint};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    /// Spell an index with letters so inputs look like normalized text.
    fn letters(mut idx: usize) -> String {
        let mut word = String::new();
        loop {
            word.push(char::from(b'a' + (idx % 26) as u8));
            idx /= 26;
            if idx == 0 {
                break;
            }
        }
        format!("copy {word}")
    }

    #[test]
    fn matches_known_digest() {
        assert_eq!(
            fingerprint("hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn is_deterministic_and_fixed_length() {
        let first = fingerprint("the quick fox");
        let second = fingerprint(&String::from("the quick fox"));
        assert_eq!(first, second);
        assert_eq!(first.len(), FINGERPRINT_HEX_LEN);
        assert!(first.chars().all(|ch| ch.is_ascii_hexdigit() && !ch.is_ascii_uppercase()));
    }

    #[test]
    fn distinct_inputs_do_not_collide() {
        let hashes: HashSet<String> = (0..10_000)
            .map(|idx| fingerprint(&letters(idx)))
            .collect();
        assert_eq!(hashes.len(), 10_000);
    }
}
