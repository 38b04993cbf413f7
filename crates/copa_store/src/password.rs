use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Hash a password with a fresh random salt. Stored as `salt$digest`.
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    format!("{}${}", salt, digest_with_salt(&salt, password))
}

/// Check a password against a stored `salt$digest` value.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt, digest)) = stored.split_once('$') else {
        return false;
    };
    digest_with_salt(salt, password) == digest
}

fn digest_with_salt(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b"$");
    hasher.update(password.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_verifies() {
        let stored = hash_password("segredo123");
        assert!(verify_password("segredo123", &stored));
        assert!(!verify_password("segredo124", &stored));
    }

    #[test]
    fn same_password_hashes_differently_per_salt() {
        assert_ne!(hash_password("segredo123"), hash_password("segredo123"));
    }

    #[test]
    fn malformed_stored_value_never_verifies() {
        assert!(!verify_password("segredo123", "not-a-valid-record"));
    }
}
