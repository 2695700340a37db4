//! Password hashing and verification.
//!
//! Thin seam over bcrypt so handlers never touch hash internals. Each hash
//! embeds its own salt and cost, so verification needs no configuration.

use bcrypt::BcryptError;

/// Hash a plaintext password at the given work factor.
pub fn hash_password(plain: &str, cost: u32) -> Result<String, BcryptError> {
    bcrypt::hash(plain, cost)
}

/// Compare a plaintext password against a stored hash.
pub fn verify_password(plain: &str, hashed: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(plain, hashed)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps the test suite fast; production cost comes from
    // config.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_then_verify_matches() {
        let hash = hash_password("pw123", TEST_COST).expect("should hash");
        assert!(verify_password("pw123", &hash).expect("should verify"));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hash = hash_password("pw123", TEST_COST).expect("should hash");
        assert!(!verify_password("pw124", &hash).expect("should verify"));
        assert!(!verify_password("", &hash).expect("should verify"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same-password", TEST_COST).expect("should hash");
        let second = hash_password("same-password", TEST_COST).expect("should hash");

        assert_ne!(first, second);
        assert!(verify_password("same-password", &first).unwrap());
        assert!(verify_password("same-password", &second).unwrap());
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = hash_password("secret", TEST_COST).expect("should hash");
        assert!(!hash.contains("secret"));
    }
}
