use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

/// Derive a salted Argon2id hash, encoded as a PHC string
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow!("Failed to hash password: {}", e))
}

/// Check `password` against a stored PHC string.
///
/// The digest comparison inside `argon2` is constant time. A stored value
/// that is not a valid PHC string is an error, not a mismatch.
pub fn verify_password(password: &str, stored: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| anyhow!("Malformed password hash: {}", e))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow!("Failed to verify password: {}", e)),
    }
}

/// Length policy applied when a password is first enrolled
pub fn meets_length_policy(password: &str, min_length: usize) -> bool {
    password.chars().count() >= min_length
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("abcd").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("abcd", &hash).unwrap());
        assert!(!verify_password("abce", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash_password("same-password").unwrap();
        let second = hash_password("same-password").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_malformed_hash() {
        // salt:hash pairs written by older deployments are not PHC strings
        assert!(verify_password("abcd", "deadbeef:cafebabe").is_err());
    }

    #[test]
    fn test_length_policy() {
        assert!(meets_length_policy("abcd", 4));
        assert!(!meets_length_policy("abc", 4));
        assert!(!meets_length_policy("", 4));
        // counted in characters, not bytes
        assert!(!meets_length_policy("ééé", 4));
    }
}
