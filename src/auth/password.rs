//! Salted Argon2id password hashing.

use argon2::Argon2;

use crate::error::AuthError;

pub const SALT_LEN: usize = 32;
pub const HASH_LEN: usize = 32;

/// Fresh random salt, hex encoded.
pub fn generate_salt() -> String {
    hex::encode(rand::random::<[u8; SALT_LEN]>())
}

/// Derive the stored hash for `password` under `salt`. Same inputs always give the same hash.
pub fn hash_password(password: &str, salt: &str) -> Result<String, AuthError> {
    let mut out = [0u8; HASH_LEN];
    Argon2::default()
        .hash_password_into(password.as_bytes(), salt.as_bytes(), &mut out)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hex::encode(out))
}

pub fn verify_password(password: &str, salt: &str, expected: &str) -> Result<bool, AuthError> {
    Ok(hash_password(password, salt)? == expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salts_are_random_hex() {
        let a = generate_salt();
        let b = generate_salt();
        assert_eq!(a.len(), SALT_LEN * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn hash_is_deterministic_per_salt() {
        let salt = generate_salt();
        let h1 = hash_password("hunter2", &salt).unwrap();
        let h2 = hash_password("hunter2", &salt).unwrap();
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), HASH_LEN * 2);
        assert_ne!(h1, hash_password("hunter2", &generate_salt()).unwrap());
        assert!(verify_password("hunter2", &salt, &h1).unwrap());
        assert!(!verify_password("hunter3", &salt, &h1).unwrap());
    }

    #[test]
    fn short_salt_fails() {
        assert!(matches!(hash_password("pw", "abc"), Err(AuthError::Hash(_))));
    }
}
