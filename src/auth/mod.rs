//! Password hashing, bearer tokens and `Authorization` header parsing.

pub mod password;
pub mod token;

pub use password::{generate_salt, hash_password, verify_password};
pub use token::{Claims, TokenKeys, TOKEN_ISSUER};

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::AuthError;

/// Split an `Authorization` header value into scheme and credentials.
pub fn split_authorization(header: &str) -> Result<(&str, &str), AuthError> {
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(scheme), Some(credentials)) => Ok((scheme, credentials)),
        _ => Err(AuthError::MalformedHeader(
            "Authorization header must be '<scheme> <credentials>'".into(),
        )),
    }
}

/// Decode `base64("username:password")`. The password may itself contain colons.
pub fn decode_credentials(encoded: &str) -> Result<(String, String), AuthError> {
    let raw = STANDARD
        .decode(encoded.trim())
        .map_err(|e| AuthError::MalformedHeader(format!("credentials are not base64: {}", e)))?;
    let text = String::from_utf8(raw)
        .map_err(|_| AuthError::MalformedHeader("credentials are not UTF-8".into()))?;
    match text.split_once(':') {
        Some((username, password)) => Ok((username.to_owned(), password.to_owned())),
        None => Err(AuthError::MalformedHeader(
            "credentials must be 'username:password'".into(),
        )),
    }
}
