//! Signed bearer tokens: HS256 JWT, base64 wrapped.

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::entity::User;
use crate::error::AuthError;

pub const TOKEN_ISSUER: &str = "oafserver";
pub const TOKEN_LIFETIME_HOURS: i64 = 72;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub exp: i64,
    pub user: i64,
    pub superuser: bool,
}

impl Claims {
    pub fn for_user(user: &User) -> Self {
        Claims {
            iss: TOKEN_ISSUER.to_string(),
            exp: (Utc::now() + TimeDelta::hours(TOKEN_LIFETIME_HOURS)).timestamp(),
            user: user.user_id,
            superuser: user.superuser,
        }
    }
}

/// Signing and verification keys derived from the configured secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    pub fn new(secret: &str) -> Self {
        TokenKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        self.encode(&Claims::for_user(user))
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        let jwt = jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(AuthError::TokenEncode)?;
        Ok(STANDARD.encode(jwt))
    }

    /// Unwrap base64, check signature, issuer and expiry.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let raw = STANDARD
            .decode(token.trim())
            .map_err(|e| AuthError::TokenDecode(e.to_string()))?;
        let jwt = String::from_utf8(raw).map_err(|e| AuthError::TokenDecode(e.to_string()))?;
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        jsonwebtoken::decode::<Claims>(&jwt, &self.decoding, &validation)
            .map(|d| d.claims)
            .map_err(|e| AuthError::TokenDecode(e.to_string()))
    }
}
