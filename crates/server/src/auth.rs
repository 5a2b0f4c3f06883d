use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ServerError;

const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

/// Token signing material plus the lifetime of issued tokens.
#[derive(Clone)]
pub struct AuthConfig {
    encoding: EncodingKey,
    decoding: DecodingKey,
    token_ttl: Duration,
}

#[derive(Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

impl AuthConfig {
    pub fn new(secret: &str, token_ttl_minutes: Option<i64>) -> Self {
        let minutes = token_ttl_minutes.unwrap_or(DEFAULT_TOKEN_TTL_MINUTES);
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl: Duration::minutes(minutes),
        }
    }

    pub fn issue_token(&self, user_id: Uuid) -> Result<String, ServerError> {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (Utc::now() + self.token_ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| ServerError::Generic(format!("token signing failed: {err}")))
    }

    /// Returns the user id carried by a valid, unexpired bearer token.
    pub fn decode_token(&self, token: &str) -> Result<Uuid, ServerError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| ServerError::Unauthorized)?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| ServerError::Unauthorized)
    }
}

pub fn hash_password(password: &str) -> Result<String, ServerError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServerError::Generic(format!("password hashing failed: {err}")))
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
