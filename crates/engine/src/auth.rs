//! Password hashing and session token primitives.
//!
//! Passwords are hashed with Argon2id and a random salt. Session tokens are
//! HS256 JWTs carrying the user id and a random token id, so two sign-ins
//! never yield the same token. A token is only honoured while a session row
//! holds it (see [`Engine::authenticate`]).
//!
//! [`Engine::authenticate`]: crate::Engine::authenticate

use std::collections::HashSet;

use argon2::password_hash::{PasswordHash, SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(rename = "userId")]
    user_id: i32,
    jti: String,
    iat: i64,
}

/// Hash a plaintext password with Argon2id using a random salt.
pub(crate) fn hash_password(password: &str) -> ResultEngine<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| EngineError::Crypto(format!("failed to hash password: {err}")))
}

/// Verify a plaintext password against a stored Argon2 hash.
pub(crate) fn verify_password(password: &str, hash: &str) -> ResultEngine<()> {
    let parsed = PasswordHash::new(hash)
        .map_err(|err| EngineError::Crypto(format!("invalid password hash: {err}")))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| EngineError::InvalidCredentials)
}

pub(crate) fn issue_token(user_id: i32, secret: &str) -> ResultEngine<String> {
    let claims = Claims {
        user_id,
        jti: Uuid::new_v4().to_string(),
        iat: Utc::now().timestamp(),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| EngineError::Crypto(format!("failed to sign token: {err}")))
}

/// Verify the token signature and return the user id it was issued for.
pub(crate) fn decode_token(token: &str, secret: &str) -> ResultEngine<i32> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims = HashSet::new();

    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims.user_id)
    .map_err(|_| EngineError::Unauthorized("invalid token".to_string()))
}
