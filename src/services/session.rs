//! Session tokens.
//!
//! Tokens are HS256 JWTs carrying `{ id, usuario, iat, exp }`. Verification is a
//! plain synchronous call: it is CPU-bound signature checking and touches no
//! shared state.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use crate::errors::{AppError, AppResult};
use crate::models::{Identity, User};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: u64,
    usuario: String,
    iat: i64,
    exp: i64,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

#[derive(Clone)]
pub struct SessionVerifier {
    keys: Arc<Keys>,
    ttl_secs: i64,
}

impl SessionVerifier {
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
            }),
            ttl_secs,
        }
    }

    /// Issues a token for `user` valid for the configured lifetime from now.
    pub fn issue(&self, user: &User) -> AppResult<String> {
        self.issue_at(user, Utc::now().timestamp())
    }

    fn issue_at(&self, user: &User, issued_at: i64) -> AppResult<String> {
        let claims = Claims {
            id: user.id,
            usuario: user.usuario.clone(),
            iat: issued_at,
            exp: issued_at + self.ttl_secs,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)?;
        Ok(token)
    }

    /// Checks the value of an `Authorization` header and returns the identity it carries.
    pub fn verify(&self, authorization: Option<&str>) -> AppResult<Identity> {
        let token = bearer_token(authorization).ok_or(AppError::MissingToken)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.keys.decoding, &validation).map_err(|e| {
            tracing::warn!("Rejected session token: {}", e);
            AppError::InvalidToken
        })?;

        Ok(Identity {
            id: data.claims.id,
            usuario: data.claims.usuario,
        })
    }
}

// Extracts the token from "Bearer <token>", scheme matched case-insensitively
fn bearer_token(authorization: Option<&str>) -> Option<&str> {
    let (scheme, token) = authorization?.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
