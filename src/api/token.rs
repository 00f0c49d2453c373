//! Stateless bearer tokens.
//!
//! Tokens are HS256 JWTs embedding the user's id and username, signed with
//! the process-wide secret from config. Nothing is stored server-side:
//! validity is entirely a function of the signature and the `exp` claim.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried inside each token
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id
    sub: i64,
    username: String,
    /// Issued at (Unix timestamp)
    iat: i64,
    /// Expiration (Unix timestamp)
    exp: i64,
}

/// The identity resolved from a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub username: String,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Sign a token for the given user, expiring `ttl_secs` from now.
    pub fn issue(&self, user_id: i64, username: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Decode and check a token. A bad signature, malformed token, or
    /// passed expiry all fail the same way; there is no partial validity.
    pub fn verify(&self, token: &str) -> Result<Identity, jsonwebtoken::errors::Error> {
        let mut validation = Validation::default();
        // Expiry is exact; the default 60s leeway would stretch the lifetime
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(Identity {
            id: data.claims.sub,
            username: data.claims.username,
        })
    }
}
