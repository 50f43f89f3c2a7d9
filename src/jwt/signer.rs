use chrono::Duration;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::date;
use crate::errors::Error;

/// Registered claims most services need: subject, issued-at and expiry.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Create claims for `sub` that expire `ttl` from now
    pub fn new(sub: impl Into<String>, ttl: Duration) -> Self {
        let iat = date::now();
        let exp = iat + ttl;

        Self {
            sub: sub.into(),
            iat: iat.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Create claims using the configured expiration
    pub fn with_config_expiration(sub: impl Into<String>, config: &JwtConfig) -> Self {
        Self::new(sub, config.expiration())
    }
}

/// Sign any serializable claims with HMAC-SHA256.
///
/// The claims are not inspected: missing or stale `exp` values are signed
/// as given. Verification is the consumer's job.
pub fn generate_token<T: Serialize>(secret: &[u8], claims: &T) -> Result<String, Error> {
    let header = Header::new(Algorithm::HS256);

    encode(&header, claims, &EncodingKey::from_secret(secret)).map_err(|e| {
        tracing::warn!("JWT signing failed: {}", e);
        Error::Jwt(e)
    })
}

/// Sign claims with the secret from `config`
pub fn sign<T: Serialize>(config: &JwtConfig, claims: &T) -> Result<String, Error> {
    generate_token(config.secret.as_bytes(), claims)
}
