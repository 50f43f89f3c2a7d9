use crate::errors::Error;

use super::{environment, non_empty};

/// Default token lifetime when `JWT_EXPIRATION` is unset.
pub const DEFAULT_JWT_EXPIRATION_SECS: i64 = 86400;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_seconds: i64,
}

// Keep the secret out of logs
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_seconds", &self.expiration_seconds)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_seconds: DEFAULT_JWT_EXPIRATION_SECS,
        }
    }

    pub fn from_env() -> Result<Self, Error> {
        let cfg = environment()?;

        let secret = non_empty(cfg.get_string("JWT_SECRET").ok())
            .ok_or_else(|| Error::InvalidConfig("JWT_SECRET not set or empty".to_string()))?;

        Ok(Self {
            secret,
            expiration_seconds: cfg
                .get_int("JWT_EXPIRATION")
                .unwrap_or(DEFAULT_JWT_EXPIRATION_SECS),
        })
    }

    pub fn expiration(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.expiration_seconds)
    }
}
