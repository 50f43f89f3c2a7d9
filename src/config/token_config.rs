use crate::errors::Error;

use super::environment;

/// Raw bytes drawn per token unless configured otherwise.
pub const DEFAULT_TOKEN_BYTES: usize = 64;

/// Upper bound on raw bytes per token.
pub const MAX_TOKEN_BYTES: usize = 1024;

/// Only constructible through [`TokenConfig::new`], so the length is
/// always within `1..=MAX_TOKEN_BYTES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenConfig {
    byte_len: usize,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            byte_len: DEFAULT_TOKEN_BYTES,
        }
    }
}

impl TokenConfig {
    pub fn new(byte_len: usize) -> Result<Self, Error> {
        if byte_len == 0 {
            return Err(Error::InvalidConfig(
                "token byte length must be at least 1".to_string(),
            ));
        }
        if byte_len > MAX_TOKEN_BYTES {
            return Err(Error::InvalidConfig(format!(
                "token byte length must be at most {}, got {}",
                MAX_TOKEN_BYTES, byte_len
            )));
        }

        Ok(Self { byte_len })
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Reads `TOKEN_BYTES`, defaulting to 64.
    ///
    /// Changing the length only affects newly issued tokens; stored
    /// fingerprints of older tokens keep verifying.
    pub fn from_env() -> Result<Self, Error> {
        let cfg = environment()?;

        match cfg.get_int("TOKEN_BYTES") {
            Ok(n) => match usize::try_from(n) {
                Ok(len) if len > 0 => Self::new(len),
                _ => Err(Error::InvalidConfig(format!(
                    "TOKEN_BYTES must be between 1 and {}, got {}",
                    MAX_TOKEN_BYTES, n
                ))),
            },
            Err(config::ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}
