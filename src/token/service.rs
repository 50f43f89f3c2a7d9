use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::config::TokenConfig;
use crate::errors::Error;

/// Hex characters in a SHA-256 fingerprint.
pub const FINGERPRINT_LEN: usize = 64;

/// Issues opaque bearer tokens and fingerprints them for storage.
///
/// Tokens are random bytes from the OS CSPRNG, rendered as unpadded URL-safe
/// base64. Only the SHA-256 fingerprint of a token's text should be
/// persisted, so a leaked store never exposes usable credentials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenService {
    config: TokenConfig,
}

impl TokenService {
    pub fn new(config: TokenConfig) -> Self {
        Self { config }
    }

    pub fn byte_len(&self) -> usize {
        self.config.byte_len()
    }

    /// Length of the token text for the configured byte length.
    pub fn encoded_len(&self) -> usize {
        (self.config.byte_len() * 4).div_ceil(3)
    }

    /// Generate a fresh token from the OS random source.
    ///
    /// Fails only when the OS cannot supply entropy. The failure is not
    /// retried; callers must abort whatever issuance needed the token.
    pub fn generate(&self) -> Result<String, Error> {
        self.generate_with(&mut OsRng)
    }

    /// Generate a token from a caller-supplied CSPRNG.
    pub fn generate_with<R>(&self, rng: &mut R) -> Result<String, Error>
    where
        R: RngCore + CryptoRng,
    {
        let mut bytes = vec![0u8; self.config.byte_len()];
        rng.try_fill_bytes(&mut bytes).map_err(|e| {
            tracing::error!(error = %e, "Secure random source failed to supply entropy");
            Error::EntropyUnavailable(e)
        })?;

        Ok(URL_SAFE_NO_PAD.encode(&bytes))
    }

    /// Fingerprint any string: lowercase hex SHA-256 of its UTF-8 bytes.
    pub fn hash(&self, token: &str) -> String {
        hash_token(token)
    }

    pub fn verify(&self, token: &str, fingerprint: &str) -> bool {
        verify_token_hash(token, fingerprint)
    }
}

/// Generate a 64-byte token.
pub fn generate_token() -> Result<String, Error> {
    TokenService::default().generate()
}

/// Hash a token for storage.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a presented token against a stored fingerprint in constant time.
pub fn verify_token_hash(token: &str, fingerprint: &str) -> bool {
    let computed = hash_token(token);

    // ct_eq is false for slices of different length
    computed
        .as_bytes()
        .ct_eq(fingerprint.as_bytes())
        .into()
}
