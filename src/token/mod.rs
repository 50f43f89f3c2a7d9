pub mod service;

pub use service::{generate_token, hash_token, verify_token_hash, TokenService, FINGERPRINT_LEN};
