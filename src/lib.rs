//! Leaf utilities shared by backend services: opaque refresh-token issuing
//! and fingerprinting, HS256 JWT signing, a logging façade over `tracing`,
//! and clock helpers.

pub mod config;
pub mod date;
pub mod errors;
pub mod jwt;
pub mod logging;
pub mod token;

pub use errors::{Error, ErrorCode, Result};
pub use token::{generate_token, hash_token, verify_token_hash, TokenService};
