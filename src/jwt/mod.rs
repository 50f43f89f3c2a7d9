pub mod signer;

pub use signer::{generate_token, sign, Claims};
