pub mod jwt_config;
pub mod log_config;
pub mod token_config;

pub use jwt_config::JwtConfig;
pub use log_config::LogConfig;
pub use token_config::{TokenConfig, DEFAULT_TOKEN_BYTES, MAX_TOKEN_BYTES};

/// Load `.env` and build a config view over the process environment.
fn environment() -> Result<config::Config, config::ConfigError> {
    dotenv::dotenv().ok();

    config::Config::builder()
        .add_source(config::Environment::default())
        .build()
}

/// Treat empty variables as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
