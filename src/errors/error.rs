use thiserror::Error;

/// Library error types
#[derive(Debug, Error)]
pub enum Error {
    #[error("Entropy unavailable: {0}")]
    EntropyUnavailable(#[from] rand::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logging error: {0}")]
    Logging(String),
}

/// Stable error codes for callers that expose errors over an API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    EntropyUnavailable,
    JwtError,
    ConfigError,
    InvalidConfig,
    IoError,
    LoggingError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::EntropyUnavailable => "ENTROPY_UNAVAILABLE",
            ErrorCode::JwtError => "JWT_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::LoggingError => "LOGGING_ERROR",
        }
    }
}

impl Error {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Error::EntropyUnavailable(_) => ErrorCode::EntropyUnavailable,
            Error::Jwt(_) => ErrorCode::JwtError,
            Error::Config(_) => ErrorCode::ConfigError,
            Error::InvalidConfig(_) => ErrorCode::InvalidConfig,
            Error::Io(_) => ErrorCode::IoError,
            Error::Logging(_) => ErrorCode::LoggingError,
        }
    }

    /// Whether the operation that produced this error must be aborted.
    ///
    /// Entropy and signing failures mean no credential can be issued.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::EntropyUnavailable(_) | Error::Jwt(_))
    }
}

// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
