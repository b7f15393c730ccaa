use std::error::Error;

/// Base trait for all application errors
pub trait AppHopError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config file: {message}")]
    ConfigParseError { message: String },

    #[error("Unknown activation strategy '{strategy}'. Known strategies: {known}")]
    UnknownStrategy { strategy: String, known: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl AppHopError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::UnknownStrategy { .. } => "UNKNOWN_STRATEGY",
            ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ConfigParseError { .. }
                | ConfigError::UnknownStrategy { .. }
                | ConfigError::InvalidConfiguration { .. }
        )
    }
}
