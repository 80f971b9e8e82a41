use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Feed source paths are not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Feed validation
    if config.feeds.android.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "feeds.android cannot be empty".to_string(),
        ));
    }
    if config.feeds.ios.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "feeds.ios cannot be empty".to_string(),
        ));
    }

    Ok(())
}
