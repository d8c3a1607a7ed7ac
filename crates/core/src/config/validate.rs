use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - OMDb section exists (enforced by serde) with a non-empty API key
/// - OMDb timeout is not 0
/// - Server port is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.omdb.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "omdb.api_key cannot be empty".to_string(),
        ));
    }

    if config.omdb.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "omdb.timeout_secs cannot be 0".to_string(),
        ));
    }

    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    Ok(())
}
