//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load the config file if present, defaults otherwise.
///
/// A missing file is not an error: the gateway runs with defaults plus
/// environment-resolved LLM settings.
pub fn load_or_default(path: &Path) -> Result<GatewayConfig, ConfigError> {
    if path.is_file() {
        load_config(path)
    } else {
        Ok(GatewayConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_or_default(Path::new("/definitely/not/here/gateway.toml")).unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:8082");
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let path = std::env::temp_dir().join("chat_gateway_bad_config.toml");
        fs::write(&path, "server = ]broken[").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn invalid_bind_address_fails_validation() {
        let path = std::env::temp_dir().join("chat_gateway_invalid_bind.toml");
        fs::write(&path, "[server]\nbind_address = \"nonsense\"\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        fs::remove_file(&path).unwrap_or_default();
    }
}
