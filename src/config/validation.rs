//! Configuration validation.

use std::net::SocketAddr;

use crate::config::schema::GatewayConfig;

/// A single rejected configuration field.
#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check the cross-field rules the schema cannot express.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "server.bind_address".to_string(),
            message: format!("'{}' is not a valid socket address", config.server.bind_address),
        });
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "server.request_timeout_secs".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    if config.llm.provider.trim().is_empty() {
        errors.push(ValidationError {
            field: "llm.provider".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    if config.llm.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "llm.request_timeout_secs".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address".to_string(),
            message: format!(
                "'{}' is not a valid socket address",
                config.observability.metrics_address
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        let mut config = GatewayConfig::default();
        config.server.bind_address = "nonsense".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "server.bind_address");
    }

    #[test]
    fn zero_timeouts_are_rejected() {
        let mut config = GatewayConfig::default();
        config.server.request_timeout_secs = 0;
        config.llm.request_timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn metrics_address_is_only_checked_when_enabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_address = "nonsense".to_string();
        config.observability.metrics_enabled = false;
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
