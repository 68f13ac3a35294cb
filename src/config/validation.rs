//! Configuration validation.
//!
//! Semantic checks only; serde handles the syntactic ones. All problems are
//! reported, not just the first.

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.base_port must be greater than 0")]
    ZeroBasePort,

    #[error("listener.workers must be at least 1")]
    NoWorkers,

    #[error("port range {base}..{base}+{workers} exceeds 65535")]
    PortRangeOverflow { base: u16, workers: usize },

    #[error("listener.host must not be empty")]
    EmptyHost,

    #[error("timeouts.{0} must be greater than 0")]
    ZeroTimeout(&'static str),

    #[error("timeouts.proxy_secs ({proxy}) must be less than timeouts.request_secs ({request})")]
    ProxyTimeoutNotBelowRequest { proxy: u64, request: u64 },

    #[error("limits.max_body_size must be greater than 0")]
    ZeroBodyLimit,
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let listener = &config.listener;

    if listener.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if listener.base_port == 0 {
        errors.push(ValidationError::ZeroBasePort);
    }
    if listener.workers == 0 {
        errors.push(ValidationError::NoWorkers);
    } else if listener.base_port as usize + listener.workers - 1 > u16::MAX as usize {
        errors.push(ValidationError::PortRangeOverflow {
            base: listener.base_port,
            workers: listener.workers,
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }
    if config.timeouts.proxy_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("proxy_secs"));
    }
    // The proxy deadline has to fire first, or the caller gets a bare 408.
    if config.timeouts.request_secs > 0 && config.timeouts.proxy_secs >= config.timeouts.request_secs {
        errors.push(ValidationError::ProxyTimeoutNotBelowRequest {
            proxy: config.timeouts.proxy_secs,
            request: config.timeouts.request_secs,
        });
    }
    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
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
    fn default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn reports_all_errors() {
        let mut config = GatewayConfig::default();
        config.listener.base_port = 0;
        config.timeouts.proxy_secs = 0;
        config.limits.max_body_size = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::ZeroBasePort,
                ValidationError::ZeroTimeout("proxy_secs"),
                ValidationError::ZeroBodyLimit,
            ]
        );
    }

    #[test]
    fn rejects_port_range_past_u16() {
        let mut config = GatewayConfig::default();
        config.listener.base_port = 65_535;
        config.listener.workers = 1;
        assert!(validate_config(&config).is_ok());

        config.listener.workers = 2;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::PortRangeOverflow { base: 65_535, workers: 2 }]
        );
    }

    #[test]
    fn proxy_timeout_must_be_below_request_timeout() {
        let mut config = GatewayConfig::default();
        config.timeouts.request_secs = 1;
        config.timeouts.proxy_secs = 3;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::ProxyTimeoutNotBelowRequest { proxy: 3, request: 1 }]
        );

        config.timeouts.proxy_secs = 1;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::ProxyTimeoutNotBelowRequest { proxy: 1, request: 1 }]
        );

        config.timeouts.request_secs = 2;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn rejects_empty_pool() {
        let mut config = GatewayConfig::default();
        config.listener.workers = 0;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::NoWorkers]
        );
    }
}
