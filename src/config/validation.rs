//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Smallest accepted inbound line limit.
const MIN_LINE_LEN: usize = 64;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("server.name must not contain spaces, got '{0}'")]
    ServerNameHasSpace(String),
    #[error("limits.max_line_len must be at least 64, got {0}")]
    LineLimitTooSmall(usize),
    #[error("limits.send_queue must be greater than zero")]
    ZeroSendQueue,
    #[error("limits.dispatch_queue must be greater than zero")]
    ZeroDispatchQueue,
    #[error("limits.write_timeout_secs must be greater than zero")]
    ZeroWriteTimeout,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let name = &config.server.name;
    if name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    } else if name.contains(' ') {
        errors.push(ValidationError::ServerNameHasSpace(name.clone()));
    }

    let limits = &config.limits;
    if limits.max_line_len < MIN_LINE_LEN {
        errors.push(ValidationError::LineLimitTooSmall(limits.max_line_len));
    }
    if limits.send_queue == 0 {
        errors.push(ValidationError::ZeroSendQueue);
    }
    if limits.dispatch_queue == 0 {
        errors.push(ValidationError::ZeroDispatchQueue);
    }
    if limits.write_timeout_secs == 0 {
        errors.push(ValidationError::ZeroWriteTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
