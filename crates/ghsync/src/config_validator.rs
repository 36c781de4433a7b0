//! Validation utilities.

use std::fmt::Write;

use ghsync_config::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

fn validate_env_vars(config: &Config) -> Result<(), ValidationError> {
    #[inline]
    fn _missing(error: &mut String, name: &str) {
        error.push('\n');
        write!(error, "  - Missing env. var.: {}", name).unwrap();
    }

    #[inline]
    fn _unexpected(error: &mut String, name: &str, reason: &str) {
        error.push('\n');
        write!(error, "  - Unexpected env. var.: {} ({})", name, reason).unwrap();
    }

    let mut error = String::new();

    // Check server configuration
    if config.server.bind_ip.is_empty() {
        _missing(&mut error, "GHSYNC_SERVER_BIND_IP");
    }
    if config.server.bind_port == 0 {
        _missing(&mut error, "GHSYNC_SERVER_BIND_PORT");
    }
    if config.name.is_empty() {
        _missing(&mut error, "GHSYNC_NAME");
    }

    // Check sync configuration
    if config.sync.branch.is_empty() {
        _missing(&mut error, "GHSYNC_SYNC_BRANCH");
    }
    if config.sync.github_username.is_empty() && !config.sync.github_password.is_empty() {
        _unexpected(
            &mut error,
            "GHSYNC_SYNC_GITHUB_PASSWORD",
            "set without GHSYNC_SYNC_GITHUB_USERNAME",
        );
    }

    // Check transfer configuration
    if config.transfer.raw_root_url.is_empty() {
        _missing(&mut error, "GHSYNC_TRANSFER_RAW_ROOT_URL");
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError { errors: error })
    }
}

/// Validate configuration.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    validate_env_vars(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_defaults() {
        let config = crate::testutils::sample_config();
        assert!(validate_configuration(&config).is_ok());
    }

    #[test]
    fn test_validate_errors() {
        let mut config = crate::testutils::sample_config();
        config.server.bind_ip = String::new();
        config.sync.github_password = "secret".into();
        config.transfer.raw_root_url = String::new();

        let ValidationError::EnvVarsError { errors } =
            validate_configuration(&config).unwrap_err();
        assert_eq!(
            errors,
            "\n  - Missing env. var.: GHSYNC_SERVER_BIND_IP\
             \n  - Unexpected env. var.: GHSYNC_SYNC_GITHUB_PASSWORD (set without GHSYNC_SYNC_GITHUB_USERNAME)\
             \n  - Missing env. var.: GHSYNC_TRANSFER_RAW_ROOT_URL"
        );
    }
}
