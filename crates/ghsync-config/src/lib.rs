//! Config module.

mod drivers;

use std::{env, str::FromStr};

pub use drivers::{DriverError, TransferDriver};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Use bunyan logging.
    pub use_bunyan: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind IP.
    pub bind_ip: String,
    /// Server bind port.
    pub bind_port: u16,
    /// Server workers count.
    pub workers_count: Option<u16>,
    /// Server webhook secret.
    pub webhook_secret: String,
    /// Disable webhook signature verification.
    pub disable_webhook_signature: bool,
}

#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Watched branch name.
    pub branch: String,
    /// Repository folder to mirror, empty for the whole repository.
    pub folder: String,
    /// Local directory receiving the changes.
    pub target_dir: String,
    /// Comment injected into downloaded files, empty to disable.
    pub comment: String,
    /// GitHub username used for raw downloads.
    pub github_username: String,
    /// GitHub password (or token) used for raw downloads.
    pub github_password: String,
}

#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// Transfer driver.
    pub driver: TransferDriver,
    /// Raw content root URL.
    pub raw_root_url: String,
    /// Connect timeout (in milliseconds).
    pub connect_timeout: u64,
    /// Whole download timeout (in milliseconds).
    pub timeout: u64,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Application name.
    pub name: String,
    /// Logging options.
    pub logging: LoggingConfig,
    /// Server options.
    pub server: ServerConfig,
    /// Sync options.
    pub sync: SyncConfig,
    /// Transfer options.
    pub transfer: TransferConfig,
    /// App version
    pub version: String,
}

impl Config {
    /// Create configuration from environment.
    pub fn from_env(version: String) -> Result<Config, DriverError> {
        Ok(Config {
            name: env_to_str("GHSYNC_NAME", "ghsync"),
            logging: LoggingConfig {
                use_bunyan: env_to_bool("GHSYNC_LOGGING_USE_BUNYAN", false),
            },
            server: ServerConfig {
                bind_ip: env_to_str("GHSYNC_SERVER_BIND_IP", "127.0.0.1"),
                bind_port: env_to_u16("GHSYNC_SERVER_BIND_PORT", 8008),
                workers_count: env_to_optional_u16("GHSYNC_SERVER_WORKERS_COUNT", None),
                webhook_secret: env_to_str("GHSYNC_SERVER_WEBHOOK_SECRET", ""),
                disable_webhook_signature: env_to_bool(
                    "GHSYNC_SERVER_DISABLE_WEBHOOK_SIGNATURE",
                    false,
                ),
            },
            sync: SyncConfig {
                branch: env_to_str("GHSYNC_SYNC_BRANCH", "main"),
                folder: env_to_str("GHSYNC_SYNC_FOLDER", ""),
                target_dir: env_to_str("GHSYNC_SYNC_TARGET_DIR", ""),
                comment: env_to_str("GHSYNC_SYNC_COMMENT", ""),
                github_username: env_to_str("GHSYNC_SYNC_GITHUB_USERNAME", ""),
                github_password: env_to_str("GHSYNC_SYNC_GITHUB_PASSWORD", ""),
            },
            transfer: TransferConfig {
                driver: TransferDriver::from_str(&env_to_str("GHSYNC_TRANSFER_DRIVER", "http"))?,
                raw_root_url: env_to_str(
                    "GHSYNC_TRANSFER_RAW_ROOT_URL",
                    "https://raw.githubusercontent.com",
                ),
                connect_timeout: env_to_u64("GHSYNC_TRANSFER_CONNECT_TIMEOUT", 5000),
                timeout: env_to_u64("GHSYNC_TRANSFER_TIMEOUT", 30000),
            },
            version,
        })
    }

    pub fn from_env_no_version() -> Result<Config, DriverError> {
        Self::from_env("0.0.0".into())
    }
}

fn env_to_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_optional_u16(name: &str, default: Option<u16>) -> Option<u16> {
    env::var(name)
        .map(|e| e.parse::<u16>().map(Some).unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_bool(name: &str, default: bool) -> bool {
    env::var(name).map(|e| !e.is_empty()).unwrap_or(default)
}

fn env_to_str(name: &str, default: &str) -> String {
    env::var(name)
        .unwrap_or_else(|_e| default.to_string())
        .replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::{env_to_bool, env_to_optional_u16, env_to_str, env_to_u16};

    #[test]
    fn test_env_helpers_defaults() {
        assert_eq!(env_to_str("GHSYNC_TEST_UNSET_STR", "value"), "value");
        assert_eq!(env_to_u16("GHSYNC_TEST_UNSET_U16", 12), 12);
        assert_eq!(env_to_optional_u16("GHSYNC_TEST_UNSET_OPT", None), None);
        assert!(!env_to_bool("GHSYNC_TEST_UNSET_BOOL", false));
    }

    #[test]
    fn test_env_helpers_values() {
        std::env::set_var("GHSYNC_TEST_SET_U16", "not-a-number");
        assert_eq!(env_to_u16("GHSYNC_TEST_SET_U16", 7), 7);

        std::env::set_var("GHSYNC_TEST_SET_OPT", "4");
        assert_eq!(env_to_optional_u16("GHSYNC_TEST_SET_OPT", None), Some(4));

        std::env::set_var("GHSYNC_TEST_SET_STR", "a\\nb");
        assert_eq!(env_to_str("GHSYNC_TEST_SET_STR", ""), "a\nb");
    }
}
