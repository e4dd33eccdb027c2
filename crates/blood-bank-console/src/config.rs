//! Console settings.

use std::path::Path;

use blood_bank_core::{BankPolicy, ConfigError};
use serde::{Deserialize, Serialize};

/// Operator credentials, login limits and the bank policy.
///
/// ```toml
/// username = "admin"
/// password = "password"
/// max_login_attempts = 3
///
/// [policy]
/// shelf_life_days = 42
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub username: String,
    pub password: String,
    pub max_login_attempts: u32,
    pub policy: BankPolicy,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            username: "admin".into(),
            password: "password".into(),
            max_login_attempts: 3,
            policy: BankPolicy::default(),
        }
    }
}

impl ConsoleConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        if config.max_login_attempts == 0 {
            return Err(ConfigError::Invalid(
                "max_login_attempts must be at least 1".into(),
            ));
        }
        config.policy.validate()?;
        Ok(config)
    }
}
