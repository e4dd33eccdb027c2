//! Bank policy: time windows and identifier numbering.

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a policy file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Longest shelf life or donation interval a policy may set, in days.
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// Rules that govern eligibility, shelf life and id assignment.
///
/// Every field has a default, so an empty TOML document is a valid policy:
///
/// ```toml
/// shelf_life_days = 42
/// donation_interval_days = 56
/// first_sequence = 1000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankPolicy {
    /// Days after collection until a unit expires
    pub shelf_life_days: i64,
    /// Minimum days between two donations by the same donor
    pub donation_interval_days: i64,
    /// First sequence number for donor and hospital ids
    pub first_sequence: u32,
}

impl Default for BankPolicy {
    fn default() -> Self {
        Self {
            shelf_life_days: 42,
            donation_interval_days: 56,
            first_sequence: 1000,
        }
    }
}

impl BankPolicy {
    /// Load a policy from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a policy from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let policy: Self = toml::from_str(content)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Both windows must lie in `1..=MAX_WINDOW_DAYS`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_window("shelf_life_days", self.shelf_life_days)?;
        check_window("donation_interval_days", self.donation_interval_days)
    }

    /// Clamped to the range [`BankPolicy::validate`] accepts.
    pub fn shelf_life(&self) -> Duration {
        Duration::days(self.shelf_life_days.clamp(1, MAX_WINDOW_DAYS))
    }

    /// Clamped to the range [`BankPolicy::validate`] accepts.
    pub fn donation_interval(&self) -> Duration {
        Duration::days(self.donation_interval_days.clamp(1, MAX_WINDOW_DAYS))
    }
}

fn check_window(name: &str, days: i64) -> Result<(), ConfigError> {
    if !(1..=MAX_WINDOW_DAYS).contains(&days) {
        return Err(ConfigError::Invalid(format!(
            "{} must be between 1 and {}, got {}",
            name, MAX_WINDOW_DAYS, days
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let policy = BankPolicy::default();
        assert_eq!(policy.shelf_life(), Duration::days(42));
        assert_eq!(policy.donation_interval(), Duration::days(56));
        assert_eq!(policy.first_sequence, 1000);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let policy = BankPolicy::from_toml_str("").unwrap();
        assert_eq!(policy, BankPolicy::default());
    }

    #[test]
    fn test_partial_override() {
        let policy = BankPolicy::from_toml_str("shelf_life_days = 35\n").unwrap();
        assert_eq!(policy.shelf_life_days, 35);
        assert_eq!(policy.donation_interval_days, 56);
    }

    #[test]
    fn test_rejects_non_positive_windows() {
        let err = BankPolicy::from_toml_str("shelf_life_days = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = BankPolicy::from_toml_str("donation_interval_days = -3").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_oversized_windows() {
        let err = BankPolicy::from_toml_str("shelf_life_days = 1000000000000").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = BankPolicy::from_toml_str("donation_interval_days = 36501").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let policy = BankPolicy::from_toml_str("donation_interval_days = 36500").unwrap();
        assert_eq!(policy.donation_interval(), Duration::days(MAX_WINDOW_DAYS));
    }

    #[test]
    fn test_accessors_never_exceed_bounds() {
        let policy = BankPolicy {
            shelf_life_days: i64::MAX,
            donation_interval_days: i64::MIN,
            first_sequence: 1000,
        };
        assert_eq!(policy.shelf_life(), Duration::days(MAX_WINDOW_DAYS));
        assert_eq!(policy.donation_interval(), Duration::days(1));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = BankPolicy::from_toml_str("shelf_life_days = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "donation_interval_days = 84\nfirst_sequence = 1").unwrap();

        let policy = BankPolicy::load(file.path()).unwrap();
        assert_eq!(policy.donation_interval_days, 84);
        assert_eq!(policy.first_sequence, 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = BankPolicy::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
