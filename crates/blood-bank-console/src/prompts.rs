//! Field validation and the login gate.
//!
//! Everything here is pure so it can be exercised without a terminal; the
//! session wires these checks into interactive prompts.

use blood_bank_core::{BankError, BloodGroup, RhFactor};

/// Trimmed, non-empty name.
pub fn validate_name(input: &str) -> Result<String, BankError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(BankError::Validation("name must not be empty".into()));
    }
    Ok(name.to_string())
}

/// Contact number: 7–15 digits, optionally a leading `+`, with spaces or
/// dashes allowed as separators.
pub fn validate_contact(input: &str) -> Result<String, BankError> {
    let contact = input.trim();
    let body = contact.strip_prefix('+').unwrap_or(contact);

    if body
        .chars()
        .any(|c| !(c.is_ascii_digit() || c == ' ' || c == '-'))
    {
        return Err(BankError::Validation(format!(
            "contact '{}' may only contain digits, spaces and dashes",
            contact
        )));
    }

    let digits = body.chars().filter(|c| c.is_ascii_digit()).count();
    if !(7..=15).contains(&digits) {
        return Err(BankError::Validation(format!(
            "contact must have 7 to 15 digits, got {}",
            digits
        )));
    }
    Ok(contact.to_string())
}

pub fn parse_group(input: &str) -> Result<BloodGroup, BankError> {
    input.parse()
}

pub fn parse_rh(input: &str) -> Result<RhFactor, BankError> {
    input.parse()
}

/// Result of one login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Granted,
    Denied { remaining: u32 },
    Locked,
}

/// Counts failed logins against a fixed limit.
#[derive(Debug)]
pub struct LoginGate {
    username: String,
    password: String,
    max_attempts: u32,
    failures: u32,
}

impl LoginGate {
    pub fn new(username: String, password: String, max_attempts: u32) -> Self {
        Self {
            username,
            password,
            max_attempts,
            failures: 0,
        }
    }

    pub fn attempt(&mut self, username: &str, password: &str) -> LoginOutcome {
        if self.is_locked() {
            return LoginOutcome::Locked;
        }
        if username == self.username && password == self.password {
            return LoginOutcome::Granted;
        }
        self.failures += 1;
        if self.is_locked() {
            LoginOutcome::Locked
        } else {
            LoginOutcome::Denied {
                remaining: self.max_attempts - self.failures,
            }
        }
    }

    pub fn is_locked(&self) -> bool {
        self.failures >= self.max_attempts
    }
}
