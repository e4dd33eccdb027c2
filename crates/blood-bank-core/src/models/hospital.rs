//! Hospital models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hospital identifier, e.g. `H1000`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HospitalId(String);

impl HospitalId {
    pub const PREFIX: char = 'H';

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HospitalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A hospital that requests blood.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hospital {
    pub id: HospitalId,
    pub name: String,
    pub contact: String,
    /// Set by a request and cleared when its payment gate is read, so it is
    /// always false between requests
    pub payment_confirmed: bool,
}

impl Hospital {
    pub fn new(id: HospitalId, name: String, contact: String) -> Self {
        Self {
            id,
            name,
            contact,
            payment_confirmed: false,
        }
    }
}
