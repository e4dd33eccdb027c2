//! ABO group, Rh factor and the combined blood type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BankError;

/// ABO blood group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    A,
    B,
    AB,
    O,
}

impl BloodGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            BloodGroup::A => "A",
            BloodGroup::B => "B",
            BloodGroup::AB => "AB",
            BloodGroup::O => "O",
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodGroup {
    type Err = BankError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(BloodGroup::A),
            "B" => Ok(BloodGroup::B),
            "AB" => Ok(BloodGroup::AB),
            "O" => Ok(BloodGroup::O),
            other => Err(BankError::Validation(format!(
                "invalid blood group '{}', expected one of A, B, AB, O",
                other
            ))),
        }
    }
}

/// Rhesus factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RhFactor {
    Positive,
    Negative,
}

impl RhFactor {
    pub fn symbol(&self) -> char {
        match self {
            RhFactor::Positive => '+',
            RhFactor::Negative => '-',
        }
    }
}

impl fmt::Display for RhFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for RhFactor {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(RhFactor::Positive),
            "-" => Ok(RhFactor::Negative),
            other => Err(BankError::Validation(format!(
                "invalid rhesus factor '{}', expected + or -",
                other
            ))),
        }
    }
}

/// A full blood type such as `AB+` or `O-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct BloodType {
    pub group: BloodGroup,
    pub rh: RhFactor,
}

impl BloodType {
    /// All eight types, in reporting order.
    pub const ALL: [BloodType; 8] = [
        BloodType::new(BloodGroup::A, RhFactor::Positive),
        BloodType::new(BloodGroup::A, RhFactor::Negative),
        BloodType::new(BloodGroup::B, RhFactor::Positive),
        BloodType::new(BloodGroup::B, RhFactor::Negative),
        BloodType::new(BloodGroup::AB, RhFactor::Positive),
        BloodType::new(BloodGroup::AB, RhFactor::Negative),
        BloodType::new(BloodGroup::O, RhFactor::Positive),
        BloodType::new(BloodGroup::O, RhFactor::Negative),
    ];

    pub const fn new(group: BloodGroup, rh: RhFactor) -> Self {
        Self { group, rh }
    }

    /// Parse a group and an Rh factor supplied as separate fields.
    pub fn from_parts(group: &str, rh: &str) -> Result<Self, BankError> {
        Ok(Self::new(group.parse()?, rh.parse()?))
    }

    /// Position of this type in [`BloodType::ALL`].
    pub fn index(&self) -> usize {
        let group = match self.group {
            BloodGroup::A => 0,
            BloodGroup::B => 1,
            BloodGroup::AB => 2,
            BloodGroup::O => 3,
        };
        let rh = match self.rh {
            RhFactor::Positive => 0,
            RhFactor::Negative => 1,
        };
        group * 2 + rh
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.group, self.rh)
    }
}

impl FromStr for BloodType {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s.len().saturating_sub(1);
        match (s.get(..split), s.get(split..)) {
            (Some(group), Some(rh)) if !group.is_empty() => Self::from_parts(group, rh),
            _ => Err(BankError::Validation(format!("invalid blood type '{}'", s))),
        }
    }
}

impl From<BloodType> for String {
    fn from(blood_type: BloodType) -> Self {
        blood_type.to_string()
    }
}

impl TryFrom<String> for BloodType {
    type Error = BankError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
