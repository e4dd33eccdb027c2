//! Donor models.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::blood_type::BloodType;

/// Donor identifier, e.g. `D1000`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DonorId(String);

impl DonorId {
    pub const PREFIX: char = 'D';

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DonorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered blood donor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Donor {
    /// Sequential identifier assigned at registration
    pub id: DonorId,
    /// Full name
    pub name: String,
    /// Contact number
    pub contact: String,
    /// ABO group and Rh factor
    pub blood_type: BloodType,
    /// Medical fitness to donate
    pub fit: bool,
    /// Most recent donation, `None` if the donor has never donated
    pub last_donation: Option<DateTime<Utc>>,
}

impl Donor {
    /// Create a new donor who has never donated.
    pub fn new(id: DonorId, name: String, contact: String, blood_type: BloodType, fit: bool) -> Self {
        Self {
            id,
            name,
            contact,
            blood_type,
            fit,
            last_donation: None,
        }
    }

    /// Check eligibility at `now` given the minimum interval between donations.
    ///
    /// An unfit donor is never eligible. Otherwise the donor is eligible if
    /// they have never donated or at least `interval` has elapsed.
    pub fn is_eligible(&self, now: DateTime<Utc>, interval: Duration) -> bool {
        if !self.fit {
            return false;
        }
        match self.last_donation {
            None => true,
            Some(last) => now - last >= interval,
        }
    }

    /// Earliest time the donation interval is satisfied again.
    ///
    /// `None` if the donor never donated or that time is not representable.
    pub fn next_eligible_at(&self, interval: Duration) -> Option<DateTime<Utc>> {
        self.last_donation
            .and_then(|last| last.checked_add_signed(interval))
    }
}
