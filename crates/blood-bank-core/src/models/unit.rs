//! Blood unit models.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::blood_type::BloodType;
use super::donor::DonorId;
use crate::error::{BankError, BankResult};

/// Lifecycle state of a unit at a given instant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UnitStatus {
    /// In stock, unexpired and unallocated
    Available,
    /// Issued to a hospital
    Allocated,
    /// Past its expiry, whether allocated or not
    Expired,
}

impl UnitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitStatus::Available => "Available",
            UnitStatus::Allocated => "Allocated",
            UnitStatus::Expired => "Expired",
        }
    }
}

/// A single donated unit of blood.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BloodUnit {
    /// Unique unit ID (UUID v4)
    pub unit_id: String,
    /// Type of the donor who gave this unit
    pub blood_type: BloodType,
    /// Collection timestamp
    pub collected_at: DateTime<Utc>,
    /// Fixed at collection, never recomputed
    pub expires_at: DateTime<Utc>,
    /// Donor reference
    pub donor_id: DonorId,
    /// Whether this unit has been issued
    pub allocated: bool,
}

impl BloodUnit {
    /// Create a freshly collected, unallocated unit.
    ///
    /// Fails if the expiry date falls outside the representable range.
    pub fn new(
        blood_type: BloodType,
        donor_id: DonorId,
        collected_at: DateTime<Utc>,
        shelf_life: Duration,
    ) -> BankResult<Self> {
        let expires_at = collected_at.checked_add_signed(shelf_life).ok_or_else(|| {
            BankError::Validation(format!(
                "collection time {} has no representable expiry date",
                collected_at.to_rfc3339()
            ))
        })?;
        Ok(Self {
            unit_id: uuid::Uuid::new_v4().to_string(),
            blood_type,
            collected_at,
            expires_at,
            donor_id,
            allocated: false,
        })
    }

    /// Expired strictly after `expires_at`; a unit expiring exactly at `now` is still usable.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn status(&self, now: DateTime<Utc>) -> UnitStatus {
        if self.is_expired(now) {
            UnitStatus::Expired
        } else if self.allocated {
            UnitStatus::Allocated
        } else {
            UnitStatus::Available
        }
    }

    /// Whether the unit can still be issued at `now`.
    pub fn is_available(&self, now: DateTime<Utc>) -> bool {
        self.status(now) == UnitStatus::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BloodGroup, RhFactor};
    use chrono::TimeZone;

    fn unit_at(collected_at: DateTime<Utc>) -> BloodUnit {
        BloodUnit::new(
            BloodType::new(BloodGroup::A, RhFactor::Positive),
            DonorId::new("D1000"),
            collected_at,
            Duration::days(42),
        )
        .unwrap()
    }

    #[test]
    fn test_new_unit() {
        let c = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let unit = unit_at(c);
        assert!(!unit.allocated);
        assert_eq!(unit.expires_at, c + Duration::days(42));
        assert_eq!(unit.unit_id.len(), 36); // UUID format
    }

    #[test]
    fn test_expiry_is_strict() {
        let c = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let unit = unit_at(c);
        assert!(!unit.is_expired(c + Duration::days(42)));
        assert!(unit.is_expired(c + Duration::days(42) + Duration::seconds(1)));
    }

    #[test]
    fn test_status_priority() {
        let c = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let mut unit = unit_at(c);
        assert_eq!(unit.status(c), UnitStatus::Available);

        unit.allocated = true;
        assert_eq!(unit.status(c), UnitStatus::Allocated);

        // Expiry wins over allocation
        assert_eq!(unit.status(c + Duration::days(43)), UnitStatus::Expired);
    }

    #[test]
    fn test_unrepresentable_expiry_is_rejected() {
        let err = BloodUnit::new(
            BloodType::new(BloodGroup::O, RhFactor::Negative),
            DonorId::new("D1000"),
            DateTime::<Utc>::MAX_UTC,
            Duration::days(42),
        )
        .unwrap_err();
        assert!(matches!(err, BankError::Validation(_)));
    }
}
