//! Blood unit storage, expiry and first-fit allocation.

mod summary;

pub use summary::*;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::compatibility::compatible;
use crate::error::{BankError, BankResult};
use crate::models::{BloodType, BloodUnit, DonorId, UnitStatus};

/// Owns every unit ever collected, in collection order.
///
/// Units are never removed. Expired and allocated units stay visible to
/// [`BloodInventory::detailed_scan`].
#[derive(Debug, Clone)]
pub struct BloodInventory {
    units: Vec<BloodUnit>,
    shelf_life: Duration,
}

impl BloodInventory {
    pub fn new(shelf_life: Duration) -> Self {
        Self {
            units: Vec::new(),
            shelf_life,
        }
    }

    /// Store a newly collected unit and return a copy of it.
    ///
    /// Nothing is stored if the unit's expiry cannot be computed.
    pub fn add_unit(
        &mut self,
        blood_type: BloodType,
        donor_id: DonorId,
        now: DateTime<Utc>,
    ) -> BankResult<BloodUnit> {
        let unit = self.collect(blood_type, donor_id, now)?;
        Ok(self.store(unit))
    }

    /// Build a unit with this inventory's shelf life without storing it.
    pub(crate) fn collect(
        &self,
        blood_type: BloodType,
        donor_id: DonorId,
        now: DateTime<Utc>,
    ) -> BankResult<BloodUnit> {
        BloodUnit::new(blood_type, donor_id, now, self.shelf_life)
    }

    pub(crate) fn store(&mut self, unit: BloodUnit) -> BloodUnit {
        info!(
            unit_id = %unit.unit_id,
            donor_id = %unit.donor_id,
            blood_type = %unit.blood_type,
            expires_at = %unit.expires_at,
            "collected unit"
        );
        self.units.push(unit.clone());
        unit
    }

    pub fn is_expired(&self, unit: &BloodUnit, now: DateTime<Utc>) -> bool {
        unit.is_expired(now)
    }

    /// Issue the first stored unit that is unallocated, unexpired and
    /// compatible with `requested`.
    ///
    /// Inventory is untouched when nothing qualifies.
    pub fn allocate(&mut self, requested: BloodType, now: DateTime<Utc>) -> BankResult<BloodUnit> {
        let unit = self
            .units
            .iter_mut()
            .filter(|unit| unit.is_available(now))
            .find(|unit| compatible(requested, unit.blood_type));

        match unit {
            Some(unit) => {
                unit.allocated = true;
                info!(
                    unit_id = %unit.unit_id,
                    requested = %requested,
                    issued = %unit.blood_type,
                    "allocated unit"
                );
                Ok(unit.clone())
            }
            None => {
                debug!(requested = %requested, "no compatible unit");
                Err(BankError::NoCompatibleUnit(requested))
            }
        }
    }

    /// Available units per blood type at `now`.
    pub fn summary(&self, now: DateTime<Utc>) -> InventorySummary {
        let mut summary = InventorySummary::default();
        for unit in self.units.iter().filter(|unit| unit.is_available(now)) {
            summary.record(unit.blood_type);
        }
        summary
    }

    /// Partition every stored unit by its status at `now`.
    pub fn detailed_scan(&self, now: DateTime<Utc>) -> DetailedInventory {
        let mut scan = DetailedInventory::default();
        for unit in &self.units {
            let bucket = match unit.status(now) {
                UnitStatus::Expired => &mut scan.expired,
                UnitStatus::Allocated => &mut scan.allocated,
                UnitStatus::Available => &mut scan.available,
            };
            bucket.push(unit.clone());
        }
        scan
    }

    /// All units in collection order.
    pub fn units(&self) -> &[BloodUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
