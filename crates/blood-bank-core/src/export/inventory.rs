//! Inventory report export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::escape_csv;
use crate::inventory::{DetailedInventory, InventorySummary};
use crate::models::{BloodType, BloodUnit, UnitStatus};

/// Per-type available count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BucketCount {
    pub blood_type: BloodType,
    pub available: u32,
}

/// One row per stored unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitRecord {
    pub unit_id: String,
    pub blood_type: BloodType,
    pub donor_id: String,
    pub collected_at: String,
    pub expires_at: String,
    pub status: UnitStatus,
}

impl UnitRecord {
    fn from_unit(unit: &BloodUnit, status: UnitStatus) -> Self {
        Self {
            unit_id: unit.unit_id.clone(),
            blood_type: unit.blood_type,
            donor_id: unit.donor_id.to_string(),
            collected_at: unit.collected_at.to_rfc3339(),
            expires_at: unit.expires_at.to_rfc3339(),
            status,
        }
    }
}

/// Point-in-time inventory report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryReport {
    /// Instant the statuses were evaluated at
    pub as_of: String,
    pub buckets: Vec<BucketCount>,
    pub total_available: u32,
    pub total_allocated: usize,
    pub total_expired: usize,
    pub units: Vec<UnitRecord>,
}

impl InventoryReport {
    /// Build a report from a summary and a scan taken at the same instant.
    pub fn new(now: DateTime<Utc>, summary: &InventorySummary, scan: &DetailedInventory) -> Self {
        let buckets = summary
            .buckets()
            .map(|(blood_type, available)| BucketCount {
                blood_type,
                available,
            })
            .collect();

        let units = scan
            .available
            .iter()
            .map(|u| UnitRecord::from_unit(u, UnitStatus::Available))
            .chain(
                scan.allocated
                    .iter()
                    .map(|u| UnitRecord::from_unit(u, UnitStatus::Allocated)),
            )
            .chain(
                scan.expired
                    .iter()
                    .map(|u| UnitRecord::from_unit(u, UnitStatus::Expired)),
            )
            .collect();

        Self {
            as_of: now.to_rfc3339(),
            buckets,
            total_available: summary.total(),
            total_allocated: scan.allocated.len(),
            total_expired: scan.expired.len(),
            units,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export unit rows to CSV.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        csv.push_str("unit_id,blood_type,donor_id,collected_at,expires_at,status\n");

        for unit in &self.units {
            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                escape_csv(&unit.unit_id),
                unit.blood_type,
                escape_csv(&unit.donor_id),
                escape_csv(&unit.collected_at),
                escape_csv(&unit.expires_at),
                unit.status.as_str(),
            ));
        }

        csv
    }
}
