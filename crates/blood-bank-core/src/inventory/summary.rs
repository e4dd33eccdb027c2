//! Inventory views derived from a live scan.

use serde::{Deserialize, Serialize};

use crate::models::{BloodType, BloodUnit};

/// Available units per blood type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    /// Counts indexed by [`BloodType::index`], i.e. A+ A- B+ B- AB+ AB- O+ O-
    counts: [u32; 8],
}

impl InventorySummary {
    pub(crate) fn record(&mut self, blood_type: BloodType) {
        self.counts[blood_type.index()] += 1;
    }

    /// Available units of one type.
    pub fn count(&self, blood_type: BloodType) -> u32 {
        self.counts[blood_type.index()]
    }

    /// `(type, count)` pairs in reporting order.
    pub fn buckets(&self) -> impl Iterator<Item = (BloodType, u32)> + '_ {
        BloodType::ALL.into_iter().zip(self.counts.iter().copied())
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

/// Every stored unit, partitioned by status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedInventory {
    pub available: Vec<BloodUnit>,
    pub allocated: Vec<BloodUnit>,
    pub expired: Vec<BloodUnit>,
}

impl DetailedInventory {
    pub fn total(&self) -> usize {
        self.available.len() + self.allocated.len() + self.expired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
