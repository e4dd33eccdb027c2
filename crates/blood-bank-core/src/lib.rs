//! Blood Bank Core Library
//!
//! Donor eligibility, blood-unit inventory and request matching.
//!
//! # Architecture
//!
//! ```text
//!   Donor ──▶ record_donation ──▶ eligibility (56 days) ──▶ new unit (42 day shelf life)
//!                                                                │
//!                                                        [BloodInventory]
//!                                                                │
//!   Hospital ──▶ request_blood ──▶ payment gate ──▶ first-fit compatible, unexpired unit
//! ```
//!
//! # Core Principle
//!
//! **Every operation takes `now` explicitly.** Nothing in the core reads the
//! wall clock, so eligibility and expiry are reproducible.
//!
//! # Modules
//!
//! - [`models`]: Domain types (BloodType, Donor, Hospital, BloodUnit)
//! - [`compatibility`]: Donor → recipient compatibility matrix
//! - [`registry`]: Donor registry and hospital ledger
//! - [`inventory`]: Unit storage, expiry and allocation search
//! - [`service`]: Donation and request transactions
//! - [`config`]: Bank policy (time windows, id numbering)
//! - [`export`]: JSON and CSV reports

pub mod compatibility;
pub mod config;
pub mod error;
pub mod export;
pub mod inventory;
pub mod models;
pub mod registry;
pub mod service;

// Re-export commonly used types
pub use compatibility::compatible;
pub use config::{BankPolicy, ConfigError};
pub use error::{BankError, BankResult};
pub use inventory::{BloodInventory, DetailedInventory, InventorySummary};
pub use models::{
    BloodGroup, BloodType, BloodUnit, Donor, DonorId, Hospital, HospitalId, RhFactor, UnitStatus,
};
pub use registry::{DonorRegistry, HospitalLedger};
pub use service::BloodBankService;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum BloodBankError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Donor not found: {0}")]
    DonorNotFound(String),

    #[error("Hospital not found: {0}")]
    HospitalNotFound(String),

    #[error("Ineligible donor: {0}")]
    IneligibleDonor(String),

    #[error("Payment required: {0}")]
    PaymentRequired(String),

    #[error("No compatible unit: {0}")]
    NoCompatibleUnit(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Lock error: {0}")]
    LockError(String),
}

impl From<BankError> for BloodBankError {
    fn from(e: BankError) -> Self {
        let message = e.to_string();
        match e {
            BankError::Validation(_) => BloodBankError::InvalidInput(message),
            BankError::DonorNotFound(_) => BloodBankError::DonorNotFound(message),
            BankError::HospitalNotFound(_) => BloodBankError::HospitalNotFound(message),
            BankError::IneligibleDonor { .. } => BloodBankError::IneligibleDonor(message),
            BankError::PaymentRequired(_) => BloodBankError::PaymentRequired(message),
            BankError::NoCompatibleUnit(_) => BloodBankError::NoCompatibleUnit(message),
        }
    }
}

impl From<ConfigError> for BloodBankError {
    fn from(e: ConfigError) -> Self {
        BloodBankError::ConfigError(e.to_string())
    }
}

impl From<serde_json::Error> for BloodBankError {
    fn from(e: serde_json::Error) -> Self {
        BloodBankError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for BloodBankError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        BloodBankError::LockError(format!("Lock poisoned: {}", e))
    }
}

fn from_unix(seconds: i64) -> Result<DateTime<Utc>, BloodBankError> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| BloodBankError::InvalidInput(format!("timestamp out of range: {}", seconds)))
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create a blood bank with the standard policy.
#[uniffi::export]
pub fn new_blood_bank() -> Arc<BloodBankCore> {
    Arc::new(BloodBankCore::from_service(BloodBankService::new()))
}

/// Create a blood bank from a TOML policy document.
#[uniffi::export]
pub fn new_blood_bank_with_policy(policy_toml: String) -> Result<Arc<BloodBankCore>, BloodBankError> {
    let policy = BankPolicy::from_toml_str(&policy_toml)?;
    Ok(Arc::new(BloodBankCore::from_service(
        BloodBankService::with_policy(policy)?,
    )))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe service wrapper for FFI.
///
/// Each call holds the lock for its whole duration, so transactions stay atomic.
#[derive(uniffi::Object)]
pub struct BloodBankCore {
    bank: Arc<Mutex<BloodBankService>>,
}

impl BloodBankCore {
    fn from_service(service: BloodBankService) -> Self {
        Self {
            bank: Arc::new(Mutex::new(service)),
        }
    }
}

#[uniffi::export]
impl BloodBankCore {
    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a donor; returns the new donor ID.
    pub fn register_donor(
        &self,
        name: String,
        contact: String,
        group: String,
        rh: String,
        fit: bool,
    ) -> Result<String, BloodBankError> {
        let blood_type = BloodType::from_parts(&group, &rh)?;
        let mut bank = self.bank.lock()?;
        Ok(bank.register_donor(name, contact, blood_type, fit).to_string())
    }

    /// Register a hospital; returns the new hospital ID.
    pub fn register_hospital(&self, name: String, contact: String) -> Result<String, BloodBankError> {
        let mut bank = self.bank.lock()?;
        Ok(bank.register_hospital(name, contact).to_string())
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Record a donation at `now_unix` (seconds since the epoch).
    pub fn record_donation(
        &self,
        donor_id: String,
        now_unix: i64,
    ) -> Result<FfiBloodUnit, BloodBankError> {
        let now = from_unix(now_unix)?;
        let mut bank = self.bank.lock()?;
        let unit = bank.record_donation(&DonorId::new(donor_id), now)?;
        Ok(unit.into())
    }

    /// Request one unit compatible with `group`/`rh`.
    pub fn request_blood(
        &self,
        hospital_id: String,
        payment_confirmed: bool,
        group: String,
        rh: String,
        now_unix: i64,
    ) -> Result<FfiBloodUnit, BloodBankError> {
        let requested = BloodType::from_parts(&group, &rh)?;
        let now = from_unix(now_unix)?;
        let mut bank = self.bank.lock()?;
        let unit = bank.request_blood(
            &HospitalId::new(hospital_id),
            payment_confirmed,
            requested,
            now,
        )?;
        Ok(unit.into())
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Available units per blood type.
    pub fn inventory_summary(&self, now_unix: i64) -> Result<FfiInventorySummary, BloodBankError> {
        let now = from_unix(now_unix)?;
        let bank = self.bank.lock()?;
        Ok(bank.inventory_summary(now).into())
    }

    /// All units partitioned by status.
    pub fn detailed_inventory(&self, now_unix: i64) -> Result<FfiDetailedInventory, BloodBankError> {
        let now = from_unix(now_unix)?;
        let bank = self.bank.lock()?;
        Ok(bank.detailed_inventory(now).into())
    }

    pub fn list_donors(&self) -> Result<Vec<FfiDonor>, BloodBankError> {
        let bank = self.bank.lock()?;
        let interval = bank.policy().donation_interval();
        Ok(bank
            .list_donors()
            .iter()
            .map(|d| FfiDonor::from_donor(d, interval))
            .collect())
    }

    pub fn list_hospitals(&self) -> Result<Vec<FfiHospital>, BloodBankError> {
        let bank = self.bank.lock()?;
        Ok(bank.list_hospitals().into_iter().map(|h| h.into()).collect())
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export the inventory report as JSON.
    pub fn export_inventory_json(&self, now_unix: i64) -> Result<String, BloodBankError> {
        let report = self.inventory_report(now_unix)?;
        Ok(report.to_json()?)
    }

    /// Export inventory unit rows as CSV.
    pub fn export_inventory_csv(&self, now_unix: i64) -> Result<String, BloodBankError> {
        Ok(self.inventory_report(now_unix)?.to_csv())
    }

    /// Export the donor roster as CSV.
    pub fn export_donors_csv(&self) -> Result<String, BloodBankError> {
        let bank = self.bank.lock()?;
        Ok(export::donors_to_csv(
            &bank.list_donors(),
            bank.policy().donation_interval(),
        ))
    }

    /// Export the hospital roster as CSV.
    pub fn export_hospitals_csv(&self) -> Result<String, BloodBankError> {
        let bank = self.bank.lock()?;
        Ok(export::hospitals_to_csv(&bank.list_hospitals()))
    }
}

impl BloodBankCore {
    fn inventory_report(&self, now_unix: i64) -> Result<export::InventoryReport, BloodBankError> {
        let now = from_unix(now_unix)?;
        let bank = self.bank.lock()?;
        Ok(export::InventoryReport::new(
            now,
            &bank.inventory_summary(now),
            &bank.detailed_inventory(now),
        ))
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe donor.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDonor {
    pub donor_id: String,
    pub name: String,
    pub contact: String,
    pub blood_type: String,
    pub fit: bool,
    pub last_donation: Option<String>,
    pub next_eligible_at: Option<String>,
}

impl FfiDonor {
    fn from_donor(donor: &Donor, interval: Duration) -> Self {
        Self {
            donor_id: donor.id.to_string(),
            name: donor.name.clone(),
            contact: donor.contact.clone(),
            blood_type: donor.blood_type.to_string(),
            fit: donor.fit,
            last_donation: donor.last_donation.map(|t| t.to_rfc3339()),
            next_eligible_at: donor.next_eligible_at(interval).map(|t| t.to_rfc3339()),
        }
    }
}

/// FFI-safe hospital.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHospital {
    pub hospital_id: String,
    pub name: String,
    pub contact: String,
}

impl From<Hospital> for FfiHospital {
    fn from(hospital: Hospital) -> Self {
        Self {
            hospital_id: hospital.id.to_string(),
            name: hospital.name,
            contact: hospital.contact,
        }
    }
}

/// FFI-safe blood unit.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBloodUnit {
    pub unit_id: String,
    pub blood_type: String,
    pub donor_id: String,
    pub collected_at: String,
    pub expires_at: String,
    pub allocated: bool,
}

impl From<BloodUnit> for FfiBloodUnit {
    fn from(unit: BloodUnit) -> Self {
        Self {
            unit_id: unit.unit_id,
            blood_type: unit.blood_type.to_string(),
            donor_id: unit.donor_id.to_string(),
            collected_at: unit.collected_at.to_rfc3339(),
            expires_at: unit.expires_at.to_rfc3339(),
            allocated: unit.allocated,
        }
    }
}

/// FFI-safe per-type count.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBucketCount {
    pub blood_type: String,
    pub available: u32,
}

/// FFI-safe inventory summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiInventorySummary {
    pub buckets: Vec<FfiBucketCount>,
    pub total: u32,
}

impl From<InventorySummary> for FfiInventorySummary {
    fn from(summary: InventorySummary) -> Self {
        Self {
            buckets: summary
                .buckets()
                .map(|(blood_type, available)| FfiBucketCount {
                    blood_type: blood_type.to_string(),
                    available,
                })
                .collect(),
            total: summary.total(),
        }
    }
}

/// FFI-safe detailed inventory.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDetailedInventory {
    pub available: Vec<FfiBloodUnit>,
    pub allocated: Vec<FfiBloodUnit>,
    pub expired: Vec<FfiBloodUnit>,
}

impl From<DetailedInventory> for FfiDetailedInventory {
    fn from(scan: DetailedInventory) -> Self {
        Self {
            available: scan.available.into_iter().map(|u| u.into()).collect(),
            allocated: scan.allocated.into_iter().map(|u| u.into()).collect(),
            expired: scan.expired.into_iter().map(|u| u.into()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_717_228_800; // 2024-06-01T08:00:00Z

    #[test]
    fn test_ffi_end_to_end() {
        let core = new_blood_bank();
        let donor = core
            .register_donor("Ada".into(), "5550100".into(), "o".into(), "-".into(), true)
            .unwrap();
        assert_eq!(donor, "D1000");

        let unit = core.record_donation(donor, NOW).unwrap();
        assert_eq!(unit.blood_type, "O-");
        assert!(!unit.allocated);

        let hospital = core
            .register_hospital("St. Mary".into(), "5550200".into())
            .unwrap();
        let issued = core
            .request_blood(hospital.clone(), true, "AB".into(), "+".into(), NOW)
            .unwrap();
        assert_eq!(issued.unit_id, unit.unit_id);
        assert!(issued.allocated);

        let err = core
            .request_blood(hospital, true, "AB".into(), "+".into(), NOW)
            .unwrap_err();
        assert!(matches!(err, BloodBankError::NoCompatibleUnit(_)));
    }

    #[test]
    fn test_ffi_rejects_bad_blood_type() {
        let core = new_blood_bank();
        let err = core
            .register_donor("Ada".into(), "5550100".into(), "C".into(), "+".into(), true)
            .unwrap_err();
        assert!(matches!(err, BloodBankError::InvalidInput(_)));
        assert!(core.list_donors().unwrap().is_empty());
    }

    #[test]
    fn test_ffi_summary_buckets() {
        let core = new_blood_bank();
        let donor = core
            .register_donor("Ada".into(), "5550100".into(), "A".into(), "+".into(), true)
            .unwrap();
        core.record_donation(donor, NOW).unwrap();

        let summary = core.inventory_summary(NOW).unwrap();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.buckets[0].blood_type, "A+");
        assert_eq!(summary.buckets[0].available, 1);
    }

    #[test]
    fn test_ffi_policy_from_toml() {
        let core = new_blood_bank_with_policy("first_sequence = 1\n".into()).unwrap();
        let id = core
            .register_hospital("St. Mary".into(), "5550200".into())
            .unwrap();
        assert_eq!(id, "H1");

        assert!(matches!(
            new_blood_bank_with_policy("shelf_life_days = 0".into()),
            Err(BloodBankError::ConfigError(_))
        ));
        assert!(matches!(
            new_blood_bank_with_policy("shelf_life_days = 1000000000000".into()),
            Err(BloodBankError::ConfigError(_))
        ));
    }

    #[test]
    fn test_ffi_out_of_range_donation_keeps_bank_usable() {
        let core = new_blood_bank();
        let donor = core
            .register_donor("Ada".into(), "5550100".into(), "O".into(), "-".into(), true)
            .unwrap();

        let err = core
            .record_donation(donor.clone(), 8_210_266_876_799)
            .unwrap_err();
        assert!(matches!(err, BloodBankError::InvalidInput(_)));
        assert_eq!(core.inventory_summary(NOW).unwrap().total, 0);

        // Lock is not poisoned and the donor was not stamped
        core.record_donation(donor, NOW).unwrap();
        assert_eq!(core.inventory_summary(NOW).unwrap().total, 1);
    }

    #[test]
    fn test_ffi_exports() {
        let core = new_blood_bank();
        let donor = core
            .register_donor("Ada".into(), "5550100".into(), "B".into(), "-".into(), true)
            .unwrap();
        core.record_donation(donor, NOW).unwrap();

        let json = core.export_inventory_json(NOW).unwrap();
        assert!(json.contains("\"total_available\": 1"));

        let csv = core.export_inventory_csv(NOW).unwrap();
        assert_eq!(csv.lines().count(), 2);

        let roster = core.export_donors_csv().unwrap();
        assert!(roster.contains("D1000,Ada,5550100,B-,true,"));

        core.register_hospital("St. Mary".into(), "5550200".into())
            .unwrap();
        let hospitals = core.export_hospitals_csv().unwrap();
        assert!(hospitals.ends_with("H1000,St. Mary,5550200\n"));
    }
}
