//! Orchestration of donations and hospital requests.
//!
//! ```text
//! record_donation:  find donor → build unit → eligibility → stamp donation → store unit
//! request_blood:    find hospital → payment gate → first-fit allocate
//! ```

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use crate::config::{BankPolicy, ConfigError};
use crate::error::{BankError, BankResult};
use crate::inventory::{BloodInventory, DetailedInventory, InventorySummary};
use crate::models::{BloodType, BloodUnit, Donor, DonorId, Hospital, HospitalId};
use crate::registry::{DonorRegistry, HospitalLedger};

/// The blood bank: donors, hospitals and inventory under one owner.
#[derive(Debug, Clone)]
pub struct BloodBankService {
    policy: BankPolicy,
    donors: DonorRegistry,
    hospitals: HospitalLedger,
    inventory: BloodInventory,
}

impl Default for BloodBankService {
    fn default() -> Self {
        Self::from_policy(BankPolicy::default())
    }
}

impl BloodBankService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bank under `policy`, rejecting one that fails validation.
    pub fn with_policy(policy: BankPolicy) -> Result<Self, ConfigError> {
        policy.validate()?;
        Ok(Self::from_policy(policy))
    }

    fn from_policy(policy: BankPolicy) -> Self {
        Self {
            donors: DonorRegistry::new(policy.first_sequence, policy.donation_interval()),
            hospitals: HospitalLedger::new(policy.first_sequence),
            inventory: BloodInventory::new(policy.shelf_life()),
            policy,
        }
    }

    pub fn policy(&self) -> &BankPolicy {
        &self.policy
    }

    // =========================================================================
    // Registration
    // =========================================================================

    pub fn register_donor(
        &mut self,
        name: String,
        contact: String,
        blood_type: BloodType,
        fit: bool,
    ) -> DonorId {
        self.donors.register(name, contact, blood_type, fit)
    }

    pub fn register_hospital(&mut self, name: String, contact: String) -> HospitalId {
        self.hospitals.register(name, contact)
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Record a donation and put the collected unit into inventory.
    ///
    /// Either the donation is stamped and a unit is added, or nothing changes.
    #[instrument(skip(self))]
    pub fn record_donation(&mut self, donor_id: &DonorId, now: DateTime<Utc>) -> BankResult<BloodUnit> {
        let blood_type = self.donors.find(donor_id)?.blood_type;
        let unit = self.inventory.collect(blood_type, donor_id.clone(), now)?;
        // Fails without mutating when the donor is ineligible
        self.donors.record_donation(donor_id, now)?;
        Ok(self.inventory.store(unit))
    }

    /// Fulfil a hospital request.
    ///
    /// Without a confirmed payment no allocation is attempted, even if a
    /// compatible unit is in stock.
    #[instrument(skip(self))]
    pub fn request_blood(
        &mut self,
        hospital_id: &HospitalId,
        payment_confirmed: bool,
        requested: BloodType,
        now: DateTime<Utc>,
    ) -> BankResult<BloodUnit> {
        self.hospitals.find(hospital_id)?;
        self.hospitals.confirm_payment(hospital_id, payment_confirmed)?;
        if !self.hospitals.require_payment(hospital_id)? {
            debug!("request rejected, payment not confirmed");
            return Err(BankError::PaymentRequired(hospital_id.clone()));
        }
        self.inventory.allocate(requested, now)
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    pub fn inventory_summary(&self, now: DateTime<Utc>) -> InventorySummary {
        self.inventory.summary(now)
    }

    pub fn detailed_inventory(&self, now: DateTime<Utc>) -> DetailedInventory {
        self.inventory.detailed_scan(now)
    }

    pub fn list_donors(&self) -> Vec<Donor> {
        self.donors.iter().cloned().collect()
    }

    pub fn list_hospitals(&self) -> Vec<Hospital> {
        self.hospitals.iter().cloned().collect()
    }

    /// Eligibility of one donor at `now`.
    pub fn is_donor_eligible(&self, donor_id: &DonorId, now: DateTime<Utc>) -> BankResult<bool> {
        let donor = self.donors.find(donor_id)?;
        Ok(self.donors.is_eligible(donor, now))
    }

    pub fn donors(&self) -> &DonorRegistry {
        &self.donors
    }

    pub fn hospitals(&self) -> &HospitalLedger {
        &self.hospitals
    }

    pub fn inventory(&self) -> &BloodInventory {
        &self.inventory
    }
}
