//! Donor registration and eligibility.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use super::IdSequence;
use crate::error::{BankError, BankResult};
use crate::models::{BloodType, Donor, DonorId};

/// Owns every donor record, in registration order.
#[derive(Debug, Clone)]
pub struct DonorRegistry {
    donors: Vec<Donor>,
    by_id: HashMap<DonorId, usize>,
    ids: IdSequence,
    donation_interval: Duration,
}

impl DonorRegistry {
    pub fn new(first_sequence: u32, donation_interval: Duration) -> Self {
        Self {
            donors: Vec::new(),
            by_id: HashMap::new(),
            ids: IdSequence::new(DonorId::PREFIX, first_sequence),
            donation_interval,
        }
    }

    /// Register a donor who has never donated.
    pub fn register(
        &mut self,
        name: String,
        contact: String,
        blood_type: BloodType,
        fit: bool,
    ) -> DonorId {
        let id = DonorId::new(self.ids.next_id());
        info!(donor_id = %id, %blood_type, fit, "registered donor");
        self.by_id.insert(id.clone(), self.donors.len());
        self.donors
            .push(Donor::new(id.clone(), name, contact, blood_type, fit));
        id
    }

    /// Look up a donor by ID.
    pub fn find(&self, id: &DonorId) -> BankResult<&Donor> {
        self.by_id
            .get(id)
            .map(|&idx| &self.donors[idx])
            .ok_or_else(|| BankError::DonorNotFound(id.clone()))
    }

    pub fn is_eligible(&self, donor: &Donor, now: DateTime<Utc>) -> bool {
        donor.is_eligible(now, self.donation_interval)
    }

    /// Check eligibility and stamp the donation time.
    ///
    /// Nothing changes if the donor is unknown or not yet eligible.
    pub fn record_donation(&mut self, id: &DonorId, now: DateTime<Utc>) -> BankResult<()> {
        let idx = *self
            .by_id
            .get(id)
            .ok_or_else(|| BankError::DonorNotFound(id.clone()))?;
        let interval = self.donation_interval;
        let donor = &mut self.donors[idx];

        if !donor.is_eligible(now, interval) {
            let next_eligible_at = if donor.fit {
                donor.next_eligible_at(interval)
            } else {
                None
            };
            debug!(donor_id = %id, fit = donor.fit, "donation rejected, donor ineligible");
            return Err(BankError::IneligibleDonor {
                donor_id: id.clone(),
                next_eligible_at,
            });
        }

        donor.last_donation = Some(now);
        Ok(())
    }

    /// Donors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Donor> {
        self.donors.iter()
    }

    pub fn len(&self) -> usize {
        self.donors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.donors.is_empty()
    }
}
