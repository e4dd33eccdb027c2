//! Hospital registration and the per-request payment gate.

use std::collections::HashMap;

use tracing::info;

use super::IdSequence;
use crate::error::{BankError, BankResult};
use crate::models::{Hospital, HospitalId};

/// Owns every hospital record, in registration order.
#[derive(Debug, Clone)]
pub struct HospitalLedger {
    hospitals: Vec<Hospital>,
    by_id: HashMap<HospitalId, usize>,
    ids: IdSequence,
}

impl HospitalLedger {
    pub fn new(first_sequence: u32) -> Self {
        Self {
            hospitals: Vec::new(),
            by_id: HashMap::new(),
            ids: IdSequence::new(HospitalId::PREFIX, first_sequence),
        }
    }

    pub fn register(&mut self, name: String, contact: String) -> HospitalId {
        let id = HospitalId::new(self.ids.next_id());
        info!(hospital_id = %id, "registered hospital");
        self.by_id.insert(id.clone(), self.hospitals.len());
        self.hospitals
            .push(Hospital::new(id.clone(), name, contact));
        id
    }

    pub fn find(&self, id: &HospitalId) -> BankResult<&Hospital> {
        self.by_id
            .get(id)
            .map(|&idx| &self.hospitals[idx])
            .ok_or_else(|| BankError::HospitalNotFound(id.clone()))
    }

    fn find_mut(&mut self, id: &HospitalId) -> BankResult<&mut Hospital> {
        match self.by_id.get(id) {
            Some(&idx) => Ok(&mut self.hospitals[idx]),
            None => Err(BankError::HospitalNotFound(id.clone())),
        }
    }

    /// Set the payment flag for the upcoming request.
    pub fn confirm_payment(&mut self, id: &HospitalId, confirmed: bool) -> BankResult<()> {
        self.find_mut(id)?.payment_confirmed = confirmed;
        Ok(())
    }

    /// Read and clear the payment flag.
    ///
    /// A confirmation covers exactly one request, so the flag is reset
    /// whether or not it was set.
    pub fn require_payment(&mut self, id: &HospitalId) -> BankResult<bool> {
        let hospital = self.find_mut(id)?;
        Ok(std::mem::take(&mut hospital.payment_confirmed))
    }

    /// Hospitals in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Hospital> {
        self.hospitals.iter()
    }

    pub fn len(&self) -> usize {
        self.hospitals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hospitals.is_empty()
    }
}
