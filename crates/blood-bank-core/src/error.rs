//! Error types for the blood bank core.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{BloodType, DonorId, HospitalId};

/// Business-rule failures surfaced by the core.
///
/// Every variant is an expected outcome. None of them leave partial state
/// behind: a failing operation mutates nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Donor not found: {0}")]
    DonorNotFound(DonorId),

    #[error("Hospital not found: {0}")]
    HospitalNotFound(HospitalId),

    #[error("Donor {donor_id} is not eligible to donate")]
    IneligibleDonor {
        donor_id: DonorId,
        /// When the donation interval elapses, if the donor is fit and has donated before
        next_eligible_at: Option<DateTime<Utc>>,
    },

    #[error("Payment required before blood can be issued to {0}")]
    PaymentRequired(HospitalId),

    #[error("No compatible blood unit available for {0}")]
    NoCompatibleUnit(BloodType),
}

pub type BankResult<T> = Result<T, BankError>;
