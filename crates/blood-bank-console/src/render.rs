//! Plain-text rendering of core results.

use blood_bank_core::{
    BankError, BloodUnit, DetailedInventory, Donor, Hospital, InventorySummary,
};
use chrono::{DateTime, Duration, Utc};

const RULE: &str = "----------------------------------------";

fn timestamp(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M UTC").to_string()
}

pub fn donor(donor: &Donor, donation_interval: Duration) -> String {
    let mut out = format!(
        "Donor ID: {}\nName: {}\nContact: {}\nBlood Type: {}\nFitness Status: {}\n",
        donor.id,
        donor.name,
        donor.contact,
        donor.blood_type,
        if donor.fit { "Fit" } else { "Unfit" }
    );
    match (donor.last_donation, donor.next_eligible_at(donation_interval)) {
        (Some(last), Some(next)) => {
            out.push_str(&format!("Last Donation: {}\n", timestamp(last)));
            out.push_str(&format!("Next Eligible Donation: {}\n", timestamp(next)));
        }
        (Some(last), None) => {
            out.push_str(&format!("Last Donation: {}\n", timestamp(last)));
        }
        (None, _) => out.push_str("Last Donation: Never\n"),
    }
    out
}

pub fn hospital(hospital: &Hospital) -> String {
    format!(
        "Hospital ID: {}\nName: {}\nContact: {}\n",
        hospital.id, hospital.name, hospital.contact,
    )
}

pub fn unit(unit: &BloodUnit, now: DateTime<Utc>) -> String {
    format!(
        "Blood Type: {}\nCollection Date: {}\nExpiry Date: {}\nDonor ID: {}\nStatus: {}\n",
        unit.blood_type,
        timestamp(unit.collected_at),
        timestamp(unit.expires_at),
        unit.donor_id,
        unit.status(now).as_str(),
    )
}

pub fn summary(summary: &InventorySummary) -> String {
    let mut out = String::from("===== BLOOD BANK INVENTORY =====\n");
    for (blood_type, count) in summary.buckets() {
        out.push_str(&format!("{:<4}: {} units\n", blood_type.to_string(), count));
    }
    out.push_str(&format!("Total: {} units\n", summary.total()));
    out.push_str(RULE);
    out.push('\n');
    out
}

/// Lists available units in full, then the per-status counts.
pub fn detailed(scan: &DetailedInventory, now: DateTime<Utc>) -> String {
    let mut out = String::from("===== DETAILED INVENTORY =====\n");
    if scan.is_empty() {
        out.push_str("No blood units in inventory.\n");
        return out;
    }
    for u in &scan.available {
        out.push_str(&unit(u, now));
        out.push('\n');
    }
    out.push_str("Summary:\n");
    out.push_str(&format!("Available: {} units\n", scan.available.len()));
    out.push_str(&format!("Allocated: {} units\n", scan.allocated.len()));
    out.push_str(&format!("Expired: {} units\n", scan.expired.len()));
    out.push_str(RULE);
    out.push('\n');
    out
}

/// Operator-facing message for a rejected transaction.
pub fn error(err: &BankError) -> String {
    match err {
        BankError::Validation(msg) => format!("Invalid input: {}", msg),
        BankError::DonorNotFound(id) => format!("Donor {} not found!", id),
        BankError::HospitalNotFound(id) => format!("Hospital {} not found!", id),
        BankError::IneligibleDonor {
            donor_id,
            next_eligible_at: Some(next),
        } => format!(
            "Donor {} is not eligible to donate until {}.",
            donor_id,
            timestamp(*next)
        ),
        BankError::IneligibleDonor { donor_id, .. } => {
            format!("Donor {} is not eligible to donate at this time.", donor_id)
        }
        BankError::PaymentRequired(_) => "Payment required before blood can be issued.".into(),
        BankError::NoCompatibleUnit(requested) => {
            format!("No compatible blood units available for {}!", requested)
        }
    }
}
