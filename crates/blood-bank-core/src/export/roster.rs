//! Donor and hospital roster export.

use chrono::Duration;

use super::escape_csv;
use crate::models::{Donor, Hospital};

/// Donor roster as CSV, one row per donor in registration order.
pub fn donors_to_csv(donors: &[Donor], donation_interval: Duration) -> String {
    let mut csv = String::new();

    csv.push_str("donor_id,name,contact,blood_type,fit,last_donation,next_eligible\n");

    for donor in donors {
        let last = donor
            .last_donation
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        let next = donor
            .next_eligible_at(donation_interval)
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        csv.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            escape_csv(donor.id.as_str()),
            escape_csv(&donor.name),
            escape_csv(&donor.contact),
            donor.blood_type,
            donor.fit,
            last,
            next,
        ));
    }

    csv
}

/// Hospital roster as CSV.
pub fn hospitals_to_csv(hospitals: &[Hospital]) -> String {
    let mut csv = String::from("hospital_id,name,contact\n");
    for hospital in hospitals {
        csv.push_str(&format!(
            "{},{},{}\n",
            escape_csv(hospital.id.as_str()),
            escape_csv(&hospital.name),
            escape_csv(&hospital.contact),
        ));
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DonorId, HospitalId};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_donor_rows() {
        let mut ada = Donor::new(
            DonorId::new("D1000"),
            "Lovelace, Ada".into(),
            "5550100".into(),
            "AB+".parse().unwrap(),
            true,
        );
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        ada.last_donation = Some(t);
        let bo = Donor::new(
            DonorId::new("D1001"),
            "Bo".into(),
            "5550101".into(),
            "O-".parse().unwrap(),
            false,
        );

        let csv = donors_to_csv(&[ada, bo], Duration::days(56));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("D1000,\"Lovelace, Ada\",5550100,AB+,true,"));
        assert!(lines[1].contains(&(t + Duration::days(56)).to_rfc3339()));
        assert_eq!(lines[2], "D1001,Bo,5550101,O-,false,,");
    }

    #[test]
    fn test_hospital_rows() {
        let h = Hospital::new(HospitalId::new("H1000"), "St. Mary".into(), "5550200".into());
        assert_eq!(
            hospitals_to_csv(&[h]),
            "hospital_id,name,contact\nH1000,St. Mary,5550200\n"
        );
    }
}
