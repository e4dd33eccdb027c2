//! Donor → recipient compatibility matrix.
//!
//! The table is fixed and deliberately literal:
//!
//! ```text
//! donor   recipients
//! O-      all
//! O+      any Rh+ recipient
//! A-      A-, AB-
//! A+      A+, AB+
//! B-      B-, AB-
//! B+      B+, AB+
//! AB-     AB-
//! AB+     AB+
//! ```

use crate::models::{BloodGroup, BloodType, RhFactor};

/// Whether a unit of `donor` type may be issued against a request for `recipient`.
///
/// Argument order matters: the relation is not symmetric.
pub fn compatible(recipient: BloodType, donor: BloodType) -> bool {
    use BloodGroup::*;
    use RhFactor::*;

    match (donor.group, donor.rh) {
        (O, Negative) => true,
        (O, Positive) => recipient.rh == Positive,
        (A, rh) | (B, rh) => {
            recipient.rh == rh && (recipient.group == donor.group || recipient.group == AB)
        }
        (AB, rh) => recipient.group == AB && recipient.rh == rh,
    }
}

/// Donor types that can serve `recipient`, in reporting order.
pub fn compatible_donors(recipient: BloodType) -> Vec<BloodType> {
    BloodType::ALL
        .into_iter()
        .filter(|donor| compatible(recipient, *donor))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> BloodType {
        s.parse().unwrap()
    }

    #[test]
    fn test_documented_pairs() {
        // (recipient, donor)
        assert!(compatible(t("AB+"), t("O-")));
        assert!(!compatible(t("A+"), t("B+")));
        assert!(compatible(t("AB-"), t("B-")));
        assert!(!compatible(t("B-"), t("AB-")));
        assert!(!compatible(t("AB-"), t("AB+")));
        assert!(!compatible(t("AB+"), t("AB-")));
        // O+ never serves a negative recipient
        assert!(!compatible(t("O-"), t("O+")));
        assert!(compatible(t("O+"), t("O-")));
    }

    #[test]
    fn test_full_table() {
        let expected: &[(&str, &[&str])] = &[
            ("O-", &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"]),
            ("O+", &["A+", "B+", "AB+", "O+"]),
            ("A-", &["A-", "AB-"]),
            ("A+", &["A+", "AB+"]),
            ("B-", &["B-", "AB-"]),
            ("B+", &["B+", "AB+"]),
            ("AB-", &["AB-"]),
            ("AB+", &["AB+"]),
        ];

        for (donor, recipients) in expected {
            for recipient in BloodType::ALL {
                let want = recipients.contains(&recipient.to_string().as_str());
                assert_eq!(
                    compatible(recipient, t(donor)),
                    want,
                    "donor {} → recipient {}",
                    donor,
                    recipient
                );
            }
        }
    }

    #[test]
    fn test_compatible_donors_for_ab_negative() {
        let donors: Vec<String> = compatible_donors(t("AB-"))
            .iter()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(donors, vec!["A-", "B-", "AB-", "O-"]);
    }

    #[test]
    fn test_o_negative_recipient_only_takes_o_negative() {
        assert_eq!(compatible_donors(t("O-")), vec![t("O-")]);
    }
}
