//! Property tests for eligibility, expiry and allocation.

use blood_bank_core::{BankError, BloodBankService, BloodType, DonorId};
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn blood_type() -> impl Strategy<Value = BloodType> {
    (0usize..8).prop_map(|i| BloodType::ALL[i])
}

/// A donation: who donates (index into the donor list) and hours after `base`.
fn donation() -> impl Strategy<Value = (usize, i64)> {
    (0usize..6, 0i64..24 * 120)
}

proptest! {
    #[test]
    fn unfit_donor_is_never_eligible(bt in blood_type(), offset in -100_000i64..100_000) {
        let mut bank = BloodBankService::new();
        let id = bank.register_donor("X".into(), "5550100".into(), bt, false);
        let now = base() + Duration::hours(offset);
        prop_assert!(!bank.is_donor_eligible(&id, now).unwrap());
        let is_ineligible = matches!(
            bank.record_donation(&id, now),
            Err(BankError::IneligibleDonor { .. })
        );
        prop_assert!(is_ineligible);
    }

    #[test]
    fn eligibility_window_is_inclusive_at_56_days(bt in blood_type(), start_hours in 0i64..10_000) {
        let mut bank = BloodBankService::new();
        let id = bank.register_donor("X".into(), "5550100".into(), bt, true);
        let t = base() + Duration::hours(start_hours);
        bank.record_donation(&id, t).unwrap();

        prop_assert!(!bank.is_donor_eligible(&id, t + Duration::days(55)).unwrap());
        prop_assert!(bank.is_donor_eligible(&id, t + Duration::days(56)).unwrap());
    }

    #[test]
    fn expiry_boundary_is_strict(bt in blood_type(), start_hours in 0i64..10_000) {
        let mut bank = BloodBankService::new();
        let id = bank.register_donor("X".into(), "5550100".into(), bt, true);
        let c = base() + Duration::hours(start_hours);
        let unit = bank.record_donation(&id, c).unwrap();

        prop_assert!(!bank.inventory().is_expired(&unit, c + Duration::days(42)));
        prop_assert!(bank.inventory().is_expired(&unit, c + Duration::days(42) + Duration::seconds(1)));
    }

    #[test]
    fn allocation_never_returns_allocated_or_expired_units(
        types in prop::collection::vec(blood_type(), 6),
        donations in prop::collection::vec(donation(), 1..30),
        requests in prop::collection::vec((blood_type(), 0i64..24 * 180), 1..30),
    ) {
        let mut bank = BloodBankService::new();
        let donors: Vec<DonorId> = types
            .iter()
            .map(|bt| bank.register_donor("X".into(), "5550100".into(), *bt, true))
            .collect();
        for (who, hours) in donations {
            // Ineligible repeats are expected and simply skipped
            let _ = bank.record_donation(&donors[who], base() + Duration::hours(hours));
        }
        let hospital = bank.register_hospital("H".into(), "5550200".into());

        let mut requests = requests;
        requests.sort_by_key(|(_, hours)| *hours);
        for (requested, hours) in requests {
            let now = base() + Duration::hours(hours);
            let available_before: Vec<String> = bank
                .detailed_inventory(now)
                .available
                .iter()
                .map(|u| u.unit_id.clone())
                .collect();

            match bank.request_blood(&hospital, true, requested, now) {
                Ok(unit) => {
                    prop_assert!(available_before.contains(&unit.unit_id));
                    prop_assert!(blood_bank_core::compatible(requested, unit.blood_type));
                    prop_assert!(!unit.is_expired(now));
                }
                Err(e) => {
                    prop_assert_eq!(e, BankError::NoCompatibleUnit(requested));
                    prop_assert_eq!(
                        bank.detailed_inventory(now).available.len(),
                        available_before.len()
                    );
                }
            }
        }
    }

    #[test]
    fn summary_agrees_with_detailed_scan(
        types in prop::collection::vec(blood_type(), 6),
        donations in prop::collection::vec(donation(), 0..30),
        at_hours in 0i64..24 * 200,
    ) {
        let mut bank = BloodBankService::new();
        let donors: Vec<DonorId> = types
            .iter()
            .map(|bt| bank.register_donor("X".into(), "5550100".into(), *bt, true))
            .collect();
        for (who, hours) in donations {
            let _ = bank.record_donation(&donors[who], base() + Duration::hours(hours));
        }

        let now = base() + Duration::hours(at_hours);
        let summary = bank.inventory_summary(now);
        let scan = bank.detailed_inventory(now);

        prop_assert_eq!(summary.total() as usize, scan.available.len());
        prop_assert_eq!(scan.total(), bank.inventory().len());
        for bt in BloodType::ALL {
            let in_scan = scan.available.iter().filter(|u| u.blood_type == bt).count();
            prop_assert_eq!(summary.count(bt) as usize, in_scan);
        }
    }
}
