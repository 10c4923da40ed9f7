use chrono::{TimeZone, Utc};
use courtside_core::config::CapacityPolicy;
use courtside_core::rsvp::{
    AllocationRules, AttendanceStatus, RsvpRecord, allocate, dedupe_latest_by_name,
    normalize_name,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn record_strategy() -> impl Strategy<Value = RsvpRecord> {
    (
        prop::sample::select(vec!["Ann", "ann ", "Ben", "Cat", "  ", "Dev", "EVA", "eva"]),
        any::<bool>(),
        prop_oneof![4 => 0u32..5, 1 => any::<u32>()],
        0i64..50,
    )
        .prop_map(|(name, yes, pax, t)| RsvpRecord {
            name: name.to_string(),
            status: if yes {
                AttendanceStatus::Yes
            } else {
                AttendanceStatus::No
            },
            pax,
            note: String::new(),
            timestamp: Utc.timestamp_opt(1_700_000_000 + t, 0).unwrap(),
            session_id: "S".to_string(),
        })
}

fn rules_strategy() -> impl Strategy<Value = AllocationRules> {
    (0u32..12, 0u32..8, any::<bool>()).prop_map(|(capacity, limit, closed)| {
        let policy = if closed {
            CapacityPolicy::Closed
        } else {
            CapacityPolicy::Unlimited
        };
        AllocationRules::new(capacity)
            .with_waitlist_limit(limit)
            .with_capacity_zero(policy)
    })
}

proptest! {
    #[test]
    fn confirmed_pax_matches_and_respects_capacity(
        records in prop::collection::vec(record_strategy(), 0..30),
        rules in rules_strategy(),
    ) {
        let result = allocate(&records, &rules);
        let sum: u64 = result.confirmed.iter().map(|r| u64::from(r.effective_pax())).sum();
        prop_assert_eq!(u64::from(result.totals.confirmed_pax), sum.min(u64::from(u32::MAX)));
        if let Some(cap) = rules.capacity_limit() {
            prop_assert!(result.totals.confirmed_pax <= cap);
        }
    }

    #[test]
    fn waitlist_never_exceeds_limit(
        records in prop::collection::vec(record_strategy(), 0..30),
        rules in rules_strategy(),
    ) {
        let result = allocate(&records, &rules);
        let sum: u64 = result.waitlist.iter().map(|r| u64::from(r.effective_pax())).sum();
        prop_assert_eq!(u64::from(result.totals.waitlist_pax), sum);
        prop_assert!(result.totals.waitlist_pax <= rules.waitlist_limit);
    }

    #[test]
    fn dedupe_is_idempotent(records in prop::collection::vec(record_strategy(), 0..30)) {
        let once = dedupe_latest_by_name(&records);
        let twice = dedupe_latest_by_name(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn every_current_record_lands_in_exactly_one_bucket(
        records in prop::collection::vec(record_strategy(), 0..30),
        rules in rules_strategy(),
    ) {
        let current = dedupe_latest_by_name(&records);
        let result = allocate(&records, &rules);
        prop_assert_eq!(result.len(), current.len());

        let yes_count = current.iter().filter(|r| r.status == AttendanceStatus::Yes).count();
        prop_assert_eq!(
            result.confirmed.len() + result.waitlist.len() + result.overflow.len(),
            yes_count
        );
        prop_assert!(result.declined.iter().all(|r| r.status == AttendanceStatus::No));

        let names: HashSet<String> = current.iter().map(|r| r.normalized_name()).collect();
        prop_assert_eq!(names.len(), current.len());
    }

    #[test]
    fn later_timestamp_wins_regardless_of_order(
        early_yes in any::<bool>(),
        late_yes in any::<bool>(),
        swap in any::<bool>(),
    ) {
        let status = |yes: bool| if yes { AttendanceStatus::Yes } else { AttendanceStatus::No };
        let early = RsvpRecord {
            name: "Kim".into(),
            status: status(early_yes),
            pax: 1,
            note: "early".into(),
            timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            session_id: "S".into(),
        };
        let late = RsvpRecord {
            name: " kim".into(),
            status: status(late_yes),
            pax: 2,
            note: "late".into(),
            timestamp: Utc.timestamp_opt(1_700_000_100, 0).unwrap(),
            session_id: "S".into(),
        };
        let records = if swap { vec![late.clone(), early] } else { vec![early, late.clone()] };
        let current = dedupe_latest_by_name(&records);
        prop_assert_eq!(current.len(), 1);
        prop_assert_eq!(&current[0], &late);
        prop_assert_eq!(normalize_name(&current[0].name), "kim");
    }
}
