//! Attendance allocation.
//!
//! Turns the raw RSVP rows of one session into confirmed / waitlist /
//! overflow / declined buckets. The booking service makes its own placement
//! decision on submit; this is the view every client recomputes for display.

use super::model::{AttendanceStatus, RsvpRecord};
use crate::config::{CapacityPolicy, DEFAULT_WAITLIST_LIMIT};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumString};

/// Limits applied while filling buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationRules {
    pub capacity: u32,
    pub waitlist_limit: u32,
    pub capacity_zero: CapacityPolicy,
}

impl AllocationRules {
    /// Rules for a session of `capacity` with the default waitlist limit.
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            waitlist_limit: DEFAULT_WAITLIST_LIMIT,
            capacity_zero: CapacityPolicy::default(),
        }
    }

    pub fn with_waitlist_limit(mut self, waitlist_limit: u32) -> Self {
        self.waitlist_limit = waitlist_limit;
        self
    }

    pub fn with_capacity_zero(mut self, policy: CapacityPolicy) -> Self {
        self.capacity_zero = policy;
        self
    }

    /// Capacity as an upper bound, or `None` when it does not limit anything.
    pub fn capacity_limit(&self) -> Option<u32> {
        match (self.capacity, self.capacity_zero) {
            (0, CapacityPolicy::Unlimited) => None,
            (cap, _) => Some(cap),
        }
    }
}

/// Which list a record ended up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Bucket {
    Confirmed,
    Waitlist,
    #[serde(rename = "NO")]
    #[strum(serialize = "NO")]
    Declined,
    Overflow,
}

/// Filter for the flattened admin table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum BucketFilter {
    #[default]
    All,
    #[strum(to_string = "CONFIRMED", serialize = "YES")]
    Confirmed,
    Waitlist,
    No,
    Overflow,
}

impl BucketFilter {
    pub fn matches(self, bucket: Bucket) -> bool {
        match self {
            BucketFilter::All => true,
            BucketFilter::Confirmed => bucket == Bucket::Confirmed,
            BucketFilter::Waitlist => bucket == Bucket::Waitlist,
            BucketFilter::No => bucket == Bucket::Declined,
            BucketFilter::Overflow => bucket == Bucket::Overflow,
        }
    }
}

/// Pax totals counted against the two limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AllocationTotals {
    pub confirmed_pax: u32,
    pub waitlist_pax: u32,
}

/// A record tagged with its bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRow {
    pub bucket: Bucket,
    pub record: RsvpRecord,
}

/// Result of allocating one session's RSVPs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Allocation {
    pub confirmed: Vec<RsvpRecord>,
    pub waitlist: Vec<RsvpRecord>,
    pub overflow: Vec<RsvpRecord>,
    pub declined: Vec<RsvpRecord>,
    pub totals: AllocationTotals,
}

impl Allocation {
    /// Number of records across all buckets.
    pub fn len(&self) -> usize {
        self.confirmed.len() + self.waitlist.len() + self.overflow.len() + self.declined.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattened table, ordered confirmed, waitlist, declined, overflow.
    pub fn rows(&self, filter: BucketFilter) -> Vec<AllocationRow> {
        let tagged = [
            (Bucket::Confirmed, &self.confirmed),
            (Bucket::Waitlist, &self.waitlist),
            (Bucket::Declined, &self.declined),
            (Bucket::Overflow, &self.overflow),
        ];
        tagged
            .into_iter()
            .filter(|(bucket, _)| filter.matches(*bucket))
            .flat_map(|(bucket, records)| {
                records.iter().map(move |record| AllocationRow {
                    bucket,
                    record: record.clone(),
                })
            })
            .collect()
    }
}

/// Keeps only the latest row per normalized name.
///
/// Rows with a blank name are dropped. On identical timestamps the row that
/// appears later in `records` wins. The survivors keep the relative input
/// order of the winning rows, so applying this twice changes nothing.
pub fn dedupe_latest_by_name(records: &[RsvpRecord]) -> Vec<RsvpRecord> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut latest: Vec<(usize, &RsvpRecord)> = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let key = record.normalized_name();
        if key.is_empty() {
            continue;
        }
        match slots.get(&key) {
            Some(&slot) => {
                if record.timestamp >= latest[slot].1.timestamp {
                    latest[slot] = (index, record);
                }
            }
            None => {
                slots.insert(key, latest.len());
                latest.push((index, record));
            }
        }
    }

    latest.sort_by_key(|(index, _)| *index);
    latest.into_iter().map(|(_, r)| r.clone()).collect()
}

/// Deduplicates `records` and fills the buckets.
///
/// YES rows are taken first-come-first-served by timestamp (ties keep input
/// order). Each one goes to the first bucket it still fits in: confirmed,
/// then waitlist, else overflow. Overflow is not counted against anything.
/// Without a capacity limit the confirmed total saturates at `u32::MAX`.
pub fn allocate(records: &[RsvpRecord], rules: &AllocationRules) -> Allocation {
    let current = dedupe_latest_by_name(records);
    let capacity = rules.capacity_limit();

    let (mut yes, declined): (Vec<RsvpRecord>, Vec<RsvpRecord>) = current
        .into_iter()
        .partition(|r| r.status == AttendanceStatus::Yes);
    yes.sort_by_key(|r| r.timestamp);

    let mut allocation = Allocation {
        declined,
        ..Default::default()
    };
    let totals = &mut allocation.totals;

    for record in yes {
        let pax = record.effective_pax();
        let fits_capacity = match capacity {
            None => true,
            Some(cap) => cap > 0 && fits_within(totals.confirmed_pax, pax, cap),
        };
        if fits_capacity {
            totals.confirmed_pax = totals.confirmed_pax.saturating_add(pax);
            allocation.confirmed.push(record);
        } else if fits_within(totals.waitlist_pax, pax, rules.waitlist_limit) {
            totals.waitlist_pax += pax;
            allocation.waitlist.push(record);
        } else {
            allocation.overflow.push(record);
        }
    }

    allocation
}

fn fits_within(used: u32, pax: u32, limit: u32) -> bool {
    used.checked_add(pax).is_some_and(|total| total <= limit)
}
