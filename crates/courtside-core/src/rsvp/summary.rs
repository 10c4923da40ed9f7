//! Headline numbers for an allocated session.

use super::allocator::{Allocation, AllocationRules};
use serde::{Deserialize, Serialize};

/// Seats used and left, for the confirmed list and the waitlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// `None` when capacity does not limit anything
    pub capacity: Option<u32>,
    pub confirmed_pax: u32,
    pub waitlist_pax: u32,
    pub waitlist_limit: u32,
}

impl AttendanceSummary {
    pub fn new(allocation: &Allocation, rules: &AllocationRules) -> Self {
        Self {
            capacity: rules.capacity_limit(),
            confirmed_pax: allocation.totals.confirmed_pax,
            waitlist_pax: allocation.totals.waitlist_pax,
            waitlist_limit: rules.waitlist_limit,
        }
    }

    pub fn remaining(&self) -> Option<u32> {
        self.capacity
            .map(|cap| cap.saturating_sub(self.confirmed_pax))
    }

    pub fn waitlist_remaining(&self) -> u32 {
        self.waitlist_limit.saturating_sub(self.waitlist_pax)
    }

    /// Chinese summary lines, as posted in group chats.
    pub fn zh_lines(&self) -> String {
        format!(
            "👥 名額：{}/{}（尚餘 {}）\n📝 候補：{}/{}（尚餘 {}）",
            self.confirmed_pax,
            dash_or(self.capacity),
            dash_or(self.remaining()),
            self.waitlist_pax,
            self.waitlist_limit,
            self.waitlist_remaining()
        )
    }

    /// English summary lines.
    pub fn en_lines(&self) -> String {
        format!(
            "👥 Confirmed: {}/{} (Remaining {})\n📝 Waitlist: {}/{} (Remaining {})",
            self.confirmed_pax,
            dash_or(self.capacity),
            dash_or(self.remaining()),
            self.waitlist_pax,
            self.waitlist_limit,
            self.waitlist_remaining()
        )
    }

    /// Compact single line for tables and status bars.
    pub fn short_line(&self) -> String {
        format!(
            "Confirmed {}/{} | Waitlist {}/{}",
            self.confirmed_pax,
            dash_or(self.capacity),
            self.waitlist_pax,
            self.waitlist_limit
        )
    }
}

fn dash_or(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
