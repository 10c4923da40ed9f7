//! RSVP domain module.
//!
//! # Module Structure
//!
//! - `model`: `RsvpRecord`, statuses and placements
//! - `allocator`: dedupe and confirmed / waitlist / overflow bucketing
//! - `summary`: seat counts derived from an allocation

pub mod allocator;
mod model;
mod summary;

pub use allocator::{
    Allocation, AllocationRow, AllocationRules, AllocationTotals, Bucket, BucketFilter, allocate,
    dedupe_latest_by_name,
};
pub use model::{
    AttendanceStatus, Placement, RsvpChoice, RsvpRecord, RsvpSubmission, normalize_name,
};
pub use summary::AttendanceSummary;
