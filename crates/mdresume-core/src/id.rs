//! Document id generation
//!
//! Ids are millisecond timestamps rendered in decimal. Listing sorts ids
//! and update tokens as strings, so any generator must produce ids whose
//! lexicographic order matches creation order.
//!
//! Two ids minted in the same millisecond are equal and the second write
//! replaces the first record.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Source of fresh document ids
pub trait IdGenerator: Send + Sync {
    /// Mint a new id
    fn next_id(&self) -> String;
}

/// Ids from the wall clock, in milliseconds since the Unix epoch
#[derive(Debug, Default, Clone, Copy)]
pub struct ClockIdGenerator;

impl IdGenerator for ClockIdGenerator {
    fn next_id(&self) -> String {
        Utc::now().timestamp_millis().to_string()
    }
}

/// Deterministic, strictly increasing ids
///
/// Produces `start`, `start + 1`, ... Starting values with the same number
/// of digits as a timestamp keep lexicographic and numeric order aligned.
#[derive(Debug)]
pub struct SequenceIdGenerator {
    next: AtomicU64,
}

impl SequenceIdGenerator {
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn next_id(&self) -> String {
        self.next.fetch_add(1, Ordering::SeqCst).to_string()
    }
}

/// Current wall-clock time as an update token
///
/// Uses the same encoding as [`ClockIdGenerator`] so update tokens and ids
/// compare consistently.
pub fn now_token() -> String {
    ClockIdGenerator.next_id()
}
