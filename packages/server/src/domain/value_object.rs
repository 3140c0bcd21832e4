//! Value objects for the relay domain.

use std::sync::Arc;

use tokio::sync::Mutex;

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Number of participants currently connected to the relay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OnlineCount(usize);

impl OnlineCount {
    pub fn new(value: usize) -> Self {
        Self(value)
    }

    pub fn value(&self) -> usize {
        self.0
    }

    pub fn increment(self) -> Self {
        Self(self.0 + 1)
    }

    /// Never goes below zero.
    pub fn decrement(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

/// The one piece of mutable state shared across connections.
///
/// Holders must keep the guard across the change and the broadcast of the new
/// value so that participants observe counts in the order they happened.
pub type SharedOnlineCount = Arc<Mutex<OnlineCount>>;
