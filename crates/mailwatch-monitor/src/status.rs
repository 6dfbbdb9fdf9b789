//! Message status bookkeeping
//!
//! Cosmetic per-message state backing inbox icons. Keyed by message id and
//! deliberately outside the scan/log contract: dropping this store loses
//! nothing but UI polish.

use crate::MessageId;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Display status of a message in the inbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MessageStatus {
    /// Not yet opened or scanned
    #[default]
    Unread,
    /// Scanned, no violations
    Clean,
    /// Scanned, violations recorded
    Flagged,
}

/// Per-message status store
#[derive(Default)]
pub struct StatusTracker {
    statuses: DashMap<MessageId, MessageStatus>,
}

/// Counts of tracked statuses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Messages scanned clean
    pub clean: usize,
    /// Messages scanned with violations
    pub flagged: usize,
}

impl StatusTracker {
    /// Empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Status for `id`; unseen messages are `Unread`
    pub fn status(&self, id: &str) -> MessageStatus {
        self.statuses
            .get(id)
            .map(|entry| *entry.value())
            .unwrap_or_default()
    }

    /// Set the status for `id`
    pub fn mark(&self, id: impl Into<MessageId>, status: MessageStatus) {
        self.statuses.insert(id.into(), status);
    }

    /// Tally clean/flagged across tracked messages
    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for entry in self.statuses.iter() {
            match entry.value() {
                MessageStatus::Clean => counts.clean += 1,
                MessageStatus::Flagged => counts.flagged += 1,
                MessageStatus::Unread => {}
            }
        }
        counts
    }
}
