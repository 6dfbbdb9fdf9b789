//! Incident Log
//!
//! Session-lifetime record of scans that produced violations. Insertion
//! order on write, newest-first on read, cleared wholesale by an operator
//! action. Nothing here is durable.

use crate::Direction;
use chrono::{DateTime, Utc};
use mailwatch_common::{Clock, SystemClock};
use mailwatch_dlp::ViolationSet;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One flagged scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentRecord {
    /// When the scan was recorded
    pub timestamp: DateTime<Utc>,
    /// Traffic direction of the scanned message
    pub direction: Direction,
    /// Sender address
    pub from: String,
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Violation labels in first-fired order
    pub flags: Vec<String>,
}

impl IncidentRecord {
    /// Labels joined for display
    pub fn flags_joined(&self) -> String {
        self.flags.join(", ")
    }
}

/// Append-only log of incident records
///
/// The log is the single shared mutable sequence in the engine; the lock
/// keeps appends and clears from interleaving when a monitor is shared
/// across sessions.
pub struct IncidentLog {
    records: RwLock<Vec<IncidentRecord>>,
    clock: Arc<dyn Clock>,
}

impl IncidentLog {
    /// Log stamping records with the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Log stamping records with an injected clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            clock,
        }
    }

    /// Append a record stamped with the current time
    ///
    /// Always succeeds. No dedup, no merging: repeated scans of the same
    /// message append repeated records.
    pub fn record(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        flags: &ViolationSet,
        direction: Direction,
    ) {
        let record = IncidentRecord {
            timestamp: self.clock.now(),
            direction,
            from: from.to_string(),
            to: to.to_string(),
            subject: subject.to_string(),
            flags: flags.iter().map(str::to_string).collect(),
        };

        tracing::debug!(
            sender = %record.from,
            recipient = %record.to,
            %direction,
            "incident appended"
        );

        self.records.write().push(record);
    }

    /// Snapshot of the log, newest first
    ///
    /// Pure read. The sort is stable, so records sharing a timestamp keep
    /// insertion order.
    pub fn list(&self) -> Vec<IncidentRecord> {
        let mut records = self.records.read().clone();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records
    }

    /// Empty the log unconditionally
    pub fn clear(&self) {
        let mut records = self.records.write();
        let cleared = records.len();
        records.clear();
        tracing::info!(cleared, "incident log cleared");
    }

    /// Number of recorded incidents
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the log holds no records
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl Default for IncidentLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Clock handing out strictly increasing second ticks
    struct TickClock {
        start: DateTime<Utc>,
        ticks: AtomicI64,
    }

    impl TickClock {
        fn new() -> Self {
            Self {
                start: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
                ticks: AtomicI64::new(0),
            }
        }
    }

    impl Clock for TickClock {
        fn now(&self) -> DateTime<Utc> {
            let tick = self.ticks.fetch_add(1, Ordering::Relaxed);
            self.start + chrono::Duration::seconds(tick)
        }
    }

    fn flags(labels: &[&str]) -> ViolationSet {
        let mut set = ViolationSet::new();
        for label in labels {
            set.insert(*label);
        }
        set
    }

    #[test]
    fn test_record_preserves_fields() {
        let log = IncidentLog::with_clock(Arc::new(TickClock::new()));
        log.record(
            "a@co",
            "b@ex",
            "Quarterly numbers",
            &flags(&["Phone Number", "Credit Card"]),
            Direction::Outgoing,
        );

        let records = log.list();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].from, "a@co");
        assert_eq!(records[0].to, "b@ex");
        assert_eq!(records[0].subject, "Quarterly numbers");
        assert_eq!(records[0].direction, Direction::Outgoing);
        assert_eq!(records[0].flags, vec!["Phone Number", "Credit Card"]);
        assert_eq!(records[0].flags_joined(), "Phone Number, Credit Card");
    }

    #[test]
    fn test_list_is_newest_first() {
        let log = IncidentLog::with_clock(Arc::new(TickClock::new()));
        for subject in ["first", "second", "third"] {
            log.record("a@co", "b@ex", subject, &flags(&["Phone Number"]), Direction::Incoming);
        }

        let records = log.list();
        let subjects: Vec<_> = records.iter().map(|r| r.subject.as_str()).collect();
        assert_eq!(subjects, vec!["third", "second", "first"]);
        assert!(records[0].timestamp > records[2].timestamp);
    }

    #[test]
    fn test_repeated_records_append() {
        let log = IncidentLog::with_clock(Arc::new(TickClock::new()));
        for _ in 0..5 {
            log.record("a@co", "b@ex", "same", &flags(&["Credit Card"]), Direction::Outgoing);
        }

        assert_eq!(log.len(), 5);
        assert_eq!(log.list().len(), 5);
    }

    #[test]
    fn test_clear_empties_the_log() {
        let log = IncidentLog::with_clock(Arc::new(TickClock::new()));
        log.record("a@co", "b@ex", "s", &flags(&["Phone Number"]), Direction::Incoming);
        assert!(!log.is_empty());

        log.clear();
        assert!(log.is_empty());
        assert!(log.list().is_empty());

        // Clearing an empty log is fine too.
        log.clear();
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn test_list_does_not_mutate() {
        let log = IncidentLog::with_clock(Arc::new(TickClock::new()));
        log.record("a@co", "b@ex", "s", &flags(&["Phone Number"]), Direction::Incoming);

        let _ = log.list();
        let _ = log.list();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_record_serializes_to_json() {
        let log = IncidentLog::with_clock(Arc::new(TickClock::new()));
        log.record("a@co", "b@ex", "s", &flags(&["Phone Number"]), Direction::Incoming);

        let json = serde_json::to_string(&log.list()).unwrap();
        assert!(json.contains("\"Phone Number\""));
        assert!(json.contains("\"Incoming\""));
    }
}
