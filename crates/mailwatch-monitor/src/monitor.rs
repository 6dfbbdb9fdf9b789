//! Monitor service
//!
//! Composes the content scanner with the incident log: scan a message,
//! record an incident when the scan flags violations, and keep the
//! cosmetic per-message status current. The service is the incident log's
//! only writer, which is what guarantees the log never holds a record
//! without at least one violation label.

use crate::{
    report, Direction, EmailMessage, IncidentLog, IncidentSummary, MessageId, MessageStatus,
    MonitorConfig, StatusTracker,
};
use mailwatch_common::{Clock, MonitorResult, SystemClock};
use mailwatch_dlp::{ContentScanner, ViolationSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Lock-free scan counters
#[derive(Debug, Default)]
pub struct MonitorStats {
    /// Messages run through the scanner
    pub messages_scanned: AtomicU64,
    /// Messages that produced at least one violation
    pub messages_flagged: AtomicU64,
}

/// Outcome of one scan
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Scanned message id
    pub message_id: MessageId,
    /// Direction the message was scanned as
    pub direction: Direction,
    /// Violation labels, first-fired order
    pub flags: ViolationSet,
    /// Whether an incident record was appended
    pub recorded: bool,
}

/// Email DLP monitor service
pub struct EmailMonitor {
    scanner: ContentScanner,
    log: IncidentLog,
    status: StatusTracker,
    stats: MonitorStats,
}

impl EmailMonitor {
    /// Monitor with the default rule set and the system clock
    pub fn new(config: MonitorConfig) -> MonitorResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Monitor stamping incidents with an injected clock
    pub fn with_clock(config: MonitorConfig, clock: Arc<dyn Clock>) -> MonitorResult<Self> {
        Ok(Self {
            scanner: ContentScanner::new(config.scan_config())?,
            log: IncidentLog::with_clock(clock),
            status: StatusTracker::new(),
            stats: MonitorStats::default(),
        })
    }

    /// Scan one message, recording an incident if violations fire
    ///
    /// Each scan is an independent one-shot evaluation; scanning the same
    /// message again appends another record.
    pub fn scan_message(&self, message: &EmailMessage, direction: Direction) -> ScanOutcome {
        self.stats.messages_scanned.fetch_add(1, Ordering::Relaxed);

        let flags = self.scanner.scan(&message.body, &message.attachments);

        let recorded = if flags.is_empty() {
            self.status.mark(message.id.clone(), MessageStatus::Clean);
            tracing::debug!(message_id = %message.id, %direction, "message clean");
            false
        } else {
            self.stats.messages_flagged.fetch_add(1, Ordering::Relaxed);
            self.log
                .record(&message.from, &message.to, &message.subject, &flags, direction);
            self.status.mark(message.id.clone(), MessageStatus::Flagged);
            tracing::warn!(
                message_id = %message.id,
                %direction,
                flags = %flags,
                "policy violation detected"
            );
            true
        };

        ScanOutcome {
            message_id: message.id.clone(),
            direction,
            flags,
            recorded,
        }
    }

    /// The compiled scanner
    pub fn scanner(&self) -> &ContentScanner {
        &self.scanner
    }

    /// The incident log
    pub fn log(&self) -> &IncidentLog {
        &self.log
    }

    /// The per-message status store
    pub fn status(&self) -> &StatusTracker {
        &self.status
    }

    /// Scan counters
    pub fn stats(&self) -> &MonitorStats {
        &self.stats
    }

    /// Aggregate view derived from the incident log
    pub fn summary(&self) -> IncidentSummary {
        report::summarize(&self.log.list())
    }
}
