//! MailWatch Monitor - email DLP monitoring service
//!
//! Scans email traffic against the MailWatch rule set, records violations
//! in a session-lifetime incident log, and derives manager-facing reports.
//!
//! # Architecture
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      EMAIL MONITOR                           │
//! │                                                              │
//! │  EmailMessage ──▶ ContentScanner ──▶ ViolationSet            │
//! │                        │                  │                  │
//! │                        │          empty?  │  flagged?        │
//! │                        ▼                  ▼                  │
//! │                  StatusTracker      IncidentLog              │
//! │                  (Clean/Flagged)    (append-only)            │
//! │                                           │                  │
//! │                                           ▼                  │
//! │                                   IncidentSummary            │
//! │                                   (derived on demand)        │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

pub mod incident;
pub mod mailbox;
pub mod monitor;
pub mod report;
pub mod status;

pub use incident::{IncidentLog, IncidentRecord};
pub use monitor::{EmailMonitor, MonitorStats, ScanOutcome};
pub use report::{summarize, FlagCount, IncidentSummary};
pub use status::{MessageStatus, StatusTracker};

use mailwatch_dlp::{AttachmentInfo, ScanConfig, DEFAULT_ATTACHMENT_SIZE_LIMIT};

// =============================================================================
// Core Types
// =============================================================================

/// Unique email message identifier
pub type MessageId = String;

/// Whether a scanned message was composed locally or received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Received by the monitored user
    Incoming,
    /// Composed by the monitored user
    Outgoing,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Incoming => write!(f, "Incoming"),
            Self::Outgoing => write!(f, "Outgoing"),
        }
    }
}

/// Email message submitted for scanning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Message identifier
    pub id: MessageId,
    /// Sender address
    pub from: String,
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
    /// Attachment descriptors; content itself is never held here
    pub attachments: Vec<AttachmentInfo>,
}

impl EmailMessage {
    /// Message with a freshly generated id
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), from, to, subject, body)
    }

    /// Message with a caller-chosen id (fixtures, replays)
    pub fn with_id(
        id: impl Into<MessageId>,
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            attachments: Vec::new(),
        }
    }

    /// Add an attachment descriptor
    pub fn attach(mut self, attachment: AttachmentInfo) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// Monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Attachment size threshold in bytes
    pub attachment_size_limit_bytes: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            attachment_size_limit_bytes: DEFAULT_ATTACHMENT_SIZE_LIMIT,
        }
    }
}

impl MonitorConfig {
    /// Scanner-level view of this configuration
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            attachment_size_limit_bytes: self.attachment_size_limit_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Incoming.to_string(), "Incoming");
        assert_eq!(Direction::Outgoing.to_string(), "Outgoing");
    }

    #[test]
    fn test_default_config_is_five_mib() {
        let config = MonitorConfig::default();
        assert_eq!(config.attachment_size_limit_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_new_messages_get_distinct_ids() {
        let a = EmailMessage::new("a@co", "b@co", "s", "b");
        let b = EmailMessage::new("a@co", "b@co", "s", "b");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_attach_appends() {
        let msg = EmailMessage::with_id("m-1", "a@co", "b@co", "s", "b")
            .attach(AttachmentInfo::new("x.png", "image/png", 10))
            .attach(AttachmentInfo::new("y.zip", "application/zip", 20));

        assert_eq!(msg.attachments.len(), 2);
        assert_eq!(msg.attachments[0].name, "x.png");
    }
}
