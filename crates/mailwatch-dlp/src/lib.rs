//! MailWatch DLP Scanner
//!
//! Pattern-rule content inspection for email traffic.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                  Content Scan                          │
//! │                                                        │
//! │  ┌──────────────┐          ┌────────────────────┐      │
//! │  │  Body Rules  │          │  Attachment Rules  │      │
//! │  │  (regex,     │          │  (size threshold,  │      │
//! │  │   ci match)  │          │   image type)      │      │
//! │  └──────┬───────┘          └─────────┬──────────┘      │
//! │         │                            │                 │
//! │         └────────────┬───────────────┘                 │
//! │                      │                                 │
//! │               ┌──────▼───────┐                         │
//! │               │ ViolationSet │  first-fired order,     │
//! │               │              │  deduplicated           │
//! │               └──────────────┘                         │
//! └────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

pub mod rules;
pub mod scanner;

pub use rules::RuleSet;
pub use scanner::{AttachmentInfo, ContentScanner, ScanConfig, ViolationSet};

use serde::{Deserialize, Serialize};

/// Attachment size threshold applied by default (5 MiB)
pub const DEFAULT_ATTACHMENT_SIZE_LIMIT: u64 = 5 * 1024 * 1024;

/// A named pattern applied to message body text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyRule {
    /// Violation label contributed when the pattern matches
    pub label: String,
    /// Regex source, compiled case-insensitively at startup
    pub pattern: String,
}

impl BodyRule {
    /// North-American-style phone numbers in common formats
    pub fn phone_number() -> Self {
        Self {
            label: "Phone Number".to_string(),
            pattern: r"\b(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b".to_string(),
        }
    }

    /// 13-16 digit groups with optional space/hyphen separators
    ///
    /// Deliberately loose: long phone numbers and arbitrary digit runs also
    /// match. No Luhn validation is applied.
    pub fn credit_card() -> Self {
        Self {
            label: "Credit Card".to_string(),
            pattern: r"\b(?:\d[ -]*?){13,16}\b".to_string(),
        }
    }

    /// Currency symbol followed by grouped digits
    pub fn currency_amount() -> Self {
        Self {
            label: "Financial Amount".to_string(),
            pattern: r"[$€£¥]\s*\d{1,3}(?:[.,]\d{3})*(?:[.,]\d{2})?".to_string(),
        }
    }

    /// Spelled-out number word followed by a currency word
    pub fn spelled_amount() -> Self {
        Self {
            label: "Numbers in Words (Financial)".to_string(),
            pattern: r"\b(?:five|ten|twenty|fifty|hundred|thousand|million|billion)\s+(?:dollars|euros|pounds|usd|eur)\b"
                .to_string(),
        }
    }
}

/// The default body rule table, in evaluation order
pub fn default_rules() -> Vec<BodyRule> {
    vec![
        BodyRule::phone_number(),
        BodyRule::credit_card(),
        BodyRule::currency_amount(),
        BodyRule::spelled_amount(),
    ]
}
