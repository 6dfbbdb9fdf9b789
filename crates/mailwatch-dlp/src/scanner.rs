//! Content scanner
//!
//! Stateless mapping from (body text, attachment descriptors) to a set of
//! violation labels.

use crate::{default_rules, BodyRule, RuleSet, DEFAULT_ATTACHMENT_SIZE_LIMIT};
use mailwatch_common::{MonitorError, MonitorResult};
use serde::{Deserialize, Serialize};

/// Scanner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Attachment size threshold in bytes
    pub attachment_size_limit_bytes: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            attachment_size_limit_bytes: DEFAULT_ATTACHMENT_SIZE_LIMIT,
        }
    }
}

impl ScanConfig {
    /// Threshold expressed in MiB, as rendered in violation labels
    pub fn limit_mb(&self) -> f64 {
        self.attachment_size_limit_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Attachment metadata as supplied by the upload/transport boundary
///
/// Content is never inspected; only the declared name, media type, and size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentInfo {
    /// Filename as declared by the sender
    pub name: String,
    /// Declared MIME type, e.g. `application/zip`
    pub media_type: String,
    /// Declared size in bytes
    pub size_bytes: u64,
}

impl AttachmentInfo {
    /// Descriptor from complete metadata
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size_bytes,
        }
    }

    /// Descriptor from possibly-incomplete boundary metadata
    ///
    /// Missing fields are a contract violation on the supplier's side and
    /// are rejected rather than defaulted.
    pub fn from_parts(
        name: &str,
        media_type: Option<&str>,
        size_bytes: Option<u64>,
    ) -> MonitorResult<Self> {
        let media_type = media_type.ok_or(MonitorError::AttachmentMetadata {
            name: name.to_string(),
            field: "media_type",
        })?;
        let size_bytes = size_bytes.ok_or(MonitorError::AttachmentMetadata {
            name: name.to_string(),
            field: "size_bytes",
        })?;

        Ok(Self::new(name, media_type, size_bytes))
    }

    /// Whether the declared media type is an image
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }

    /// Whether the declared size exceeds `limit_bytes`
    pub fn oversize(&self, limit_bytes: u64) -> bool {
        self.size_bytes > limit_bytes
    }
}

/// Deduplicated violation labels, in first-fired order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViolationSet {
    labels: Vec<String>,
}

impl ViolationSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label; duplicates are dropped, order of first insertion wins
    pub fn insert(&mut self, label: impl Into<String>) {
        let label = label.into();
        if !self.labels.iter().any(|l| *l == label) {
            self.labels.push(label);
        }
    }

    /// Whether `label` fired
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// No rules fired
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Labels in first-fired order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Iterate labels in first-fired order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Consume into the label vector
    pub fn into_labels(self) -> Vec<String> {
        self.labels
    }
}

impl std::fmt::Display for ViolationSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.labels.join(", "))
    }
}

/// Stateless detector over body text and attachment metadata
pub struct ContentScanner {
    rules: RuleSet,
    config: ScanConfig,
}

impl ContentScanner {
    /// Scanner with the default rule table
    pub fn new(config: ScanConfig) -> MonitorResult<Self> {
        Self::with_rules(&default_rules(), config)
    }

    /// Scanner with a custom rule table
    pub fn with_rules(rules: &[BodyRule], config: ScanConfig) -> MonitorResult<Self> {
        Ok(Self {
            rules: RuleSet::build(rules)?,
            config,
        })
    }

    /// The compiled rule table
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The active configuration
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan body text and attachment descriptors for violations
    ///
    /// Pure function of its inputs: an empty attachment list yields only
    /// body-rule flags, an empty body yields only attachment-rule flags.
    pub fn scan(&self, body: &str, attachments: &[AttachmentInfo]) -> ViolationSet {
        let mut flags = ViolationSet::new();

        // 1. Body rules, one label per matching rule
        for label in self.rules.matching_labels(body) {
            flags.insert(label);
        }

        // 2. Attachment rules; both may fire for the same attachment
        for attachment in attachments {
            if attachment.oversize(self.config.attachment_size_limit_bytes) {
                flags.insert(format!(
                    "Attachment Size > {}MB ({})",
                    self.config.limit_mb(),
                    attachment.name
                ));
            }

            if attachment.is_image() {
                flags.insert(format!("Image Attached ({})", attachment.name));
            }
        }

        if !flags.is_empty() {
            tracing::debug!(flags = %flags, "content scan fired");
        }

        flags
    }
}
