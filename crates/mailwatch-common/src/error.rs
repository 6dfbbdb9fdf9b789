//! Error types for MailWatch

use thiserror::Error;

/// MailWatch error type
#[derive(Error, Debug)]
pub enum MonitorError {
    /// A detection rule failed to compile
    #[error("invalid detection rule '{rule}': {reason}")]
    InvalidRule {
        /// Label of the offending rule
        rule: String,
        /// Compiler diagnostic
        reason: String,
    },

    /// Attachment descriptor arrived without required metadata
    #[error("attachment '{name}' is missing {field}")]
    AttachmentMetadata {
        /// Attachment filename as supplied
        name: String,
        /// Which field was absent
        field: &'static str,
    },

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type for MailWatch
pub type MonitorResult<T> = Result<T, MonitorError>;
