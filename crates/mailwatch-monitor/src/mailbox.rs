//! Sample inbox
//!
//! Fixed demo messages fed through the monitor by the CLI simulation and
//! the integration tests. One message per rule class, plus one clean
//! message.

use crate::EmailMessage;
use mailwatch_dlp::AttachmentInfo;

/// Address the sample inbox is delivered to
pub const LOCAL_USER: &str = "employee@company.com";

/// The five demo messages
pub fn sample_inbox() -> Vec<EmailMessage> {
    vec![
        EmailMessage::with_id(
            "msg-001",
            "accounting@partner.com",
            LOCAL_USER,
            "FW: Urgent Invoice",
            "Please see the attached invoice for payment. Call me at (123) 456-7890 if you have questions.",
        )
        .attach(AttachmentInfo::new("invoice.png", "image/png", 150_000)),
        EmailMessage::with_id(
            "msg-002",
            "safe_sender@company.com",
            LOCAL_USER,
            "Meeting Notes",
            "Here are the notes from today's sync. Great job team.",
        ),
        EmailMessage::with_id(
            "msg-003",
            "external.design@graphics.com",
            LOCAL_USER,
            "New Branding Assets",
            "Here are the new branding assets. The file is large, let me know if it comes through.",
        )
        .attach(AttachmentInfo::new(
            "presentation.zip",
            "application/zip",
            6_000_000,
        )),
        EmailMessage::with_id(
            "msg-004",
            "billing@suspicious.net",
            LOCAL_USER,
            "Action Required: Pay Your Bill",
            "Your payment of $1,450.00 is overdue. Please pay with your card 1234-5678-9012-3456 immediately.",
        ),
        EmailMessage::with_id(
            "msg-005",
            "investor@moneytalk.com",
            LOCAL_USER,
            "Wire Transfer",
            "Please wire the one hundred thousand dollars as we discussed. This is very time sensitive.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_inbox_shape() {
        let inbox = sample_inbox();
        assert_eq!(inbox.len(), 5);
        assert!(inbox.iter().all(|m| m.to == LOCAL_USER));

        // Ids are distinct.
        let mut ids: Vec<_> = inbox.iter().map(|m| m.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_attachment_fixtures() {
        let inbox = sample_inbox();

        assert_eq!(inbox[0].attachments.len(), 1);
        assert!(inbox[0].attachments[0].is_image());

        assert_eq!(inbox[2].attachments[0].size_bytes, 6_000_000);
        assert!(!inbox[2].attachments[0].is_image());

        assert!(inbox[1].attachments.is_empty());
    }
}
