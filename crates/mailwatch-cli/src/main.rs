//! MailWatch CLI
//!
//! Command-line front end for the email DLP monitor engine.
//!
//! # Usage
//!
//! ```bash
//! mailwatch rules
//! mailwatch inbox
//! mailwatch scan --from employee@company.com --to customer@example.com \
//!     --subject "Following up" --body "Call me at (123) 456-7890" \
//!     --attach report.zip:application/zip:6000000
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use mailwatch_dlp::AttachmentInfo;
use mailwatch_monitor::{
    mailbox, Direction, EmailMessage, EmailMonitor, MessageStatus, MonitorConfig,
};
use tracing_subscriber::EnvFilter;

mod output;

use output::OutputFormat;

#[derive(Parser)]
#[command(name = "mailwatch")]
#[command(version = "0.1.0")]
#[command(about = "Email DLP monitor simulator", long_about = None)]
struct Cli {
    /// Attachment size threshold in MiB
    #[arg(long, env = "MAILWATCH_LIMIT_MB", default_value_t = 5)]
    limit_mb: u64,

    /// Output format
    #[arg(long, short, default_value = "table")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a composed outgoing message
    Scan {
        #[arg(long, default_value = "employee@company.com")]
        from: String,
        #[arg(long, default_value = "customer@example.com")]
        to: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long)]
        body: String,
        /// Attachment descriptor as name:media_type:size_bytes (repeatable)
        #[arg(long = "attach", value_name = "SPEC")]
        attachments: Vec<String>,
    },
    /// Run the sample inbox through the monitor and show the dashboard
    Inbox,
    /// List the configured detection rules
    Rules,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = MonitorConfig {
        attachment_size_limit_bytes: cli.limit_mb * 1024 * 1024,
    };
    let monitor = EmailMonitor::new(config)?;

    match cli.command {
        Commands::Scan {
            from,
            to,
            subject,
            body,
            attachments,
        } => {
            let attachments = attachments
                .iter()
                .map(|spec| parse_attachment(spec))
                .collect::<anyhow::Result<Vec<_>>>()?;

            let mut message = EmailMessage::new(from, to, subject, body);
            for attachment in attachments {
                message = message.attach(attachment);
            }

            let outcome = monitor.scan_message(&message, Direction::Outgoing);
            println!("{}", output::verdict_line(&outcome.flags));

            if outcome.recorded {
                println!(
                    "Sending blocked; the incident has been logged for the manager view.\n"
                );
                println!(
                    "{}",
                    output::render_incidents(&monitor.log().list(), cli.format)?
                );
                std::process::exit(1);
            }
        }
        Commands::Inbox => {
            for message in mailbox::sample_inbox() {
                let outcome = monitor.scan_message(&message, Direction::Incoming);
                let icon = match monitor.status().status(&message.id) {
                    MessageStatus::Flagged => "!".red().bold().to_string(),
                    MessageStatus::Clean => "-".green().to_string(),
                    MessageStatus::Unread => " ".to_string(),
                };
                println!(
                    "{icon} {:<28} {:<32} {}",
                    message.from,
                    message.subject,
                    output::verdict_line(&outcome.flags)
                );
            }

            println!("\n{}", "Red Flag Incident Log".bold());
            println!(
                "{}",
                output::render_incidents(&monitor.log().list(), cli.format)?
            );
            println!(
                "\n{}",
                output::render_summary(&monitor.summary(), cli.format)?
            );
        }
        Commands::Rules => {
            println!("Body rules:");
            for (label, pattern) in monitor.scanner().rules().iter() {
                println!("  {label:<32} {pattern}");
            }
            println!("Attachment rules:");
            println!(
                "  Size limit                       > {} bytes",
                monitor.scanner().config().attachment_size_limit_bytes
            );
            println!("  Image type                       media_type starts with image/");
        }
    }

    Ok(())
}

/// Parse a `name:media_type:size_bytes` attachment descriptor
fn parse_attachment(spec: &str) -> anyhow::Result<AttachmentInfo> {
    let mut parts = spec.splitn(3, ':');

    let name = parts
        .next()
        .filter(|s| !s.is_empty())
        .with_context(|| format!("attachment spec '{spec}' is missing a name"))?;
    let media_type = parts.next().filter(|s| !s.is_empty());
    let size_bytes = parts
        .next()
        .map(|s| {
            s.parse::<u64>()
                .with_context(|| format!("attachment spec '{spec}' has a bad size"))
        })
        .transpose()?;

    AttachmentInfo::from_parts(name, media_type, size_bytes)
        .with_context(|| format!("attachment spec '{spec}' is incomplete"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attachment_full_spec() {
        let attachment = parse_attachment("report.zip:application/zip:6000000").unwrap();
        assert_eq!(attachment.name, "report.zip");
        assert_eq!(attachment.media_type, "application/zip");
        assert_eq!(attachment.size_bytes, 6_000_000);
    }

    #[test]
    fn test_parse_attachment_missing_fields() {
        assert!(parse_attachment("report.zip").is_err());
        assert!(parse_attachment("report.zip:application/zip").is_err());
        assert!(parse_attachment("report.zip:application/zip:lots").is_err());
        assert!(parse_attachment("").is_err());
    }
}
