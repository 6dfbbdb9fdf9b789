//! Output rendering for the CLI

use clap::ValueEnum;
use colored::Colorize;
use mailwatch_dlp::ViolationSet;
use mailwatch_monitor::{IncidentRecord, IncidentSummary};
use tabled::{settings::Style, Table, Tabled};

/// How results are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Table,
    /// JSON for piping into other tools
    Json,
}

#[derive(Tabled)]
struct IncidentRow {
    #[tabled(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "Direction")]
    direction: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Flags")]
    flags: String,
}

impl From<&IncidentRecord> for IncidentRow {
    fn from(record: &IncidentRecord) -> Self {
        Self {
            timestamp: record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            direction: record.direction.to_string(),
            from: record.from.clone(),
            to: record.to.clone(),
            subject: record.subject.clone(),
            flags: record.flags_joined(),
        }
    }
}

/// Render the incident log, newest first
pub fn render_incidents(records: &[IncidentRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Table => {
            if records.is_empty() {
                return Ok("No flagged events have been logged yet.".to_string());
            }

            let rows: Vec<IncidentRow> = records.iter().map(IncidentRow::from).collect();
            Ok(Table::new(rows).with(Style::sharp()).to_string())
        }
    }
}

/// Render the derived summary
pub fn render_summary(summary: &IncidentSummary, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        OutputFormat::Table => {
            let mut out = format!(
                "{} incidents ({} incoming, {} outgoing)",
                summary.total_incidents, summary.incoming, summary.outgoing
            );
            for fc in &summary.flag_counts {
                out.push_str(&format!("\n  {:>3}  {}", fc.count, fc.label));
            }
            Ok(out)
        }
    }
}

/// One-line verdict for a scanned message
pub fn verdict_line(flags: &ViolationSet) -> String {
    if flags.is_empty() {
        format!("{} no violations detected", "OK".green().bold())
    } else {
        format!(
            "{} violations detected: {}",
            "RED FLAG".red().bold(),
            flags.to_string().yellow()
        )
    }
}
