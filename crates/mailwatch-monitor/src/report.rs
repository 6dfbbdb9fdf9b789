//! Derived reporting
//!
//! Aggregate views computed on demand from the incident log. Nothing in
//! this module is stored state; an empty log simply yields an empty
//! summary.

use crate::incident::IncidentRecord;
use crate::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Frequency of one violation label across the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagCount {
    /// Violation label
    pub label: String,
    /// Number of incidents carrying the label
    pub count: usize,
}

/// Aggregate view over the incident log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentSummary {
    /// Total recorded incidents
    pub total_incidents: usize,
    /// Incidents on received messages
    pub incoming: usize,
    /// Incidents on composed messages
    pub outgoing: usize,
    /// Label frequencies, most frequent first
    pub flag_counts: Vec<FlagCount>,
}

/// Tally label and direction counts across `records`
pub fn summarize(records: &[IncidentRecord]) -> IncidentSummary {
    let mut summary = IncidentSummary {
        total_incidents: records.len(),
        ..Default::default()
    };

    let mut counts: HashMap<&str, usize> = HashMap::new();

    for record in records {
        match record.direction {
            Direction::Incoming => summary.incoming += 1,
            Direction::Outgoing => summary.outgoing += 1,
        }

        for flag in &record.flags {
            *counts.entry(flag.as_str()).or_insert(0) += 1;
        }
    }

    let mut flag_counts: Vec<FlagCount> = counts
        .into_iter()
        .map(|(label, count)| FlagCount {
            label: label.to_string(),
            count,
        })
        .collect();

    // Most frequent first; ties break on the label for stable output.
    flag_counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    summary.flag_counts = flag_counts;

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(direction: Direction, flags: &[&str]) -> IncidentRecord {
        IncidentRecord {
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            direction,
            from: "a@co".to_string(),
            to: "b@ex".to_string(),
            subject: "s".to_string(),
            flags: flags.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_log_yields_default_summary() {
        assert_eq!(summarize(&[]), IncidentSummary::default());
    }

    #[test]
    fn test_direction_counts() {
        let records = vec![
            record(Direction::Incoming, &["Phone Number"]),
            record(Direction::Incoming, &["Credit Card"]),
            record(Direction::Outgoing, &["Phone Number"]),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.total_incidents, 3);
        assert_eq!(summary.incoming, 2);
        assert_eq!(summary.outgoing, 1);
    }

    #[test]
    fn test_flag_tally_spans_records() {
        let records = vec![
            record(Direction::Incoming, &["Phone Number", "Credit Card"]),
            record(Direction::Outgoing, &["Phone Number"]),
            record(Direction::Outgoing, &["Financial Amount"]),
        ];

        let summary = summarize(&records);
        assert_eq!(
            summary.flag_counts,
            vec![
                FlagCount {
                    label: "Phone Number".to_string(),
                    count: 2
                },
                FlagCount {
                    label: "Credit Card".to_string(),
                    count: 1
                },
                FlagCount {
                    label: "Financial Amount".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_tie_break_is_alphabetical() {
        let records = vec![record(Direction::Incoming, &["Zeta", "Alpha"])];

        let labels: Vec<_> = summarize(&records)
            .flag_counts
            .into_iter()
            .map(|fc| fc.label)
            .collect();
        assert_eq!(labels, vec!["Alpha", "Zeta"]);
    }
}
