//! Rule compilation
//!
//! Compiles the body-rule table into case-insensitive regexes. Compilation
//! happens once, eagerly, so a malformed rule fails at startup rather than
//! mid-scan.

use crate::BodyRule;
use mailwatch_common::{MonitorError, MonitorResult};
use regex::{Regex, RegexBuilder};

/// Pre-compiled body rule table, evaluated in declaration order
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

#[derive(Debug)]
struct CompiledRule {
    label: String,
    pattern: Regex,
}

impl RuleSet {
    /// Compile a rule table
    pub fn build(rules: &[BodyRule]) -> MonitorResult<Self> {
        let compiled = rules
            .iter()
            .map(|rule| {
                let pattern = RegexBuilder::new(&rule.pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| MonitorError::InvalidRule {
                        rule: rule.label.clone(),
                        reason: e.to_string(),
                    })?;

                Ok(CompiledRule {
                    label: rule.label.clone(),
                    pattern,
                })
            })
            .collect::<MonitorResult<Vec<_>>>()?;

        Ok(Self { rules: compiled })
    }

    /// Labels of rules whose pattern matches anywhere in `text`
    ///
    /// One match per rule is sufficient; no positional or multi-match
    /// information is retained.
    pub fn matching_labels<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.rules
            .iter()
            .filter(move |rule| rule.pattern.is_match(text))
            .map(|rule| rule.label.as_str())
    }

    /// Iterate `(label, pattern source)` pairs in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules
            .iter()
            .map(|rule| (rule.label.as_str(), rule.pattern.as_str()))
    }

    /// Number of rules in the table
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_rules;

    #[test]
    fn test_default_rules_compile() {
        let rules = RuleSet::build(&default_rules()).unwrap();
        assert_eq!(rules.len(), 4);
    }

    #[test]
    fn test_bad_pattern_fails_at_build() {
        let bad = vec![BodyRule {
            label: "Broken".to_string(),
            pattern: r"(unclosed".to_string(),
        }];

        let err = RuleSet::build(&bad).unwrap_err();
        assert!(err.to_string().contains("Broken"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let rules = RuleSet::build(&default_rules()).unwrap();

        let labels: Vec<_> = rules
            .matching_labels("wire me ONE HUNDRED THOUSAND DOLLARS today")
            .collect();
        assert_eq!(labels, vec!["Numbers in Words (Financial)"]);
    }

    #[test]
    fn test_labels_come_back_in_rule_order() {
        let rules = RuleSet::build(&default_rules()).unwrap();

        // Both a card number and an amount; phone rule does not fire.
        let labels: Vec<_> = rules
            .matching_labels("card 1234-5678-9012-3456, amount $1,450.00")
            .collect();
        assert_eq!(labels, vec!["Credit Card", "Financial Amount"]);
    }
}
