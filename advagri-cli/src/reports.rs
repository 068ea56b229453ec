use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use advagri_rules::{CorrectionEvent, Message, Validation, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalSource {
    Config,
    Command,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProposalRecord {
    pub source: ProposalSource,
    pub proposed: i32,
    pub verdict: Verdict,
    pub final_value: i32,
    pub events: Vec<CorrectionEvent>,
    pub messages: Vec<String>,
}

impl ProposalRecord {
    pub fn new(
        source: ProposalSource,
        outcome: &Validation,
        messages: &[Message],
        lang: &str,
    ) -> Self {
        Self {
            source,
            proposed: outcome.proposed,
            verdict: outcome.verdict,
            final_value: outcome.final_value,
            events: outcome.events.to_vec(),
            messages: messages.iter().map(|m| m.render(lang)).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RulesReport {
    pub base_unit: i32,
    pub allow_seasons_change: bool,
    pub length_of_year: i32,
    pub proposals: Vec<ProposalRecord>,
}

pub fn generate_console_report<W: Write + ?Sized>(
    out: &mut W,
    report: &RulesReport,
    verbose: bool,
) -> Result<()> {
    if report.proposals.is_empty() {
        writeln!(out, "No changes proposed.")?;
    }

    for record in &report.proposals {
        let status = match record.verdict {
            Verdict::Valid => "✅ ACCEPTED".green(),
            Verdict::NotAMultiple => "⚠️  ROUNDED".yellow(),
            Verdict::BelowMinimum => "⚠️  RAISED".yellow(),
        };
        writeln!(
            out,
            "{status} lengthOfYear {} -> {}",
            record.proposed,
            record.final_value.to_string().bold()
        )?;
        for message in &record.messages {
            writeln!(out, "   • {message}")?;
        }
        if verbose {
            writeln!(out, "   source: {:?}, events: {:?}", record.source, record.events)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", "📋 Current Rules".bright_yellow().bold())?;
    writeln!(out, "allowSeasonsChange: {}", report.allow_seasons_change)?;
    writeln!(
        out,
        "lengthOfYear: {} ({} solar terms of {} days)",
        report.length_of_year,
        report.base_unit,
        report.length_of_year / report.base_unit
    )?;
    Ok(())
}

pub fn generate_json_report<W: Write + ?Sized>(out: &mut W, report: &RulesReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use advagri_rules::SolarTerm;

    fn sample_report() -> RulesReport {
        let unit = SolarTerm::base_unit().unwrap();
        let outcome = unit.validate(30);
        let messages: Vec<Message> = outcome.events.iter().map(Message::from).collect();
        RulesReport {
            base_unit: unit.get(),
            allow_seasons_change: true,
            length_of_year: outcome.final_value,
            proposals: vec![ProposalRecord::new(
                ProposalSource::Command,
                &outcome,
                &messages,
                "en",
            )],
        }
    }

    #[test]
    fn console_report_lists_messages_and_rules() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &sample_report(), false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("lengthOfYear 30 -> 48"));
        assert!(text.contains("Length of year has been corrected to 48."));
        assert!(text.contains("lengthOfYear: 48 (24 solar terms of 2 days)"));
    }

    #[test]
    fn json_report_serializes_events() {
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["length_of_year"], 48);
        assert_eq!(value["proposals"][0]["verdict"], "not_a_multiple");
        assert_eq!(value["proposals"][0]["events"][0]["kind"], "not_a_multiple");
        assert_eq!(value["proposals"][0]["events"][1]["value"], 48);
    }
}
