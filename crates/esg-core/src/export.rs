//! Report export and the results-view gate.
//!
//! # Not a security boundary
//!
//! The envelope format is `"1234:" + base64(report JSON)`. The prefix is a
//! fixed, publicly known literal and base64 is an encoding, so anyone can
//! read an envelope. It exists only so exported files match the format the
//! results viewer expects. [`ResultsGate`] compares input against the same
//! literal. It is a demo gate and must not protect anything.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ExportError;
use crate::report::Report;

/// Literal prefix of the envelope and the results-view passphrase.
pub const RESULTS_PASSWORD: &str = "1234";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Pretty-printed report JSON
    #[default]
    Json,
    /// `"1234:" + base64(json)`
    Envelope,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Envelope => "envelope",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "envelope" | "base64" => Ok(ExportFormat::Envelope),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// Serialize a report to a text blob.
pub fn seal(report: &Report, format: ExportFormat) -> Result<String, ExportError> {
    let json = report.to_json()?;
    Ok(match format {
        ExportFormat::Json => json,
        ExportFormat::Envelope => format!("{RESULTS_PASSWORD}:{}", STANDARD.encode(json)),
    })
}

/// Parse a blob produced by [`seal`] in either format.
///
/// The password is checked through [`ResultsGate`] before anything is decoded.
pub fn open(text: &str, password: &str) -> Result<Report, ExportError> {
    ResultsGate::default().check(password)?;

    let text = text.trim();
    if text.starts_with('{') {
        return Ok(Report::from_json(text)?);
    }

    let (prefix, payload) = text
        .split_once(':')
        .ok_or_else(|| ExportError::MalformedEnvelope("missing ':' separator".into()))?;
    if prefix != RESULTS_PASSWORD {
        return Err(ExportError::MalformedEnvelope(format!("unexpected prefix '{prefix}'")));
    }

    let bytes = STANDARD.decode(payload)?;
    let json = String::from_utf8(bytes)
        .map_err(|e| ExportError::MalformedEnvelope(format!("payload is not UTF-8: {e}")))?;
    Ok(Report::from_json(&json)?)
}

/// Passphrase check in front of the detailed results view.
#[derive(Debug, Clone)]
pub struct ResultsGate {
    expected: String,
}

impl Default for ResultsGate {
    fn default() -> Self {
        Self {
            expected: RESULTS_PASSWORD.to_string(),
        }
    }
}

impl ResultsGate {
    pub fn check(&self, input: &str) -> Result<(), ExportError> {
        if input == self.expected {
            Ok(())
        } else {
            Err(ExportError::IncorrectPassword)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{AggregationMode, Rating};
    use crate::report::ScoredItem;
    use chrono::{TimeZone, Utc};

    fn report() -> Report {
        Report {
            title: "Governance Assessment".into(),
            date_completed: Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).single().unwrap(),
            mode: AggregationMode::Binned,
            items: vec![ScoredItem {
                id: "esg_oversight".into(),
                question: "ESG Oversight".into(),
                raw: Some(80.0),
                score: 5,
                weight: 9.0,
                weighted_contribution: 45.0,
            }],
            final_score: 100,
            rating: Rating::Excellent,
        }
    }

    #[test]
    fn envelope_has_literal_prefix() {
        let sealed = seal(&report(), ExportFormat::Envelope).unwrap();
        assert!(sealed.starts_with("1234:"));
        assert!(!sealed.contains("esg_oversight"));
    }

    #[test]
    fn opens_both_formats() {
        for format in [ExportFormat::Json, ExportFormat::Envelope] {
            let sealed = seal(&report(), format).unwrap();
            assert_eq!(open(&sealed, "1234").unwrap(), report(), "{format}");
        }
    }

    #[test]
    fn wrong_password_is_rejected() {
        let sealed = seal(&report(), ExportFormat::Envelope).unwrap();
        assert!(matches!(open(&sealed, "0000"), Err(ExportError::IncorrectPassword)));
        assert!(ResultsGate::default().check("1234").is_ok());
    }

    #[test]
    fn malformed_envelopes() {
        assert!(matches!(open("no separator", "1234"), Err(ExportError::MalformedEnvelope(_))));
        assert!(matches!(open("9999:e30=", "1234"), Err(ExportError::MalformedEnvelope(_))));
        assert!(matches!(open("1234:!!!", "1234"), Err(ExportError::Decode(_))));
        // "{}" is valid base64 JSON but not a report
        assert!(matches!(open("1234:e30=", "1234"), Err(ExportError::Json(_))));
    }

    #[test]
    fn formats_parse() {
        assert_eq!("Envelope".parse::<ExportFormat>(), Ok(ExportFormat::Envelope));
        assert_eq!("json".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
