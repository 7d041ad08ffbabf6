//! Aggregator: collapses per-question scores into a 0-100 final score.
//!
//! The default [`AggregationMode::Binned`] weights every catalog question,
//! answered or not, so absence counts as a zero score. The legacy
//! [`AggregationMode::Proportional`] mode awards fractions of weight directly
//! from idealValue/idealRange and is only used when asked for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::answers::AnswerStore;
use crate::catalog::{Catalog, Question, QuestionKind};
use crate::scale::{self, MAX_SCORE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    /// `round(sum(score x weight) / (5 x sum(weight)) x 100)`
    #[default]
    Binned,
    /// Legacy: fractions of weight earned on ideal matches
    Proportional,
}

impl AggregationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationMode::Binned => "binned",
            AggregationMode::Proportional => "proportional",
        }
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binned" | "bins" => Ok(AggregationMode::Binned),
            "proportional" | "legacy" => Ok(AggregationMode::Proportional),
            other => Err(format!("unknown aggregation mode: {other}")),
        }
    }
}

/// Result of aggregation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    /// Binned: `sum(score x weight)`. Proportional: earned weight.
    pub weighted_sum: f64,
    /// Sum of all catalog weights
    pub total_weight: f64,
    pub final_score: u8,
}

/// Aggregate a catalog's answers in the given mode.
pub fn aggregate(catalog: &Catalog, answers: &AnswerStore, mode: AggregationMode) -> Aggregate {
    let sum = catalog
        .questions()
        .iter()
        .map(|q| contribution(q, answers.raw(&q.id), mode).1)
        .sum();
    finish(mode, sum, catalog.total_weight())
}

/// Ordinal score and weighted contribution of one question.
///
/// Unanswered questions score 0 and contribute nothing. The contribution is
/// `score x weight` when binned and the earned weight when proportional.
pub fn contribution(question: &Question, raw: Option<f64>, mode: AggregationMode) -> (u8, f64) {
    let Some(raw) = raw else {
        return (0, 0.0);
    };

    let score = scale::score(question, raw);
    let weighted = match mode {
        AggregationMode::Binned => f64::from(score) * question.weight,
        AggregationMode::Proportional => proportional_credit(question, raw),
    };
    (score, weighted)
}

/// Final score from a summed contribution and the catalog's total weight.
pub fn finish(mode: AggregationMode, sum: f64, total_weight: f64) -> Aggregate {
    match mode {
        AggregationMode::Binned => binned(sum, total_weight),
        AggregationMode::Proportional => proportional(sum, total_weight),
    }
}

/// Final score from a binned weighted sum `S` and total weight `W`.
pub fn binned(weighted_sum: f64, total_weight: f64) -> Aggregate {
    let max = f64::from(MAX_SCORE) * total_weight;
    Aggregate {
        weighted_sum,
        total_weight,
        final_score: to_percent(weighted_sum, max),
    }
}

/// Final score from earned weight and total weight.
pub fn proportional(earned: f64, total_weight: f64) -> Aggregate {
    Aggregate {
        weighted_sum: earned,
        total_weight,
        final_score: to_percent(earned, total_weight),
    }
}

/// Decimal places kept before rounding to a whole percentage.
const PERCENT_PRECISION: f64 = 1e9;

fn to_percent(numerator: f64, denominator: f64) -> u8 {
    if denominator <= 0.0 {
        return 0;
    }
    // equal ratios must round alike; f64::round rounds half away from zero
    let percent = (numerator / denominator) * 100.0;
    let snapped = (percent * PERCENT_PRECISION).round() / PERCENT_PRECISION;
    snapped.round().clamp(0.0, 100.0) as u8
}

/// Weight earned by one answered question under the legacy mode.
///
/// | Question | Credit |
/// |----------|--------|
/// | boolean | full weight when raw equals `idealValue` |
/// | has `idealRange` | `weight x (0.7 + 0.3 x position)` inside the range, else 0 |
/// | has `idealValue` | full weight on exact match |
/// | otherwise | 0 |
pub fn proportional_credit(question: &Question, raw: f64) -> f64 {
    if question.kind == QuestionKind::Boolean {
        return if Some(raw) == question.ideal_value {
            question.weight
        } else {
            0.0
        };
    }

    if let Some((lo, hi)) = question.ideal_range {
        if raw < lo || raw > hi {
            return 0.0;
        }
        let width = hi - lo;
        let position = if width > 0.0 { (raw - lo) / width } else { 1.0 };
        return question.weight * (0.7 + position * 0.3);
    }

    match question.ideal_value {
        Some(ideal) if ideal == raw => question.weight,
        _ => 0.0,
    }
}

/// Qualitative band for a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rating {
    Excellent,
    Good,
    NeedsImprovement,
}

impl Rating {
    pub fn from_score(final_score: u8) -> Self {
        match final_score {
            80..=u8::MAX => Rating::Excellent,
            60..=79 => Rating::Good,
            _ => Rating::NeedsImprovement,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::NeedsImprovement => "Needs improvement",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Rating::Excellent => "The organization demonstrates strong ESG practices.",
            Rating::Good => "Good progress, with opportunities to enhance ESG performance.",
            Rating::NeedsImprovement => "Consider focusing on the lowest-scoring areas first.",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
