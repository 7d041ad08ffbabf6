//! Report builder.
//!
//! A [`Report`] is the immutable, serializable outcome of an assessment. It
//! carries only primitives, so it can be exported, displayed or shared
//! without holding on to the catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregate::{self, AggregationMode, Rating};
use crate::answers::AnswerStore;
use crate::catalog::Catalog;

/// Source of the completion timestamp.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// One scored question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredItem {
    pub id: String,
    /// Question text
    pub question: String,
    /// `None` when unanswered
    pub raw: Option<f64>,
    pub score: u8,
    pub weight: f64,
    /// `score x weight` in binned mode, earned weight in proportional mode
    pub weighted_contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub title: String,
    pub date_completed: DateTime<Utc>,
    #[serde(default)]
    pub mode: AggregationMode,
    /// Catalog order
    pub items: Vec<ScoredItem>,
    pub final_score: u8,
    pub rating: Rating,
}

impl Report {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Answered/unanswered counts and the weakest items.
    pub fn summary(&self) -> ReportSummary {
        let answered = self.items.iter().filter(|item| item.raw.is_some()).count();

        let mut weakest: Vec<&ScoredItem> = self.items.iter().filter(|item| item.score < 5).collect();
        // lowest score first, heavier questions first on ties
        weakest.sort_by(|a, b| a.score.cmp(&b.score).then(b.weight.total_cmp(&a.weight)));

        ReportSummary {
            answered,
            unanswered: self.items.len() - answered,
            weakest: weakest
                .into_iter()
                .take(WEAKEST_LIMIT)
                .map(|item| item.id.clone())
                .collect(),
        }
    }
}

const WEAKEST_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub answered: usize,
    pub unanswered: usize,
    /// Ids of up to three items below full marks
    pub weakest: Vec<String>,
}

/// Builds reports with a title and aggregation mode.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    title: String,
    mode: AggregationMode,
}

impl ReportBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            mode: AggregationMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: AggregationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Score every catalog question and aggregate. Reads `clock` once.
    pub fn build(&self, catalog: &Catalog, answers: &AnswerStore, clock: &dyn Clock) -> Report {
        let items: Vec<ScoredItem> = catalog
            .questions()
            .iter()
            .map(|q| {
                let raw = answers.raw(&q.id);
                let (score, weighted_contribution) = aggregate::contribution(q, raw, self.mode);
                ScoredItem {
                    id: q.id.clone(),
                    question: q.text.clone(),
                    raw,
                    score,
                    weight: q.weight,
                    weighted_contribution,
                }
            })
            .collect();

        let result = aggregate::aggregate(catalog, answers, self.mode);

        info!(
            title = %self.title,
            mode = %self.mode,
            questions = items.len(),
            answered = answers.answered_count(),
            final_score = result.final_score,
            "report built"
        );

        Report {
            title: self.title.clone(),
            date_completed: clock.now(),
            mode: self.mode,
            items,
            final_score: result.final_score,
            rating: Rating::from_score(result.final_score),
        }
    }
}

/// Build a binned report titled after the catalog.
pub fn build_report(catalog: &Catalog, answers: &AnswerStore, now: DateTime<Utc>) -> Report {
    ReportBuilder::new(catalog.title()).build(catalog, answers, &FixedClock(now))
}
