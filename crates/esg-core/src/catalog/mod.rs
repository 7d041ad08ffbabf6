//! Question schema and immutable questionnaire catalogs.
//!
//! A [`Catalog`] is inert data: the engine scores any authored set of
//! questions. Built-in catalogs for each ESG domain live in [`builtin`].

mod builtin;

pub use builtin::{builtin, domains, Domain};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::CatalogError;

/// How an answer is collected. Scoring treats every kind as a numeric raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Yes/No, answered as 0 or 1
    Boolean,
    /// Free numeric entry
    Numeric,
    /// Bounded slider
    Slider,
    /// Derived from named operands by the formula evaluator
    Formula,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Boolean => "boolean",
            QuestionKind::Numeric => "numeric",
            QuestionKind::Slider => "slider",
            QuestionKind::Formula => "formula",
        }
    }
}

/// A single schema entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Stable identifier, unique within a catalog
    pub id: String,
    /// Human-readable prompt
    pub text: String,
    #[serde(alias = "type")]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// Contribution mass in the aggregate
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideal_value: Option<f64>,
    /// Target interval `[lo, hi]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideal_range: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Informational only; never parsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    /// Operand names that must all be present before evaluation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formula_inputs: Vec<String>,
    /// Display labels aligned with `formula_inputs`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_labels: Vec<String>,
    /// Six breakpoints defining the 0-5 bins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring_scale: Option<[f64; 6]>,
}

impl Question {
    /// Create a question with no envelope, targets or formula.
    pub fn new(id: impl Into<String>, text: impl Into<String>, kind: QuestionKind, weight: f64) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind,
            min: None,
            max: None,
            step: None,
            weight,
            ideal_value: None,
            ideal_range: None,
            description: None,
            formula: None,
            formula_inputs: Vec::new(),
            input_labels: Vec::new(),
            scoring_scale: None,
        }
    }

    pub fn with_envelope(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_ideal_value(mut self, value: f64) -> Self {
        self.ideal_value = Some(value);
        self
    }

    pub fn with_ideal_range(mut self, lo: f64, hi: f64) -> Self {
        self.ideal_range = Some((lo, hi));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a formula description with `(operand, label)` pairs.
    pub fn with_formula(mut self, formula: impl Into<String>, inputs: &[(&str, &str)]) -> Self {
        self.formula = Some(formula.into());
        self.formula_inputs = inputs.iter().map(|(name, _)| name.to_string()).collect();
        self.input_labels = inputs.iter().map(|(_, label)| label.to_string()).collect();
        self
    }

    pub fn with_scoring_scale(mut self, scale: [f64; 6]) -> Self {
        self.scoring_scale = Some(scale);
        self
    }

    /// The `[min, max]` envelope when both bounds are declared.
    pub fn envelope(&self) -> Option<(f64, f64)> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }

    /// Clamp a raw value into the envelope, if one is declared.
    pub fn clamp(&self, raw: f64) -> f64 {
        match self.envelope() {
            Some((min, max)) => raw.clamp(min, max),
            None => raw,
        }
    }

    pub fn is_formula(&self) -> bool {
        self.kind == QuestionKind::Formula
    }

    pub fn accepts_operand(&self, name: &str) -> bool {
        self.formula_inputs.iter().any(|input| input == name)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(CatalogError::InvalidWeight {
                id: self.id.clone(),
                weight: self.weight,
            });
        }

        if let Some((min, max)) = self.envelope() {
            if !min.is_finite() || !max.is_finite() || min > max {
                return Err(CatalogError::InvalidEnvelope {
                    id: self.id.clone(),
                    min,
                    max,
                });
            }
        }

        let non_finite = |field| CatalogError::NonFiniteTarget {
            id: self.id.clone(),
            field,
        };
        if self.ideal_value.is_some_and(|value| !value.is_finite()) {
            return Err(non_finite("idealValue"));
        }
        if let Some(scale) = &self.scoring_scale {
            if scale.iter().any(|breakpoint| !breakpoint.is_finite()) {
                return Err(non_finite("scoringScale"));
            }
        }

        if let Some((lo, hi)) = self.ideal_range {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(non_finite("idealRange"));
            }
            if lo > hi {
                return Err(CatalogError::InvalidIdealRange {
                    id: self.id.clone(),
                    lo,
                    hi,
                });
            }
        }

        if self.is_formula() && self.formula_inputs.is_empty() {
            return Err(CatalogError::MissingFormulaInputs(self.id.clone()));
        }

        if !self.input_labels.is_empty() && self.input_labels.len() != self.formula_inputs.len() {
            return Err(CatalogError::MismatchedLabels {
                id: self.id.clone(),
                inputs: self.formula_inputs.len(),
                labels: self.input_labels.len(),
            });
        }

        Ok(())
    }
}

/// An ordered, validated, immutable questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    title: String,
    questions: Vec<Question>,
}

#[derive(Deserialize)]
struct RawCatalog {
    title: String,
    #[serde(default)]
    questions: Vec<Question>,
}

impl Catalog {
    /// Validate and build a catalog. Order is preserved for presentation.
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id.as_str()) {
                return Err(CatalogError::DuplicateId(question.id.clone()));
            }
            question.validate()?;
        }

        Ok(Self {
            title: title.into(),
            questions,
        })
    }

    /// Parse an authored catalog from JSON (`{ "title": ..., "questions": [...] }`).
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Ok(Self::new(raw.title, raw.questions)?)
    }

    /// Parse an authored catalog from TOML (`title = ...` plus `[[questions]]`).
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let raw: RawCatalog = toml::from_str(content)?;
        Ok(Self::new(raw.title, raw.questions)?)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Sum of all weights, answered or not.
    pub fn total_weight(&self) -> f64 {
        self.questions.iter().map(|q| q.weight).sum()
    }
}
