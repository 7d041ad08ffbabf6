//! Per-session answer collection.
//!
//! An [`AnswerStore`] is owned by exactly one assessment session. Direct
//! answers are clamped into the question's envelope on entry; formula
//! questions collect operands and commit a raw value once the operand set is
//! complete and evaluates to a finite number.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::error::AnswerError;
use crate::formula;

/// Collected answers for one assessment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerStore {
    raw: BTreeMap<String, f64>,
    operands: BTreeMap<String, BTreeMap<String, f64>>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a direct answer. Returns the committed (clamped) value.
    pub fn set_answer(&mut self, catalog: &Catalog, id: &str, value: f64) -> Result<f64, AnswerError> {
        let question = catalog
            .get(id)
            .ok_or_else(|| AnswerError::UnknownQuestion(id.to_string()))?;

        if question.is_formula() {
            return Err(AnswerError::FormulaQuestion(id.to_string()));
        }
        if !value.is_finite() {
            return Err(AnswerError::NonFiniteValue(id.to_string()));
        }

        let committed = question.clamp(value);
        debug!(question = id, value, committed, "answer recorded");
        self.raw.insert(id.to_string(), committed);
        Ok(committed)
    }

    /// Record one operand of a formula question.
    ///
    /// Returns the committed raw value when the operand set is complete and
    /// evaluates to a finite number, otherwise `None`. A non-finite result
    /// drops any raw value committed from an earlier operand set.
    pub fn set_operand(
        &mut self,
        catalog: &Catalog,
        id: &str,
        name: &str,
        value: f64,
    ) -> Result<Option<f64>, AnswerError> {
        let question = catalog
            .get(id)
            .ok_or_else(|| AnswerError::UnknownQuestion(id.to_string()))?;

        if !question.is_formula() {
            return Err(AnswerError::NotFormula(id.to_string()));
        }
        if !question.accepts_operand(name) {
            return Err(AnswerError::UnknownOperand {
                question: id.to_string(),
                operand: name.to_string(),
            });
        }
        if !value.is_finite() {
            return Err(AnswerError::NonFiniteValue(id.to_string()));
        }

        let operands = self.operands.entry(id.to_string()).or_default();
        operands.insert(name.to_string(), value);

        let complete = question
            .formula_inputs
            .iter()
            .all(|input| operands.contains_key(input));
        if !complete {
            return Ok(None);
        }

        match formula::evaluate(question, operands) {
            Some(result) => {
                let committed = question.clamp(result);
                debug!(question = id, result, committed, "formula committed");
                self.raw.insert(id.to_string(), committed);
                Ok(Some(committed))
            }
            None => {
                warn!(question = id, "formula produced no finite value; answer left unset");
                self.raw.remove(id);
                Ok(None)
            }
        }
    }

    /// Forget one question's answer and operands.
    pub fn clear(&mut self, id: &str) {
        self.raw.remove(id);
        self.operands.remove(id);
    }

    pub fn reset(&mut self) {
        self.raw.clear();
        self.operands.clear();
    }

    pub fn raw(&self, id: &str) -> Option<f64> {
        self.raw.get(id).copied()
    }

    pub fn operands(&self, id: &str) -> Option<&BTreeMap<String, f64>> {
        self.operands.get(id)
    }

    pub fn is_answered(&self, id: &str) -> bool {
        self.raw.contains_key(id)
    }

    pub fn answered_count(&self) -> usize {
        self.raw.len()
    }

    /// Fraction of the catalog's questions that have a raw value, `0.0..=1.0`.
    pub fn completion(&self, catalog: &Catalog) -> f64 {
        if catalog.is_empty() {
            return 0.0;
        }
        let answered = catalog
            .questions()
            .iter()
            .filter(|q| self.is_answered(&q.id))
            .count();
        answered as f64 / catalog.len() as f64
    }

    /// Replay an answer sheet against a catalog. Fails on the first rejected entry.
    pub fn from_sheet(catalog: &Catalog, sheet: &AnswerSheet) -> Result<Self, AnswerError> {
        let mut store = Self::new();
        for (id, value) in &sheet.answers {
            store.set_answer(catalog, id, *value)?;
        }
        for (id, operands) in &sheet.operands {
            for (name, value) in operands {
                store.set_operand(catalog, id, name, *value)?;
            }
        }
        Ok(store)
    }

    /// Snapshot the store as a serializable sheet.
    pub fn to_sheet(&self, catalog: &Catalog) -> AnswerSheet {
        let answers = self
            .raw
            .iter()
            .filter(|(id, _)| catalog.get(id).is_some_and(|q| !q.is_formula()))
            .map(|(id, value)| (id.clone(), *value))
            .collect();

        AnswerSheet {
            answers,
            operands: self.operands.clone(),
        }
    }
}

/// Serializable answers: direct values plus formula operands.
///
/// ```json
/// { "answers": { "environmental_policy": 1 },
///   "operands": { "esg_oversight": { "automated": 80, "total": 100 } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerSheet {
    #[serde(default)]
    pub answers: BTreeMap<String, f64>,
    #[serde(default)]
    pub operands: BTreeMap<String, BTreeMap<String, f64>>,
}

impl AnswerSheet {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
