//! Score mapper: bins a raw value onto the 0-5 ordinal scale.
//!
//! Every question resolves to one [`BinningRule`]. Known question ids have
//! hand-authored rules; anything else falls back to the catalog's
//! `scoringScale`, its kind, or its envelope.
//!
//! ## Resolution order
//!
//! 1. Id table ([`BinningRule::for_id`]), formula-form ids only apply to formula questions
//! 2. The question's own `scoringScale` (direction inferred from its order)
//! 3. Boolean kind: indicator on `idealValue` (default 1)
//! 4. Risk-style envelope (`idealRange` starts at 0 and ends below `max`): decreasing linear
//! 5. Envelope with `max > min`: increasing linear
//! 6. Otherwise unscored (always 0)

use serde::{Deserialize, Serialize};

use crate::catalog::{Question, QuestionKind};

/// Highest ordinal score.
pub const MAX_SCORE: u8 = 5;

/// Percentage quality metrics.
pub const PERCENT_QUALITY: [f64; 6] = [0.0, 20.0, 40.0, 60.0, 80.0, 100.0];
/// Board-structure percentages, as authored for the governance catalog.
pub const BOARD_PERCENT: [f64; 6] = [0.0, 20.0, 35.0, 50.0, 75.0, 100.0];
/// Technology-governance percentages: any progress earns 1, 80% and above earns 5.
pub const DIGITAL_PERCENT: [f64; 6] = [0.0, 1.0, 20.0, 40.0, 60.0, 80.0];
/// Count of disclosures/assessments/reports, five or more earns 5.
pub const COUNT: [f64; 6] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
/// Zero-to-four policy/protection checklists.
pub const CHECKLIST: [f64; 6] = [0.0, 1.0, 2.0, 3.0, 3.5, 4.0];

/// Direction of a binning rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Higher raw never lowers the score
    Increasing,
    /// Higher raw never raises the score
    Decreasing,
    /// Full marks only on an exact target
    Indicator,
}

/// A monotonic step function from raw value to a 0-5 score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum BinningRule {
    /// Largest `i` whose lower threshold `t[i] <= raw`; below `t[0]` scores 0
    Ascending { thresholds: [f64; 6] },
    /// Count of `t[0..5]` strictly above raw, e.g. `{>=100: 0, >=80: 1, ..., <20: 5}`
    Descending { thresholds: [f64; 6] },
    /// 5 when `raw == target`, else 0
    Indicator { target: f64 },
    /// Raw is already on the 0-5 scale: `clamp(round(raw), 0, 5)`
    DirectScale,
    /// `{<=50: 0, <=70: 1, <=85: 2, <=95: 3, <100: 4, 100: 5}`
    Controversy,
    /// `floor((raw - min) / (max - min) x 5)` clamped to 0-5
    Linear { min: f64, max: f64 },
    /// 5 up to `ceiling`, then falls linearly to 0 at `max`
    RiskLinear { ceiling: f64, max: f64 },
    /// No rule and no envelope
    Unscored,
}

impl BinningRule {
    /// Resolve the rule for a question.
    pub fn for_question(question: &Question) -> Self {
        if let Some(rule) = Self::for_id(&question.id, question.kind) {
            return rule;
        }

        if let Some(scale) = question.scoring_scale {
            return Self::from_scale(scale);
        }

        if question.kind == QuestionKind::Boolean {
            return BinningRule::Indicator {
                target: question.ideal_value.unwrap_or(1.0),
            };
        }

        match (question.envelope(), question.ideal_range) {
            (Some((_, max)), Some((lo, hi))) if lo == 0.0 && hi < max => {
                BinningRule::RiskLinear { ceiling: hi, max }
            }
            (Some((min, max)), _) if max > min => BinningRule::Linear { min, max },
            _ => BinningRule::Unscored,
        }
    }

    /// The hand-authored rule for a known question id, if any.
    ///
    /// Some ids are shared between dialects (for example `risk_management` is
    /// a formula in one catalog and a yes/no policy in another), so
    /// formula-form rules only apply to formula questions.
    pub fn for_id(id: &str, kind: QuestionKind) -> Option<Self> {
        let rule = match id {
            "ceo_chair_separation" => BinningRule::Indicator { target: 1.0 },
            "data_security" => BinningRule::DirectScale,
            "controversy_score" => BinningRule::Controversy,
            "ownership_concentration" => BinningRule::Descending {
                thresholds: [100.0, 80.0, 60.0, 40.0, 20.0, 0.0],
            },
            "related_party_transaction" => BinningRule::Descending {
                thresholds: [100.0, 50.0, 25.0, 10.0, 5.0, 0.0],
            },
            _ if kind == QuestionKind::Formula => return Self::formula_form(id),
            _ => return None,
        };
        Some(rule)
    }

    fn formula_form(id: &str) -> Option<Self> {
        let ascending = |thresholds| BinningRule::Ascending { thresholds };

        let rule = match id {
            "ethical_business_conduct"
            | "ai_compliance_checks"
            | "board_composition"
            | "whistleblower_mechanism"
            | "whistleblower_resolution"
            | "esg_oversight"
            | "esg_automation" => ascending(DIGITAL_PERCENT),

            "shareholder_rights"
            | "digital_disclosures"
            | "risk_management"
            | "ai_risk_assessments"
            | "stakeholder_engagement"
            | "blockchain_engagements" => ascending(COUNT),

            "board_independence" | "executive_compensation_alignment" => ascending(BOARD_PERCENT),
            "board_diversity" => ascending(PERCENT_QUALITY),
            "audit_committee_independence" => ascending([0.0, 25.0, 50.0, 75.0, 90.0, 100.0]),
            "anti_corruption_practices" | "shareholder_rights_index" => ascending(CHECKLIST),

            "carbon_emissions_intensity" => BinningRule::Descending {
                thresholds: [1000.0, 500.0, 250.0, 100.0, 50.0, 0.0],
            },
            "energy_efficiency" => ascending([0.0, 25.0, 50.0, 100.0, 150.0, 200.0]),
            "water_usage_efficiency" => ascending([0.0, 0.5, 1.0, 2.0, 5.0, 10.0]),
            "waste_management" => ascending([0.0, 20.0, 40.0, 60.0, 75.0, 90.0]),
            "sustainable_sourcing" => ascending([0.0, 20.0, 35.0, 50.0, 75.0, 90.0]),
            "eco_friendly_packaging" => ascending([0.0, 20.0, 40.0, 60.0, 80.0, 95.0]),
            "biodiversity_protection" => ascending([0.0, 2.0, 5.0, 10.0, 15.0, 25.0]),
            "renewable_energy" => ascending([0.0, 10.0, 25.0, 50.0, 75.0, 100.0]),

            "gender_diversity_ratio" => ascending([0.0, 10.0, 20.0, 30.0, 40.0, 50.0]),
            "employee_welfare_coverage" => ascending([0.0, 40.0, 60.0, 70.0, 80.0, 95.0]),
            "training_skill_development" => ascending([0.0, 20.0, 40.0, 55.0, 70.0, 90.0]),
            "health_safety_coverage" => ascending([0.0, 50.0, 70.0, 80.0, 90.0, 98.0]),
            "grievance_redressal" | "parental_leave_return" => {
                ascending([0.0, 40.0, 60.0, 70.0, 80.0, 95.0])
            }
            "differently_abled_inclusion" => ascending([0.0, 0.5, 1.0, 2.0, 3.0, 5.0]),
            "csr_spend_index" => ascending([0.0, 0.5, 1.0, 1.5, 2.0, 3.0]),

            _ => return None,
        };
        Some(rule)
    }

    /// Interpret an authored six-point scale. A scale that starts higher than
    /// it ends is decreasing.
    pub fn from_scale(thresholds: [f64; 6]) -> Self {
        if thresholds[0] > thresholds[5] {
            BinningRule::Descending { thresholds }
        } else {
            BinningRule::Ascending { thresholds }
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            BinningRule::Descending { .. } | BinningRule::RiskLinear { .. } => Direction::Decreasing,
            BinningRule::Indicator { .. } => Direction::Indicator,
            BinningRule::Ascending { .. }
            | BinningRule::DirectScale
            | BinningRule::Controversy
            | BinningRule::Linear { .. }
            | BinningRule::Unscored => Direction::Increasing,
        }
    }

    /// Map a raw value to `0..=5`. Non-finite raw values score 0.
    pub fn apply(&self, raw: f64) -> u8 {
        if !raw.is_finite() {
            return 0;
        }

        match *self {
            BinningRule::Ascending { thresholds } => thresholds
                .iter()
                .rposition(|&t| t <= raw)
                .map_or(0, |i| i as u8),
            BinningRule::Descending { thresholds } => {
                let above = thresholds[..5].iter().filter(|&&t| t > raw).count() as u8;
                above.min(MAX_SCORE)
            }
            BinningRule::Indicator { target } => {
                if raw == target {
                    MAX_SCORE
                } else {
                    0
                }
            }
            BinningRule::DirectScale => raw.round().clamp(0.0, 5.0) as u8,
            BinningRule::Controversy => {
                if raw <= 50.0 {
                    0
                } else if raw <= 70.0 {
                    1
                } else if raw <= 85.0 {
                    2
                } else if raw <= 95.0 {
                    3
                } else if raw < 100.0 {
                    4
                } else {
                    5
                }
            }
            BinningRule::Linear { min, max } => to_scale((raw - min) / (max - min)),
            BinningRule::RiskLinear { ceiling, max } => {
                if raw <= ceiling {
                    MAX_SCORE
                } else {
                    to_scale((max - raw) / (max - ceiling))
                }
            }
            BinningRule::Unscored => 0,
        }
    }
}

fn to_scale(fraction: f64) -> u8 {
    (fraction * 5.0).floor().clamp(0.0, 5.0) as u8
}

/// Score a raw value for a question.
pub fn score(question: &Question, raw: f64) -> u8 {
    BinningRule::for_question(question).apply(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formula(id: &str) -> Question {
        Question::new(id, id, QuestionKind::Formula, 1.0)
            .with_formula("", &[("x", "x")])
            .with_envelope(0.0, 100.0)
    }

    #[test]
    fn digital_percentage_inclusive_at_eighty() {
        let q = formula("esg_oversight");
        assert_eq!(score(&q, 80.0), 5);
        assert_eq!(score(&q, 79.9), 4);
        assert_eq!(score(&q, 0.0), 0);
        assert_eq!(score(&q, 5.0), 1);
    }

    #[test]
    fn ownership_concentration_decreases() {
        let q = formula("ownership_concentration");
        assert_eq!(score(&q, 25.0), 4);
        assert_eq!(score(&q, 85.0), 1);
        assert_eq!(score(&q, 100.0), 0);
        assert_eq!(score(&q, 10.0), 5);
        assert_eq!(BinningRule::for_question(&q).direction(), Direction::Decreasing);
    }

    #[test]
    fn related_party_transaction_decreases() {
        let q = formula("related_party_transaction");
        assert_eq!(score(&q, 3.0), 5);
        assert_eq!(score(&q, 5.0), 4);
        assert_eq!(score(&q, 30.0), 2);
        assert_eq!(score(&q, 100.0), 0);
    }

    #[test]
    fn controversy_bins_favour_high_end() {
        let q = formula("controversy_score");
        assert_eq!(score(&q, 50.0), 0);
        assert_eq!(score(&q, 50.5), 1);
        assert_eq!(score(&q, 85.0), 2);
        assert_eq!(score(&q, 95.0), 3);
        assert_eq!(score(&q, 99.9), 4);
        assert_eq!(score(&q, 100.0), 5);
    }

    #[test]
    fn ceo_chair_separation_is_an_indicator() {
        let q = formula("ceo_chair_separation");
        assert_eq!(score(&q, 1.0), 5);
        assert_eq!(score(&q, 0.0), 0);
    }

    #[test]
    fn data_security_rounds_onto_scale() {
        let q = formula("data_security");
        assert_eq!(score(&q, 3.75), 4);
        assert_eq!(score(&q, 2.5), 3);
        assert_eq!(score(&q, -1.0), 0);
        assert_eq!(score(&q, 9.0), 5);
    }

    #[test]
    fn count_bins() {
        let q = formula("risk_management");
        for (raw, expected) in [(0.0, 0), (1.0, 1), (2.0, 2), (3.0, 3), (4.0, 4), (5.0, 5), (12.0, 5)] {
            assert_eq!(score(&q, raw), expected, "raw {raw}");
        }
    }

    #[test]
    fn formula_form_ids_do_not_leak_onto_policies() {
        let q = Question::new("risk_management", "Formal framework?", QuestionKind::Boolean, 5.0)
            .with_ideal_value(1.0);
        assert_eq!(BinningRule::for_question(&q), BinningRule::Indicator { target: 1.0 });
        assert_eq!(score(&q, 1.0), 5);
        assert_eq!(score(&q, 0.0), 0);
    }

    #[test]
    fn authored_scale_direction_is_inferred() {
        let up = Question::new("custom_up", "", QuestionKind::Numeric, 1.0)
            .with_scoring_scale([0.0, 20.0, 35.0, 50.0, 75.0, 100.0]);
        assert_eq!(score(&up, 50.0), 3);
        assert_eq!(score(&up, 100.0), 5);
        assert_eq!(score(&up, -5.0), 0);

        let down = Question::new("custom_down", "", QuestionKind::Numeric, 1.0)
            .with_scoring_scale([100.0, 80.0, 60.0, 40.0, 20.0, 0.0]);
        assert_eq!(score(&down, 85.0), 1);
        assert_eq!(BinningRule::for_question(&down).direction(), Direction::Decreasing);
    }

    #[test]
    fn boolean_respects_ideal_value() {
        let q = Question::new("violations", "", QuestionKind::Boolean, 1.0).with_ideal_value(0.0);
        assert_eq!(score(&q, 0.0), 5);
        assert_eq!(score(&q, 1.0), 0);
    }

    #[test]
    fn linear_fallback() {
        let q = Question::new("engagement", "", QuestionKind::Slider, 1.0).with_envelope(1.0, 10.0);
        assert_eq!(score(&q, 1.0), 0);
        assert_eq!(score(&q, 10.0), 5);
        assert_eq!(score(&q, 5.5), 2);
        assert_eq!(score(&q, 50.0), 5);
    }

    #[test]
    fn risk_style_fallback_decreases() {
        let q = Question::new("incidents", "", QuestionKind::Numeric, 1.0)
            .with_envelope(0.0, 20.0)
            .with_ideal_range(0.0, 1.0);
        assert_eq!(BinningRule::for_question(&q).direction(), Direction::Decreasing);
        assert_eq!(score(&q, 0.5), 5);
        assert_eq!(score(&q, 1.0), 5);
        assert_eq!(score(&q, 20.0), 0);
        assert!(score(&q, 5.0) >= score(&q, 10.0));
    }

    #[test]
    fn no_rule_no_envelope_scores_zero() {
        let q = Question::new("free_text_number", "", QuestionKind::Numeric, 1.0);
        assert_eq!(BinningRule::for_question(&q), BinningRule::Unscored);
        assert_eq!(score(&q, 1_000.0), 0);
    }

    #[test]
    fn non_finite_raw_scores_zero() {
        let q = formula("esg_oversight");
        assert_eq!(score(&q, f64::NAN), 0);
        assert_eq!(score(&q, f64::INFINITY), 0);
    }
}
