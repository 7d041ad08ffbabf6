//! Formula evaluator: derives a raw value from a question's operand sub-map.
//!
//! The dispatch is a closed table over known question ids. A question's
//! `formula` string is descriptive only and is never parsed.
//!
//! ## Division discipline
//!
//! | Shape | Zero denominator |
//! |-------|------------------|
//! | `a / b x 100` | yields `0` |
//! | `data_security` breach factor | factor is `1` when breaches or attempts is `0` |
//! | anything else | non-finite, so no raw value |

use std::collections::BTreeMap;

use crate::catalog::Question;

/// Question ids whose raw value is `(first / second) x 100`, with their operand names.
const PERCENT_FORMULAS: &[(&str, &str, &str)] = &[
    ("ethical_business_conduct", "completed", "total"),
    ("ai_compliance_checks", "completed", "total"),
    ("board_composition", "independent", "total"),
    ("board_independence", "independent", "total"),
    ("whistleblower_mechanism", "resolved", "total"),
    ("whistleblower_resolution", "resolved", "total"),
    ("esg_oversight", "automated", "total"),
    ("esg_automation", "automated", "total"),
    ("audit_committee_independence", "independent", "total"),
    ("executive_compensation_alignment", "performanceLinked", "total"),
    ("related_party_transaction", "rptValue", "totalRevenue"),
    ("energy_efficiency", "outputUnits", "energyConsumed"),
    ("waste_management", "reusedRecycledWaste", "totalWaste"),
    ("sustainable_sourcing", "sustainableInputs", "totalInputs"),
    ("eco_friendly_packaging", "ecoFriendlyPackaging", "totalPackaging"),
    ("biodiversity_protection", "biodiversityInvestment", "totalCSRSpend"),
    ("renewable_energy", "renewableEnergy", "totalEnergy"),
    ("gender_diversity_ratio", "femaleEmployees", "totalEmployees"),
    ("employee_welfare_coverage", "coveredEmployees", "totalEmployees"),
    ("training_skill_development", "trainedEmployees", "totalEmployees"),
    ("health_safety_coverage", "safetyCoveredEmployees", "totalEmployees"),
    ("grievance_redressal", "resolvedComplaints", "totalComplaints"),
    ("differently_abled_inclusion", "differentlyAbledEmployees", "totalEmployees"),
    ("csr_spend_index", "csrSpend", "netProfit"),
    ("parental_leave_return", "returningEmployees", "leaveTakingEmployees"),
];

/// Question ids whose raw value is a single operand passed through.
const PASSTHROUGH_FORMULAS: &[(&str, &str)] = &[
    ("shareholder_rights", "disclosures"),
    ("digital_disclosures", "disclosures"),
    ("risk_management", "assessments"),
    ("ai_risk_assessments", "assessments"),
    ("stakeholder_engagement", "reports"),
    ("blockchain_engagements", "reports"),
    ("ceo_chair_separation", "separated"),
    ("anti_corruption_practices", "implementedPolicies"),
    ("shareholder_rights_index", "implementedProtections"),
    ("controversy_score", "controversyScore"),
    ("ownership_concentration", "topThreeOwnership"),
];

const BESPOKE_FORMULAS: &[&str] = &[
    "data_security",
    "board_diversity",
    "carbon_emissions_intensity",
    "water_usage_efficiency",
];

/// Whether the dispatch table knows how to evaluate `id`.
pub fn is_supported(id: &str) -> bool {
    PERCENT_FORMULAS.iter().any(|(known, _, _)| *known == id)
        || PASSTHROUGH_FORMULAS.iter().any(|(known, _)| *known == id)
        || BESPOKE_FORMULAS.contains(&id)
}

/// `(part / whole) x 100`, or `0` when `whole` is zero.
pub fn ratio_percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        (part / whole) * 100.0
    }
}

/// Evaluate a formula question against its operands.
///
/// Returns `None` when an operand listed in `formula_inputs` is missing, the
/// id is not in the dispatch table, or the result is NaN/infinite. The value
/// is not clamped here.
pub fn evaluate(question: &Question, operands: &BTreeMap<String, f64>) -> Option<f64> {
    if question
        .formula_inputs
        .iter()
        .any(|name| !operands.contains_key(name))
    {
        return None;
    }

    let value = dispatch(&question.id, operands)?;
    value.is_finite().then_some(value)
}

fn dispatch(id: &str, operands: &BTreeMap<String, f64>) -> Option<f64> {
    let get = |name: &str| operands.get(name).copied();

    if let Some((_, part, whole)) = PERCENT_FORMULAS.iter().find(|(known, _, _)| *known == id) {
        return Some(ratio_percent(get(part)?, get(whole)?));
    }

    if let Some((_, name)) = PASSTHROUGH_FORMULAS.iter().find(|(known, _)| *known == id) {
        return get(name);
    }

    match id {
        "data_security" => {
            let breaches = get("breaches")?;
            let attempts = get("attempts")?;
            let security_level = get("securityLevel")?;
            let breach_factor = if breaches == 0.0 || attempts == 0.0 {
                1.0
            } else {
                1.0 - breaches / attempts
            };
            Some(breach_factor * (security_level / 5.0) * 5.0)
        }
        "board_diversity" => Some((get("genderScore")? + get("experienceScore")?) / 2.0),
        "carbon_emissions_intensity" => Some((get("ghgEmissions")? / get("totalRevenue")?) * 1000.0),
        "water_usage_efficiency" => Some(get("totalOutput")? / get("waterConsumption")?),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::QuestionKind;

    fn formula(id: &str, inputs: &[&str]) -> Question {
        let pairs: Vec<(&str, &str)> = inputs.iter().map(|name| (*name, *name)).collect();
        Question::new(id, id, QuestionKind::Formula, 1.0).with_formula("", &pairs)
    }

    fn operands(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn percentage_formula() {
        let q = formula("esg_oversight", &["automated", "total"]);
        let value = evaluate(&q, &operands(&[("automated", 80.0), ("total", 100.0)]));
        assert_eq!(value, Some(80.0));
    }

    #[test]
    fn zero_denominator_percentage_yields_zero() {
        let q = formula("ethical_business_conduct", &["completed", "total"]);
        let value = evaluate(&q, &operands(&[("completed", 5.0), ("total", 0.0)]));
        assert_eq!(value, Some(0.0));
    }

    #[test]
    fn missing_operand_yields_nothing() {
        let q = formula("esg_oversight", &["automated", "total"]);
        assert_eq!(evaluate(&q, &operands(&[("automated", 80.0)])), None);
    }

    #[test]
    fn unknown_id_yields_nothing() {
        let q = formula("made_up_metric", &["a"]);
        assert_eq!(evaluate(&q, &operands(&[("a", 1.0)])), None);
        assert!(!is_supported("made_up_metric"));
    }

    #[test]
    fn aliases_share_formulas() {
        let q = formula("ai_compliance_checks", &["completed", "total"]);
        assert_eq!(
            evaluate(&q, &operands(&[("completed", 3.0), ("total", 4.0)])),
            Some(75.0)
        );

        let q = formula("blockchain_engagements", &["reports"]);
        assert_eq!(evaluate(&q, &operands(&[("reports", 7.0)])), Some(7.0));
    }

    #[test]
    fn data_security_breach_factor() {
        let q = formula("data_security", &["breaches", "attempts", "securityLevel"]);

        let clean = operands(&[("breaches", 0.0), ("attempts", 10.0), ("securityLevel", 5.0)]);
        assert_eq!(evaluate(&q, &clean), Some(5.0));

        let breached = operands(&[("breaches", 1.0), ("attempts", 4.0), ("securityLevel", 5.0)]);
        assert_eq!(evaluate(&q, &breached), Some(3.75));

        let no_attempts = operands(&[("breaches", 2.0), ("attempts", 0.0), ("securityLevel", 5.0)]);
        assert_eq!(evaluate(&q, &no_attempts), Some(5.0));
    }

    #[test]
    fn board_diversity_averages() {
        let q = formula("board_diversity", &["genderScore", "experienceScore"]);
        let value = evaluate(&q, &operands(&[("genderScore", 40.0), ("experienceScore", 80.0)]));
        assert_eq!(value, Some(60.0));
    }

    #[test]
    fn non_percentage_zero_division_is_non_finite() {
        let q = formula("water_usage_efficiency", &["totalOutput", "waterConsumption"]);
        let value = evaluate(&q, &operands(&[("totalOutput", 10.0), ("waterConsumption", 0.0)]));
        assert_eq!(value, None);

        let q = formula("carbon_emissions_intensity", &["ghgEmissions", "totalRevenue"]);
        let value = evaluate(&q, &operands(&[("ghgEmissions", 0.0), ("totalRevenue", 0.0)]));
        assert_eq!(value, None);
    }

    #[test]
    fn carbon_intensity_scales_by_thousand() {
        let q = formula("carbon_emissions_intensity", &["ghgEmissions", "totalRevenue"]);
        let value = evaluate(&q, &operands(&[("ghgEmissions", 50.0), ("totalRevenue", 1000.0)]));
        assert_eq!(value, Some(50.0));
    }

    #[test]
    fn nan_operand_is_rejected() {
        let q = formula("controversy_score", &["controversyScore"]);
        assert_eq!(evaluate(&q, &operands(&[("controversyScore", f64::NAN)])), None);
    }
}
