//! Built-in questionnaire catalogs, one canonical catalog per domain.
//!
//! Governance ships in its board-structure formulation. The AI/blockchain
//! formulation is a separate questionnaire ([`Domain::DigitalGovernance`])
//! and is never merged into it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Catalog, Question, QuestionKind};

/// Assessment domain with a curated catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    Environmental,
    Social,
    Governance,
    DigitalGovernance,
    Comprehensive,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Environmental => "environmental",
            Domain::Social => "social",
            Domain::Governance => "governance",
            Domain::DigitalGovernance => "digital-governance",
            Domain::Comprehensive => "comprehensive",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Domain::Environmental => "Environmental Assessment",
            Domain::Social => "Social Assessment",
            Domain::Governance => "Governance Assessment",
            Domain::DigitalGovernance => "Digital Governance Assessment",
            Domain::Comprehensive => "Comprehensive ESG Assessment",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Domain::Environmental => indoc::indoc! {"
                Measures environmental impact and sustainability: emissions and
                energy intensity, resource efficiency, sourcing and packaging,
                biodiversity investment, and the policies behind them.
            "},
            Domain::Social => indoc::indoc! {"
                Evaluates diversity, employee welfare and development, workplace
                safety, grievance handling, inclusion, and community investment.
            "},
            Domain::Governance => indoc::indoc! {"
                Evaluates leadership structure, ethics, and compliance: board
                independence and diversity, audit oversight, pay alignment,
                shareholder protections, controversies, and concentration risks.
            "},
            Domain::DigitalGovernance => indoc::indoc! {"
                Evaluates technology-enabled governance: AI compliance checks,
                digital disclosures, automated ESG oversight, verified
                stakeholder reporting, and data security.
            "},
            Domain::Comprehensive => indoc::indoc! {"
                A cross-domain subset covering governance, environmental, and
                social practices plus ESG reporting and targets.
            "},
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "environmental" | "env" => Ok(Domain::Environmental),
            "social" | "soc" => Ok(Domain::Social),
            "governance" | "gov" => Ok(Domain::Governance),
            "digital-governance" | "digital" => Ok(Domain::DigitalGovernance),
            "comprehensive" | "combined" | "full" => Ok(Domain::Comprehensive),
            other => Err(format!("unknown domain: {other}")),
        }
    }
}

/// All built-in domains, in presentation order.
pub fn domains() -> Vec<Domain> {
    vec![
        Domain::Governance,
        Domain::Environmental,
        Domain::Social,
        Domain::DigitalGovernance,
        Domain::Comprehensive,
    ]
}

/// Returns the canonical catalog for a domain.
pub fn builtin(domain: Domain) -> Catalog {
    let questions = match domain {
        Domain::Environmental => environmental_questions(),
        Domain::Social => social_questions(),
        Domain::Governance => governance_questions(),
        Domain::DigitalGovernance => digital_governance_questions(),
        Domain::Comprehensive => comprehensive_questions(),
    };

    Catalog {
        title: domain.title().to_string(),
        questions,
    }
}

fn percentage(id: &str, text: &str, weight: f64) -> Question {
    Question::new(id, text, QuestionKind::Formula, weight)
        .with_envelope(0.0, 100.0)
        .with_step(1.0)
}

fn policy(id: &str, text: &str, weight: f64) -> Question {
    Question::new(id, text, QuestionKind::Boolean, weight).with_ideal_value(1.0)
}

// ============================================================================
// ENVIRONMENTAL
// ============================================================================

fn environmental_questions() -> Vec<Question> {
    vec![
        Question::new(
            "carbon_emissions_intensity",
            "Carbon Emissions Intensity",
            QuestionKind::Formula,
            10.0,
        )
        .with_envelope(0.0, 1000.0)
        .with_ideal_value(0.0)
        .with_ideal_range(0.0, 100.0)
        .with_description("Greenhouse gas emissions per unit of revenue. Lower is better.")
        .with_formula(
            "(GHG Emissions / Total Revenue) x 1000",
            &[
                ("ghgEmissions", "GHG Emissions (tCO2e)"),
                ("totalRevenue", "Total Revenue"),
            ],
        ),
        Question::new("energy_efficiency", "Energy Efficiency", QuestionKind::Formula, 8.0)
            .with_ideal_range(100.0, 200.0)
            .with_description("Output produced per unit of energy consumed.")
            .with_formula(
                "(Output Units / Energy Consumed) x 100",
                &[
                    ("outputUnits", "Output Units"),
                    ("energyConsumed", "Energy Consumed (MWh)"),
                ],
            ),
        Question::new(
            "water_usage_efficiency",
            "Water Usage Efficiency",
            QuestionKind::Formula,
            6.0,
        )
        .with_ideal_range(5.0, 10.0)
        .with_description("Output produced per cubic meter of water consumed.")
        .with_formula(
            "Total Output / Water Consumption",
            &[
                ("totalOutput", "Total Output"),
                ("waterConsumption", "Water Consumption (m3)"),
            ],
        ),
        percentage("waste_management", "Waste Diversion Rate", 7.0)
            .with_ideal_range(75.0, 100.0)
            .with_description("Share of waste reused or recycled instead of landfilled.")
            .with_formula(
                "(Reused/Recycled Waste / Total Waste) x 100",
                &[
                    ("reusedRecycledWaste", "Reused or Recycled Waste (t)"),
                    ("totalWaste", "Total Waste (t)"),
                ],
            ),
        percentage("sustainable_sourcing", "Sustainable Sourcing", 6.0)
            .with_ideal_range(75.0, 100.0)
            .with_description("Share of inputs sourced from certified sustainable suppliers.")
            .with_formula(
                "(Sustainable Inputs / Total Inputs) x 100",
                &[
                    ("sustainableInputs", "Sustainable Inputs"),
                    ("totalInputs", "Total Inputs"),
                ],
            ),
        percentage("eco_friendly_packaging", "Eco-Friendly Packaging", 5.0)
            .with_ideal_range(80.0, 100.0)
            .with_description("Share of packaging that is recyclable, compostable or reusable.")
            .with_formula(
                "(Eco-Friendly Packaging / Total Packaging) x 100",
                &[
                    ("ecoFriendlyPackaging", "Eco-Friendly Packaging (t)"),
                    ("totalPackaging", "Total Packaging (t)"),
                ],
            ),
        percentage("biodiversity_protection", "Biodiversity Protection", 5.0)
            .with_ideal_range(15.0, 100.0)
            .with_description("Share of CSR spend invested in biodiversity protection.")
            .with_formula(
                "(Biodiversity Investment / Total CSR Spend) x 100",
                &[
                    ("biodiversityInvestment", "Biodiversity Investment"),
                    ("totalCSRSpend", "Total CSR Spend"),
                ],
            ),
        percentage("renewable_energy", "Renewable Energy Share", 8.0)
            .with_ideal_value(100.0)
            .with_ideal_range(50.0, 100.0)
            .with_description("Share of energy consumption from renewable sources.")
            .with_formula(
                "(Renewable Energy / Total Energy) x 100",
                &[
                    ("renewableEnergy", "Renewable Energy (MWh)"),
                    ("totalEnergy", "Total Energy (MWh)"),
                ],
            ),
        policy(
            "environmental_policy",
            "Does your organization have a formal environmental policy?",
            8.0,
        ),
        policy(
            "climate_risk_assessment",
            "Has your organization conducted a climate risk assessment?",
            7.0,
        ),
        policy(
            "emission_reduction_targets",
            "Does your organization have specific, time-bound emission reduction targets?",
            9.0,
        ),
    ]
}

// ============================================================================
// SOCIAL
// ============================================================================

fn social_questions() -> Vec<Question> {
    vec![
        percentage("gender_diversity_ratio", "What is your gender diversity ratio?", 8.0)
            .with_ideal_value(50.0)
            .with_ideal_range(40.0, 60.0)
            .with_description("Percentage of female employees in the organization.")
            .with_formula(
                "(Number of Female Employees / Total Employees) x 100",
                &[
                    ("femaleEmployees", "Number of Female Employees"),
                    ("totalEmployees", "Total Employees"),
                ],
            ),
        percentage(
            "employee_welfare_coverage",
            "What is your employee benefit coverage rate?",
            7.0,
        )
        .with_ideal_value(100.0)
        .with_ideal_range(80.0, 100.0)
        .with_description("Percentage of employees covered under all social benefits.")
        .with_formula(
            "(Employees Covered Under All Social Benefits / Total Employees) x 100",
            &[
                ("coveredEmployees", "Employees Covered Under Social Benefits"),
                ("totalEmployees", "Total Employees"),
            ],
        ),
        percentage(
            "training_skill_development",
            "What is your skill development coverage?",
            7.0,
        )
        .with_ideal_value(100.0)
        .with_ideal_range(70.0, 100.0)
        .with_description("Percentage of employees receiving skill training.")
        .with_formula(
            "(Employees Receiving Skill Training / Total Employees) x 100",
            &[
                ("trainedEmployees", "Employees Receiving Skill Training"),
                ("totalEmployees", "Total Employees"),
            ],
        ),
        percentage(
            "health_safety_coverage",
            "What is your occupational safety compliance rate?",
            9.0,
        )
        .with_ideal_value(100.0)
        .with_ideal_range(90.0, 100.0)
        .with_description("Percentage of employees covered under health & safety programs.")
        .with_formula(
            "(Employees Covered Under Health & Safety Programs / Total Employees) x 100",
            &[
                ("safetyCoveredEmployees", "Employees Covered Under Health & Safety"),
                ("totalEmployees", "Total Employees"),
            ],
        ),
        percentage("grievance_redressal", "What is your grievance resolution rate?", 6.0)
            .with_ideal_value(100.0)
            .with_ideal_range(80.0, 100.0)
            .with_description("Percentage of complaints resolved out of total received.")
            .with_formula(
                "(Complaints Resolved / Total Complaints Received) x 100",
                &[
                    ("resolvedComplaints", "Complaints Resolved"),
                    ("totalComplaints", "Total Complaints Received"),
                ],
            ),
        percentage(
            "differently_abled_inclusion",
            "What is your inclusion ratio for differently-abled employees?",
            7.0,
        )
        .with_ideal_value(7.0)
        .with_ideal_range(3.0, 10.0)
        .with_description("Percentage of differently-abled employees in the organization.")
        .with_formula(
            "(Differently-Abled Employees / Total Employees) x 100",
            &[
                ("differentlyAbledEmployees", "Differently-Abled Employees"),
                ("totalEmployees", "Total Employees"),
            ],
        ),
        percentage("csr_spend_index", "What is your CSR allocation rate?", 6.0)
            .with_ideal_value(5.0)
            .with_ideal_range(2.0, 10.0)
            .with_description("Percentage of net profit allocated to CSR activities.")
            .with_formula(
                "(CSR Spend / Net Profit) x 100",
                &[("csrSpend", "CSR Spend"), ("netProfit", "Net Profit")],
            ),
        percentage("parental_leave_return", "What is your parental leave return rate?", 6.0)
            .with_ideal_value(100.0)
            .with_ideal_range(80.0, 100.0)
            .with_description("Percentage of employees returning to work after parental leave.")
            .with_formula(
                "(Employees Returning to Work After Leave / Employees Taking Leave) x 100",
                &[
                    ("returningEmployees", "Employees Returning After Leave"),
                    ("leaveTakingEmployees", "Employees Taking Leave"),
                ],
            ),
    ]
}

// ============================================================================
// GOVERNANCE
// ============================================================================

fn governance_questions() -> Vec<Question> {
    vec![
        percentage("board_independence", "Board Independence", 10.0)
            .with_ideal_value(50.0)
            .with_ideal_range(50.0, 100.0)
            .with_description("Proportion of independent directors on the board.")
            .with_formula(
                "(Independent Directors / Total Board Size) x 100",
                &[
                    ("independent", "Number of Independent Directors"),
                    ("total", "Total Board Size"),
                ],
            ),
        Question::new("ceo_chair_separation", "CEO-Chair Separation", QuestionKind::Formula, 7.0)
            .with_envelope(0.0, 1.0)
            .with_step(1.0)
            .with_ideal_value(1.0)
            .with_ideal_range(1.0, 1.0)
            .with_description("Whether the roles of CEO and Chairperson are held by different people.")
            .with_formula(
                "Binary (1 if separated, 0 if combined)",
                &[("separated", "Roles Separated? (1 = Yes, 0 = No)")],
            ),
        percentage("board_diversity", "Board Diversity Score", 8.0)
            .with_ideal_value(60.0)
            .with_ideal_range(60.0, 100.0)
            .with_description("Composite of gender and experience diversity on the board.")
            .with_formula(
                "(Gender Diversity Score + Experience Diversity Score) / 2",
                &[
                    ("genderScore", "Gender Diversity Score"),
                    ("experienceScore", "Experience Diversity Score"),
                ],
            ),
        percentage("audit_committee_independence", "Audit Committee Independence", 9.0)
            .with_ideal_value(75.0)
            .with_ideal_range(75.0, 100.0)
            .with_description("Proportion of independent members on the audit committee.")
            .with_formula(
                "(Independent Members in Audit Committee / Total Committee Size) x 100",
                &[
                    ("independent", "Independent Committee Members"),
                    ("total", "Total Committee Size"),
                ],
            ),
        percentage(
            "executive_compensation_alignment",
            "Executive Compensation Alignment",
            8.0,
        )
        .with_ideal_value(50.0)
        .with_ideal_range(50.0, 100.0)
        .with_description("Share of executive pay linked to long-term performance.")
        .with_formula(
            "(Performance-Linked Compensation / Total Compensation) x 100",
            &[
                ("performanceLinked", "Performance-Linked Compensation Amount"),
                ("total", "Total Compensation Amount"),
            ],
        ),
        Question::new(
            "anti_corruption_practices",
            "Anti-Corruption Practices Score",
            QuestionKind::Formula,
            9.0,
        )
        .with_envelope(0.0, 4.0)
        .with_step(1.0)
        .with_ideal_value(3.0)
        .with_ideal_range(3.0, 4.0)
        .with_description(
            "Whistleblower policy, anti-bribery code, ethics training and third-party due diligence.",
        )
        .with_formula(
            "Sum of binary scores (1 point per implemented policy)",
            &[("implementedPolicies", "Number of Implemented Policies (0-4)")],
        ),
        Question::new(
            "shareholder_rights_index",
            "Shareholder Rights Index",
            QuestionKind::Formula,
            8.0,
        )
        .with_envelope(0.0, 4.0)
        .with_step(1.0)
        .with_ideal_value(4.0)
        .with_ideal_range(3.0, 4.0)
        .with_description(
            "Proxy access, one share-one vote, annual board elections and a transparent dividend policy.",
        )
        .with_formula(
            "Sum of binary scores (1 point per implemented protection)",
            &[("implementedProtections", "Number of Implemented Protections (0-4)")],
        ),
        percentage("controversy_score", "Controversy Score", 7.0)
            .with_ideal_value(85.0)
            .with_ideal_range(85.0, 100.0)
            .with_description("100 minus the weighted share of recent governance controversies.")
            .with_formula(
                "100 - (Sum of Weighted Controversy Scores / Maximum Possible Score) x 100",
                &[("controversyScore", "Calculated Controversy Score (0-100)")],
            ),
        percentage("ownership_concentration", "Ownership Concentration Risk", 7.0)
            .with_ideal_value(30.0)
            .with_ideal_range(0.0, 30.0)
            .with_description("Combined ownership of the top three shareholders. Lower is better.")
            .with_formula(
                "Sum of Top 3 Shareholder Ownership Percentages",
                &[("topThreeOwnership", "Combined Ownership of Top 3 Shareholders (%)")],
            ),
        percentage("related_party_transaction", "Related Party Transaction Risk", 8.0)
            .with_ideal_value(5.0)
            .with_ideal_range(0.0, 5.0)
            .with_description("Related-party transaction value relative to revenue. Lower is better.")
            .with_formula(
                "(Related Party Transactions Value / Total Revenue) x 100",
                &[
                    ("rptValue", "Related Party Transactions Value"),
                    ("totalRevenue", "Total Revenue"),
                ],
            ),
    ]
}

fn digital_governance_questions() -> Vec<Question> {
    let count = |id: &str, text: &str, weight: f64, formula: &str, input: (&str, &str)| {
        Question::new(id, text, QuestionKind::Formula, weight)
            .with_envelope(0.0, 100.0)
            .with_step(1.0)
            .with_ideal_range(5.0, 100.0)
            .with_formula(formula, &[input])
    };

    vec![
        percentage("ethical_business_conduct", "AI Compliance Check Completion", 9.0)
            .with_ideal_range(80.0, 100.0)
            .with_formula(
                "(Completed AI Compliance Checks / Total Scheduled Checks) x 100",
                &[
                    ("completed", "Completed Compliance Checks"),
                    ("total", "Total Scheduled Checks"),
                ],
            ),
        percentage("board_composition", "Independent & Diverse Board Composition", 8.0)
            .with_ideal_range(80.0, 100.0)
            .with_formula(
                "(Independent & Diverse Directors / Total Board Members) x 100",
                &[
                    ("independent", "Independent & Diverse Directors"),
                    ("total", "Total Board Members"),
                ],
            ),
        count(
            "shareholder_rights",
            "Digital Governance Disclosures per Quarter",
            6.0,
            "Total Digital Governance Disclosures / Quarter",
            ("disclosures", "Digital Disclosures This Quarter"),
        ),
        count(
            "risk_management",
            "AI Risk Assessments per Year",
            8.0,
            "Total AI Risk Assessments Conducted / Year",
            ("assessments", "Risk Assessments Conducted"),
        ),
        percentage("whistleblower_mechanism", "Independent Whistleblower Resolution", 7.0)
            .with_ideal_range(80.0, 100.0)
            .with_formula(
                "(Cases Resolved with Independent Review / Total Cases) x 100",
                &[("resolved", "Cases Resolved"), ("total", "Total Cases")],
            ),
        count(
            "stakeholder_engagement",
            "Verified Blockchain Stakeholder Reports per Year",
            6.0,
            "No. of Verified Blockchain Reports / Year",
            ("reports", "Verified Reports Published"),
        ),
        percentage("esg_oversight", "Automated ESG Compliance", 9.0)
            .with_ideal_range(80.0, 100.0)
            .with_formula(
                "(Automated Compliance Tasks / Total ESG Tasks) x 100",
                &[
                    ("automated", "Automated Compliance Tasks"),
                    ("total", "Total ESG Tasks"),
                ],
            ),
        Question::new("data_security", "AI-Driven Data Security", QuestionKind::Formula, 10.0)
            .with_envelope(0.0, 5.0)
            .with_ideal_value(5.0)
            .with_ideal_range(4.0, 5.0)
            .with_formula(
                "[(1 - (Data Breaches / Total Attempts)) x (AI Security Level / 5)] x 5",
                &[
                    ("breaches", "Data Breaches"),
                    ("attempts", "Total Intrusion Attempts"),
                    ("securityLevel", "AI Security Level (0-5)"),
                ],
            ),
    ]
}

// ============================================================================
// COMPREHENSIVE
// ============================================================================

fn comprehensive_questions() -> Vec<Question> {
    let slider = |id: &str, text: &str, min: f64, max: f64, step: f64, weight: f64| {
        Question::new(id, text, QuestionKind::Slider, weight)
            .with_envelope(min, max)
            .with_step(step)
    };

    vec![
        slider(
            "board_independence",
            "What percentage of your board members are independent directors?",
            0.0,
            100.0,
            5.0,
            6.0,
        )
        .with_ideal_value(75.0)
        .with_ideal_range(60.0, 100.0),
        policy(
            "ethics_policy",
            "Does your organization have a documented code of ethics or conduct?",
            6.0,
        ),
        policy(
            "risk_management",
            "Does your organization have a formal risk management framework?",
            5.0,
        ),
        Question::new(
            "carbon_emissions",
            "What are your annual carbon emissions in metric tons of CO2 equivalent per million dollars of revenue?",
            QuestionKind::Numeric,
            6.0,
        )
        .with_envelope(0.0, 1000.0)
        .with_step(1.0)
        .with_ideal_value(0.0)
        .with_ideal_range(0.0, 100.0),
        slider(
            "renewable_energy",
            "What percentage of your energy consumption comes from renewable sources?",
            0.0,
            100.0,
            5.0,
            5.0,
        )
        .with_ideal_value(100.0)
        .with_ideal_range(50.0, 100.0),
        policy(
            "environmental_policy",
            "Does your organization have a formal environmental policy?",
            5.0,
        ),
        slider(
            "workforce_diversity",
            "What percentage of your workforce represents gender diversity?",
            0.0,
            100.0,
            5.0,
            5.0,
        )
        .with_ideal_value(50.0)
        .with_ideal_range(40.0, 60.0),
        Question::new(
            "health_safety",
            "How many workplace safety incidents occurred in the past year per 100 employees?",
            QuestionKind::Numeric,
            6.0,
        )
        .with_envelope(0.0, 20.0)
        .with_step(0.1)
        .with_ideal_value(0.0)
        .with_ideal_range(0.0, 1.0),
        policy(
            "human_rights_policy",
            "Does your organization have a formal human rights policy?",
            6.0,
        ),
        policy(
            "esg_reporting",
            "Does your organization publish an annual ESG or sustainability report?",
            6.0,
        ),
        policy(
            "esg_targets",
            "Has your organization set specific, measurable ESG targets?",
            7.0,
        ),
        slider(
            "stakeholder_engagement",
            "On a scale of 1-10, how would you rate your stakeholder engagement on ESG issues?",
            1.0,
            10.0,
            1.0,
            5.0,
        )
        .with_ideal_value(10.0)
        .with_ideal_range(7.0, 10.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn all_builtin_catalogs_validate() {
        for domain in domains() {
            let catalog = builtin(domain);
            let rebuilt = Catalog::new(catalog.title(), catalog.questions().to_vec());
            assert!(rebuilt.is_ok(), "{domain} failed validation: {rebuilt:?}");
            assert!(!catalog.is_empty());
        }
    }

    #[test]
    fn domain_names_round_trip() {
        for domain in domains() {
            assert_eq!(domain.as_str().parse::<Domain>(), Ok(domain));
        }
        assert_eq!("GOV".parse::<Domain>(), Ok(Domain::Governance));
        assert!("finance".parse::<Domain>().is_err());
    }

    #[test]
    fn governance_and_digital_governance_are_separate() {
        let gov: HashSet<_> = builtin(Domain::Governance)
            .questions()
            .iter()
            .map(|q| q.id.clone())
            .collect();
        let digital: HashSet<_> = builtin(Domain::DigitalGovernance)
            .questions()
            .iter()
            .map(|q| q.id.clone())
            .collect();

        assert_eq!(gov.len(), 10);
        assert_eq!(digital.len(), 8);
        assert!(gov.is_disjoint(&digital));
    }

    #[test]
    fn every_builtin_formula_is_supported() {
        for domain in domains() {
            for q in builtin(domain).questions().iter().filter(|q| q.is_formula()) {
                assert!(
                    crate::formula::is_supported(&q.id),
                    "{} has no formula in the dispatch table",
                    q.id
                );
            }
        }
    }

    #[test]
    fn social_catalog_is_all_percentages() {
        let catalog = builtin(Domain::Social);
        assert_eq!(catalog.len(), 8);
        assert!(catalog
            .questions()
            .iter()
            .all(|q| q.is_formula() && q.envelope() == Some((0.0, 100.0))));
    }
}
