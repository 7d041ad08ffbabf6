//! # ESG Core Library
//!
//! Scoring engine for Environmental, Social and Governance questionnaires.
//! Catalogs are inert data; the same engine scores any authored set of
//! questions and produces a serializable report.
//!
//! ## Pipeline
//!
//! 1. **Catalog**: validated, immutable question schema ([`Catalog`])
//! 2. **Answers**: direct answers and formula operands per session ([`AnswerStore`])
//! 3. **Formula evaluator**: derives raw values from operands ([`formula::evaluate`])
//! 4. **Score mapper**: bins raw values onto 0-5 ([`BinningRule`])
//! 5. **Aggregator**: weighted 0-100 final score ([`aggregate()`])
//! 6. **Report builder**: immutable record for export ([`ReportBuilder`])
//!
//! Everything is synchronous and pure apart from the injected [`Clock`] and
//! the optional [`EngineConfig`] file.
//!
//! ```
//! use esg_core::{builtin, build_report, AnswerStore, Domain};
//! use chrono::Utc;
//!
//! let catalog = builtin(Domain::DigitalGovernance);
//! let mut answers = AnswerStore::new();
//! answers.set_operand(&catalog, "esg_oversight", "automated", 80.0).unwrap();
//! answers.set_operand(&catalog, "esg_oversight", "total", 100.0).unwrap();
//!
//! let report = build_report(&catalog, &answers, Utc::now());
//! assert_eq!(report.items.iter().find(|i| i.id == "esg_oversight").unwrap().score, 5);
//! ```

pub mod aggregate;
pub mod answers;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod formula;
pub mod report;
pub mod scale;

pub use aggregate::{aggregate, Aggregate, AggregationMode, Rating};
pub use answers::{AnswerSheet, AnswerStore};
pub use catalog::{builtin, domains, Catalog, Domain, Question, QuestionKind};
pub use config::EngineConfig;
pub use error::{AnswerError, CatalogError, ConfigError, CoreError, ExportError, Result};
pub use export::{ExportFormat, ResultsGate, RESULTS_PASSWORD};
pub use report::{build_report, Clock, FixedClock, Report, ReportBuilder, ReportSummary, ScoredItem, SystemClock};
pub use scale::{BinningRule, Direction};
