//! `assess`: score an answer sheet against a catalog.
//!
//! The catalog is either a built-in domain or an authored file (`.toml`, or
//! JSON otherwise). Options not given on the command line fall back to the
//! configuration file.

use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use esg_core::{
    builtin, export, AggregationMode, AnswerSheet, AnswerStore, Catalog, Clock, Domain, EngineConfig,
    ExportFormat, FixedClock, ReportBuilder, SystemClock,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Report JSON
    Json,
    /// "1234:" + base64(JSON), for the results viewer
    Envelope,
    /// Human-readable table
    Text,
}

#[derive(Args)]
pub struct AssessArgs {
    /// Built-in domain to assess against
    #[arg(conflicts_with = "catalog", required_unless_present = "catalog")]
    domain: Option<Domain>,
    /// Authored catalog file (JSON or TOML)
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Answer sheet (JSON)
    #[arg(short, long)]
    answers: PathBuf,
    /// Aggregation mode (binned or proportional)
    #[arg(long)]
    mode: Option<AggregationMode>,
    /// Report title (defaults to the catalog title)
    #[arg(long)]
    title: Option<String>,
    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
    /// Output file path (prints to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Completion timestamp (RFC 3339), defaults to now
    #[arg(long)]
    now: Option<DateTime<Utc>>,
}

pub fn run(args: AssessArgs, config: &EngineConfig) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = match (&args.catalog, args.domain) {
        (Some(path), _) => load_catalog(path)?,
        (None, Some(domain)) => builtin(domain),
        (None, None) => return Err("either a domain or --catalog is required".into()),
    };

    let sheet = AnswerSheet::from_json(&fs::read_to_string(&args.answers)?)?;
    let answers = AnswerStore::from_sheet(&catalog, &sheet)?;

    let title = args
        .title
        .or_else(|| config.report.title.clone())
        .unwrap_or_else(|| catalog.title().to_string());
    let mode = args.mode.unwrap_or(config.scoring.mode);
    let clock: Box<dyn Clock> = match args.now {
        Some(now) => Box::new(FixedClock(now)),
        None => Box::new(SystemClock),
    };

    let report = ReportBuilder::new(title)
        .with_mode(mode)
        .build(&catalog, &answers, clock.as_ref());

    let format = args.format.unwrap_or(match config.export.format {
        ExportFormat::Json => OutputFormat::Json,
        ExportFormat::Envelope => OutputFormat::Envelope,
    });
    let rendered = match format {
        OutputFormat::Json => export::seal(&report, ExportFormat::Json)?,
        OutputFormat::Envelope => export::seal(&report, ExportFormat::Envelope)?,
        OutputFormat::Text => super::render_text(&report),
    };

    match args.output {
        Some(path) => {
            fs::write(&path, &rendered)?;
            eprintln!("Report written to: {}", path.display());
            eprintln!("Final score: {}/100 ({})", report.final_score, report.rating);
        }
        None => println!("{}", rendered.trim_end()),
    }

    Ok(())
}

fn load_catalog(path: &Path) -> Result<Catalog, Box<dyn std::error::Error>> {
    debug!(path = %path.display(), "loading authored catalog");
    let content = fs::read_to_string(path)?;
    let catalog = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Catalog::from_toml(&content)?,
        _ => Catalog::from_json(&content)?,
    };
    Ok(catalog)
}
