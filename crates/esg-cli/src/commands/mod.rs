pub mod assess;
pub mod catalog;
pub mod config;
pub mod results;

use esg_core::Report;

/// Plain-text rendering of a report.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", report.title));
    out.push_str(&format!("Completed: {}\n", report.date_completed.to_rfc3339()));
    out.push_str(&format!("Mode: {}\n\n", report.mode));

    let width = report.items.iter().map(|item| item.id.len()).max().unwrap_or(0);
    for item in &report.items {
        let raw = item
            .raw
            .map_or_else(|| "-".to_string(), |raw| format!("{raw}"));
        out.push_str(&format!(
            "  {:<width$}  {:>10}  {}/5  x{:<5}  {:>6}\n",
            item.id,
            raw,
            item.score,
            item.weight,
            format!("{:.1}", item.weighted_contribution),
        ));
    }

    let summary = report.summary();
    out.push_str(&format!(
        "\nAnswered: {} of {}\n",
        summary.answered,
        summary.answered + summary.unanswered
    ));
    if !summary.weakest.is_empty() {
        out.push_str(&format!("Focus areas: {}\n", summary.weakest.join(", ")));
    }
    out.push_str(&format!(
        "Final score: {}/100 ({})\n{}\n",
        report.final_score,
        report.rating,
        report.rating.description()
    ));
    out
}
