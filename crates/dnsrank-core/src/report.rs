use chrono::SecondsFormat;

use crate::rank::RankReport;

// ---------------------------------------------------------------------------
// JSON export
// ---------------------------------------------------------------------------

/// Export a rank report as pretty-printed JSON.
pub fn export_json(report: &RankReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Export a rank report as CSV.
///
/// Produces a text document with:
/// - Leading comment lines (prefixed `#`) containing the report summary.
/// - A header row.
/// - One data row per ranked server; score cells are left empty for
///   entries that had nothing to evaluate.
pub fn export_csv(report: &RankReport) -> String {
    let mut out = String::new();

    out.push_str("# dnsrank report\n");
    out.push_str(&format!("# Report ID: {}\n", report.report_id.hyphenated()));
    out.push_str(&format!(
        "# Generated: {}\n",
        report.generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    ));
    out.push_str(&format!("# Servers ranked: {}\n", report.scored_len()));
    out.push_str(&format!(
        "# Without data: {}\n",
        report.entries.len() - report.scored_len()
    ));
    out.push('\n');

    out.push_str("rank,server,grade,total,successRate,errorRate,latency,qps\n");

    for entry in &report.entries {
        let server = csv_escape(&entry.server);
        match (entry.grade, entry.score) {
            (Some(grade), Some(score)) => {
                out.push_str(&format!(
                    "{},{},{},{:.2},{:.2},{:.2},{:.2},{:.2}\n",
                    entry.rank,
                    server,
                    grade,
                    score.total,
                    score.success_rate,
                    score.error_rate,
                    score.latency,
                    score.qps
                ));
            }
            _ => {
                out.push_str(&format!("{},{},,,,,,\n", entry.rank, server));
            }
        }
    }

    out
}

/// Wrap a field value in quotes and escape any embedded quotes.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// ---------------------------------------------------------------------------
// Text export
// ---------------------------------------------------------------------------

/// Export a rank report as a fixed-width text table.
///
/// Entries without a score render a `no data` marker in the total column
/// and dashes elsewhere.
pub fn export_text(report: &RankReport) -> String {
    let width = report
        .entries
        .iter()
        .map(|e| e.server.len())
        .max()
        .unwrap_or(0)
        .max(6);

    let mut out = String::new();
    out.push_str(&format!(
        "{:>4}  {:<width$}  {:>5}  {:>7}  {:>11}  {:>9}  {:>8}  {:>7}\n",
        "rank", "server", "grade", "total", "successRate", "errorRate", "latency", "qps",
    ));

    for entry in &report.entries {
        match (entry.grade, entry.score) {
            (Some(grade), Some(score)) => {
                out.push_str(&format!(
                    "{:>4}  {:<width$}  {:>5}  {:>7.2}  {:>11.2}  {:>9.2}  {:>8.2}  {:>7.2}\n",
                    entry.rank,
                    entry.server,
                    grade.to_string(),
                    score.total,
                    score.success_rate,
                    score.error_rate,
                    score.latency,
                    score.qps,
                ));
            }
            _ => {
                out.push_str(&format!(
                    "{:>4}  {:<width$}  {:>5}  {:>7}  {:>11}  {:>9}  {:>8}  {:>7}\n",
                    entry.rank, entry.server, "-", "no data", "-", "-", "-", "-",
                ));
            }
        }
    }

    out
}
