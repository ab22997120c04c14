//! Summary rows and their console / CSV / Markdown renderings.

use std::cmp::Ordering;
use std::fmt::Write as _;

use serde::Serialize;

use super::attribute::Attribution;

/// One function's share of the log, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuncSummary {
    pub name: String,
    pub total_s: f64,
    pub percent: f64,
    pub calls: usize,
    pub avg_s: f64,
}

/// Build rows sorted by total time descending, then name ascending.
pub fn build_summary(attr: &Attribution) -> Vec<FuncSummary> {
    let mut summary: Vec<FuncSummary> = attr
        .func_time
        .iter()
        .map(|(name, &total_s)| {
            let calls = attr.func_calls.get(name).copied().unwrap_or(0);
            let avg_s = if calls > 0 { total_s / calls as f64 } else { 0.0 };
            let percent = if attr.wall > 0.0 {
                total_s / attr.wall * 100.0
            } else {
                0.0
            };
            FuncSummary {
                name: name.clone(),
                total_s,
                percent,
                calls,
                avg_s,
            }
        })
        .collect();
    summary.sort_by(|a, b| {
        b.total_s
            .partial_cmp(&a.total_s)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    summary
}

/// Console table, top `top` rows.
pub fn render_console(summary: &[FuncSummary], wall: f64, top: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total wall time in log: {:.3} ms", wall * 1000.0);
    let _ = writeln!(out, "Function, Total_ms, Percent, Calls, Avg_ms_per_call");
    for row in summary.iter().take(top) {
        let _ = writeln!(
            out,
            "{},{:.3},{:.2}%,{},{:.3}",
            row.name,
            row.total_s * 1000.0,
            row.percent,
            row.calls,
            row.avg_s * 1000.0
        );
    }
    out
}

/// Full summary as CSV, higher precision than the console table.
pub fn render_csv(summary: &[FuncSummary]) -> String {
    let mut out = String::from("Function,Total_ms,Percent,Calls,Avg_ms_per_call\n");
    for row in summary {
        let _ = writeln!(
            out,
            "{},{:.6},{:.4},{},{:.6}",
            row.name,
            row.total_s * 1000.0,
            row.percent,
            row.calls,
            row.avg_s * 1000.0
        );
    }
    out
}

/// Top-N table as Markdown.
pub fn render_markdown(summary: &[FuncSummary], wall: f64, top: usize) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Total wall time in log: {:.3} ms\n",
        wall * 1000.0
    ));
    lines.push("| Rank | Function | Total (ms) | % of wall | Calls | Avg / call (ms) |".to_string());
    lines.push("|---:|---|---:|---:|---:|---:|".to_string());
    for (rank, row) in summary.iter().take(top).enumerate() {
        lines.push(format!(
            "| {} | {} | {:.3} | {:.2}% | {} | {:.3} |",
            rank + 1,
            row.name,
            row.total_s * 1000.0,
            row.percent,
            row.calls,
            row.avg_s * 1000.0
        ));
    }
    lines.join("\n")
}
