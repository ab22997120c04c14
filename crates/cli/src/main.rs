//! Profiler CLI: attribute time deltas in a bash xtrace log to functions.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use shtrace::profile::{
    attribute_time, build_summary, parse_log, read_log, render_console, render_csv,
    render_markdown,
};
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "shtrace-profile")]
#[command(about = "Attribute time deltas in a bash xtrace log to functions")]
struct Cmd {
    /// Path to trace log (or '-' for stdin)
    logfile: String,

    /// Rows to show in the console table
    #[arg(long, default_value_t = 15)]
    top: usize,

    /// Write the full function summary to CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the top-N table to Markdown
    #[arg(long)]
    md: Option<PathBuf>,

    /// Write the full summary to JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    run(Cmd::parse())
}

fn run(cmd: Cmd) -> Result<()> {
    let raw = read_log(&cmd.logfile)?;
    let parsed = parse_log(&raw);
    if parsed.is_empty() {
        bail!(
            "no matching lines found; ensure the trace has timestamps and \
             leading '+' depth markers"
        );
    }

    let attr = attribute_time(&parsed);
    let summary = build_summary(&attr);
    tracing::info!(lines = parsed.len(), functions = summary.len(), "parsed");

    print!("{}", render_console(&summary, attr.wall, cmd.top));

    if let Some(path) = &cmd.csv {
        fs::write(path, render_csv(&summary))
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote csv");
    }
    if let Some(path) = &cmd.md {
        fs::write(path, render_markdown(&summary, attr.wall, cmd.top))
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote markdown");
    }
    if let Some(path) = &cmd.json {
        let doc = serde_json::json!({
            "wall_s": attr.wall,
            "functions": summary,
        });
        fs::write(path, serde_json::to_vec_pretty(&doc)?)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote json");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cmd::command().debug_assert();
    }

    #[test]
    fn defaults_to_fifteen_rows() {
        let cmd = Cmd::parse_from(["shtrace-profile", "trace.log"]);
        assert_eq!(cmd.top, 15);
        assert!(cmd.csv.is_none() && cmd.md.is_none() && cmd.json.is_none());
    }

    #[test]
    fn writes_requested_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("trace.log");
        // Binary-exact fractions keep the fixed-precision renderings stable.
        fs::write(
            &log,
            "+ 10.000000000 main\n\
             + 10.250000000 main(): setup\n\
             + 10.750000000 main(): teardown\n",
        )
        .unwrap();

        let csv = dir.path().join("out.csv");
        let md = dir.path().join("out.md");
        let json = dir.path().join("out.json");
        run(Cmd {
            logfile: log.to_str().unwrap().to_string(),
            top: 15,
            csv: Some(csv.clone()),
            md: Some(md.clone()),
            json: Some(json.clone()),
        })
        .unwrap();

        let csv_out = fs::read_to_string(&csv).unwrap();
        assert!(csv_out.starts_with("Function,Total_ms,"));
        assert!(csv_out.contains("main,500.000000,"));

        let md_out = fs::read_to_string(&md).unwrap();
        assert!(md_out.contains("| 1 | main |"));

        let doc: serde_json::Value = serde_json::from_slice(&fs::read(&json).unwrap()).unwrap();
        assert!((doc["wall_s"].as_f64().unwrap() - 0.75).abs() < 1e-9);
        assert_eq!(doc["functions"][0]["name"], "main");
        assert_eq!(doc["functions"][0]["calls"], 2);
    }

    #[test]
    fn empty_log_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("trace.log");
        fs::write(&log, "nothing that parses\n").unwrap();
        let err = run(Cmd {
            logfile: log.to_str().unwrap().to_string(),
            top: 15,
            csv: None,
            md: None,
            json: None,
        })
        .unwrap_err();
        assert!(err.to_string().contains("no matching lines"));
    }
}
