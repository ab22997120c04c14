//! Line-level parsing of xtrace logs.

use std::fs;
use std::io::Read;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

// Depth pluses, a timestamp with at least microsecond precision, then the
// traced text. Lines that do not match (e.g. the delegate's own stderr
// interleaved into the same sink) are skipped.
static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<pluses>\++)\s+(?P<ts>\d+\.\d{6,})\s+(?P<rest>.*)$").expect("static regex")
});

// Function marker like: name(): ...
static FUNC_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<name>[A-Za-z0-9_-]+)\(\):").expect("static regex"));

/// One parsed trace line.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceLine {
    /// Zero-based index into the raw log, for diagnostics.
    pub idx: usize,
    /// 1-based call depth (count of leading pluses).
    pub depth: usize,
    /// Epoch seconds.
    pub ts: f64,
    /// Function named by a `name():` marker in the traced text, if any.
    pub func: Option<String>,
    /// Traced text after the timestamp.
    pub rest: String,
}

/// Read a log from a path, or from stdin when `path` is `-`.
pub fn read_log(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading trace log from stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("reading trace log {path}"))
}

/// Parse every matching line; silently skip the rest.
pub fn parse_log(raw: &str) -> Vec<TraceLine> {
    let mut parsed = Vec::new();
    for (idx, line) in raw.lines().enumerate() {
        let Some(caps) = LINE_RE.captures(line) else {
            continue;
        };
        let depth = caps["pluses"].len();
        let Ok(ts) = caps["ts"].parse::<f64>() else {
            continue;
        };
        let rest = caps["rest"].to_string();
        let func = FUNC_MARKER_RE
            .captures(&rest)
            .map(|c| c["name"].to_string());
        parsed.push(TraceLine {
            idx,
            depth,
            ts,
            func,
            rest,
        });
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = "\
+ 1771756019.666704560 bash -x -- pacman
++ 1771756019.675013832 dirname pacman
not a trace line: plain stderr from the delegate
+ 1771756020.030635246 main
+ 1771756020.033911364 main(): setup
";

    #[test]
    fn parses_depth_timestamp_and_function_marker() {
        let lines = parse_log(SAMPLE);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].depth, 1);
        assert_eq!(lines[1].depth, 2);
        assert!((lines[1].ts - 1771756019.675013832).abs() < 1e-6);
        assert_eq!(lines[1].func, None);
        assert_eq!(lines[3].func.as_deref(), Some("main"));
        assert_eq!(lines[3].rest, "main(): setup");
        // The interleaved plain stderr line was skipped, indices are raw.
        assert_eq!(lines[2].idx, 3);
    }

    #[test]
    fn requires_at_least_microsecond_fraction() {
        assert!(parse_log("+ 1771756019.12345 coarse timestamp\n").is_empty());
        assert_eq!(parse_log("+ 1771756019.123456 fine enough\n").len(), 1);
    }

    #[test]
    fn empty_input_parses_to_nothing() {
        assert!(parse_log("").is_empty());
    }

    proptest! {
        #[test]
        fn roundtrips_generated_lines(
            depth in 1usize..6,
            secs in 1_000_000_000u64..2_000_000_000,
            nanos in 0u32..1_000_000_000,
            rest in "[a-z][a-z ]{0,30}",
        ) {
            let line = format!("{} {secs}.{nanos:09} {rest}", "+".repeat(depth));
            let parsed = parse_log(&line);
            prop_assert_eq!(parsed.len(), 1);
            prop_assert_eq!(parsed[0].depth, depth);
            prop_assert_eq!(&parsed[0].rest, &rest);
            let want = secs as f64 + nanos as f64 * 1e-9;
            prop_assert!((parsed[0].ts - want).abs() < 1e-3);
        }
    }
}
