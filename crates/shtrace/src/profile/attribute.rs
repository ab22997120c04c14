//! Time attribution: per-line deltas credited to the deepest active function.

use std::collections::HashMap;

use super::parse::TraceLine;

/// Bucket for time spent outside any recognized function scope.
pub const NO_FUNC: &str = "<no-func>";

/// Result of walking a parsed log.
#[derive(Debug, Default)]
pub struct Attribution {
    /// Total seconds credited to each function.
    pub func_time: HashMap<String, f64>,
    /// Entries counted per function (one per `name():` marker line).
    pub func_calls: HashMap<String, usize>,
    /// Last timestamp minus first, clamped at zero.
    pub wall: f64,
}

/// Walk the parsed lines, compute each line's delta to the next line and
/// credit it to the deepest active function at or above the line's depth.
///
/// A `name():` marker makes that function active at the marker's depth;
/// deeper lines without their own marker are credited to it. The final
/// line gets a zero delta. An empty input yields a zeroed attribution.
pub fn attribute_time(lines: &[TraceLine]) -> Attribution {
    let mut current_func_by_depth: HashMap<usize, String> = HashMap::new();
    let mut attr = Attribution::default();

    for (i, line) in lines.iter().enumerate() {
        if let Some(func) = &line.func {
            current_func_by_depth.insert(line.depth, func.clone());
            *attr.func_calls.entry(func.clone()).or_insert(0) += 1;
        }

        let dt = match lines.get(i + 1) {
            Some(next) => (next.ts - line.ts).max(0.0),
            None => 0.0,
        };

        let active = (1..=line.depth)
            .rev()
            .find_map(|d| current_func_by_depth.get(&d));
        let bucket = active.map_or(NO_FUNC, String::as_str);
        *attr.func_time.entry(bucket.to_string()).or_insert(0.0) += dt;
    }

    if let (Some(first), Some(last)) = (lines.first(), lines.last()) {
        attr.wall = (last.ts - first.ts).max(0.0);
    }
    attr
}
