//! Profiling of bash xtrace logs.
//!
//! Purpose
//! - Turn a timestamped xtrace log (as produced by the wrapper) into a
//!   per-function time attribution: which shell functions the wall time
//!   went to, how often they were entered, and the average per call.
//!
//! Method
//! - Best-effort, sampling-by-line approximation: each traced line's delta
//!   to the next line's timestamp is attributed to the deepest active
//!   function (latest `name():` marker) at or above that line's depth.
//!   Good for finding hotspots, not a precise profiler.
//!
//! Expected log shape (leading `+` count is 1-based call depth):
//!   + 1771756019.666704560 bash -x -- pacman
//!   ++ 1771756019.675013832 dirname pacman
//!   + 1771756020.030635246 main
//!   + 1771756020.033911364 main(): setup

mod attribute;
mod parse;
mod report;

pub use attribute::{attribute_time, Attribution, NO_FUNC};
pub use parse::{parse_log, read_log, TraceLine};
pub use report::{build_summary, render_console, render_csv, render_markdown, FuncSummary};
