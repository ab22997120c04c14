//! xtrace capture and profiling primitives.
//!
//! Two halves:
//! - Capture: redirect the process's stderr into a trace log, export an
//!   xtrace prefix, and delegate a command line to a fresh `bash -x`
//!   (`redirect`, `trace`, `delegate`).
//! - Analysis: parse the resulting log and attribute wall time to shell
//!   functions (`profile`).
//!
//! Known limitation: the delegate's genuine stderr output and the shell's
//! trace lines share one sink, interleaved with no origin tagging.

pub mod delegate;
pub mod profile;
pub mod redirect;
pub mod trace;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed trace artifact path, relative to the wrapper's working directory.
/// Created (truncated) on every invocation.
pub const TRACE_LOG: &str = "trace.log";
