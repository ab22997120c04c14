//! Run a command line under bash xtrace with stderr diverted to trace.log.
//!
//! Usage: trace-exec <script> [args...]
//!
//! All arguments are forwarded verbatim to a fresh `bash -x`; nothing is
//! parsed here. While the delegate runs, this process's stderr points at
//! `trace.log` in the working directory (truncated per run), so the
//! delegate's trace lines and its genuine stderr land there, interleaved
//! and untagged. Stdout is untouched. The wrapper exits with the
//! delegate's own status; setup and restore failures exit 1 with the
//! error on the restored stderr.

use std::env;
use std::ffi::OsString;
use std::process::{ExitCode, ExitStatus};

use anyhow::Result;
use shtrace::delegate;
use shtrace::redirect::StderrRedirect;
use shtrace::trace::{TraceConfig, TraceSession};
use shtrace::TRACE_LOG;

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            // The redirect guard has already restored stderr by this point.
            eprintln!("trace-exec: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<u8> {
    let argv: Vec<OsString> = env::args_os().skip(1).collect();
    let config = TraceConfig::new(TRACE_LOG);

    // Redirect before anything can trace; abort before spawning on failure.
    let redirect = StderrRedirect::install(&config.log_path)?;
    let session = TraceSession::enable(&config);
    let status = delegate::run(&config, &argv);
    // Trace off first, then restore, so the restore step is never traced.
    session.disable();
    redirect.restore()?;

    Ok(exit_code(status?))
}

// The delegate's status is captured before cleanup and becomes the
// wrapper's own exit status. Signal deaths have no code; map them to 1.
fn exit_code(status: ExitStatus) -> u8 {
    status
        .code()
        .and_then(|c| u8::try_from(c).ok())
        .unwrap_or(1)
}
