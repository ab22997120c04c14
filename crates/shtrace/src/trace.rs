//! Trace configuration and session state.
//!
//! Trace state is carried as an explicit typed value (`TraceConfig`) that
//! callers hand to the delegate invoker, rather than relying purely on
//! ambient inheritance. The session guard additionally exports the prefix
//! and `SHELLOPTS=xtrace` into this process's environment so any shell
//! child spawned while the session is live traces itself with the same
//! prefix convention.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Per-line xtrace prefix: epoch seconds with nanosecond fraction, then
/// `name(): ` when execution is inside a named function scope. Bash repeats
/// the leading `+` once per nesting depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracePrefix(String);

impl TracePrefix {
    /// The standard timestamped prefix. Expanded by the shell once per
    /// traced instruction, so the timestamp is evaluated at trace time.
    pub fn timestamped() -> Self {
        Self("+ $(date +%s.%N) ${FUNCNAME[0]:+${FUNCNAME[0]}(): }".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TracePrefix {
    fn default() -> Self {
        Self::timestamped()
    }
}

/// Where trace output goes and how each line is prefixed.
#[derive(Debug, Clone)]
pub struct TraceConfig {
    pub log_path: PathBuf,
    pub prefix: TracePrefix,
}

impl TraceConfig {
    pub fn new<P: AsRef<Path>>(log_path: P) -> Self {
        Self {
            log_path: log_path.as_ref().to_path_buf(),
            prefix: TracePrefix::timestamped(),
        }
    }
}

/// Scoped export of the trace prefix into the process environment.
///
/// While live, `PS4` holds the session prefix and `SHELLOPTS` carries
/// `xtrace`, so shell children trace themselves even when not asked to
/// explicitly. Dropping (or `disable`) restores the prior values, so the
/// steps after the session are never traced.
pub struct TraceSession {
    prior_ps4: Option<OsString>,
    prior_shellopts: Option<OsString>,
    disabled: bool,
}

impl TraceSession {
    pub fn enable(config: &TraceConfig) -> Self {
        let prior_ps4 = env::var_os("PS4");
        let prior_shellopts = env::var_os("SHELLOPTS");
        env::set_var("PS4", config.prefix.as_str());
        env::set_var("SHELLOPTS", with_xtrace(prior_shellopts.as_deref()));
        Self {
            prior_ps4,
            prior_shellopts,
            disabled: false,
        }
    }

    pub fn disable(mut self) {
        self.restore_env();
    }

    fn restore_env(&mut self) {
        if self.disabled {
            return;
        }
        match &self.prior_ps4 {
            Some(v) => env::set_var("PS4", v),
            None => env::remove_var("PS4"),
        }
        match &self.prior_shellopts {
            Some(v) => env::set_var("SHELLOPTS", v),
            None => env::remove_var("SHELLOPTS"),
        }
        self.disabled = true;
    }
}

impl Drop for TraceSession {
    fn drop(&mut self) {
        self.restore_env();
    }
}

fn with_xtrace(prior: Option<&std::ffi::OsStr>) -> OsString {
    match prior.and_then(|v| v.to_str()) {
        Some(opts) if !opts.is_empty() => {
            if opts.split(':').any(|o| o == "xtrace") {
                OsString::from(opts)
            } else {
                OsString::from(format!("{opts}:xtrace"))
            }
        }
        _ => OsString::from("xtrace"),
    }
}
