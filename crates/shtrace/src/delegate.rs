//! Delegate invocation: one fresh `bash -x` child per wrapped command line.

use std::ffi::OsString;
use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};

use crate::trace::TraceConfig;

/// Spawn `bash -x -- <argv...>` and block until it terminates.
///
/// The argument vector is forwarded unmodified and in order. Tracing is
/// requested explicitly (`-x` plus the config prefix on the child's
/// environment) rather than trusting inheritance alone. The child inherits
/// this process's stderr, so with a redirect guard installed its trace
/// lines and error output land in the trace log.
///
/// The returned status is the delegate's own; the caller decides how it
/// feeds into the wrapper's exit status.
pub fn run(config: &TraceConfig, argv: &[OsString]) -> Result<ExitStatus> {
    Command::new("bash")
        .arg("-x")
        .arg("--")
        .args(argv)
        .env("PS4", config.prefix.as_str())
        .status()
        .context("spawning delegate bash")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn delegate_receives_argv_unmodified() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("dump-args.sh");
        let out = dir.path().join("args.txt");
        fs::write(&script, format!("printf '%s\\n' \"$@\" > {}\n", out.display())).unwrap();

        let config = TraceConfig::new(dir.path().join("trace.log"));
        let argv = vec![
            script.clone().into_os_string(),
            OsString::from("one"),
            OsString::from("two words"),
            OsString::from("--flag"),
        ];
        let status = run(&config, &argv).unwrap();
        assert!(status.success());
        assert_eq!(fs::read_to_string(&out).unwrap(), "one\ntwo words\n--flag\n");
    }

    #[test]
    fn delegate_exit_status_is_observable() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("exit7.sh");
        fs::write(&script, "exit 7\n").unwrap();

        let config = TraceConfig::new(dir.path().join("trace.log"));
        let status = run(&config, &[script.into_os_string()]).unwrap();
        assert_eq!(status.code(), Some(7));
    }
}
