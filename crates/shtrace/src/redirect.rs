//! Process-wide stderr redirection with guaranteed restoration.
//!
//! The stderr slot (fd 2) is process-global state, so redirection is held
//! behind an RAII guard: `install` duplicates the current target into a
//! saved alias and rebinds fd 2 to the log file, `restore` rebinds fd 2 to
//! the alias and releases it. `Drop` restores best-effort so every exit
//! path (normal, error, panic) puts the original channel back.
//!
//! While the guard is installed, every stderr write by this process or any
//! child spawned without its own redirection lands in the log file.

use std::fs::File;
use std::io;
use std::os::fd::AsRawFd;
use std::path::Path;

use anyhow::{Context, Result};

fn cvt(ret: libc::c_int) -> io::Result<libc::c_int> {
    if ret == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(ret)
    }
}

/// Guard over the process's stderr slot. Exactly one alias of the original
/// target exists while the guard is live; zero after restore.
pub struct StderrRedirect {
    saved: libc::c_int,
    // Keeps the log fd open for the lifetime of the redirection.
    _log: File,
    restored: bool,
}

impl StderrRedirect {
    /// Duplicate the current stderr target, then rebind fd 2 to `log_path`
    /// (created/truncated). Fails without touching fd 2 if the log cannot
    /// be created, so a caller can abort before spawning any delegate.
    pub fn install(log_path: &Path) -> Result<Self> {
        let log = File::create(log_path)
            .with_context(|| format!("creating trace log {}", log_path.display()))?;
        let saved = cvt(unsafe { libc::dup(libc::STDERR_FILENO) })
            .context("duplicating original stderr")?;
        if let Err(err) = cvt(unsafe { libc::dup2(log.as_raw_fd(), libc::STDERR_FILENO) }) {
            unsafe { libc::close(saved) };
            return Err(err).context("rebinding stderr to trace log");
        }
        Ok(Self {
            saved,
            _log: log,
            restored: false,
        })
    }

    /// Rebind fd 2 back to the saved alias and release the alias. After
    /// this the trace log receives no further stderr writes.
    pub fn restore(mut self) -> Result<()> {
        let ret = cvt(unsafe { libc::dup2(self.saved, libc::STDERR_FILENO) });
        unsafe { libc::close(self.saved) };
        self.restored = true;
        ret.context("restoring original stderr")?;
        Ok(())
    }
}

impl Drop for StderrRedirect {
    fn drop(&mut self) {
        if !self.restored {
            unsafe {
                libc::dup2(self.saved, libc::STDERR_FILENO);
                libc::close(self.saved);
            }
        }
    }
}
