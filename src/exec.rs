//! External command execution.
//!
//! Every probe that shells out goes through [`CommandRunner`] so tests can
//! substitute a scripted runner. The production [`SystemRunner`] wraps
//! `std::process::Command` and always receives the child's working
//! directory explicitly; the prober never mutates the process-global cwd.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// Captured result of one external command invocation.
#[derive(Debug, Clone, Default)]
pub struct CmdOutput {
    /// Captured standard output, decoded lossily.
    pub stdout: String,
    /// Captured standard error, decoded lossily.
    pub stderr: String,
    /// Exit code, if the process terminated normally. `None` means it was
    /// killed by a signal (Unix only).
    pub code: Option<i32>,
}

impl CmdOutput {
    /// Whether the command exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout with surrounding whitespace removed.
    pub fn trimmed_stdout(&self) -> &str {
        self.stdout.trim()
    }
}

/// The substitutable process-execution boundary.
///
/// A spawn failure (program not on the search path, working directory
/// gone) is an error; a nonzero exit is not. Callers decide what a
/// nonzero exit means for their probe.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CmdOutput>;
}

/// Production runner over `std::process::Command`.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CmdOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .with_context(|| format!("failed to execute {program}"))?;

        // Tool banners occasionally carry non-UTF-8 bytes; this is
        // diagnostic text, not data, so decode lossily.
        Ok(CmdOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        })
    }
}

// ---------------------------------------------------------------------------
// Test support
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
