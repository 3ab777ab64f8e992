//! Compiler discovery via the platform path-lookup command.
//!
//! The Flutter Windows native build needs MSVC's `cl` on the search path.
//! Rather than walking `PATH` ourselves we ask the platform's own lookup
//! command, the same way a developer would at a shell prompt, so the
//! report shows exactly what their shell would resolve.

use crate::exec::CommandRunner;
use anyhow::Result;
use std::path::Path;

/// The compiler binary the native build toolchain needs.
pub const COMPILER_BINARY: &str = "cl";

/// Sentinel printed when the lookup command reports no match.
pub const NOT_FOUND: &str = "NOT FOUND";

/// The path-lookup command for the host platform.
pub fn lookup_program() -> &'static str {
    if cfg!(windows) { "where" } else { "which" }
}

/// Locate the compiler on the search path.
///
/// Returns the lookup command's trimmed stdout on success, or the fixed
/// [`NOT_FOUND`] sentinel when the lookup exits nonzero. Anything a
/// failing lookup printed is discarded; the sentinel is keyed off the
/// exit code alone.
pub fn locate_compiler(runner: &dyn CommandRunner, project_dir: &Path) -> Result<String> {
    let out = runner.run(lookup_program(), &[COMPILER_BINARY], project_dir)?;
    if out.success() {
        Ok(out.trimmed_stdout().to_string())
    } else {
        Ok(NOT_FOUND.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
