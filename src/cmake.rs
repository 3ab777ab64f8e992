//! CMake probes: the version query and the generator smoke test.
//!
//! The smoke test answers one question in isolation: can CMake itself
//! produce project files for the configured generator, independent of the
//! Flutter tooling that normally drives it. It runs in a disposable
//! scratch directory under the project so the probe never touches the
//! project's real build tree.

use crate::exec::{CmdOutput, CommandRunner};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// The build tool every probe in this module shells out to.
pub const CMAKE_PROGRAM: &str = "cmake";

/// Generator handed to `cmake -G` unless overridden.
pub const DEFAULT_GENERATOR: &str = "Visual Studio 17 2022";

/// Name of the disposable smoke-test directory, directly under the
/// project directory.
pub const SCRATCH_DIR_NAME: &str = "cmake_test";

/// Minimal build description for the smoke test. The message directive
/// makes the configure log name the compiler CMake picked.
const SCRATCH_CMAKELISTS: &str = "cmake_minimum_required(VERSION 3.14)
project(test_project CXX)
message(STATUS \"C++ Compiler: ${CMAKE_CXX_COMPILER}\")
";

/// The scratch directory the smoke test runs in.
pub fn scratch_dir(project_dir: &Path) -> PathBuf {
    project_dir.join(SCRATCH_DIR_NAME)
}

/// Run `cmake --version` and return its stdout, trimmed.
///
/// The exit code is deliberately not consulted: whatever the tool printed
/// is the diagnostic. Only a spawn failure (cmake not installed at all)
/// is an error.
pub fn query_version(runner: &dyn CommandRunner, project_dir: &Path) -> Result<String> {
    let out = runner.run(CMAKE_PROGRAM, &["--version"], project_dir)?;
    Ok(out.trimmed_stdout().to_string())
}

/// Exercise the generator in a scratch directory and return the raw result.
///
/// Creates [`SCRATCH_DIR_NAME`] idempotently, writes the minimal
/// `CMakeLists.txt` into it, then invokes `cmake -G <generator> .` with
/// the scratch directory as the child's working directory. The captured
/// stdout, stderr, and exit code come back verbatim for the report.
///
/// The scratch directory is removed again before this function returns.
/// Removal is best effort, and also runs when the invocation itself
/// failed to spawn.
pub fn generator_smoke_test(
    runner: &dyn CommandRunner,
    project_dir: &Path,
    generator: &str,
) -> Result<CmdOutput> {
    let scratch = scratch_dir(project_dir);
    std::fs::create_dir_all(&scratch)
        .with_context(|| format!("failed to create scratch directory at {}", scratch.display()))?;

    let manifest = scratch.join("CMakeLists.txt");
    std::fs::write(&manifest, SCRATCH_CMAKELISTS)
        .with_context(|| format!("failed to write {}", manifest.display()))?;

    let result = runner.run(CMAKE_PROGRAM, &["-G", generator, "."], &scratch);

    // Unconditional cleanup; a failed probe must not leave the scratch
    // tree behind in the project.
    let _ = std::fs::remove_dir_all(&scratch);

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::testing::{ScriptedResult, ScriptedRunner};
    use anyhow::anyhow;
    use std::cell::RefCell;
    use tempfile::TempDir;

    #[test]
    fn version_is_trimmed_stdout() {
        let runner = ScriptedRunner::new(vec![ScriptedRunner::ok(
            "cmake version 3.28.1\n\nCMake suite maintained and supported by Kitware.\n",
            "",
            0,
        )]);
        let version = query_version(&runner, &std::env::temp_dir()).unwrap();
        assert_eq!(
            version,
            "cmake version 3.28.1\n\nCMake suite maintained and supported by Kitware."
        );
    }

    #[test]
    fn version_ignores_exit_code() {
        let runner = ScriptedRunner::new(vec![ScriptedRunner::ok("partial banner\n", "", 1)]);
        let version = query_version(&runner, &std::env::temp_dir()).unwrap();
        assert_eq!(version, "partial banner");
    }

    #[test]
    fn smoke_test_creates_and_removes_scratch_dir() {
        let project = TempDir::new().expect("failed to create temp dir");
        let runner = ScriptedRunner::new(vec![ScriptedRunner::ok("ok", "", 0)]);

        let out = generator_smoke_test(&runner, project.path(), DEFAULT_GENERATOR).unwrap();
        assert_eq!(out.code, Some(0));
        assert!(
            !scratch_dir(project.path()).exists(),
            "scratch dir must be gone after the probe"
        );
    }

    #[test]
    fn smoke_test_removes_preexisting_scratch_dir() {
        let project = TempDir::new().expect("failed to create temp dir");
        let scratch = scratch_dir(project.path());
        std::fs::create_dir_all(&scratch).unwrap();
        std::fs::write(scratch.join("stale.txt"), "left over from a crashed run").unwrap();

        let runner = ScriptedRunner::new(vec![ScriptedRunner::ok("ok", "", 0)]);
        generator_smoke_test(&runner, project.path(), DEFAULT_GENERATOR).unwrap();

        assert!(!scratch.exists(), "pre-existing scratch dir must also be removed");
    }

    #[test]
    fn smoke_test_cleans_up_even_when_spawn_fails() {
        let project = TempDir::new().expect("failed to create temp dir");
        let runner = ScriptedRunner::new(vec![ScriptedResult::SpawnFailure("cmake missing")]);

        let result = generator_smoke_test(&runner, project.path(), DEFAULT_GENERATOR);
        assert!(result.is_err());
        assert!(
            !scratch_dir(project.path()).exists(),
            "scratch dir must be removed before the error propagates"
        );
    }

    #[test]
    fn smoke_test_invokes_cmake_in_scratch_with_generator() {
        let project = TempDir::new().expect("failed to create temp dir");
        let runner = ScriptedRunner::new(vec![ScriptedRunner::ok("", "", 0)]);

        generator_smoke_test(&runner, project.path(), "Visual Studio 16 2019").unwrap();

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, CMAKE_PROGRAM);
        assert_eq!(
            calls[0].args,
            vec!["-G".to_string(), "Visual Studio 16 2019".to_string(), ".".to_string()]
        );
        assert_eq!(calls[0].cwd, scratch_dir(project.path()));
    }

    /// Runner that snapshots the manifest from its own cwd at invocation
    /// time, before cleanup erases it.
    struct ManifestCapture {
        seen: RefCell<Option<String>>,
    }

    impl crate::exec::CommandRunner for ManifestCapture {
        fn run(&self, _program: &str, _args: &[&str], cwd: &Path) -> anyhow::Result<CmdOutput> {
            let contents = std::fs::read_to_string(cwd.join("CMakeLists.txt"))
                .map_err(|e| anyhow!("manifest missing at invocation time: {e}"))?;
            *self.seen.borrow_mut() = Some(contents);
            Ok(CmdOutput {
                code: Some(0),
                ..Default::default()
            })
        }
    }

    #[test]
    fn smoke_test_writes_manifest_before_invoking_cmake() {
        let project = TempDir::new().expect("failed to create temp dir");
        let runner = ManifestCapture {
            seen: RefCell::new(None),
        };

        generator_smoke_test(&runner, project.path(), DEFAULT_GENERATOR).unwrap();

        let seen = runner.seen.borrow();
        let contents = seen.as_ref().expect("runner was never invoked");
        assert_eq!(
            contents,
            "cmake_minimum_required(VERSION 3.14)\n\
             project(test_project CXX)\n\
             message(STATUS \"C++ Compiler: ${CMAKE_CXX_COMPILER}\")\n"
        );
    }
}
