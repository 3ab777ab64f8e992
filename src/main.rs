//! fwdoctor: Flutter Windows build environment doctor.
//!
//! Probes the CMake/MSVC toolchain and the project's native build
//! artifacts, printing a human-readable report to stdout. The checks run
//! strictly in sequence; each receives the project directory explicitly
//! and the process working directory is never mutated.

use anyhow::{Result, bail};
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use fwdoctor::cmake;
use fwdoctor::config::{self, DoctorConfig};
use fwdoctor::exec::{CommandRunner, SystemRunner};
use fwdoctor::project;
use fwdoctor::report;
use fwdoctor::toolchain;

/// Host target triple baked in by build.rs.
const HOST_TARGET: &str = env!("TARGET");

/// Fallback printed when the native CMakeLists.txt is absent.
const CMAKE_FILE_FALLBACK: &str = "windows/CMakeLists.txt not found - run 'flutter create .' first";

/// Flutter Windows build environment doctor.
///
/// Checks that CMake and the MSVC compiler are reachable, smoke-tests the
/// project generator in a scratch directory, and inspects the project's
/// native build output and configuration. Paste the report into a bug
/// report as-is.
#[derive(Parser, Debug)]
#[command(
    name = "fwdoctor",
    version,
    about,
    after_help = "Examples:\n  fwdoctor\n  fwdoctor C:\\src\\my_app\n  fwdoctor --generator \"Visual Studio 16 2019\" --verbose"
)]
struct Cli {
    /// Flutter project directory to probe. Defaults to FWDOCTOR_PROJECT_DIR,
    /// then the config file, then the current directory.
    project_dir: Option<PathBuf>,

    /// CMake generator to smoke-test.
    #[arg(long)]
    generator: Option<String>,

    /// Print the underlying commands as they run.
    #[arg(long, short)]
    verbose: bool,
}

// ---------------------------------------------------------------------------
// Probe sequence
// ---------------------------------------------------------------------------

/// One-line report header: tool version, host platform, UTC timestamp.
fn write_report_header(w: &mut dyn Write) {
    let now = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown time".to_string());
    report::line_to(
        w,
        &format!("fwdoctor {} ({HOST_TARGET}) {now}", env!("CARGO_PKG_VERSION")),
    );
    report::line_to(w, "");
}

/// Execute every probe in order, writing the report to `w`.
///
/// Steps 1-2 (toolchain) and 3 (generator smoke test) abort the run if
/// their command cannot even be spawned; the artifact inspections (4-5)
/// recover from missing paths with informative fallbacks instead.
fn run_probe_inner(
    w: &mut dyn Write,
    is_tty: bool,
    runner: &dyn CommandRunner,
    project_dir: &Path,
    generator: &str,
) -> Result<()> {
    report::heading_to_with_tty(w, "Environment Check", is_tty);
    report::line_to(w, "");

    // Build tool version. The exit code is not consulted; whatever the
    // tool printed is the diagnostic.
    report::detail_to_with_tty(w, "$ cmake --version", is_tty);
    let version = cmake::query_version(runner, project_dir)?;
    report::line_to(w, &format!("cmake --version: {version}"));

    // Compiler lookup; nonzero exit becomes the NOT FOUND sentinel.
    let lookup = toolchain::lookup_program();
    report::detail_to_with_tty(w, &format!("$ {lookup} {}", toolchain::COMPILER_BINARY), is_tty);
    let located = toolchain::locate_compiler(runner, project_dir)?;
    report::line_to(
        w,
        &format!("{lookup} {}: {located}", toolchain::COMPILER_BINARY),
    );

    report::line_to(w, "");
    report::heading_to_with_tty(w, &format!("Testing CMake with {generator} generator"), is_tty);
    report::line_to(w, "");

    report::detail_to_with_tty(
        w,
        &format!(
            "$ cmake -G \"{generator}\" .  (in {})",
            cmake::scratch_dir(project_dir).display()
        ),
        is_tty,
    );
    let probe = cmake::generator_smoke_test(runner, project_dir, generator)?;
    report::line_to(w, &format!("STDOUT: {}", probe.stdout));
    report::line_to(w, &format!("STDERR: {}", probe.stderr));
    match probe.code {
        Some(code) => report::line_to(w, &format!("Exit code: {code}")),
        None => report::line_to(w, "Exit code: (terminated by signal)"),
    }

    report::line_to(w, "");
    report::heading_to_with_tty(w, "Flutter Windows Build Directory", is_tty);
    report::line_to(w, "");

    let build_dir = project::build_output_dir(project_dir);
    match project::list_build_output(project_dir)? {
        Some(entries) => {
            report::line_to(w, &format!("Build dir exists: {}", build_dir.display()));
            for name in &entries {
                report::entry_to_with_tty(w, name, is_tty);
            }
        }
        None => {
            report::line_to(
                w,
                &format!("Build dir does not exist yet: {}", build_dir.display()),
            );
        }
    }

    report::line_to(w, "");
    report::heading_to_with_tty(w, "Flutter Windows CMakeLists.txt", is_tty);
    report::line_to(w, "");

    match project::native_cmake_preview(project_dir)? {
        Some(preview) => report::line_to(w, &preview),
        None => report::line_to(w, CMAKE_FILE_FALLBACK),
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn run(cli: &Cli) -> Result<()> {
    let config = DoctorConfig::load()?;
    if cli.verbose || config.verbose.unwrap_or(false) {
        report::set_verbose(true);
    }

    let project_dir = config::resolve_project_dir(cli.project_dir.as_deref(), &config)?;
    if !project_dir.exists() {
        bail!("project directory does not exist: {}", project_dir.display());
    }
    let generator = config::resolve_generator(cli.generator.as_deref(), &config);

    let mut stdout = io::stdout();
    let is_tty = report::is_stdout_tty();
    write_report_header(&mut stdout);
    run_probe_inner(&mut stdout, is_tty, &SystemRunner, &project_dir, &generator)
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("fwdoctor: error: {e:#}");
        process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
