//! Human-readable report output.
//!
//! The probe report is the program's product, so it goes to stdout;
//! fatal errors go to stderr in `main`. Styling is applied only when
//! stdout is a terminal, keeping redirected output clean for pasting
//! into bug reports. The `*_to_with_tty` variants take an explicit
//! writer and tty flag so tests can capture exact output.

use console::{Term, style};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

fn stdout_is_tty() -> bool {
    Term::stdout().is_term()
}

/// A `=== ... ===` section heading, bold cyan on a terminal.
pub fn heading_to_with_tty(w: &mut dyn Write, title: &str, is_tty: bool) {
    let text = format!("=== {title} ===");
    let line = if is_tty {
        style(text).bold().cyan().to_string()
    } else {
        text
    };
    let _ = writeln!(w, "{line}");
}

/// An unstyled report line. An empty `msg` produces a blank separator line.
pub fn line_to(w: &mut dyn Write, msg: &str) {
    let _ = writeln!(w, "{msg}");
}

/// An indented listing entry, dimmed on a terminal.
pub fn entry_to_with_tty(w: &mut dyn Write, name: &str, is_tty: bool) {
    let line = if is_tty {
        style(format!("  {name}")).dim().to_string()
    } else {
        format!("  {name}")
    };
    let _ = writeln!(w, "{line}");
}

/// A verbose-only line, dimmed on a terminal. No-op unless verbose
/// output is enabled.
pub fn detail_to_with_tty(w: &mut dyn Write, msg: &str, is_tty: bool) {
    if !is_verbose() {
        return;
    }
    let line = if is_tty {
        style(format!("  {msg}")).dim().to_string()
    } else {
        format!("  {msg}")
    };
    let _ = writeln!(w, "{line}");
}

pub fn is_stdout_tty() -> bool {
    stdout_is_tty()
}

pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
