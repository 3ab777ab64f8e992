//! Local config file module for probe defaults.
//!
//! Persists optional defaults in `$HOME/.fwdoctor/config.toml` so the
//! doctor can be pointed at a project once and re-run bare afterwards.
//! Every value layers under its CLI flag and env var; the file is never
//! required.
//!
//! The config path intentionally uses a hardcoded `$HOME/.fwdoctor` base
//! on all platforms rather than platform-aware config directories. This
//! keeps the config path predictable across environments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the project directory.
pub const PROJECT_DIR_ENV_VAR: &str = "FWDOCTOR_PROJECT_DIR";

/// Environment variable overriding the CMake generator.
pub const GENERATOR_ENV_VAR: &str = "FWDOCTOR_GENERATOR";

/// Config root directory under `$HOME/`.
const CONFIG_DIR_NAME: &str = ".fwdoctor";

/// Config file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Persisted probe defaults.
///
/// All fields are optional; an absent file behaves like an empty one.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorConfig {
    /// Default project directory to probe when none is given on the CLI.
    pub project_dir: Option<String>,
    /// CMake generator to smoke-test instead of the built-in default.
    pub generator: Option<String>,
    /// Always run as if `--verbose` were passed.
    pub verbose: Option<bool>,
}

impl DoctorConfig {
    /// Resolve the config file path: `$HOME/.fwdoctor/config.toml`.
    ///
    /// Returns `None` if no home directory can be determined.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_path_with_home(home_dir()?.as_path())
    }

    /// Resolve the config file path relative to a given home directory.
    ///
    /// This is the internal implementation used by both production code
    /// and tests.
    fn config_path_with_home(home: &Path) -> Option<PathBuf> {
        Some(home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load config from disk. Returns defaults if the config file does not
    /// exist.
    ///
    /// Parse errors and I/O errors (other than file-not-found) are
    /// surfaced as hard failures to prevent silently probing the wrong
    /// project.
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Some(p) => p,
            None => return Ok(Self::default()),
        };
        Self::load_from(&path)
    }

    /// Load config from a specific path. Returns defaults if the file does
    /// not exist.
    fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("failed to parse config file at {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => {
                Err(e).with_context(|| format!("failed to read config file at {}", path.display()))
            }
        }
    }

    /// Save config to disk, creating parent directories if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("cannot determine config path: no home directory"))?;
        self.save_to(&path)
    }

    /// Save config to a specific path, creating parent directories if
    /// needed.
    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory at {}", parent.display())
            })?;
        }
        let contents = toml::to_string_pretty(self).context("failed to serialize config")?;
        std::fs::write(path, &contents)
            .with_context(|| format!("failed to write config file at {}", path.display()))?;
        Ok(())
    }
}

/// Resolve the effective project directory.
///
/// Layering, highest wins: CLI argument, `FWDOCTOR_PROJECT_DIR`, the
/// config file, the current directory.
pub fn resolve_project_dir(cli_arg: Option<&Path>, config: &DoctorConfig) -> Result<PathBuf> {
    if let Some(p) = cli_arg {
        return Ok(p.to_path_buf());
    }
    if let Ok(v) = std::env::var(PROJECT_DIR_ENV_VAR)
        && !v.trim().is_empty()
    {
        return Ok(PathBuf::from(v));
    }
    if let Some(p) = &config.project_dir
        && !p.trim().is_empty()
    {
        return Ok(PathBuf::from(p));
    }
    std::env::current_dir().context("failed to determine current directory")
}

/// Resolve the effective CMake generator.
///
/// Layering, highest wins: CLI flag, `FWDOCTOR_GENERATOR`, the config
/// file, [`crate::cmake::DEFAULT_GENERATOR`].
pub fn resolve_generator(cli_flag: Option<&str>, config: &DoctorConfig) -> String {
    if let Some(g) = cli_flag
        && !g.trim().is_empty()
    {
        return g.to_string();
    }
    if let Ok(g) = std::env::var(GENERATOR_ENV_VAR)
        && !g.trim().is_empty()
    {
        return g;
    }
    if let Some(g) = &config.generator
        && !g.trim().is_empty()
    {
        return g.clone();
    }
    crate::cmake::DEFAULT_GENERATOR.to_string()
}

fn home_dir() -> Option<PathBuf> {
    // HOME is authoritative on Unix; USERPROFILE covers stock Windows
    // shells where HOME is unset.
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()
        .map(PathBuf::from)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
