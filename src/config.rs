//! Resolved per-invocation configuration.
//!
//! Resolution order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (PROFILEPKG_*, native tool paths only)
//! 3. Built-in defaults (lowest priority)
//!
//! Everything is validated up front; any failed check aborts the run before
//! a single temporary file is staged.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::{PkgError, PkgResult};

/// Default item-name format string
pub const DEFAULT_NAME_FORMAT: &str = "%filename%";
/// Default installed path for the profile payload
pub const DEFAULT_INSTALLED_PATH: &str = "/usr/local/share";
/// Default installer pkg identifier prefix
pub const DEFAULT_PKG_PREFIX: &str = "com.github.makeprofilepkg";
/// Default destination subdirectory in the Munki repo
pub const DEFAULT_REPO_DESTINATION: &str = "profiles";

const DEFAULT_PKGBUILD: &str = "/usr/bin/pkgbuild";
const DEFAULT_MUNKIIMPORT: &str = "/usr/local/munki/munkiimport";
const DEFAULT_SECURITY: &str = "/usr/bin/security";

/// Paths to the native tools we shell out to.
///
/// Each path can be overridden through an environment variable, which is
/// what the integration tests use to substitute recording stubs.
#[derive(Debug, Clone)]
pub struct ToolPaths {
    pub pkgbuild: PathBuf,
    pub munkiimport: PathBuf,
    pub security: PathBuf,
}

impl ToolPaths {
    /// Resolve tool paths from the environment, falling back to the
    /// standard macOS locations.
    pub fn from_env() -> Self {
        Self {
            pkgbuild: env_path("PROFILEPKG_PKGBUILD", DEFAULT_PKGBUILD),
            munkiimport: env_path("PROFILEPKG_MUNKIIMPORT", DEFAULT_MUNKIIMPORT),
            security: env_path("PROFILEPKG_SECURITY", DEFAULT_SECURITY),
        }
    }
}

fn env_path(var: &str, default: &str) -> PathBuf {
    env::var_os(var)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Fully resolved and validated options for one invocation.
#[derive(Debug)]
pub struct Options {
    pub profile_path: PathBuf,
    pub munki_import: bool,
    pub repo_destination: String,
    pub output_dir: PathBuf,
    pub format_name: String,
    /// Always starts with exactly one '/'
    pub installed_path: String,
    pub pkg_prefix: String,
    pub username: Option<String>,
    pub version: Option<String>,
    pub delete_after_install: bool,
    pub sign: Option<String>,
    pub tools: ToolPaths,
}

impl Options {
    /// Validate CLI arguments against the environment and produce the
    /// resolved configuration. Any failure here is fatal.
    pub fn resolve(cli: Cli) -> PkgResult<Self> {
        let tools = ToolPaths::from_env();

        let (installed_path, added_slash) = normalize_installed_path(&cli.installed_path);
        if added_slash {
            eprintln!(
                "WARNING: Omitted leading slash for --installed-path {}, \
                 automatically adding one.",
                cli.installed_path
            );
        }

        require_executable(&tools.pkgbuild)?;
        if cli.munki_import {
            require_executable(&tools.munkiimport)?;
        }

        let output_dir = match cli.output_dir {
            Some(dir) => dir,
            None => env::current_dir()?,
        };
        require_writable_dir(&output_dir)?;

        Ok(Self {
            profile_path: cli.profile,
            munki_import: cli.munki_import,
            repo_destination: cli.munki_repo_destination,
            output_dir,
            format_name: cli.format_name,
            installed_path,
            pkg_prefix: cli.pkg_prefix,
            username: cli.username,
            version: cli.version,
            delete_after_install: cli.delete_after_install,
            sign: cli.sign,
            tools,
        })
    }
}

/// Ensure the installed path is absolute. Returns the normalized path and
/// whether a leading slash had to be added. Idempotent.
pub fn normalize_installed_path(path: &str) -> (String, bool) {
    if path.starts_with('/') {
        (path.to_string(), false)
    } else {
        (format!("/{path}"), true)
    }
}

fn require_executable(path: &Path) -> PkgResult<()> {
    if is_executable_file(path) {
        Ok(())
    } else {
        Err(PkgError::MissingExecutable {
            path: path.to_path_buf(),
        })
    }
}

fn is_executable_file(path: &Path) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

fn require_writable_dir(path: &Path) -> PkgResult<()> {
    // Probing with an actual temp file beats inspecting permission bits,
    // which lie under ACLs and read-only mounts.
    if path.is_dir() && tempfile::tempfile_in(path).is_ok() {
        Ok(())
    } else {
        Err(PkgError::OutputDirUnusable {
            path: path.to_path_buf(),
        })
    }
}
