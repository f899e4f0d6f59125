//! Item and package naming.
//!
//! Every derived name is a pure function of the resolved options plus the
//! profile's payload identifier, computed once and used read-only after.
//! No sanitization happens here: the format string's output flows into
//! filenames and pkg identifiers verbatim, so supplying safe characters is
//! the caller's responsibility.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::Options;

/// Suffix stripped from the profile file name to form the `%filename%` token
const PROFILE_SUFFIX: &str = ".mobileconfig";

/// Names derived for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Names {
    /// Human-facing item name, result of format-string substitution
    pub item_name: String,
    /// `<item>-<version>.pkg`
    pub pkg_filename: String,
    /// `<prefix>.<item>`
    pub pkg_identifier: String,
    /// Absolute path the profile occupies once the pkg is installed
    pub installed_profile_path: PathBuf,
    /// File name of the profile inside the payload
    pub profile_file_name: String,
    /// Resolved pkg version
    pub version: String,
}

impl Names {
    pub fn resolve(opts: &Options, payload_identifier: &str) -> Self {
        let version = opts
            .version
            .clone()
            .unwrap_or_else(default_version);

        let basename = profile_basename(&opts.profile_path);
        let item_name = substitute_tokens(
            &opts.format_name,
            &[("filename", &basename), ("id", payload_identifier)],
        );

        let profile_file_name = opts
            .profile_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            pkg_filename: format!("{item_name}-{version}.pkg"),
            pkg_identifier: format!("{}.{item_name}", opts.pkg_prefix),
            installed_profile_path: Path::new(&opts.installed_path).join(&profile_file_name),
            profile_file_name,
            item_name,
            version,
        }
    }
}

/// Today's date as `YYYY.MM.DD`, the default pkg version.
pub fn default_version() -> String {
    Local::now().format("%Y.%m.%d").to_string()
}

/// Name component of the profile's basename: everything before the first
/// occurrence of `.mobileconfig`.
pub fn profile_basename(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.find(PROFILE_SUFFIX) {
        Some(idx) => name[..idx].to_string(),
        None => name,
    }
}

/// Substitute `%token%` occurrences from `vars`. Unknown tokens are left
/// in place literally; substitution never fails.
pub fn substitute_tokens(format: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(format.len());
    let mut rest = format;
    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('%') {
            Some(end) if end > 0 => {
                let token = &after[..end];
                if let Some((_, value)) = vars.iter().find(|(name, _)| *name == token) {
                    out.push_str(value);
                } else {
                    out.push('%');
                    out.push_str(token);
                    out.push('%');
                }
                rest = &after[end + 1..];
            }
            _ => {
                // Lone or doubled '%' with no token between: literal.
                out.push('%');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
