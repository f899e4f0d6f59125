//! `munkiimport` invocation.

use std::path::Path;
use std::process::Command;

use crate::error::PkgResult;
use crate::pkgbuild::run_checked;

/// Floor passed as --minimum-os-version; first release with profile
/// support.
pub const MINIMUM_OS_VERSION: &str = "10.7";

/// Arguments for one non-interactive `munkiimport` run.
#[derive(Debug)]
pub struct ImportRequest<'a> {
    pub pkg_path: &'a Path,
    pub display_name: &'a str,
    pub description: &'a str,
    pub subdirectory: &'a str,
    pub uninstall_script: &'a Path,
    pub installcheck_script: &'a Path,
}

/// Register the built package in the Munki repo. A non-zero exit is a
/// propagated failure.
pub fn import(munkiimport_tool: &Path, req: &ImportRequest<'_>) -> PkgResult<()> {
    let mut cmd = Command::new(munkiimport_tool);
    cmd.arg("--nointeractive")
        .arg("--displayname")
        .arg(req.display_name)
        .arg("--description")
        .arg(req.description)
        .arg("--subdirectory")
        .arg(req.subdirectory)
        .arg("--uninstall-script")
        .arg(req.uninstall_script)
        .arg("--installcheck-script")
        .arg(req.installcheck_script)
        .arg("--minimum-os-version")
        .arg(MINIMUM_OS_VERSION)
        .arg(req.pkg_path);

    run_checked(cmd, "munkiimport")
}
