//! `pkgbuild` invocation.

use std::path::Path;
use std::process::Command;

use crate::error::{PkgError, PkgResult};

/// Arguments for one `pkgbuild` run.
#[derive(Debug)]
pub struct BuildRequest<'a> {
    pub root: &'a Path,
    pub identifier: &'a str,
    pub version: &'a str,
    pub scripts_dir: &'a Path,
    pub sign_identity: Option<&'a str>,
    pub output_path: &'a Path,
}

/// Build the installer package. A non-zero exit from `pkgbuild` is a
/// propagated failure.
pub fn build(pkgbuild_tool: &Path, req: &BuildRequest<'_>) -> PkgResult<()> {
    let mut cmd = Command::new(pkgbuild_tool);
    cmd.arg("--root")
        .arg(req.root)
        .arg("--identifier")
        .arg(req.identifier)
        .arg("--version")
        .arg(req.version)
        .arg("--scripts")
        .arg(req.scripts_dir);
    if let Some(identity) = req.sign_identity {
        cmd.arg("--sign").arg(identity);
    }
    cmd.arg(req.output_path);

    run_checked(cmd, "pkgbuild")
}

/// Run a native tool to completion and turn a non-zero exit status into an
/// error.
pub(crate) fn run_checked(mut cmd: Command, tool: &str) -> PkgResult<()> {
    let status = cmd.status()?;
    if !status.success() {
        return Err(PkgError::ToolFailed {
            tool: tool.to_string(),
            status,
        });
    }
    Ok(())
}
