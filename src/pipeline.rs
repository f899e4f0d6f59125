//! The build pipeline.
//!
//! One linear pass per invocation: metadata, names, payload, scripts,
//! pkgbuild, optional Munki import. Temporary directories are owned here
//! and dropped (removed) on every exit path, including failures.

use std::path::PathBuf;

use crate::config::Options;
use crate::error::PkgResult;
use crate::munki::{self, ImportRequest};
use crate::naming::Names;
use crate::payload;
use crate::pkgbuild::{self, BuildRequest};
use crate::profile::{self, ProfileMetadata};
use crate::scripts;

/// Files produced by a successful run.
#[derive(Debug)]
pub struct BuiltArtifacts {
    pub pkg_path: PathBuf,
    pub uninstall_script: PathBuf,
    pub installcheck_script: PathBuf,
}

/// Run the whole pipeline. Exit-zero only when every step, native tools
/// included, succeeded.
pub fn run(opts: &Options) -> PkgResult<BuiltArtifacts> {
    // Metadata first: a malformed profile must fail before anything is
    // staged.
    let metadata = profile::load_metadata(&opts.profile_path, &opts.tools.security)?;
    let names = Names::resolve(opts, &metadata.identifier);

    let payload_root = payload::stage(&opts.profile_path, &opts.installed_path)?;

    let scripts_dir = tempfile::tempdir()?;
    let postinstall = scripts::postinstall(
        &names.installed_profile_path,
        &names.profile_file_name,
        opts.username.as_deref(),
        opts.delete_after_install,
    );
    scripts::write_executable(&scripts_dir.path().join("postinstall"), &postinstall)?;

    let pkg_path = opts.output_dir.join(&names.pkg_filename);
    pkgbuild::build(
        &opts.tools.pkgbuild,
        &BuildRequest {
            root: payload_root.path(),
            identifier: &names.pkg_identifier,
            version: &names.version,
            scripts_dir: scripts_dir.path(),
            sign_identity: opts.sign.as_deref(),
            output_path: &pkg_path,
        },
    )?;

    let uninstall_script = opts
        .output_dir
        .join(format!("{}_uninstall.sh", names.item_name));
    scripts::write_executable(
        &uninstall_script,
        &scripts::uninstall(
            &metadata.identifier,
            &names.installed_profile_path,
            &names.pkg_identifier,
        ),
    )?;

    let installcheck_script = opts
        .output_dir
        .join(format!("{}_installcheck.sh", names.item_name));
    scripts::write_executable(
        &installcheck_script,
        &scripts::installcheck(&names.version, &names.pkg_identifier, &metadata.identifier),
    )?;

    if opts.munki_import {
        import_into_munki(opts, &metadata, &names, &pkg_path, &uninstall_script, &installcheck_script)?;
    }

    Ok(BuiltArtifacts {
        pkg_path,
        uninstall_script,
        installcheck_script,
    })
}

fn import_into_munki(
    opts: &Options,
    metadata: &ProfileMetadata,
    names: &Names,
    pkg_path: &std::path::Path,
    uninstall_script: &std::path::Path,
    installcheck_script: &std::path::Path,
) -> PkgResult<()> {
    munki::import(
        &opts.tools.munkiimport,
        &ImportRequest {
            pkg_path,
            display_name: metadata.display_name.as_deref().unwrap_or(&names.item_name),
            description: &metadata.description,
            subdirectory: &opts.repo_destination,
            uninstall_script,
            installcheck_script,
        },
    )
}
