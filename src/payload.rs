//! Payload staging.
//!
//! The pkg root is a temporary directory mirroring the eventual install
//! path, with the profile copied in. Ownership of the `TempDir` stays with
//! the pipeline so the tree is removed on every exit path.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::error::{PkgError, PkgResult};

/// Stage the profile under a fresh temporary root at `installed_path`.
pub fn stage(profile_path: &Path, installed_path: &str) -> PkgResult<TempDir> {
    let root = tempfile::tempdir()?;

    let dest_dir = root.path().join(installed_path.trim_start_matches('/'));
    fs::create_dir_all(&dest_dir)?;

    let file_name = profile_path
        .file_name()
        .ok_or_else(|| PkgError::MalformedProfile {
            path: profile_path.to_path_buf(),
            message: "path has no file name component".to_string(),
        })?;
    fs::copy(profile_path, dest_dir.join(file_name))?;

    Ok(root)
}
