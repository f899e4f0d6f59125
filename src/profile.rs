//! Profile metadata extraction.
//!
//! A profile is a property list; signed profiles wrap that plist in a CMS
//! envelope that the plist decoder rejects. A decode failure is therefore
//! treated as "maybe signed" exactly once: we shell out to
//! `security cms -D` to strip the envelope and retry the decode. A second
//! failure is terminal.

use std::io::Cursor;
use std::path::Path;
use std::process::Command;

use crate::error::{PkgError, PkgResult};

/// The keys we consume from the profile plist.
#[derive(Debug, Clone)]
pub struct ProfileMetadata {
    /// `PayloadIdentifier`, required
    pub identifier: String,
    /// `PayloadDisplayName`, optional
    pub display_name: Option<String>,
    /// `PayloadDescription`, defaults to empty
    pub description: String,
}

/// Load profile metadata, falling back to the unsign path on decode failure.
pub fn load_metadata(path: &Path, security_tool: &Path) -> PkgResult<ProfileMetadata> {
    let value = match plist::Value::from_file(path) {
        Ok(value) => value,
        Err(err) => {
            eprintln!(
                "Profile is either malformed or signed. Attempting to \
                 unsign the profile. Message: {err}"
            );
            let decoded = unsign(path, security_tool)?;
            plist::Value::from_reader(Cursor::new(decoded)).map_err(|err| {
                PkgError::MalformedProfile {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                }
            })?
        }
    };
    metadata_from_value(path, &value)
}

/// Run `security cms -D -i <path>` and return the decoded plist bytes.
fn unsign(path: &Path, security_tool: &Path) -> PkgResult<Vec<u8>> {
    let output = Command::new(security_tool)
        .args(["cms", "-D", "-i"])
        .arg(path)
        .output()
        .map_err(|err| PkgError::UnsignFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    if !output.status.success() {
        eprintln!("Profile could not be unsigned.");
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PkgError::UnsignFailed {
            path: path.to_path_buf(),
            message: format!("security exited with {}: {}", output.status, stderr.trim()),
        });
    }
    Ok(output.stdout)
}

fn metadata_from_value(path: &Path, value: &plist::Value) -> PkgResult<ProfileMetadata> {
    let dict = value
        .as_dictionary()
        .ok_or_else(|| PkgError::MalformedProfile {
            path: path.to_path_buf(),
            message: "top-level plist value is not a dictionary".to_string(),
        })?;

    let identifier = dict
        .get("PayloadIdentifier")
        .and_then(plist::Value::as_string)
        .ok_or(PkgError::MissingPayloadIdentifier)?
        .to_string();

    let display_name = dict
        .get("PayloadDisplayName")
        .and_then(plist::Value::as_string)
        .map(ToString::to_string);

    let description = dict
        .get("PayloadDescription")
        .and_then(plist::Value::as_string)
        .unwrap_or_default()
        .to_string();

    Ok(ProfileMetadata {
        identifier,
        display_name,
        description,
    })
}
