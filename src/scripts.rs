//! Lifecycle script generation.
//!
//! Three independent script bodies: postinstall (runs inside the pkg),
//! uninstall and install-check (written next to the pkg for Munki).
//! Every interpolated value passes through [`sh_quote`]; nothing reaches a
//! script unquoted.
//!
//! The install-check exit codes are a Munki contract: 0 means "needs
//! install", 1 means "already correctly installed". Don't flip them.

use std::fs;
use std::path::Path;

use crate::error::PkgResult;

/// First-boot staging directory for profiles on a non-live target volume
pub const SETUP_DIR: &str = "/private/var/db/ConfigurationProfiles/Setup";

/// Sentinel removed so profiles in the Setup directory are re-evaluated
/// on next boot
pub const SETUP_SENTINEL: &str = ".profileSetupDone";

/// Quote a string for POSIX shell interpolation.
///
/// Strings made of clearly safe characters pass through bare; anything
/// else is single-quoted, with embedded single quotes rewritten as
/// `'\''`.
pub fn sh_quote(s: &str) -> String {
    fn is_safe(b: u8) -> bool {
        b.is_ascii_alphanumeric()
            || matches!(b, b'_' | b'-' | b'.' | b'/' | b'@' | b'%' | b'+' | b'=' | b':' | b',')
    }

    if !s.is_empty() && s.bytes().all(is_safe) {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}

/// Postinstall script body.
///
/// `$3` is the install target passed by the installer. On the live system
/// volume the profile is installed directly; on any other target it is
/// staged into the first-boot Setup directory and the sentinel removed so
/// the OS picks it up on next boot.
pub fn postinstall(
    installed_profile_path: &Path,
    profile_file_name: &str,
    username: Option<&str>,
    delete_after_install: bool,
) -> String {
    let installed = sh_quote(&installed_profile_path.to_string_lossy());
    let staged = sh_quote(&format!("{SETUP_DIR}/{profile_file_name}"));

    let mut user_opt = String::new();
    if let Some(username) = username {
        user_opt = format!(" -U {}", sh_quote(username));
    }

    let mut script = format!(
        r#"#!/bin/sh
if [ "$3" = "/" ] ; then
    /usr/bin/profiles -I -F {installed}{user_opt}
else
    /bin/mkdir -p "$3"{setup_dir}
    /bin/cp "$3"{installed} "$3"{staged}
    /bin/rm -f "$3"{sentinel}
fi
"#,
        setup_dir = sh_quote(SETUP_DIR),
        sentinel = sh_quote(&format!("{SETUP_DIR}/{SETUP_SENTINEL}")),
    );

    if delete_after_install {
        script.push_str(&format!("/bin/rm -f {installed}\n"));
    }
    script
}

/// Uninstall script body: three idempotent steps, each tolerant of an
/// already-removed target.
pub fn uninstall(
    profile_identifier: &str,
    installed_profile_path: &Path,
    pkg_identifier: &str,
) -> String {
    format!(
        r#"#!/bin/sh

/usr/bin/profiles -R -p {identifier}
/bin/rm -f {installed}
/usr/sbin/pkgutil --forget {pkg_id}
"#,
        identifier = sh_quote(profile_identifier),
        installed = sh_quote(&installed_profile_path.to_string_lossy()),
        pkg_id = sh_quote(pkg_identifier),
    )
}

/// Install-check script body. Exit 0 = needs install, exit 1 = correctly
/// installed at the expected version.
pub fn installcheck(version: &str, pkg_identifier: &str, profile_identifier: &str) -> String {
    format!(
        r#"#!/bin/bash

# The version of the package
PKG_VERSION={version}

# The identifier of the package
PKG_ID={pkg_id}

# The identifier of the profile
PROFILE_ID={profile_id}

# The version installed from pkgutil
VERSION_INSTALLED=`/usr/sbin/pkgutil --pkg-info "$PKG_ID" | grep version | sed 's/^[^:]*: //'`

if ( /usr/bin/profiles -P | /usr/bin/grep -q "$PROFILE_ID" ); then
    # Profile is present, check the version
    if [ "$VERSION_INSTALLED" = "$PKG_VERSION" ]; then
        # Correct version, all good
        exit 1
    else
        exit 0
    fi
else
    # Profile isn't there, need to install
    exit 0
fi
"#,
        version = sh_quote(version),
        pkg_id = sh_quote(pkg_identifier),
        profile_id = sh_quote(profile_identifier),
    )
}

/// Write a script and mark it executable.
pub fn write_executable(path: &Path, contents: &str) -> PkgResult<()> {
    fs::write(path, contents)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }
    Ok(())
}
