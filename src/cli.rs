use std::path::PathBuf;

use clap::Parser;

use crate::config::{
    DEFAULT_INSTALLED_PATH, DEFAULT_NAME_FORMAT, DEFAULT_PKG_PREFIX, DEFAULT_REPO_DESTINATION,
};

/// profilepkg - build an installer package from a macOS configuration profile
///
/// Wraps a .mobileconfig file in a flat installer pkg whose postinstall
/// script installs the profile (directly on the boot volume, staged for
/// first boot otherwise), and writes matching uninstall and install-check
/// scripts. Optionally imports the result into a Munki repo.
#[derive(Parser, Debug)]
#[command(name = "profilepkg")]
#[command(author, about, long_about = None)]
pub struct Cli {
    /// Path to the mobileconfig file to package
    #[arg(value_name = "PROFILE")]
    pub profile: PathBuf,

    /// Import the resulting package into Munki
    #[arg(short = 'm', long = "munki-import")]
    pub munki_import: bool,

    /// Destination directory in the Munki repo
    #[arg(
        short = 'd',
        long = "munki-repo-destination",
        value_name = "SUBDIR",
        default_value = DEFAULT_REPO_DESTINATION
    )]
    pub munki_repo_destination: String,

    /// Output directory for the built package and the uninstall and
    /// install-check scripts. Must already exist. Defaults to the current
    /// working directory.
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Format string for the item name. Supported tokens are '%filename%'
    /// (name component of the file's basename) and '%id%' (the profile's
    /// PayloadIdentifier key); unknown tokens are left in place.
    #[arg(
        short = 'f',
        long = "format-name",
        value_name = "FORMAT-STRING",
        default_value = DEFAULT_NAME_FORMAT
    )]
    pub format_name: String,

    /// Installed path for the profile
    #[arg(
        short = 'p',
        long = "installed-path",
        value_name = "PATH",
        default_value = DEFAULT_INSTALLED_PATH
    )]
    pub installed_path: String,

    /// Installer pkg identifier prefix
    #[arg(long = "pkg-prefix", value_name = "PREFIX", default_value = DEFAULT_PKG_PREFIX)]
    pub pkg_prefix: String,

    /// Pass '-U <USERNAME>' to the `profiles` command in the postinstall
    /// script. Only supported on 10.11 and up; the package may fail to
    /// install on earlier OS versions.
    #[arg(short = 'U', value_name = "USERNAME")]
    pub username: Option<String>,

    /// Version of the built pkg. Defaults to 'YYYY.MM.DD' derived from
    /// today's date.
    #[arg(short = 'v', long = "version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Configure the postinstall script to remove the mobileconfig file
    /// after installation
    #[arg(long = "delete-after-install")]
    pub delete_after_install: bool,

    /// Sign the resulting package with the specified identity
    #[arg(long = "sign", value_name = "IDENTITY")]
    pub sign: Option<String>,
}
