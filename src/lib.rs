//! profilepkg - build installer packages from macOS configuration profiles
//!
//! Reads a .mobileconfig file, wraps it in a flat installer pkg built with
//! `pkgbuild`, generates postinstall/uninstall/install-check lifecycle
//! scripts, and optionally imports the result into a Munki repo with
//! `munkiimport`. Signed profiles are decoded through `security cms -D`
//! before their metadata is read.

pub mod cli;
pub mod config;
pub mod error;
pub mod munki;
pub mod naming;
pub mod payload;
pub mod pipeline;
pub mod pkgbuild;
pub mod profile;
pub mod scripts;

// Re-exports for convenience
pub use config::{Options, ToolPaths};
pub use error::{PkgError, PkgResult};
pub use naming::Names;
pub use pipeline::BuiltArtifacts;
pub use profile::ProfileMetadata;
