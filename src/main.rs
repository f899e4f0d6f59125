//! profilepkg CLI - build installer packages from macOS configuration
//! profiles
//!
//! Usage: profilepkg [options] path/to/mobileconfig/file

use anyhow::Result;
use clap::Parser;

use profilepkg::cli::Cli;
use profilepkg::config::Options;
use profilepkg::pipeline;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let opts = Options::resolve(cli)?;
    let artifacts = pipeline::run(&opts)?;

    println!("Built {}", artifacts.pkg_path.display());
    println!("Wrote {}", artifacts.uninstall_script.display());
    println!("Wrote {}", artifacts.installcheck_script.display());
    Ok(())
}
