//! Test environment builder for isolated profilepkg testing.
//!
//! Provides `TestEnv` - temp directories for profiles, build output, and
//! stubbed native tools, plus helpers to run the profilepkg binary with
//! the PROFILEPKG_* tool-path overrides pointing at the stubs.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// A well-formed unsigned profile with all consumed keys present.
pub const CORP_PROFILE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>PayloadIdentifier</key>
    <string>com.example.corp</string>
    <key>PayloadDisplayName</key>
    <string>Corp Settings</string>
    <key>PayloadDescription</key>
    <string>Managed settings for corp machines</string>
</dict>
</plist>
"#;

/// A decodable profile lacking the required PayloadIdentifier key.
pub const NO_IDENTIFIER_PROFILE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>PayloadDisplayName</key>
    <string>Anonymous</string>
</dict>
</plist>
"#;

/// Bytes no plist decoder accepts.
pub const MALFORMED_PROFILE: &str = "this is not a property list";

/// Result of running a profilepkg CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated test environment with temp directories.
pub struct TestEnv {
    /// Holds input profiles
    pub work: TempDir,
    /// Output directory handed to -o
    pub output: TempDir,
    /// Stub native tools and their argument logs
    pub tools: TempDir,
    bin: PathBuf,
    env: Vec<(String, String)>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            work: TempDir::new().expect("work dir"),
            output: TempDir::new().expect("output dir"),
            tools: TempDir::new().expect("tools dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_profilepkg")),
            env: Vec::new(),
        }
    }

    /// Write a profile into the work dir and return its path.
    pub fn write_profile(&self, name: &str, body: &str) -> PathBuf {
        let path = self.work.path().join(name);
        fs::write(&path, body).expect("write profile");
        path
    }

    /// Install an executable stub script and point `var` at it.
    pub fn stub_tool(&mut self, var: &str, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.tools.path().join(name);
        fs::write(&path, body).expect("write stub");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod stub");
        self.env.push((var.to_string(), path.display().to_string()));
        path
    }

    /// Stub that records its arguments (one per line) and creates its
    /// final argument, mimicking a tool that writes an output file.
    pub fn recording_tool(&mut self, var: &str, name: &str) -> PathBuf {
        let log = self.log_path(name);
        let body = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\nfor last in \"$@\"; do :; done\n: > \"$last\"\n",
            log.display()
        );
        self.stub_tool(var, name, &body)
    }

    /// Stub that fails with the given exit code.
    pub fn failing_tool(&mut self, var: &str, name: &str, code: i32) -> PathBuf {
        self.stub_tool(var, name, &format!("#!/bin/sh\nexit {code}\n"))
    }

    /// Point `var` at a path without creating anything there.
    pub fn missing_tool(&mut self, var: &str) {
        self.env.push((
            var.to_string(),
            self.tools.path().join("missing").display().to_string(),
        ));
    }

    pub fn log_path(&self, name: &str) -> PathBuf {
        self.tools.path().join(format!("{name}.log"))
    }

    /// Arguments the named stub was invoked with, one per line.
    pub fn tool_log(&self, name: &str) -> String {
        fs::read_to_string(self.log_path(name)).unwrap_or_default()
    }

    pub fn output_path(&self, relative: &str) -> PathBuf {
        self.output.path().join(relative)
    }

    /// Run profilepkg with `-o <output>` appended.
    pub fn run(&self, args: &[&str]) -> TestResult {
        let mut full: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        full.push("-o".to_string());
        full.push(self.output.path().display().to_string());
        self.run_raw(&full.iter().map(String::as_str).collect::<Vec<_>>())
    }

    /// Run profilepkg with exactly the given arguments.
    pub fn run_raw(&self, args: &[&str]) -> TestResult {
        let output = Command::new(&self.bin)
            .args(args)
            .envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(self.work.path())
            .output()
            .expect("run profilepkg");

        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}
