//! Test fixtures for creating temporary projects.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use tempfile::TempDir;

/// Lock file types for package manager detection tests.
#[derive(Debug, Clone, Copy)]
pub enum LockfileType {
    Npm,
    Yarn,
    Pnpm,
}

impl LockfileType {
    /// File name of the lock file.
    pub fn filename(self) -> &'static str {
        match self {
            LockfileType::Npm => "package-lock.json",
            LockfileType::Yarn => "yarn.lock",
            LockfileType::Pnpm => "pnpm-lock.yaml",
        }
    }
}

/// Get a Command for the cross-run binary, isolated from user config.
pub fn cross_run(project: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("cross-run");
    cmd.current_dir(project)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", project.join(".xdg"))
        .env("HOME", project);
    cmd
}

/// Standard scripts used by most tests.
pub fn standard_scripts() -> Vec<(&'static str, &'static str)> {
    vec![
        ("build:css", "postcss src -o dist"),
        ("build:js", "tsc"),
        ("test", "jest"),
        ("lint", "eslint ."),
    ]
}

/// Create an empty temporary project directory.
pub fn create_empty_project() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Create a temporary project with the given scripts in package.json.
pub fn create_project(scripts: &[(&str, &str)]) -> TempDir {
    let dir = create_empty_project();
    write_package_json(dir.path(), scripts);
    dir
}

/// Create a project with scripts and a lock file.
pub fn create_project_with_lockfile(scripts: &[(&str, &str)], lockfile: LockfileType) -> TempDir {
    let dir = create_project(scripts);
    fs::write(dir.path().join(lockfile.filename()), "").expect("Failed to write lock file");
    dir
}

/// Write package.json with scripts in the given order.
pub fn write_package_json(dir: &Path, scripts: &[(&str, &str)]) {
    let entries: Vec<String> = scripts
        .iter()
        .map(|(name, command)| format!("    \"{name}\": \"{command}\""))
        .collect();
    let content = format!(
        "{{\n  \"name\": \"fixture\",\n  \"scripts\": {{\n{}\n  }}\n}}\n",
        entries.join(",\n")
    );
    fs::write(dir.join("package.json"), content).expect("Failed to write package.json");
}

/// Install a fake package manager into `<dir>/bin`.
///
/// The fake tool appends `<name> <args>` to `calls.log` in its working
/// directory and exits with the status in `FAKE_PM_EXIT` (default 0).
#[cfg(unix)]
pub fn install_fake_tool(dir: &Path, name: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let bin = dir.join("bin");
    fs::create_dir_all(&bin).expect("Failed to create bin directory");
    let tool = bin.join(name);
    fs::write(
        &tool,
        format!("#!/bin/sh\necho \"{name} $*\" >> calls.log\nexit ${{FAKE_PM_EXIT:-0}}\n"),
    )
    .expect("Failed to write fake tool");
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake tool executable");
    bin
}

/// `PATH` value with `bin` in front of the system directories.
#[cfg(unix)]
pub fn path_with(bin: &Path) -> String {
    format!("{}:/usr/bin:/bin", bin.display())
}

/// Lines written by fake tools, sorted.
pub fn read_calls(dir: &Path) -> Vec<String> {
    let mut calls: Vec<String> = fs::read_to_string(dir.join("calls.log"))
        .unwrap_or_default()
        .lines()
        .map(String::from)
        .collect();
    calls.sort();
    calls
}
