//! Package manager detection and validation.
//!
//! Resolves which package manager runs `npm:` script references:
//! 1. An explicit override (`npm`, `yarn` or `pnpm`), validated up front
//! 2. Lock file detection, in the order yarn, pnpm, npm
//! 3. Fallback to npm
//!
//! A package manager only counts as resolved when its executable is found
//! on the search path.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CrossRunError, Result};

/// Supported package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    /// Node Package Manager (npm)
    Npm,
    /// Yarn package manager
    Yarn,
    /// pnpm - Fast, disk space efficient package manager
    Pnpm,
}

impl PackageManager {
    /// Lock file detection order.
    pub const DETECTION_ORDER: [PackageManager; 3] =
        [PackageManager::Yarn, PackageManager::Pnpm, PackageManager::Npm];

    /// Get the executable name for this package manager.
    pub fn executable(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    /// Get the lock file name for this package manager.
    pub fn lock_file(&self) -> &'static str {
        match self {
            PackageManager::Npm => "package-lock.json",
            PackageManager::Yarn => "yarn.lock",
            PackageManager::Pnpm => "pnpm-lock.yaml",
        }
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.executable())
    }
}

impl std::str::FromStr for PackageManager {
    type Err = CrossRunError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "npm" => Ok(PackageManager::Npm),
            "yarn" => Ok(PackageManager::Yarn),
            "pnpm" => Ok(PackageManager::Pnpm),
            _ => Err(CrossRunError::InvalidPackageManager {
                name: s.to_string(),
            }),
        }
    }
}

/// A package manager together with the executable found for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackageManager {
    /// Which package manager this is.
    pub kind: PackageManager,
    /// Absolute path of the executable.
    pub path: PathBuf,
}

impl ResolvedPackageManager {
    /// The executable as it is handed to the shell.
    pub fn executable(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    /// Arguments that run `script` with `extra` appended.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use cross_run::package::{PackageManager, ResolvedPackageManager};
    ///
    /// let pm = ResolvedPackageManager { kind: PackageManager::Yarn, path: PathBuf::from("/usr/bin/yarn") };
    /// let extra = vec!["--watch".to_string()];
    /// assert_eq!(pm.run_args("test", &extra), vec!["run", "test", "--watch"]);
    /// ```
    pub fn run_args(&self, script: &str, extra: &[String]) -> Vec<String> {
        let mut args = vec!["run".to_string(), script.to_string()];
        args.extend(extra.iter().cloned());
        args
    }
}

/// Locates package managers on a search path.
#[derive(Debug, Clone)]
pub struct PackageManagerResolver {
    search_path: Option<OsString>,
    cwd: PathBuf,
}

impl PackageManagerResolver {
    /// Resolver over the process `PATH`.
    pub fn from_env(cwd: impl Into<PathBuf>) -> Self {
        Self {
            search_path: std::env::var_os("PATH"),
            cwd: cwd.into(),
        }
    }

    /// Resolver over an explicit search path (same syntax as `PATH`).
    pub fn with_search_path(search_path: impl Into<OsString>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            search_path: Some(search_path.into()),
            cwd: cwd.into(),
        }
    }

    /// Find the executable for a package manager on the search path.
    pub fn locate(&self, kind: PackageManager) -> Option<ResolvedPackageManager> {
        let search_path = self.search_path.as_ref()?;
        which::which_in(kind.executable(), Some(search_path), &self.cwd)
            .ok()
            .map(|path| ResolvedPackageManager { kind, path })
    }

    /// Detect the package manager for a project.
    ///
    /// Lock files are checked in the order `yarn.lock`, `pnpm-lock.yaml`,
    /// `package-lock.json`. The first one whose tool is on the search path
    /// wins. Without a usable lock file, npm is tried on its own. Returns
    /// `None` when nothing is available, which only becomes an error once
    /// an `npm:` command needs it.
    pub fn detect(&self, root: &Path) -> Option<ResolvedPackageManager> {
        for kind in PackageManager::DETECTION_ORDER {
            if !has_lock_file(root, kind) {
                continue;
            }
            match self.locate(kind) {
                Some(resolved) => {
                    debug!(
                        package_manager = %kind,
                        path = %resolved.path.display(),
                        "found {}",
                        kind.lock_file()
                    );
                    return Some(resolved);
                }
                None => debug!(
                    package_manager = %kind,
                    "{} present but {} is not on the search path",
                    kind.lock_file(),
                    kind.executable()
                ),
            }
        }

        let fallback = self.locate(PackageManager::Npm);
        match &fallback {
            Some(resolved) => debug!(path = %resolved.path.display(), "falling back to npm"),
            None => debug!("no package manager available"),
        }
        fallback
    }

    /// Validate an explicit override and locate it.
    ///
    /// # Errors
    ///
    /// Returns [`CrossRunError::InvalidPackageManager`] when `name` is not
    /// `npm`, `yarn` or `pnpm`. No lookup happens in that case.
    pub fn check_override(&self, name: &str) -> Result<Option<ResolvedPackageManager>> {
        let kind: PackageManager = name.parse()?;
        let resolved = self.locate(kind);
        debug!(
            package_manager = %kind,
            found = resolved.is_some(),
            "checked package manager override"
        );
        Ok(resolved)
    }
}

/// Check if a specific lock file exists in the project directory.
pub fn has_lock_file(project_dir: &Path, kind: PackageManager) -> bool {
    project_dir.join(kind.lock_file()).exists()
}
