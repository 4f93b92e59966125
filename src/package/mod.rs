//! Package module for cross-run.
//!
//! Handles package manager detection, package.json script names and
//! glob matching of `npm:` script references.

mod manager;
mod manifest;
mod matcher;

pub use manager::{has_lock_file, PackageManager, PackageManagerResolver, ResolvedPackageManager};
pub use manifest::{parse_manifest, read_declared_scripts, Manifest, MANIFEST_FILE};
pub use matcher::{is_glob, match_scripts};
