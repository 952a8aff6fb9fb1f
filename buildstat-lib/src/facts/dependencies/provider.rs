use super::{DependenciesData, Package};
use crate::Result;
use crate::facts::{self, RunContext};
use crate::summary::{Direction, Summary};
use camino::Utf8PathBuf;
use ohno::IntoAppError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;

pub const DEFAULT_IDENTIFIER: &str = "Dependencies";

const LOG_TARGET: &str = "      deps";

#[derive(Debug, Deserialize)]
struct LockFile {
    #[serde(default)]
    package: Vec<LockedPackage>,
}

#[derive(Debug, Deserialize)]
struct LockedPackage {
    name: String,
    version: String,
    source: Option<String>,
}

/// Tracks the external packages pinned in a `Cargo.lock` file.
///
/// Workspace members have no `source` in the lock file and are left out.
#[derive(Debug, Clone)]
pub struct DependenciesProvider {
    identifier: String,
    lock_file: Utf8PathBuf,
}

impl DependenciesProvider {
    #[must_use]
    pub fn new(identifier: impl Into<String>, lock_file: impl Into<Utf8PathBuf>) -> Self {
        Self {
            identifier: identifier.into(),
            lock_file: lock_file.into(),
        }
    }
}

impl facts::Provider for DependenciesProvider {
    type Data = DependenciesData;

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn extract(&self, context: &RunContext) -> Result<DependenciesData> {
        let path = context.resolve(&self.lock_file);
        let text = fs::read_to_string(&path).into_app_err_with(|| format!("unable to read lock file '{path}'"))?;
        let lock: LockFile = toml::from_str(&text).into_app_err_with(|| format!("unable to parse lock file '{path}'"))?;

        let packages = collect_packages(lock);
        log::debug!(target: LOG_TARGET, "Found {} external package(s) in '{path}'", packages.len());

        Ok(DependenciesData { packages })
    }

    fn summarize(&self, current: &DependenciesData, previous: Option<&DependenciesData>) -> Summary {
        Summary::collection(
            "Dependencies",
            &current.packages,
            previous.map(|p| p.packages.as_slice()),
            |p| p.name.clone(),
            Direction::LowerIsBetter,
        )
    }
}

fn collect_packages(lock: LockFile) -> Vec<Package> {
    let mut by_name: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for p in lock.package.into_iter().filter(|p| p.source.is_some()) {
        by_name.entry(p.name).or_default().push(p.version);
    }

    by_name
        .into_iter()
        .map(|(name, mut versions)| {
            versions.sort();
            versions.dedup();
            Package { name, versions }
        })
        .collect()
}
