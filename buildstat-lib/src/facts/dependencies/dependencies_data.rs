use core::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DependenciesData {
    /// Third-party packages, sorted by name.
    pub packages: Vec<Package>,
}

/// A locked package and every version of it present in the lock file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Package {
    pub name: String,
    pub versions: Vec<String>,
}

impl Display for Package {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.name, self.versions.join(", "))
    }
}
