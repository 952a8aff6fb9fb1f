use super::Shell;
use camino::{Utf8Path, Utf8PathBuf};

/// Descriptive information about the project being measured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    name: String,
    description: String,
}

impl ProjectInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text description of the current run, e.g. a branch or build number.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Everything a provider may need while extracting its data.
#[derive(Debug, Clone)]
pub struct RunContext {
    project: ProjectInfo,
    root: Utf8PathBuf,
    shell: Shell,
}

impl RunContext {
    /// Create a context for a project rooted at `root`. Commands run through the context's shell
    /// start in `root`.
    #[must_use]
    pub fn new(project: ProjectInfo, root: impl Into<Utf8PathBuf>) -> Self {
        let root = root.into();
        Self {
            project,
            shell: Shell::new(root.clone()),
            root,
        }
    }

    #[must_use]
    pub const fn project(&self) -> &ProjectInfo {
        &self.project
    }

    #[must_use]
    pub const fn shell(&self) -> &Shell {
        &self.shell
    }

    /// Interpret `path` relative to the project root, leaving absolute paths alone.
    #[must_use]
    pub fn resolve(&self, path: &Utf8Path) -> Utf8PathBuf {
        if path.is_absolute() { path.to_path_buf() } else { self.root.join(path) }
    }
}
