use crate::{ProjectError, Result};
use std::ffi::OsStr;
use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Extension of the file that marks an Unreal project root.
pub const MARKER_EXTENSION: &str = "uproject";

/// Identifies one engine project on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    root: PathBuf,
    name: String,
    marker_path: PathBuf,
}

impl ProjectDescriptor {
    /// Describe the project `name` rooted at `root`; `<root>/<name>.uproject` must exist.
    ///
    /// A relative `root` is resolved against the working directory.
    pub fn new(root: impl AsRef<Path>, name: impl Into<String>) -> Result<Self> {
        let root = absolute_root(root.as_ref())?;
        let name = name.into();
        let marker_path = root.join(format!("{name}.{MARKER_EXTENSION}"));

        let descriptor = Self {
            root,
            name,
            marker_path,
        };
        descriptor.ensure_exists()?;
        Ok(descriptor)
    }

    /// Find the `.uproject` file in `root` and derive the project name from it.
    ///
    /// When several marker files are present the first by file name wins.
    pub fn discover(root: impl AsRef<Path>) -> Result<Self> {
        let root = &absolute_root(root.as_ref())?;
        let entries = fs::read_dir(root).map_err(|source| ProjectError::DirRead {
            path: root.to_path_buf(),
            source,
        })?;

        let mut markers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ProjectError::DirRead {
                path: root.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.extension() == Some(OsStr::new(MARKER_EXTENSION)) && path.is_file() {
                markers.push(path);
            }
        }
        markers.sort();

        let name = markers
            .first()
            .and_then(|path| path.file_stem())
            .and_then(|stem| stem.to_str())
            .map(|stem| stem.to_string())
            .ok_or_else(|| ProjectError::ProjectFileNotFound {
                path: root.join(format!("*.{MARKER_EXTENSION}")),
            })?;

        Self::new(root, name)
    }

    /// Fail with `ProjectFileNotFound` unless the marker file is present.
    pub fn ensure_exists(&self) -> Result<()> {
        if self.name.trim().is_empty() || !self.marker_path.is_file() {
            return Err(ProjectError::ProjectFileNotFound {
                path: self.marker_path.clone(),
            });
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn marker_path(&self) -> &Path {
        &self.marker_path
    }

    /// Project root rendered as text, always ending with a path separator.
    pub fn root_dir_string(&self) -> String {
        let mut root = self.root.to_string_lossy().to_string();
        if !root.ends_with(['/', '\\']) {
            root.push(MAIN_SEPARATOR);
        }
        root
    }

    /// `Intermediate/ProjectFiles`, where the IDE project files live.
    pub fn project_files_dir(&self) -> PathBuf {
        self.root.join("Intermediate").join("ProjectFiles")
    }

    /// `Source/<name>`, the game module's source tree.
    pub fn source_dir(&self) -> PathBuf {
        self.root.join("Source").join(&self.name)
    }
}

fn absolute_root(root: &Path) -> Result<PathBuf> {
    std::path::absolute(root).map_err(|source| ProjectError::DirRead {
        path: root.to_path_buf(),
        source,
    })
}
