//! The contract every source project-file format implements.
//!
//! Implementations only describe *where* things live in their format (file
//! location, region markers, engine path pattern). Extraction, conversion and
//! validation are shared by the default methods of [`ProjectFileParser`].

use crate::convert::{DEFINES_KEY, INCLUDEPATH_KEY, keyed_lines, split_tokens};
use crate::descriptor::ProjectDescriptor;
use crate::extract::Markers;
use crate::toolchain::{ToolchainError, ToolchainPath, resolve_toolchain_path};
use crate::{ProjectError, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Command line flag present in project files generated by launcher engine builds.
pub const LAUNCHER_TOKEN: &str = "-rocket";

/// Raw text of a source project file, loaded once.
#[derive(Debug, Clone)]
pub struct ProjectFile {
    descriptor: ProjectDescriptor,
    path: PathBuf,
    content: String,
}

impl ProjectFile {
    pub fn load(descriptor: ProjectDescriptor, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ProjectError::ProjectFileRead {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded project file {} ({} bytes)", path.display(), content.len());

        Ok(Self {
            descriptor,
            path: path.to_path_buf(),
            content,
        })
    }

    pub fn descriptor(&self) -> &ProjectDescriptor {
        &self.descriptor
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

macro_rules! token_set {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            tokens: Vec<String>,
        }

        impl $name {
            /// Split a raw `;` separated region into tokens.
            pub fn from_raw(raw: &str) -> Self {
                Self {
                    tokens: split_tokens(raw),
                }
            }

            pub fn tokens(&self) -> &[String] {
                &self.tokens
            }

            pub fn iter(&self) -> impl Iterator<Item = &str> {
                self.tokens.iter().map(|token| token.as_str())
            }

            pub fn len(&self) -> usize {
                self.tokens.len()
            }

            pub fn is_empty(&self) -> bool {
                self.tokens.is_empty()
            }
        }
    };
}

token_set!(
    /// Preprocessor defines taken from a project file, in file order.
    DefineSet
);
token_set!(
    /// Include search paths taken from a project file, in file order.
    IncludeSet
);

/// Which kind of engine installation the project was generated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildVariant {
    /// Pre-packaged engine installed through the launcher.
    Launcher,
    /// Engine built from source.
    Source,
}

pub trait ProjectFileParser {
    /// Path of the source project file for `descriptor`.
    fn locate(descriptor: &ProjectDescriptor) -> PathBuf
    where
        Self: Sized;

    fn from_project_file(file: ProjectFile) -> Self
    where
        Self: Sized;

    /// Load the project file for `descriptor`.
    ///
    /// The marker file is checked before anything is read.
    fn open(descriptor: ProjectDescriptor) -> Result<Self>
    where
        Self: Sized,
    {
        descriptor.ensure_exists()?;
        let path = Self::locate(&descriptor);
        let file = ProjectFile::load(descriptor, path)?;
        Ok(Self::from_project_file(file))
    }

    fn project_file(&self) -> &ProjectFile;

    /// Markers bounding the preprocessor define list.
    fn define_markers(&self) -> Markers;

    /// Markers bounding the include path list.
    fn include_markers(&self) -> Markers;

    /// Pattern with a `path` group capturing the engine root.
    fn engine_path_pattern(&self) -> &Regex;

    fn descriptor(&self) -> &ProjectDescriptor {
        self.project_file().descriptor()
    }

    fn content(&self) -> &str {
        self.project_file().content()
    }

    fn extract_defines(&self) -> Result<DefineSet> {
        let region = self
            .define_markers()
            .extract(self.content())
            .map_err(|source| ProjectError::DefinesOrIncludesRead {
                section: "defines",
                source,
            })?;
        Ok(DefineSet::from_raw(region))
    }

    fn extract_includes(&self) -> Result<IncludeSet> {
        let region = self
            .include_markers()
            .extract(self.content())
            .map_err(|source| ProjectError::DefinesOrIncludesRead {
                section: "includes",
                source,
            })?;
        Ok(IncludeSet::from_raw(region))
    }

    fn to_qt_defines(&self, defines: &DefineSet) -> String {
        keyed_lines(defines.iter(), DEFINES_KEY)
    }

    fn to_qt_includes(&self, includes: &IncludeSet) -> String {
        keyed_lines(includes.iter(), INCLUDEPATH_KEY)
    }

    fn engine_path(&self) -> Result<ToolchainPath> {
        let path = self.project_file().path().to_path_buf();
        resolve_toolchain_path(self.content(), self.engine_path_pattern()).map_err(|err| {
            match err {
                ToolchainError::PathNotFound => ProjectError::EnginePathNotFound { path },
                ToolchainError::InvalidPath { path: engine_path } => {
                    ProjectError::InvalidEnginePath { path, engine_path }
                }
            }
        })
    }

    fn is_launcher_build(&self) -> bool {
        self.content().contains(LAUNCHER_TOKEN)
    }

    fn build_variant(&self) -> BuildVariant {
        if self.is_launcher_build() {
            BuildVariant::Launcher
        } else {
            BuildVariant::Source
        }
    }
}
