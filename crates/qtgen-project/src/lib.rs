//! Reading engine project files and translating their build settings.
//!
//! This crate holds the format-independent half of the generator: locating the
//! project on disk, cutting marker-bounded regions out of a project file,
//! turning `;` lists into qmake statements and resolving the engine path. The
//! [`ProjectFileParser`] trait ties these together; each supported project
//! file format provides one implementation.

pub mod convert;
pub mod descriptor;
pub mod extract;
pub mod parser;
pub mod toolchain;

pub use convert::{DEFINES_KEY, INCLUDEPATH_KEY, to_keyed_lines};
pub use descriptor::ProjectDescriptor;
pub use extract::{MarkerNotFound, Markers, extract_between};
pub use parser::{BuildVariant, DefineSet, IncludeSet, LAUNCHER_TOKEN, ProjectFile, ProjectFileParser};
pub use toolchain::{ToolchainError, ToolchainPath, resolve_toolchain_path};

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating or reading a project.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("The .uproject file was not found: {path:?}")]
    ProjectFileNotFound { path: PathBuf },
    #[error("I/O error listing {path:?}: {source}")]
    DirRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("The project file {path:?} couldn't be read: {source}")]
    ProjectFileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("The {section} couldn't be retrieved from the project file: {source}")]
    DefinesOrIncludesRead {
        section: &'static str,
        #[source]
        source: MarkerNotFound,
    },
    #[error("Unreal Engine path not found in {path:?}")]
    EnginePathNotFound { path: PathBuf },
    #[error(
        "Invalid engine path {engine_path:?} found in {path:?}. Is the engine build this project was created with still installed?"
    )]
    InvalidEnginePath { path: PathBuf, engine_path: String },
}

pub type Result<T> = std::result::Result<T, ProjectError>;
