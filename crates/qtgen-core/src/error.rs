//! Error type of the generator and its stable mapping to process exit codes.

use qtgen_config::ConfigurationError;
use qtgen_config::user_file::UserFileError;
use qtgen_project::ProjectError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error("Couldn't scan source files in {path:?}: {source}")]
    SourceScan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Couldn't write project file {path:?}: {source}")]
    ProjectFileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Couldn't write defines and include files ({path:?}): {source}")]
    DefinesAndIncludesWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Couldn't write .pro.user file {path:?}: {source}")]
    UserFileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    UserFile(#[from] UserFileError),

    #[error("Error while writing configuration file {path:?}: {source}")]
    ConfigurationWrite {
        path: PathBuf,
        #[source]
        source: ConfigurationError,
    },

    #[error("No valid configuration found at {path:?}. Run `qtgen configure` first.")]
    ConfigurationMissing { path: PathBuf },

    #[error("Couldn't load configuration file {path:?}: {source}")]
    ConfigurationLoad {
        path: PathBuf,
        #[source]
        source: ConfigurationError,
    },

    #[error("Build preset {path:?} is missing")]
    BuildPresetMissing { path: PathBuf },

    #[error("Error while reading build preset {path:?}: {source}")]
    BuildPresetRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Qt Creator executable not found")]
    QtCreatorNotFound,

    #[error("Failed to launch Qt Creator {path:?}: {source}")]
    QtCreatorLaunch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GenerateError>;

impl GenerateError {
    /// Process exit status for this failure. The values are stable so scripts
    /// can branch on them.
    pub fn exit_code(&self) -> i32 {
        match self {
            GenerateError::Project(err) => match err {
                ProjectError::EnginePathNotFound { .. } => 1,
                ProjectError::InvalidEnginePath { .. } => 2,
                ProjectError::DefinesOrIncludesRead { .. } => 3,
                ProjectError::ProjectFileRead { .. } => 5,
                ProjectError::ProjectFileNotFound { .. } | ProjectError::DirRead { .. } => 13,
            },
            GenerateError::ProjectFileWrite { .. } => 4,
            GenerateError::DefinesAndIncludesWrite { .. } => 6,
            GenerateError::UserFileWrite { .. } => 7,
            GenerateError::UserFile(err) => match err {
                UserFileError::Missing { .. } => 8,
                UserFileError::Io { .. } | UserFileError::Xml(_) => 9,
                UserFileError::EnvironmentIdNotFound => 10,
                UserFileError::ConfigurationIdNotFound => 11,
            },
            GenerateError::ConfigurationWrite { .. } => 12,
            GenerateError::BuildPresetMissing { .. } => 14,
            GenerateError::ConfigurationMissing { .. } | GenerateError::ConfigurationLoad { .. } => 15,
            GenerateError::BuildPresetRead { .. } => 16,
            GenerateError::SourceScan { .. } => 17,
            GenerateError::QtCreatorNotFound => 18,
            GenerateError::QtCreatorLaunch { .. } => 19,
        }
    }
}
