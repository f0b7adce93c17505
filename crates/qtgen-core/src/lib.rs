//! Qt Creator project generation for Unreal Engine game modules.
//!
//! The pipeline is strictly linear: open the project file through a
//! [`ProjectFileParser`], write the `.pro` file, convert defines and include
//! paths into `defines.pri`/`includes.pri`, then resolve the engine path and
//! patch the build preset into the `.pro.user` file.

pub mod error;
pub mod generator;
pub mod preset;
pub mod pro_file;
pub mod qt_creator;

pub use error::{GenerateError, Result};
pub use generator::{GeneratedFiles, Generator};
pub use preset::{Placeholder, PresetValues, Substitutions, patch, patch_preset};

use qtgen_config::Configuration;
use qtgen_project::{ProjectDescriptor, ProjectFileParser};
use qtgen_vs::VcxParser;
use std::fs;
use std::io;
use std::path::Path;

/// File name of the build preset template shipped next to the executable.
pub const BUILD_PRESET_FILE: &str = "qtBuildPreset.xml";

/// Source project file formats the generator can read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectFormat {
    /// Visual Studio `.vcxproj` generated by the engine.
    #[default]
    VisualStudio,
}

impl ProjectFormat {
    /// Open the project file of `descriptor` with this format's parser.
    pub fn open(self, descriptor: ProjectDescriptor) -> qtgen_project::Result<Box<dyn ProjectFileParser>> {
        match self {
            ProjectFormat::VisualStudio => Ok(Box::new(VcxParser::open(descriptor)?)),
        }
    }
}

/// Read the build preset template at `path`.
pub fn load_preset(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            GenerateError::BuildPresetMissing {
                path: path.to_path_buf(),
            }
        } else {
            GenerateError::BuildPresetRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Load the configuration at `path`; a missing file is an error here.
pub fn load_configuration(path: impl AsRef<Path>) -> Result<Configuration> {
    let path = path.as_ref();
    match Configuration::load_optional(path) {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Err(GenerateError::ConfigurationMissing {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(GenerateError::ConfigurationLoad {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub fn save_configuration(config: &Configuration, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    config
        .save(path)
        .map_err(|source| GenerateError::ConfigurationWrite {
            path: path.to_path_buf(),
            source,
        })
}

/// Run the whole pipeline for the project in `root`.
pub fn generate(
    root: impl AsRef<Path>,
    format: ProjectFormat,
    config: &Configuration,
    preset_template: &str,
) -> Result<GeneratedFiles> {
    let descriptor = ProjectDescriptor::discover(root)?;
    tracing::info!(
        "Generating Qt Creator project for {} in {}",
        descriptor.name(),
        descriptor.root().display()
    );
    let parser = format.open(descriptor)?;
    Generator::new(parser.as_ref(), config).run(preset_template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtgen_project::ProjectError;
    use tempfile::tempdir;

    fn config() -> Configuration {
        Configuration::new(
            "{c6b6d2a4-1f0e-4b9c-9d3a-5e2f8a7b6c1d}".parse().unwrap(),
            "{0a1b2c3d-4e5f-6071-8293-a4b5c6d7e8f9}".parse().unwrap(),
        )
    }

    #[test]
    fn project_without_uproject_fails_before_extraction() {
        let dir = tempdir().unwrap();
        let project_files = dir.path().join("Intermediate").join("ProjectFiles");
        fs::create_dir_all(&project_files).unwrap();
        fs::write(project_files.join("Game.vcxproj"), "").unwrap();

        let err = generate(dir.path(), ProjectFormat::default(), &config(), "").unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Project(ProjectError::ProjectFileNotFound { .. })
        ));
        assert_eq!(err.exit_code(), 13);
        assert!(!project_files.join("Game.pro").exists());
    }

    #[test]
    fn missing_preset_and_configuration() {
        let dir = tempdir().unwrap();
        let preset = load_preset(dir.path().join(BUILD_PRESET_FILE)).unwrap_err();
        assert_eq!(preset.exit_code(), 14);

        let config = load_configuration(dir.path().join("config.toml")).unwrap_err();
        assert!(matches!(config, GenerateError::ConfigurationMissing { .. }));
        assert_eq!(config.exit_code(), 15);
    }

    #[test]
    fn configuration_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("qtgen").join("config.toml");
        save_configuration(&config(), &path).unwrap();
        assert_eq!(load_configuration(&path).unwrap(), config());
    }

    #[test]
    fn open_dispatches_to_format_parser() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Game.uproject"), "{}").unwrap();
        let project_files = dir.path().join("Intermediate").join("ProjectFiles");
        fs::create_dir_all(&project_files).unwrap();
        fs::write(
            project_files.join("Game.vcxproj"),
            "<NMakePreprocessorDefinitions>$(NMakePreprocessorDefinitions);A</NMakePreprocessorDefinitions>",
        )
        .unwrap();

        let descriptor = ProjectDescriptor::new(dir.path(), "Game").unwrap();
        let parser = ProjectFormat::VisualStudio.open(descriptor).unwrap();
        assert_eq!(parser.extract_defines().unwrap().tokens(), ["A"]);
        assert_eq!(parser.descriptor().name(), "Game");
    }
}
