use crate::error::{GenerateError, Result};
use crate::pro_file::{self, DEFINES_FILE, INCLUDES_FILE};
use crate::preset::{PresetValues, patch_preset};
use qtgen_config::Configuration;
use qtgen_project::ProjectFileParser;
use qtgen_workspace::{build_cs_display, build_cs_path, scan_sources};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Paths written by a full generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    pub pro_file: PathBuf,
    pub defines_file: PathBuf,
    pub includes_file: PathBuf,
    pub user_file: PathBuf,
}

/// Writes the Qt Creator project for one parsed engine project.
///
/// Every step fails fast. Files written by earlier steps stay on disk.
pub struct Generator<'a> {
    parser: &'a dyn ProjectFileParser,
    config: &'a Configuration,
    output_dir: PathBuf,
}

impl<'a> Generator<'a> {
    pub fn new(parser: &'a dyn ProjectFileParser, config: &'a Configuration) -> Self {
        Self {
            output_dir: parser.descriptor().project_files_dir(),
            parser,
            config,
        }
    }

    /// Directory receiving the generated files (`Intermediate/ProjectFiles` by default).
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn pro_file_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.pro", self.parser.descriptor().name()))
    }

    pub fn user_file_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.pro.user", self.parser.descriptor().name()))
    }

    /// Run every step: `.pro`, `defines.pri`/`includes.pri`, `.pro.user`.
    pub fn run(&self, preset_template: &str) -> Result<GeneratedFiles> {
        let pro_file = self.generate_pro_file()?;
        let (defines_file, includes_file) = self.generate_defines_and_includes()?;
        let user_file = self.generate_build_preset(preset_template)?;

        Ok(GeneratedFiles {
            pro_file,
            defines_file,
            includes_file,
            user_file,
        })
    }

    pub fn generate_pro_file(&self) -> Result<PathBuf> {
        let descriptor = self.parser.descriptor();
        tracing::info!("Generating .pro file...");

        let files = scan_sources(descriptor.root(), descriptor.name()).map_err(|source| {
            GenerateError::SourceScan {
                path: descriptor.source_dir(),
                source,
            }
        })?;
        let distfile = build_cs_path(descriptor.root(), descriptor.name())
            .map(|_| build_cs_display(descriptor.name()));
        let contents = pro_file::render(&files, distfile.as_deref());

        let path = self.pro_file_path();
        write_file(&path, &contents).map_err(|source| GenerateError::ProjectFileWrite {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Extract and convert both lists before writing either file.
    pub fn generate_defines_and_includes(&self) -> Result<(PathBuf, PathBuf)> {
        tracing::info!("Generating {DEFINES_FILE} and {INCLUDES_FILE}...");

        let defines = self.parser.extract_defines()?;
        let includes = self.parser.extract_includes()?;
        let defines_text = self.parser.to_qt_defines(&defines);
        let includes_text = self.parser.to_qt_includes(&includes);
        tracing::debug!(
            "Extracted {} defines and {} include paths",
            defines.len(),
            includes.len()
        );

        let defines_path = self.output_dir.join(DEFINES_FILE);
        let includes_path = self.output_dir.join(INCLUDES_FILE);
        for (path, contents) in [(&defines_path, &defines_text), (&includes_path, &includes_text)] {
            write_file(path, contents).map_err(|source| GenerateError::DefinesAndIncludesWrite {
                path: path.clone(),
                source,
            })?;
        }

        Ok((defines_path, includes_path))
    }

    pub fn generate_build_preset(&self, preset_template: &str) -> Result<PathBuf> {
        let descriptor = self.parser.descriptor();
        let engine_path = self.parser.engine_path()?;
        let variant = self.parser.build_variant();
        tracing::info!("Using engine at {} ({:?} build)", engine_path, variant);

        let values = PresetValues {
            project_name: descriptor.name().to_string(),
            project_dir: descriptor.root_dir_string(),
            uproject_file: descriptor.marker_path().to_string_lossy().to_string(),
            unreal_path: engine_path.to_string(),
            qt_env_id: self.config.qt_environment_id.to_string(),
            qt_conf_id: self.config.unreal_project_configuration_id.to_string(),
        };
        let contents = patch_preset(preset_template, &values, variant);

        let path = self.user_file_path();
        write_file(&path, &contents).map_err(|source| GenerateError::UserFileWrite {
            path: path.clone(),
            source,
        })?;
        tracing::info!("User file written to {}", path.display());
        Ok(path)
    }
}

fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}
