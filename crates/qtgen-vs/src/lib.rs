//! Visual Studio C++ project (`.vcxproj`) support.
//!
//! Unreal generates an NMake style `.vcxproj` per game module under
//! `Intermediate/ProjectFiles`. The defines, include paths and the build
//! command line (which names the engine installation) are read straight from
//! its property groups.

use qtgen_project::{Markers, ProjectDescriptor, ProjectFile, ProjectFileParser};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

pub const VCXPROJ_EXTENSION: &str = "vcxproj";

const DEFINE_MARKERS: Markers = Markers::new(
    "<NMakePreprocessorDefinitions>$(NMakePreprocessorDefinitions);",
    "</NMakePreprocessorDefinitions>",
);

const INCLUDE_MARKERS: Markers = Markers::new(
    "<NMakeIncludeSearchPath>$(NMakeIncludeSearchPath);",
    "</NMakeIncludeSearchPath>",
);

static ENGINE_PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<NMakeBuildCommandLine>"?(?P<path>.*)\\Engine\\Build\\BatchFiles\\Build\.bat"#)
        .expect("engine path pattern is a valid regex")
});

/// Parser for the `.vcxproj` Unreal generates for a game module.
#[derive(Debug, Clone)]
pub struct VcxParser {
    file: ProjectFile,
}

impl VcxParser {
    /// Number of `<ProjectConfiguration>` entries declared by the project.
    pub fn configuration_count(&self) -> usize {
        self.file.content().matches("<ProjectConfiguration ").count()
    }
}

impl ProjectFileParser for VcxParser {
    fn locate(descriptor: &ProjectDescriptor) -> PathBuf {
        descriptor
            .project_files_dir()
            .join(format!("{}.{VCXPROJ_EXTENSION}", descriptor.name()))
    }

    fn from_project_file(file: ProjectFile) -> Self {
        let parser = Self { file };
        tracing::debug!(
            "Parsed {} with {} configurations",
            parser.file.path().display(),
            parser.configuration_count()
        );
        parser
    }

    fn project_file(&self) -> &ProjectFile {
        &self.file
    }

    fn define_markers(&self) -> Markers {
        DEFINE_MARKERS
    }

    fn include_markers(&self) -> Markers {
        INCLUDE_MARKERS
    }

    fn engine_path_pattern(&self) -> &Regex {
        &ENGINE_PATH_PATTERN
    }
}
