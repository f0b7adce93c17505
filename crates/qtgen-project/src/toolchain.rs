use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory, relative to the engine root, holding the build scripts.
pub const BATCH_FILES_DIR: &str = "Engine/Build/BatchFiles";

/// File names accepted as proof that a directory is an engine root.
const BUILD_SCRIPTS: &[&str] = &["Build.bat", "build.bat", "Build.sh"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolchainError {
    #[error("no toolchain path found in project file")]
    PathNotFound,
    #[error("toolchain path {path:?} does not contain Engine/Build/BatchFiles/Build.bat")]
    InvalidPath { path: String },
}

/// Engine installation root with `/` separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainPath(String);

impl ToolchainPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }
}

impl fmt::Display for ToolchainPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ToolchainPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Capture the toolchain root from `text` using the `path` group of `pattern`
/// and check that it points at a real engine installation.
pub fn resolve_toolchain_path(text: &str, pattern: &Regex) -> Result<ToolchainPath, ToolchainError> {
    let captured = pattern
        .captures(text)
        .and_then(|caps| caps.name("path"))
        .map(|m| m.as_str())
        .ok_or(ToolchainError::PathNotFound)?;

    let normalized = normalize_separators(captured);
    if !has_build_script(Path::new(&normalized)) {
        return Err(ToolchainError::InvalidPath { path: normalized });
    }

    tracing::debug!("Resolved toolchain path: {}", normalized);
    Ok(ToolchainPath(normalized))
}

pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

fn has_build_script(root: &Path) -> bool {
    let dir = root.join(BATCH_FILES_DIR);
    BUILD_SCRIPTS.iter().any(|name| dir.join(name).is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn pattern() -> Regex {
        Regex::new(r#"<Cmd>"?(?P<path>.*)\\Engine\\Build\\BatchFiles\\Build.bat"#).unwrap()
    }

    fn fake_engine(root: &Path) {
        let dir = root.join(BATCH_FILES_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Build.bat"), "@echo off\n").unwrap();
    }

    #[test]
    fn resolves_and_validates_path() {
        let dir = tempdir().unwrap();
        fake_engine(dir.path());
        let root = dir.path().to_string_lossy().to_string();
        let text = format!(r#"<Cmd>"{root}\Engine\Build\BatchFiles\Build.bat" Game Win64</Cmd>"#);

        let path = resolve_toolchain_path(&text, &pattern()).unwrap();
        assert_eq!(path.as_str(), normalize_separators(&root));
        assert!(!path.as_str().contains('\\'));
    }

    #[test]
    fn rejects_path_without_build_script() {
        let dir = tempdir().unwrap();
        let root = dir.path().to_string_lossy().to_string();
        let text = format!(r#"<Cmd>{root}\Engine\Build\BatchFiles\Build.bat</Cmd>"#);

        let err = resolve_toolchain_path(&text, &pattern()).unwrap_err();
        assert!(matches!(err, ToolchainError::InvalidPath { .. }));
    }

    #[test]
    fn missing_match_is_reported() {
        let err = resolve_toolchain_path("<Cmd>make all</Cmd>", &pattern()).unwrap_err();
        assert_eq!(err, ToolchainError::PathNotFound);
    }

    #[test]
    fn backslashes_are_normalized() {
        assert_eq!(normalize_separators(r"C:\UE\4.20"), "C:/UE/4.20");
    }
}
