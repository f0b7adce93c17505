//! Launching Qt Creator, either to open a generated project or to make it
//! write a `.pro.user` file we can read the machine's ids from.

use crate::error::{GenerateError, Result};
use qtgen_config::Configuration;
use qtgen_config::user_file;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const EXECUTABLE_NAMES: &[&str] = &["qtcreator", "qtcreator.exe"];
const SCRATCH_PROJECT: &str = "qtgen_ids";

/// Resolve the Qt Creator executable, preferring an explicit path.
pub fn find_executable(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(GenerateError::QtCreatorNotFound)
        };
    }

    EXECUTABLE_NAMES
        .iter()
        .find_map(|name| which::which(name).ok())
        .ok_or(GenerateError::QtCreatorNotFound)
}

/// Open `pro_file` in Qt Creator without waiting for it.
pub fn open_project(executable: &Path, pro_file: &Path) -> Result<()> {
    tracing::info!("Opening {} in Qt Creator", pro_file.display());
    Command::new(executable)
        .arg(pro_file)
        .spawn()
        .map_err(|source| GenerateError::QtCreatorLaunch {
            path: executable.to_path_buf(),
            source,
        })?;
    Ok(())
}

/// Open a scratch project in Qt Creator and read the ids from the user file
/// it leaves behind once closed.
///
/// Blocks until Qt Creator exits. The project has to be configured with the
/// Unreal kit before closing the IDE.
pub fn discover_ids(executable: &Path) -> Result<Configuration> {
    let scratch = tempfile::Builder::new()
        .prefix("qtgen-")
        .tempdir()
        .map_err(|source| GenerateError::QtCreatorLaunch {
            path: executable.to_path_buf(),
            source,
        })?;
    let pro_file = scratch_project(scratch.path()).map_err(|source| {
        GenerateError::QtCreatorLaunch {
            path: executable.to_path_buf(),
            source,
        }
    })?;

    tracing::info!(
        "Waiting for Qt Creator to exit. Configure {} with your Unreal kit, then close Qt Creator.",
        pro_file.display()
    );
    let status = Command::new(executable)
        .arg(&pro_file)
        .status()
        .map_err(|source| GenerateError::QtCreatorLaunch {
            path: executable.to_path_buf(),
            source,
        })?;
    tracing::debug!("Qt Creator exited with {}", status);

    let user_file = user_file_for(&pro_file);
    Ok(user_file::read_ids_from_path(user_file)?)
}

fn scratch_project(dir: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join(format!("{SCRATCH_PROJECT}.pro"));
    fs::write(&path, "TEMPLATE = aux\n")?;
    Ok(path)
}

/// `<file>.pro` -> `<file>.pro.user`
pub fn user_file_for(pro_file: &Path) -> PathBuf {
    let mut name = pro_file.as_os_str().to_os_string();
    name.push(".user");
    PathBuf::from(name)
}
