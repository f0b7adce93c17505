use std::cmp::Ordering;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

const SOURCE_EXTENSIONS: &[&str] = &["cpp"];
const HEADER_EXTENSIONS: &[&str] = &["h", "hpp"];

/// Prefix that makes module paths relative to `Intermediate/ProjectFiles`.
const PROJECT_FILES_PREFIX: &str = "../..";

/// Header and source files of a game module, as the `.pro` file lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFiles {
    pub headers: Vec<String>,
    pub sources: Vec<String>,
}

impl SourceFiles {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.sources.is_empty()
    }
}

/// Collect the `.h`/`.hpp` and `.cpp` files below `<root>/Source/<name>`.
///
/// Paths are rendered as `../../Source/<name>/...` with `/` separators.
/// Within a directory, subdirectories are listed before files, each group by
/// name. A missing source directory yields an empty result.
pub fn scan_sources(root: impl AsRef<Path>, name: &str) -> io::Result<SourceFiles> {
    let source_dir = source_dir(root, name);
    let mut files = SourceFiles::default();

    if !source_dir.is_dir() {
        tracing::warn!("Directory {} not found", source_dir.display());
        return Ok(files);
    }

    let walker = WalkDir::new(&source_dir).sort_by(compare_entries);
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if err.io_error().map(io::Error::kind) == Some(io::ErrorKind::PermissionDenied) {
                    continue;
                }
                return Err(err.into());
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(kind) = classify(entry.path()) else {
            continue;
        };
        let display = project_relative(&source_dir, name, entry.path());
        match kind {
            FileKind::Header => files.headers.push(display),
            FileKind::Source => files.sources.push(display),
        }
    }

    tracing::info!(
        "Found {} headers and {} sources in {}",
        files.headers.len(),
        files.sources.len(),
        source_dir.display()
    );
    Ok(files)
}

/// `<root>/Source/<name>/<name>.Build.cs`, if the module has one.
pub fn build_cs_path(root: impl AsRef<Path>, name: &str) -> Option<PathBuf> {
    let path = source_dir(root, name).join(format!("{name}.Build.cs"));
    path.is_file().then_some(path)
}

/// `../../Source/<name>/<name>.Build.cs`, relative to the project files directory.
pub fn build_cs_display(name: &str) -> String {
    format!("{PROJECT_FILES_PREFIX}/Source/{name}/{name}.Build.cs")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Header,
    Source,
}

fn classify(path: &Path) -> Option<FileKind> {
    let ext = path.extension()?.to_str()?;
    if SOURCE_EXTENSIONS.iter().any(|candidate| ext.eq_ignore_ascii_case(candidate)) {
        Some(FileKind::Source)
    } else if HEADER_EXTENSIONS.iter().any(|candidate| ext.eq_ignore_ascii_case(candidate)) {
        Some(FileKind::Header)
    } else {
        None
    }
}

fn source_dir(root: impl AsRef<Path>, name: &str) -> PathBuf {
    root.as_ref().join("Source").join(name)
}

fn project_relative(source_dir: &Path, name: &str, path: &Path) -> String {
    let relative = path.strip_prefix(source_dir).unwrap_or(path);
    let mut display = format!("{PROJECT_FILES_PREFIX}/Source/{name}");
    for component in relative.components() {
        display.push('/');
        display.push_str(&component.as_os_str().to_string_lossy());
    }
    display
}

fn compare_entries(a: &DirEntry, b: &DirEntry) -> Ordering {
    match (a.file_type().is_dir(), b.file_type().is_dir()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.file_name().cmp(b.file_name()),
    }
}
