//! Rendering the qmake `.pro` file.

use qtgen_workspace::SourceFiles;

pub const DEFINES_FILE: &str = "defines.pri";
pub const INCLUDES_FILE: &str = "includes.pri";

const PREAMBLE: &str = "\
TEMPLATE = app
CONFIG += console
CONFIG -= app_bundle
CONFIG -= qt
CONFIG += c++11
";

/// Render the `.pro` file text for a game module.
///
/// `distfile` is listed under `DISTFILES` when present (the module's
/// `.Build.cs`, so it shows up in the project tree).
pub fn render(files: &SourceFiles, distfile: Option<&str>) -> String {
    let mut out = String::from(PREAMBLE);

    out.push('\n');
    out.push_str("# Engine defines of this project. Regenerate after upgrading the engine.\n");
    out.push_str(&format!("include({DEFINES_FILE})\n"));

    out.push('\n');
    out.push_str("# Qt Creator adds new headers and sources here when created through the IDE.\n");
    out.push_str(&variable("HEADERS", &files.headers));
    out.push_str(&variable("SOURCES", &files.sources));

    out.push('\n');
    out.push_str("# Include paths contain machine specific absolute paths, keep this file out of version control.\n");
    out.push_str(&format!("include({INCLUDES_FILE})\n"));

    if let Some(distfile) = distfile {
        out.push('\n');
        out.push_str(&variable("DISTFILES", &[distfile]));
    }

    out
}

/// `NAME += a \` / `\tb` continuation block, or a bare `NAME +=` when empty.
fn variable<S: AsRef<str>>(name: &str, values: &[S]) -> String {
    let mut out = format!("{name} +=");
    for (idx, value) in values.iter().enumerate() {
        if idx == 0 {
            out.push(' ');
        } else {
            out.push_str(" \\\n\t");
        }
        out.push_str(value.as_ref());
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files() -> SourceFiles {
        SourceFiles {
            headers: vec![
                "../../Source/MyGame/MyGame.h".into(),
                "../../Source/MyGame/Actor.h".into(),
            ],
            sources: vec!["../../Source/MyGame/MyGame.cpp".into()],
        }
    }

    #[test]
    fn lists_headers_and_sources() {
        let out = render(&files(), None);
        assert!(out.starts_with("TEMPLATE = app\n"));
        assert!(out.contains(
            "HEADERS += ../../Source/MyGame/MyGame.h \\\n\t../../Source/MyGame/Actor.h\n"
        ));
        assert!(out.contains("SOURCES += ../../Source/MyGame/MyGame.cpp\n"));
        assert!(!out.contains("DISTFILES"));
    }

    #[test]
    fn includes_both_pri_files_in_order() {
        let out = render(&files(), None);
        let defines = out.find("include(defines.pri)").unwrap();
        let headers = out.find("HEADERS +=").unwrap();
        let includes = out.find("include(includes.pri)").unwrap();
        assert!(defines < headers && headers < includes);
    }

    #[test]
    fn build_cs_goes_to_distfiles() {
        let out = render(&files(), Some("../../Source/MyGame/MyGame.Build.cs"));
        assert!(out.ends_with("DISTFILES += ../../Source/MyGame/MyGame.Build.cs\n"));
    }

    #[test]
    fn empty_lists_render_bare_assignment() {
        let out = render(&SourceFiles::default(), None);
        assert!(out.contains("HEADERS +=\nSOURCES +=\n"));
    }
}
