//! Reading the environment and kit ids out of a Qt Creator `.pro.user` file.

use crate::{Configuration, QtId};
use roxmltree::{Document, Node, ParsingOptions};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const ENVIRONMENT_ID_KEY: &str = "EnvironmentId";
const CONFIGURATION_ID_KEY: &str = "ProjectExplorer.ProjectConfiguration.Id";

#[derive(Debug, Error)]
pub enum UserFileError {
    #[error("No .pro.user file was generated at {path:?}")]
    Missing { path: PathBuf },
    #[error("Error while reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse .pro.user XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("Environment id not found in .pro.user file")]
    EnvironmentIdNotFound,
    #[error("Kit configuration id not found in .pro.user file")]
    ConfigurationIdNotFound,
}

pub type Result<T> = std::result::Result<T, UserFileError>;

/// Read both ids from the `.pro.user` file at `path`.
pub fn read_ids_from_path(path: impl AsRef<Path>) -> Result<Configuration> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            UserFileError::Missing {
                path: path.to_path_buf(),
            }
        } else {
            UserFileError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    read_ids(&contents)
}

/// Extract the environment id and the id of the first target's kit.
pub fn read_ids(contents: &str) -> Result<Configuration> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document = Document::parse_with_options(contents, options)?;

    let environment_id = environment_id(&document).ok_or(UserFileError::EnvironmentIdNotFound)?;
    let configuration_id =
        configuration_id(&document).ok_or(UserFileError::ConfigurationIdNotFound)?;

    Ok(Configuration::new(environment_id, configuration_id))
}

fn environment_id(document: &Document) -> Option<QtId> {
    for node in document.descendants().filter(Node::is_element) {
        match node.tag_name().name() {
            // <data><variable>EnvironmentId</variable><value>{...}</value></data>
            "data" => {
                let is_environment = node
                    .children()
                    .find(|child| child.has_tag_name("variable"))
                    .and_then(|variable| variable.text())
                    .map(|text| text.trim() == ENVIRONMENT_ID_KEY)
                    .unwrap_or(false);
                if !is_environment {
                    continue;
                }
                let value = node
                    .children()
                    .find(|child| child.has_tag_name("value"))
                    .and_then(|value| value.text())
                    .and_then(|text| QtId::parse(text.trim()).ok());
                if value.is_some() {
                    return value;
                }
            }
            "value" if node.attribute("key") == Some(ENVIRONMENT_ID_KEY) => {
                if let Some(id) = node.text().and_then(|text| QtId::parse(text.trim()).ok()) {
                    return Some(id);
                }
            }
            _ => {}
        }
    }
    None
}

fn configuration_id(document: &Document) -> Option<QtId> {
    document
        .descendants()
        .filter(|node| node.has_tag_name("value"))
        .filter(|node| node.attribute("key") == Some(CONFIGURATION_ID_KEY))
        .filter_map(|node| node.text())
        .find_map(|text| QtId::parse(text.trim()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const USER_FILE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE QtCreatorProject>
<qtcreator>
 <data>
  <variable>EnvironmentId</variable>
  <value type="QByteArray">{c6b6d2a4-1f0e-4b9c-9d3a-5e2f8a7b6c1d}</value>
 </data>
 <data>
  <variable>ProjectExplorer.Project.Target.0</variable>
  <valuemap type="QVariantMap">
   <value type="QString" key="ProjectExplorer.ProjectConfiguration.DisplayName">Unreal</value>
   <value type="QString" key="ProjectExplorer.ProjectConfiguration.Id">{0a1b2c3d-4e5f-6071-8293-a4b5c6d7e8f9}</value>
   <valuemap type="QVariantMap" key="ProjectExplorer.Target.BuildConfiguration.0">
    <value type="QString" key="ProjectExplorer.ProjectConfiguration.Id">Qt4ProjectManager.Qt4BuildConfiguration</value>
   </valuemap>
  </valuemap>
 </data>
</qtcreator>
"#;

    #[test]
    fn reads_both_ids() {
        let config = read_ids(USER_FILE).unwrap();
        assert_eq!(
            config.qt_environment_id.as_str(),
            "{c6b6d2a4-1f0e-4b9c-9d3a-5e2f8a7b6c1d}"
        );
        assert_eq!(
            config.unreal_project_configuration_id.as_str(),
            "{0a1b2c3d-4e5f-6071-8293-a4b5c6d7e8f9}"
        );
    }

    #[test]
    fn ids_are_trimmed_before_validation() {
        let contents = USER_FILE.replace(
            ">{c6b6d2a4-1f0e-4b9c-9d3a-5e2f8a7b6c1d}<",
            ">\n   {c6b6d2a4-1f0e-4b9c-9d3a-5e2f8a7b6c1d}\n  <",
        );
        let config = read_ids(&contents).unwrap();
        assert_eq!(
            config.qt_environment_id.as_str(),
            "{c6b6d2a4-1f0e-4b9c-9d3a-5e2f8a7b6c1d}"
        );
    }

    #[test]
    fn missing_environment_id() {
        let contents = USER_FILE.replace("EnvironmentId", "SomethingElse");
        assert!(matches!(
            read_ids(&contents).unwrap_err(),
            UserFileError::EnvironmentIdNotFound
        ));
    }

    #[test]
    fn missing_configuration_id() {
        let contents = USER_FILE.replace("{0a1b2c3d-4e5f-6071-8293-a4b5c6d7e8f9}", "Desktop");
        assert!(matches!(
            read_ids(&contents).unwrap_err(),
            UserFileError::ConfigurationIdNotFound
        ));
    }

    #[test]
    fn missing_file_is_reported_as_missing() {
        let dir = tempdir().unwrap();
        let err = read_ids_from_path(dir.path().join("Game.pro.user")).unwrap_err();
        assert!(matches!(err, UserFileError::Missing { .. }));
    }

    #[test]
    fn malformed_xml_is_rejected() {
        assert!(matches!(
            read_ids("<qtcreator><data>").unwrap_err(),
            UserFileError::Xml(_)
        ));
    }
}
