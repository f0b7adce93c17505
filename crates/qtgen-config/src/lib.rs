use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

pub mod user_file;

const CONFIG_DIR: &str = "qtgen";
const CONFIG_FILE: &str = "config.toml";

static QT_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\{[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\}$")
        .expect("Qt id pattern is a valid regex")
});

/// Identifier Qt Creator uses for environments and kits, e.g.
/// `{c6b6d2a4-1f0e-4b9c-9d3a-5e2f8a7b6c1d}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QtId(String);

impl QtId {
    pub fn parse(value: &str) -> Result<Self, InvalidQtId> {
        if QT_ID_PATTERN.is_match(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(InvalidQtId(value.to_string()))
        }
    }

    pub fn is_valid(value: &str) -> bool {
        QT_ID_PATTERN.is_match(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for QtId {
    type Err = InvalidQtId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for QtId {
    type Error = InvalidQtId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<QtId> for String {
    fn from(id: QtId) -> Self {
        id.0
    }
}

impl fmt::Display for QtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid Qt Creator id {0:?}, expected {{xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx}}")]
pub struct InvalidQtId(pub String);

/// Qt Creator ids the generated `.pro.user` file refers to.
///
/// Both values come from a `.pro.user` file of a project on this machine that
/// uses the Unreal build kit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Configuration {
    pub qt_environment_id: QtId,
    pub unreal_project_configuration_id: QtId,
}

impl Configuration {
    pub fn new(qt_environment_id: QtId, unreal_project_configuration_id: QtId) -> Self {
        Self {
            qt_environment_id,
            unreal_project_configuration_id,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Like [`Configuration::load`], but a missing file is `Ok(None)`.
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Option<Self>, ConfigurationError> {
        match Self::load(path) {
            Ok(config) => Ok(Some(config)),
            Err(ConfigurationError::Io(err)) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigurationError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        tracing::info!("Configuration written to {}", path.display());
        Ok(())
    }
}

/// Per-user location of the configuration file.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}
