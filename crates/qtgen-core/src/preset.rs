//! Filling in the Qt Creator build preset template.

use qtgen_project::{BuildVariant, LAUNCHER_TOKEN};
use std::collections::BTreeMap;

/// Placeholders recognized in the build preset template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Placeholder {
    ProjectName,
    ProjectDir,
    UprojFile,
    UnrealPath,
    QtEnvId,
    QtConfId,
}

impl Placeholder {
    pub const ALL: [Placeholder; 6] = [
        Placeholder::ProjectName,
        Placeholder::ProjectDir,
        Placeholder::UprojFile,
        Placeholder::UnrealPath,
        Placeholder::QtEnvId,
        Placeholder::QtConfId,
    ];

    /// Name without the leading `$`.
    pub fn name(self) -> &'static str {
        match self {
            Placeholder::ProjectName => "PROJECT_NAME",
            Placeholder::ProjectDir => "PROJECT_DIR",
            Placeholder::UprojFile => "UPROJ_FILE",
            Placeholder::UnrealPath => "UNREAL_PATH",
            Placeholder::QtEnvId => "QT_ENV_ID",
            Placeholder::QtConfId => "QT_CONF_ID",
        }
    }

    /// The literal token as it appears in a template.
    pub fn token(self) -> String {
        format!("${}", self.name())
    }
}

/// Placeholder name (without `$`) to replacement value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    values: BTreeMap<String, String>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn set(&mut self, placeholder: Placeholder, value: impl Into<String>) -> &mut Self {
        self.insert(placeholder.name(), value)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|value| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Substitutions
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut substitutions = Substitutions::new();
        for (name, value) in iter {
            substitutions.insert(name, value);
        }
        substitutions
    }
}

/// Remove `strip` from the template if given, then replace every `$NAME` whose
/// name is mapped.
///
/// Replacement happens in one left-to-right pass, so inserted values are never
/// scanned for further placeholders or stripped. When two names share a prefix
/// the longer one wins. Unmapped placeholders are left as they are.
pub fn patch(template: &str, substitutions: &Substitutions, strip: Option<&str>) -> String {
    let template = match strip {
        Some(token) if !token.is_empty() => template.replace(token, ""),
        _ => template.to_string(),
    };

    let mut names: Vec<(&str, &str)> = substitutions
        .values
        .iter()
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    names.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));

    let mut out = String::with_capacity(template.len());
    let mut rest = template.as_str();
    while let Some(idx) = rest.find('$') {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];
        match names.iter().find(|(name, _)| after.starts_with(name)) {
            Some((name, value)) => {
                out.push_str(value);
                rest = &after[name.len()..];
            }
            None => {
                out.push('$');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Concrete values for every placeholder of the build preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetValues {
    pub project_name: String,
    pub project_dir: String,
    pub uproject_file: String,
    pub unreal_path: String,
    pub qt_env_id: String,
    pub qt_conf_id: String,
}

impl PresetValues {
    pub fn substitutions(&self) -> Substitutions {
        let mut substitutions = Substitutions::new();
        substitutions
            .set(Placeholder::ProjectName, &self.project_name)
            .set(Placeholder::ProjectDir, &self.project_dir)
            .set(Placeholder::UprojFile, &self.uproject_file)
            .set(Placeholder::UnrealPath, &self.unreal_path)
            .set(Placeholder::QtEnvId, &self.qt_env_id)
            .set(Placeholder::QtConfId, &self.qt_conf_id);
        substitutions
    }
}

/// Patch the preset for `variant`; the launcher flag is removed for engines
/// built from source.
pub fn patch_preset(template: &str, values: &PresetValues, variant: BuildVariant) -> String {
    let strip = match variant {
        BuildVariant::Launcher => None,
        BuildVariant::Source => Some(LAUNCHER_TOKEN),
    };
    patch(template, &values.substitutions(), strip)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> PresetValues {
        PresetValues {
            project_name: "MyGame".into(),
            project_dir: "C:\\Projects\\MyGame\\".into(),
            uproject_file: "C:\\Projects\\MyGame\\MyGame.uproject".into(),
            unreal_path: "C:/UE/4.20".into(),
            qt_env_id: "{c6b6d2a4-1f0e-4b9c-9d3a-5e2f8a7b6c1d}".into(),
            qt_conf_id: "{0a1b2c3d-4e5f-6071-8293-a4b5c6d7e8f9}".into(),
        }
    }

    #[test]
    fn substitutes_mapped_placeholders() {
        let substitutions: Substitutions =
            [("UNREAL_PATH", "C:/UE/4.20"), ("PROJECT_NAME", "MyGame")]
                .into_iter()
                .collect();
        let out = patch(
            "UNREAL_PATH=$UNREAL_PATH name=$PROJECT_NAME",
            &substitutions,
            None,
        );
        assert_eq!(out, "UNREAL_PATH=C:/UE/4.20 name=MyGame");
    }

    #[test]
    fn unmapped_placeholders_survive() {
        let substitutions: Substitutions = [("PROJECT_NAME", "MyGame")].into_iter().collect();
        let out = patch("$PROJECT_NAME $QT_ENV_ID $", &substitutions, None);
        assert_eq!(out, "MyGame $QT_ENV_ID $");
    }

    #[test]
    fn every_placeholder_is_replaced() {
        let template: String = Placeholder::ALL
            .iter()
            .map(|placeholder| format!("<{}>", placeholder.token()))
            .collect();
        let out = patch(&template, &values().substitutions(), None);
        for placeholder in Placeholder::ALL {
            assert!(!out.contains(&placeholder.token()), "{} left in {out}", placeholder.token());
        }
        assert!(out.contains("<MyGame>"));
    }

    #[test]
    fn patching_is_deterministic() {
        let template = "$PROJECT_DIR$UPROJ_FILE -rocket $UNREAL_PATH";
        let first = patch_preset(template, &values(), BuildVariant::Source);
        let second = patch_preset(template, &values(), BuildVariant::Source);
        assert_eq!(first, second);
    }

    #[test]
    fn values_are_not_rescanned() {
        let substitutions: Substitutions =
            [("PROJECT_NAME", "$PROJECT_DIR"), ("PROJECT_DIR", "dir")]
                .into_iter()
                .collect();
        assert_eq!(patch("$PROJECT_NAME", &substitutions, None), "$PROJECT_DIR");
    }

    #[test]
    fn longer_name_wins_over_prefix() {
        let substitutions: Substitutions = [("PATH", "short"), ("PATH_EXT", "long")]
            .into_iter()
            .collect();
        assert_eq!(patch("$PATH_EXT $PATH", &substitutions, None), "long short");
    }

    #[test]
    fn stripping_leaves_substituted_values_alone() {
        let mut values = values();
        values.project_dir = "C:/my-rocket-game/".into();
        let out = patch_preset("$PROJECT_DIR -rocket", &values, BuildVariant::Source);
        assert_eq!(out, "C:/my-rocket-game/ ");
    }

    #[test]
    fn launcher_flag_is_stripped_for_source_builds() {
        let template = "Build.bat $PROJECT_NAME Win64 Development -rocket";
        assert_eq!(
            patch_preset(template, &values(), BuildVariant::Source),
            "Build.bat MyGame Win64 Development "
        );
        assert_eq!(
            patch_preset(template, &values(), BuildVariant::Launcher),
            "Build.bat MyGame Win64 Development -rocket"
        );
    }
}
