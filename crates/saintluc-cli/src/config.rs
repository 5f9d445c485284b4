use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use saintluc_scoring::variant::Variant;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const FILE_NAME: &str = "config.json";

/// User preferences. Patient values and scores are never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaintlucConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub variant: Variant,
    #[serde(default)]
    pub format: OutputFormat,
    pub created_at: jiff::Timestamp,
}

impl Default for SaintlucConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            variant: Variant::default(),
            format: OutputFormat::default(),
            created_at: jiff::Timestamp::now(),
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Directory holding `config.json`: `dir_override` when given, else the
/// platform config directory.
pub fn config_dir(dir_override: Option<&Path>) -> eyre::Result<PathBuf> {
    if let Some(dir) = dir_override {
        return Ok(dir.to_path_buf());
    }
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.saintluc.cli"))
}

pub fn config_path_in(dir: &Path) -> PathBuf {
    dir.join(FILE_NAME)
}

pub fn has_config_in(dir: &Path) -> bool {
    config_path_in(dir).exists()
}

pub fn load_config_in(dir: &Path) -> eyre::Result<SaintlucConfig> {
    let path = config_path_in(dir);
    let contents = std::fs::read_to_string(&path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: SaintlucConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Saved config, or defaults when none has been written yet.
pub fn load_or_default_in(dir: &Path) -> eyre::Result<SaintlucConfig> {
    if has_config_in(dir) {
        load_config_in(dir)
    } else {
        tracing::debug!(dir = %dir.display(), "no config file, using defaults");
        Ok(SaintlucConfig::default())
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update saintluc."
        ));
    }

    // v0 → v1: stamp the version; every v1 field has a serde default
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1");
    }

    Ok(json)
}

pub fn save_config_in(dir: &Path, config: &SaintlucConfig) -> eyre::Result<()> {
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = config_path_in(dir);
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

pub fn delete_config_in(dir: &Path) -> eyre::Result<()> {
    let path = config_path_in(dir);
    if path.exists() {
        std::fs::remove_file(&path)?;
        tracing::info!(path = %path.display(), "config deleted");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamps_unversioned_config() {
        let v0 = serde_json::json!({
            "variant": "fr",
            "created_at": "2024-03-01T10:00:00Z",
        });
        let migrated = migrate(v0, 0).unwrap();
        assert_eq!(migrated["config_version"], 1);

        let config: SaintlucConfig = serde_json::from_value(migrated).unwrap();
        assert_eq!(config.variant, Variant::Fr);
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn refuses_newer_config() {
        let json = serde_json::json!({ "config_version": 9 });
        assert!(migrate(json, 9).is_err());
    }

    #[test]
    fn current_config_passes_through() {
        let json = serde_json::json!({
            "config_version": 1,
            "variant": "en",
            "format": "json",
            "created_at": "2024-03-01T10:00:00Z",
        });
        let config: SaintlucConfig = serde_json::from_value(migrate(json, 1).unwrap()).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
    }
}
