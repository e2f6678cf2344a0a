//! Persisted AI settings: credentials and the chosen model.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{ModelCatalog, DEFAULT_MODELS};
use crate::error::{CatalogError, Result};

const SETTINGS_FILE_NAME: &str = "settings.toml";
const SETTINGS_FILE_VERSION: u32 = 1;

/// User-chosen AI settings.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
}

impl fmt::Debug for AiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiSettings")
            .field("generation_api_key", &self.generation_api_key.as_deref().map(redact_key))
            .field("vision_api_key", &self.vision_api_key.as_deref().map(redact_key))
            .field("model_id", &self.model_id)
            .finish()
    }
}

impl AiSettings {
    /// Choose `model_id`, which must be present in `catalog`.
    pub fn select_model(&mut self, catalog: &ModelCatalog, model_id: &str) -> Result<()> {
        let model_id = model_id.trim();
        let model_id = model_id.strip_prefix("models/").unwrap_or(model_id);
        if !catalog.contains(model_id) {
            return Err(CatalogError::InvalidArgument(format!(
                "model '{model_id}' is not in the available catalog"
            )));
        }
        self.model_id = Some(model_id.to_string());
        Ok(())
    }

    /// The chosen model, or the first default model when none is set.
    pub fn model_or_default(&self) -> &str {
        self.model_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_MODELS[0].0)
    }
}

/// Mask all but the last four characters of a credential.
pub fn redact_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

/// Storage abstraction for persisted settings.
pub trait SettingsStore: Send + Sync {
    fn load(&self) -> Result<Option<AiSettings>>;
    fn save(&self, settings: &AiSettings) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// File-backed settings store using a TOML file.
///
/// # Example
/// ```no_run
/// use gemini_catalog::settings::{AiSettings, FileSettingsStore, SettingsStore};
///
/// let store = FileSettingsStore::new_default();
/// let mut settings = store.load()?.unwrap_or_default();
/// settings.model_id = Some("gemini-2.5-pro".to_string());
/// store.save(&settings)?;
/// # Ok::<(), gemini_catalog::error::CatalogError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    /// Store `settings.toml` inside `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: base_dir.into().join(SETTINGS_FILE_NAME),
        }
    }

    pub fn new_default() -> Self {
        Self::new(default_settings_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<Option<AiSettings>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let file: SettingsFile = toml::from_str(&raw)?;
        if file.version > SETTINGS_FILE_VERSION {
            return Err(CatalogError::Settings(format!(
                "unsupported settings file version {}",
                file.version
            )));
        }
        Ok(Some(file.settings))
    }

    fn save(&self, settings: &AiSettings) -> Result<()> {
        Self::ensure_parent(&self.path)?;
        let file = SettingsFile {
            version: SETTINGS_FILE_VERSION,
            saved_at: Utc::now(),
            settings: settings.clone(),
        };
        let serialized = toml::to_string(&file)?;
        fs::write(&self.path, serialized)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        tracing::debug!(path = %self.path.display(), "saved settings");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SettingsFile {
    version: u32,
    saved_at: DateTime<Utc>,
    settings: AiSettings,
}

fn default_settings_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".gemini-catalog"))
        .unwrap_or_else(|| PathBuf::from(".gemini-catalog"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, FileSettingsStore) {
        let dir = TempDir::new().unwrap();
        let store = FileSettingsStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn load_missing_file_returns_none() {
        let (_dir, store) = temp_store();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn saved_settings_load_back() {
        let (_dir, store) = temp_store();
        let settings = AiSettings {
            generation_api_key: Some("gen-key".to_string()),
            vision_api_key: None,
            model_id: Some("gemini-2.5-pro".to_string()),
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), Some(settings));
    }

    #[test]
    fn clear_removes_file_and_is_idempotent() {
        let (_dir, store) = temp_store();
        store.save(&AiSettings::default()).unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn settings_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let (_dir, store) = temp_store();
        store.save(&AiSettings::default()).unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn newer_file_version_is_rejected() {
        let (_dir, store) = temp_store();
        fs::write(
            store.path(),
            "version = 99\nsaved_at = \"2026-01-01T00:00:00Z\"\n\n[settings]\n",
        )
        .unwrap();
        assert!(matches!(store.load(), Err(CatalogError::Settings(_))));
    }

    #[test]
    fn select_model_requires_catalog_membership() {
        let catalog = ModelCatalog::default_catalog();
        let mut settings = AiSettings::default();

        settings.select_model(&catalog, "models/gemini-2.5-pro").unwrap();
        assert_eq!(settings.model_id.as_deref(), Some("gemini-2.5-pro"));

        let err = settings.select_model(&catalog, "gpt-4o").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidArgument(_)));
        assert_eq!(settings.model_id.as_deref(), Some("gemini-2.5-pro"));
    }

    #[test]
    fn model_or_default_falls_back() {
        assert_eq!(AiSettings::default().model_or_default(), "gemini-2.5-flash");
    }

    #[test]
    fn redact_key_keeps_tail() {
        assert_eq!(redact_key("AIzaSyExample1234"), "****1234");
        assert_eq!(redact_key("abc"), "****");
        let rendered = format!(
            "{:?}",
            AiSettings {
                generation_api_key: Some("AIzaSecret9876".into()),
                ..Default::default()
            }
        );
        assert!(!rendered.contains("AIzaSecret"));
    }
}
