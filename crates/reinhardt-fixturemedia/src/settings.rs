//! Project settings for the fixture media commands.
//!
//! Settings are read from a TOML file:
//!
//! ```toml
//! database = "db.json"
//! fixture_dirs = ["fixtures"]
//!
//! [storage]
//! backend = "local"
//! base_path = "media"
//!
//! [[installed_apps]]
//! label = "gallery"
//! path = "gallery"
//!
//! [[models]]
//! id = "gallery.Photo"
//! file_fields = ["image"]
//! fields = ["title"]
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use std::path::{Path, PathBuf};

use reinhardt_seeding::{FieldDescriptor, JsonFileRecordStore, ModelSchema, ModelSchemaRegistry};
use reinhardt_storages::{BackendType, StorageConfig};
use serde::{Deserialize, Serialize};

use crate::error::{CommandError, CommandResult};
use crate::paths::{InstalledApp, find_fixture_dirs};

/// Environment variable naming the settings file.
pub const SETTINGS_ENV: &str = "FIXTUREMEDIA_SETTINGS";

/// Settings file used when none is named.
pub const DEFAULT_SETTINGS_FILE: &str = "fixturemedia.toml";

/// Storage backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
	/// Backend type: `local` or `memory`.
	#[serde(default = "default_backend")]
	pub backend: String,

	/// Media root for the local backend.
	#[serde(default)]
	pub base_path: Option<PathBuf>,
}

fn default_backend() -> String {
	"local".to_string()
}

impl Default for StorageSettings {
	fn default() -> Self {
		Self {
			backend: default_backend(),
			base_path: None,
		}
	}
}

/// A model and its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSettings {
	/// Model id (`app.Model`).
	pub id: String,

	/// Fields whose values are storage paths.
	#[serde(default)]
	pub file_fields: Vec<String>,

	/// Other fields.
	#[serde(default)]
	pub fields: Vec<String>,
}

/// Fixture media settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureMediaSettings {
	/// Installed apps; each contributes `<path>/fixtures`.
	pub installed_apps: Vec<InstalledApp>,

	/// Extra fixture directories, searched after the apps' ones.
	pub fixture_dirs: Vec<PathBuf>,

	/// Default storage backend.
	pub storage: StorageSettings,

	/// JSON file holding the records.
	pub database: Option<PathBuf>,

	/// Registered models.
	pub models: Vec<ModelSettings>,
}

impl FixtureMediaSettings {
	/// Parses settings from a TOML string.
	pub fn from_toml(content: &str) -> CommandResult<Self> {
		Ok(toml::from_str(content)?)
	}

	/// Reads settings from a TOML file, resolving relative paths against
	/// its directory.
	pub fn from_file(path: impl AsRef<Path>) -> CommandResult<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| {
			CommandError::Settings(format!("cannot read {}: {}", path.display(), e))
		})?;
		let settings = Self::from_toml(&content)?;

		let base = std::path::absolute(path)?
			.parent()
			.map(Path::to_path_buf)
			.unwrap_or_default();
		Ok(settings.relative_to(&base))
	}

	/// Loads settings from `explicit`, else from the file named by
	/// `FIXTUREMEDIA_SETTINGS`, else from `fixturemedia.toml`.
	pub fn load(explicit: Option<&Path>) -> CommandResult<Self> {
		let path = match explicit {
			Some(path) => path.to_path_buf(),
			None => std::env::var_os(SETTINGS_ENV)
				.map(PathBuf::from)
				.unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE)),
		};
		tracing::debug!(path = %path.display(), "loading settings");
		Self::from_file(path)
	}

	/// Rebases every relative path onto `base`.
	pub fn relative_to(mut self, base: &Path) -> Self {
		for app in &mut self.installed_apps {
			app.path = base.join(&app.path);
		}
		for dir in &mut self.fixture_dirs {
			*dir = base.join(&*dir);
		}
		if let Some(path) = self.storage.base_path.as_mut() {
			*path = base.join(&*path);
		}
		if let Some(path) = self.database.as_mut() {
			*path = base.join(&*path);
		}
		self
	}

	/// Builds the model schema registry.
	pub fn to_schema_registry(&self) -> ModelSchemaRegistry {
		self.models
			.iter()
			.map(|model| {
				let schema = model
					.fields
					.iter()
					.fold(ModelSchema::new(&model.id), |schema, field| {
						schema.with_field(FieldDescriptor::value(field))
					});
				model
					.file_fields
					.iter()
					.fold(schema, |schema, field| schema.with_file_field(field))
			})
			.collect()
	}

	/// Storage configuration for the default backend.
	pub fn storage_config(&self) -> CommandResult<StorageConfig> {
		let backend_type = self.storage.backend.parse::<BackendType>()?;
		let base_path = self
			.storage
			.base_path
			.as_ref()
			.map(|path| path.to_string_lossy().into_owned());
		Ok(StorageConfig::from_parts(backend_type, base_path)?)
	}

	/// Every fixture directory, app directories first.
	pub fn all_fixture_dirs(&self) -> Vec<PathBuf> {
		find_fixture_dirs(&self.installed_apps, &self.fixture_dirs)
	}

	/// Installed app labels.
	pub fn app_labels(&self) -> Vec<String> {
		self.installed_apps.iter().map(|app| app.label.clone()).collect()
	}

	/// The record store backing both commands.
	pub fn record_store(&self) -> CommandResult<JsonFileRecordStore> {
		let path = self
			.database
			.as_ref()
			.ok_or_else(|| CommandError::Settings("`database` is not set".to_string()))?;
		Ok(JsonFileRecordStore::new(path))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;
	use tempfile::tempdir;

	const SAMPLE: &str = r#"
database = "db.json"
fixture_dirs = ["shared/fixtures"]

[storage]
backend = "local"
base_path = "media"

[[installed_apps]]
label = "gallery"
path = "gallery"

[[models]]
id = "gallery.Photo"
file_fields = ["image"]
fields = ["title"]

[[models]]
id = "gallery.Album"
fields = ["name"]
"#;

	#[rstest]
	fn test_parse_and_schema_registry() {
		let settings = FixtureMediaSettings::from_toml(SAMPLE).unwrap();
		let registry = settings.to_schema_registry();

		assert_eq!(registry.len(), 2);
		let photo = registry.get("gallery.Photo").unwrap();
		assert!(photo.has_file_fields());
		assert_eq!(photo.fields.len(), 2);
		assert!(!registry.get("gallery.Album").unwrap().has_file_fields());
		assert_eq!(settings.app_labels(), vec!["gallery".to_string()]);
	}

	#[rstest]
	fn test_defaults() {
		let settings = FixtureMediaSettings::from_toml("").unwrap();
		assert_eq!(settings.storage.backend, "local");
		assert!(settings.models.is_empty());
		assert!(matches!(
			settings.record_store(),
			Err(CommandError::Settings(_))
		));
	}

	#[rstest]
	fn test_invalid_toml() {
		let result = FixtureMediaSettings::from_toml("models = 3");
		assert!(matches!(result, Err(CommandError::Toml(_))));
	}

	#[rstest]
	fn test_storage_config() {
		let settings = FixtureMediaSettings::from_toml(SAMPLE)
			.unwrap()
			.relative_to(Path::new("/srv/site"));
		assert_eq!(
			settings.storage_config().unwrap(),
			StorageConfig::from_parts(BackendType::Local, Some("/srv/site/media".to_string()))
				.unwrap()
		);

		let memory = FixtureMediaSettings::from_toml("[storage]\nbackend = \"memory\"").unwrap();
		assert_eq!(memory.storage_config().unwrap(), StorageConfig::Memory);
	}

	#[rstest]
	fn test_unknown_backend() {
		let settings = FixtureMediaSettings::from_toml("[storage]\nbackend = \"s3\"").unwrap();
		assert!(matches!(
			settings.storage_config(),
			Err(CommandError::Storage(_))
		));
	}

	#[rstest]
	fn test_from_file_resolves_relative_paths() {
		let dir = tempdir().unwrap();
		let path = dir.path().join(DEFAULT_SETTINGS_FILE);
		std::fs::write(&path, SAMPLE).unwrap();

		let settings = FixtureMediaSettings::from_file(&path).unwrap();
		assert_eq!(settings.database, Some(dir.path().join("db.json")));
		assert_eq!(
			settings.all_fixture_dirs(),
			vec![
				dir.path().join("gallery/fixtures"),
				dir.path().join("shared/fixtures"),
			]
		);
	}

	#[rstest]
	fn test_from_missing_file() {
		let result = FixtureMediaSettings::from_file("/nonexistent/fixturemedia.toml");
		assert!(matches!(result, Err(CommandError::Settings(_))));
	}

	#[rstest]
	#[serial]
	fn test_load_from_env() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("custom.toml");
		std::fs::write(&path, SAMPLE).unwrap();

		// SAFETY: serialized with other environment-mutating tests
		unsafe {
			std::env::set_var(SETTINGS_ENV, &path);
		}
		let settings = FixtureMediaSettings::load(None);
		unsafe {
			std::env::remove_var(SETTINGS_ENV);
		}

		assert_eq!(settings.unwrap().models.len(), 2);
	}
}
