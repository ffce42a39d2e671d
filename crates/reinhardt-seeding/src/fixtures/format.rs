//! Fixture format definitions.
//!
//! This module defines the data structures for Django-compatible fixture format.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::error::{SeedingError, SeedingResult};

/// Django-compatible fixture record.
///
/// Each record represents a single model instance with its field values.
/// File-valued fields hold the storage path of the file, e.g.
///
/// ```json
/// {
///   "model": "gallery.Photo",
///   "pk": 1,
///   "fields": {
///     "title": "Cat",
///     "image": "uploads/cat.png"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixtureRecord {
	/// Model identifier in format "app.Model" (e.g., "gallery.Photo").
	pub model: String,

	/// Primary key value. Optional for auto-increment fields.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pk: Option<Value>,

	/// Field values as a JSON object.
	pub fields: Value,
}

impl FixtureRecord {
	/// Creates a new fixture record.
	pub fn new(model: impl Into<String>, fields: Value) -> Self {
		Self {
			model: model.into(),
			pk: None,
			fields,
		}
	}

	/// Creates a new fixture record with a primary key.
	pub fn with_pk(model: impl Into<String>, pk: Value, fields: Value) -> Self {
		Self {
			model: model.into(),
			pk: Some(pk),
			fields,
		}
	}

	/// Returns the app label portion of the model identifier.
	///
	/// # Example
	///
	/// ```
	/// # use reinhardt_seeding::fixtures::FixtureRecord;
	/// # use serde_json::json;
	/// let record = FixtureRecord::new("gallery.Photo", json!({}));
	/// assert_eq!(record.app_label(), Some("gallery"));
	/// ```
	pub fn app_label(&self) -> Option<&str> {
		self.model.split('.').next()
	}

	/// Returns the model name portion of the model identifier.
	pub fn model_name(&self) -> Option<&str> {
		self.model.split('.').nth(1)
	}

	/// Returns the value of a single field, if present.
	pub fn field(&self, name: &str) -> Option<&Value> {
		self.fields.get(name)
	}

	/// Returns true if the primary key matches the given textual id.
	///
	/// Numeric and string keys are compared by their textual form, so the id
	/// `"7"` matches both `7` and `"7"`.
	pub fn pk_matches(&self, id: &str) -> bool {
		match &self.pk {
			Some(Value::String(pk)) => pk == id,
			Some(Value::Number(pk)) => pk.to_string() == id,
			_ => false,
		}
	}
}

/// Supported fixture file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FixtureFormat {
	/// JSON format (default).
	#[default]
	Json,

	/// YAML format (requires `yaml` feature).
	Yaml,
}

impl FixtureFormat {
	/// Formats compiled into this build, in lookup order.
	pub fn supported() -> &'static [FixtureFormat] {
		#[cfg(feature = "yaml")]
		{
			&[FixtureFormat::Json, FixtureFormat::Yaml]
		}
		#[cfg(not(feature = "yaml"))]
		{
			&[FixtureFormat::Json]
		}
	}

	/// Returns true if this format is compiled into the build.
	pub fn is_enabled(&self) -> bool {
		Self::supported().contains(self)
	}

	/// Resolves a serialization format name such as `"json"`.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::InvalidFormat`] for names that are unknown or
	/// whose format is not enabled in this build.
	///
	/// # Example
	///
	/// ```
	/// # use reinhardt_seeding::fixtures::FixtureFormat;
	/// assert_eq!(FixtureFormat::from_name("json").unwrap(), FixtureFormat::Json);
	/// assert!(FixtureFormat::from_name("xml").is_err());
	/// ```
	pub fn from_name(name: &str) -> SeedingResult<Self> {
		Self::from_extension(name)
			.filter(Self::is_enabled)
			.ok_or_else(|| SeedingError::InvalidFormat(name.to_string()))
	}

	/// Determines the fixture format from a file extension.
	///
	/// # Example
	///
	/// ```
	/// # use reinhardt_seeding::fixtures::FixtureFormat;
	/// assert_eq!(FixtureFormat::from_extension("json"), Some(FixtureFormat::Json));
	/// assert_eq!(FixtureFormat::from_extension("yml"), Some(FixtureFormat::Yaml));
	/// assert_eq!(FixtureFormat::from_extension("xml"), None);
	/// ```
	pub fn from_extension(ext: &str) -> Option<Self> {
		match ext.to_lowercase().as_str() {
			"json" => Some(Self::Json),
			"yaml" | "yml" => Some(Self::Yaml),
			_ => None,
		}
	}

	/// Determines the fixture format from a file path.
	pub fn from_path(path: &Path) -> Option<Self> {
		path.extension()
			.and_then(|ext| ext.to_str())
			.and_then(Self::from_extension)
	}

	/// Returns the file extensions recognised for this format.
	pub fn extensions(&self) -> &'static [&'static str] {
		match self {
			Self::Json => &["json"],
			Self::Yaml => &["yaml", "yml"],
		}
	}
}

impl std::fmt::Display for FixtureFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Json => write!(f, "JSON"),
			Self::Yaml => write!(f, "YAML"),
		}
	}
}

/// Parsed fixture data containing multiple records.
#[derive(Debug, Clone)]
pub struct FixtureData {
	/// Collection of fixture records, in file order.
	pub records: Vec<FixtureRecord>,

	/// Format the data was parsed from.
	pub format: FixtureFormat,

	/// Optional source file path.
	pub source: Option<String>,
}

impl FixtureData {
	/// Creates fixture data from a vector of records.
	pub fn from_records(records: Vec<FixtureRecord>, format: FixtureFormat) -> Self {
		Self {
			records,
			format,
			source: None,
		}
	}

	/// Sets the source file path.
	pub fn with_source(mut self, source: impl Into<String>) -> Self {
		self.source = Some(source.into());
		self
	}

	/// Filters records by app label. An empty filter keeps every record.
	pub fn filter_by_app<S: AsRef<str>>(&self, app_labels: &[S]) -> Vec<&FixtureRecord> {
		self.records
			.iter()
			.filter(|record| {
				app_labels.is_empty()
					|| record
						.app_label()
						.is_some_and(|app| app_labels.iter().any(|label| label.as_ref() == app))
			})
			.collect()
	}
}
