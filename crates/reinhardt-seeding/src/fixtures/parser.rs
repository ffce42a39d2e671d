//! Fixture parsing functionality.
//!
//! This module handles parsing of fixture files in JSON and YAML formats.

use std::path::Path;

use serde_json::Value;

use super::{FixtureData, FixtureFormat, FixtureRecord};
use crate::error::{SeedingError, SeedingResult};

/// Parser for fixture files.
///
/// Both formats are decoded into a JSON value tree first and then validated
/// record by record, so the accepted shapes are identical: either a list of
/// records or a single record object.
#[derive(Debug, Default)]
pub struct FixtureParser;

impl FixtureParser {
	/// Creates a new fixture parser.
	pub fn new() -> Self {
		Self
	}

	/// Parses a fixture file from the given path.
	///
	/// The format is automatically detected from the file extension.
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - The file extension is not recognized
	/// - The file cannot be read
	/// - The file content is invalid
	pub fn parse_file(&self, path: &Path) -> SeedingResult<FixtureData> {
		let format = FixtureFormat::from_path(path).ok_or_else(|| {
			SeedingError::UnsupportedExtension(
				path.extension()
					.and_then(|e| e.to_str())
					.unwrap_or("(none)")
					.to_string(),
			)
		})?;

		let content = std::fs::read_to_string(path).map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				SeedingError::FileNotFound(path.display().to_string())
			} else {
				SeedingError::IoError(e)
			}
		})?;

		let data = self
			.parse_string(&content, format)
			.map_err(|e| match e {
				SeedingError::ParseError(message) => {
					SeedingError::ParseError(format!("{}: {}", path.display(), message))
				}
				other => other,
			})?;
		Ok(data.with_source(path.display().to_string()))
	}

	/// Parses fixture data from a string.
	pub fn parse_string(&self, content: &str, format: FixtureFormat) -> SeedingResult<FixtureData> {
		let value = match format {
			FixtureFormat::Json => serde_json::from_str(content)?,
			FixtureFormat::Yaml => self.yaml_to_value(content)?,
		};

		Ok(FixtureData::from_records(
			self.records_from_value(value)?,
			format,
		))
	}

	#[cfg(feature = "yaml")]
	fn yaml_to_value(&self, content: &str) -> SeedingResult<Value> {
		Ok(serde_yaml::from_str(content)?)
	}

	#[cfg(not(feature = "yaml"))]
	fn yaml_to_value(&self, _content: &str) -> SeedingResult<Value> {
		Err(SeedingError::InvalidFormat("yaml".to_string()))
	}

	fn records_from_value(&self, value: Value) -> SeedingResult<Vec<FixtureRecord>> {
		let items = match value {
			Value::Array(items) => items,
			Value::Object(_) => vec![value],
			Value::Null => Vec::new(),
			_ => {
				return Err(SeedingError::ParseError(
					"Expected a list of records or a single record".to_string(),
				));
			}
		};

		items
			.into_iter()
			.enumerate()
			.map(|(idx, item)| {
				let record: FixtureRecord = serde_json::from_value(item).map_err(|e| {
					SeedingError::ParseError(format!("Invalid record at index {}: {}", idx, e))
				})?;
				self.validate_record(&record)?;
				Ok(record)
			})
			.collect()
	}

	/// Validates a fixture record.
	fn validate_record(&self, record: &FixtureRecord) -> SeedingResult<()> {
		if record.app_label().is_none_or(str::is_empty) || record.model_name().is_none() {
			return Err(SeedingError::ValidationError {
				field: "model".to_string(),
				message: format!(
					"Model identifier '{}' must be in 'app.Model' format",
					record.model
				),
			});
		}

		if !record.fields.is_object() {
			return Err(SeedingError::ValidationError {
				field: "fields".to_string(),
				message: "Fields must be an object".to_string(),
			});
		}

		Ok(())
	}
}
