//! Fixture serialization.
//!
//! [`FixtureSerializer`] encodes records; [`PreDumpSerializer`] wraps it so
//! that pre-dump hooks see every record immediately before its conversion.

use serde_json::Value;

use super::{FixtureFormat, FixtureRecord};
use crate::error::{SeedingError, SeedingResult};
use crate::hooks::PreDumpHooks;
use crate::schema::ModelSchemaRegistry;

/// Fixture serializer for exporting model data.
#[derive(Debug, Clone)]
pub struct FixtureSerializer {
	/// Output format.
	format: FixtureFormat,

	/// Indentation width for pretty printing; zero means compact output.
	indent: usize,
}

impl FixtureSerializer {
	/// Creates a new fixture serializer with default settings.
	pub fn new() -> Self {
		Self {
			format: FixtureFormat::Json,
			indent: 2,
		}
	}

	/// Creates a serializer for a named format such as `"json"`.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::InvalidFormat`] if the name is not recognised.
	pub fn for_format_name(name: &str) -> SeedingResult<Self> {
		Ok(Self::new().with_format(FixtureFormat::from_name(name)?))
	}

	/// Sets the output format.
	pub fn with_format(mut self, format: FixtureFormat) -> Self {
		self.format = format;
		self
	}

	/// Sets the indentation width.
	pub fn with_indent(mut self, indent: usize) -> Self {
		self.indent = indent;
		self
	}

	/// Converts one record into its output representation.
	pub fn dump_object(&self, record: &FixtureRecord) -> SeedingResult<Value> {
		serde_json::to_value(record).map_err(|e| SeedingError::SerializationError(e.to_string()))
	}

	/// Serializes fixture records to a string.
	pub fn serialize(&self, records: &[FixtureRecord]) -> SeedingResult<String> {
		let objects = records
			.iter()
			.map(|record| self.dump_object(record))
			.collect::<SeedingResult<Vec<_>>>()?;
		self.encode(&objects)
	}

	/// Encodes already converted objects as a fixture document.
	pub fn encode(&self, objects: &[Value]) -> SeedingResult<String> {
		match self.format {
			FixtureFormat::Json => self.encode_json(objects),
			FixtureFormat::Yaml => self.encode_yaml(objects),
		}
	}

	fn encode_json(&self, objects: &[Value]) -> SeedingResult<String> {
		if self.indent == 0 {
			return serde_json::to_string(objects)
				.map_err(|e| SeedingError::SerializationError(e.to_string()));
		}

		let indent = " ".repeat(self.indent);
		let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
		let mut out = Vec::new();
		let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
		serde::Serialize::serialize(objects, &mut serializer)
			.map_err(|e| SeedingError::SerializationError(e.to_string()))?;
		String::from_utf8(out).map_err(|e| SeedingError::SerializationError(e.to_string()))
	}

	#[cfg(feature = "yaml")]
	fn encode_yaml(&self, objects: &[Value]) -> SeedingResult<String> {
		serde_yaml::to_string(objects).map_err(|e| SeedingError::SerializationError(e.to_string()))
	}

	#[cfg(not(feature = "yaml"))]
	fn encode_yaml(&self, _objects: &[Value]) -> SeedingResult<String> {
		Err(SeedingError::InvalidFormat("yaml".to_string()))
	}

	/// Returns the configured output format.
	pub fn format(&self) -> FixtureFormat {
		self.format
	}
}

impl Default for FixtureSerializer {
	fn default() -> Self {
		Self::new()
	}
}

/// Serializer wrapper that runs pre-dump hooks before each record.
///
/// Built per invocation from a base serializer; it never mutates any shared
/// serializer state.
#[derive(Debug, Clone, Copy)]
pub struct PreDumpSerializer<'a> {
	base: &'a FixtureSerializer,
	schemas: &'a ModelSchemaRegistry,
	hooks: &'a PreDumpHooks,
}

impl<'a> PreDumpSerializer<'a> {
	/// Composes a base serializer with a set of pre-dump hooks.
	pub fn new(
		base: &'a FixtureSerializer,
		schemas: &'a ModelSchemaRegistry,
		hooks: &'a PreDumpHooks,
	) -> Self {
		Self {
			base,
			schemas,
			hooks,
		}
	}

	/// Fires the record's hooks, then converts it.
	pub async fn dump_object(&self, record: &FixtureRecord) -> SeedingResult<Value> {
		if let Some(schema) = self.schemas.get(&record.model) {
			self.hooks.send(schema, record).await?;
		}
		self.base.dump_object(record)
	}

	/// Serializes records in order, firing hooks for each one.
	pub async fn serialize(&self, records: &[FixtureRecord]) -> SeedingResult<String> {
		let mut objects = Vec::with_capacity(records.len());
		for record in records {
			objects.push(self.dump_object(record).await?);
		}
		self.base.encode(&objects)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::hooks::PreDumpHook;
	use crate::schema::ModelSchema;
	use async_trait::async_trait;
	use parking_lot::Mutex;
	use rstest::rstest;
	use serde_json::json;
	use std::sync::Arc;

	#[rstest]
	fn test_serialize_json_pretty() {
		let serializer = FixtureSerializer::new().with_indent(4);
		let records = vec![FixtureRecord::with_pk(
			"gallery.Photo",
			json!(1),
			json!({"image": "uploads/cat.png"}),
		)];

		let output = serializer.serialize(&records).unwrap();
		assert!(output.contains("\"model\": \"gallery.Photo\""));
		assert!(output.contains("\n    {"));
	}

	#[rstest]
	fn test_serialize_json_compact() {
		let serializer = FixtureSerializer::new().with_indent(0);
		let records = vec![FixtureRecord::new("gallery.Photo", json!({"image": ""}))];

		let output = serializer.serialize(&records).unwrap();
		assert_eq!(
			output,
			r#"[{"model":"gallery.Photo","fields":{"image":""}}]"#
		);
	}

	#[rstest]
	fn test_for_format_name_unknown() {
		assert!(matches!(
			FixtureSerializer::for_format_name("xml"),
			Err(SeedingError::InvalidFormat(_))
		));
	}

	#[cfg(feature = "yaml")]
	#[rstest]
	fn test_serialize_yaml() {
		let serializer = FixtureSerializer::new().with_format(FixtureFormat::Yaml);
		let records = vec![FixtureRecord::with_pk("gallery.Photo", json!(1), json!({}))];

		let output = serializer.serialize(&records).unwrap();
		assert!(output.contains("model: gallery.Photo"));
	}

	struct OrderRecorder {
		events: Arc<Mutex<Vec<String>>>,
	}

	#[async_trait]
	impl PreDumpHook for OrderRecorder {
		async fn pre_dump(&self, _schema: &ModelSchema, record: &FixtureRecord) -> SeedingResult<()> {
			self.events
				.lock()
				.push(format!("pre_dump {}", record.pk.clone().unwrap_or_default()));
			Ok(())
		}
	}

	#[rstest]
	#[tokio::test]
	async fn test_pre_dump_serializer_fires_per_record() {
		let events = Arc::new(Mutex::new(Vec::new()));
		let schemas = ModelSchemaRegistry::new()
			.with(ModelSchema::new("gallery.Photo").with_file_field("image"))
			.with(ModelSchema::new("gallery.Album"));
		let mut hooks = PreDumpHooks::new();
		hooks.connect(
			"gallery.Photo",
			Arc::new(OrderRecorder {
				events: events.clone(),
			}) as Arc<dyn PreDumpHook>,
		);

		let base = FixtureSerializer::new();
		let serializer = PreDumpSerializer::new(&base, &schemas, &hooks);
		let records = vec![
			FixtureRecord::with_pk("gallery.Photo", json!(1), json!({})),
			FixtureRecord::with_pk("gallery.Album", json!(9), json!({})),
			FixtureRecord::with_pk("gallery.Photo", json!(2), json!({})),
		];

		let output = serializer.serialize(&records).await.unwrap();
		assert_eq!(output, base.serialize(&records).unwrap());
		assert_eq!(
			*events.lock(),
			vec!["pre_dump 1".to_string(), "pre_dump 2".to_string()]
		);
	}
}
