//! Model schema descriptors.
//!
//! Fixture commands never look models up through a global registry. Instead
//! the application builds a [`ModelSchemaRegistry`] at startup and passes it
//! to every command that needs to know which models exist and which of their
//! fields reference files in storage.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{SeedingError, SeedingResult};
use crate::fixtures::FixtureRecord;

/// Kind of a model field, as far as fixtures are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
	/// Field whose value is stored inline in the record.
	#[default]
	Value,
	/// Field whose value is a path into a storage backend.
	File,
}

/// Descriptor for a single model field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
	/// Attribute name of the field inside a record's `fields` object.
	pub name: String,
	/// Field kind.
	#[serde(default)]
	pub kind: FieldKind,
}

impl FieldDescriptor {
	/// Creates an inline value field.
	pub fn value(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			kind: FieldKind::Value,
		}
	}

	/// Creates a file-valued field.
	pub fn file(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			kind: FieldKind::File,
		}
	}

	/// Returns true for file-valued fields.
	pub fn is_file(&self) -> bool {
		self.kind == FieldKind::File
	}
}

/// Schema of a single model class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSchema {
	/// Model identifier in format "app.Model".
	pub model_id: String,
	/// Declared fields.
	#[serde(default)]
	pub fields: Vec<FieldDescriptor>,
}

impl ModelSchema {
	/// Creates a schema with no fields.
	pub fn new(model_id: impl Into<String>) -> Self {
		Self {
			model_id: model_id.into(),
			fields: Vec::new(),
		}
	}

	/// Adds a field to the schema.
	pub fn with_field(mut self, field: FieldDescriptor) -> Self {
		self.fields.push(field);
		self
	}

	/// Adds a file-valued field to the schema.
	pub fn with_file_field(self, name: impl Into<String>) -> Self {
		self.with_field(FieldDescriptor::file(name))
	}

	/// Returns the app label for this model.
	pub fn app_label(&self) -> &str {
		self.model_id.split('.').next().unwrap_or("")
	}

	/// Returns the model name (without app label).
	pub fn model_name(&self) -> &str {
		self.model_id.split('.').nth(1).unwrap_or("")
	}

	/// Iterates over the file-valued fields, in declaration order.
	pub fn file_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
		self.fields.iter().filter(|field| field.is_file())
	}

	/// Returns true if at least one field is file-valued.
	pub fn has_file_fields(&self) -> bool {
		self.file_fields().next().is_some()
	}

	/// Stored storage path of a file field on a record.
	///
	/// Absent, `null`, non-string and empty values all yield `None`.
	pub fn file_value<'r>(&self, record: &'r FixtureRecord, field: &str) -> Option<&'r str> {
		record
			.field(field)
			.and_then(|value| value.as_str())
			.filter(|path| !path.is_empty())
	}
}

/// Explicit collection of model schemas, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ModelSchemaRegistry {
	schemas: Vec<ModelSchema>,
	index: HashMap<String, usize>,
}

impl ModelSchemaRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a schema, replacing any schema with the same model id.
	pub fn register(&mut self, schema: ModelSchema) {
		match self.index.get(&schema.model_id) {
			Some(&idx) => self.schemas[idx] = schema,
			None => {
				self.index
					.insert(schema.model_id.clone(), self.schemas.len());
				self.schemas.push(schema);
			}
		}
	}

	/// Builder-style variant of [`register`](Self::register).
	pub fn with(mut self, schema: ModelSchema) -> Self {
		self.register(schema);
		self
	}

	/// Gets the schema for a model id.
	pub fn get(&self, model_id: &str) -> Option<&ModelSchema> {
		self.index.get(model_id).map(|&idx| &self.schemas[idx])
	}

	/// Checks if a model id is registered.
	pub fn contains(&self, model_id: &str) -> bool {
		self.index.contains_key(model_id)
	}

	/// Iterates over all schemas in registration order.
	pub fn iter(&self) -> impl Iterator<Item = &ModelSchema> {
		self.schemas.iter()
	}

	/// Iterates over the schemas that declare at least one file-valued field.
	pub fn with_file_fields(&self) -> impl Iterator<Item = &ModelSchema> {
		self.schemas.iter().filter(|schema| schema.has_file_fields())
	}

	/// Resolves a dump label to schemas.
	///
	/// `app.Model` selects one model; a bare `app` selects every model of
	/// that app in registration order.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::ModelNotFound`] if nothing matches.
	pub fn resolve_label(&self, label: &str) -> SeedingResult<Vec<&ModelSchema>> {
		let matches: Vec<&ModelSchema> = if label.contains('.') {
			self.get(label).into_iter().collect()
		} else {
			self.iter()
				.filter(|schema| schema.app_label() == label)
				.collect()
		};

		if matches.is_empty() {
			return Err(SeedingError::ModelNotFound(label.to_string()));
		}
		Ok(matches)
	}

	/// Returns the number of registered schemas.
	pub fn len(&self) -> usize {
		self.schemas.len()
	}

	/// Returns true if no schemas are registered.
	pub fn is_empty(&self) -> bool {
		self.schemas.is_empty()
	}
}

impl FromIterator<ModelSchema> for ModelSchemaRegistry {
	fn from_iter<I: IntoIterator<Item = ModelSchema>>(iter: I) -> Self {
		let mut registry = Self::new();
		for schema in iter {
			registry.register(schema);
		}
		registry
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn registry() -> ModelSchemaRegistry {
		ModelSchemaRegistry::new()
			.with(
				ModelSchema::new("gallery.Photo")
					.with_field(FieldDescriptor::value("title"))
					.with_file_field("image")
					.with_file_field("thumbnail"),
			)
			.with(ModelSchema::new("gallery.Album").with_field(FieldDescriptor::value("name")))
			.with(ModelSchema::new("blog.Post").with_file_field("cover"))
	}

	#[rstest]
	fn test_file_fields(registry: ModelSchemaRegistry) {
		let photo = registry.get("gallery.Photo").unwrap();
		let names: Vec<&str> = photo.file_fields().map(|f| f.name.as_str()).collect();
		assert_eq!(names, vec!["image", "thumbnail"]);
		assert!(!registry.get("gallery.Album").unwrap().has_file_fields());
	}

	#[rstest]
	fn test_with_file_fields(registry: ModelSchemaRegistry) {
		let ids: Vec<&str> = registry
			.with_file_fields()
			.map(|s| s.model_id.as_str())
			.collect();
		assert_eq!(ids, vec!["gallery.Photo", "blog.Post"]);
	}

	#[rstest]
	#[case(json!({"image": "uploads/cat.png"}), Some("uploads/cat.png"))]
	#[case(json!({"image": ""}), None)]
	#[case(json!({"image": null}), None)]
	#[case(json!({}), None)]
	#[case(json!({"image": 3}), None)]
	fn test_file_value(
		registry: ModelSchemaRegistry,
		#[case] fields: serde_json::Value,
		#[case] expected: Option<&str>,
	) {
		let photo = registry.get("gallery.Photo").unwrap();
		let record = FixtureRecord::new("gallery.Photo", fields);
		assert_eq!(photo.file_value(&record, "image"), expected);
	}

	#[rstest]
	fn test_resolve_label(registry: ModelSchemaRegistry) {
		assert_eq!(registry.resolve_label("gallery.Photo").unwrap().len(), 1);
		assert_eq!(registry.resolve_label("gallery").unwrap().len(), 2);
		assert!(matches!(
			registry.resolve_label("gallery.Missing"),
			Err(SeedingError::ModelNotFound(_))
		));
		assert!(matches!(
			registry.resolve_label("shop"),
			Err(SeedingError::ModelNotFound(_))
		));
	}

	#[rstest]
	fn test_register_replaces_existing(mut registry: ModelSchemaRegistry) {
		registry.register(ModelSchema::new("gallery.Photo"));
		assert_eq!(registry.len(), 3);
		assert!(!registry.get("gallery.Photo").unwrap().has_file_fields());
	}

	#[rstest]
	fn test_schema_parts() {
		let schema = ModelSchema::new("gallery.Photo");
		assert_eq!(schema.app_label(), "gallery");
		assert_eq!(schema.model_name(), "Photo");
	}
}
