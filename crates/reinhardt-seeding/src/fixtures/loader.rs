//! Fixture loading.

use std::path::{Path, PathBuf};

use super::{FixtureData, FixtureParser};
use crate::error::{SeedingError, SeedingResult};
use crate::hooks::PreSaveHooks;
use crate::schema::ModelSchemaRegistry;
use crate::store::RecordStore;

/// Options controlling how fixtures are loaded.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
	/// Only load records belonging to these apps (empty = all apps).
	pub app_labels: Vec<String>,

	/// Skip records whose model is not registered instead of failing.
	pub ignore_missing: bool,
}

/// Outcome of a load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadResult {
	/// Number of records persisted.
	pub records_loaded: usize,

	/// Number of fixture files read.
	pub fixtures_loaded: usize,

	/// Models skipped because they are not registered.
	pub skipped_models: Vec<String>,

	/// Non-fatal problems reported while loading.
	pub warnings: Vec<String>,
}

impl LoadResult {
	/// Folds another result into this one.
	pub fn merge(&mut self, other: LoadResult) {
		self.records_loaded += other.records_loaded;
		self.fixtures_loaded += other.fixtures_loaded;
		for model in other.skipped_models {
			if !self.skipped_models.contains(&model) {
				self.skipped_models.push(model);
			}
		}
		self.warnings.extend(other.warnings);
	}
}

/// Loads parsed fixtures into a record store.
///
/// Records are processed one at a time in file order: the schema is resolved,
/// the pre-save hooks for the model run, and the record is saved.
pub struct FixtureLoader<'a> {
	store: &'a dyn RecordStore,
	schemas: &'a ModelSchemaRegistry,
	hooks: Option<&'a PreSaveHooks>,
	options: LoadOptions,
	parser: FixtureParser,
}

impl<'a> FixtureLoader<'a> {
	/// Creates a loader writing to `store`.
	pub fn new(store: &'a dyn RecordStore, schemas: &'a ModelSchemaRegistry) -> Self {
		Self {
			store,
			schemas,
			hooks: None,
			options: LoadOptions::default(),
			parser: FixtureParser::new(),
		}
	}

	/// Sets the load options.
	pub fn with_options(mut self, options: LoadOptions) -> Self {
		self.options = options;
		self
	}

	/// Installs pre-save hooks.
	pub fn with_hooks(mut self, hooks: &'a PreSaveHooks) -> Self {
		self.hooks = Some(hooks);
		self
	}

	/// Loads a single fixture file.
	pub async fn load_from_path(&self, path: &Path) -> SeedingResult<LoadResult> {
		let data = self.parser.parse_file(path)?;
		let mut result = self.load_data(&data).await?;
		result.fixtures_loaded = 1;
		Ok(result)
	}

	/// Loads several fixture files in order.
	pub async fn load_from_paths(&self, paths: &[PathBuf]) -> SeedingResult<LoadResult> {
		let mut result = LoadResult::default();
		for path in paths {
			result.merge(self.load_from_path(path).await?);
		}
		Ok(result)
	}

	/// Loads already parsed fixture data.
	pub async fn load_data(&self, data: &FixtureData) -> SeedingResult<LoadResult> {
		let mut result = LoadResult::default();

		for record in data.filter_by_app(&self.options.app_labels) {
			let Some(schema) = self.schemas.get(&record.model) else {
				if !self.options.ignore_missing {
					return Err(SeedingError::ModelNotFound(record.model.clone()));
				}
				if !result.skipped_models.contains(&record.model) {
					result.skipped_models.push(record.model.clone());
				}
				continue;
			};

			if let Some(hooks) = self.hooks {
				hooks.send(schema, record).await?;
			}
			let pk = self.store.save(record).await?;
			tracing::debug!(model = %record.model, %pk, "loaded record");
			result.records_loaded += 1;
		}

		Ok(result)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fixtures::{FixtureFormat, FixtureRecord};
	use crate::hooks::PreSaveHook;
	use crate::schema::ModelSchema;
	use crate::store::MemoryRecordStore;
	use async_trait::async_trait;
	use parking_lot::Mutex;
	use rstest::{fixture, rstest};
	use serde_json::json;
	use std::sync::Arc;

	#[fixture]
	fn schemas() -> ModelSchemaRegistry {
		ModelSchemaRegistry::new()
			.with(ModelSchema::new("gallery.Photo").with_file_field("image"))
			.with(ModelSchema::new("blog.Post"))
	}

	fn data() -> FixtureData {
		FixtureData::from_records(
			vec![
				FixtureRecord::with_pk("gallery.Photo", json!(1), json!({"image": "a.png"})),
				FixtureRecord::with_pk("blog.Post", json!(1), json!({})),
				FixtureRecord::with_pk("shop.Item", json!(1), json!({})),
			],
			FixtureFormat::Json,
		)
	}

	struct SaveRecorder {
		seen: Arc<Mutex<Vec<String>>>,
	}

	#[async_trait]
	impl PreSaveHook for SaveRecorder {
		async fn pre_save(
			&self,
			schema: &ModelSchema,
			_record: &crate::fixtures::FixtureRecord,
		) -> SeedingResult<()> {
			self.seen.lock().push(schema.model_id.clone());
			Ok(())
		}
	}

	#[rstest]
	#[tokio::test]
	async fn test_unknown_model_fails(schemas: ModelSchemaRegistry) {
		let store = MemoryRecordStore::new();
		let loader = FixtureLoader::new(&store, &schemas);

		let result = loader.load_data(&data()).await;
		assert!(matches!(result, Err(SeedingError::ModelNotFound(m)) if m == "shop.Item"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_ignore_missing_skips(schemas: ModelSchemaRegistry) {
		let store = MemoryRecordStore::new();
		let loader = FixtureLoader::new(&store, &schemas).with_options(LoadOptions {
			ignore_missing: true,
			..Default::default()
		});

		let result = loader.load_data(&data()).await.unwrap();
		assert_eq!(result.records_loaded, 2);
		assert_eq!(result.skipped_models, vec!["shop.Item".to_string()]);
		assert_eq!(store.records().len(), 2);
	}

	#[rstest]
	#[tokio::test]
	async fn test_app_label_filter(schemas: ModelSchemaRegistry) {
		let store = MemoryRecordStore::new();
		let loader = FixtureLoader::new(&store, &schemas).with_options(LoadOptions {
			app_labels: vec!["gallery".to_string()],
			..Default::default()
		});

		let result = loader.load_data(&data()).await.unwrap();
		assert_eq!(result.records_loaded, 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_hooks_fire_before_save(schemas: ModelSchemaRegistry) {
		let seen = Arc::new(Mutex::new(Vec::new()));
		let mut hooks = PreSaveHooks::new();
		hooks.connect(
			"gallery.Photo",
			Arc::new(SaveRecorder { seen: seen.clone() }) as Arc<dyn PreSaveHook>,
		);

		let store = MemoryRecordStore::new();
		let loader = FixtureLoader::new(&store, &schemas)
			.with_hooks(&hooks)
			.with_options(LoadOptions {
				ignore_missing: true,
				..Default::default()
			});

		loader.load_data(&data()).await.unwrap();
		assert_eq!(*seen.lock(), vec!["gallery.Photo".to_string()]);
	}

	#[rstest]
	fn test_merge_results() {
		let mut total = LoadResult {
			records_loaded: 1,
			fixtures_loaded: 1,
			skipped_models: vec!["shop.Item".to_string()],
			warnings: vec![],
		};
		total.merge(LoadResult {
			records_loaded: 2,
			fixtures_loaded: 1,
			skipped_models: vec!["shop.Item".to_string()],
			warnings: vec!["missing".to_string()],
		});

		assert_eq!(total.records_loaded, 3);
		assert_eq!(total.fixtures_loaded, 2);
		assert_eq!(total.skipped_models.len(), 1);
		assert_eq!(total.warnings, vec!["missing".to_string()]);
	}
}
