//! `loaddata`: loads fixtures and restores their media into storage.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use reinhardt_seeding::commands::{LoadDataArgs, LoadDataCommand, LoadDataOptions};
use reinhardt_seeding::fixtures::LoadResult;
use reinhardt_seeding::{
	FixtureRecord, ModelSchema, ModelSchemaRegistry, PreSaveHook, PreSaveHooks, RecordStore,
	SeedingError, SeedingResult,
};
use reinhardt_storages::StorageBackend;

use crate::error::CommandResult;
use crate::paths::{fixture_media_dirs, media_path};

/// Pre-save hook restoring a record's files from fixture media directories.
///
/// Directories are searched in order and the first one holding the file
/// wins. A file found in none of them is reported as a warning and the
/// record is saved anyway.
pub struct MediaLoadHook {
	storage: Arc<dyn StorageBackend>,
	media_dirs: Vec<PathBuf>,
	restored: Mutex<Vec<String>>,
	warnings: Mutex<Vec<String>>,
}

impl MediaLoadHook {
	/// Creates a hook reading from `media_dirs`.
	pub fn new(storage: Arc<dyn StorageBackend>, media_dirs: Vec<PathBuf>) -> Self {
		Self {
			storage,
			media_dirs,
			restored: Mutex::new(Vec::new()),
			warnings: Mutex::new(Vec::new()),
		}
	}

	/// Media directories searched, in order.
	pub fn media_dirs(&self) -> &[PathBuf] {
		&self.media_dirs
	}

	/// Storage names written so far.
	pub fn restored(&self) -> Vec<String> {
		self.restored.lock().clone()
	}

	/// Warnings emitted so far.
	pub fn warnings(&self) -> Vec<String> {
		self.warnings.lock().clone()
	}

	async fn restore(&self, name: &str) -> SeedingResult<()> {
		let mut missing = Vec::new();
		for dir in &self.media_dirs {
			let Some(source) = media_path(dir, name) else {
				self.warn(format!(
					"Stored path {} leaves the media directory, skipping",
					name
				));
				return Ok(());
			};
			match tokio::fs::read(&source).await {
				Ok(content) => {
					let stored = self
						.storage
						.save(name, &content)
						.await
						.map_err(SeedingError::hook)?;
					tracing::debug!(name = %stored, source = %source.display(), "restored media file");
					self.restored.lock().push(stored);
					return Ok(());
				}
				Err(e) if e.kind() == io::ErrorKind::NotFound => missing.push(source),
				Err(e) => return Err(e.into()),
			}
		}

		for source in missing {
			self.warn(format!(
				"Expected file at {} doesn't exist, skipping",
				source.display()
			));
		}
		Ok(())
	}

	fn warn(&self, message: String) {
		tracing::warn!("{message}");
		self.warnings.lock().push(message);
	}
}

#[async_trait]
impl PreSaveHook for MediaLoadHook {
	async fn pre_save(&self, schema: &ModelSchema, record: &FixtureRecord) -> SeedingResult<()> {
		for field in schema.file_fields() {
			if let Some(name) = schema.file_value(record, &field.name) {
				self.restore(name).await?;
			}
		}
		Ok(())
	}
}

/// Loads fixtures, copying each record's media into storage before it is
/// saved.
///
/// Media directories are derived once from
/// [`LoadDataOptions::fixture_dirs`] before any record is processed, and
/// files are written to the single storage backend given at construction.
pub struct MediaLoadDataCommand {
	store: Arc<dyn RecordStore>,
	schemas: Arc<ModelSchemaRegistry>,
	storage: Arc<dyn StorageBackend>,
}

impl MediaLoadDataCommand {
	/// Creates the command.
	pub fn new(
		store: Arc<dyn RecordStore>,
		schemas: Arc<ModelSchemaRegistry>,
		storage: Arc<dyn StorageBackend>,
	) -> Self {
		Self {
			store,
			schemas,
			storage,
		}
	}

	/// Returns the command name.
	pub fn name(&self) -> &str {
		"loaddata"
	}

	/// Returns the command description.
	pub fn description(&self) -> &str {
		"Installs the named fixture(s) in the database, restoring their media files"
	}

	/// Runs the load.
	///
	/// Missing media files end up in [`LoadResult::warnings`].
	pub async fn execute(
		&self,
		args: LoadDataArgs,
		options: LoadDataOptions,
	) -> CommandResult<LoadResult> {
		let media_hook = Arc::new(MediaLoadHook::new(
			self.storage.clone(),
			fixture_media_dirs(&options.fixture_dirs),
		));
		tracing::debug!(dirs = ?media_hook.media_dirs(), "fixture media directories");

		let mut hooks = PreSaveHooks::new();
		for schema in self.schemas.with_file_fields() {
			let hook: Arc<dyn PreSaveHook> = media_hook.clone();
			hooks.connect(schema.model_id.clone(), hook);
		}

		let load = LoadDataCommand::new(self.store.clone(), self.schemas.clone());
		tracing::debug!(command = self.name(), delegate = load.name(), "{}", load.description());
		let mut result = load.execute_with_hooks(args, options, &hooks).await?;
		result.warnings.extend(media_hook.warnings());

		tracing::info!(
			records = result.records_loaded,
			media = media_hook.restored().len(),
			"loaded fixtures with media"
		);
		Ok(result)
	}
}
