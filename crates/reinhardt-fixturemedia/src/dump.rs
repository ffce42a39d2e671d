//! `dump_object`: dumpdata that also copies media out of storage.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use reinhardt_seeding::commands::{DumpDataArgs, DumpDataCommand, DumpDataOptions};
use reinhardt_seeding::{
	FixtureFormat, FixtureRecord, ModelSchema, ModelSchemaRegistry, PreDumpHook, PreDumpHooks,
	RecordStore, SeedingError, SeedingResult,
};
use reinhardt_storages::StorageBackend;

use crate::error::{CommandError, CommandResult};
use crate::paths::{media_path, media_root_for_outfile};

/// Pre-dump hook copying a record's files from storage into a media root.
///
/// Empty values and files missing from storage are skipped.
pub struct MediaDumpHook {
	storage: Arc<dyn StorageBackend>,
	media_root: PathBuf,
	copied: Mutex<Vec<PathBuf>>,
}

impl MediaDumpHook {
	/// Creates a hook writing below `media_root`.
	pub fn new(storage: Arc<dyn StorageBackend>, media_root: impl Into<PathBuf>) -> Self {
		Self {
			storage,
			media_root: media_root.into(),
			copied: Mutex::new(Vec::new()),
		}
	}

	/// Directory files are copied into.
	pub fn media_root(&self) -> &Path {
		&self.media_root
	}

	/// Files written so far, in copy order.
	pub fn copied(&self) -> Vec<PathBuf> {
		self.copied.lock().clone()
	}

	async fn copy_out(&self, name: &str) -> SeedingResult<()> {
		let Some(target) = media_path(&self.media_root, name) else {
			tracing::debug!(name, "stored path leaves the media root, skipping");
			return Ok(());
		};
		if !self.storage.exists(name).await.map_err(SeedingError::hook)? {
			tracing::debug!(name, "file not in storage, skipping");
			return Ok(());
		}

		let content = self.storage.open(name).await.map_err(SeedingError::hook)?;
		if let Some(parent) = target.parent() {
			tokio::fs::create_dir_all(parent).await?;
		}
		tokio::fs::write(&target, &content).await?;

		tracing::debug!(name, target = %target.display(), bytes = content.len(), "copied media file");
		self.copied.lock().push(target);
		Ok(())
	}
}

#[async_trait]
impl PreDumpHook for MediaDumpHook {
	async fn pre_dump(&self, schema: &ModelSchema, record: &FixtureRecord) -> SeedingResult<()> {
		for field in schema.file_fields() {
			if let Some(name) = schema.file_value(record, &field.name) {
				self.copy_out(name).await?;
			}
		}
		Ok(())
	}
}

/// Arguments for `dump_object`.
#[derive(Debug, Clone, Default)]
pub struct DumpObjectArgs {
	/// Model label (`app.Model`) or app label to dump.
	pub model: String,

	/// Primary keys to dump; empty dumps every record of the model.
	pub ids: Vec<String>,
}

impl DumpObjectArgs {
	/// Creates arguments for one model.
	pub fn new(model: impl Into<String>) -> Self {
		Self {
			model: model.into(),
			ids: Vec::new(),
		}
	}

	/// Restricts the dump to the given primary keys.
	pub fn with_ids<I, S>(mut self, ids: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.ids = ids.into_iter().map(Into::into).collect();
		self
	}
}

/// Options for `dump_object`.
#[derive(Debug, Clone)]
pub struct DumpObjectOptions {
	/// Fixture file to write. Required.
	pub outfile: Option<PathBuf>,

	/// Serialization format name.
	pub format: String,

	/// Indentation width; zero writes compact output.
	pub indent: usize,
}

impl Default for DumpObjectOptions {
	fn default() -> Self {
		Self {
			outfile: None,
			format: "json".to_string(),
			indent: 4,
		}
	}
}

impl DumpObjectOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the fixture file.
	pub fn with_outfile(mut self, outfile: impl Into<PathBuf>) -> Self {
		self.outfile = Some(outfile.into());
		self
	}

	/// Sets the serialization format name.
	pub fn with_format(mut self, format: impl Into<String>) -> Self {
		self.format = format.into();
		self
	}

	/// Sets the indentation width.
	pub fn with_indent(mut self, indent: usize) -> Self {
		self.indent = indent;
		self
	}
}

/// Outcome of `dump_object`.
#[derive(Debug, Clone, PartialEq)]
pub struct DumpObjectResult {
	/// Number of records written to the fixture.
	pub records_dumped: usize,

	/// Media files written, in copy order.
	pub media_files: Vec<PathBuf>,

	/// The fixture file.
	pub outfile: PathBuf,
}

/// Dumps records to a fixture file and their media to `<outfile dir>/media`.
///
/// # Example
///
/// ```ignore
/// let command = DumpObjectCommand::new(store, schemas, storage);
/// let result = command
///     .execute(
///         DumpObjectArgs::new("gallery.Photo").with_ids(["1"]),
///         DumpObjectOptions::new().with_outfile("/tmp/out.json"),
///     )
///     .await?;
/// assert_eq!(result.media_files, vec![PathBuf::from("/tmp/media/uploads/cat.png")]);
/// ```
pub struct DumpObjectCommand {
	store: Arc<dyn RecordStore>,
	schemas: Arc<ModelSchemaRegistry>,
	storage: Arc<dyn StorageBackend>,
}

impl DumpObjectCommand {
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
		"dump_object"
	}

	/// Returns the command description.
	pub fn description(&self) -> &str {
		"Dump objects to a fixture file, copying their media files alongside it"
	}

	/// Runs the dump.
	///
	/// The outfile and format are validated before storage or the file
	/// system is touched, and the outfile is created before any media is
	/// copied.
	pub async fn execute(
		&self,
		args: DumpObjectArgs,
		options: DumpObjectOptions,
	) -> CommandResult<DumpObjectResult> {
		let outfile = options.outfile.ok_or(CommandError::MissingOutfile)?;
		if FixtureFormat::from_name(&options.format).is_err() {
			return Err(CommandError::UnknownFormat(options.format));
		}
		let media_root = media_root_for_outfile(&outfile)?;
		tokio::fs::File::create(&outfile).await?;

		let media_hook = Arc::new(MediaDumpHook::new(self.storage.clone(), media_root));
		let mut hooks = PreDumpHooks::new();
		for schema in self.schemas.with_file_fields() {
			let hook: Arc<dyn PreDumpHook> = media_hook.clone();
			hooks.connect(schema.model_id.clone(), hook);
		}

		let dump = DumpDataCommand::new(self.store.clone(), self.schemas.clone());
		tracing::debug!(command = self.name(), delegate = dump.name(), "{}", dump.description());
		let result = dump
			.execute_with_hooks(
				DumpDataArgs::for_label(args.model).with_primary_keys(args.ids),
				DumpDataOptions::new()
					.with_format(options.format)
					.with_indent(options.indent)
					.with_output(&outfile),
				&hooks,
			)
			.await?;

		let media_files = media_hook.copied();
		tracing::info!(
			records = result.records_dumped,
			media = media_files.len(),
			outfile = %outfile.display(),
			"dumped objects with media"
		);

		Ok(DumpObjectResult {
			records_dumped: result.records_dumped,
			media_files,
			outfile,
		})
	}
}
