//! dumpdata command implementation.
//!
//! This command serializes stored records of the selected models.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::SeedingResult;
use crate::fixtures::{FixtureRecord, FixtureSerializer, PreDumpSerializer};
use crate::hooks::PreDumpHooks;
use crate::schema::ModelSchemaRegistry;
use crate::store::RecordStore;

/// Arguments for the dumpdata command.
#[derive(Debug, Clone, Default)]
pub struct DumpDataArgs {
	/// Model labels to dump: `app.Model` or a bare `app`.
	pub model_labels: Vec<String>,

	/// Restrict the dump to these primary keys (empty = all records).
	pub primary_keys: Vec<String>,
}

impl DumpDataArgs {
	/// Creates arguments dumping a single label.
	pub fn for_label(label: impl Into<String>) -> Self {
		Self {
			model_labels: vec![label.into()],
			primary_keys: Vec::new(),
		}
	}

	/// Sets the primary key filter.
	pub fn with_primary_keys(mut self, pks: Vec<String>) -> Self {
		self.primary_keys = pks;
		self
	}
}

/// Options for the dumpdata command.
#[derive(Debug, Clone)]
pub struct DumpDataOptions {
	/// Serialization format name.
	pub format: String,

	/// Indentation width for pretty printing; zero means compact output.
	pub indent: usize,

	/// File to write the fixture to. `None` leaves the output in
	/// [`DumpResult::content`].
	pub output: Option<PathBuf>,
}

impl Default for DumpDataOptions {
	fn default() -> Self {
		Self {
			format: "json".to_string(),
			indent: 2,
			output: None,
		}
	}
}

impl DumpDataOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
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

	/// Sets the output file.
	pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
		self.output = Some(path.into());
		self
	}
}

/// Outcome of a dump.
#[derive(Debug, Clone, PartialEq)]
pub struct DumpResult {
	/// Number of records serialized.
	pub records_dumped: usize,

	/// Serialized fixture document.
	pub content: String,

	/// File the document was written to, if any.
	pub output: Option<PathBuf>,
}

/// The dumpdata command for exporting records as a fixture.
///
/// # Example
///
/// ```ignore
/// let command = DumpDataCommand::new(store, schemas);
/// let result = command
///     .execute(DumpDataArgs::for_label("gallery.Photo"), DumpDataOptions::new())
///     .await?;
/// println!("{}", result.content);
/// ```
pub struct DumpDataCommand {
	store: Arc<dyn RecordStore>,
	schemas: Arc<ModelSchemaRegistry>,
}

impl DumpDataCommand {
	/// Creates a dumpdata command reading from `store`.
	pub fn new(store: Arc<dyn RecordStore>, schemas: Arc<ModelSchemaRegistry>) -> Self {
		Self { store, schemas }
	}

	/// Returns the command name.
	pub fn name(&self) -> &str {
		"dumpdata"
	}

	/// Returns the command description.
	pub fn description(&self) -> &str {
		"Output the contents of the selected models as a fixture"
	}

	/// Collects the records selected by the arguments, in label order.
	pub async fn collect(&self, args: &DumpDataArgs) -> SeedingResult<Vec<FixtureRecord>> {
		let mut records = Vec::new();
		for label in &args.model_labels {
			for schema in self.schemas.resolve_label(label)? {
				let fetched = self.store.fetch(&schema.model_id).await?;
				records.extend(fetched.into_iter().filter(|record| {
					args.primary_keys.is_empty()
						|| args.primary_keys.iter().any(|id| record.pk_matches(id))
				}));
			}
		}
		Ok(records)
	}

	/// Executes the dumpdata command without hooks.
	pub async fn execute(
		&self,
		args: DumpDataArgs,
		options: DumpDataOptions,
	) -> SeedingResult<DumpResult> {
		self.execute_with_hooks(args, options, &PreDumpHooks::new())
			.await
	}

	/// Executes the dumpdata command, firing `hooks` before each record is
	/// serialized.
	///
	/// The format is validated before any record is read.
	pub async fn execute_with_hooks(
		&self,
		args: DumpDataArgs,
		options: DumpDataOptions,
		hooks: &PreDumpHooks,
	) -> SeedingResult<DumpResult> {
		let base = FixtureSerializer::for_format_name(&options.format)?.with_indent(options.indent);
		let records = self.collect(&args).await?;

		let serializer = PreDumpSerializer::new(&base, &self.schemas, hooks);
		let content = serializer.serialize(&records).await?;

		if let Some(path) = &options.output {
			tokio::fs::write(path, &content).await?;
		}

		tracing::info!(
			records = records.len(),
			format = %base.format(),
			"dumped fixture records"
		);

		Ok(DumpResult {
			records_dumped: records.len(),
			content,
			output: options.output,
		})
	}
}
