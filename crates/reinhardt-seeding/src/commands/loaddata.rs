//! loaddata command implementation.
//!
//! This command loads fixture data from files into a record store.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{SeedingError, SeedingResult};
use crate::fixtures::{FixtureFinder, FixtureLoader, LoadOptions, LoadResult};
use crate::hooks::PreSaveHooks;
use crate::schema::ModelSchemaRegistry;
use crate::store::RecordStore;

/// Arguments for the loaddata command.
#[derive(Debug, Clone, Default)]
pub struct LoadDataArgs {
	/// Fixture labels to load: file paths or names looked up in the
	/// fixture directories.
	pub fixture_labels: Vec<String>,
}

impl LoadDataArgs {
	/// Creates arguments from fixture labels.
	pub fn new<I, S>(labels: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			fixture_labels: labels.into_iter().map(Into::into).collect(),
		}
	}
}

/// Options for the loaddata command.
#[derive(Debug, Clone, Default)]
pub struct LoadDataOptions {
	/// Filter by app labels.
	pub app_labels: Vec<String>,

	/// Continue even if a model is not found.
	pub ignore_missing: bool,

	/// Directories searched for fixture labels that are not paths.
	pub fixture_dirs: Vec<PathBuf>,
}

impl LoadDataOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets app labels filter.
	pub fn with_app_labels(mut self, labels: Vec<String>) -> Self {
		self.app_labels = labels;
		self
	}

	/// Sets ignore missing flag.
	pub fn with_ignore_missing(mut self, ignore: bool) -> Self {
		self.ignore_missing = ignore;
		self
	}

	/// Sets the fixture directories.
	pub fn with_fixture_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
		self.fixture_dirs = dirs;
		self
	}
}

/// The loaddata command for loading fixtures into a record store.
///
/// This command is equivalent to Django's `manage.py loaddata` command.
///
/// # Example
///
/// ```ignore
/// let command = LoadDataCommand::new(store, schemas);
/// let args = LoadDataArgs::new(["photos"]);
/// let options = LoadDataOptions::new().with_fixture_dirs(vec!["gallery/fixtures".into()]);
/// let result = command.execute(args, options).await?;
/// println!("Loaded {} records", result.records_loaded);
/// ```
pub struct LoadDataCommand {
	store: Arc<dyn RecordStore>,
	schemas: Arc<ModelSchemaRegistry>,
}

impl LoadDataCommand {
	/// Creates a loaddata command writing into `store`.
	pub fn new(store: Arc<dyn RecordStore>, schemas: Arc<ModelSchemaRegistry>) -> Self {
		Self { store, schemas }
	}

	/// Returns the command name.
	pub fn name(&self) -> &str {
		"loaddata"
	}

	/// Returns the command description.
	pub fn description(&self) -> &str {
		"Installs the named fixture(s) in the database"
	}

	/// Executes the loaddata command without hooks.
	pub async fn execute(
		&self,
		args: LoadDataArgs,
		options: LoadDataOptions,
	) -> SeedingResult<LoadResult> {
		self.execute_with_hooks(args, options, &PreSaveHooks::new())
			.await
	}

	/// Executes the loaddata command, firing `hooks` before each record is
	/// saved.
	///
	/// Every label is resolved before any record is loaded.
	pub async fn execute_with_hooks(
		&self,
		args: LoadDataArgs,
		options: LoadDataOptions,
		hooks: &PreSaveHooks,
	) -> SeedingResult<LoadResult> {
		if args.fixture_labels.is_empty() {
			return Err(SeedingError::ValidationError {
				field: "fixture_labels".to_string(),
				message: "At least one fixture label must be specified".to_string(),
			});
		}

		let finder = FixtureFinder::new(options.fixture_dirs.clone());
		let mut paths = Vec::new();
		for label in &args.fixture_labels {
			paths.extend(finder.find(label)?);
		}

		let load_options = LoadOptions {
			app_labels: options.app_labels,
			ignore_missing: options.ignore_missing,
		};

		let loader = FixtureLoader::new(self.store.as_ref(), &self.schemas)
			.with_options(load_options)
			.with_hooks(hooks);
		let result = loader.load_from_paths(&paths).await?;

		tracing::info!(
			records = result.records_loaded,
			fixtures = result.fixtures_loaded,
			"Installed {} object(s) from {} fixture(s)",
			result.records_loaded,
			result.fixtures_loaded
		);

		Ok(result)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::ModelSchema;
	use crate::store::MemoryRecordStore;
	use rstest::rstest;
	use std::io::Write;
	use tempfile::{NamedTempFile, tempdir};

	fn command(store: Arc<MemoryRecordStore>) -> LoadDataCommand {
		let schemas = ModelSchemaRegistry::new().with(ModelSchema::new("loaddata.Test"));
		LoadDataCommand::new(store, Arc::new(schemas))
	}

	#[rstest]
	fn test_command_metadata() {
		let cmd = command(Arc::new(MemoryRecordStore::new()));
		assert_eq!(cmd.name(), "loaddata");
		assert!(!cmd.description().is_empty());
	}

	#[rstest]
	fn test_options_builder() {
		let options = LoadDataOptions::new()
			.with_app_labels(vec!["auth".to_string()])
			.with_ignore_missing(true)
			.with_fixture_dirs(vec![PathBuf::from("fixtures")]);

		assert_eq!(options.app_labels, vec!["auth".to_string()]);
		assert!(options.ignore_missing);
		assert_eq!(options.fixture_dirs, vec![PathBuf::from("fixtures")]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_execute_empty_labels() {
		let cmd = command(Arc::new(MemoryRecordStore::new()));
		let result = cmd
			.execute(LoadDataArgs::default(), LoadDataOptions::new())
			.await;
		assert!(matches!(result, Err(SeedingError::ValidationError { .. })));
	}

	#[rstest]
	#[tokio::test]
	async fn test_execute_nonexistent_label() {
		let cmd = command(Arc::new(MemoryRecordStore::new()));
		let result = cmd
			.execute(
				LoadDataArgs::new(["/nonexistent/fixture.json"]),
				LoadDataOptions::new(),
			)
			.await;
		assert!(matches!(result, Err(SeedingError::FileNotFound(_))));
	}

	#[rstest]
	#[tokio::test]
	async fn test_execute_with_fixture_file() {
		let store = Arc::new(MemoryRecordStore::new());
		let mut file = NamedTempFile::with_suffix(".json").unwrap();
		writeln!(file, r#"[{{"model": "loaddata.Test", "fields": {{}}}}]"#).unwrap();

		let cmd = command(store.clone());
		let args = LoadDataArgs::new([file.path().to_string_lossy()]);
		let result = cmd.execute(args, LoadDataOptions::new()).await.unwrap();

		assert_eq!(result.records_loaded, 1);
		assert_eq!(store.records().len(), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_execute_resolves_label_in_fixture_dirs() {
		let store = Arc::new(MemoryRecordStore::new());
		let dir = tempdir().unwrap();
		std::fs::write(
			dir.path().join("initial.json"),
			r#"[{"model": "loaddata.Test", "pk": 3, "fields": {"name": "x"}}]"#,
		)
		.unwrap();

		let cmd = command(store.clone());
		let options = LoadDataOptions::new().with_fixture_dirs(vec![dir.path().to_path_buf()]);
		let result = cmd
			.execute(LoadDataArgs::new(["initial"]), options)
			.await
			.unwrap();

		assert_eq!(result.fixtures_loaded, 1);
		assert_eq!(store.records()[0].fields["name"], "x");
	}
}
