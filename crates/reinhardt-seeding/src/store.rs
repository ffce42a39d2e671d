//! Record stores.
//!
//! A [`RecordStore`] is the persistence layer the fixture commands read from
//! when dumping and write to when loading. Records are kept in
//! fixture form, keyed by `(model, pk)`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::{SeedingError, SeedingResult};
use crate::fixtures::{FixtureFormat, FixtureParser, FixtureRecord, FixtureSerializer};

/// Persistence interface for model records.
#[async_trait]
pub trait RecordStore: Send + Sync {
	/// Returns every stored record of a model, in insertion order.
	async fn fetch(&self, model_id: &str) -> SeedingResult<Vec<FixtureRecord>>;

	/// Inserts or replaces a record and returns its primary key.
	///
	/// A record without a primary key is assigned the next integer key for
	/// its model.
	async fn save(&self, record: &FixtureRecord) -> SeedingResult<Value>;
}

/// Inserts `record` into `records`, replacing any record with the same key.
///
/// Fails when the next integer key would overflow `i64`.
fn upsert(records: &mut Vec<FixtureRecord>, record: &FixtureRecord) -> SeedingResult<Value> {
	let mut record = record.clone();
	let pk = match record.pk.clone() {
		Some(pk) => pk,
		None => {
			let next = records
				.iter()
				.filter(|r| r.model == record.model)
				.filter_map(|r| r.pk.as_ref().and_then(Value::as_i64))
				.max()
				.unwrap_or(0)
				.checked_add(1)
				.ok_or_else(|| {
					SeedingError::StoreError(format!(
						"no integer primary key left for {}",
						record.model
					))
				})?;
			let pk = Value::from(next);
			record.pk = Some(pk.clone());
			pk
		}
	};

	match records
		.iter_mut()
		.find(|r| r.model == record.model && r.pk.as_ref() == Some(&pk))
	{
		Some(existing) => *existing = record,
		None => records.push(record),
	}
	Ok(pk)
}

/// Record store held in memory.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
	records: RwLock<Vec<FixtureRecord>>,
}

impl MemoryRecordStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a store pre-populated with records.
	pub fn with_records(records: Vec<FixtureRecord>) -> Self {
		Self {
			records: RwLock::new(records),
		}
	}

	/// Snapshot of every stored record.
	pub fn records(&self) -> Vec<FixtureRecord> {
		self.records.read().clone()
	}
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
	async fn fetch(&self, model_id: &str) -> SeedingResult<Vec<FixtureRecord>> {
		Ok(self
			.records
			.read()
			.iter()
			.filter(|record| record.model == model_id)
			.cloned()
			.collect())
	}

	async fn save(&self, record: &FixtureRecord) -> SeedingResult<Value> {
		upsert(&mut self.records.write(), record)
	}
}

/// Record store backed by a single JSON document in fixture format.
///
/// The file is read on every operation and rewritten on every save. A missing
/// file is treated as an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileRecordStore {
	path: PathBuf,
}

impl JsonFileRecordStore {
	/// Creates a store backed by the given file.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// Path of the backing file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	async fn read_all(&self) -> SeedingResult<Vec<FixtureRecord>> {
		let content = match tokio::fs::read_to_string(&self.path).await {
			Ok(content) => content,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
			Err(e) => return Err(SeedingError::IoError(e)),
		};
		if content.trim().is_empty() {
			return Ok(Vec::new());
		}
		FixtureParser::new()
			.parse_string(&content, FixtureFormat::Json)
			.map(|data| data.records)
			.map_err(|e| SeedingError::StoreError(format!("{}: {}", self.path.display(), e)))
	}

	async fn write_all(&self, records: &[FixtureRecord]) -> SeedingResult<()> {
		let content = FixtureSerializer::new().serialize(records)?;
		if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
			tokio::fs::create_dir_all(parent).await?;
		}
		tokio::fs::write(&self.path, content).await?;
		Ok(())
	}
}

#[async_trait]
impl RecordStore for JsonFileRecordStore {
	async fn fetch(&self, model_id: &str) -> SeedingResult<Vec<FixtureRecord>> {
		let mut records = self.read_all().await?;
		records.retain(|record| record.model == model_id);
		Ok(records)
	}

	async fn save(&self, record: &FixtureRecord) -> SeedingResult<Value> {
		let mut records = self.read_all().await?;
		let pk = upsert(&mut records, record)?;
		self.write_all(&records).await?;
		Ok(pk)
	}
}
