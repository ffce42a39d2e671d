//! Convenience re-exports for common usage.

pub use std::sync::Arc;

pub use crate::dump::{DumpObjectArgs, DumpObjectCommand, DumpObjectOptions, DumpObjectResult};
pub use crate::error::{CommandError, CommandResult};
pub use crate::load::MediaLoadDataCommand;
pub use crate::settings::FixtureMediaSettings;

pub use reinhardt_seeding::commands::{LoadDataArgs, LoadDataOptions};
pub use reinhardt_seeding::{
	FixtureRecord, JsonFileRecordStore, MemoryRecordStore, ModelSchema, ModelSchemaRegistry,
	RecordStore,
};
pub use reinhardt_storages::{MemoryStorage, StorageBackend, StorageConfig, create_storage};
