//! Convenience re-exports for common usage.
//!
//! ```ignore
//! use reinhardt_seeding::prelude::*;
//! ```

// Error types
pub use crate::error::{SeedingError, SeedingResult};

// Fixture types
pub use crate::fixtures::{
	FixtureData, FixtureFinder, FixtureFormat, FixtureLoader, FixtureParser, FixtureRecord,
	FixtureSerializer, LoadOptions, LoadResult, PreDumpSerializer,
};

// Schemas, hooks and stores
pub use crate::hooks::{HookRegistry, PreDumpHook, PreDumpHooks, PreSaveHook, PreSaveHooks};
pub use crate::schema::{FieldDescriptor, FieldKind, ModelSchema, ModelSchemaRegistry};
pub use crate::store::{JsonFileRecordStore, MemoryRecordStore, RecordStore};

// Command types
pub use crate::commands::{
	DumpDataArgs, DumpDataCommand, DumpDataOptions, DumpResult, LoadDataArgs, LoadDataCommand,
	LoadDataOptions,
};
