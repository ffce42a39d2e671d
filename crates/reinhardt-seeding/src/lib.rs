//! Fixture loading and dumping for Reinhardt models.
//!
//! This crate provides Django-compatible fixture handling:
//!
//! - **Fixture System**: Parse and serialize JSON/YAML fixture files
//! - **Schemas**: An explicit [`ModelSchemaRegistry`] describing which
//!   models exist and which of their fields reference stored files
//! - **Hooks**: Per-model pre-dump and pre-save hooks fired while fixtures
//!   are serialized or loaded
//! - **Commands**: `dumpdata` and `loaddata`
//!
//! # Features
//!
//! - `json` - JSON fixture format support (enabled by default)
//! - `yaml` - YAML fixture format support
//! - `full` - All features enabled
//!
//! # Quick Start
//!
//! Create a fixture file (`gallery/fixtures/photos.json`):
//!
//! ```json
//! [
//!   {
//!     "model": "gallery.Photo",
//!     "pk": 1,
//!     "fields": {
//!       "title": "Cat",
//!       "image": "uploads/cat.png"
//!     }
//!   }
//! ]
//! ```
//!
//! Load it into a record store:
//!
//! ```ignore
//! use reinhardt_seeding::prelude::*;
//!
//! let schemas = ModelSchemaRegistry::new()
//!     .with(ModelSchema::new("gallery.Photo").with_file_field("image"));
//! let store = MemoryRecordStore::new();
//!
//! let loader = FixtureLoader::new(&store, &schemas);
//! let result = loader.load_from_path(Path::new("gallery/fixtures/photos.json")).await?;
//! println!("Loaded {} records", result.records_loaded);
//! ```
//!
//! # Architecture
//!
//! - [`FixtureRecord`](fixtures::FixtureRecord) - Single fixture record with model ID, pk, and fields
//! - [`FixtureFormat`](fixtures::FixtureFormat) - Supported formats (JSON, YAML)
//! - [`FixtureParser`](fixtures::FixtureParser) - Parse fixture files
//! - [`FixtureLoader`](fixtures::FixtureLoader) - Load fixtures into a [`RecordStore`]
//! - [`FixtureSerializer`](fixtures::FixtureSerializer) - Serialize records to fixtures
//! - [`PreDumpSerializer`](fixtures::PreDumpSerializer) - Serializer firing pre-dump hooks
//! - [`LoadDataCommand`](commands::LoadDataCommand) - Load fixtures
//! - [`DumpDataCommand`](commands::DumpDataCommand) - Export fixtures

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod commands;
pub mod error;
pub mod fixtures;
pub mod hooks;
pub mod prelude;
pub mod schema;
pub mod store;

// Re-export commonly used types at crate root
pub use error::{SeedingError, SeedingResult};
pub use fixtures::{FixtureData, FixtureFormat, FixtureLoader, FixtureParser, FixtureRecord};
pub use hooks::{HookRegistry, PreDumpHook, PreDumpHooks, PreSaveHook, PreSaveHooks};
pub use schema::{FieldDescriptor, FieldKind, ModelSchema, ModelSchemaRegistry};
pub use store::{JsonFileRecordStore, MemoryRecordStore, RecordStore};
