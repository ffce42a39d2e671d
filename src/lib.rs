//! # fixturemedia
//!
//! Django-style fixture commands that carry media files alongside the
//! serialized records.
//!
//! A file-valued field stores a path into a storage backend, so a plain
//! fixture would only hold that path. `dump_object` copies each referenced
//! file to `<dirname(outfile)>/media/<stored path>`, and `loaddata` copies
//! `media/<stored path>` from the fixture directories back into storage
//! just before each record is saved:
//!
//! ```text
//! gallery/fixtures/
//!     photos.json
//!     media/
//!         uploads/cat.png
//! ```
//!
//! ## Crates
//!
//! - [`storages`]: storage backends (`reinhardt-storages`)
//! - [`seeding`]: fixture format, record stores, hooks and the plain
//!   `dumpdata`/`loaddata` commands (`reinhardt-seeding`)
//! - the media-aware commands, re-exported at the crate root
//!   (`reinhardt-fixturemedia`)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fixturemedia::prelude::*;
//!
//! # async fn example() -> CommandResult<()> {
//! let schemas = Arc::new(
//!     ModelSchemaRegistry::new().with(ModelSchema::new("gallery.Photo").with_file_field("image")),
//! );
//! let store = Arc::new(JsonFileRecordStore::new("db.json"));
//! let storage = create_storage(StorageConfig::from_env()?)?;
//!
//! let result = DumpObjectCommand::new(store, schemas, storage)
//!     .execute(
//!         DumpObjectArgs::new("gallery.Photo"),
//!         DumpObjectOptions::new().with_outfile("gallery/fixtures/photos.json"),
//!     )
//!     .await?;
//! println!("{} media file(s) copied", result.media_files.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `yaml` - YAML fixture format
//! - `full` - All features enabled

pub use reinhardt_seeding as seeding;
pub use reinhardt_storages as storages;

pub use reinhardt_fixturemedia::{
	CommandError, CommandResult, DumpObjectArgs, DumpObjectCommand, DumpObjectOptions,
	DumpObjectResult, FixtureMediaSettings, InstalledApp, MEDIA_DIR, MediaDumpHook,
	MediaLoadDataCommand, MediaLoadHook, dump, error, fixture_media_dirs, find_fixture_dirs, load,
	media_path, media_root_for_outfile, paths, settings,
};

/// Commonly used types.
pub mod prelude {
	pub use reinhardt_fixturemedia::prelude::*;
	pub use reinhardt_seeding::{FieldDescriptor, FieldKind, FixtureFormat};
	pub use reinhardt_storages::LocalStorage;
}
