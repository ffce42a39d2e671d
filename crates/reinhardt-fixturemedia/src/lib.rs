//! Fixture commands that carry media files alongside records.
//!
//! File-valued fields store a path into a storage backend, so a plain
//! fixture only holds the path. The commands in this crate copy the files
//! themselves next to the fixture:
//!
//! - [`DumpObjectCommand`] serializes records to `--outfile` and copies each
//!   referenced file from storage to `<dirname(outfile)>/media/<stored path>`.
//! - [`MediaLoadDataCommand`] loads fixtures and, just before each record is
//!   saved, copies `media/<stored path>` from the fixture directories back
//!   into storage.
//!
//! Both commands delegate everything else to the plain `dumpdata` and
//! `loaddata` commands of `reinhardt-seeding`, hooking in through
//! [`PreDumpHooks`](reinhardt_seeding::PreDumpHooks) and
//! [`PreSaveHooks`](reinhardt_seeding::PreSaveHooks) connected to every
//! model with file fields.
//!
//! # Example
//!
//! ```ignore
//! use reinhardt_fixturemedia::prelude::*;
//!
//! let settings = FixtureMediaSettings::load(None)?;
//! let schemas = Arc::new(settings.to_schema_registry());
//! let storage = create_storage(settings.storage_config()?)?;
//! let store = Arc::new(settings.record_store()?);
//!
//! DumpObjectCommand::new(store, schemas, storage)
//!     .execute(
//!         DumpObjectArgs::new("gallery.Photo"),
//!         DumpObjectOptions::new().with_outfile("gallery/fixtures/photos.json"),
//!     )
//!     .await?;
//! ```

#![warn(missing_docs)]

pub mod dump;
pub mod error;
pub mod load;
pub mod paths;
pub mod prelude;
pub mod settings;

pub use dump::{
	DumpObjectArgs, DumpObjectCommand, DumpObjectOptions, DumpObjectResult, MediaDumpHook,
};
pub use error::{CommandError, CommandResult};
pub use load::{MediaLoadDataCommand, MediaLoadHook};
pub use paths::{
	InstalledApp, MEDIA_DIR, fixture_media_dirs, find_fixture_dirs, media_path,
	media_root_for_outfile,
};
pub use settings::FixtureMediaSettings;
