//! Django-compatible fixtures: format, parsing, serialization and loading.

mod discovery;
mod format;
mod loader;
mod parser;
mod serializer;

pub use discovery::FixtureFinder;
pub use format::{FixtureData, FixtureFormat, FixtureRecord};
pub use loader::{FixtureLoader, LoadOptions, LoadResult};
pub use parser::FixtureParser;
pub use serializer::{FixtureSerializer, PreDumpSerializer};
