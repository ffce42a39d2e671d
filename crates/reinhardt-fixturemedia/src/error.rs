//! Error types for fixture media commands.

use reinhardt_seeding::SeedingError;
use reinhardt_storages::StorageError;
use thiserror::Error;

/// Errors reported by the dump and load orchestrators.
///
/// The CLI prints these as `CommandError: <message>` and exits non-zero.
#[derive(Debug, Error)]
pub enum CommandError {
	/// `--outfile` was not supplied to the dump command.
	#[error("No --outfile specified (this is a required option)")]
	MissingOutfile,

	/// The requested serialization format is not registered.
	#[error("Unknown serialization format: {0}")]
	UnknownFormat(String),

	/// The settings file is missing or inconsistent.
	#[error("Invalid settings: {0}")]
	Settings(String),

	/// The settings file is not valid TOML.
	#[error("Invalid settings file: {0}")]
	Toml(#[from] toml::de::Error),

	/// Propagated from the underlying fixture commands.
	#[error(transparent)]
	Seeding(#[from] SeedingError),

	/// Propagated from the storage backend.
	#[error("Storage error: {0}")]
	Storage(#[from] StorageError),

	/// File system error outside of storage.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

/// Result type alias for fixture media commands.
pub type CommandResult<T> = Result<T, CommandError>;
