//! Storage error types.

use thiserror::Error;

/// Errors returned by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
	/// The named file does not exist in the backend.
	#[error("File not found: {0}")]
	NotFound(String),

	/// The backend refused access to the named file.
	#[error("Permission denied: {0}")]
	PermissionDenied(String),

	/// The name cannot be mapped onto the backend (e.g. it escapes the root).
	#[error("Invalid file name: {0}")]
	InvalidName(String),

	/// Backend configuration is missing or invalid.
	#[error("Configuration error: {0}")]
	ConfigError(String),

	/// Underlying I/O failure.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
