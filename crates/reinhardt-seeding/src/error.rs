//! Error types for the seeding module.
//!
//! This module defines the error types used throughout the reinhardt-seeding crate.

use thiserror::Error;

/// Errors that can occur during fixture operations.
#[derive(Debug, Error)]
pub enum SeedingError {
	/// Model was not found in the schema registry.
	#[error("Model not found: {0}")]
	ModelNotFound(String),

	/// Unknown serialization format requested.
	#[error("Unknown serialization format: {0}")]
	InvalidFormat(String),

	/// Error parsing fixture data.
	#[error("Parse error: {0}")]
	ParseError(String),

	/// Error serializing data to fixture format.
	#[error("Serialization error: {0}")]
	SerializationError(String),

	/// Record store operation failed.
	#[error("Record store error: {0}")]
	StoreError(String),

	/// I/O operation failed.
	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),

	/// Validation failed for a specific field.
	#[error("Validation error: {field}: {message}")]
	ValidationError {
		/// Field that failed validation.
		field: String,
		/// Validation error message.
		message: String,
	},

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	JsonError(#[from] serde_json::Error),

	/// YAML serialization/deserialization error (when yaml feature is enabled).
	#[cfg(feature = "yaml")]
	#[error("YAML error: {0}")]
	YamlError(#[from] serde_yaml::Error),

	/// Fixture file not found.
	#[error("No fixture named '{0}' found")]
	FileNotFound(String),

	/// Unsupported file extension.
	#[error("Unsupported file extension: {0}")]
	UnsupportedExtension(String),

	/// A pre-dump or pre-save hook failed.
	#[error("Hook error: {0}")]
	HookError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SeedingError {
	/// Wraps an arbitrary error raised inside a hook.
	pub fn hook<E>(error: E) -> Self
	where
		E: std::error::Error + Send + Sync + 'static,
	{
		Self::HookError(Box::new(error))
	}
}

/// Result type alias for seeding operations.
pub type SeedingResult<T> = Result<T, SeedingError>;
