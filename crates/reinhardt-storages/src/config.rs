//! Storage backend configuration.

use std::env;
use std::str::FromStr;

use crate::{Result, StorageError};

/// Storage backend type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
	/// Local file system
	Local,
	/// Process-local memory
	Memory,
}

impl std::fmt::Display for BackendType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			BackendType::Local => write!(f, "Local"),
			BackendType::Memory => write!(f, "Memory"),
		}
	}
}

impl FromStr for BackendType {
	type Err = StorageError;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_lowercase().as_str() {
			"local" => Ok(BackendType::Local),
			"memory" => Ok(BackendType::Memory),
			_ => Err(StorageError::ConfigError(format!(
				"Invalid backend type: {}",
				s
			))),
		}
	}
}

/// Configuration for the local file system backend.
#[cfg(feature = "local")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalConfig {
	/// Base directory path for file storage (the media root)
	pub base_path: String,
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
	#[cfg(feature = "local")]
	Local(LocalConfig),
	Memory,
}

impl StorageConfig {
	/// Backend type described by this configuration.
	pub fn backend_type(&self) -> BackendType {
		match self {
			#[cfg(feature = "local")]
			StorageConfig::Local(_) => BackendType::Local,
			StorageConfig::Memory => BackendType::Memory,
		}
	}

	/// Load configuration from environment variables.
	///
	/// # Environment Variables
	///
	/// - `STORAGE_BACKEND`: Backend type ("local", "memory")
	/// - `LOCAL_BASE_PATH`: Base directory path (required for "local")
	pub fn from_env() -> Result<Self> {
		let backend_type = env::var("STORAGE_BACKEND").map_err(|_| {
			StorageError::ConfigError("STORAGE_BACKEND environment variable not set".to_string())
		})?;

		Self::from_parts(
			backend_type.parse::<BackendType>()?,
			env::var("LOCAL_BASE_PATH").ok(),
		)
	}

	/// Build a configuration from a backend type and an optional base path.
	pub fn from_parts(backend_type: BackendType, base_path: Option<String>) -> Result<Self> {
		match backend_type {
			#[cfg(feature = "local")]
			BackendType::Local => {
				let base_path = base_path.ok_or_else(|| {
					StorageError::ConfigError(
						"LOCAL_BASE_PATH is required for the local backend".to_string(),
					)
				})?;
				Ok(StorageConfig::Local(LocalConfig { base_path }))
			}
			BackendType::Memory => Ok(StorageConfig::Memory),
			#[allow(unreachable_patterns)]
			_ => Err(StorageError::ConfigError(format!(
				"Backend type not enabled: {:?}",
				backend_type
			))),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;

	#[rstest]
	#[case("local", BackendType::Local)]
	#[case("LOCAL", BackendType::Local)]
	#[case("memory", BackendType::Memory)]
	fn test_backend_type_from_str(#[case] input: &str, #[case] expected: BackendType) {
		assert_eq!(input.parse::<BackendType>().unwrap(), expected);
	}

	#[rstest]
	fn test_backend_type_invalid() {
		assert!(matches!(
			"s3".parse::<BackendType>(),
			Err(StorageError::ConfigError(_))
		));
	}

	#[rstest]
	fn test_local_requires_base_path() {
		let result = StorageConfig::from_parts(BackendType::Local, None);
		assert!(matches!(result, Err(StorageError::ConfigError(_))));
	}

	#[rstest]
	#[serial]
	fn test_from_env_local() {
		// SAFETY: serialized with other environment-mutating tests
		unsafe {
			env::set_var("STORAGE_BACKEND", "local");
			env::set_var("LOCAL_BASE_PATH", "/srv/media");
		}

		let config = StorageConfig::from_env().unwrap();
		assert_eq!(
			config,
			StorageConfig::Local(LocalConfig {
				base_path: "/srv/media".to_string()
			})
		);

		unsafe {
			env::remove_var("STORAGE_BACKEND");
			env::remove_var("LOCAL_BASE_PATH");
		}
	}

	#[rstest]
	#[serial]
	fn test_from_env_missing_backend() {
		unsafe {
			env::remove_var("STORAGE_BACKEND");
		}
		assert!(matches!(
			StorageConfig::from_env(),
			Err(StorageError::ConfigError(_))
		));
	}
}
