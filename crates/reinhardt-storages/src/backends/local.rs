//! Local file system storage backend.

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::config::LocalConfig;
use crate::{Result, StorageBackend, StorageError};

/// Storage backend rooted at a directory on the local file system.
#[derive(Debug, Clone)]
pub struct LocalStorage {
	base_path: PathBuf,
}

impl LocalStorage {
	/// Create a new local storage backend.
	///
	/// # Errors
	///
	/// Returns `` `StorageError::ConfigError` `` if the base path does not exist
	/// or is not a directory.
	pub fn new(config: LocalConfig) -> Result<Self> {
		let base_path = PathBuf::from(config.base_path);

		if !base_path.exists() {
			return Err(StorageError::ConfigError(format!(
				"Base path does not exist: {}",
				base_path.display()
			)));
		}

		if !base_path.is_dir() {
			return Err(StorageError::ConfigError(format!(
				"Base path is not a directory: {}",
				base_path.display()
			)));
		}

		Ok(Self { base_path })
	}

	/// Root directory of this backend.
	pub fn base_path(&self) -> &Path {
		&self.base_path
	}

	/// Map a storage name onto a path below the base directory.
	///
	/// Leading separators are ignored; parent-directory components are rejected.
	fn get_path(&self, name: &str) -> Result<PathBuf> {
		let mut path = self.base_path.clone();
		for component in Path::new(name.trim_start_matches('/')).components() {
			match component {
				Component::Normal(part) => path.push(part),
				Component::CurDir => {}
				_ => return Err(StorageError::InvalidName(name.to_string())),
			}
		}
		if path == self.base_path {
			return Err(StorageError::InvalidName(name.to_string()));
		}
		Ok(path)
	}

	async fn existing_file(&self, name: &str) -> Result<PathBuf> {
		let path = self.get_path(name)?;
		match fs::metadata(&path).await {
			Ok(metadata) if metadata.is_file() => Ok(path),
			Ok(_) => Err(StorageError::NotFound(name.to_string())),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				Err(StorageError::NotFound(name.to_string()))
			}
			Err(e) => Err(map_io_error(e, name)),
		}
	}
}

fn map_io_error(error: std::io::Error, name: &str) -> StorageError {
	match error.kind() {
		std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(name.to_string()),
		std::io::ErrorKind::NotFound => StorageError::NotFound(name.to_string()),
		_ => StorageError::Io(error),
	}
}

#[async_trait]
impl StorageBackend for LocalStorage {
	async fn save(&self, name: &str, content: &[u8]) -> Result<String> {
		let path = self.get_path(name)?;

		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)
				.await
				.map_err(|e| map_io_error(e, name))?;
		}

		fs::write(&path, content)
			.await
			.map_err(|e| map_io_error(e, name))?;
		tracing::debug!(name, bytes = content.len(), "saved file to local storage");

		Ok(name.to_string())
	}

	async fn open(&self, name: &str) -> Result<Vec<u8>> {
		let path = self.existing_file(name).await?;
		fs::read(&path).await.map_err(|e| map_io_error(e, name))
	}

	async fn exists(&self, name: &str) -> Result<bool> {
		let path = match self.get_path(name) {
			Ok(path) => path,
			Err(StorageError::InvalidName(_)) => return Ok(false),
			Err(e) => return Err(e),
		};
		Ok(fs::metadata(&path)
			.await
			.map(|metadata| metadata.is_file())
			.unwrap_or(false))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use tempfile::TempDir;

	fn storage(dir: &TempDir) -> LocalStorage {
		LocalStorage::new(LocalConfig {
			base_path: dir.path().to_string_lossy().into_owned(),
		})
		.unwrap()
	}

	#[rstest]
	fn test_new_missing_base_path() {
		let result = LocalStorage::new(LocalConfig {
			base_path: "/nonexistent/media/root".to_string(),
		});
		assert!(matches!(result, Err(StorageError::ConfigError(_))));
	}

	#[rstest]
	fn test_get_path_strips_leading_separator() {
		let dir = TempDir::new().unwrap();
		let storage = storage(&dir);
		let path = storage.get_path("/uploads/cat.png").unwrap();
		assert_eq!(path, dir.path().join("uploads").join("cat.png"));
	}

	#[rstest]
	#[case("../secret.txt")]
	#[case("uploads/../../secret.txt")]
	#[case("")]
	#[case("/")]
	fn test_get_path_rejects_escaping_names(#[case] name: &str) {
		let dir = TempDir::new().unwrap();
		let storage = storage(&dir);
		assert!(matches!(
			storage.get_path(name),
			Err(StorageError::InvalidName(_))
		));
	}

	#[rstest]
	#[tokio::test]
	async fn test_exists_false_for_directory() {
		let dir = TempDir::new().unwrap();
		let storage = storage(&dir);
		std::fs::create_dir_all(dir.path().join("uploads")).unwrap();
		assert!(!storage.exists("uploads").await.unwrap());
	}
}
