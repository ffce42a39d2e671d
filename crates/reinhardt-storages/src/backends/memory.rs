//! In-memory storage backend.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::{Result, StorageBackend, StorageError};

/// Storage backend holding file contents in a process-local map.
///
/// Contents are lost when the value is dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
	files: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStorage {
	/// Create an empty in-memory backend.
	pub fn new() -> Self {
		Self::default()
	}

	/// Names of all stored files, in lexical order.
	pub fn names(&self) -> Vec<String> {
		self.files.read().keys().cloned().collect()
	}

	/// Number of stored files.
	pub fn len(&self) -> usize {
		self.files.read().len()
	}

	/// Returns true if no files are stored.
	pub fn is_empty(&self) -> bool {
		self.files.read().is_empty()
	}

	fn key(name: &str) -> String {
		name.trim_start_matches('/').to_string()
	}
}

#[async_trait]
impl StorageBackend for MemoryStorage {
	async fn save(&self, name: &str, content: &[u8]) -> Result<String> {
		let key = Self::key(name);
		if key.is_empty() {
			return Err(StorageError::InvalidName(name.to_string()));
		}
		self.files.write().insert(key, content.to_vec());
		Ok(name.to_string())
	}

	async fn open(&self, name: &str) -> Result<Vec<u8>> {
		self.files
			.read()
			.get(&Self::key(name))
			.cloned()
			.ok_or_else(|| StorageError::NotFound(name.to_string()))
	}

	async fn exists(&self, name: &str) -> Result<bool> {
		Ok(self.files.read().contains_key(&Self::key(name)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[tokio::test]
	async fn test_save_and_open() {
		let storage = MemoryStorage::new();
		storage.save("uploads/cat.png", b"PNGDATA").await.unwrap();

		assert!(storage.exists("uploads/cat.png").await.unwrap());
		assert_eq!(storage.open("uploads/cat.png").await.unwrap(), b"PNGDATA");
		assert_eq!(storage.names(), vec!["uploads/cat.png".to_string()]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_leading_slash_is_same_key() {
		let storage = MemoryStorage::new();
		storage.save("/uploads/a.txt", b"a").await.unwrap();
		assert!(storage.exists("uploads/a.txt").await.unwrap());
	}

	#[rstest]
	#[tokio::test]
	async fn test_missing_file_errors() {
		let storage = MemoryStorage::new();
		assert!(!storage.exists("missing.bin").await.unwrap());
		assert!(matches!(
			storage.open("missing.bin").await,
			Err(StorageError::NotFound(_))
		));
	}

	#[rstest]
	#[tokio::test]
	async fn test_empty_name_rejected() {
		let storage = MemoryStorage::new();
		assert!(matches!(
			storage.save("", b"x").await,
			Err(StorageError::InvalidName(_))
		));
	}
}
