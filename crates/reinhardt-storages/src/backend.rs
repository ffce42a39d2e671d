//! Storage backend trait definition.

use crate::Result;
use async_trait::async_trait;

/// Storage backend trait for media file persistence.
///
/// Names are storage-relative paths such as `uploads/cat.png`; the same
/// string is what a file-valued field stores.
///
/// # Examples
///
/// ```rust,no_run
/// use reinhardt_storages::{StorageBackend, Result};
///
/// async fn copy_out(storage: &dyn StorageBackend, name: &str) -> Result<Option<Vec<u8>>> {
///     if !storage.exists(name).await? {
///         return Ok(None);
///     }
///     Ok(Some(storage.open(name).await?))
/// }
/// ```
#[async_trait]
pub trait StorageBackend: Send + Sync {
	/// Save a file to the storage backend, replacing any existing content.
	///
	/// Returns the name the file was stored under.
	///
	/// # Errors
	///
	/// Returns `` `StorageError::PermissionDenied` `` if write access is denied.
	async fn save(&self, name: &str, content: &[u8]) -> Result<String>;

	/// Read the full contents of a file.
	///
	/// # Errors
	///
	/// Returns `` `StorageError::NotFound` `` if the file doesn't exist.
	async fn open(&self, name: &str) -> Result<Vec<u8>>;

	/// Check if a file exists in the storage backend.
	async fn exists(&self, name: &str) -> Result<bool>;
}
