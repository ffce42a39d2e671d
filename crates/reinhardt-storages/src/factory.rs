//! Factory function for creating storage backends.

use crate::{Result, StorageBackend, StorageConfig};
use std::sync::Arc;

/// Create a storage backend from configuration.
///
/// # Examples
///
/// ```rust,no_run
/// use reinhardt_storages::{create_storage, StorageConfig};
///
/// let storage = create_storage(StorageConfig::Memory).unwrap();
/// ```
pub fn create_storage(config: StorageConfig) -> Result<Arc<dyn StorageBackend>> {
	tracing::debug!(backend = %config.backend_type(), "creating storage backend");
	match config {
		#[cfg(feature = "local")]
		StorageConfig::Local(local_config) => {
			let storage = crate::backends::local::LocalStorage::new(local_config)?;
			Ok(Arc::new(storage))
		}
		StorageConfig::Memory => Ok(Arc::new(crate::backends::memory::MemoryStorage::new())),
	}
}
