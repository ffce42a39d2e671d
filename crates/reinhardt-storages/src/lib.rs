//! # reinhardt-storages
//!
//! Storage backend abstraction for Reinhardt media files.
//!
//! File-valued model fields store a path into a storage backend rather than
//! the file contents. This crate provides the backend interface that fixture
//! commands use to read media out of storage on dump and write it back on
//! load, together with two implementations:
//!
//! - [`LocalStorage`](backends::local::LocalStorage): files below a base
//!   directory on the local file system (`local` feature, enabled by default)
//! - [`MemoryStorage`](backends::memory::MemoryStorage): an in-process map,
//!   useful for tests and dry runs
//!
//! ## Example
//!
//! ```rust,no_run
//! use reinhardt_storages::{StorageBackend, create_storage, StorageConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StorageConfig::from_env()?;
//!     let storage = create_storage(config)?;
//!
//!     storage.save("uploads/cat.png", b"PNGDATA").await?;
//!     let content = storage.open("uploads/cat.png").await?;
//!     assert_eq!(content, b"PNGDATA");
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod backends;
pub mod config;
pub mod error;
pub mod factory;

pub use backend::StorageBackend;
#[cfg(feature = "local")]
pub use backends::local::LocalStorage;
pub use backends::memory::MemoryStorage;
pub use config::{BackendType, StorageConfig};
pub use error::{Result, StorageError};
pub use factory::create_storage;
