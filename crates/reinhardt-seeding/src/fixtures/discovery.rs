//! Fixture label resolution.

use std::path::{Path, PathBuf};

use super::FixtureFormat;
use crate::error::{SeedingError, SeedingResult};

/// Resolves `loaddata` labels to fixture files.
///
/// A label naming an existing file is used as-is. Otherwise every fixture
/// directory is searched, in order, for the label itself (when it carries a
/// known extension) or for the label with each enabled format's extensions
/// appended.
#[derive(Debug, Clone, Default)]
pub struct FixtureFinder {
	dirs: Vec<PathBuf>,
}

impl FixtureFinder {
	/// Creates a finder searching the given directories.
	pub fn new(dirs: Vec<PathBuf>) -> Self {
		Self { dirs }
	}

	/// Directories searched for bare labels.
	pub fn dirs(&self) -> &[PathBuf] {
		&self.dirs
	}

	/// Finds every fixture file matching a label.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::FileNotFound`] if no file matches.
	pub fn find(&self, label: &str) -> SeedingResult<Vec<PathBuf>> {
		let direct = Path::new(label);
		if direct.is_file() {
			return Ok(vec![direct.to_path_buf()]);
		}

		let candidates = self.candidate_names(label);
		let found: Vec<PathBuf> = self
			.dirs
			.iter()
			.flat_map(|dir| candidates.iter().map(move |name| dir.join(name)))
			.filter(|path| path.is_file())
			.collect();

		if found.is_empty() {
			return Err(SeedingError::FileNotFound(label.to_string()));
		}
		tracing::debug!(label, count = found.len(), "resolved fixture label");
		Ok(found)
	}

	fn candidate_names(&self, label: &str) -> Vec<String> {
		if FixtureFormat::from_path(Path::new(label)).is_some() {
			return vec![label.to_string()];
		}
		FixtureFormat::supported()
			.iter()
			.flat_map(|format| format.extensions())
			.map(|ext| format!("{}.{}", label, ext))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use tempfile::tempdir;

	#[rstest]
	fn test_find_direct_path() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("photos.json");
		std::fs::write(&path, "[]").unwrap();

		let finder = FixtureFinder::default();
		assert_eq!(finder.find(path.to_str().unwrap()).unwrap(), vec![path]);
	}

	#[rstest]
	fn test_find_bare_label_in_dirs() {
		let first = tempdir().unwrap();
		let second = tempdir().unwrap();
		std::fs::write(second.path().join("photos.json"), "[]").unwrap();

		let finder = FixtureFinder::new(vec![
			first.path().to_path_buf(),
			second.path().to_path_buf(),
		]);
		assert_eq!(
			finder.find("photos").unwrap(),
			vec![second.path().join("photos.json")]
		);
		assert_eq!(
			finder.find("photos.json").unwrap(),
			vec![second.path().join("photos.json")]
		);
	}

	#[rstest]
	fn test_find_collects_every_dir() {
		let first = tempdir().unwrap();
		let second = tempdir().unwrap();
		std::fs::write(first.path().join("photos.json"), "[]").unwrap();
		std::fs::write(second.path().join("photos.json"), "[]").unwrap();

		let finder = FixtureFinder::new(vec![
			first.path().to_path_buf(),
			second.path().to_path_buf(),
		]);
		assert_eq!(finder.find("photos").unwrap().len(), 2);
	}

	#[rstest]
	fn test_find_missing_label() {
		let finder = FixtureFinder::new(vec![PathBuf::from("/nonexistent")]);
		assert!(matches!(
			finder.find("photos"),
			Err(SeedingError::FileNotFound(label)) if label == "photos"
		));
	}
}
