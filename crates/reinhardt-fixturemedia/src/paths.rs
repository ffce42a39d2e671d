//! Media directory layout.
//!
//! A fixture directory carries its media next to the serialized records:
//!
//! ```text
//! <fixture-root>/
//!     photos.json
//!     media/
//!         uploads/cat.png
//! ```
//!
//! The stored path of a file-valued field is mirrored verbatim below
//! `media/`.

use std::io;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Name of the media subdirectory inside a fixture directory.
pub const MEDIA_DIR: &str = "media";

/// An installed application and the directory its code lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledApp {
	/// App label, the first half of `app.Model` ids.
	pub label: String,

	/// App directory; fixtures are looked up in `<path>/fixtures`.
	pub path: PathBuf,
}

impl InstalledApp {
	/// Creates an installed app entry.
	pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
		Self {
			label: label.into(),
			path: path.into(),
		}
	}

	/// The app's own fixture directory.
	pub fn fixtures_dir(&self) -> PathBuf {
		self.path.join("fixtures")
	}
}

/// Media root for a dump written to `outfile`: `<dirname(abspath(outfile))>/media`.
pub fn media_root_for_outfile(outfile: &Path) -> io::Result<PathBuf> {
	let absolute = std::path::absolute(outfile)?;
	let parent = absolute.parent().unwrap_or_else(|| Path::new("/"));
	Ok(parent.join(MEDIA_DIR))
}

/// Location of a stored file below a media root.
///
/// Leading slashes are dropped. Returns `None` when the stored path has a
/// parent-directory component or names no file, so the result always lies
/// strictly below `root`.
pub fn media_path(root: &Path, stored: &str) -> Option<PathBuf> {
	let mut path = root.to_path_buf();
	let mut parts = 0;
	for component in Path::new(stored.trim_start_matches('/')).components() {
		match component {
			Component::Normal(part) => {
				path.push(part);
				parts += 1;
			}
			Component::CurDir => {}
			_ => return None,
		}
	}
	(parts > 0).then_some(path)
}

/// Every directory fixtures may live in: each app's `fixtures/` directory,
/// followed by the configured extra directories, in order.
pub fn find_fixture_dirs(apps: &[InstalledApp], extra: &[PathBuf]) -> Vec<PathBuf> {
	apps.iter()
		.map(InstalledApp::fixtures_dir)
		.chain(extra.iter().cloned())
		.collect()
}

/// The `media/` subdirectories of `dirs` that exist on disk.
pub fn fixture_media_dirs(dirs: &[PathBuf]) -> Vec<PathBuf> {
	dirs.iter()
		.map(|dir| dir.join(MEDIA_DIR))
		.filter(|dir| dir.is_dir())
		.collect()
}
