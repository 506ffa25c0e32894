//! Safari directory resolution.
//!
//! Everything here derives locations from the environment; only
//! [`extensions_directory`] touches the filesystem, and then only to
//! create the final `Extensions` path segment.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::dirs;
use crate::env::HostEnv;
use crate::error::{Error, Result};

/// The user's `Library` directory, the root of everything Safari keeps.
fn library_directory(env: &dyn HostEnv) -> Result<PathBuf> {
	let platform = env.platform();
	if !platform.is_mac() {
		return Err(Error::UnsupportedPlatform(platform));
	}
	let home = env.home_dir().ok_or(Error::HomeNotFound)?;
	Ok(home.join(dirs::LIBRARY))
}

/// Safari's application data directory for the current user.
///
/// A pure derivation: no filesystem access, and a hard
/// [`Error::UnsupportedPlatform`] anywhere but macOS.
pub fn data_directory(env: &dyn HostEnv) -> Result<PathBuf> {
	Ok(library_directory(env)?.join(dirs::SAFARI))
}

/// The directory extension packages are staged into.
///
/// `data_dir` belongs to Safari and must already exist; its absence means
/// the browser is not installed the way this tool expects. Only the final
/// `Extensions` segment is created on demand, never any ancestor.
pub fn extensions_directory(data_dir: &Path) -> Result<PathBuf> {
	if !data_dir.is_dir() {
		return Err(Error::DataDirectoryMissing { path: data_dir.to_path_buf() });
	}
	let extensions = data_dir.join(dirs::EXTENSIONS);
	if !extensions.is_dir() {
		debug!(path = %extensions.display(), "creating extensions directory");
		fs::create_dir(&extensions)
			.map_err(|source| Error::io("create directory", &extensions, source))?;
	}
	Ok(extensions)
}

/// The fixed, ordered list of per-session state paths for the current
/// user.
pub fn session_artifacts(env: &dyn HostEnv) -> Result<Vec<PathBuf>> {
	let library = library_directory(env)?;
	Ok(dirs::SESSION_ARTIFACTS.iter().map(|suffix| library.join(suffix)).collect())
}
