//! Extension package selection.
//!
//! Decides which bytes the installer writes, in priority order: the
//! explicit override named through [`EXTENSION_LOCATION_ENV`], then the
//! package bundled with this tool's own artifacts. When installation is
//! disabled there is nothing to select.
//!
//! [`EXTENSION_LOCATION_ENV`]: crate::options::EXTENSION_LOCATION_ENV

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::dirs;
use crate::env::HostEnv;
use crate::error::{Error, Result};
use crate::options::{self, DriverOptions};

/// An extension package chosen for installation: an opaque file with a
/// label describing where it came from. The package is only ever read.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtensionPackage {
	label: String,
	path: PathBuf,
}

impl ExtensionPackage {
	fn new(label: impl Into<String>, path: PathBuf) -> Self {
		Self { label: label.into(), path }
	}

	/// Human-readable origin of the package, for logs and status output.
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Where the package bytes live.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Reads the whole package into memory.
	pub fn read(&self) -> Result<Vec<u8>> {
		fs::read(&self.path).map_err(|source| Error::io("read", &self.path, source))
	}

	/// Copies the package bytes to `dest`.
	pub fn copy_to(&self, dest: &Path) -> Result<()> {
		fs::copy(&self.path, dest)
			.map_err(|source| Error::io("copy extension package", dest, source))?;
		Ok(())
	}
}

/// Resolves the package to install, or `None` when installation is
/// disabled.
///
/// An explicit override is validated before the disable toggles are even
/// consulted: the caller named a specific package, and a broken override
/// must surface rather than silently fall back or skip.
pub fn resolve(env: &dyn HostEnv, options: &DriverOptions) -> Result<Option<ExtensionPackage>> {
	if let Some(value) = env.var(options::EXTENSION_LOCATION_ENV) {
		return override_package(PathBuf::from(value)).map(Some);
	}

	if options.install_disabled(env) {
		debug!("extension installation disabled, no package selected");
		return Ok(None);
	}

	bundled_package(env).map(Some)
}

fn override_package(path: PathBuf) -> Result<ExtensionPackage> {
	if !path.is_file() {
		return Err(Error::OverrideNotFound {
			setting: options::EXTENSION_LOCATION_ENV,
			path,
		});
	}
	// Readability is part of the override contract; probe it now so the
	// failure names the setting instead of surfacing as a copy error.
	File::open(&path).map_err(|source| Error::OverrideUnreadable {
		setting: options::EXTENSION_LOCATION_ENV,
		path: path.clone(),
		source,
	})?;
	info!(path = %path.display(), "using driver extension override");
	Ok(ExtensionPackage::new(
		format!("{} override", options::EXTENSION_LOCATION_ENV),
		path,
	))
}

/// The extension package distributed with this tool.
///
/// Search order: a runtime relocation override, then the location staged
/// at build time, then a package sitting next to the executable.
fn bundled_package(env: &dyn HostEnv) -> Result<ExtensionPackage> {
	for candidate in bundled_candidates(env) {
		if candidate.is_file() {
			debug!(path = %candidate.display(), "using bundled extension package");
			return Ok(ExtensionPackage::new("bundled extension", candidate));
		}
		debug!(path = %candidate.display(), "bundled extension candidate not present");
	}
	Err(Error::BundledExtensionMissing { name: dirs::BUNDLED_PACKAGE })
}

fn bundled_candidates(env: &dyn HostEnv) -> Vec<PathBuf> {
	let mut candidates = Vec::new();

	if let Some(value) = env.var(options::BUNDLED_LOCATION_ENV) {
		candidates.push(PathBuf::from(value));
	}

	if let Some(staged) = option_env!("SWD_STAGED_EXTENSION") {
		candidates.push(PathBuf::from(staged));
	}

	if let Ok(exe) = std::env::current_exe() {
		if let Some(parent) = exe.parent() {
			candidates.push(parent.join(dirs::BUNDLED_PACKAGE));
		}
	}

	candidates
}
