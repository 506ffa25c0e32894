//! Extension installation into Safari's profile.
//!
//! The driver is a guest in the user's browser profile. Anything already
//! installed is moved into a backup directory before the driver extension
//! is written, never deleted outright, and moving the backups into place
//! again is its own explicit operation. Nothing is restored automatically
//! on shutdown.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::dirs;
use crate::env::HostEnv;
use crate::error::{Error, Result};
use crate::options::DriverOptions;
use crate::paths;
use crate::source;

/// What [`Installer::install`] did.
#[derive(Clone, Debug, PartialEq)]
pub enum InstallOutcome {
	/// Installation is disabled; the filesystem was not touched.
	Skipped,
	/// Packages were staged into the extensions directory.
	Installed {
		/// The directory packages were written to.
		directory: PathBuf,
		/// Labels of the packages written, driver extension first.
		packages: Vec<String>,
		/// Backup locations of previously installed files.
		backed_up: Vec<PathBuf>,
	},
}

/// Installs the driver extension, plus any extras from the options, into
/// Safari's extensions directory.
pub struct Installer<'e> {
	env: &'e dyn HostEnv,
	options: DriverOptions,
}

impl<'e> Installer<'e> {
	pub fn new(env: &'e dyn HostEnv, options: DriverOptions) -> Self {
		Self { env, options }
	}

	/// Resolves a package and stages it, parking whatever was installed
	/// before in the backup directory.
	///
	/// Each call means "make a known extension version active now"; a
	/// repeat call backs up what the previous call installed. Any failure
	/// after the first write can leave a partial install behind, and is
	/// never reported as success.
	pub fn install(&self) -> Result<InstallOutcome> {
		let Some(package) = source::resolve(self.env, &self.options)? else {
			info!("extension installation disabled, leaving installed extensions alone");
			return Ok(InstallOutcome::Skipped);
		};

		let directory = self.install_directory()?;
		let existing = installed_entries(&directory)?;
		let backed_up = back_up(&directory, existing)?;

		let target = directory.join(dirs::DRIVER_EXTENSION);
		package.copy_to(&target)?;
		info!(package = package.label(), target = %target.display(), "installed driver extension");

		let mut packages = vec![package.label().to_string()];
		for file in &self.options.extension_files {
			packages.push(stage_user_package(file, &directory)?);
		}

		Ok(InstallOutcome::Installed { directory, packages, backed_up })
	}

	/// Checks that the driver extension is present where Safari loads
	/// enabled extensions from. Read-only.
	///
	/// That location is the data directory itself, not the staging
	/// directory, and always the derived one: enabled extensions surface
	/// where the browser manages them, regardless of any custom install
	/// directory.
	pub fn verify_installed(&self) -> Result<()> {
		let expected = paths::data_directory(self.env)?.join(dirs::DRIVER_EXTENSION);
		if !expected.is_file() {
			return Err(Error::NotInstalled { path: expected });
		}
		debug!(path = %expected.display(), "driver extension is installed");
		Ok(())
	}

	/// Puts the user's pre-existing extensions back: removes the staged
	/// driver package, moves every entry of the backup directory into the
	/// extensions directory (replacing staged files on name collision),
	/// and removes the then-empty backup directory.
	///
	/// Returns the number of entries moved back. A missing backup
	/// directory is not an error; there is simply nothing to restore.
	pub fn restore_backups(&self) -> Result<usize> {
		let directory = self.install_directory()?;

		let staged = directory.join(dirs::DRIVER_EXTENSION);
		if staged.is_file() {
			fs::remove_file(&staged).map_err(|source| Error::io("delete", &staged, source))?;
			debug!(path = %staged.display(), "removed staged driver extension");
		}

		let backups = directory.join(dirs::BACKUPS);
		if !backups.is_dir() {
			debug!(path = %backups.display(), "no backups to restore");
			return Ok(0);
		}

		let mut restored = 0;
		let entries =
			fs::read_dir(&backups).map_err(|source| Error::io("read directory", &backups, source))?;
		for entry in entries {
			let entry = entry.map_err(|source| Error::io("read directory", &backups, source))?;
			let dest = directory.join(entry.file_name());
			move_entry(&entry.path(), &dest)?;
			restored += 1;
		}
		fs::remove_dir(&backups).map_err(|source| Error::io("remove directory", &backups, source))?;
		info!(count = restored, directory = %directory.display(), "restored backed-up extensions");
		Ok(restored)
	}

	/// The extensions directory installs target, honoring a custom data
	/// directory from the options.
	fn install_directory(&self) -> Result<PathBuf> {
		let data_dir = match &self.options.data_dir {
			Some(dir) => dir.clone(),
			None => paths::data_directory(self.env)?,
		};
		paths::extensions_directory(&data_dir)
	}
}

/// Top-level entries of the extensions directory, the backup directory
/// excepted, sorted for deterministic processing.
fn installed_entries(directory: &Path) -> Result<Vec<PathBuf>> {
	let mut found = Vec::new();
	let entries =
		fs::read_dir(directory).map_err(|source| Error::io("read directory", directory, source))?;
	for entry in entries {
		let entry = entry.map_err(|source| Error::io("read directory", directory, source))?;
		if entry.file_name() == OsStr::new(dirs::BACKUPS) {
			continue;
		}
		found.push(entry.path());
	}
	found.sort();
	Ok(found)
}

/// Moves `existing` into the backup directory, creating it on first use.
/// On a name collision the older backup is replaced; the newest
/// pre-install state is the one worth keeping.
fn back_up(directory: &Path, existing: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
	if existing.is_empty() {
		return Ok(Vec::new());
	}

	let backups = directory.join(dirs::BACKUPS);
	if !backups.is_dir() {
		fs::create_dir(&backups).map_err(|source| Error::io("create directory", &backups, source))?;
	}

	let mut backed_up = Vec::with_capacity(existing.len());
	for path in existing {
		let Some(name) = path.file_name() else {
			continue;
		};
		let dest = backups.join(name);
		move_entry(&path, &dest)?;
		debug!(from = %path.display(), to = %dest.display(), "backed up installed extension");
		backed_up.push(dest);
	}
	Ok(backed_up)
}

/// Copies a user-supplied extension package into the extensions directory
/// under its own file name, returning that name.
fn stage_user_package(file: &Path, directory: &Path) -> Result<String> {
	let name = match file.file_name() {
		Some(name) if file.is_file() => name,
		_ => return Err(Error::ExtensionFileNotFound { path: file.to_path_buf() }),
	};
	let dest = directory.join(name);
	fs::copy(file, &dest).map_err(|source| Error::io("copy extension package", &dest, source))?;
	debug!(from = %file.display(), to = %dest.display(), "installed extension from options");
	Ok(name.to_string_lossy().into_owned())
}

/// Moves `src` to `dest`, replacing whatever `dest` currently is.
fn move_entry(src: &Path, dest: &Path) -> Result<()> {
	if let Ok(meta) = fs::symlink_metadata(dest) {
		let removed = if meta.is_dir() { fs::remove_dir_all(dest) } else { fs::remove_file(dest) };
		removed.map_err(|source| Error::io("replace", dest, source))?;
	}
	fs::rename(src, dest).map_err(|source| Error::io("move", src, source))
}
