//! Error types for extension installation and session-data management.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::env::Platform;

/// Result type for driver-management operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while managing the Safari driver extension or profile.
#[derive(Debug, Error)]
pub enum Error {
	/// Safari's profile layout is only defined on macOS.
	#[error("the Safari driver extension cannot be managed on this platform: {0}")]
	UnsupportedPlatform(Platform),

	/// The current user's home directory could not be determined.
	#[error("could not determine the current user's home directory")]
	HomeNotFound,

	/// Safari's data directory is absent, meaning the browser is not
	/// installed where it was expected.
	#[error("the expected Safari data directory does not exist: {path}")]
	DataDirectoryMissing { path: PathBuf },

	/// The extension override points at a path that is not a file.
	#[error("the extension named by {setting} does not exist: {path}")]
	OverrideNotFound { setting: &'static str, path: PathBuf },

	/// The extension override points at a file that cannot be opened.
	#[error("the extension named by {setting} is not readable: {path}")]
	OverrideUnreadable {
		setting: &'static str,
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// An additional extension listed in the driver options is missing.
	#[error("extension file listed in the driver options does not exist: {path}")]
	ExtensionFileNotFound { path: PathBuf },

	/// The package shipped with this tool could not be located. The
	/// installation of the driver itself is broken, not the user's
	/// configuration.
	#[error("bundled extension package {name} is missing; this copy of the driver is incomplete")]
	BundledExtensionMissing { name: &'static str },

	/// The driver extension is not present where Safari loads it from.
	#[error("the WebDriver extension is not installed: {path}")]
	NotInstalled { path: PathBuf },

	/// A driver options file could not be read.
	#[error("could not read options file {path}")]
	OptionsRead {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// A driver options file is not valid JSON for [`DriverOptions`].
	///
	/// [`DriverOptions`]: crate::options::DriverOptions
	#[error("invalid options file {path}")]
	OptionsParse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	/// A filesystem operation failed. Carries the path it failed on.
	#[error("{op} failed for {path}")]
	Io {
		op: &'static str,
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

impl Error {
	pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
		Error::Io { op, path: path.into(), source }
	}

	/// True when the error is a problem with the user's environment or
	/// configuration rather than with this tool or the filesystem.
	pub fn is_configuration(&self) -> bool {
		matches!(
			self,
			Error::HomeNotFound
				| Error::DataDirectoryMissing { .. }
				| Error::OverrideNotFound { .. }
				| Error::OverrideUnreadable { .. }
				| Error::ExtensionFileNotFound { .. }
				| Error::OptionsRead { .. }
				| Error::OptionsParse { .. }
		)
	}

	/// True when post-install verification found no installed extension.
	pub fn is_not_installed(&self) -> bool {
		matches!(self, Error::NotInstalled { .. })
	}
}
