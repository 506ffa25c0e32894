//! Driver configuration consumed by the installer and session manager.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::env::HostEnv;
use crate::error::{Error, Result};

/// Environment variable naming a pre-packaged extension to install instead
/// of the bundled one.
pub const EXTENSION_LOCATION_ENV: &str = "SWD_DRIVER_EXTENSION";

/// Environment variable that disables installing the driver extension.
pub const NO_INSTALL_ENV: &str = "SWD_NO_INSTALL";

/// Environment variable relocating the bundled extension package at run
/// time. Takes precedence over the location staged at build time.
pub const BUNDLED_LOCATION_ENV: &str = "SWD_BUNDLED_EXTENSION";

/// Per-session driver configuration.
///
/// Loads from a JSON file with camelCase keys; every field defaults, so a
/// partial file (or `{}`) is accepted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DriverOptions {
	/// Data directory of a non-standard Safari installation. Replaces the
	/// derived `<home>/Library/Safari` location for installation.
	pub data_dir: Option<PathBuf>,
	/// The caller manages the driver extension themselves; do not install
	/// one. Distinct from [`NO_INSTALL_ENV`], which expresses the same
	/// outcome out of band, so the two inputs are kept separate.
	pub use_custom_driver_extension: bool,
	/// Erase accumulated session data after installing, so the session
	/// starts from a clean slate.
	pub clean_session: bool,
	/// Additional extension packages to install next to the driver
	/// extension, in order.
	pub extension_files: Vec<PathBuf>,
}

impl DriverOptions {
	/// Loads options from a JSON file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = fs::read_to_string(path).map_err(|source| Error::OptionsRead {
			path: path.to_path_buf(),
			source,
		})?;
		serde_json::from_str(&content).map_err(|source| Error::OptionsParse {
			path: path.to_path_buf(),
			source,
		})
	}

	/// True when driver-extension installation is suppressed, either by
	/// [`use_custom_driver_extension`](Self::use_custom_driver_extension)
	/// or by the [`NO_INSTALL_ENV`] toggle.
	pub fn install_disabled(&self, env: &dyn HostEnv) -> bool {
		self.use_custom_driver_extension || env_flag(env, NO_INSTALL_ENV)
	}
}

/// Boolean environment toggle: set to `1` or `true` (any case).
fn env_flag(env: &dyn HostEnv, name: &str) -> bool {
	env.var(name)
		.map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
		.unwrap_or(false)
}
