//! Safari WebDriver companion-extension and session-data management.
//!
//! The driver automates Safari through a browser extension. Before a
//! session can start, that extension has to be present in Safari's
//! per-user profile, and state left behind by earlier sessions (caches,
//! cookies, history, local storage) has to be swept away. This crate owns
//! exactly that surface:
//!
//! - [`paths`] resolves Safari's per-user directories. Only macOS has a
//!   defined layout; every other platform is a hard error.
//! - [`source`] decides which extension package to install: an explicit
//!   override, the package bundled with this tool, or nothing at all when
//!   installation is disabled.
//! - [`install`] stages the chosen package into Safari's Extensions
//!   directory, moving whatever was installed before into a backup
//!   directory, and verifies the result.
//! - [`session_data`] erases the per-session artifacts so each run starts
//!   from a clean slate.
//!
//! All of it is synchronous, blocking filesystem work that runs a handful
//! of times per driver-session lifecycle.

pub mod env;
pub mod error;
pub mod install;
pub mod options;
pub mod paths;
pub mod session_data;
pub mod source;
pub mod testing;

pub use env::{HostEnv, Platform, SystemEnv};
pub use error::{Error, Result};
pub use install::{InstallOutcome, Installer};
pub use options::DriverOptions;
pub use session_data::SessionData;
pub use source::ExtensionPackage;

/// Names making up Safari's per-user storage layout.
///
/// This is hard-coded knowledge about a third-party application's on-disk
/// format, collected in one place because it is the part most likely to
/// need revision when Safari changes.
pub mod dirs {
	/// The user's `Library` directory, directly under the home directory.
	pub const LIBRARY: &str = "Library";
	/// Safari's data directory, under `Library`.
	pub const SAFARI: &str = "Safari";
	/// The extension staging directory, under the data directory.
	pub const EXTENSIONS: &str = "Extensions";
	/// Where previously installed extensions are parked during an install,
	/// under `Extensions`.
	pub const BACKUPS: &str = "backups";
	/// The file name Safari expects the driver extension at.
	pub const DRIVER_EXTENSION: &str = "WebDriver.safariextz";
	/// The file name of the extension package bundled with this tool.
	pub const BUNDLED_PACKAGE: &str = "SafariDriver.safariextz";

	/// Per-session state, relative to the user's `Library`, in the order
	/// it is cleared.
	pub const SESSION_ARTIFACTS: &[&str] = &[
		"Caches/com.apple.Safari/Cache.db",
		"Cookies/Cookies.binarycookies",
		"Cookies/Cookies.plist",
		"Safari/History.plist",
		"Safari/LastSession.plist",
		"Safari/LocalStorage",
		"Safari/Databases",
	];
}
