//! Host platform and process-environment access.
//!
//! Everything this crate learns from the outside world (the operating
//! system, environment variables, the user's home directory) flows through
//! the [`HostEnv`] trait, so tests can simulate any platform and user
//! without touching the machine they run on.

use std::fmt;
use std::path::PathBuf;

/// The host operating system, as far as this crate is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
	/// macOS, the only platform Safari extension management is defined for.
	Mac,
	Linux,
	Windows,
	/// Anything else.
	Unknown,
}

impl Platform {
	/// The platform of the running process.
	pub fn current() -> Self {
		match std::env::consts::OS {
			"macos" => Platform::Mac,
			"linux" => Platform::Linux,
			"windows" => Platform::Windows,
			_ => Platform::Unknown,
		}
	}

	pub fn is_mac(self) -> bool {
		matches!(self, Platform::Mac)
	}
}

impl fmt::Display for Platform {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Platform::Mac => "macos",
			Platform::Linux => "linux",
			Platform::Windows => "windows",
			Platform::Unknown => "unknown",
		};
		f.write_str(name)
	}
}

/// Read-only view of the process environment.
pub trait HostEnv {
	/// The host operating system.
	fn platform(&self) -> Platform;

	/// An environment variable, `None` when unset or empty.
	fn var(&self, name: &str) -> Option<String>;

	/// The current user's home directory.
	fn home_dir(&self) -> Option<PathBuf>;
}

/// [`HostEnv`] backed by the real process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemEnv;

impl HostEnv for SystemEnv {
	fn platform(&self) -> Platform {
		Platform::current()
	}

	fn var(&self, name: &str) -> Option<String> {
		std::env::var(name).ok().filter(|value| !value.is_empty())
	}

	fn home_dir(&self) -> Option<PathBuf> {
		// Safari keeps per-user state under /Users/<user>; match that
		// convention before falling back to the OS notion of home.
		self.var("USER")
			.map(|user| PathBuf::from("/Users").join(user))
			.or_else(dirs::home_dir)
	}
}
