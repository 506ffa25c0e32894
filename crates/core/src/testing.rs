//! Test doubles for the host environment.
//!
//! [`FakeEnv`] pins the platform, environment variables, and home
//! directory in memory, so tests exercise macOS-only behavior on any host
//! and never read or mutate the real process environment.
//!
//! ```
//! use swd::env::Platform;
//! use swd::testing::FakeEnv;
//!
//! let env = FakeEnv::mac("/tmp/fake-home").set("SWD_NO_INSTALL", "1");
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use crate::env::{HostEnv, Platform};

/// An in-memory [`HostEnv`].
#[derive(Clone, Debug)]
pub struct FakeEnv {
	platform: Platform,
	vars: HashMap<String, String>,
	home: Option<PathBuf>,
}

impl FakeEnv {
	/// A macOS environment whose home directory is `home`.
	pub fn mac(home: impl Into<PathBuf>) -> Self {
		Self {
			platform: Platform::Mac,
			vars: HashMap::new(),
			home: Some(home.into()),
		}
	}

	/// An environment on a platform the driver does not support.
	pub fn unsupported(platform: Platform) -> Self {
		Self {
			platform,
			vars: HashMap::new(),
			home: None,
		}
	}

	/// Sets an environment variable.
	pub fn set(mut self, name: &str, value: impl Into<String>) -> Self {
		self.vars.insert(name.to_string(), value.into());
		self
	}

	/// Drops the home directory, simulating a user the OS cannot resolve.
	pub fn without_home(mut self) -> Self {
		self.home = None;
		self
	}
}

impl HostEnv for FakeEnv {
	fn platform(&self) -> Platform {
		self.platform
	}

	fn var(&self, name: &str) -> Option<String> {
		self.vars.get(name).filter(|value| !value.is_empty()).cloned()
	}

	fn home_dir(&self) -> Option<PathBuf> {
		self.home.clone()
	}
}
