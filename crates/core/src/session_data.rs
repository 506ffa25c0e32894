//! Session-artifact hygiene for Safari profiles.
//!
//! Previous automated runs leave caches, cookies, history, and storage
//! behind; clearing them gives the next session a profile with no
//! carried-over state.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::env::HostEnv;
use crate::error::{Error, Result};
use crate::paths;

/// The set of per-session state Safari accumulates for the current user.
#[derive(Clone, Debug)]
pub struct SessionData {
	artifacts: Vec<PathBuf>,
}

impl SessionData {
	/// The session-data set for the current platform and user.
	pub fn for_current_platform(env: &dyn HostEnv) -> Result<Self> {
		Ok(Self { artifacts: paths::session_artifacts(env)? })
	}

	/// The artifact paths [`clear`](Self::clear) would delete, in order.
	pub fn artifacts(&self) -> &[PathBuf] {
		&self.artifacts
	}

	/// Deletes every artifact that exists. Destructive and final; entries
	/// already deleted stay deleted when a later one fails.
	///
	/// An absent artifact is normal (earlier sessions may not have created
	/// every kind of state) and is skipped. Any other failure aborts the
	/// sweep with the offending path.
	///
	/// Returns the number of artifacts actually deleted.
	pub fn clear(&self) -> Result<usize> {
		let mut deleted = 0;
		for path in &self.artifacts {
			let meta = match fs::symlink_metadata(path) {
				Ok(meta) => meta,
				Err(err) if err.kind() == io::ErrorKind::NotFound => {
					debug!(path = %path.display(), "session artifact not present");
					continue;
				}
				Err(source) => return Err(Error::io("inspect", path, source)),
			};

			let removed = if meta.is_dir() {
				fs::remove_dir_all(path)
			} else {
				fs::remove_file(path)
			};
			removed.map_err(|source| Error::io("delete", path, source))?;
			debug!(path = %path.display(), "deleted session artifact");
			deleted += 1;
		}
		info!(deleted, known = self.artifacts.len(), "cleared session data");
		Ok(deleted)
	}
}
