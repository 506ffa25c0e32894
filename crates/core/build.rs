//! Stages the bundled extension package at build time.
//!
//! The prebuilt `SafariDriver.safariextz` is produced by the extension
//! build and is not committed next to these sources. When a copy is found
//! (either named through `SWD_EXTENSION_PACKAGE` or dropped into
//! `extension/` at the workspace root), its location is baked in through
//! the `SWD_STAGED_EXTENSION` rustc env. When it is absent the build still
//! succeeds and the crate falls back to runtime discovery.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const PACKAGE_NAME: &str = "SafariDriver.safariextz";
const PACKAGE_ENV: &str = "SWD_EXTENSION_PACKAGE";

fn main() {
	println!("cargo:rerun-if-changed=build.rs");
	println!("cargo:rerun-if-env-changed={PACKAGE_ENV}");

	match locate_package() {
		Some(package) => {
			println!("cargo:rustc-env=SWD_STAGED_EXTENSION={}", package.display());
		}
		None => {
			println!(
				"cargo:warning=no bundled {PACKAGE_NAME} found; set {PACKAGE_ENV} or place it under extension/ at the workspace root"
			);
			println!(
				"cargo:warning=the driver will look for the package next to the executable at run time"
			);
		}
	}
}

/// The explicit override first, then `extension/` at the workspace root.
fn locate_package() -> Option<PathBuf> {
	if let Ok(value) = env::var(PACKAGE_ENV) {
		let path = PathBuf::from(value);
		if path.is_file() {
			return Some(path);
		}
		println!("cargo:warning={PACKAGE_ENV} does not point at a file: {}", path.display());
	}

	let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").ok()?);
	let staging_dir = workspace_root(&manifest_dir)?.join("extension");
	println!("cargo:rerun-if-changed={}", staging_dir.display());

	let candidate = staging_dir.join(PACKAGE_NAME);
	candidate.is_file().then_some(candidate)
}

/// Walks up from the crate manifest to the first directory whose
/// `Cargo.toml` declares a workspace.
fn workspace_root(start: &Path) -> Option<PathBuf> {
	let mut current = start;
	while let Some(parent) = current.parent() {
		let manifest = parent.join("Cargo.toml");
		if let Ok(contents) = fs::read_to_string(&manifest) {
			if contents.contains("[workspace]") {
				return Some(parent.to_path_buf());
			}
		}
		current = parent;
	}
	None
}
