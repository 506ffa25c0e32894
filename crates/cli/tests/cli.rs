//! End-to-end tests that run the swd binary.
//!
//! Every test points the binary at a temporary directory through
//! `--data-dir` and the `SWD_*` overrides; none of them go anywhere near a
//! real Safari profile. The commands that refuse to run off macOS are
//! covered by the platform-gate tests at the bottom.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

fn swd_binary() -> PathBuf {
	let mut path = std::env::current_exe().expect("test binary path");
	path.pop();
	if path.ends_with("deps") {
		path.pop();
	}
	path.push("swd");
	path
}

/// A command with every ambient override scrubbed, so the surrounding
/// shell cannot leak configuration into the assertions.
fn swd() -> Command {
	let mut cmd = Command::new(swd_binary());
	cmd.env_remove("SWD_DRIVER_EXTENSION")
		.env_remove("SWD_NO_INSTALL")
		.env_remove("SWD_BUNDLED_EXTENSION")
		.env_remove("RUST_LOG");
	cmd
}

fn stdout(output: &Output) -> String {
	String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
	String::from_utf8_lossy(&output.stderr).into_owned()
}

struct Fixture {
	_home: TempDir,
	data_dir: PathBuf,
	package: PathBuf,
}

impl Fixture {
	fn new() -> Self {
		let home = TempDir::new().expect("temp home");
		let data_dir = home.path().join("safari-data");
		fs::create_dir(&data_dir).expect("data dir");

		let package = home.path().join("driver.safariextz");
		fs::write(&package, b"driver package bytes").expect("package");

		Self { _home: home, data_dir, package }
	}

	fn extensions(&self) -> PathBuf {
		self.data_dir.join("Extensions")
	}

	fn data_dir_arg(&self) -> &str {
		self.data_dir.to_str().unwrap()
	}

	fn package_arg(&self) -> &str {
		self.package.to_str().unwrap()
	}
}

#[test]
fn install_stages_the_override_package() {
	let fixture = Fixture::new();

	let output = swd()
		.args(["install", "--data-dir", fixture.data_dir_arg()])
		.env("SWD_DRIVER_EXTENSION", fixture.package_arg())
		.output()
		.expect("run swd");

	assert!(output.status.success(), "stderr: {}", stderr(&output));
	assert!(stdout(&output).contains("Installed 1 package(s)"));

	let installed = fixture.extensions().join("WebDriver.safariextz");
	assert_eq!(fs::read(&installed).unwrap(), b"driver package bytes");
}

#[test]
fn install_uses_the_bundled_package_location() {
	let fixture = Fixture::new();

	let output = swd()
		.args(["install", "--data-dir", fixture.data_dir_arg()])
		.env("SWD_BUNDLED_EXTENSION", fixture.package_arg())
		.output()
		.expect("run swd");

	assert!(output.status.success(), "stderr: {}", stderr(&output));
	assert!(stdout(&output).contains("bundled extension"));
	assert!(fixture.extensions().join("WebDriver.safariextz").is_file());
}

#[test]
fn install_rejects_a_missing_override() {
	let fixture = Fixture::new();
	let missing = fixture.data_dir.join("gone.safariextz");

	let output = swd()
		.args(["install", "--data-dir", fixture.data_dir_arg()])
		.env("SWD_DRIVER_EXTENSION", missing.to_str().unwrap())
		.output()
		.expect("run swd");

	assert!(!output.status.success());
	let err = stderr(&output);
	assert!(err.contains("SWD_DRIVER_EXTENSION"), "stderr: {err}");
	assert!(err.contains("gone.safariextz"), "stderr: {err}");
	assert!(!fixture.extensions().exists());
}

#[test]
fn install_skips_when_disabled() {
	let fixture = Fixture::new();

	let output = swd()
		.args(["install", "--data-dir", fixture.data_dir_arg()])
		.env("SWD_NO_INSTALL", "1")
		.output()
		.expect("run swd");

	assert!(output.status.success(), "stderr: {}", stderr(&output));
	assert!(stdout(&output).contains("disabled"));
	assert!(!fixture.extensions().exists());
}

#[test]
fn install_reports_a_missing_data_directory() {
	let fixture = Fixture::new();
	let missing = fixture.data_dir.join("nope");

	let output = swd()
		.args(["install", "--data-dir", missing.to_str().unwrap()])
		.env("SWD_DRIVER_EXTENSION", fixture.package_arg())
		.output()
		.expect("run swd");

	assert!(!output.status.success());
	assert!(stderr(&output).contains("does not exist"));
}

#[test]
fn install_then_restore_round_trips_a_user_extension() {
	let fixture = Fixture::new();
	fs::create_dir(fixture.extensions()).unwrap();
	fs::write(fixture.extensions().join("Mine.safariextz"), b"user bytes").unwrap();

	let output = swd()
		.args(["install", "--data-dir", fixture.data_dir_arg()])
		.env("SWD_DRIVER_EXTENSION", fixture.package_arg())
		.output()
		.expect("run swd install");
	assert!(output.status.success(), "stderr: {}", stderr(&output));
	assert!(stdout(&output).contains("Backed up 1"));
	assert_eq!(
		fs::read(fixture.extensions().join("backups/Mine.safariextz")).unwrap(),
		b"user bytes"
	);

	let output = swd()
		.args(["restore", "--data-dir", fixture.data_dir_arg()])
		.output()
		.expect("run swd restore");
	assert!(output.status.success(), "stderr: {}", stderr(&output));

	assert_eq!(fs::read(fixture.extensions().join("Mine.safariextz")).unwrap(), b"user bytes");
	assert!(!fixture.extensions().join("backups").exists());
	assert!(!fixture.extensions().join("WebDriver.safariextz").exists());
}

#[test]
fn install_stages_extras_from_the_command_line() {
	let fixture = Fixture::new();
	let extra = fixture.data_dir.join("Helper.safariextz");
	fs::write(&extra, b"helper bytes").unwrap();

	let output = swd()
		.args([
			"install",
			"--data-dir",
			fixture.data_dir_arg(),
			"--extension",
			extra.to_str().unwrap(),
		])
		.env("SWD_DRIVER_EXTENSION", fixture.package_arg())
		.output()
		.expect("run swd");

	assert!(output.status.success(), "stderr: {}", stderr(&output));
	assert!(stdout(&output).contains("Installed 2 package(s)"));
	assert!(fixture.extensions().join("Helper.safariextz").is_file());
}

#[test]
fn install_honors_an_options_file() {
	let fixture = Fixture::new();
	let options = fixture.data_dir.join("options.json");
	fs::write(
		&options,
		format!(r#"{{ "dataDir": {:?} }}"#, fixture.data_dir_arg()),
	)
	.unwrap();

	let output = swd()
		.args(["install", "--options", options.to_str().unwrap()])
		.env("SWD_DRIVER_EXTENSION", fixture.package_arg())
		.output()
		.expect("run swd");

	assert!(output.status.success(), "stderr: {}", stderr(&output));
	assert!(fixture.extensions().join("WebDriver.safariextz").is_file());
}

#[test]
fn malformed_options_file_names_the_file() {
	let fixture = Fixture::new();
	let options = fixture.data_dir.join("broken.json");
	fs::write(&options, "{ nope").unwrap();

	let output = swd()
		.args(["install", "--options", options.to_str().unwrap()])
		.output()
		.expect("run swd");

	assert!(!output.status.success());
	assert!(stderr(&output).contains("broken.json"));
}

#[test]
fn status_reports_the_package_and_data_directory_as_json() {
	let fixture = Fixture::new();

	let output = swd()
		.args(["status", "--format", "json", "--data-dir", fixture.data_dir_arg()])
		.env("SWD_DRIVER_EXTENSION", fixture.package_arg())
		.output()
		.expect("run swd");

	assert!(output.status.success(), "stderr: {}", stderr(&output));
	let status: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("status json");

	assert_eq!(status["dataDirectory"], fixture.data_dir_arg());
	assert_eq!(status["installDisabled"], false);
	assert_eq!(status["package"]["path"], fixture.package_arg());
	assert!(status["package"]["label"].as_str().unwrap().contains("SWD_DRIVER_EXTENSION"));
}

#[test]
fn status_reports_disabled_installs() {
	let fixture = Fixture::new();

	let output = swd()
		.args(["status", "-f", "json", "--data-dir", fixture.data_dir_arg()])
		.env("SWD_NO_INSTALL", "true")
		.output()
		.expect("run swd");

	assert!(output.status.success(), "stderr: {}", stderr(&output));
	let status: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("status json");
	assert_eq!(status["installDisabled"], true);
	assert_eq!(status["package"], serde_json::Value::Null);
}

#[test]
fn help_lists_every_command() {
	let output = swd().arg("--help").output().expect("run swd");
	assert!(output.status.success());
	let help = stdout(&output);
	for command in ["install", "verify", "clean", "restore", "status"] {
		assert!(help.contains(command), "help is missing {command}");
	}
}

// On macOS the profile-derived commands resolve everything from the
// home directory. Relocating HOME into a temp dir (USER has to go too,
// since it takes precedence for the Safari convention) keeps the whole
// lifecycle away from the real profile.
#[cfg(target_os = "macos")]
mod derived_layout {
	use super::*;

	#[test]
	fn install_verify_and_clean_through_a_relocated_home() {
		let home = TempDir::new().expect("temp home");
		let data_dir = home.path().join("Library/Safari");
		fs::create_dir_all(&data_dir).expect("data dir");
		let package = home.path().join("driver.safariextz");
		fs::write(&package, b"driver package bytes").expect("package");

		let relocated = |args: &[&str]| {
			let mut cmd = swd();
			cmd.args(args).env_remove("USER").env("HOME", home.path());
			cmd
		};

		let output = relocated(&["install"])
			.env("SWD_DRIVER_EXTENSION", package.to_str().unwrap())
			.output()
			.expect("run swd install");
		assert!(output.status.success(), "stderr: {}", stderr(&output));
		let staged = data_dir.join("Extensions/WebDriver.safariextz");
		assert_eq!(fs::read(&staged).unwrap(), b"driver package bytes");

		// Staged but not yet enabled by Safari: verify fails and points
		// at the expected location.
		let output = relocated(&["verify"]).output().expect("run swd verify");
		assert!(!output.status.success());
		let err = stderr(&output);
		assert!(err.contains("WebDriver.safariextz"), "stderr: {err}");
		assert!(err.contains("swd install"), "stderr: {err}");

		fs::copy(&staged, data_dir.join("WebDriver.safariextz")).unwrap();
		let output = relocated(&["verify"]).output().expect("run swd verify");
		assert!(output.status.success(), "stderr: {}", stderr(&output));

		fs::write(data_dir.join("History.plist"), b"history").unwrap();
		let caches = home.path().join("Library/Caches/com.apple.Safari");
		fs::create_dir_all(&caches).unwrap();
		fs::write(caches.join("Cache.db"), b"cache").unwrap();

		let output = relocated(&["clean"]).output().expect("run swd clean");
		assert!(output.status.success(), "stderr: {}", stderr(&output));
		assert!(stdout(&output).contains("Cleared 2"));
		assert!(!data_dir.join("History.plist").exists());
		assert!(!caches.join("Cache.db").exists());
		// Clearing session data leaves the enabled extension alone.
		assert!(data_dir.join("WebDriver.safariextz").is_file());
	}
}

// Safari only exists on macOS; everywhere else the profile-derived
// commands must refuse to run rather than guess at paths.
#[cfg(not(target_os = "macos"))]
mod platform_gate {
	use super::*;

	#[test]
	fn clean_refuses_to_run() {
		let output = swd().arg("clean").output().expect("run swd");
		assert!(!output.status.success());
		assert!(stderr(&output).contains("cannot be managed on this platform"));
	}

	#[test]
	fn verify_refuses_to_run() {
		let output = swd().arg("verify").output().expect("run swd");
		assert!(!output.status.success());
		assert!(stderr(&output).contains("cannot be managed on this platform"));
	}

	#[test]
	fn install_without_a_data_dir_refuses_to_run() {
		let fixture = Fixture::new();

		let output = swd()
			.arg("install")
			.env("SWD_DRIVER_EXTENSION", fixture.package_arg())
			.output()
			.expect("run swd");

		assert!(!output.status.success());
		assert!(stderr(&output).contains("cannot be managed on this platform"));
	}

	#[test]
	fn status_still_answers() {
		let output = swd().args(["status", "-f", "json"]).output().expect("run swd");
		assert!(output.status.success(), "stderr: {}", stderr(&output));
		let status: serde_json::Value =
			serde_json::from_str(&stdout(&output)).expect("status json");
		assert_eq!(status["supported"], false);
		assert_eq!(status["dataDirectory"], serde_json::Value::Null);
	}
}
