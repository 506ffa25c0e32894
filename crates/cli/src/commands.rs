//! Command implementations for the swd binary.

use std::path::PathBuf;

use serde::Serialize;
use swd::{DriverOptions, HostEnv, InstallOutcome, Installer, SessionData, SystemEnv};

use crate::cli::{Cli, Commands, InstallArgs, OptionsArgs, OutputFormat, StatusArgs};
use crate::error::Result;

pub fn dispatch(cli: Cli) -> Result<()> {
	let env = SystemEnv;
	match cli.command {
		Commands::Install(args) => install(&env, args),
		Commands::Verify => verify(&env),
		Commands::Clean => clean(&env),
		Commands::Restore(args) => restore(&env, args),
		Commands::Status(args) => status(&env, args),
	}
}

/// Builds [`DriverOptions`] from an optional options file, with CLI flags
/// overriding what the file says.
fn resolve_options(args: &OptionsArgs) -> Result<DriverOptions> {
	let mut options = match &args.options {
		Some(path) => DriverOptions::load(path)?,
		None => DriverOptions::default(),
	};
	if let Some(dir) = &args.data_dir {
		options.data_dir = Some(dir.clone());
	}
	Ok(options)
}

fn install(env: &dyn HostEnv, args: InstallArgs) -> Result<()> {
	let mut options = resolve_options(&args.options)?;
	options.extension_files.extend(args.extensions);
	options.clean_session |= args.clean_session;
	let clean_session = options.clean_session;

	match Installer::new(env, options).install()? {
		InstallOutcome::Skipped => {
			println!("Extension installation is disabled; nothing was installed.");
		}
		InstallOutcome::Installed { directory, packages, backed_up } => {
			println!("Installed {} package(s) into {}", packages.len(), directory.display());
			for package in &packages {
				println!("  {package}");
			}
			if !backed_up.is_empty() {
				println!(
					"Backed up {} previously installed entr{}; `swd restore` puts them back.",
					backed_up.len(),
					if backed_up.len() == 1 { "y" } else { "ies" }
				);
			}
		}
	}

	if clean_session {
		let deleted = SessionData::for_current_platform(env)?.clear()?;
		println!("Cleared {deleted} session artifact(s).");
	}
	Ok(())
}

fn verify(env: &dyn HostEnv) -> Result<()> {
	Installer::new(env, DriverOptions::default()).verify_installed()?;
	println!("The WebDriver extension is installed.");
	Ok(())
}

fn clean(env: &dyn HostEnv) -> Result<()> {
	let session = SessionData::for_current_platform(env)?;
	let known = session.artifacts().len();
	let deleted = session.clear()?;
	println!("Cleared {deleted} of {known} known session artifact(s).");
	Ok(())
}

fn restore(env: &dyn HostEnv, args: OptionsArgs) -> Result<()> {
	let options = resolve_options(&args)?;
	let restored = Installer::new(env, options).restore_backups()?;
	if restored == 0 {
		println!("No backed-up extensions to restore.");
	} else {
		let noun = if restored == 1 { "entry" } else { "entries" };
		println!("Restored {restored} backed-up extension {noun}.");
	}
	Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Status {
	platform: String,
	supported: bool,
	data_directory: Option<PathBuf>,
	driver_extension: Option<PathBuf>,
	driver_installed: bool,
	install_disabled: bool,
	package: Option<PackageStatus>,
	package_error: Option<String>,
	session_artifacts: Vec<ArtifactStatus>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PackageStatus {
	label: String,
	path: PathBuf,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactStatus {
	path: PathBuf,
	present: bool,
}

/// Gathers diagnostics without writing anything: where things would be
/// installed, what would be installed, and which session artifacts exist.
fn gather_status(env: &dyn HostEnv, options: &DriverOptions) -> Status {
	let platform = env.platform();

	let data_directory = options
		.data_dir
		.clone()
		.or_else(|| swd::paths::data_directory(env).ok());

	let driver_extension =
		swd::paths::data_directory(env).ok().map(|dir| dir.join(swd::dirs::DRIVER_EXTENSION));
	let driver_installed = driver_extension.as_deref().is_some_and(|path| path.is_file());

	let (package, package_error) = match swd::source::resolve(env, options) {
		Ok(Some(package)) => (
			Some(PackageStatus {
				label: package.label().to_string(),
				path: package.path().to_path_buf(),
			}),
			None,
		),
		Ok(None) => (None, None),
		Err(err) => (None, Some(err.to_string())),
	};

	let session_artifacts = swd::paths::session_artifacts(env)
		.map(|paths| {
			paths
				.into_iter()
				.map(|path| ArtifactStatus { present: path.symlink_metadata().is_ok(), path })
				.collect()
		})
		.unwrap_or_default();

	Status {
		platform: platform.to_string(),
		supported: platform.is_mac(),
		data_directory,
		driver_extension,
		driver_installed,
		install_disabled: options.install_disabled(env),
		package,
		package_error,
		session_artifacts,
	}
}

fn status(env: &dyn HostEnv, args: StatusArgs) -> Result<()> {
	let options = resolve_options(&args.options)?;
	let status = gather_status(env, &options);

	match args.format {
		OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
		OutputFormat::Text => print_status(&status),
	}
	Ok(())
}

fn print_status(status: &Status) {
	let supported = if status.supported { "supported" } else { "unsupported" };
	println!("Platform: {} ({supported})", status.platform);

	match &status.data_directory {
		Some(dir) => println!("Data directory: {}", dir.display()),
		None => println!("Data directory: unavailable"),
	}

	match &status.driver_extension {
		Some(path) if status.driver_installed => {
			println!("Driver extension: installed at {}", path.display());
		}
		Some(path) => println!("Driver extension: not installed (expected at {})", path.display()),
		None => println!("Driver extension: unavailable"),
	}

	if status.install_disabled {
		println!("Install: disabled");
	}
	match (&status.package, &status.package_error) {
		(Some(package), _) => {
			println!("Package: {} ({})", package.label, package.path.display());
		}
		(None, Some(error)) => println!("Package: unresolved ({error})"),
		(None, None) => println!("Package: none"),
	}

	if !status.session_artifacts.is_empty() {
		println!("Session artifacts:");
		for artifact in &status.session_artifacts {
			let state = if artifact.present { "present" } else { "absent " };
			println!("  {state} {}", artifact.path.display());
		}
	}
}
