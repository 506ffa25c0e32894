use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::styles::cli_styles;

#[derive(Debug, Parser)]
#[command(name = "swd")]
#[command(about = "Safari WebDriver extension and profile management")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
	/// Increase log detail (-v info, -vv debug)
	#[arg(short, long, global = true, action = ArgAction::Count)]
	pub verbose: u8,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
	/// Install the driver extension into Safari's extensions directory
	Install(InstallArgs),
	/// Check that the driver extension is installed where Safari loads it
	Verify,
	/// Erase session data left behind by previous runs
	Clean,
	/// Move backed-up extensions back into place
	Restore(OptionsArgs),
	/// Show resolved paths, the selected package, and session-data state
	Status(StatusArgs),
}

#[derive(Args, Clone, Debug, Default)]
pub struct InstallArgs {
	#[command(flatten)]
	pub options: OptionsArgs,

	/// Additional extension package to install (repeatable)
	#[arg(long = "extension", value_name = "FILE")]
	pub extensions: Vec<PathBuf>,

	/// Clear session data once the install succeeds
	#[arg(long)]
	pub clean_session: bool,
}

/// Flags shared by every command that reads driver options.
#[derive(Args, Clone, Debug, Default)]
pub struct OptionsArgs {
	/// Driver options JSON file
	#[arg(long, value_name = "FILE")]
	pub options: Option<PathBuf>,

	/// Data directory of a non-standard Safari installation
	#[arg(long, value_name = "DIR")]
	pub data_dir: Option<PathBuf>,
}

#[derive(Args, Clone, Debug, Default)]
pub struct StatusArgs {
	#[command(flatten)]
	pub options: OptionsArgs,

	/// Output format
	#[arg(short, long, value_enum, default_value = "text")]
	pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
	#[default]
	Text,
	Json,
}
