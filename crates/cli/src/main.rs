use clap::Parser;

use crate::cli::Cli;
use crate::error::CliError;

mod cli;
mod commands;
mod error;
mod logging;
mod styles;

fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	if let Err(err) = commands::dispatch(cli) {
		let hint = remediation(&err);
		// Alternate formatting prints the whole source chain.
		eprintln!("error: {:#}", anyhow::Error::from(err));
		if let Some(hint) = hint {
			eprintln!("{hint}");
		}
		std::process::exit(1);
	}
}

/// A follow-up line for errors the user can act on directly.
fn remediation(err: &CliError) -> Option<&'static str> {
	match err {
		CliError::Driver(driver) if driver.is_not_installed() => Some(
			"Run `swd install`, then enable the extension in Safari's Extensions preferences.",
		),
		CliError::Driver(driver) if driver.is_configuration() => {
			Some("Check the driver options file and the SWD_* environment overrides.")
		}
		_ => None,
	}
}
