use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Driver(#[from] swd::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}
