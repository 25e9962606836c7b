use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
	#[error("config error: {0}")]
	Config(String),

	#[error(transparent)]
	Client(#[from] deluge::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
