mod add;
mod connect;
mod hosts;
mod status;
mod torrents;

use deluge::DelugeClient;
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::config::{FileConfig, Overrides};
use crate::error::Result;
use crate::output::{CommandOutput, print_result};

/// Client plus the settings commands need beyond it.
pub struct CommandContext {
	pub client: DelugeClient,
	pub download_location: Option<String>,
}

impl CommandContext {
	/// Builds the client from the config file and flag overrides.
	///
	/// Configured cookies are validated here, before any request is sent.
	pub fn from_cli(cli: &Cli) -> Result<Self> {
		let resolved = FileConfig::discover(cli.config.as_deref())?.resolve(Overrides {
			url: cli.url.clone(),
			password: cli.password.clone(),
			download_location: cli.download_location.clone(),
		});

		debug!(target: "deluge", url = %resolved.client.url, "using endpoint");
		let download_location = resolved.client.download_location.clone();
		let client = DelugeClient::new(resolved.client)?;
		if let Some(cookies) = &resolved.cookies {
			client.set_credentials_json(cookies)?;
		}

		Ok(Self { client, download_location })
	}
}

pub async fn run(cli: Cli) -> Result<()> {
	let format = cli.format;
	let ctx = CommandContext::from_cli(&cli)?;
	let output = dispatch(cli.command, &ctx).await?;
	print_result(&output, format);
	Ok(())
}

pub async fn dispatch(command: Commands, ctx: &CommandContext) -> Result<CommandOutput> {
	match command {
		Commands::Add { reference, location, paused } => add::execute(ctx, &reference, location, paused).await,
		Commands::Hosts => hosts::execute(ctx).await,
		Commands::Connect { host_id } => connect::execute(ctx, &host_id).await,
		Commands::Status => status::execute(ctx).await,
		Commands::Torrents { keys } => torrents::execute(ctx, &keys).await,
	}
}
