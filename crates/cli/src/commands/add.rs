use deluge::{Destination, TorrentOptions};
use serde_json::json;

use super::CommandContext;
use crate::error::{CliError, Result};
use crate::output::CommandOutput;

pub async fn execute(ctx: &CommandContext, reference: &str, location: Option<String>, paused: bool) -> Result<CommandOutput> {
	let destination = destination(location, paused, ctx.download_location.as_deref())?;
	let result = ctx.client.add(reference, destination).await?;

	Ok(CommandOutput::new(
		"add",
		json!({ "reference": reference, "result": result }),
		format!("Added {reference}"),
	))
}

fn destination(location: Option<String>, paused: bool, default_location: Option<&str>) -> Result<Destination> {
	if !paused {
		return Ok(location.map(Destination::Location).unwrap_or_default());
	}

	let location = location
		.or_else(|| default_location.map(str::to_string))
		.ok_or_else(|| CliError::Config("--paused needs --location or a configured download location".into()))?;
	Ok(Destination::Options(TorrentOptions::with_download_location(location).paused(true)))
}
