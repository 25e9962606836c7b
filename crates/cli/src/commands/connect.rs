use serde_json::json;

use super::CommandContext;
use crate::error::Result;
use crate::output::CommandOutput;

pub async fn execute(ctx: &CommandContext, host_id: &str) -> Result<CommandOutput> {
	let connected = ctx.client.connect(host_id).await?;

	let text = if connected {
		format!("Connected to {host_id}")
	} else {
		format!("WebUI did not attach to {host_id}")
	};
	Ok(CommandOutput::new("connect", json!({ "hostId": host_id, "connected": connected }), text))
}
