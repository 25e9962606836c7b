use deluge::SessionState;
use serde_json::json;

use super::CommandContext;
use crate::error::Result;
use crate::output::CommandOutput;

/// Reports session and daemon state; an offline daemon is not an error here.
pub async fn execute(ctx: &CommandContext) -> Result<CommandOutput> {
	let connected = ctx.client.is_connected().await?;
	let status = ctx.client.session_status().await;

	let session = match status.state {
		SessionState::Authenticated => "authenticated",
		SessionState::Unauthenticated => "unauthenticated",
	};
	let daemon = if connected { "connected" } else { "not connected" };

	Ok(CommandOutput::new(
		"status",
		json!({ "session": status.state, "daemonConnected": connected }),
		format!("Session: {session}\nDaemon: {daemon}"),
	))
}
