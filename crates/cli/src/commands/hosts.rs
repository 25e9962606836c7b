use serde_json::json;

use super::CommandContext;
use crate::error::Result;
use crate::output::CommandOutput;

pub async fn execute(ctx: &CommandContext) -> Result<CommandOutput> {
	let hosts = ctx.client.get_hosts().await?;

	let text = if hosts.is_empty() {
		"No daemons configured in the WebUI".to_string()
	} else {
		hosts
			.iter()
			.map(|h| format!("{}  {}:{}  {}", h.id, h.ip, h.port, h.status))
			.collect::<Vec<_>>()
			.join("\n")
	};

	Ok(CommandOutput::new("hosts", json!({ "hosts": hosts }), text))
}
