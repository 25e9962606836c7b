use serde_json::{Value, json};

use super::CommandContext;
use crate::error::Result;
use crate::output::CommandOutput;

pub async fn execute(ctx: &CommandContext, keys: &[String]) -> Result<CommandOutput> {
	let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
	let update = ctx.client.update_ui(&keys, json!({})).await?;

	let mut ids: Vec<&String> = update.torrents.keys().collect();
	ids.sort();

	let text = if ids.is_empty() {
		"No torrents".to_string()
	} else {
		ids.iter()
			.map(|id| render_row(id, &update.torrents[*id], &keys))
			.collect::<Vec<_>>()
			.join("\n")
	};

	Ok(CommandOutput::new("torrents", json!({ "torrents": update.torrents }), text))
}

fn render_row(id: &str, fields: &Value, keys: &[&str]) -> String {
	let mut row = id.to_string();
	for key in keys {
		let value = match &fields[*key] {
			Value::String(s) => s.clone(),
			Value::Null => "-".to_string(),
			other => other.to_string(),
		};
		row.push_str(&format!("  {key}={value}"));
	}
	row
}
