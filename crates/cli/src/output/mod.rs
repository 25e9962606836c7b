//! Command result rendering.

mod format;

pub use format::OutputFormat;
use serde_json::{Value, json};

/// Result of one command: structured data plus its text rendering.
#[derive(Debug, Clone)]
pub struct CommandOutput {
	pub command: &'static str,
	pub data: Value,
	pub text: String,
}

impl CommandOutput {
	pub fn new(command: &'static str, data: Value, text: impl Into<String>) -> Self {
		Self {
			command,
			data,
			text: text.into(),
		}
	}

	pub fn render(&self, format: OutputFormat) -> String {
		match format {
			OutputFormat::Text => self.text.clone(),
			OutputFormat::Json => {
				let envelope = json!({ "ok": true, "command": self.command, "data": self.data });
				serde_json::to_string_pretty(&envelope).unwrap_or_else(|_| envelope.to_string())
			}
		}
	}
}

pub fn print_result(output: &CommandOutput, format: OutputFormat) {
	println!("{}", output.render(format));
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn json_render_wraps_data() {
		let output = CommandOutput::new("status", json!({ "connected": true }), "connected");
		let rendered: Value = serde_json::from_str(&output.render(OutputFormat::Json)).unwrap();
		assert_eq!(rendered["ok"], true);
		assert_eq!(rendered["command"], "status");
		assert_eq!(rendered["data"]["connected"], true);
	}

	#[test]
	fn text_render_is_verbatim() {
		let output = CommandOutput::new("hosts", json!([]), "no hosts");
		assert_eq!(output.render(OutputFormat::Text), "no hosts");
	}
}
