use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "deluge")]
#[command(about = "Deluge WebUI client - submit torrents and manage daemon connections")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug, -vvv trace)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Config file (defaults to <config dir>/deluge-rpc/config.json)
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// WebUI JSON endpoint, e.g. http://localhost:8112/json
	#[arg(long, global = true)]
	pub url: Option<String>,

	/// WebUI password
	#[arg(long, global = true)]
	pub password: Option<String>,

	/// Default download location for added torrents
	#[arg(long, global = true, value_name = "PATH")]
	pub download_location: Option<String>,

	/// Output format
	#[arg(short, long, global = true, value_enum, default_value = "text")]
	pub format: OutputFormat,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Submit a magnet link, info-hash or torrent URL
	Add {
		reference: String,
		/// Download location (overrides the configured default)
		#[arg(long, value_name = "PATH")]
		location: Option<String>,
		/// Add the torrent paused
		#[arg(long)]
		paused: bool,
	},

	/// List daemons known to the WebUI
	Hosts,

	/// Attach the WebUI to a daemon
	Connect { host_id: String },

	/// Show session and daemon connectivity
	Status,

	/// List torrents with selected status fields
	#[command(alias = "ls")]
	Torrents {
		/// Status field to include (repeatable)
		#[arg(long = "key", value_name = "KEY", default_values = ["name", "state", "progress"])]
		keys: Vec<String>,
	},
}
