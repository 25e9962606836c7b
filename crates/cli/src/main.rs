use clap::Parser;
use deluge_cli::{cli::Cli, commands, logging};
use tracing::error;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	if let Err(err) = commands::run(cli).await {
		error!(target: "deluge", error = %err, "command failed");
		std::process::exit(1);
	}
}
