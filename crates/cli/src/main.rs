//! `lumen`: drives the loading engine against a local catalog fixture.

mod cli;
mod commands;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command};
use lumen_config::EngineConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	let config = EngineConfig::discover(cli.config.as_deref()).context("failed to load configuration")?;
	tracing::debug!(?config, "lumen.config");

	let output = match cli.command {
		Command::Feed(args) => commands::feed::run(&config, args).await?,
		Command::Suggest(args) => commands::suggest::run(&config, args).await?,
	};
	print!("{output}");
	Ok(())
}

fn init_tracing(verbose: bool) {
	let fallback = if verbose { "debug" } else { "info" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
