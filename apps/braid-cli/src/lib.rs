use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use color_eyre::eyre;
use tracing_subscriber::EnvFilter;

use braid_graph::{EmptySession, Orchestrator};

#[derive(Debug, Parser)]
#[command(version, rename_all = "kebab")]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// The question to answer.
	pub question: String,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = braid_config::load(&args.config)?;

	init_tracing(&config)?;

	let deadline = Duration::from_millis(config.orchestration.deadline_ms);
	let orchestrator = Orchestrator::new(config, Arc::new(EmptySession));

	tracing::info!(question = %args.question, "Starting answer orchestration.");

	let output = tokio::time::timeout(deadline, orchestrator.run(&args.question))
		.await
		.map_err(|_| eyre::eyre!("Answer orchestration exceeded the request deadline."))??;

	println!("{}", serde_json::to_string_pretty(&output)?);

	Ok(())
}

fn init_tracing(config: &braid_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(filter).init();
	Ok(())
}
