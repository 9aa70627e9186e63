use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = braid_cli::Args::parse();
	braid_cli::run(args).await
}
