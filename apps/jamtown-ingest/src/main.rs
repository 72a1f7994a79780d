use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = jamtown_ingest::Args::parse();

	jamtown_ingest::run(args).await
}
