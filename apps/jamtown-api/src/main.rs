use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = jamtown_api::Args::parse();

	jamtown_api::run(args).await
}
