//! Loads artist profiles from a JSON Lines or CSV export into the catalog.

use std::{
	fs,
	path::{Path, PathBuf},
	sync::Arc,
};

use clap::Parser;
use color_eyre::eyre::WrapErr;
use tracing_subscriber::EnvFilter;

use jamtown_service::JamtownService;
use jamtown_storage::{PgCatalog, db::Db};

#[derive(Debug, Parser)]
#[command(
	version = jamtown_cli::VERSION,
	rename_all = "kebab",
	styles = jamtown_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// A `.csv` export with a header row, otherwise one JSON object per line.
	#[arg(long, short = 'i', value_name = "FILE")]
	pub input: PathBuf,
}

fn is_csv(path: &Path) -> bool {
	path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = jamtown_config::load(&args.config)?;
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();

	let input = fs::read_to_string(&args.input)
		.wrap_err_with(|| format!("Failed to read {}.", args.input.display()))?;
	let vector_dim = config.storage.postgres.vector_dim;
	let db = Db::connect(&config.storage.postgres).await?;

	db.ensure_schema(vector_dim).await?;

	let service = JamtownService::new(config, Arc::new(PgCatalog::new(db, vector_dim)));
	let report = if is_csv(&args.input) {
		service.ingest_csv(&input).await?
	} else {
		service.ingest_jsonl(&input).await?
	};

	tracing::info!(
		inserted = report.inserted,
		duplicates = report.duplicates,
		skipped = report.skipped,
		"Ingestion finished."
	);

	Ok(())
}
