use std::sync::Arc;

use jamtown_service::JamtownService;
use jamtown_storage::{PgCatalog, db::Db};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<JamtownService>,
}
impl AppState {
	pub async fn new(config: jamtown_config::Config) -> color_eyre::Result<Self> {
		let vector_dim = config.storage.postgres.vector_dim;
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema(vector_dim).await?;

		let catalog = Arc::new(PgCatalog::new(db, vector_dim));
		let service = JamtownService::new(config, catalog);

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: JamtownService) -> Self {
		Self { service: Arc::new(service) }
	}
}
