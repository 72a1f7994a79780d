pub mod encoder;
pub mod ingest;
pub mod recommend;
pub mod retriever;

mod error;

pub use encoder::{Encoder, Texts};
pub use error::{Error, Result};
pub use ingest::{IngestRecord, IngestReport, Interests};
pub use jamtown_storage::BoxFuture;
pub use recommend::{MatchOutcome, MatchRequest, PreparedMatch};
pub use retriever::Retriever;

use std::sync::Arc;

use tokio::sync::OnceCell;

use jamtown_config::{Config, EmbeddingProviderConfig, LlmProviderConfig};
use jamtown_providers::{embedding, generation};
use jamtown_storage::CatalogStore;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>>;
}

pub trait GenerationProvider
where
	Self: Send + Sync,
{
	fn generate<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, Result<String>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub generation: Arc<dyn GenerationProvider>,
}
impl Providers {
	pub fn new(
		embedding: Arc<dyn EmbeddingProvider>,
		generation: Arc<dyn GenerationProvider>,
	) -> Self {
		Self { embedding, generation }
	}
}
impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { embedding: provider.clone(), generation: provider }
	}
}

pub struct JamtownService {
	pub cfg: Config,
	pub catalog: Arc<dyn CatalogStore>,
	pub providers: Providers,
	encoder: OnceCell<Encoder>,
}
impl JamtownService {
	pub fn new(cfg: Config, catalog: Arc<dyn CatalogStore>) -> Self {
		Self::with_providers(cfg, catalog, Providers::default())
	}

	pub fn with_providers(
		cfg: Config,
		catalog: Arc<dyn CatalogStore>,
		providers: Providers,
	) -> Self {
		Self { cfg, catalog, providers, encoder: OnceCell::new() }
	}

	/// The shared encoder, loaded by whichever caller gets here first.
	pub async fn encoder(&self) -> Result<&Encoder> {
		self.encoder
			.get_or_try_init(|| {
				Encoder::load(
					self.providers.embedding.clone(),
					&self.cfg.providers.embedding,
					self.cfg.storage.postgres.vector_dim,
				)
			})
			.await
	}

	pub async fn retriever(&self) -> Result<Retriever<'_>> {
		Ok(Retriever::new(self.encoder().await?, self.catalog.as_ref()))
	}

	pub async fn catalog_count(&self) -> Result<u64> {
		Ok(self.catalog.count().await?)
	}
}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		Box::pin(async move {
			embedding::embed(cfg, texts)
				.await
				.map_err(|err| Error::Encoding { message: err.to_string() })
		})
	}
}

impl GenerationProvider for DefaultProviders {
	fn generate<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move {
			generation::generate(cfg, prompt)
				.await
				.map_err(|err| Error::UpstreamGeneration { message: err.to_string() })
		})
	}
}
