use jamtown_domain::RetrievalResult;
use jamtown_storage::CatalogStore;

use crate::{Encoder, Error, Result};

/// Encodes a query and ranks the catalog against it.
pub struct Retriever<'a> {
	encoder: &'a Encoder,
	catalog: &'a dyn CatalogStore,
}
impl<'a> Retriever<'a> {
	pub fn new(encoder: &'a Encoder, catalog: &'a dyn CatalogStore) -> Self {
		Self { encoder, catalog }
	}

	/// At most `limit` profiles, closest first. An empty catalog yields an empty result.
	pub async fn retrieve(&self, query: &str, limit: u32) -> Result<RetrievalResult> {
		if limit == 0 {
			return Err(Error::Retrieval { message: "limit must be positive.".to_string() });
		}

		let query_vec = self.encoder.encode_one(query).await?;
		let ranked = self.catalog.rank_by_similarity(&query_vec, limit).await?;

		if ranked.len() > limit as usize {
			return Err(Error::Retrieval {
				message: format!("Catalog returned {} rows for limit {limit}.", ranked.len()),
			});
		}

		let results = RetrievalResult::new(ranked)
			.map_err(|err| Error::Retrieval { message: err.to_string() })?;

		tracing::info!(limit, results = results.len(), "Retrieved artist profiles.");

		Ok(results)
	}
}
