use std::{future::Future, pin::Pin};

use jamtown_domain::{Profile, RankedProfile};

use crate::{Error, Result, db::Db, queries};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Ranked access to the artist catalog.
///
/// Implementations return at most `limit` profiles ordered by ascending cosine distance, with
/// ties broken by name so repeated calls agree.
pub trait CatalogStore
where
	Self: Send + Sync,
{
	fn rank_by_similarity<'a>(
		&'a self,
		query: &'a [f32],
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<RankedProfile>>>;

	/// First write wins: returns `false` when the name already exists.
	fn insert_profile<'a>(
		&'a self,
		profile: &'a Profile,
		embedding: &'a [f32],
	) -> BoxFuture<'a, Result<bool>>;

	fn count(&self) -> BoxFuture<'_, Result<u64>>;
}

pub struct PgCatalog {
	db: Db,
	vector_dim: usize,
}
impl PgCatalog {
	pub fn new(db: Db, vector_dim: u32) -> Self {
		Self { db, vector_dim: vector_dim as usize }
	}

	pub fn db(&self) -> &Db {
		&self.db
	}

	async fn rank(&self, query: &[f32], limit: u32) -> Result<Vec<RankedProfile>> {
		check_limit(limit)?;
		check_dimension(query, self.vector_dim)?;

		let mut conn = self.db.pool.acquire().await?;
		let ranked = queries::rank_by_similarity(&mut conn, query, limit).await?;

		tracing::debug!(limit, rows = ranked.len(), "Ranked catalog by similarity.");

		Ok(ranked)
	}

	async fn insert(&self, profile: &Profile, embedding: &[f32]) -> Result<bool> {
		check_dimension(embedding, self.vector_dim)?;

		queries::insert_profile(&self.db.pool, profile, embedding).await
	}
}

impl CatalogStore for PgCatalog {
	fn rank_by_similarity<'a>(
		&'a self,
		query: &'a [f32],
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<RankedProfile>>> {
		Box::pin(self.rank(query, limit))
	}

	fn insert_profile<'a>(
		&'a self,
		profile: &'a Profile,
		embedding: &'a [f32],
	) -> BoxFuture<'a, Result<bool>> {
		Box::pin(self.insert(profile, embedding))
	}

	fn count(&self) -> BoxFuture<'_, Result<u64>> {
		Box::pin(queries::count_profiles(&self.db.pool))
	}
}

pub(crate) fn check_limit(limit: u32) -> Result<()> {
	if limit == 0 {
		return Err(Error::InvalidArgument { message: "limit must be positive.".to_string() });
	}

	Ok(())
}

pub(crate) fn check_dimension(vec: &[f32], vector_dim: usize) -> Result<()> {
	if vec.len() != vector_dim {
		return Err(Error::InvalidArgument {
			message: format!("Vector has {} components; expected {vector_dim}.", vec.len()),
		});
	}

	Ok(())
}
