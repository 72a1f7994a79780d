//! In-process catalog with brute-force cosine ranking.
//!
//! Ranking follows the same rules as the Postgres catalog: ascending cosine distance, ties broken
//! by name, tiny negative distances clamped to zero. It backs tests and demos that have no
//! database.

use std::{cmp::Ordering, collections::BTreeMap};

use tokio::sync::RwLock;

use jamtown_domain::{Profile, RankedProfile, vector};

use crate::{
	BoxFuture, CatalogStore, Error, Result,
	catalog::{check_dimension, check_limit},
};

struct Entry {
	profile: Profile,
	embedding: Vec<f32>,
}

pub struct MemoryCatalog {
	vector_dim: usize,
	entries: RwLock<BTreeMap<String, Entry>>,
}
impl MemoryCatalog {
	pub fn new(vector_dim: u32) -> Self {
		Self { vector_dim: vector_dim as usize, entries: RwLock::new(BTreeMap::new()) }
	}

	pub async fn get(&self, name: &str) -> Option<Profile> {
		self.entries.read().await.get(name).map(|entry| entry.profile.clone())
	}

	async fn rank(&self, query: &[f32], limit: u32) -> Result<Vec<RankedProfile>> {
		check_limit(limit)?;
		check_dimension(query, self.vector_dim)?;

		let entries = self.entries.read().await;
		let mut ranked = Vec::with_capacity(entries.len());

		// BTreeMap iteration is name ordered, so a stable sort on distance keeps the tie-break.
		for entry in entries.values() {
			let distance = vector::cosine_distance(query, &entry.embedding).map_err(|err| {
				Error::Malformed {
					message: format!("Profile {:?} cannot be ranked: {err}", entry.profile.name),
				}
			})?;

			ranked.push(RankedProfile { profile: entry.profile.clone(), distance });
		}

		ranked.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
		ranked.truncate(limit as usize);

		Ok(ranked)
	}

	async fn insert(&self, profile: &Profile, embedding: &[f32]) -> Result<bool> {
		check_dimension(embedding, self.vector_dim)?;

		let mut entries = self.entries.write().await;

		if entries.contains_key(&profile.name) {
			return Ok(false);
		}

		entries.insert(
			profile.name.clone(),
			Entry { profile: profile.clone(), embedding: embedding.to_vec() },
		);

		Ok(true)
	}

	async fn len(&self) -> Result<u64> {
		Ok(self.entries.read().await.len() as u64)
	}
}

impl CatalogStore for MemoryCatalog {
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
		Box::pin(self.len())
	}
}
