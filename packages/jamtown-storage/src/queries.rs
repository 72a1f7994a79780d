use sqlx::{PgConnection, PgExecutor};

use jamtown_domain::{Profile, RankedProfile};

use crate::{
	Result,
	models::{CatalogEntry, RankedRow},
	vector,
};

/// Inserts `profile` unless the name is already cataloged. Returns whether a row was written.
pub async fn insert_profile<'e, E>(
	executor: E,
	profile: &Profile,
	embedding: &[f32],
) -> Result<bool>
where
	E: PgExecutor<'e>,
{
	let embedding_text = vector::to_pg(embedding);
	let result = sqlx::query(
		"\
INSERT INTO artists (
	name,
	genre,
	location,
	nonprofit_interests,
	passion_statement,
	bio,
	social_links,
	passion_embedding
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8::text::vector)
ON CONFLICT (name) DO NOTHING",
	)
	.bind(profile.name.as_str())
	.bind(profile.genre.as_str())
	.bind(profile.location.as_str())
	.bind(profile.nonprofit_interests.as_deref())
	.bind(profile.passion_statement.as_str())
	.bind(profile.bio.as_str())
	.bind(profile.social_links.as_deref())
	.bind(embedding_text.as_str())
	.execute(executor)
	.await?;

	Ok(result.rows_affected() == 1)
}

/// Exact cosine ranking over the whole table. Ties break on name.
pub async fn rank_by_similarity(
	conn: &mut PgConnection,
	query: &[f32],
	limit: u32,
) -> Result<Vec<RankedProfile>> {
	let query_text = vector::to_pg(query);
	let rows: Vec<RankedRow> = sqlx::query_as(
		"\
SELECT
	name,
	genre,
	location,
	nonprofit_interests,
	passion_statement,
	bio,
	social_links,
	(passion_embedding <=> $1::text::vector)::real AS distance
FROM artists
ORDER BY distance ASC, name ASC
LIMIT $2",
	)
	.bind(query_text.as_str())
	.bind(i64::from(limit))
	.fetch_all(conn)
	.await?;

	rows.into_iter().map(RankedRow::into_ranked).collect()
}

pub async fn count_profiles<'e, E>(executor: E) -> Result<u64>
where
	E: PgExecutor<'e>,
{
	let count: i64 = sqlx::query_scalar("SELECT count(*) FROM artists").fetch_one(executor).await?;

	Ok(u64::try_from(count).unwrap_or_default())
}

pub async fn fetch_profile<'e, E>(executor: E, name: &str) -> Result<Option<CatalogEntry>>
where
	E: PgExecutor<'e>,
{
	let entry = sqlx::query_as(
		"\
SELECT
	name,
	genre,
	location,
	nonprofit_interests,
	passion_statement,
	bio,
	social_links,
	created_at
FROM artists
WHERE name = $1",
	)
	.bind(name)
	.fetch_optional(executor)
	.await?;

	Ok(entry)
}
