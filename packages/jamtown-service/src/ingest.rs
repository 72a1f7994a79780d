//! Catalog loading from JSON Lines and CSV exports.

use serde::Deserialize;

use jamtown_domain::Profile;

use crate::{Error, JamtownService, Result};

/// One exported artist record. Column names from the artist spreadsheet export are accepted as
/// aliases.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestRecord {
	#[serde(default)]
	pub name: String,
	pub genre: String,
	pub location: String,
	#[serde(default, alias = "nonprofit_interest")]
	pub nonprofit_interests: Option<Interests>,
	#[serde(alias = "nonprofit_reasoning")]
	pub passion_statement: String,
	#[serde(alias = "artist_bio")]
	pub bio: String,
	#[serde(default)]
	pub social_links: Option<String>,
}
impl IngestRecord {
	pub fn into_profile(self) -> Profile {
		Profile {
			name: self.name.trim().to_string(),
			genre: self.genre,
			location: self.location,
			nonprofit_interests: self.nonprofit_interests.and_then(Interests::into_list),
			passion_statement: self.passion_statement,
			bio: self.bio,
			social_links: self.social_links.filter(|links| !links.trim().is_empty()),
		}
	}
}

/// One row of a CSV export. Interests are always a comma-separated cell here.
#[derive(Debug, Clone, Deserialize)]
struct CsvRecord {
	#[serde(default)]
	name: String,
	genre: String,
	location: String,
	#[serde(default, alias = "nonprofit_interest")]
	nonprofit_interests: Option<String>,
	#[serde(alias = "nonprofit_reasoning")]
	passion_statement: String,
	#[serde(alias = "artist_bio")]
	bio: String,
	#[serde(default)]
	social_links: Option<String>,
}
impl From<CsvRecord> for IngestRecord {
	fn from(record: CsvRecord) -> Self {
		Self {
			name: record.name,
			genre: record.genre,
			location: record.location,
			nonprofit_interests: record.nonprofit_interests.map(Interests::Text),
			passion_statement: record.passion_statement,
			bio: record.bio,
			social_links: record.social_links,
		}
	}
}

const CSV_REQUIRED_COLUMNS: [&[&str]; 5] = [
	&["name"],
	&["genre"],
	&["location"],
	&["passion_statement", "nonprofit_reasoning"],
	&["bio", "artist_bio"],
];

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Interests {
	List(Vec<String>),
	Text(String),
}
impl Interests {
	/// Trimmed, non-empty entries; `None` when nothing remains.
	pub fn into_list(self) -> Option<Vec<String>> {
		let items: Vec<String> = match self {
			Self::List(items) => items
				.iter()
				.flat_map(|item| item.split(','))
				.map(str::trim)
				.filter(|item| !item.is_empty())
				.map(str::to_string)
				.collect(),
			Self::Text(text) => text
				.split(',')
				.map(str::trim)
				.filter(|item| !item.is_empty())
				.map(str::to_string)
				.collect(),
		};

		if items.is_empty() { None } else { Some(items) }
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct IngestReport {
	pub inserted: usize,
	pub duplicates: usize,
	pub skipped: usize,
}

/// Parses JSON Lines input. Unparseable lines and records without a name are counted as
/// skipped.
pub fn parse_records(input: &str) -> (Vec<Profile>, usize) {
	let mut profiles = Vec::new();
	let mut skipped = 0;

	for (index, line) in input.lines().enumerate() {
		let line_no = index + 1;

		if line.trim().is_empty() {
			continue;
		}

		let record: IngestRecord = match serde_json::from_str(line) {
			Ok(record) => record,
			Err(err) => {
				tracing::warn!(line = line_no, error = %err, "Skipping unparseable record.");

				skipped += 1;

				continue;
			},
		};
		let profile = record.into_profile();

		if profile.name.is_empty() {
			tracing::warn!(line = line_no, "Skipping record without a name.");

			skipped += 1;

			continue;
		}

		profiles.push(profile);
	}

	(profiles, skipped)
}

/// Parses a CSV export with a header row. A missing required column fails the whole input.
/// Unreadable rows and rows without a name are counted as skipped.
pub fn parse_csv_records(input: &str) -> Result<(Vec<Profile>, usize)> {
	let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input.as_bytes());
	let headers = reader
		.headers()
		.map_err(|err| Error::Ingestion { message: format!("Unreadable CSV header: {err}") })?
		.clone();

	for columns in CSV_REQUIRED_COLUMNS {
		if !headers.iter().any(|header| columns.contains(&header)) {
			return Err(Error::Ingestion {
				message: format!("CSV header is missing column {:?}.", columns[0]),
			});
		}
	}

	let mut profiles = Vec::new();
	let mut skipped = 0;

	for (index, row) in reader.deserialize::<CsvRecord>().enumerate() {
		let row_no = index + 1;
		let record = match row {
			Ok(record) => record,
			Err(err) => {
				tracing::warn!(row = row_no, error = %err, "Skipping unreadable row.");

				skipped += 1;

				continue;
			},
		};
		let profile = IngestRecord::from(record).into_profile();

		if profile.name.is_empty() {
			tracing::warn!(row = row_no, "Skipping row without a name.");

			skipped += 1;

			continue;
		}

		profiles.push(profile);
	}

	Ok((profiles, skipped))
}

impl JamtownService {
	pub async fn ingest_csv(&self, input: &str) -> Result<IngestReport> {
		let (profiles, skipped) = parse_csv_records(input)?;
		let mut report = self.ingest_profiles(&profiles).await?;

		report.skipped += skipped;

		Ok(report)
	}

	pub async fn ingest_jsonl(&self, input: &str) -> Result<IngestReport> {
		let (profiles, skipped) = parse_records(input);
		let mut report = self.ingest_profiles(&profiles).await?;

		report.skipped += skipped;

		Ok(report)
	}

	/// Embeds in batches and inserts one profile at a time. The first row stored under a name
	/// wins.
	pub async fn ingest_profiles(&self, profiles: &[Profile]) -> Result<IngestReport> {
		let batch_size = self.cfg.ingest.batch_size.max(1) as usize;
		let encoder = self.encoder().await?;
		let mut report = IngestReport::default();

		for (batch_index, batch) in profiles.chunks(batch_size).enumerate() {
			let texts: Vec<String> = batch.iter().map(Profile::embedding_text).collect();
			let vectors = encoder.encode(texts).await.map_err(|err| Error::Ingestion {
				message: format!("Batch {batch_index} failed to encode: {err}"),
			})?;

			for (profile, embedding) in batch.iter().zip(&vectors) {
				match self.catalog.insert_profile(profile, embedding).await {
					Ok(true) => report.inserted += 1,
					Ok(false) => {
						tracing::debug!(name = %profile.name, "Profile already cataloged.");

						report.duplicates += 1;
					},
					Err(err) => {
						tracing::warn!(name = %profile.name, error = %err, "Skipping profile.");

						report.skipped += 1;
					},
				}
			}

			tracing::info!(batch = batch_index, size = batch.len(), "Ingested batch.");
		}

		Ok(report)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_export_aliases_and_comma_separated_interests() {
		let input = r#"{"name":"Alex Rivers","genre":"Folk","location":"Austin","nonprofit_interest":"rivers, parks ,","nonprofit_reasoning":"Supports river cleanup.","artist_bio":"Songwriter.","social_links":" "}"#;
		let (profiles, skipped) = parse_records(input);

		assert_eq!(skipped, 0);
		assert_eq!(profiles.len(), 1);
		assert_eq!(
			profiles[0].nonprofit_interests,
			Some(vec!["rivers".to_string(), "parks".to_string()])
		);
		assert_eq!(profiles[0].passion_statement, "Supports river cleanup.");
		assert_eq!(profiles[0].bio, "Songwriter.");
		assert_eq!(profiles[0].social_links, None);
	}

	#[test]
	fn empty_interest_lists_become_none() {
		assert_eq!(Interests::Text(" , ".to_string()).into_list(), None);
		assert_eq!(Interests::List(Vec::new()).into_list(), None);
		assert_eq!(
			Interests::List(vec!["youth music".to_string()]).into_list(),
			Some(vec!["youth music".to_string()])
		);
	}

	#[test]
	fn reads_csv_export_columns() {
		let input = "\
name,genre,location,nonprofit_interest,nonprofit_reasoning,artist_bio,social_links
Alex Rivers,Folk,Austin,\"rivers, parks\",Supports river cleanup.,\"Songwriter, fiddler.\",
 Bea Stone ,Rock,Austin,,Funds school music programs.,Drummer.,https://example.org/bea
";
		let (profiles, skipped) = parse_csv_records(input).expect("CSV parse failed.");

		assert_eq!(skipped, 0);
		assert_eq!(profiles.len(), 2);
		assert_eq!(
			profiles[0].nonprofit_interests,
			Some(vec!["rivers".to_string(), "parks".to_string()])
		);
		assert_eq!(profiles[0].bio, "Songwriter, fiddler.");
		assert_eq!(profiles[0].social_links, None);
		assert_eq!(profiles[1].name, "Bea Stone");
		assert_eq!(profiles[1].nonprofit_interests, None);
		assert_eq!(profiles[1].social_links.as_deref(), Some("https://example.org/bea"));
	}

	#[test]
	fn csv_rows_without_name_or_with_missing_cells_are_skipped() {
		let input = "\
name,genre,location,passion_statement,bio
,Folk,Austin,p,b
Sam Hill,Jazz
Cal Moss,Jazz,Reno,p,b
";
		let (profiles, skipped) = parse_csv_records(input).expect("CSV parse failed.");

		assert_eq!(skipped, 2);
		assert_eq!(profiles.len(), 1);
		assert_eq!(profiles[0].name, "Cal Moss");
	}

	#[test]
	fn csv_without_required_column_is_rejected() {
		let input = "name,genre,location,bio\nAlex Rivers,Folk,Austin,Songwriter.\n";

		assert!(matches!(parse_csv_records(input), Err(Error::Ingestion { .. })));
	}

	#[test]
	fn counts_bad_lines_and_blank_names_as_skipped() {
		let input = "\
{\"name\":\"  \",\"genre\":\"Folk\",\"location\":\"Austin\",\"passion_statement\":\"p\",\"bio\":\"b\"}
not json

{\"name\":\"Sam Hill\",\"genre\":\"Jazz\",\"location\":\"Reno\",\"nonprofit_interests\":null,\"passion_statement\":\"p\",\"bio\":\"b\"}";
		let (profiles, skipped) = parse_records(input);

		assert_eq!(skipped, 2);
		assert_eq!(profiles.len(), 1);
		assert_eq!(profiles[0].name, "Sam Hill");
		assert_eq!(profiles[0].nonprofit_interests, None);
	}
}
