use serde::Serialize;

use crate::RetrievalResult;

/// One display block per retrieved profile, in rank order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCard {
	/// 1-based.
	pub rank: usize,
	pub name: String,
	pub genre: String,
	pub location: String,
	pub distance: f32,
	pub nonprofit_interests: Vec<String>,
	pub passion_statement: String,
	pub bio: String,
	pub social_links: Option<String>,
}
impl ResultCard {
	pub fn title(&self) -> String {
		format!(
			"{}. {} ({}, {}), distance {:.3}",
			self.rank, self.name, self.genre, self.location, self.distance
		)
	}
}

pub fn result_cards(results: &RetrievalResult) -> Vec<ResultCard> {
	results
		.iter()
		.enumerate()
		.map(|(index, item)| ResultCard {
			rank: index + 1,
			name: item.profile.name.clone(),
			genre: item.profile.genre.clone(),
			location: item.profile.location.clone(),
			distance: item.distance,
			nonprofit_interests: item.profile.interests().to_vec(),
			passion_statement: item.profile.passion_statement.clone(),
			bio: item.profile.bio.clone(),
			social_links: item.profile.social_links.clone().filter(|links| !links.trim().is_empty()),
		})
		.collect()
}
