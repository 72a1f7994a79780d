use serde::{Deserialize, Serialize};

/// A catalog entry. The embedding is stored beside the profile, never inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
	pub name: String,
	pub genre: String,
	pub location: String,
	pub nonprofit_interests: Option<Vec<String>>,
	pub passion_statement: String,
	pub bio: String,
	pub social_links: Option<String>,
}
impl Profile {
	/// Text that is embedded for this profile at load time.
	pub fn embedding_text(&self) -> String {
		format!(
			"{}. {}. {}. {}. {}",
			self.name, self.genre, self.location, self.bio, self.passion_statement
		)
	}

	pub fn interests(&self) -> &[String] {
		self.nonprofit_interests.as_deref().unwrap_or_default()
	}

	pub fn interests_label(&self) -> String {
		let interests = self.interests();

		if interests.is_empty() {
			return "None listed".to_string();
		}

		interests.join(", ")
	}
}
