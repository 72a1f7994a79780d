use time::OffsetDateTime;

use jamtown_domain::{Profile, RankedProfile};

use crate::{Error, Result};

/// A catalog row as read back from `artists`.
///
/// Columns are decoded as optional so a row that violates the table contract is reported as
/// malformed instead of failing inside the driver.
#[derive(Debug, sqlx::FromRow)]
pub struct ProfileRow {
	pub name: Option<String>,
	pub genre: Option<String>,
	pub location: Option<String>,
	pub nonprofit_interests: Option<Vec<String>>,
	pub passion_statement: Option<String>,
	pub bio: Option<String>,
	pub social_links: Option<String>,
}
impl ProfileRow {
	pub fn into_profile(self) -> Result<Profile> {
		let name = required(self.name, "name", "<unknown>")?;
		let genre = required(self.genre, "genre", &name)?;
		let location = required(self.location, "location", &name)?;
		let passion_statement = required(self.passion_statement, "passion_statement", &name)?;
		let bio = required(self.bio, "bio", &name)?;

		Ok(Profile {
			name,
			genre,
			location,
			nonprofit_interests: self.nonprofit_interests,
			passion_statement,
			bio,
			social_links: self.social_links,
		})
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct RankedRow {
	#[sqlx(flatten)]
	pub profile: ProfileRow,
	pub distance: Option<f32>,
}
impl RankedRow {
	pub fn into_ranked(self) -> Result<RankedProfile> {
		let profile = self.profile.into_profile()?;
		let distance = match self.distance {
			Some(distance) if distance.is_finite() => distance.max(0.0),
			_ =>
				return Err(Error::Malformed {
					message: format!("Row {:?} has no usable distance.", profile.name),
				}),
		};

		Ok(RankedProfile { profile, distance })
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct CatalogEntry {
	#[sqlx(flatten)]
	pub profile: ProfileRow,
	pub created_at: OffsetDateTime,
}

fn required(value: Option<String>, column: &str, name: &str) -> Result<String> {
	value.ok_or_else(|| Error::Malformed {
		message: format!("Row {name:?} has a NULL {column} column."),
	})
}
