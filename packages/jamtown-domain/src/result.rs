use std::collections::HashSet;

use serde::Serialize;

use crate::{Error, Profile, Result};

/// One retrieved profile with its cosine distance to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedProfile {
	pub profile: Profile,
	pub distance: f32,
}

/// Retrieved profiles, closest first.
///
/// Construction checks that distances are finite, non-negative and non-decreasing, and that
/// each name appears once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RetrievalResult(Vec<RankedProfile>);
impl RetrievalResult {
	pub fn empty() -> Self {
		Self(Vec::new())
	}

	pub fn new(items: Vec<RankedProfile>) -> Result<Self> {
		let mut seen = HashSet::with_capacity(items.len());
		let mut previous = 0.0_f32;

		for (position, item) in items.iter().enumerate() {
			if !item.distance.is_finite() || item.distance < 0.0 {
				return Err(Error::InvalidDistance { position });
			}
			if item.distance < previous {
				return Err(Error::Unordered { position });
			}
			if !seen.insert(item.profile.name.as_str()) {
				return Err(Error::DuplicateProfile { name: item.profile.name.clone() });
			}

			previous = item.distance;
		}

		Ok(Self(items))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, RankedProfile> {
		self.0.iter()
	}

	pub fn as_slice(&self) -> &[RankedProfile] {
		&self.0
	}

	pub fn names(&self) -> Vec<&str> {
		self.0.iter().map(|item| item.profile.name.as_str()).collect()
	}
}
impl<'a> IntoIterator for &'a RetrievalResult {
	type IntoIter = std::slice::Iter<'a, RankedProfile>;
	type Item = &'a RankedProfile;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ranked(name: &str, distance: f32) -> RankedProfile {
		RankedProfile {
			profile: Profile {
				name: name.to_string(),
				genre: "Jazz".to_string(),
				location: "Chicago".to_string(),
				nonprofit_interests: None,
				passion_statement: String::new(),
				bio: String::new(),
				social_links: None,
			},
			distance,
		}
	}

	#[test]
	fn accepts_ties_and_ascending_distances() {
		let result = RetrievalResult::new(vec![ranked("a", 0.1), ranked("b", 0.1), ranked("c", 0.4)])
			.expect("valid ranking rejected");

		assert_eq!(result.names(), vec!["a", "b", "c"]);
	}

	#[test]
	fn rejects_descending_distances() {
		let err = RetrievalResult::new(vec![ranked("a", 0.3), ranked("b", 0.2)])
			.expect_err("descending ranking accepted");

		assert_eq!(err, Error::Unordered { position: 1 });
	}

	#[test]
	fn rejects_negative_and_nan_distances() {
		assert_eq!(
			RetrievalResult::new(vec![ranked("a", -0.1)]),
			Err(Error::InvalidDistance { position: 0 })
		);
		assert_eq!(
			RetrievalResult::new(vec![ranked("a", 0.0), ranked("b", f32::NAN)]),
			Err(Error::InvalidDistance { position: 1 })
		);
	}

	#[test]
	fn rejects_duplicate_names() {
		assert_eq!(
			RetrievalResult::new(vec![ranked("a", 0.1), ranked("a", 0.2)]),
			Err(Error::DuplicateProfile { name: "a".to_string() })
		);
	}
}
