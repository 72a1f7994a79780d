pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("Vector of dimension {native} cannot be padded to dimension {target}.")]
	DimensionOverflow { native: usize, target: usize },
	#[error("Vector dimensions differ: {left} vs {right}.")]
	DimensionMismatch { left: usize, right: usize },
	#[error("Vector has a zero or non-finite norm.")]
	Degenerate,
	#[error("Ranking is not in ascending distance order at position {position}.")]
	Unordered { position: usize },
	#[error("Distance at position {position} is negative or not finite.")]
	InvalidDistance { position: usize },
	#[error("Profile {name:?} appears more than once in the ranking.")]
	DuplicateProfile { name: String },
}
