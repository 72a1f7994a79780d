//! Unit-length vectors and cosine distance.

use crate::{Error, Result};

pub fn l2_norm(vec: &[f32]) -> f32 {
	vec.iter().map(|value| f64::from(*value) * f64::from(*value)).sum::<f64>().sqrt() as f32
}

/// Scales `vec` in place to unit length.
pub fn normalize(vec: &mut [f32]) -> Result<()> {
	let norm = l2_norm(vec);

	if !norm.is_finite() || norm == 0.0 {
		return Err(Error::Degenerate);
	}

	for value in vec.iter_mut() {
		*value /= norm;
	}

	Ok(())
}

/// Right-pads `vec` with zeros up to `target`. Longer vectors are rejected, never truncated.
pub fn pad(mut vec: Vec<f32>, target: usize) -> Result<Vec<f32>> {
	if vec.len() > target {
		return Err(Error::DimensionOverflow { native: vec.len(), target });
	}

	vec.resize(target, 0.0);

	Ok(vec)
}

pub fn cosine_distance(left: &[f32], right: &[f32]) -> Result<f32> {
	if left.len() != right.len() {
		return Err(Error::DimensionMismatch { left: left.len(), right: right.len() });
	}

	let mut dot = 0.0_f64;
	let mut left_sq = 0.0_f64;
	let mut right_sq = 0.0_f64;

	for (l, r) in left.iter().zip(right) {
		let (l, r) = (f64::from(*l), f64::from(*r));

		dot += l * r;
		left_sq += l * l;
		right_sq += r * r;
	}

	let denom = left_sq.sqrt() * right_sq.sqrt();

	if denom == 0.0 || !denom.is_finite() {
		return Err(Error::Degenerate);
	}

	Ok((1.0 - dot / denom).max(0.0) as f32)
}
