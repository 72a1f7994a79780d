//! Text to fixed-width unit vectors.

use std::sync::Arc;

use jamtown_config::EmbeddingProviderConfig;
use jamtown_domain::vector;

use crate::{EmbeddingProvider, Error, Result};

const WARMUP_TEXT: &str = "Encoder warmup.";

/// Encoder input: one text or a sequence of texts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Texts(Vec<String>);
impl Texts {
	pub fn as_slice(&self) -> &[String] {
		&self.0
	}
}
impl From<&str> for Texts {
	fn from(text: &str) -> Self {
		Self(vec![text.to_string()])
	}
}
impl From<String> for Texts {
	fn from(text: String) -> Self {
		Self(vec![text])
	}
}
impl From<Vec<String>> for Texts {
	fn from(texts: Vec<String>) -> Self {
		Self(texts)
	}
}
impl From<&[String]> for Texts {
	fn from(texts: &[String]) -> Self {
		Self(texts.to_vec())
	}
}
impl<const N: usize> From<[&str; N]> for Texts {
	fn from(texts: [&str; N]) -> Self {
		Self(texts.iter().map(|text| text.to_string()).collect())
	}
}

/// Embeds text through the configured model, then normalizes and zero-pads each vector to the
/// catalog dimension.
pub struct Encoder {
	provider: Arc<dyn EmbeddingProvider>,
	cfg: EmbeddingProviderConfig,
	native_dim: usize,
	vector_dim: usize,
}
impl Encoder {
	/// Checks the dimensions and sends one warmup request so a misconfigured model fails here
	/// instead of on the first query.
	pub async fn load(
		provider: Arc<dyn EmbeddingProvider>,
		cfg: &EmbeddingProviderConfig,
		vector_dim: u32,
	) -> Result<Self> {
		let native_dim = cfg.native_dim as usize;
		let vector_dim = vector_dim as usize;

		if native_dim == 0 {
			return Err(Error::Encoding {
				message: "Model native dimension must be greater than zero.".to_string(),
			});
		}
		if native_dim > vector_dim {
			return Err(Error::Encoding {
				message: format!(
					"Model native dimension {native_dim} exceeds catalog dimension {vector_dim}."
				),
			});
		}

		let encoder = Self { provider, cfg: cfg.clone(), native_dim, vector_dim };

		encoder.encode(WARMUP_TEXT).await?;

		tracing::info!(
			provider = %cfg.provider_id,
			model = %cfg.model,
			native_dim,
			vector_dim,
			"Encoder loaded."
		);

		Ok(encoder)
	}

	/// One vector of `vector_dim` components per input, in input order. A single text yields a
	/// one-element sequence.
	pub async fn encode(&self, texts: impl Into<Texts>) -> Result<Vec<Vec<f32>>> {
		let texts = texts.into();
		let texts = texts.as_slice();

		if texts.is_empty() {
			return Err(Error::Encoding { message: "No text to encode.".to_string() });
		}
		if let Some(position) = texts.iter().position(|text| text.trim().is_empty()) {
			return Err(Error::Encoding {
				message: format!("Input at position {position} is blank."),
			});
		}

		let raw = self.provider.embed(&self.cfg, texts).await?;

		if raw.len() != texts.len() {
			return Err(Error::Encoding {
				message: format!(
					"Model returned {} vectors for {} inputs.",
					raw.len(),
					texts.len()
				),
			});
		}

		raw.into_iter().enumerate().map(|(position, vec)| self.finish(position, vec)).collect()
	}

	pub async fn encode_one(&self, text: &str) -> Result<Vec<f32>> {
		let mut vectors = self.encode(text).await?;

		vectors
			.pop()
			.ok_or_else(|| Error::Encoding { message: "Model returned no vector.".to_string() })
	}

	fn finish(&self, position: usize, mut vec: Vec<f32>) -> Result<Vec<f32>> {
		if vec.len() != self.native_dim {
			return Err(Error::Encoding {
				message: format!(
					"Vector at position {position} has {} components; expected {}.",
					vec.len(),
					self.native_dim
				),
			});
		}

		vector::normalize(&mut vec).map_err(|err| Error::Encoding {
			message: format!("Vector at position {position}: {err}"),
		})?;

		vector::pad(vec, self.vector_dim)
			.map_err(|err| Error::Encoding { message: err.to_string() })
	}
}
