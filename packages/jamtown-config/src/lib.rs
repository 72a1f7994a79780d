mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, EmbeddingProviderConfig, Ingest, LlmProviderConfig, Postgres, Prompt, Providers,
	Retrieval, Service, Storage, VECTOR_DIM,
};

use std::{fs, path::Path};

use serde_json::{Map, Value};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.postgres.vector_dim == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.vector_dim must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.native_dim == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.native_dim must be greater than zero.".to_string(),
		});
	}
	// Vectors are only ever padded, never truncated.
	if cfg.providers.embedding.native_dim > cfg.storage.postgres.vector_dim {
		return Err(Error::Validation {
			message: format!(
				"providers.embedding.native_dim ({}) must not exceed storage.postgres.vector_dim ({}).",
				cfg.providers.embedding.native_dim, cfg.storage.postgres.vector_dim
			),
		});
	}
	if cfg.providers.generation.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "Provider generation api_key must be non-empty.".to_string(),
		});
	}

	let temperature = cfg.providers.generation.temperature;

	if !temperature.is_finite() {
		return Err(Error::Validation {
			message: "providers.generation.temperature must be a finite number.".to_string(),
		});
	}
	if !(0.0..=2.0).contains(&temperature) {
		return Err(Error::Validation {
			message: "providers.generation.temperature must be in the range 0.0-2.0.".to_string(),
		});
	}

	for (label, headers) in [
		("embedding", &cfg.providers.embedding.default_headers),
		("generation", &cfg.providers.generation.default_headers),
	] {
		validate_headers(label, headers)?;
	}

	let retrieval = &cfg.retrieval;

	if retrieval.min_limit == 0 {
		return Err(Error::Validation {
			message: "retrieval.min_limit must be greater than zero.".to_string(),
		});
	}
	if retrieval.min_limit > retrieval.max_limit {
		return Err(Error::Validation {
			message: "retrieval.min_limit must not exceed retrieval.max_limit.".to_string(),
		});
	}
	if !(retrieval.min_limit..=retrieval.max_limit).contains(&retrieval.default_limit) {
		return Err(Error::Validation {
			message: "retrieval.default_limit must lie between retrieval.min_limit and retrieval.max_limit."
				.to_string(),
		});
	}
	if cfg.prompt.preview_wrap_width == 0 {
		return Err(Error::Validation {
			message: "prompt.preview_wrap_width must be greater than zero.".to_string(),
		});
	}
	if cfg.ingest.batch_size == 0 {
		return Err(Error::Validation {
			message: "ingest.batch_size must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn validate_headers(label: &str, headers: &Map<String, Value>) -> Result<()> {
	for (key, value) in headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("Provider {label} default_headers.{key} must be a string."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let embedding = &mut cfg.providers.embedding;

	embedding.api_key = embedding.api_key.trim().to_string();

	if embedding.api_base.ends_with('/') && embedding.path.starts_with('/') {
		embedding.api_base.pop();
	}

	let generation = &mut cfg.providers.generation;

	generation.api_key = generation.api_key.trim().to_string();

	if generation.api_base.ends_with('/') && generation.path.starts_with('/') {
		generation.api_base.pop();
	}
}
