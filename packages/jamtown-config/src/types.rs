use serde::Deserialize;
use serde_json::{Map, Value};

/// Target dimension of every stored and query vector.
pub const VECTOR_DIM: u32 = 1_536;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub retrieval: Retrieval,
	#[serde(default)]
	pub prompt: Prompt,
	#[serde(default)]
	pub ingest: Ingest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
	#[serde(default = "default_vector_dim")]
	pub vector_dim: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub generation: LlmProviderConfig,
}

/// An OpenAI-compatible `/embeddings` endpoint serving a sentence embedding model.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	#[serde(default)]
	pub api_key: String,
	pub path: String,
	pub model: String,
	/// Output dimension of the model before padding, e.g. 768 for all-mpnet-base-v2.
	pub native_dim: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

/// An OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Retrieval {
	pub default_limit: u32,
	pub min_limit: u32,
	pub max_limit: u32,
}
impl Default for Retrieval {
	fn default() -> Self {
		Self { default_limit: 5, min_limit: 3, max_limit: 10 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Prompt {
	pub preview_wrap_width: u32,
}
impl Default for Prompt {
	fn default() -> Self {
		Self { preview_wrap_width: 100 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Ingest {
	pub batch_size: u32,
}
impl Default for Ingest {
	fn default() -> Self {
		Self { batch_size: 32 }
	}
}

fn default_vector_dim() -> u32 {
	VECTOR_DIM
}
