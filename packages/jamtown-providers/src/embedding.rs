use serde::Deserialize;

use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
	data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
	index: Option<usize>,
	embedding: Vec<f32>,
}

/// Raw model vectors for `texts`, in input order.
pub async fn embed(
	cfg: &jamtown_config::EmbeddingProviderConfig,
	texts: &[String],
) -> Result<Vec<Vec<f32>>> {
	let client = crate::client(cfg.timeout_ms)?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"input": texts,
	});

	tracing::debug!(
		provider = %cfg.provider_id,
		model = %cfg.model,
		inputs = texts.len(),
		"Requesting embeddings."
	);

	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let bytes = res.error_for_status()?.bytes().await?;
	let vectors = parse_embedding_response(&bytes)?;

	if vectors.len() != texts.len() {
		return Err(Error::InvalidResponse {
			message: format!(
				"Embedding response has {} vectors for {} inputs.",
				vectors.len(),
				texts.len()
			),
		});
	}

	Ok(vectors)
}

fn parse_embedding_response(bytes: &[u8]) -> Result<Vec<Vec<f32>>> {
	let response: EmbeddingResponse = serde_json::from_slice(bytes)?;
	let mut indexed: Vec<(usize, Vec<f32>)> = response
		.data
		.into_iter()
		.enumerate()
		.map(|(position, item)| (item.index.unwrap_or(position), item.embedding))
		.collect();

	indexed.sort_by_key(|(index, _)| *index);

	for (expected, (index, _)) in indexed.iter().enumerate() {
		if *index != expected {
			return Err(Error::InvalidResponse {
				message: format!("Embedding response index {index} is out of sequence."),
			});
		}
	}

	Ok(indexed.into_iter().map(|(_, vec)| vec).collect())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_embeddings_in_index_order() {
		let json = br#"{
			"data": [
				{ "index": 1, "embedding": [2.0, 3.0] },
				{ "index": 0, "embedding": [0.5, 1.5] }
			]
		}"#;
		let parsed = parse_embedding_response(json).expect("parse failed");

		assert_eq!(parsed, vec![vec![0.5, 1.5], vec![2.0, 3.0]]);
	}

	#[test]
	fn falls_back_to_position_without_index() {
		let json = br#"{ "data": [ { "embedding": [1.0] }, { "embedding": [2.0] } ] }"#;
		let parsed = parse_embedding_response(json).expect("parse failed");

		assert_eq!(parsed, vec![vec![1.0], vec![2.0]]);
	}

	#[test]
	fn rejects_gapped_indices() {
		let json = br#"{ "data": [ { "index": 0, "embedding": [1.0] }, { "index": 2, "embedding": [2.0] } ] }"#;

		assert!(matches!(parse_embedding_response(json), Err(Error::InvalidResponse { .. })));
	}

	#[test]
	fn rejects_missing_data() {
		assert!(matches!(parse_embedding_response(br#"{ "error": "x" }"#), Err(Error::SerdeJson(_))));
	}
}
