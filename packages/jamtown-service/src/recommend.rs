//! The match pipeline: retrieve, assemble, recommend.

use serde::Deserialize;

use jamtown_domain::{
	Prompt, ResultCard, RetrievalResult, build_prompt, render_preview, result_cards,
};

use crate::{Error, JamtownService, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
	pub query: String,
	#[serde(default)]
	pub limit: Option<u32>,
}

/// Everything produced before the generator is called.
#[derive(Debug, Clone)]
pub struct PreparedMatch {
	pub query: String,
	pub results: RetrievalResult,
	pub prompt: Prompt,
	pub preview: String,
	pub cards: Vec<ResultCard>,
}

#[derive(Debug)]
pub struct MatchOutcome {
	pub prepared: PreparedMatch,
	/// A generation failure leaves `prepared` intact.
	pub recommendation: Result<String>,
}

impl JamtownService {
	pub async fn prepare(&self, req: MatchRequest) -> Result<PreparedMatch> {
		let query = req.query.trim();

		if query.is_empty() {
			return Err(Error::InvalidRequest {
				field: Some("query".to_string()),
				message: "query must be non-empty.".to_string(),
			});
		}

		let limit = self.resolve_limit(req.limit)?;
		let results = self.retriever().await?.retrieve(query, limit).await?;
		let prompt = build_prompt(query, &results);
		let preview = render_preview(&prompt, self.cfg.prompt.preview_wrap_width as usize);
		let cards = result_cards(&results);

		Ok(PreparedMatch { query: query.to_string(), results, prompt, preview, cards })
	}

	pub async fn recommend(&self, prepared: &PreparedMatch) -> Result<String> {
		let cfg = &self.cfg.providers.generation;
		let answer = self.providers.generation.generate(cfg, prepared.prompt.text()).await?;

		tracing::info!(
			provider = %cfg.provider_id,
			model = %cfg.model,
			results = prepared.results.len(),
			"Generated recommendation."
		);

		Ok(answer)
	}

	pub async fn match_cause(&self, req: MatchRequest) -> Result<MatchOutcome> {
		let prepared = self.prepare(req).await?;
		let recommendation = self.recommend(&prepared).await;

		if let Err(err) = &recommendation {
			tracing::warn!(error = %err, "Recommendation failed; returning retrieved profiles only.");
		}

		Ok(MatchOutcome { prepared, recommendation })
	}

	fn resolve_limit(&self, requested: Option<u32>) -> Result<u32> {
		let retrieval = &self.cfg.retrieval;
		let limit = requested.unwrap_or(retrieval.default_limit);

		if limit < retrieval.min_limit || limit > retrieval.max_limit {
			return Err(Error::InvalidRequest {
				field: Some("limit".to_string()),
				message: format!(
					"limit must be between {} and {}; got {limit}.",
					retrieval.min_limit, retrieval.max_limit
				),
			});
		}

		Ok(limit)
	}
}
