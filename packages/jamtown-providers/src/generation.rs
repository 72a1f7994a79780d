use serde::Deserialize;

use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct ChatResponse {
	choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
	message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
	content: Option<String>,
}

/// Sends `prompt` as a single user message and returns the trimmed reply.
pub async fn generate(cfg: &jamtown_config::LlmProviderConfig, prompt: &str) -> Result<String> {
	let client = crate::client(cfg.timeout_ms)?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": [
			{ "role": "user", "content": prompt },
		],
	});

	tracing::debug!(
		provider = %cfg.provider_id,
		model = %cfg.model,
		prompt_chars = prompt.len(),
		"Requesting completion."
	);

	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let bytes = res.error_for_status()?.bytes().await?;

	parse_chat_response(&bytes)
}

fn parse_chat_response(bytes: &[u8]) -> Result<String> {
	let response: ChatResponse = serde_json::from_slice(bytes)?;
	let content = response
		.choices
		.into_iter()
		.next()
		.and_then(|choice| choice.message.content)
		.map(|content| content.trim().to_string())
		.unwrap_or_default();

	if content.is_empty() {
		return Err(Error::InvalidResponse {
			message: "Completion response has no message content.".to_string(),
		});
	}

	Ok(content)
}
