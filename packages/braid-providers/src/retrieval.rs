use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

/// One raw hit from the retrieval service, before domain conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedHit {
	pub document_id: String,
	pub chunk_index: Option<i32>,
	pub source_type: String,
	pub content: String,
	pub score: f32,
}

/// Queries the retrieval service for one query string. Hits come back in the
/// service's rank order.
pub async fn retrieve(
	cfg: &braid_config::RetrievalProviderConfig,
	query: &str,
) -> Result<Vec<RetrievedHit>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({ "query": query, "top_k": cfg.top_k });
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_retrieval_response(json)
}

fn parse_retrieval_response(json: Value) -> Result<Vec<RetrievedHit>> {
	let items = json
		.get("results")
		.or_else(|| json.get("hits"))
		.and_then(|v| v.as_array())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Retrieval response is missing results array.".to_string(),
		})?;
	let mut out = Vec::with_capacity(items.len());

	for item in items {
		let Some(document_id) = item
			.get("document_id")
			.or_else(|| item.get("id"))
			.and_then(|v| v.as_str())
			.filter(|id| !id.trim().is_empty())
		else {
			continue;
		};
		let content = item
			.get("content")
			.or_else(|| item.get("text"))
			.and_then(|v| v.as_str())
			.unwrap_or_default();
		let chunk_index =
			item.get("chunk_index").and_then(|v| v.as_i64()).and_then(|v| i32::try_from(v).ok());
		let source_type = item
			.get("source_type")
			.and_then(|v| v.as_str())
			.unwrap_or("unknown")
			.to_string();
		let score = item.get("score").and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;

		out.push(RetrievedHit {
			document_id: document_id.to_string(),
			chunk_index,
			source_type,
			content: content.to_string(),
			score,
		});
	}

	Ok(out)
}
