use std::time::Duration;

use futures::StreamExt;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::{Error, Result};

const CHUNK_CHANNEL_CAPACITY: usize = 32;

/// Streaming chat completion over SSE. Returns a bounded channel of text
/// chunks; the channel closes when the stream ends, errors, or emits the
/// terminal `[DONE]` event. Callers enforce their own idle timeout via
/// [`collect`].
pub async fn stream(
	cfg: &braid_config::LlmProviderConfig,
	messages: &[Value],
) -> Result<mpsc::Receiver<String>> {
	let client =
		Client::builder().connect_timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": messages,
		"stream": true,
	});
	let res = client
		.post(&url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?
		.error_for_status()?;
	let (tx, rx) = mpsc::channel(CHUNK_CHANNEL_CAPACITY);

	tokio::spawn(async move {
		let mut bytes = res.bytes_stream();
		let mut pending = String::new();

		while let Some(chunk) = bytes.next().await {
			let Ok(chunk) = chunk else { break };

			pending.push_str(&String::from_utf8_lossy(&chunk));

			while let Some(newline) = pending.find('\n') {
				let line = pending[..newline].trim_end_matches('\r').to_string();

				pending.drain(..=newline);

				match parse_sse_data(&line) {
					Some("[DONE]") => return,
					Some(data) =>
						if let Some(delta) = parse_stream_delta(data) {
							if tx.send(delta).await.is_err() {
								return;
							}
						},
					None => {},
				}
			}
		}
	});

	Ok(rx)
}

/// Drains a chunk channel into one string. Waits at most `idle_timeout`
/// between consecutive chunks; a stalled stream is an error, not a hang.
pub async fn collect(
	mut rx: mpsc::Receiver<String>,
	idle_timeout: Duration,
) -> Result<String> {
	let mut out = String::new();

	loop {
		match tokio::time::timeout(idle_timeout, rx.recv()).await {
			Ok(Some(chunk)) => out.push_str(&chunk),
			Ok(None) => return Ok(out),
			Err(_) =>
				return Err(Error::InvalidResponse {
					message: "Streaming response stalled before completion.".to_string(),
				}),
		}
	}
}

fn parse_sse_data(line: &str) -> Option<&str> {
	line.strip_prefix("data:").map(str::trim)
}

fn parse_stream_delta(data: &str) -> Option<String> {
	let json: Value = serde_json::from_str(data).ok()?;
	let content = json
		.get("choices")?
		.as_array()?
		.first()?
		.get("delta")?
		.get("content")?
		.as_str()?;

	if content.is_empty() { None } else { Some(content.to_string()) }
}
