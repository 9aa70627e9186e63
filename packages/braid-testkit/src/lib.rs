//! Stub collaborators for exercising the orchestration graph without any
//! external LLM or retrieval service.

use std::{
	collections::HashMap,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};

use serde_json::Value;
use tokio::sync::mpsc;

use braid_config::{LlmProviderConfig, RetrievalProviderConfig};
use braid_graph::{
	BoxFuture, CompletionProvider, GenerationProvider, RetrievalProvider, SessionStore,
};
use braid_providers::retrieval::RetrievedHit;

pub fn hit(document_id: &str, content: &str, score: f32) -> RetrievedHit {
	RetrievedHit {
		document_id: document_id.to_string(),
		chunk_index: None,
		source_type: "wiki".to_string(),
		content: content.to_string(),
		score,
	}
}

/// Completion stub that routes on substrings of the serialized prompt. The
/// first matching rule wins; unmatched prompts get `default_reply`. Calls
/// are counted so tests can assert a node actually consulted the LLM.
pub struct ScriptedCompletion {
	pub rules: Vec<(String, String)>,
	pub default_reply: String,
	pub calls: Arc<AtomicUsize>,
}

impl ScriptedCompletion {
	pub fn new(rules: Vec<(&str, &str)>, default_reply: &str) -> Self {
		Self {
			rules: rules
				.into_iter()
				.map(|(marker, reply)| (marker.to_string(), reply.to_string()))
				.collect(),
			default_reply: default_reply.to_string(),
			calls: Arc::new(AtomicUsize::new(0)),
		}
	}

	pub fn call_count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

impl CompletionProvider for ScriptedCompletion {
	fn complete<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, braid_providers::Result<String>> {
		Box::pin(async move {
			self.calls.fetch_add(1, Ordering::SeqCst);

			let haystack = serde_json::to_string(messages).unwrap_or_default();

			for (marker, reply) in &self.rules {
				if haystack.contains(marker.as_str()) {
					return Ok(reply.clone());
				}
			}

			Ok(self.default_reply.clone())
		})
	}
}

/// Completion stub that always errors, for fail-closed paths.
pub struct FailingCompletion;

impl CompletionProvider for FailingCompletion {
	fn complete<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		_messages: &'a [Value],
	) -> BoxFuture<'a, braid_providers::Result<String>> {
		Box::pin(async {
			Err(braid_providers::Error::InvalidResponse {
				message: "Stubbed completion failure.".to_string(),
			})
		})
	}
}

/// Generation stub that streams a canned answer in small chunks. Routing
/// works like [`ScriptedCompletion`]: first rule whose marker appears in the
/// serialized prompt wins.
pub struct StubGeneration {
	pub rules: Vec<(String, String)>,
	pub default_answer: String,
	pub fail: bool,
}

impl StubGeneration {
	pub fn new(rules: Vec<(&str, &str)>, default_answer: &str) -> Self {
		Self {
			rules: rules
				.into_iter()
				.map(|(marker, answer)| (marker.to_string(), answer.to_string()))
				.collect(),
			default_answer: default_answer.to_string(),
			fail: false,
		}
	}

	pub fn failing() -> Self {
		Self { rules: Vec::new(), default_answer: String::new(), fail: true }
	}
}

impl GenerationProvider for StubGeneration {
	fn stream<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, braid_providers::Result<mpsc::Receiver<String>>> {
		Box::pin(async move {
			if self.fail {
				return Err(braid_providers::Error::InvalidResponse {
					message: "Stubbed generation failure.".to_string(),
				});
			}

			let haystack = serde_json::to_string(messages).unwrap_or_default();
			let answer = self
				.rules
				.iter()
				.find(|(marker, _)| haystack.contains(marker.as_str()))
				.map(|(_, answer)| answer.clone())
				.unwrap_or_else(|| self.default_answer.clone());
			let (tx, rx) = mpsc::channel(8);

			tokio::spawn(async move {
				for chunk in answer.split_inclusive(' ') {
					if tx.send(chunk.to_string()).await.is_err() {
						return;
					}
				}
			});

			Ok(rx)
		})
	}
}

#[derive(Clone)]
pub struct RetrievalRule {
	pub query_marker: String,
	pub delay_ms: u64,
	pub fail: bool,
	pub hits: Vec<RetrievedHit>,
}

impl RetrievalRule {
	pub fn hits(query_marker: &str, hits: Vec<RetrievedHit>) -> Self {
		Self { query_marker: query_marker.to_string(), delay_ms: 0, fail: false, hits }
	}

	pub fn failure(query_marker: &str) -> Self {
		Self { query_marker: query_marker.to_string(), delay_ms: 0, fail: true, hits: Vec::new() }
	}

	pub fn delayed(mut self, delay_ms: u64) -> Self {
		self.delay_ms = delay_ms;

		self
	}
}

/// Retrieval stub with per-query canned hits, programmable delay (to force
/// adversarial completion order), and per-query or blanket hard failure.
pub struct StubRetrieval {
	pub rules: Vec<RetrievalRule>,
	pub fail_always: bool,
}

impl StubRetrieval {
	pub fn new(rules: Vec<RetrievalRule>) -> Self {
		Self { rules, fail_always: false }
	}

	pub fn unavailable() -> Self {
		Self { rules: Vec::new(), fail_always: true }
	}
}

impl RetrievalProvider for StubRetrieval {
	fn retrieve<'a>(
		&'a self,
		_cfg: &'a RetrievalProviderConfig,
		query: &'a str,
	) -> BoxFuture<'a, braid_providers::Result<Vec<RetrievedHit>>> {
		Box::pin(async move {
			if self.fail_always {
				return Err(braid_providers::Error::InvalidResponse {
					message: "Stubbed retrieval outage.".to_string(),
				});
			}

			let Some(rule) =
				self.rules.iter().find(|rule| query.contains(rule.query_marker.as_str()))
			else {
				return Ok(Vec::new());
			};

			if rule.delay_ms > 0 {
				tokio::time::sleep(Duration::from_millis(rule.delay_ms)).await;
			}
			if rule.fail {
				return Err(braid_providers::Error::InvalidResponse {
					message: "Stubbed retrieval failure.".to_string(),
				});
			}

			Ok(rule.hits.clone())
		})
	}
}

/// Session store backed by a fixed document-id to metadata map.
pub struct StaticSession {
	pub sources: HashMap<String, Value>,
}

impl StaticSession {
	pub fn new(sources: Vec<(&str, Value)>) -> Self {
		Self {
			sources: sources.into_iter().map(|(id, meta)| (id.to_string(), meta)).collect(),
		}
	}
}

impl SessionStore for StaticSession {
	fn resolve_source<'a>(&'a self, document_id: &'a str) -> BoxFuture<'a, Option<Value>> {
		Box::pin(async move { self.sources.get(document_id).cloned() })
	}
}
