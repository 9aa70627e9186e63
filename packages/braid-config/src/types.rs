use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub providers: Providers,
	pub orchestration: Orchestration,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub completion: LlmProviderConfig,
	pub generation: LlmProviderConfig,
	pub retrieval: RetrievalProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub top_k: u32,
	pub timeout_ms: u64,
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Orchestration {
	pub deadline_ms: u64,
	pub expansion: Expansion,
	pub decomposition: Decomposition,
	pub verification: Verification,
	pub rerank: Rerank,
	pub generation: Generation,
}

#[derive(Debug, Deserialize)]
pub struct Expansion {
	pub max_queries: u32,
	pub include_original: bool,
}

#[derive(Debug, Deserialize)]
pub struct Decomposition {
	pub enabled: bool,
	pub max_sub_questions: u32,
}

#[derive(Debug, Deserialize)]
pub struct Verification {
	pub max_candidates: u32,
	pub concurrency: u32,
}

#[derive(Debug, Deserialize)]
pub struct Rerank {
	pub mode: String,
}

#[derive(Debug, Deserialize)]
pub struct Generation {
	pub max_context_docs: u32,
	pub stream_idle_timeout_ms: u64,
}
