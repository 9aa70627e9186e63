pub mod aggregation;
pub mod decomposition;
pub mod expansion;
pub mod fanout;
pub mod generation;
pub mod pipeline;
pub mod quality;
pub mod rerank;
pub mod retrieval;
pub mod state;
pub mod time_serde;
pub mod verification;

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

pub use aggregation::{GraphOutput, NO_GROUNDING_ANSWER};
pub use rerank::{PassthroughReranker, Reranker, ScoreReranker};
pub use state::{GraphState, StateDelta};

use braid_config::{Config, LlmProviderConfig, RetrievalProviderConfig};
use braid_domain::question::Question;
use braid_providers::{
	completion, retrieval as retrieval_client, retrieval::RetrievedHit, streaming,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Retrieval unavailable: {message}")]
	RetrievalUnavailable { message: String },
}

impl From<braid_providers::Error> for Error {
	fn from(err: braid_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

pub trait CompletionProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, braid_providers::Result<String>>;
}

pub trait GenerationProvider
where
	Self: Send + Sync,
{
	fn stream<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, braid_providers::Result<tokio::sync::mpsc::Receiver<String>>>;
}

pub trait RetrievalProvider
where
	Self: Send + Sync,
{
	fn retrieve<'a>(
		&'a self,
		cfg: &'a RetrievalProviderConfig,
		query: &'a str,
	) -> BoxFuture<'a, braid_providers::Result<Vec<RetrievedHit>>>;
}

/// Read-only session handle. The orchestrator resolves per-document source
/// metadata through it; lifecycle is owned by the caller.
pub trait SessionStore
where
	Self: Send + Sync,
{
	fn resolve_source<'a>(&'a self, document_id: &'a str) -> BoxFuture<'a, Option<Value>>;
}

/// Session store with no document metadata. Every lookup resolves to `None`.
pub struct EmptySession;

impl SessionStore for EmptySession {
	fn resolve_source<'a>(&'a self, _document_id: &'a str) -> BoxFuture<'a, Option<Value>> {
		Box::pin(async { None })
	}
}

#[derive(Clone)]
pub struct Providers {
	pub completion: Arc<dyn CompletionProvider>,
	pub generation: Arc<dyn GenerationProvider>,
	pub retrieval: Arc<dyn RetrievalProvider>,
}

struct DefaultProviders;

impl CompletionProvider for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, braid_providers::Result<String>> {
		Box::pin(completion::complete(cfg, messages))
	}
}

impl GenerationProvider for DefaultProviders {
	fn stream<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, braid_providers::Result<tokio::sync::mpsc::Receiver<String>>> {
		Box::pin(streaming::stream(cfg, messages))
	}
}

impl RetrievalProvider for DefaultProviders {
	fn retrieve<'a>(
		&'a self,
		cfg: &'a RetrievalProviderConfig,
		query: &'a str,
	) -> BoxFuture<'a, braid_providers::Result<Vec<RetrievedHit>>> {
		Box::pin(retrieval_client::retrieve(cfg, query))
	}
}

impl Providers {
	pub fn new(
		completion: Arc<dyn CompletionProvider>,
		generation: Arc<dyn GenerationProvider>,
		retrieval: Arc<dyn RetrievalProvider>,
	) -> Self {
		Self { completion, generation, retrieval }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);
		Self { completion: provider.clone(), generation: provider.clone(), retrieval: provider }
	}
}

pub(crate) struct GraphContext<'a> {
	pub(crate) cfg: &'a Config,
	pub(crate) providers: &'a Providers,
	pub(crate) reranker: &'a dyn Reranker,
	pub(crate) session: &'a dyn SessionStore,
}

/// The sole entry point of the orchestration core: one `run` call turns one
/// question into one aggregated, evidence-grounded answer payload.
pub struct Orchestrator {
	pub cfg: Config,
	pub providers: Providers,
	reranker: Arc<dyn Reranker>,
	session: Arc<dyn SessionStore>,
}

impl Orchestrator {
	pub fn new(cfg: Config, session: Arc<dyn SessionStore>) -> Self {
		Self::with_providers(cfg, Providers::default(), session)
	}

	pub fn with_providers(cfg: Config, providers: Providers, session: Arc<dyn SessionStore>) -> Self {
		let reranker = rerank::resolve(&cfg.orchestration.rerank.mode);

		Self { cfg, providers, reranker, session }
	}

	pub async fn run(&self, question: &str) -> Result<GraphOutput> {
		let text = question.trim();

		if text.is_empty() {
			return Err(Error::InvalidRequest {
				message: "Question must be non-empty.".to_string(),
			});
		}

		let ctx = GraphContext {
			cfg: &self.cfg,
			providers: &self.providers,
			reranker: self.reranker.as_ref(),
			session: self.session.as_ref(),
		};
		let (original_run, sub_runs) = tokio::join!(
			pipeline::answer_question(&ctx, Question::original(text)),
			pipeline::answer_sub_questions(&ctx, text),
		);
		let attempted = original_run.queries_attempted
			+ sub_runs.iter().map(|run| run.queries_attempted).sum::<usize>();
		let failed = original_run.queries_failed
			+ sub_runs.iter().map(|run| run.queries_failed).sum::<usize>();

		if attempted > 0 && failed == attempted {
			return Err(Error::RetrievalUnavailable {
				message: "Every retrieval call failed across all branches.".to_string(),
			});
		}

		let mut state = original_run.state;
		let sub_answers = sub_runs.iter().map(|run| run.state.to_answer_result()).collect();

		state.apply(StateDelta::SubAnswers(sub_answers));

		Ok(aggregation::aggregate(&ctx, state).await)
	}
}
