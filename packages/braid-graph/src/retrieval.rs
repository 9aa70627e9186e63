use braid_domain::evidence::{EvidenceUnit, RetrievalResult};
use braid_providers::retrieval::RetrievedHit;

use crate::{GraphContext, fanout};

pub(crate) struct RetrievalOutcome {
	pub(crate) results: Vec<RetrievalResult>,
	pub(crate) attempted: usize,
	pub(crate) failed: usize,
}

/// Issues every expanded query against the retrieval service concurrently.
/// A failed call degrades to an empty hit list for that query; siblings are
/// unaffected. Hard failures are counted so the orchestrator can detect a
/// fully unavailable retrieval service.
pub(crate) async fn retrieve_all(ctx: &GraphContext<'_>, queries: &[String]) -> RetrievalOutcome {
	let attempted = queries.len();
	let branches = fanout::map_ordered(queries.to_vec(), attempted.max(1), |query| async move {
		match ctx.providers.retrieval.retrieve(&ctx.cfg.providers.retrieval, &query).await {
			Ok(hits) => (RetrievalResult { query, hits: to_evidence(hits) }, false),
			Err(err) => {
				tracing::warn!(query = %query, error = %err, "Retrieval call failed; continuing with empty hits.");

				(RetrievalResult { query, hits: Vec::new() }, true)
			},
		}
	})
	.await;
	let failed = branches.iter().filter(|(_, failed)| *failed).count();
	let results = branches.into_iter().map(|(result, _)| result).collect();

	RetrievalOutcome { results, attempted, failed }
}

fn to_evidence(hits: Vec<RetrievedHit>) -> Vec<EvidenceUnit> {
	hits.into_iter()
		.map(|hit| EvidenceUnit {
			document_id: hit.document_id,
			chunk_index: hit.chunk_index,
			source_type: hit.source_type,
			content: hit.content,
			score: hit.score,
			verified: false,
			source_ref: None,
		})
		.collect()
}
