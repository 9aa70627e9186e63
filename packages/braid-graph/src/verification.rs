use serde_json::Value;

use braid_domain::evidence::EvidenceUnit;

use crate::{GraphContext, fanout, quality};

/// Judges every candidate document against the question concurrently and
/// keeps the relevant ones. A provider failure classifies that document as
/// not relevant — the fail-closed default — and never aborts siblings.
pub(crate) async fn verify_all(
	ctx: &GraphContext<'_>,
	question: &str,
	candidates: Vec<EvidenceUnit>,
) -> Vec<EvidenceUnit> {
	let verification = &ctx.cfg.orchestration.verification;
	let mut candidates = candidates;

	candidates.truncate(verification.max_candidates as usize);

	let judged = fanout::map_ordered(
		candidates,
		verification.concurrency as usize,
		|unit| async move {
			let relevant = verify_one(ctx, question, &unit).await;

			(unit, relevant)
		},
	)
	.await;

	judged
		.into_iter()
		.filter(|(_, relevant)| *relevant)
		.map(|(mut unit, _)| {
			unit.verified = true;

			unit
		})
		.collect()
}

async fn verify_one(ctx: &GraphContext<'_>, question: &str, unit: &EvidenceUnit) -> bool {
	let messages = build_verification_messages(question, unit);

	match ctx.providers.completion.complete(&ctx.cfg.providers.completion, &messages).await {
		Ok(reply) => quality::is_affirmative(&reply),
		Err(err) => {
			tracing::warn!(
				document_id = %unit.document_id,
				error = %err,
				"Verification call failed; classifying the document as not relevant."
			);

			false
		},
	}
}

pub fn build_verification_messages(question: &str, unit: &EvidenceUnit) -> Vec<Value> {
	let system_prompt = "You are a relevance judge for a document retrieval system. \
Reply with exactly `yes` if the document is relevant to the question, or `no` if it is not. \
Reply with a single word and nothing else.";
	let user_prompt = format!(
		"Question:\n{question}\n\nDocument (id: {id}):\n{content}",
		id = unit.document_id,
		content = unit.content,
	);

	vec![
		serde_json::json!({ "role": "system", "content": system_prompt }),
		serde_json::json!({ "role": "user", "content": user_prompt }),
	]
}
