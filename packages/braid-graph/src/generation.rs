use std::time::Duration;

use serde_json::Value;

use braid_domain::evidence::EvidenceUnit;

use crate::GraphContext;

/// Generates the answer for one question from its ranked evidence. The
/// streaming reply is concatenated under an idle timeout; a failed or
/// stalled stream degrades to an empty answer, which the quality check then
/// fails.
pub(crate) async fn generate(
	ctx: &GraphContext<'_>,
	question: &str,
	evidence: &[EvidenceUnit],
) -> String {
	let generation = &ctx.cfg.orchestration.generation;
	let messages =
		build_grounding_messages(question, evidence, generation.max_context_docs);
	let receiver = match ctx
		.providers
		.generation
		.stream(&ctx.cfg.providers.generation, &messages)
		.await
	{
		Ok(receiver) => receiver,
		Err(err) => {
			tracing::warn!(error = %err, "Answer generation failed to start; returning an empty answer.");

			return String::new();
		},
	};
	let idle_timeout = Duration::from_millis(generation.stream_idle_timeout_ms);

	match braid_providers::streaming::collect(receiver, idle_timeout).await {
		Ok(answer) => answer,
		Err(err) => {
			tracing::warn!(error = %err, "Answer stream did not complete; returning an empty answer.");

			String::new()
		},
	}
}

pub const NO_CONTEXT_MARKER: &str = "No context documents are available.";

/// Builds the grounding prompt. Every document gets an explicit boundary;
/// an empty evidence list is stated outright instead of silently omitting
/// the context section.
pub fn build_grounding_messages(
	question: &str,
	evidence: &[EvidenceUnit],
	max_context_docs: u32,
) -> Vec<Value> {
	let system_prompt = "You are an answer generation engine for a document retrieval system. \
Answer the question using only the provided context documents. Cite no outside knowledge. \
If the context does not contain the answer, say that the available sources do not answer \
the question.";
	let mut context = String::new();

	if evidence.is_empty() {
		context.push_str(NO_CONTEXT_MARKER);
	} else {
		for (index, unit) in evidence.iter().take(max_context_docs as usize).enumerate() {
			if index > 0 {
				context.push('\n');
			}

			context.push_str(&format!(
				"[document {number}] (id: {id}, source: {source})\n{content}\n",
				number = index + 1,
				id = unit.document_id,
				source = unit.source_type,
				content = unit.content,
			));
		}
	}

	let user_prompt = format!("Context:\n{context}\n\nQuestion:\n{question}");

	vec![
		serde_json::json!({ "role": "system", "content": system_prompt }),
		serde_json::json!({ "role": "user", "content": user_prompt }),
	]
}
