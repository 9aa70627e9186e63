use serde_json::Value;

use braid_domain::answer::QualityLabel;

use crate::GraphContext;

const AFFIRMATIVE_TOKEN: &str = "yes";

/// Judges whether a generated answer actually addresses its question. An
/// empty answer fails without a provider call; a provider failure fails
/// closed.
pub(crate) async fn check(ctx: &GraphContext<'_>, question: &str, answer: &str) -> QualityLabel {
	if answer.trim().is_empty() {
		return QualityLabel::Fail;
	}

	let messages = build_quality_messages(question, answer);

	match ctx.providers.completion.complete(&ctx.cfg.providers.completion, &messages).await {
		Ok(reply) => classify_reply(&reply),
		Err(err) => {
			tracing::warn!(error = %err, "Quality check failed; marking the answer as failed.");

			QualityLabel::Fail
		},
	}
}

/// Strict-match classification: the reply passes only when, after trimming,
/// it equals the affirmative token (ASCII case ignored). No substring match,
/// so `"Yes, it does."` fails.
pub fn classify_reply(reply: &str) -> QualityLabel {
	if is_affirmative(reply) { QualityLabel::Pass } else { QualityLabel::Fail }
}

pub fn is_affirmative(reply: &str) -> bool {
	reply.trim().eq_ignore_ascii_case(AFFIRMATIVE_TOKEN)
}

pub fn build_quality_messages(question: &str, answer: &str) -> Vec<Value> {
	let system_prompt = "You are a quality check for a question answering system. \
Reply with exactly `yes` if the answer addresses the question, or `no` if it does not. \
Reply with a single word and nothing else.";
	let user_prompt = format!("Question:\n{question}\n\nAnswer:\n{answer}");

	vec![
		serde_json::json!({ "role": "system", "content": system_prompt }),
		serde_json::json!({ "role": "user", "content": user_prompt }),
	]
}
