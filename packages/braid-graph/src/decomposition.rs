use serde_json::Value;

use braid_domain::question::Question;

use crate::GraphContext;

/// Splits a complex question into an ordered list of simpler sub-questions.
/// Decomposition is an enhancement: disabled config, a failed call, or a
/// reply that parses to zero sub-questions all yield an empty list and the
/// graph proceeds on the original-question pipeline alone.
pub(crate) async fn decompose(ctx: &GraphContext<'_>, question: &str) -> Vec<Question> {
	let decomposition = &ctx.cfg.orchestration.decomposition;

	if !decomposition.enabled {
		return Vec::new();
	}

	let messages = build_decomposition_messages(question, decomposition.max_sub_questions);
	let raw = match ctx
		.providers
		.completion
		.complete(&ctx.cfg.providers.completion, &messages)
		.await
	{
		Ok(raw) => raw,
		Err(err) => {
			tracing::warn!(error = %err, "Decomposition failed; continuing without sub-questions.");

			return Vec::new();
		},
	};

	parse_sub_questions(&raw, decomposition.max_sub_questions)
		.into_iter()
		.enumerate()
		.map(|(index, text)| Question::sub(index as u32, text))
		.collect()
}

/// Parses a numbered, bulleted, or line-separated reply into trimmed,
/// non-empty sub-question strings, capped at `max_sub_questions`.
pub fn parse_sub_questions(raw: &str, max_sub_questions: u32) -> Vec<String> {
	let marker = regex::Regex::new(r"^\s*(?:\d+\s*[.)]|[-*])\s*").ok();
	let mut out = Vec::new();

	for line in raw.lines() {
		if out.len() >= max_sub_questions as usize {
			break;
		}

		let stripped = match &marker {
			Some(re) => re.replace(line, ""),
			None => std::borrow::Cow::Borrowed(line),
		};
		let trimmed = stripped.trim();

		if !trimmed.is_empty() {
			out.push(trimmed.to_string());
		}
	}

	out
}

pub fn build_decomposition_messages(question: &str, max_sub_questions: u32) -> Vec<Value> {
	let system_prompt = "You are a question decomposition engine for a document retrieval \
system. Break the user's question into atomic sub-questions that can each be answered \
independently. Return one sub-question per line as a numbered list, with no explanations. \
If the question is already atomic, return it unchanged as the only item.";
	let user_prompt =
		format!("Break this question into at most {max_sub_questions} sub-questions:\n{question}");

	vec![
		serde_json::json!({ "role": "system", "content": system_prompt }),
		serde_json::json!({ "role": "user", "content": user_prompt }),
	]
}
