use std::collections::HashSet;

use serde_json::Value;

use crate::GraphContext;

/// Turns one question into 1..max_queries retrieval query variants. LLM
/// failure or an unparsable reply degrades to the original question as the
/// sole variant.
pub(crate) async fn expand(ctx: &GraphContext<'_>, question: &str) -> Vec<String> {
	let expansion = &ctx.cfg.orchestration.expansion;
	let messages = build_expansion_messages(question, expansion.max_queries);
	let parsed = match ctx
		.providers
		.completion
		.complete(&ctx.cfg.providers.completion, &messages)
		.await
	{
		Ok(raw) => parse_expanded_queries(&raw),
		Err(err) => {
			tracing::warn!(error = %err, "Query expansion failed; using the original question.");

			Vec::new()
		},
	};
	let queries =
		normalize_queries(parsed, question, expansion.include_original, expansion.max_queries);

	if queries.is_empty() { vec![question.to_string()] } else { queries }
}

/// Splits an expansion reply into discrete query strings. Variants are
/// separated by `--` and/or newlines; blanks are dropped, never padded.
pub fn parse_expanded_queries(raw: &str) -> Vec<String> {
	raw.lines()
		.flat_map(|line| line.split("--"))
		.map(str::trim)
		.filter(|part| !part.is_empty())
		.map(str::to_string)
		.collect()
}

pub fn normalize_queries(
	queries: Vec<String>,
	original: &str,
	include_original: bool,
	max_queries: u32,
) -> Vec<String> {
	let mut out = Vec::new();
	let mut seen = HashSet::new();

	if include_original {
		push_query(&mut out, &mut seen, original);
	}

	for query in queries {
		if out.len() >= max_queries as usize {
			break;
		}

		push_query(&mut out, &mut seen, &query);
	}

	out.truncate(max_queries as usize);

	out
}

fn push_query(out: &mut Vec<String>, seen: &mut HashSet<String>, value: &str) {
	let trimmed = value.trim();

	if trimmed.is_empty() {
		return;
	}

	let key = trimmed.to_lowercase();

	if seen.insert(key) {
		out.push(trimmed.to_string());
	}
}

pub fn build_expansion_messages(question: &str, max_queries: u32) -> Vec<Value> {
	let system_prompt = "You are a query expansion engine for a document retrieval system. \
Rewrite the user's question into short search queries that preserve its intent. \
Separate the queries with `--`. Do not add explanations, numbering, or extra text.";
	let user_prompt = format!(
		"Produce at most {max_queries} retrieval queries for this question:\n{question}"
	);

	vec![
		serde_json::json!({ "role": "system", "content": system_prompt }),
		serde_json::json!({ "role": "user", "content": user_prompt }),
	]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_on_double_dash() {
		let parsed = parse_expanded_queries("capital of France--French capital city");

		assert_eq!(parsed, vec!["capital of France", "French capital city"]);
	}

	#[test]
	fn splits_on_newlines_and_drops_blanks() {
		let parsed = parse_expanded_queries("acme founding year\n\n--acme history--");

		assert_eq!(parsed, vec!["acme founding year", "acme history"]);
	}

	#[test]
	fn normalize_prepends_original_and_dedups_case_insensitively() {
		let parsed = vec!["Acme history".to_string(), "acme HISTORY".to_string()];
		let queries = normalize_queries(parsed, "acme founding", true, 3);

		assert_eq!(queries, vec!["acme founding", "Acme history"]);
	}

	#[test]
	fn normalize_caps_at_max_queries() {
		let parsed = vec!["a".to_string(), "b".to_string(), "c".to_string()];
		let queries = normalize_queries(parsed, "q", false, 2);

		assert_eq!(queries, vec!["a", "b"]);
	}

	#[test]
	fn never_pads_short_replies() {
		let queries = normalize_queries(vec!["only one".to_string()], "q", false, 4);

		assert_eq!(queries.len(), 1);
	}
}
