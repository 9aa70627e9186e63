use std::{cmp::Ordering, sync::Arc};

use braid_domain::evidence::EvidenceUnit;

use crate::BoxFuture;

/// Ordering capability injected at graph construction. Implementations keep
/// the node's input/output shape; only the ordering policy differs.
pub trait Reranker
where
	Self: Send + Sync,
{
	fn rerank<'a>(
		&'a self,
		question: &'a str,
		docs: Vec<EvidenceUnit>,
	) -> BoxFuture<'a, Vec<EvidenceUnit>>;
}

/// Default policy: preserve verification-time order.
pub struct PassthroughReranker;

impl Reranker for PassthroughReranker {
	fn rerank<'a>(
		&'a self,
		_question: &'a str,
		docs: Vec<EvidenceUnit>,
	) -> BoxFuture<'a, Vec<EvidenceUnit>> {
		Box::pin(async move { docs })
	}
}

/// Stable descending sort by retrieval score.
pub struct ScoreReranker;

impl Reranker for ScoreReranker {
	fn rerank<'a>(
		&'a self,
		_question: &'a str,
		mut docs: Vec<EvidenceUnit>,
	) -> BoxFuture<'a, Vec<EvidenceUnit>> {
		Box::pin(async move {
			docs.sort_by(|left, right| cmp_f32_desc(left.score, right.score));

			docs
		})
	}
}

pub(crate) fn resolve(mode: &str) -> Arc<dyn Reranker> {
	match mode {
		"score" => Arc::new(ScoreReranker),
		_ => Arc::new(PassthroughReranker),
	}
}

pub fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn unit(document_id: &str, score: f32) -> EvidenceUnit {
		EvidenceUnit {
			document_id: document_id.to_string(),
			chunk_index: None,
			source_type: "wiki".to_string(),
			content: String::new(),
			score,
			verified: true,
			source_ref: None,
		}
	}

	#[tokio::test]
	async fn passthrough_preserves_order() {
		let docs = vec![unit("doc-1", 0.1), unit("doc-2", 0.9)];
		let ranked = PassthroughReranker.rerank("q", docs.clone()).await;

		assert_eq!(ranked, docs);
	}

	#[tokio::test]
	async fn score_reranker_sorts_descending() {
		let docs = vec![unit("doc-1", 0.1), unit("doc-2", 0.9), unit("doc-3", 0.5)];
		let ranked = ScoreReranker.rerank("q", docs).await;
		let ids: Vec<&str> = ranked.iter().map(|u| u.document_id.as_str()).collect();

		assert_eq!(ids, vec!["doc-2", "doc-3", "doc-1"]);
	}

	#[test]
	fn nan_scores_sort_last() {
		let mut scores = vec![f32::NAN, 0.4, 0.8];

		scores.sort_by(|a, b| cmp_f32_desc(*a, *b));

		assert_eq!(scores[0], 0.8);
		assert_eq!(scores[1], 0.4);
		assert!(scores[2].is_nan());
	}
}
