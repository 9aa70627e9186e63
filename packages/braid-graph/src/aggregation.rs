use serde::{Deserialize, Serialize};

use braid_domain::{
	answer::{AnswerResult, QualityLabel},
	evidence::{self, EvidenceUnit},
};

use crate::{GraphContext, state::GraphState};

pub const NO_GROUNDING_ANSWER: &str =
	"No supporting evidence was found, so a grounded answer could not be produced.";

/// The terminal payload of one graph run: the original-question answer, the
/// sub-question answers in decomposition order, and the deduplicated
/// evidence set across every branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphOutput {
	pub run_id: uuid::Uuid,
	pub question: String,
	pub answer: String,
	pub quality: QualityLabel,
	pub sub_answers: Vec<AnswerResult>,
	pub evidence: Vec<EvidenceUnit>,
	#[serde(with = "crate::time_serde")]
	pub created_at: time::OffsetDateTime,
}

/// Terminal node. Sub-answers are concatenated in sub-question index order,
/// never re-sorted by score; failed sub-answers are surfaced with their
/// quality flag rather than dropped. Always produces a terminal state — with
/// zero usable evidence and zero sub-answers the answer text states the
/// inability to find grounding.
pub(crate) async fn aggregate(ctx: &GraphContext<'_>, state: GraphState) -> GraphOutput {
	let original = state.to_answer_result();
	let sub_answers = state.sub_answers;
	let lists = std::iter::once(original.evidence.clone())
		.chain(sub_answers.iter().map(|result| result.evidence.clone()));
	let mut merged = evidence::dedup_merge_all(lists);

	for unit in &mut merged {
		if unit.source_ref.is_none() {
			unit.source_ref = ctx.session.resolve_source(&unit.document_id).await;
		}
	}

	let mut answer = original.answer;
	let mut quality = original.quality;

	if merged.is_empty() && sub_answers.is_empty() && answer.trim().is_empty() {
		answer = NO_GROUNDING_ANSWER.to_string();
		quality = QualityLabel::Fail;
	}

	GraphOutput {
		run_id: uuid::Uuid::new_v4(),
		question: original.question.text,
		answer,
		quality,
		sub_answers,
		evidence: merged,
		created_at: time::OffsetDateTime::now_utc(),
	}
}
