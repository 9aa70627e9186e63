use braid_domain::question::Question;

use crate::{
	GraphContext, decomposition, expansion, fanout, generation, quality, retrieval,
	state::{GraphState, StateDelta},
	verification,
};

pub(crate) struct PipelineRun {
	pub(crate) state: GraphState,
	pub(crate) queries_attempted: usize,
	pub(crate) queries_failed: usize,
}

/// The reusable question pipeline: expansion, parallel retrieval with
/// dedup fan-in, parallel verification, rerank, generation, quality check.
/// Runs once for the original question and once per sub-question.
pub(crate) async fn answer_question(ctx: &GraphContext<'_>, question: Question) -> PipelineRun {
	let mut state = GraphState::new(question);
	let queries = expansion::expand(ctx, &state.question.text).await;

	state.apply(StateDelta::ExpandedQueries(queries.clone()));

	let outcome = retrieval::retrieve_all(ctx, &queries).await;
	let queries_attempted = outcome.attempted;
	let queries_failed = outcome.failed;

	state.apply(StateDelta::Retrieved(outcome.results));

	let verified =
		verification::verify_all(ctx, &state.question.text, state.evidence.clone()).await;

	state.apply(StateDelta::Verified(verified));

	let ranked = ctx.reranker.rerank(&state.question.text, state.verified.clone()).await;

	state.apply(StateDelta::Ranked(ranked));

	let answer = generation::generate(ctx, &state.question.text, &state.ranked).await;

	state.apply(StateDelta::Answer(answer));

	let label =
		quality::check(ctx, &state.question.text, state.answer.as_deref().unwrap_or_default())
			.await;

	state.apply(StateDelta::Quality(label));

	PipelineRun { state, queries_attempted, queries_failed }
}

/// Decomposes the original question and fans the answer pipeline out over
/// the sub-questions. Results come back in sub-question index order.
pub(crate) async fn answer_sub_questions(
	ctx: &GraphContext<'_>,
	question: &str,
) -> Vec<PipelineRun> {
	let sub_questions = decomposition::decompose(ctx, question).await;

	if sub_questions.is_empty() {
		return Vec::new();
	}

	let width = sub_questions.len();

	fanout::map_ordered(sub_questions, width, |sub_question| answer_question(ctx, sub_question))
		.await
}
