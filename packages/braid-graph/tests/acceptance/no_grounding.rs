use braid_domain::answer::QualityLabel;
use braid_graph::NO_GROUNDING_ANSWER;
use braid_testkit::{ScriptedCompletion, StubGeneration, StubRetrieval};

use crate::acceptance::{DECOMPOSITION_MARKER, VERIFICATION_MARKER, orchestrator};

// Retrieval succeeds but finds nothing, decomposition yields nothing, and
// generation dies. Aggregation must still emit a terminal state whose answer
// states the inability to find grounding.
#[tokio::test]
async fn zero_evidence_and_zero_sub_answers_yield_terminal_state() {
	let completion = ScriptedCompletion::new(
		vec![(DECOMPOSITION_MARKER, ""), (VERIFICATION_MARKER, "yes")],
		"",
	);
	let output = orchestrator(completion, StubGeneration::failing(), StubRetrieval::new(Vec::new()))
		.run("an unanswerable question")
		.await
		.expect("Graph run must still produce a terminal state.");

	assert!(output.evidence.is_empty());
	assert!(output.sub_answers.is_empty());
	assert_eq!(output.answer, NO_GROUNDING_ANSWER);
	assert_eq!(output.quality, QualityLabel::Fail);
}
