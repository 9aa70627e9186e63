use braid_testkit::{RetrievalRule, ScriptedCompletion, StubGeneration, StubRetrieval, hit};

use crate::acceptance::{DECOMPOSITION_MARKER, QUALITY_MARKER, VERIFICATION_MARKER, orchestrator};

// The slowest sub-pipeline is the first sub-question; completion order is the
// reverse of decomposition order. Aggregation must still present results by
// sub-question index.
#[tokio::test]
async fn sub_answers_keep_index_order_under_reversed_completion() {
	let completion = ScriptedCompletion::new(
		vec![
			(DECOMPOSITION_MARKER, "1. Q1\n2. Q2\n3. Q3"),
			(VERIFICATION_MARKER, "yes"),
			(QUALITY_MARKER, "yes"),
		],
		"",
	);
	let generation = StubGeneration::new(
		vec![("Q1", "answer one"), ("Q2", "answer two"), ("Q3", "answer three")],
		"no answer",
	);
	let retrieval = StubRetrieval::new(vec![
		RetrievalRule::hits("Q1", vec![hit("doc-q1", "fact one", 0.9)]).delayed(120),
		RetrievalRule::hits("Q2", vec![hit("doc-q2", "fact two", 0.8)]).delayed(60),
		RetrievalRule::hits("Q3", vec![hit("doc-q3", "fact three", 0.7)]),
	]);
	let output = orchestrator(completion, generation, retrieval)
		.run("What are the three facts?")
		.await
		.expect("Graph run must succeed.");
	let sub_answers: Vec<(&str, &str)> = output
		.sub_answers
		.iter()
		.map(|result| (result.question.text.as_str(), result.answer.as_str()))
		.collect();

	assert_eq!(
		sub_answers,
		vec![("Q1", "answer one"), ("Q2", "answer two"), ("Q3", "answer three")]
	);

	let indexes: Vec<Option<u32>> =
		output.sub_answers.iter().map(|result| result.sub_index()).collect();

	assert_eq!(indexes, vec![Some(0), Some(1), Some(2)]);
}
