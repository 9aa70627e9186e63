use braid_domain::answer::QualityLabel;
use braid_graph::Error;
use braid_testkit::{
	FailingCompletion, RetrievalRule, ScriptedCompletion, StubGeneration, StubRetrieval, hit,
};

use crate::acceptance::{
	DECOMPOSITION_MARKER, EXPANSION_MARKER, QUALITY_MARKER, VERIFICATION_MARKER, orchestrator,
};

// Every completion call errors: expansion falls back to the original
// question, decomposition yields no sub-questions, verification classifies
// every document as not relevant, and the quality check fails closed. The
// run itself still succeeds.
#[tokio::test]
async fn completion_outage_degrades_without_failing_the_run() {
	let generation = StubGeneration::new(Vec::new(), "Summary of the sources.");
	let retrieval = StubRetrieval::new(vec![RetrievalRule::hits(
		"acme",
		vec![
			hit("doc-1", "Acme Corp was founded by Jane Doe.", 0.9),
			hit("doc-2", "Acme Corp was founded in 1999.", 0.8),
		],
	)]);
	let output = orchestrator(FailingCompletion, generation, retrieval)
		.run("acme history")
		.await
		.expect("Graph run must succeed.");

	assert!(output.sub_answers.is_empty());
	assert!(output.evidence.is_empty());
	assert_eq!(output.answer, "Summary of the sources.");
	assert_eq!(output.quality, QualityLabel::Fail);
}

// One expanded query's retrieval call hard-fails; its siblings are
// unaffected and the run degrades to the surviving evidence.
#[tokio::test]
async fn single_retrieval_failure_spares_sibling_queries() {
	let completion = ScriptedCompletion::new(
		vec![
			(EXPANSION_MARKER, "alpha query--beta query"),
			(DECOMPOSITION_MARKER, ""),
			(VERIFICATION_MARKER, "yes"),
			(QUALITY_MARKER, "yes"),
		],
		"",
	);
	let generation = StubGeneration::new(Vec::new(), "Beta answer.");
	let retrieval = StubRetrieval::new(vec![
		RetrievalRule::failure("alpha"),
		RetrievalRule::hits("beta", vec![hit("doc-beta", "beta fact", 0.7)]),
	]);
	let output = orchestrator(completion, generation, retrieval)
		.run("acme overview")
		.await
		.expect("Graph run must succeed.");
	let ids: Vec<&str> = output.evidence.iter().map(|u| u.document_id.as_str()).collect();

	assert_eq!(ids, vec!["doc-beta"]);
	assert_eq!(output.answer, "Beta answer.");
	assert_eq!(output.quality, QualityLabel::Pass);
}

// Retrieval hard-fails for every query of every branch: the one case that
// surfaces as a run error.
#[tokio::test]
async fn total_retrieval_outage_fails_the_run() {
	let completion = ScriptedCompletion::new(
		vec![(DECOMPOSITION_MARKER, "1. Q1\n2. Q2"), (VERIFICATION_MARKER, "yes")],
		"",
	);
	let generation = StubGeneration::new(Vec::new(), "unreachable");
	let err = orchestrator(completion, generation, StubRetrieval::unavailable())
		.run("acme history")
		.await
		.expect_err("Total retrieval outage must fail the run.");

	assert!(matches!(err, Error::RetrievalUnavailable { .. }));
}
