use std::sync::{Arc, atomic::Ordering};

use braid_domain::answer::QualityLabel;
use braid_graph::Orchestrator;
use braid_testkit::{
	RetrievalRule, ScriptedCompletion, StaticSession, StubGeneration, StubRetrieval, hit,
};

use crate::acceptance::{
	DECOMPOSITION_MARKER, QUALITY_MARKER, VERIFICATION_MARKER, test_config,
};

#[tokio::test]
async fn decomposed_question_aggregates_sub_answers_in_order() {
	let completion = ScriptedCompletion::new(
		vec![
			(DECOMPOSITION_MARKER, "1. Who founded Acme Corp?\n2. When was Acme Corp founded?"),
			(VERIFICATION_MARKER, "yes"),
			(QUALITY_MARKER, "yes"),
		],
		"",
	);
	let completion_calls = completion.calls.clone();
	let generation = StubGeneration::new(
		vec![
			("Who founded Acme Corp?", "Jane Doe founded Acme Corp."),
			("When was Acme Corp founded?", "Acme Corp was founded in 1999."),
		],
		"Acme Corp was founded by Jane Doe in 1999.",
	);
	let retrieval = StubRetrieval::new(vec![
		RetrievalRule::hits(
			"Who founded",
			vec![hit("doc-founder", "Acme Corp was founded by Jane Doe.", 0.9)],
		),
		RetrievalRule::hits(
			"When was",
			vec![hit("doc-year", "Acme Corp was founded in 1999.", 0.8)],
		),
	]);
	let session = StaticSession::new(vec![(
		"doc-founder",
		serde_json::json!({ "url": "https://wiki.acme.example/founder" }),
	)]);
	let orchestrator = Orchestrator::with_providers(
		test_config(),
		braid_graph::Providers::new(Arc::new(completion), Arc::new(generation), Arc::new(retrieval)),
		Arc::new(session),
	);
	let output = orchestrator
		.run("Who founded Acme Corp and when?")
		.await
		.expect("Graph run must succeed.");

	assert_eq!(output.question, "Who founded Acme Corp and when?");
	assert_eq!(output.answer, "Acme Corp was founded by Jane Doe in 1999.");
	assert_eq!(output.quality, QualityLabel::Pass);

	assert_eq!(output.sub_answers.len(), 2);
	assert_eq!(output.sub_answers[0].question.text, "Who founded Acme Corp?");
	assert_eq!(output.sub_answers[0].answer, "Jane Doe founded Acme Corp.");
	assert_eq!(output.sub_answers[0].quality, QualityLabel::Pass);
	assert_eq!(output.sub_answers[1].question.text, "When was Acme Corp founded?");
	assert_eq!(output.sub_answers[1].answer, "Acme Corp was founded in 1999.");
	assert_eq!(output.sub_answers[1].quality, QualityLabel::Pass);

	let ids: Vec<&str> = output.evidence.iter().map(|u| u.document_id.as_str()).collect();

	assert_eq!(ids, vec!["doc-founder", "doc-year"]);
	assert!(output.evidence.iter().all(|u| u.verified));

	let founder = &output.evidence[0];

	assert_eq!(
		founder.source_ref,
		Some(serde_json::json!({ "url": "https://wiki.acme.example/founder" }))
	);
	assert_eq!(output.evidence[1].source_ref, None);

	// 3 expansions, 1 decomposition, 3 verifications (one document per
	// branch), 3 quality checks.
	assert_eq!(completion_calls.load(Ordering::SeqCst), 10);
}
