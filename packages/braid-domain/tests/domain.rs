use std::collections::HashSet;

use braid_domain::{
	evidence::{self, EvidenceUnit},
	question::{Question, QuestionSlot},
};

fn unit(document_id: &str, score: f32) -> EvidenceUnit {
	EvidenceUnit {
		document_id: document_id.to_string(),
		chunk_index: None,
		source_type: "wiki".to_string(),
		content: format!("content of {document_id}"),
		score,
		verified: false,
		source_ref: None,
	}
}

fn chunk(document_id: &str, chunk_index: i32) -> EvidenceUnit {
	EvidenceUnit { chunk_index: Some(chunk_index), ..unit(document_id, 0.5) }
}

fn key_set(units: &[EvidenceUnit]) -> HashSet<(String, Option<i32>)> {
	units.iter().map(|u| (u.document_id.clone(), u.chunk_index)).collect()
}

#[test]
fn dedup_merge_emits_no_duplicate_keys() {
	let a = vec![unit("doc-1", 0.9), unit("doc-2", 0.8)];
	let b = vec![unit("doc-2", 0.7), unit("doc-3", 0.6)];
	let merged = evidence::dedup_merge(a, b);
	let keys = key_set(&merged);

	assert_eq!(merged.len(), 3);
	assert_eq!(keys.len(), merged.len());
}

#[test]
fn dedup_merge_is_commutative_as_a_set() {
	let a = vec![unit("doc-1", 0.9), unit("doc-2", 0.8)];
	let b = vec![unit("doc-2", 0.7), unit("doc-3", 0.6)];
	let ab = evidence::dedup_merge(a.clone(), b.clone());
	let ba = evidence::dedup_merge(b, a);

	assert_eq!(key_set(&ab), key_set(&ba));
}

#[test]
fn dedup_merge_is_idempotent() {
	let a = vec![unit("doc-1", 0.9), unit("doc-1", 0.4), unit("doc-2", 0.8)];
	let twice = evidence::dedup_merge(a.clone(), a.clone());
	let once = evidence::dedup_merge(a, Vec::new());

	assert_eq!(twice, once);
}

#[test]
fn dedup_merge_is_associative_up_to_first_occurrence() {
	let a = vec![unit("doc-1", 0.9)];
	let b = vec![unit("doc-2", 0.8), unit("doc-1", 0.1)];
	let c = vec![unit("doc-3", 0.7), unit("doc-2", 0.2)];
	let left =
		evidence::dedup_merge(evidence::dedup_merge(a.clone(), b.clone()), c.clone());
	let right = evidence::dedup_merge(a, evidence::dedup_merge(b, c));

	assert_eq!(left, right);
}

#[test]
fn first_seen_instance_wins() {
	let a = vec![unit("doc-1", 0.2)];
	let b = vec![unit("doc-1", 0.9)];
	let merged = evidence::dedup_merge(a, b);

	assert_eq!(merged.len(), 1);
	assert_eq!(merged[0].score, 0.2);
}

#[test]
fn chunk_index_participates_in_identity() {
	let a = vec![chunk("doc-1", 0), chunk("doc-1", 1)];
	let b = vec![chunk("doc-1", 1), chunk("doc-1", 2)];
	let merged = evidence::dedup_merge(a, b);

	assert_eq!(merged.len(), 3);
}

#[test]
fn dedup_merge_all_folds_in_order() {
	let lists = vec![
		vec![unit("doc-2", 0.5)],
		vec![unit("doc-1", 0.9), unit("doc-2", 0.1)],
		vec![unit("doc-3", 0.3)],
	];
	let merged = evidence::dedup_merge_all(lists);
	let ids: Vec<&str> = merged.iter().map(|u| u.document_id.as_str()).collect();

	assert_eq!(ids, vec!["doc-2", "doc-1", "doc-3"]);
}

#[test]
fn sub_questions_expose_their_index() {
	let original = Question::original("Who founded Acme Corp and when?");
	let sub = Question::sub(1, "When was Acme Corp founded?");

	assert_eq!(original.slot, QuestionSlot::Original);
	assert_eq!(original.sub_index(), None);
	assert_eq!(sub.sub_index(), Some(1));
}
