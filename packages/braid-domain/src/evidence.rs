use serde::{Deserialize, Serialize};

/// One retrieved chunk of source content. Identity is `(document_id,
/// chunk_index)`; two units with the same identity are the same evidence no
/// matter which query or branch produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceUnit {
	pub document_id: String,
	pub chunk_index: Option<i32>,
	pub source_type: String,
	pub content: String,
	pub score: f32,
	pub verified: bool,
	#[serde(default)]
	pub source_ref: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EvidenceKey {
	pub document_id: String,
	pub chunk_index: Option<i32>,
}

impl EvidenceUnit {
	pub fn key(&self) -> EvidenceKey {
		EvidenceKey { document_id: self.document_id.clone(), chunk_index: self.chunk_index }
	}
}

/// One query variant's hit list, tagged with the query that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
	pub query: String,
	pub hits: Vec<EvidenceUnit>,
}

/// Appends `from` onto `into`, dropping every unit whose identity key is
/// already present. The first-seen instance wins; scores and content of later
/// duplicates are discarded. Associative and idempotent, so it is safe as a
/// running fold across many fan-in merges.
pub fn dedup_merge(into: Vec<EvidenceUnit>, from: Vec<EvidenceUnit>) -> Vec<EvidenceUnit> {
	let mut out = Vec::with_capacity(into.len() + from.len());
	let mut seen = std::collections::HashSet::new();

	for unit in into.into_iter().chain(from) {
		if seen.insert(unit.key()) {
			out.push(unit);
		}
	}

	out
}

/// Removes identity-duplicated units from a single list, keeping first
/// occurrences in place.
pub fn dedup(units: Vec<EvidenceUnit>) -> Vec<EvidenceUnit> {
	dedup_merge(units, Vec::new())
}

/// Folds any number of evidence lists into one deduplicated list, scanning in
/// the given order.
pub fn dedup_merge_all<I>(lists: I) -> Vec<EvidenceUnit>
where
	I: IntoIterator<Item = Vec<EvidenceUnit>>,
{
	lists.into_iter().fold(Vec::new(), dedup_merge)
}
