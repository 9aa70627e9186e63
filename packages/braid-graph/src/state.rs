use braid_domain::{
	answer::{AnswerResult, QualityLabel},
	evidence::{self, EvidenceUnit, RetrievalResult},
	question::Question,
};

/// The mutable accumulator for one question pipeline. The engine owns the
/// only mutable state; nodes are stateless transforms that emit tagged
/// [`StateDelta`] values, and the merge policy lives here, per field.
#[derive(Debug)]
pub struct GraphState {
	pub question: Question,
	pub expanded_queries: Vec<String>,
	pub retrieval: Vec<RetrievalResult>,
	/// Deduplicated union of all retrieved hits, first-seen wins.
	pub evidence: Vec<EvidenceUnit>,
	pub verified: Vec<EvidenceUnit>,
	pub ranked: Vec<EvidenceUnit>,
	pub answer: Option<String>,
	pub quality: Option<QualityLabel>,
	/// Sub-question results, kept in sub-question index order.
	pub sub_answers: Vec<AnswerResult>,
}

/// One node's output. Evidence-typed deltas dedup-merge, sub-answers append
/// and re-sort by index, scalar deltas overwrite.
#[derive(Debug)]
pub enum StateDelta {
	ExpandedQueries(Vec<String>),
	Retrieved(Vec<RetrievalResult>),
	Verified(Vec<EvidenceUnit>),
	Ranked(Vec<EvidenceUnit>),
	Answer(String),
	Quality(QualityLabel),
	SubAnswers(Vec<AnswerResult>),
}

impl GraphState {
	pub fn new(question: Question) -> Self {
		Self {
			question,
			expanded_queries: Vec::new(),
			retrieval: Vec::new(),
			evidence: Vec::new(),
			verified: Vec::new(),
			ranked: Vec::new(),
			answer: None,
			quality: None,
			sub_answers: Vec::new(),
		}
	}

	pub fn apply(&mut self, delta: StateDelta) {
		match delta {
			StateDelta::ExpandedQueries(queries) => self.expanded_queries = queries,
			StateDelta::Retrieved(results) =>
				for result in results {
					self.evidence =
						evidence::dedup_merge(std::mem::take(&mut self.evidence), result.hits.clone());
					self.retrieval.push(result);
				},
			StateDelta::Verified(units) => self.verified = evidence::dedup(units),
			StateDelta::Ranked(units) => self.ranked = evidence::dedup(units),
			StateDelta::Answer(answer) => self.answer = Some(answer),
			StateDelta::Quality(label) => self.quality = Some(label),
			StateDelta::SubAnswers(results) => {
				self.sub_answers.extend(results);
				self.sub_answers.sort_by_key(|result| result.sub_index());
			},
		}
	}

	/// Freezes the per-question fields into an immutable record. The ranked
	/// evidence is the set the answer was grounded on.
	pub fn to_answer_result(&self) -> AnswerResult {
		AnswerResult {
			question: self.question.clone(),
			answer: self.answer.clone().unwrap_or_default(),
			quality: self.quality.unwrap_or(QualityLabel::Fail),
			evidence: self.ranked.clone(),
		}
	}
}
