use serde::{Deserialize, Serialize};

use crate::{evidence::EvidenceUnit, question::Question};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLabel {
	Pass,
	Fail,
}

impl QualityLabel {
	pub fn passed(self) -> bool {
		matches!(self, Self::Pass)
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Pass => "pass",
			Self::Fail => "fail",
		}
	}
}

/// The finished record for one question, original or sub. Produced once per
/// question; aggregation reads these, it never edits them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResult {
	pub question: Question,
	pub answer: String,
	pub quality: QualityLabel,
	pub evidence: Vec<EvidenceUnit>,
}

impl AnswerResult {
	pub fn sub_index(&self) -> Option<u32> {
		self.question.sub_index()
	}
}
