use serde::{Deserialize, Serialize};

/// Which slot of the graph a question occupies. Sub-questions carry their
/// decomposition index; result ordering follows this index, never completion
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "index")]
pub enum QuestionSlot {
	Original,
	Sub(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
	pub text: String,
	pub slot: QuestionSlot,
}

impl Question {
	pub fn original(text: impl Into<String>) -> Self {
		Self { text: text.into(), slot: QuestionSlot::Original }
	}

	pub fn sub(index: u32, text: impl Into<String>) -> Self {
		Self { text: text.into(), slot: QuestionSlot::Sub(index) }
	}

	pub fn sub_index(&self) -> Option<u32> {
		match self.slot {
			QuestionSlot::Original => None,
			QuestionSlot::Sub(index) => Some(index),
		}
	}
}
