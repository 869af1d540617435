use serde::{Deserialize, Serialize};

use super::error::Result;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	pub id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// Styling category, e.g. `person` or `family`.
	#[serde(rename = "type", default)]
	pub kind: String,
}

impl GraphNode {
	/// Text shown for this node: its label, or the identifier when unlabeled.
	pub fn display_text(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.id)
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	/// Family role of the source (`husband`, `wife`, `child`) when known.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCount {
	pub persons: u64,
	pub families: u64,
}

/// Reply of the genealogy parsing service. Only `graph` is consumed here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResponse {
	pub count: RecordCount,
	#[serde(default)]
	pub ttl: String,
	pub graph: GraphData,
}

impl ParseResponse {
	pub fn from_json(text: &str) -> Result<Self> {
		Ok(serde_json::from_str(text)?)
	}
}
