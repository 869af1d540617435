use std::collections::HashMap;

use super::error::{Endpoint, GraphError, Result};
use super::types::{GraphData, GraphNode};

/// Index of a node in a [`ResolvedGraph`]'s node arena.
pub type NodeIdx = usize;

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedLink {
	pub source: NodeIdx,
	pub target: NodeIdx,
	pub role: Option<String>,
}

/// Graph whose links point directly at node records instead of identifiers.
#[derive(Clone, Debug, Default)]
pub struct ResolvedGraph {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<ResolvedLink>,
}

impl ResolvedGraph {
	pub fn source(&self, link: &ResolvedLink) -> &GraphNode {
		&self.nodes[link.source]
	}

	pub fn target(&self, link: &ResolvedLink) -> &GraphNode {
		&self.nodes[link.target]
	}

	/// Number of links touching each node.
	pub fn degrees(&self) -> Vec<usize> {
		let mut degree = vec![0; self.nodes.len()];
		for link in &self.links {
			degree[link.source] += 1;
			degree[link.target] += 1;
		}
		degree
	}
}

/// Resolves link endpoints to node indices. Every endpoint must name a node;
/// identifier uniqueness is assumed (a repeated id resolves to its last occurrence).
pub fn build(data: &GraphData) -> Result<ResolvedGraph> {
	let id_to_idx: HashMap<&str, NodeIdx> = data
		.nodes
		.iter()
		.enumerate()
		.map(|(idx, node)| (node.id.as_str(), idx))
		.collect();

	let resolve = |link: usize, endpoint: Endpoint, id: &str| {
		id_to_idx
			.get(id)
			.copied()
			.ok_or_else(|| GraphError::MissingEndpoint {
				link,
				endpoint,
				id: id.to_owned(),
			})
	};

	let links = data
		.links
		.iter()
		.enumerate()
		.map(|(i, link)| {
			Ok(ResolvedLink {
				source: resolve(i, Endpoint::Source, &link.source)?,
				target: resolve(i, Endpoint::Target, &link.target)?,
				role: link.label.clone(),
			})
		})
		.collect::<Result<Vec<_>>>()?;

	Ok(ResolvedGraph {
		nodes: data.nodes.clone(),
		links,
	})
}
