//! Retained draw elements, refreshed from the simulation on every step.

use super::builder::ResolvedGraph;
use super::config::LabelConfig;
use super::label::{LabelShape, TextMeasurer};
use super::simulation::{SimNode, TickListener};
use super::space::WorldPoint;

#[derive(Clone, Debug, PartialEq)]
pub struct NodeElement {
	pub id: String,
	pub kind: String,
	/// Full text shown on hover.
	pub title: String,
	pub shape: LabelShape,
	pub at: WorldPoint,
}

impl NodeElement {
	pub fn contains(&self, p: WorldPoint) -> bool {
		let (hw, hh) = self.shape.half_extents();
		(p.x - self.at.x).abs() <= hw && (p.y - self.at.y).abs() <= hh
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinkElement {
	pub source: usize,
	pub target: usize,
	pub role: Option<String>,
	pub from: WorldPoint,
	pub to: WorldPoint,
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
	pub nodes: Vec<NodeElement>,
	pub links: Vec<LinkElement>,
	/// Number of steps this scene has been synced for.
	pub frames: u64,
}

impl Scene {
	pub fn new(graph: &ResolvedGraph, label: &LabelConfig, measurer: &dyn TextMeasurer) -> Self {
		let nodes = graph
			.nodes
			.iter()
			.map(|node| {
				let title = node.display_text().to_owned();
				NodeElement {
					id: node.id.clone(),
					kind: node.kind.clone(),
					shape: LabelShape::fit(&title, label, measurer),
					title,
					at: WorldPoint::default(),
				}
			})
			.collect();
		let links = graph
			.links
			.iter()
			.map(|link| LinkElement {
				source: link.source,
				target: link.target,
				role: link.role.clone(),
				from: WorldPoint::default(),
				to: WorldPoint::default(),
			})
			.collect();
		Self {
			nodes,
			links,
			frames: 0,
		}
	}

	pub fn sync(&mut self, sim_nodes: &[SimNode]) {
		for (element, node) in self.nodes.iter_mut().zip(sim_nodes) {
			element.at = node.position();
		}
		for link in &mut self.links {
			link.from = self.nodes[link.source].at;
			link.to = self.nodes[link.target].at;
		}
	}

	/// Topmost node whose shape covers `p`.
	pub fn node_at(&self, p: WorldPoint) -> Option<usize> {
		self.nodes.iter().rposition(|node| node.contains(p))
	}

	pub fn clear(&mut self) {
		self.nodes.clear();
		self.links.clear();
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.links.is_empty()
	}
}

impl TickListener for Scene {
	fn on_tick(&mut self, nodes: &[SimNode]) {
		self.sync(nodes);
		self.frames += 1;
	}
}
