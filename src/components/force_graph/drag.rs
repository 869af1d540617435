use log::debug;

use super::builder::NodeIdx;
use super::simulation::Simulation;
use super::space::{ScreenPoint, WorldPoint};
use super::viewport::ViewTransform;

/// Pins a node under the pointer for the duration of a drag gesture.
///
/// This is the only writer of pinned positions.
#[derive(Clone, Debug, Default)]
pub struct DragController {
	node: Option<NodeIdx>,
}

impl DragController {
	pub fn dragged(&self) -> Option<NodeIdx> {
		self.node
	}

	pub fn is_active(&self) -> bool {
		self.node.is_some()
	}

	/// Warms the simulation to its drag alpha target and pins `node` where it currently is.
	pub fn start(&mut self, sim: &mut Simulation, node: NodeIdx) {
		let Some(position) = sim.node(node).map(|n| n.position()) else {
			return;
		};
		if self.node.is_none() {
			let target = sim.config().drag_alpha_target;
			sim.set_alpha_target(target);
			sim.restart();
		} else {
			self.release(sim);
		}
		sim.pin(node, position);
		self.node = Some(node);
		debug!("drag start on node {node}");
	}

	/// Pins the dragged node under `pointer`, resolved through `transform` as it is right now.
	pub fn move_to(
		&mut self,
		sim: &mut Simulation,
		transform: &ViewTransform,
		pointer: ScreenPoint,
	) -> Option<WorldPoint> {
		let node = self.node?;
		let world = transform.to_world(pointer);
		sim.pin(node, world);
		Some(world)
	}

	/// Frees the node and lets the simulation cool.
	pub fn end(&mut self, sim: &mut Simulation) {
		if let Some(node) = self.node.take() {
			sim.unpin(node);
			sim.set_alpha_target(0.0);
			debug!("drag end on node {node}");
		}
	}

	fn release(&mut self, sim: &mut Simulation) {
		if let Some(node) = self.node.take() {
			sim.unpin(node);
		}
	}
}
