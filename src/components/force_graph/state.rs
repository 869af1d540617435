use log::{debug, info};

use super::builder::{self, NodeIdx};
use super::config::SceneConfig;
use super::drag::DragController;
use super::error::Result;
use super::events::SceneEvent;
use super::label::TextMeasurer;
use super::scene::Scene;
use super::simulation::Simulation;
use super::space::{ScreenPoint, WorldPoint};
use super::tooltip::{Tooltip, TooltipState};
use super::types::GraphData;
use super::viewport::{ViewTransform, Viewport};

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	/// Pointer position at the previous pan event.
	pub last: ScreenPoint,
}

/// Everything that belongs to one loaded graph: simulation, camera, gestures
/// and drawn elements. Built per load and dropped as a whole.
pub struct SceneSession {
	simulation: Simulation,
	viewport: Viewport,
	drag: DragController,
	pan: PanState,
	hover: Option<NodeIdx>,
	tooltip: Tooltip,
	scene: Scene,
	pub width: f64,
	pub height: f64,
}

impl SceneSession {
	pub fn new(
		data: &GraphData,
		width: f64,
		height: f64,
		config: &SceneConfig,
		measurer: &dyn TextMeasurer,
	) -> Result<Self> {
		let graph = builder::build(data)?;
		let mut scene = Scene::new(&graph, &config.label, measurer);
		let mut simulation = Simulation::new(
			&graph,
			WorldPoint::new(width / 2.0, height / 2.0),
			config.simulation,
		);
		scene.sync(simulation.nodes());
		simulation.reheat(1.0);
		info!(
			"scene built: {} nodes, {} links",
			graph.nodes.len(),
			graph.links.len()
		);

		Ok(Self {
			simulation,
			viewport: Viewport::new(config.viewport),
			drag: DragController::default(),
			pan: PanState::default(),
			hover: None,
			tooltip: Tooltip::new(config.tooltip),
			scene,
			width,
			height,
		})
	}

	pub fn simulation(&self) -> &Simulation {
		&self.simulation
	}

	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	pub fn transform(&self) -> ViewTransform {
		self.viewport.transform()
	}

	pub fn scene(&self) -> &Scene {
		&self.scene
	}

	pub fn tooltip(&self) -> &TooltipState {
		self.tooltip.state()
	}

	pub fn dragged(&self) -> Option<NodeIdx> {
		self.drag.dragged()
	}

	pub fn hovered(&self) -> Option<NodeIdx> {
		self.hover
	}

	pub fn is_panning(&self) -> bool {
		self.pan.active
	}

	pub fn node_at_position(&self, at: ScreenPoint) -> Option<NodeIdx> {
		self.scene.node_at(self.viewport.transform().to_world(at))
	}

	/// Applies one event. Returns whether the scene needs repainting.
	pub fn dispatch(&mut self, event: SceneEvent) -> bool {
		match event {
			SceneEvent::PointerDown { at } => {
				match self.node_at_position(at) {
					Some(idx) => self.drag.start(&mut self.simulation, idx),
					None => {
						self.pan = PanState {
							active: true,
							last: at,
						};
						debug!("pan start");
					}
				}
				true
			}
			SceneEvent::PointerMove { at } => self.pointer_moved(at),
			SceneEvent::PointerUp { .. } => {
				self.release_gestures();
				true
			}
			SceneEvent::PointerLeave => {
				self.release_gestures();
				self.hover = None;
				self.tooltip.hide();
				true
			}
			SceneEvent::Wheel { at, delta_y } => {
				self.viewport.wheel(at, delta_y);
				true
			}
			SceneEvent::Zoom { anchor, factor } => {
				self.viewport.zoom_at(anchor, factor);
				true
			}
			SceneEvent::Frame => self.simulation.tick(&mut self.scene),
			SceneEvent::Resize { width, height } => {
				self.resize(width, height);
				true
			}
		}
	}

	fn pointer_moved(&mut self, at: ScreenPoint) -> bool {
		if self.drag.is_active() {
			let transform = self.viewport.transform();
			self.drag.move_to(&mut self.simulation, &transform, at);
			if self.tooltip.state().visible {
				self.tooltip.place(at);
			}
			return true;
		}

		if self.pan.active {
			let last = self.pan.last;
			self.viewport.pan_by(at.x - last.x, at.y - last.y);
			self.pan.last = at;
			return true;
		}

		let hovered = self.node_at_position(at);
		match (self.hover, hovered) {
			(Some(prev), Some(idx)) if prev == idx => self.tooltip.place(at),
			(_, Some(idx)) => self.tooltip.show(&self.scene.nodes[idx].title, at),
			(Some(_), None) => self.tooltip.hide(),
			(None, None) => return false,
		}
		self.hover = hovered;
		true
	}

	fn release_gestures(&mut self) {
		self.drag.end(&mut self.simulation);
		if self.pan.active {
			self.pan.active = false;
			debug!("pan end");
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.simulation
			.set_center(WorldPoint::new(width / 2.0, height / 2.0));
		self.simulation.restart();
	}

	/// Stops the simulation and drops every drawn element.
	pub fn dispose(&mut self) {
		self.drag.end(&mut self.simulation);
		self.simulation.stop();
		self.scene.clear();
		self.tooltip.hide();
		self.hover = None;
		info!("scene disposed");
	}
}
