//! Force-directed layout engine.
//!
//! Velocity Verlet integration under three forces (link springs, many-body
//! repulsion, centering) scaled by a decaying `alpha`. The engine is
//! *energized* while it runs and *settled* once alpha falls under its floor.

mod forces;
mod quadtree;

use std::f64::consts::PI;

use log::debug;

use super::builder::{NodeIdx, ResolvedGraph};
use super::config::SimulationConfig;
use super::space::WorldPoint;
use forces::ManyBodyParams;

const INITIAL_RADIUS: f64 = 10.0;
const CENTER_STRENGTH: f64 = 1.0;

/// Simulated state of one node. Free coordinates are written only by the
/// engine, pinned coordinates only by the drag controller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimNode {
	x: f64,
	y: f64,
	vx: f64,
	vy: f64,
	fx: Option<f64>,
	fy: Option<f64>,
}

impl SimNode {
	fn placed(at: WorldPoint) -> Self {
		Self {
			x: at.x,
			y: at.y,
			..Self::default()
		}
	}

	pub fn position(&self) -> WorldPoint {
		WorldPoint::new(self.x, self.y)
	}

	pub fn velocity(&self) -> (f64, f64) {
		(self.vx, self.vy)
	}

	/// Pinned position, present only while both axes are fixed.
	pub fn pinned(&self) -> Option<WorldPoint> {
		Some(WorldPoint::new(self.fx?, self.fy?))
	}

	pub fn is_pinned(&self) -> bool {
		self.fx.is_some() || self.fy.is_some()
	}
}

#[derive(Clone, Debug, PartialEq)]
struct SimLink {
	source: NodeIdx,
	target: NodeIdx,
	distance: f64,
	strength: f64,
	/// Share of the correction applied to the target.
	bias: f64,
}

/// Receives a notification after every simulation step.
pub trait TickListener {
	fn on_tick(&mut self, nodes: &[SimNode]);
}

impl TickListener for () {
	fn on_tick(&mut self, _nodes: &[SimNode]) {}
}

/// Linear congruential generator for reproducible jiggle.
#[derive(Clone, Debug)]
struct Lcg(u64);

impl Default for Lcg {
	fn default() -> Self {
		Self(1)
	}
}

impl Lcg {
	const A: u64 = 1_664_525;
	const C: u64 = 1_013_904_223;
	const M: u64 = 1 << 32;

	fn next_f64(&mut self) -> f64 {
		self.0 = (Self::A * self.0 + Self::C) % Self::M;
		self.0 as f64 / Self::M as f64
	}

	/// Tiny non-zero offset that separates coincident nodes.
	fn jiggle(&mut self) -> f64 {
		(self.next_f64() - 0.5) * 1e-6
	}
}

pub struct Simulation {
	nodes: Vec<SimNode>,
	links: Vec<SimLink>,
	config: SimulationConfig,
	center: WorldPoint,
	alpha: f64,
	alpha_target: f64,
	alpha_decay: f64,
	running: bool,
	rng: Lcg,
}

impl Simulation {
	/// Places nodes on a phyllotaxis spiral around `center` and starts energized.
	pub fn new(graph: &ResolvedGraph, center: WorldPoint, config: SimulationConfig) -> Self {
		let initial_angle = PI * (3.0 - 5.0_f64.sqrt());
		let nodes = (0..graph.nodes.len())
			.map(|i| {
				let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
				let angle = i as f64 * initial_angle;
				SimNode::placed(WorldPoint::new(
					center.x + radius * angle.cos(),
					center.y + radius * angle.sin(),
				))
			})
			.collect();

		let degree = graph.degrees();
		let links = graph
			.links
			.iter()
			.filter(|link| link.source != link.target)
			.map(|link| {
				let (ds, dt) = (degree[link.source] as f64, degree[link.target] as f64);
				SimLink {
					source: link.source,
					target: link.target,
					distance: config.link_distance,
					strength: config.link_strength,
					bias: ds / (ds + dt),
				}
			})
			.collect();

		Self {
			nodes,
			links,
			alpha_decay: config.alpha_decay(),
			config,
			center,
			alpha: 1.0,
			alpha_target: 0.0,
			running: true,
			rng: Lcg::default(),
		}
	}

	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	pub fn node(&self, idx: NodeIdx) -> Option<&SimNode> {
		self.nodes.get(idx)
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	pub fn center(&self) -> WorldPoint {
		self.center
	}

	pub fn config(&self) -> &SimulationConfig {
		&self.config
	}

	pub fn is_settled(&self) -> bool {
		!self.running
	}

	pub fn set_center(&mut self, center: WorldPoint) {
		self.center = center;
	}

	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target.clamp(0.0, 1.0);
	}

	/// Resumes stepping without touching alpha.
	pub fn restart(&mut self) {
		self.running = true;
	}

	pub fn reheat(&mut self, alpha: f64) {
		self.alpha = alpha.clamp(0.0, 1.0);
		self.restart();
	}

	pub fn stop(&mut self) {
		self.running = false;
	}

	pub(in crate::components::force_graph) fn pin(&mut self, idx: NodeIdx, at: WorldPoint) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.fx = Some(at.x);
			node.fy = Some(at.y);
		}
	}

	pub(in crate::components::force_graph) fn unpin(&mut self, idx: NodeIdx) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.fx = None;
			node.fy = None;
		}
	}

	/// Advances one step if energized and notifies `listener`. Returns whether a step ran.
	pub fn tick<L: TickListener + ?Sized>(&mut self, listener: &mut L) -> bool {
		if !self.running {
			return false;
		}
		self.step();
		listener.on_tick(&self.nodes);
		if self.alpha < self.config.alpha_min {
			self.running = false;
			debug!("simulation settled");
		}
		true
	}

	/// Steps until settled or `max_ticks` is reached; returns the number of steps taken.
	pub fn settle(&mut self, max_ticks: usize) -> usize {
		let mut ticks = 0;
		while ticks < max_ticks && self.tick(&mut ()) {
			ticks += 1;
		}
		ticks
	}

	fn step(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
		let alpha = self.alpha;

		forces::apply_links(&mut self.nodes, &self.links, alpha, &mut self.rng);
		forces::apply_many_body(
			&mut self.nodes,
			ManyBodyParams {
				strength: self.config.charge_strength,
				theta_sq: self.config.theta * self.config.theta,
				distance_min_sq: self.config.distance_min * self.config.distance_min,
				alpha,
			},
			&mut self.rng,
		);
		forces::apply_center(&mut self.nodes, self.center, CENTER_STRENGTH);

		let retain = 1.0 - self.config.velocity_decay;
		for node in &mut self.nodes {
			match node.fx {
				Some(fx) => {
					node.x = fx;
					node.vx = 0.0;
				}
				None => {
					node.vx *= retain;
					node.x += node.vx;
				}
			}
			match node.fy {
				Some(fy) => {
					node.y = fy;
					node.vy = 0.0;
				}
				None => {
					node.vy *= retain;
					node.y += node.vy;
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::builder::build;
	use crate::components::force_graph::types::{GraphData, GraphLink, GraphNode};

	fn chain(n: usize) -> ResolvedGraph {
		let nodes = (0..n)
			.map(|i| GraphNode {
				id: format!("n{i}"),
				label: None,
				kind: "person".into(),
			})
			.collect();
		let links = (1..n)
			.map(|i| GraphLink {
				source: format!("n{}", i - 1),
				target: format!("n{i}"),
				label: None,
			})
			.collect();
		build(&GraphData { nodes, links }).unwrap()
	}

	struct CountingListener(usize);

	impl TickListener for CountingListener {
		fn on_tick(&mut self, _nodes: &[SimNode]) {
			self.0 += 1;
		}
	}

	#[test]
	fn cools_down_and_stops_notifying() {
		let mut sim = Simulation::new(&chain(5), WorldPoint::new(0.0, 0.0), Default::default());
		let mut listener = CountingListener(0);
		while sim.tick(&mut listener) {}
		assert!(sim.is_settled());
		assert!(sim.alpha() < sim.config().alpha_min);
		assert!((299..=301).contains(&listener.0), "ticks: {}", listener.0);
		assert!(!sim.tick(&mut listener));
	}

	#[test]
	fn linked_pair_settles_near_rest_distance() {
		let mut sim = Simulation::new(&chain(2), WorldPoint::new(400.0, 300.0), Default::default());
		sim.settle(1_000);
		let distance = sim.nodes()[0].position().distance(sim.nodes()[1].position());
		assert!((85.0..115.0).contains(&distance), "distance {distance}");
	}

	#[test]
	fn centroid_tracks_center() {
		let center = WorldPoint::new(250.0, -40.0);
		let mut sim = Simulation::new(&chain(12), center, Default::default());
		sim.settle(1_000);
		let n = sim.nodes().len() as f64;
		let cx = sim.nodes().iter().map(|node| node.position().x).sum::<f64>() / n;
		let cy = sim.nodes().iter().map(|node| node.position().y).sum::<f64>() / n;
		assert!((cx - center.x).abs() < 1.0);
		assert!((cy - center.y).abs() < 1.0);
	}

	#[test]
	fn pinned_node_holds_still_and_release_frees_it() {
		let mut sim = Simulation::new(&chain(3), WorldPoint::new(0.0, 0.0), Default::default());
		let anchor = WorldPoint::new(500.0, 500.0);
		sim.pin(1, anchor);
		for _ in 0..30 {
			sim.tick(&mut ());
			assert_eq!(sim.nodes()[1].position(), anchor);
			assert_eq!(sim.nodes()[1].velocity(), (0.0, 0.0));
		}
		sim.unpin(1);
		assert_eq!(sim.nodes()[1].pinned(), None);
		sim.tick(&mut ());
		assert_ne!(sim.nodes()[1].position(), anchor);
	}

	#[test]
	fn alpha_target_keeps_simulation_warm() {
		let mut sim = Simulation::new(&chain(3), WorldPoint::new(0.0, 0.0), Default::default());
		sim.settle(10_000);
		assert!(sim.is_settled());
		sim.set_alpha_target(0.3);
		sim.restart();
		for _ in 0..2_000 {
			assert!(sim.tick(&mut ()));
		}
		assert!((sim.alpha() - 0.3).abs() < 1e-3);
		sim.set_alpha_target(0.0);
		sim.settle(10_000);
		assert!(sim.is_settled());
	}

	#[test]
	fn self_links_are_ignored() {
		let graph = build(&GraphData {
			nodes: vec![GraphNode {
				id: "solo".into(),
				label: None,
				kind: "person".into(),
			}],
			links: vec![GraphLink {
				source: "solo".into(),
				target: "solo".into(),
				label: None,
			}],
		})
		.unwrap();
		let mut sim = Simulation::new(&graph, WorldPoint::new(10.0, 10.0), Default::default());
		sim.settle(400);
		let p = sim.nodes()[0].position();
		assert!(p.x.is_finite() && p.y.is_finite());
	}
}
