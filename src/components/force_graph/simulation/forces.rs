use super::quadtree::QuadNode;
use super::{Lcg, SimLink, SimNode};
use crate::components::force_graph::space::WorldPoint;

/// Pulls each link's endpoints toward the link's rest distance. The correction
/// is split by degree so that hubs move less than leaves.
pub(super) fn apply_links(nodes: &mut [SimNode], links: &[SimLink], alpha: f64, rng: &mut Lcg) {
	for link in links {
		let (s, t) = (&nodes[link.source], &nodes[link.target]);
		let mut x = t.x + t.vx - s.x - s.vx;
		let mut y = t.y + t.vy - s.y - s.vy;
		if x == 0.0 {
			x = rng.jiggle();
		}
		if y == 0.0 {
			y = rng.jiggle();
		}
		let length = (x * x + y * y).sqrt();
		let scale = (length - link.distance) / length * alpha * link.strength;
		x *= scale;
		y *= scale;

		let target = &mut nodes[link.target];
		target.vx -= x * link.bias;
		target.vy -= y * link.bias;
		let source = &mut nodes[link.source];
		source.vx += x * (1.0 - link.bias);
		source.vy += y * (1.0 - link.bias);
	}
}

#[derive(Clone, Copy)]
pub(super) struct ManyBodyParams {
	pub(super) strength: f64,
	pub(super) theta_sq: f64,
	pub(super) distance_min_sq: f64,
	pub(super) alpha: f64,
}

/// Pairwise repulsion, approximated by cell centroids for distant cells.
pub(super) fn apply_many_body(nodes: &mut [SimNode], params: ManyBodyParams, rng: &mut Lcg) {
	if nodes.len() < 2 {
		return;
	}
	let positions: Vec<WorldPoint> = nodes.iter().map(SimNode::position).collect();
	let Some(tree) = QuadNode::build(&positions) else {
		return;
	};
	for (index, node) in nodes.iter_mut().enumerate() {
		let mut velocity = (0.0, 0.0);
		accumulate_repulsion(&tree, index, &positions, params, rng, &mut velocity);
		node.vx += velocity.0;
		node.vy += velocity.1;
	}
}

fn accumulate_repulsion(
	cell: &QuadNode,
	index: usize,
	positions: &[WorldPoint],
	params: ManyBodyParams,
	rng: &mut Lcg,
	velocity: &mut (f64, f64),
) {
	if cell.mass <= 0.0 {
		return;
	}
	let point = positions[index];

	if cell.is_leaf() {
		for &other in &cell.indices {
			if other == index {
				continue;
			}
			let mut x = positions[other].x - point.x;
			let mut y = positions[other].y - point.y;
			if x == 0.0 {
				x = rng.jiggle();
			}
			if y == 0.0 {
				y = rng.jiggle();
			}
			push(x, y, params.strength, params, velocity);
		}
		return;
	}

	let (x, y) = (cell.center_of_mass.x - point.x, cell.center_of_mass.y - point.y);
	let side = cell.bounds.side_length();
	if side * side / params.theta_sq < x * x + y * y {
		push(x, y, params.strength * cell.mass, params, velocity);
		return;
	}

	for child in cell.children.iter().flatten() {
		accumulate_repulsion(child, index, positions, params, rng, velocity);
	}
}

fn push(x: f64, y: f64, strength: f64, params: ManyBodyParams, velocity: &mut (f64, f64)) {
	let mut l = x * x + y * y;
	if l < params.distance_min_sq {
		l = (params.distance_min_sq * l).sqrt();
	}
	let w = strength * params.alpha / l;
	velocity.0 += x * w;
	velocity.1 += y * w;
}

/// Translates every node so the centroid sits on `center`.
pub(super) fn apply_center(nodes: &mut [SimNode], center: WorldPoint, strength: f64) {
	if nodes.is_empty() {
		return;
	}
	let n = nodes.len() as f64;
	let (sx, sy) = nodes
		.iter()
		.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
	let dx = (sx / n - center.x) * strength;
	let dy = (sy / n - center.y) * strength;
	for node in nodes {
		node.x -= dx;
		node.y -= dy;
	}
}
