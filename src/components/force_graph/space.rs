//! Screen and world coordinate types.
//!
//! The two spaces are deliberately distinct types. The only way to move a
//! point from one to the other is through [`ViewTransform`](super::viewport::ViewTransform).

/// A position in raw pointer/display pixels, relative to the canvas origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
	pub x: f64,
	pub y: f64,
}

impl ScreenPoint {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn offset(self, dx: f64, dy: f64) -> Self {
		Self::new(self.x + dx, self.y + dy)
	}
}

/// A position in simulation space, independent of pan and zoom.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldPoint {
	pub x: f64,
	pub y: f64,
}

impl WorldPoint {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: WorldPoint) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}
