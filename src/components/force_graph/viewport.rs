use super::config::ViewportConfig;
use super::space::{ScreenPoint, WorldPoint};

/// `screen = world * k + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self::IDENTITY
	}
}

/// Affine matrix in canvas `setTransform(a, b, c, d, e, f)` order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineMatrix {
	pub a: f64,
	pub b: f64,
	pub c: f64,
	pub d: f64,
	pub e: f64,
	pub f: f64,
}

impl ViewTransform {
	pub const IDENTITY: Self = Self {
		x: 0.0,
		y: 0.0,
		k: 1.0,
	};

	pub fn apply(&self) -> AffineMatrix {
		AffineMatrix {
			a: self.k,
			b: 0.0,
			c: 0.0,
			d: self.k,
			e: self.x,
			f: self.y,
		}
	}

	pub fn to_screen(&self, p: WorldPoint) -> ScreenPoint {
		ScreenPoint::new(p.x * self.k + self.x, p.y * self.k + self.y)
	}

	pub fn to_world(&self, p: ScreenPoint) -> WorldPoint {
		WorldPoint::new((p.x - self.x) / self.k, (p.y - self.y) / self.k)
	}

	/// Scales by `factor` keeping the world point under `anchor` fixed on screen.
	pub fn zoomed_at(&self, anchor: ScreenPoint, factor: f64, extent: ScaleExtent) -> Self {
		let k = extent.clamp(self.k * factor);
		let ratio = k / self.k;
		Self {
			x: anchor.x - (anchor.x - self.x) * ratio,
			y: anchor.y - (anchor.y - self.y) * ratio,
			k,
		}
	}

	pub fn panned(&self, dx: f64, dy: f64) -> Self {
		Self {
			x: self.x + dx,
			y: self.y + dy,
			k: self.k,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleExtent {
	pub min: f64,
	pub max: f64,
}

impl ScaleExtent {
	pub fn clamp(self, k: f64) -> f64 {
		if k.is_nan() {
			return self.min.max(1.0_f64.min(self.max));
		}
		k.clamp(self.min, self.max)
	}
}

impl From<&ViewportConfig> for ScaleExtent {
	/// Swaps reversed bounds; non-positive or non-finite bounds fall back to the defaults.
	fn from(config: &ViewportConfig) -> Self {
		let usable = |k: f64| k.is_finite() && k > 0.0;
		let defaults = ViewportConfig::default();
		let min = if usable(config.min_scale) {
			config.min_scale
		} else {
			defaults.min_scale
		};
		let max = if usable(config.max_scale) {
			config.max_scale
		} else {
			defaults.max_scale
		};
		Self {
			min: min.min(max),
			max: min.max(max),
		}
	}
}

/// Current camera over the scene. Only gesture handling writes it.
#[derive(Clone, Debug)]
pub struct Viewport {
	transform: ViewTransform,
	extent: ScaleExtent,
	config: ViewportConfig,
}

impl Viewport {
	pub fn new(config: ViewportConfig) -> Self {
		Self {
			transform: ViewTransform::IDENTITY,
			extent: ScaleExtent::from(&config),
			config,
		}
	}

	pub fn transform(&self) -> ViewTransform {
		self.transform
	}

	pub fn extent(&self) -> ScaleExtent {
		self.extent
	}

	/// Replaces the transform wholesale, clamping its scale.
	pub fn set(&mut self, transform: ViewTransform) {
		self.transform = ViewTransform {
			k: self.extent.clamp(transform.k),
			..transform
		};
	}

	pub fn zoom_at(&mut self, anchor: ScreenPoint, factor: f64) {
		if !factor.is_finite() || factor <= 0.0 {
			return;
		}
		let next = self.transform.zoomed_at(anchor, factor, self.extent);
		self.set(next);
	}

	/// One wheel notch; negative `delta_y` zooms in.
	pub fn wheel(&mut self, anchor: ScreenPoint, delta_y: f64) {
		if delta_y == 0.0 {
			return;
		}
		let factor = if delta_y > 0.0 {
			self.config.wheel_zoom_out
		} else {
			self.config.wheel_zoom_in
		};
		self.zoom_at(anchor, factor);
	}

	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		let next = self.transform.panned(dx, dy);
		self.set(next);
	}
}
