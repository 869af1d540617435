use super::space::ScreenPoint;

/// Everything the host event loop can deliver to a scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneEvent {
	PointerDown { at: ScreenPoint },
	PointerMove { at: ScreenPoint },
	PointerUp { at: ScreenPoint },
	PointerLeave,
	/// Wheel notch at the pointer; positive `delta_y` zooms out.
	Wheel { at: ScreenPoint, delta_y: f64 },
	/// Continuous zoom (pinch) by `factor` around `anchor`.
	Zoom { anchor: ScreenPoint, factor: f64 },
	/// Frame advance; steps the simulation if it is energized.
	Frame,
	Resize { width: f64, height: f64 },
}
