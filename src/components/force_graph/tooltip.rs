use super::config::TooltipConfig;
use super::space::ScreenPoint;

/// Floating hover label. Lives entirely in screen space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipState {
	pub visible: bool,
	pub text: String,
	pub anchor: ScreenPoint,
}

#[derive(Clone, Debug, Default)]
pub struct Tooltip {
	state: TooltipState,
	config: TooltipConfig,
}

impl Tooltip {
	pub fn new(config: TooltipConfig) -> Self {
		Self {
			state: TooltipState::default(),
			config,
		}
	}

	pub fn state(&self) -> &TooltipState {
		&self.state
	}

	pub fn show(&mut self, text: &str, pointer: ScreenPoint) {
		self.state.visible = true;
		self.state.text.clear();
		self.state.text.push_str(text);
		self.place(pointer);
	}

	/// Follows the pointer without touching the text.
	pub fn place(&mut self, pointer: ScreenPoint) {
		self.state.anchor = pointer.offset(self.config.offset_x, self.config.offset_y);
	}

	pub fn hide(&mut self) {
		self.state.visible = false;
	}
}
