//! Node label abbreviation and shape fitting.

use super::config::LabelConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
	pub font_family: String,
	pub font_size: f64,
}

impl TextStyle {
	/// CSS font shorthand, as canvas contexts expect it.
	pub fn css_font(&self) -> String {
		format!("{}px {}", self.font_size, self.font_family)
	}
}

impl From<&LabelConfig> for TextStyle {
	fn from(config: &LabelConfig) -> Self {
		Self {
			font_family: config.font_family.clone(),
			font_size: config.font_size,
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
	pub width: f64,
	pub height: f64,
}

/// Font-aware text measurement supplied by the host surface.
pub trait TextMeasurer {
	fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Fixed per-character advance. Used where no rendering surface is available.
#[derive(Clone, Debug)]
pub struct DeterministicTextMeasurer {
	pub char_width_factor: f64,
	pub line_height_factor: f64,
}

impl Default for DeterministicTextMeasurer {
	fn default() -> Self {
		Self {
			char_width_factor: 0.6,
			line_height_factor: 1.2,
		}
	}
}

impl TextMeasurer for DeterministicTextMeasurer {
	fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
		let font_size = style.font_size.max(1.0);
		let chars = text.chars().count();
		if chars == 0 {
			return TextMetrics::default();
		}
		TextMetrics {
			width: chars as f64 * font_size * self.char_width_factor,
			height: font_size * self.line_height_factor,
		}
	}
}

/// Up to two upper-cased initials for a label.
///
/// One word yields its first two characters, several words yield the first
/// character of each of the first two.
pub fn abbreviate(label: &str) -> String {
	let mut words = label.split_whitespace();
	let Some(first) = words.next() else {
		return String::new();
	};
	match words.next() {
		None => first.chars().take(2).flat_map(char::to_uppercase).collect(),
		Some(second) => first
			.chars()
			.take(1)
			.chain(second.chars().take(1))
			.flat_map(char::to_uppercase)
			.collect(),
	}
}

/// Rounded rectangle that encloses a node's abbreviation, centered on the node.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelShape {
	pub text: String,
	pub width: f64,
	pub height: f64,
	pub corner_radius: f64,
}

impl LabelShape {
	pub fn fit(label: &str, config: &LabelConfig, measurer: &dyn TextMeasurer) -> Self {
		let text = abbreviate(label);
		let metrics = measurer.measure(&text, &TextStyle::from(config));
		let width = metrics.width + config.padding_x * 2.0;
		let height = metrics.height + config.padding_y * 2.0;
		Self {
			text,
			width,
			height,
			corner_radius: config.max_corner_radius.min(height / 2.0),
		}
	}

	pub fn half_extents(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}
}
