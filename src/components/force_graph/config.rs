use serde::{Deserialize, Serialize};

/// Tunables for the force simulation. Defaults follow the classic d3-force setup.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
	pub link_distance: f64,
	pub link_strength: f64,
	/// Negative values repel.
	pub charge_strength: f64,
	pub theta: f64,
	pub distance_min: f64,
	pub alpha_min: f64,
	/// Number of ticks it takes a fresh alpha of 1 to reach `alpha_min`.
	pub alpha_ticks: u32,
	pub velocity_decay: f64,
	/// Alpha the simulation is held at while a node is being dragged.
	pub drag_alpha_target: f64,
}

impl SimulationConfig {
	pub fn alpha_decay(&self) -> f64 {
		1.0 - self.alpha_min.powf(1.0 / self.alpha_ticks.max(1) as f64)
	}
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			link_distance: 90.0,
			link_strength: 1.0,
			charge_strength: -300.0,
			theta: 0.9,
			distance_min: 1.0,
			alpha_min: 0.001,
			alpha_ticks: 300,
			velocity_decay: 0.4,
			drag_alpha_target: 0.3,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
	pub min_scale: f64,
	pub max_scale: f64,
	pub wheel_zoom_in: f64,
	pub wheel_zoom_out: f64,
}

impl Default for ViewportConfig {
	fn default() -> Self {
		Self {
			min_scale: 0.1,
			max_scale: 4.0,
			wheel_zoom_in: 1.1,
			wheel_zoom_out: 0.9,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
	pub padding_x: f64,
	pub padding_y: f64,
	pub max_corner_radius: f64,
	pub font_size: f64,
	pub font_family: String,
}

impl Default for LabelConfig {
	fn default() -> Self {
		Self {
			padding_x: 8.0,
			padding_y: 6.0,
			max_corner_radius: 12.0,
			font_size: 12.0,
			font_family: "sans-serif".into(),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
	pub offset_x: f64,
	pub offset_y: f64,
}

impl Default for TooltipConfig {
	fn default() -> Self {
		Self {
			offset_x: 12.0,
			offset_y: -12.0,
		}
	}
}

/// Everything a scene session needs to know that does not come from the graph itself.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
	pub simulation: SimulationConfig,
	pub viewport: ViewportConfig,
	pub label: LabelConfig,
	pub tooltip: TooltipConfig,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn alpha_reaches_floor_after_configured_ticks() {
		let config = SimulationConfig::default();
		let alpha = (1.0 - config.alpha_decay()).powi(config.alpha_ticks as i32);
		assert!((alpha - config.alpha_min).abs() < 1e-9);
	}

	#[test]
	fn partial_config_keeps_defaults() {
		let config: SceneConfig =
			serde_json::from_str(r#"{"simulation": {"link_distance": 120.0}}"#).unwrap();
		assert_eq!(config.simulation.link_distance, 120.0);
		assert_eq!(config.simulation.charge_strength, -300.0);
		assert_eq!(config.viewport.max_scale, 4.0);
	}
}
