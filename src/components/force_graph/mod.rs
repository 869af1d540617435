//! Force-directed genealogy graph: layout engine, camera, gestures and canvas rendering.

pub mod builder;
mod component;
pub mod config;
pub mod drag;
pub mod error;
pub mod events;
pub mod host;
pub mod label;
mod render;
pub mod scene;
pub mod simulation;
pub mod space;
pub mod state;
pub mod tooltip;
pub mod types;
pub mod viewport;

pub use builder::{NodeIdx, ResolvedGraph, ResolvedLink, build};
pub use component::ForceGraphCanvas;
pub use config::{LabelConfig, SceneConfig, SimulationConfig, TooltipConfig, ViewportConfig};
pub use error::{Endpoint, GraphError, Result};
pub use events::SceneEvent;
pub use host::SceneHost;
pub use label::{
	DeterministicTextMeasurer, LabelShape, TextMeasurer, TextMetrics, TextStyle, abbreviate,
};
pub use simulation::{SimNode, Simulation, TickListener};
pub use space::{ScreenPoint, WorldPoint};
pub use state::SceneSession;
pub use types::{GraphData, GraphLink, GraphNode, ParseResponse, RecordCount};
pub use viewport::{ScaleExtent, ViewTransform, Viewport};
