use log::{error, info};

use super::config::SceneConfig;
use super::error::Result;
use super::events::SceneEvent;
use super::label::TextMeasurer;
use super::state::SceneSession;
use super::types::GraphData;

/// Owns at most one live [`SceneSession`].
///
/// Each load bumps a generation counter. Callbacks registered for an older
/// generation see their events dropped, which is how stale frame loops stop.
#[derive(Default)]
pub struct SceneHost {
	session: Option<SceneSession>,
	generation: u64,
	config: SceneConfig,
}

impl SceneHost {
	pub fn new(config: SceneConfig) -> Self {
		Self {
			session: None,
			generation: 0,
			config,
		}
	}

	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn is_current(&self, generation: u64) -> bool {
		self.session.is_some() && generation == self.generation
	}

	pub fn session(&self) -> Option<&SceneSession> {
		self.session.as_ref()
	}

	pub fn session_mut(&mut self) -> Option<&mut SceneSession> {
		self.session.as_mut()
	}

	/// Disposes the current scene, then builds one for `data`. On a build
	/// error the host is left empty.
	pub fn load(
		&mut self,
		data: &GraphData,
		width: f64,
		height: f64,
		measurer: &dyn TextMeasurer,
	) -> Result<u64> {
		self.unload();
		self.generation += 1;
		match SceneSession::new(data, width, height, &self.config, measurer) {
			Ok(session) => {
				self.session = Some(session);
				info!("graph loaded as generation {}", self.generation);
				Ok(self.generation)
			}
			Err(err) => {
				error!("failed to build graph: {err}");
				Err(err)
			}
		}
	}

	pub fn unload(&mut self) {
		if let Some(mut old) = self.session.take() {
			old.dispose();
		}
	}

	/// Routes `event` to the live session if `generation` is still current.
	pub fn dispatch(&mut self, generation: u64, event: SceneEvent) -> bool {
		if generation != self.generation {
			return false;
		}
		self.session
			.as_mut()
			.is_some_and(|session| session.dispatch(event))
	}
}
