/// Which end of a link failed to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
	Source,
	Target,
}

impl std::fmt::Display for Endpoint {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Endpoint::Source => f.write_str("source"),
			Endpoint::Target => f.write_str("target"),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
	#[error("link #{link} has a {endpoint} `{id}` that matches no node")]
	MissingEndpoint {
		link: usize,
		endpoint: Endpoint,
		id: String,
	},
	#[error("malformed graph payload: {0}")]
	Payload(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;
