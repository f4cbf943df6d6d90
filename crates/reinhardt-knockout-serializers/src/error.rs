//! Error taxonomy for the serializer pipeline
//!
//! Each boundary returns its own error kind. Callers decide whether to
//! degrade and continue (per field, per resolution strategy) or to give up
//! on the whole call.

use crate::fields::ResolutionStrategy;

/// Failure raised by an entity implementation while answering a capability
/// or attribute request.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityError {
	#[error("attribute '{0}' does not exist")]
	NoSuchAttribute(String),

	#[error("expected a mapping of field values, got {0}")]
	NotAMapping(&'static str),

	#[error("serialization failed: {0}")]
	Serialization(String),

	#[error("{0}")]
	Other(String),
}

impl EntityError {
	pub fn other(message: impl Into<String>) -> Self {
		Self::Other(message.into())
	}
}

impl From<serde_json::Error> for EntityError {
	fn from(e: serde_json::Error) -> Self {
		Self::Serialization(e.to_string())
	}
}

/// A single field resolution strategy could not produce a field set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldResolutionError {
	#[error("{strategy} is not available for {type_name}")]
	Unavailable {
		strategy: ResolutionStrategy,
		type_name: String,
	},

	#[error("{strategy} failed for {type_name}: {source}")]
	Failed {
		strategy: ResolutionStrategy,
		type_name: String,
		#[source]
		source: EntityError,
	},
}

/// Errors that abort the traversal of an entity graph.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SerializeError {
	#[error("cyclic entity graph detected at {type_name}")]
	CyclicGraphDetected { type_name: String },

	#[error("maximum serialization depth exceeded: depth={depth}, max={max_depth}")]
	MaxDepthExceeded { depth: usize, max_depth: usize },
}

/// Positional indexing outcome reported by an [`EntitySource`](crate::EntitySource).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
	#[error("indexing is not supported")]
	NotSupported,

	#[error("index {0} is out of range")]
	OutOfRange(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
	#[error("malformed collection: {0}")]
	Malformed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
	#[error("JSON encoding failed: {0}")]
	Json(#[from] serde_json::Error),
}
