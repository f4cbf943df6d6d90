//! Recursive serialization support
//!
//! Tracks which entities are on the current traversal path and how deep the
//! traversal is, so cyclic graphs are detected instead of recursing forever.

use crate::entity::Entity;
use crate::error::SerializeError;
use serde::Deserialize;
use std::collections::HashSet;

/// What to do when an entity already on the traversal path is reached again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
	/// Emit a `{"$ref": "<TypeName>"}` marker in place of the revisited
	/// entity, or of an entity nested beyond the depth limit
	#[default]
	BackReference,
	/// Abort the call with [`SerializeError::CyclicGraphDetected`] or
	/// [`SerializeError::MaxDepthExceeded`]
	Fail,
}

/// Per-call traversal state.
///
/// Only the current path is tracked: an entity shared by two siblings is
/// serialized twice, an entity that (transitively) references itself is a
/// cycle.
#[derive(Debug, Clone)]
pub struct SerializationContext {
	/// Number of entities on the current path (0 = not inside any entity)
	depth: usize,
	/// Maximum nesting below the root entity
	max_depth: usize,
	/// Identities (allocation addresses) of the entities on the current path
	path: HashSet<usize>,
}

impl SerializationContext {
	/// Create a new serialization context
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_knockout_serializers::SerializationContext;
	///
	/// let context = SerializationContext::new(3);
	/// assert_eq!(context.depth(), 0);
	/// assert_eq!(context.max_depth(), 3);
	/// ```
	pub fn new(max_depth: usize) -> Self {
		Self {
			depth: 0,
			max_depth,
			path: HashSet::new(),
		}
	}

	pub fn depth(&self) -> usize {
		self.depth
	}

	pub fn max_depth(&self) -> usize {
		self.max_depth
	}

	/// Whether entering one more entity would exceed the nesting limit.
	pub fn is_too_deep(&self) -> bool {
		self.depth > self.max_depth
	}

	/// Whether `entity` is on the current traversal path.
	pub fn is_visiting(&self, entity: &dyn Entity) -> bool {
		self.path.contains(&identity(entity))
	}

	/// Enter `entity`, run `f`, and leave again, whether or not `f` succeeds.
	///
	/// Fails without running `f` when `entity` is already on the path or the
	/// nesting limit is reached.
	pub fn visit_with<R, F>(&mut self, entity: &dyn Entity, f: F) -> Result<R, SerializeError>
	where
		F: FnOnce(&mut SerializationContext) -> Result<R, SerializeError>,
	{
		let id = identity(entity);
		if self.path.contains(&id) {
			return Err(SerializeError::CyclicGraphDetected {
				type_name: entity.model().name().to_string(),
			});
		}
		if self.is_too_deep() {
			return Err(SerializeError::MaxDepthExceeded {
				depth: self.depth,
				max_depth: self.max_depth,
			});
		}

		self.path.insert(id);
		self.depth += 1;
		let result = f(self);
		self.depth -= 1;
		self.path.remove(&id);
		result
	}
}

impl Default for SerializationContext {
	fn default() -> Self {
		Self::new(crate::graph::DEFAULT_MAX_DEPTH)
	}
}

fn identity(entity: &dyn Entity) -> usize {
	entity as *const dyn Entity as *const () as usize
}
