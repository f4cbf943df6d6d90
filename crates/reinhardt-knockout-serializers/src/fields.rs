//! Field set resolution
//!
//! Decides which fields of an entity are serialized. Strategies are tried in
//! order and the first one that produces a field set wins:
//!
//! 1. the type's [`FieldProvider`](crate::FieldProvider) capability
//! 2. the instance's generic-serialization capability (its key set)
//! 3. static schema introspection ([`EntityType::declared_fields`](crate::EntityType::declared_fields))
//!
//! A failing strategy is logged and the next one is tried. When every
//! strategy fails the result is an empty field set, which callers treat as a
//! valid result.

use crate::entity::Subject;
use crate::error::FieldResolutionError;
use reinhardt_knockout_logging::{LogLevel, Logger};
use serde::Serialize;
use serde_json::json;
use std::fmt;
use std::ops::Deref;

/// Ordered field names chosen for serialization. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldSet(Vec<String>);

impl FieldSet {
	pub fn new(names: Vec<String>) -> Self {
		Self(names)
	}

	pub fn into_inner(self) -> Vec<String> {
		self.0
	}
}

impl Deref for FieldSet {
	type Target = [String];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl From<Vec<String>> for FieldSet {
	fn from(names: Vec<String>) -> Self {
		Self(names)
	}
}

impl From<&[&str]> for FieldSet {
	fn from(names: &[&str]) -> Self {
		names.iter().copied().collect()
	}
}

impl<S: Into<String>> FromIterator<S> for FieldSet {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}

impl<'a> IntoIterator for &'a FieldSet {
	type Item = &'a String;
	type IntoIter = std::slice::Iter<'a, String>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionStrategy {
	/// `FieldProvider::knockout_fields`
	Declared,
	/// Key set of `Entity::field_values`
	Generic,
	/// `EntityType::declared_fields`
	Schema,
}

impl ResolutionStrategy {
	pub const ORDER: [ResolutionStrategy; 3] = [
		ResolutionStrategy::Declared,
		ResolutionStrategy::Generic,
		ResolutionStrategy::Schema,
	];
}

impl fmt::Display for ResolutionStrategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			ResolutionStrategy::Declared => "field declaration",
			ResolutionStrategy::Generic => "generic serialization",
			ResolutionStrategy::Schema => "schema introspection",
		};
		f.write_str(label)
	}
}

/// Computes field sets. Nothing is cached: every call re-derives its result.
#[derive(Debug, Clone)]
pub struct FieldResolver {
	logger: Logger,
}

impl FieldResolver {
	pub fn new(logger: Logger) -> Self {
		Self {
			logger: logger.child("fields"),
		}
	}

	/// Resolve the field set for `subject`
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_knockout_logging::Logger;
	/// use reinhardt_knockout_serializers::{FieldResolver, Subject};
	///
	/// let resolver = FieldResolver::new(Logger::new("test"));
	/// // A bare name has no schema to introspect
	/// assert!(resolver.resolve(Subject::Name("Person")).is_empty());
	/// ```
	pub fn resolve(&self, subject: Subject<'_>) -> FieldSet {
		for strategy in ResolutionStrategy::ORDER {
			match self.try_strategy(strategy, subject) {
				Ok(fields) => return fields,
				Err(err @ FieldResolutionError::Unavailable { .. }) => {
					self.logger.debug(err.to_string());
				}
				Err(err) => {
					let record = self
						.logger
						.record(LogLevel::Warning, err.to_string())
						.with_extra("strategy", json!(strategy.to_string()))
						.with_extra("type", json!(subject.name()));
					self.logger.log_record(&record);
				}
			}
		}
		self.logger
			.warning(format!("No field set could be resolved for {}", subject.name()));
		FieldSet::default()
	}

	/// Use `names` verbatim when supplied, otherwise [`resolve`](Self::resolve).
	pub fn resolve_or_override(&self, subject: Subject<'_>, names: Option<&[String]>) -> FieldSet {
		match names {
			Some(names) => FieldSet::new(names.to_vec()),
			None => self.resolve(subject),
		}
	}

	/// Run a single strategy against `subject`.
	pub fn try_strategy(
		&self,
		strategy: ResolutionStrategy,
		subject: Subject<'_>,
	) -> Result<FieldSet, FieldResolutionError> {
		let type_name = subject.name();
		let unavailable = || FieldResolutionError::Unavailable {
			strategy,
			type_name: type_name.to_string(),
		};
		let failed = |source| FieldResolutionError::Failed {
			strategy,
			type_name: type_name.to_string(),
			source,
		};

		match strategy {
			ResolutionStrategy::Declared => {
				let provider = subject
					.model()
					.and_then(|m| m.field_provider())
					.ok_or_else(unavailable)?;
				provider.knockout_fields().map(FieldSet::new).map_err(failed)
			}
			ResolutionStrategy::Generic => {
				let values = subject
					.instance()
					.and_then(|e| e.field_values())
					.ok_or_else(unavailable)?;
				values
					.map(|map| map.keys().cloned().collect())
					.map_err(failed)
			}
			ResolutionStrategy::Schema => {
				let model = subject.model().ok_or_else(unavailable)?;
				model.declared_fields().map(FieldSet::new).map_err(failed)
			}
		}
	}
}
