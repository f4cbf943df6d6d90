//! Entity graph serialization
//!
//! Walks an entity following a field set and produces a [`Document`].
//! Nested entities always get their own, freshly resolved field set: an
//! override list given for the root is never pushed down to related
//! entities. Under [`CyclePolicy::BackReference`] a revisited entity, or one
//! nested beyond the depth limit, becomes a `{"$ref": "<TypeName>"}` marker
//! and the rest of the document is kept.

use crate::entity::{Attribute, Entity, EntityRef, Subject};
use crate::error::SerializeError;
use crate::escaping::Escaping;
use crate::fields::{FieldResolver, FieldSet};
use crate::recursive::{CyclePolicy, SerializationContext};
use crate::value::Document;
use indexmap::IndexMap;
use reinhardt_knockout_logging::{LogLevel, Logger};
use serde_json::json;

pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Serializes entities into documents.
///
/// # Examples
///
/// ```
/// use reinhardt_knockout_logging::Logger;
/// use reinhardt_knockout_serializers::{Escaping, GraphSerializer};
///
/// let serializer = GraphSerializer::new(Logger::new("knockout"))
///     .with_escaping(Escaping::Raw)
///     .with_max_depth(8);
/// assert_eq!(serializer.escaping(), Escaping::Raw);
/// ```
#[derive(Debug, Clone)]
pub struct GraphSerializer {
	resolver: FieldResolver,
	escaping: Escaping,
	cycle_policy: CyclePolicy,
	max_depth: usize,
	logger: Logger,
}

impl GraphSerializer {
	pub fn new(logger: Logger) -> Self {
		Self {
			resolver: FieldResolver::new(logger.clone()),
			escaping: Escaping::default(),
			cycle_policy: CyclePolicy::default(),
			max_depth: DEFAULT_MAX_DEPTH,
			logger: logger.child("graph"),
		}
	}

	pub fn with_escaping(mut self, escaping: Escaping) -> Self {
		self.escaping = escaping;
		self
	}

	pub fn with_cycle_policy(mut self, cycle_policy: CyclePolicy) -> Self {
		self.cycle_policy = cycle_policy;
		self
	}

	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	pub fn escaping(&self) -> Escaping {
		self.escaping
	}

	pub fn resolver(&self) -> &FieldResolver {
		&self.resolver
	}

	/// Serialize one entity with the given field set into a mapping document.
	pub fn serialize(&self, entity: &dyn Entity, fields: &FieldSet) -> Result<Document, SerializeError> {
		let mut context = SerializationContext::new(self.max_depth);
		self.serialize_in(&mut context, entity, fields)
	}

	/// Serialize every entity with the same field set into a list document.
	pub fn serialize_all(
		&self,
		entities: &[EntityRef],
		fields: &FieldSet,
	) -> Result<Document, SerializeError> {
		let mut context = SerializationContext::new(self.max_depth);
		entities
			.iter()
			.map(|entity| self.serialize_in(&mut context, entity.as_ref(), fields))
			.collect::<Result<Vec<_>, _>>()
			.map(Document::List)
	}

	fn serialize_in(
		&self,
		context: &mut SerializationContext,
		entity: &dyn Entity,
		fields: &FieldSet,
	) -> Result<Document, SerializeError> {
		context.visit_with(entity, |context| {
			let mut map = IndexMap::with_capacity(fields.len());
			for field in fields {
				let attribute = match entity.attribute(field) {
					Ok(attribute) => attribute,
					Err(e) => {
						let record = self
							.logger
							.record(LogLevel::Info, "Unable to get attribute.")
							.with_extra("field", json!(field))
							.with_extra("type", json!(entity.model().name()))
							.with_extra("error", json!(e.to_string()));
						self.logger.log_record(&record);
						continue;
					}
				};

				let document = match attribute {
					Attribute::Entities(items) => Document::List(
						items
							.iter()
							.map(|item| self.serialize_nested(context, item.as_ref()))
							.collect::<Result<_, _>>()?,
					),
					Attribute::Entity(item) => self.serialize_nested(context, item.as_ref())?,
					Attribute::Value(value) => Document::Leaf(self.escaping.apply(value)),
				};
				map.insert(field.clone(), document);
			}
			Ok(Document::Map(map))
		})
	}

	fn serialize_nested(
		&self,
		context: &mut SerializationContext,
		entity: &dyn Entity,
	) -> Result<Document, SerializeError> {
		let type_name = entity.model().name();
		let cyclic = context.is_visiting(entity);
		if !cyclic && !context.is_too_deep() {
			let fields = self.resolver.resolve(Subject::Instance(entity));
			return self.serialize_in(context, entity, &fields);
		}

		match (self.cycle_policy, cyclic) {
			(CyclePolicy::BackReference, true) => {
				self.logger.warning(format!(
					"Cyclic reference to {} replaced with a back-reference",
					type_name
				));
				Ok(Document::back_reference(type_name))
			}
			(CyclePolicy::BackReference, false) => {
				self.logger.warning(format!(
					"{} nested deeper than {} levels replaced with a back-reference",
					type_name,
					context.max_depth()
				));
				Ok(Document::back_reference(type_name))
			}
			(CyclePolicy::Fail, true) => Err(SerializeError::CyclicGraphDetected {
				type_name: type_name.to_string(),
			}),
			(CyclePolicy::Fail, false) => Err(SerializeError::MaxDepthExceeded {
				depth: context.depth(),
				max_depth: context.max_depth(),
			}),
		}
	}
}
