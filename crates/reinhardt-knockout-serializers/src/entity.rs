//! Entity capability interfaces
//!
//! An entity type advertises what it can do through optional capability
//! accessors instead of being probed at runtime. A type that declares its
//! own serialized fields implements [`FieldProvider`] and returns itself
//! from [`EntityType::field_provider`]; the same pattern applies to
//! [`ComparatorProvider`].
//!
//! # Examples
//!
//! ```
//! use reinhardt_knockout_serializers::{
//!     Attribute, Entity, EntityError, EntityType, FieldProvider,
//! };
//!
//! struct PersonModel;
//!
//! impl EntityType for PersonModel {
//!     fn name(&self) -> &str {
//!         "Person"
//!     }
//!
//!     fn declared_fields(&self) -> Result<Vec<String>, EntityError> {
//!         Ok(vec!["id".into(), "name".into(), "email".into()])
//!     }
//!
//!     fn field_provider(&self) -> Option<&dyn FieldProvider> {
//!         Some(self)
//!     }
//! }
//!
//! impl FieldProvider for PersonModel {
//!     fn knockout_fields(&self) -> Result<Vec<String>, EntityError> {
//!         Ok(vec!["id".into(), "name".into()])
//!     }
//! }
//!
//! static PERSON: PersonModel = PersonModel;
//!
//! struct Person {
//!     id: i64,
//!     name: String,
//! }
//!
//! impl Entity for Person {
//!     fn model(&self) -> &dyn EntityType {
//!         &PERSON
//!     }
//!
//!     fn attribute(&self, name: &str) -> Result<Attribute, EntityError> {
//!         match name {
//!             "id" => Ok(Attribute::value(self.id)),
//!             "name" => Ok(Attribute::value(self.name.as_str())),
//!             other => Err(EntityError::NoSuchAttribute(other.to_string())),
//!         }
//!     }
//! }
//! ```

use crate::error::EntityError;
use crate::value::FieldValue;
use serde::Serialize;
use serde_json::{Map, Value};
use std::rc::Rc;

/// Shared handle to a live entity. Identity is the allocation address.
pub type EntityRef = Rc<dyn Entity>;

/// Static description of an entity type (the model class).
pub trait EntityType {
	fn name(&self) -> &str;

	/// Static schema introspection: the declared field names, no instance needed.
	fn declared_fields(&self) -> Result<Vec<String>, EntityError>;

	fn field_provider(&self) -> Option<&dyn FieldProvider> {
		None
	}

	fn comparator_provider(&self) -> Option<&dyn ComparatorProvider> {
		None
	}
}

/// Field-declaration capability.
pub trait FieldProvider {
	fn knockout_fields(&self) -> Result<Vec<String>, EntityError>;
}

/// Names the field a client-side collection is sorted by.
pub trait ComparatorProvider {
	fn comparator(&self) -> Result<String, EntityError>;
}

/// A live domain object with named, readable attributes.
///
/// Entities are never mutated by the serializer.
pub trait Entity {
	fn model(&self) -> &dyn EntityType;

	fn attribute(&self, name: &str) -> Result<Attribute, EntityError>;

	/// Generic-serialization capability: the instance's field values as a
	/// name to value mapping. Only the key set is used for field resolution.
	///
	/// Types implementing `serde::Serialize` can delegate to [`field_values_of`].
	fn field_values(&self) -> Option<Result<Map<String, Value>, EntityError>> {
		None
	}
}

/// Serializes `value` with serde and returns its top-level mapping.
///
/// # Examples
///
/// ```
/// use reinhardt_knockout_serializers::field_values_of;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Tag {
///     slug: String,
///     label: String,
/// }
///
/// let tag = Tag { slug: "rust".into(), label: "Rust".into() };
/// let keys: Vec<_> = field_values_of(&tag).unwrap().keys().cloned().collect();
/// assert_eq!(keys, vec!["slug", "label"]);
/// ```
pub fn field_values_of<T: Serialize + ?Sized>(value: &T) -> Result<Map<String, Value>, EntityError> {
	match serde_json::to_value(value)? {
		Value::Object(map) => Ok(map),
		Value::Null => Err(EntityError::NotAMapping("null")),
		Value::Bool(_) => Err(EntityError::NotAMapping("boolean")),
		Value::Number(_) => Err(EntityError::NotAMapping("number")),
		Value::String(_) => Err(EntityError::NotAMapping("string")),
		Value::Array(_) => Err(EntityError::NotAMapping("array")),
	}
}

/// The value of one attribute read from an entity.
#[derive(Clone)]
pub enum Attribute {
	/// A leaf scalar (or a list of plain values)
	Value(FieldValue),
	/// A single related entity
	Entity(EntityRef),
	/// A homogeneous list of related entities
	Entities(Vec<EntityRef>),
}

impl Attribute {
	pub fn value(value: impl Into<FieldValue>) -> Self {
		Attribute::Value(value.into())
	}

	pub fn entity(entity: EntityRef) -> Self {
		Attribute::Entity(entity)
	}

	pub fn entities(entities: impl IntoIterator<Item = EntityRef>) -> Self {
		Attribute::Entities(entities.into_iter().collect())
	}

	pub fn null() -> Self {
		Attribute::Value(FieldValue::Null)
	}
}

impl From<FieldValue> for Attribute {
	fn from(value: FieldValue) -> Self {
		Attribute::Value(value)
	}
}

impl std::fmt::Debug for Attribute {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Attribute::Value(v) => f.debug_tuple("Value").field(v).finish(),
			Attribute::Entity(e) => f.debug_tuple("Entity").field(&e.model().name()).finish(),
			Attribute::Entities(items) => f
				.debug_tuple("Entities")
				.field(&items.iter().map(|e| e.model().name()).collect::<Vec<_>>())
				.finish(),
		}
	}
}

/// Whatever a field set or binding is derived from: a bare name, an entity
/// type, or a live instance.
#[derive(Clone, Copy)]
pub enum Subject<'a> {
	Name(&'a str),
	Type(&'a dyn EntityType),
	Instance(&'a dyn Entity),
}

impl<'a> Subject<'a> {
	pub fn name(&self) -> &'a str {
		match *self {
			Subject::Name(name) => name,
			Subject::Type(model) => model.name(),
			Subject::Instance(entity) => entity.model().name(),
		}
	}

	pub fn model(&self) -> Option<&'a dyn EntityType> {
		match *self {
			Subject::Name(_) => None,
			Subject::Type(model) => Some(model),
			Subject::Instance(entity) => Some(entity.model()),
		}
	}

	pub fn instance(&self) -> Option<&'a dyn Entity> {
		match *self {
			Subject::Instance(entity) => Some(entity),
			_ => None,
		}
	}
}

impl<'a> From<&'a str> for Subject<'a> {
	fn from(name: &'a str) -> Self {
		Subject::Name(name)
	}
}

impl<'a> From<&'a dyn EntityType> for Subject<'a> {
	fn from(model: &'a dyn EntityType) -> Self {
		Subject::Type(model)
	}
}

impl<'a> From<&'a dyn Entity> for Subject<'a> {
	fn from(entity: &'a dyn Entity) -> Self {
		Subject::Instance(entity)
	}
}

impl<'a> From<&'a EntityRef> for Subject<'a> {
	fn from(entity: &'a EntityRef) -> Self {
		Subject::Instance(entity.as_ref())
	}
}

impl std::fmt::Debug for Subject<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Subject::Name(name) => f.debug_tuple("Name").field(name).finish(),
			Subject::Type(_) => f.debug_tuple("Type").field(&self.name()).finish(),
			Subject::Instance(_) => f.debug_tuple("Instance").field(&self.name()).finish(),
		}
	}
}
