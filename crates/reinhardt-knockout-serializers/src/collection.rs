//! Normalization of serialization input
//!
//! The persistence layer hands over a single entity, a bare list, or a typed
//! query set. [`normalize`] turns all of them into a [`Collection`]: a
//! representative for field resolution plus the ordered items to serialize.

use crate::entity::{EntityRef, EntityType, Subject};
use crate::error::{CollectionError, IndexError};
use std::rc::Rc;

/// Input supplied by the persistence/query layer.
pub trait EntitySource {
	/// Positional access. A single object reports [`IndexError::NotSupported`].
	fn get(&self, index: usize) -> Result<EntityRef, IndexError>;

	/// All entities, in stable order.
	fn entities(&self) -> Vec<EntityRef>;

	/// Type marker carried by typed collections, even when empty.
	fn model(&self) -> Option<&dyn EntityType> {
		None
	}
}

impl EntitySource for EntityRef {
	fn get(&self, _index: usize) -> Result<EntityRef, IndexError> {
		Err(IndexError::NotSupported)
	}

	fn entities(&self) -> Vec<EntityRef> {
		vec![Rc::clone(self)]
	}
}

impl EntitySource for [EntityRef] {
	fn get(&self, index: usize) -> Result<EntityRef, IndexError> {
		<[EntityRef]>::get(self, index)
			.cloned()
			.ok_or(IndexError::OutOfRange(index))
	}

	fn entities(&self) -> Vec<EntityRef> {
		self.to_vec()
	}
}

impl EntitySource for Vec<EntityRef> {
	fn get(&self, index: usize) -> Result<EntityRef, IndexError> {
		EntitySource::get(self.as_slice(), index)
	}

	fn entities(&self) -> Vec<EntityRef> {
		self.clone()
	}
}

/// A typed result set: items plus the entity type they belong to.
///
/// # Examples
///
/// ```
/// use reinhardt_knockout_serializers::{EntityError, EntitySource, EntityType, QuerySet};
/// use std::rc::Rc;
///
/// struct PersonModel;
///
/// impl EntityType for PersonModel {
///     fn name(&self) -> &str {
///         "Person"
///     }
///
///     fn declared_fields(&self) -> Result<Vec<String>, EntityError> {
///         Ok(vec!["id".into()])
///     }
/// }
///
/// let people = QuerySet::empty(Rc::new(PersonModel));
/// assert!(people.is_empty());
/// assert_eq!(people.model().map(|m| m.name()), Some("Person"));
/// ```
#[derive(Clone)]
pub struct QuerySet {
	model: Rc<dyn EntityType>,
	items: Vec<EntityRef>,
}

impl QuerySet {
	pub fn new(model: Rc<dyn EntityType>, items: Vec<EntityRef>) -> Self {
		Self { model, items }
	}

	pub fn empty(model: Rc<dyn EntityType>) -> Self {
		Self::new(model, Vec::new())
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn items(&self) -> &[EntityRef] {
		&self.items
	}
}

impl EntitySource for QuerySet {
	fn get(&self, index: usize) -> Result<EntityRef, IndexError> {
		EntitySource::get(self.items.as_slice(), index)
	}

	fn entities(&self) -> Vec<EntityRef> {
		self.items.clone()
	}

	fn model(&self) -> Option<&dyn EntityType> {
		Some(self.model.as_ref())
	}
}

impl std::fmt::Debug for QuerySet {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("QuerySet")
			.field("model", &self.model.name())
			.field("len", &self.items.len())
			.finish()
	}
}

/// The normalized zero/one/many view of a serialization request.
///
/// `Single` and `Many` are only built by [`normalize`], which never yields an
/// empty `Many`.
pub enum Collection<'a> {
	/// A lone object, serialized as a one-element list
	#[non_exhaustive]
	Single(EntityRef),
	/// A non-empty ordered sequence; the first element is the representative
	#[non_exhaustive]
	Many(Vec<EntityRef>),
	/// A typed collection with no rows; the marker is used only for naming
	/// and field resolution, never serialized
	Empty { model: &'a dyn EntityType },
}

impl<'a> Collection<'a> {
	/// What field resolution and naming are performed against.
	pub fn representative(&self) -> Subject<'_> {
		match self {
			Collection::Single(entity) => Subject::Instance(entity.as_ref()),
			Collection::Many(items) => Subject::Instance(items[0].as_ref()),
			Collection::Empty { model } => Subject::Type(*model),
		}
	}

	pub fn type_name(&self) -> &str {
		self.representative().name()
	}

	pub fn items(&self) -> &[EntityRef] {
		match self {
			Collection::Single(entity) => std::slice::from_ref(entity),
			Collection::Many(items) => items,
			Collection::Empty { .. } => &[],
		}
	}

	pub fn is_empty(&self) -> bool {
		matches!(self, Collection::Empty { .. })
	}
}

impl std::fmt::Debug for Collection<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let shape = match self {
			Collection::Single(_) => "Single",
			Collection::Many(_) => "Many",
			Collection::Empty { .. } => "Empty",
		};
		f.debug_struct(shape)
			.field("type", &self.type_name())
			.field("len", &self.items().len())
			.finish()
	}
}

/// Classify `source`.
///
/// Returns `Ok(None)` for a bare empty list: there is no type to resolve
/// fields or names against, and the caller short-circuits to `[]`.
pub fn normalize(source: &dyn EntitySource) -> Result<Option<Collection<'_>>, CollectionError> {
	match source.get(0) {
		Ok(_) => {
			let items = source.entities();
			if items.is_empty() {
				return Err(CollectionError::Malformed(
					"element at index 0 exists but iteration yielded nothing".to_string(),
				));
			}
			Ok(Some(Collection::Many(items)))
		}
		Err(IndexError::NotSupported) => {
			let mut items = source.entities();
			match (items.pop(), items.is_empty()) {
				(Some(entity), true) => Ok(Some(Collection::Single(entity))),
				(popped, _) => Err(CollectionError::Malformed(format!(
					"a single object must yield exactly one entity, got {}",
					items.len() + usize::from(popped.is_some())
				))),
			}
		}
		Err(IndexError::OutOfRange(_)) => Ok(source.model().map(|model| Collection::Empty { model })),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::entity::{Attribute, Entity};
	use crate::error::EntityError;
	use rstest::rstest;

	struct Thing;

	impl EntityType for Thing {
		fn name(&self) -> &str {
			"Thing"
		}

		fn declared_fields(&self) -> Result<Vec<String>, EntityError> {
			Ok(vec![])
		}
	}

	static THING: Thing = Thing;

	struct ThingEntity(#[allow(dead_code)] u8);

	impl Entity for ThingEntity {
		fn model(&self) -> &dyn EntityType {
			&THING
		}

		fn attribute(&self, _name: &str) -> Result<Attribute, EntityError> {
			Ok(Attribute::null())
		}
	}

	fn thing(n: u8) -> EntityRef {
		Rc::new(ThingEntity(n))
	}

	/// Claims to be indexable but never yields anything
	struct Liar;

	impl EntitySource for Liar {
		fn get(&self, _index: usize) -> Result<EntityRef, IndexError> {
			Ok(thing(0))
		}

		fn entities(&self) -> Vec<EntityRef> {
			Vec::new()
		}
	}

	#[rstest]
	fn test_non_empty_list_uses_first_item() {
		let items = vec![thing(1), thing(2)];
		let collection = normalize(&items).unwrap().unwrap();

		assert!(matches!(collection, Collection::Many(_)));
		assert_eq!(collection.items().len(), 2);
		assert!(Rc::ptr_eq(&collection.items()[0], &items[0]));
		assert_eq!(collection.type_name(), "Thing");
	}

	#[rstest]
	fn test_single_object_becomes_one_element_list() {
		let entity = thing(1);
		let collection = normalize(&entity).unwrap().unwrap();

		assert!(matches!(collection, Collection::Single(_)));
		assert_eq!(collection.items().len(), 1);
		assert!(Rc::ptr_eq(&collection.items()[0], &entity));
	}

	#[rstest]
	fn test_empty_query_set_keeps_type_marker() {
		let query_set = QuerySet::empty(Rc::new(Thing));
		let collection = normalize(&query_set).unwrap().unwrap();

		assert!(collection.is_empty());
		assert!(collection.items().is_empty());
		assert_eq!(collection.type_name(), "Thing");
	}

	#[rstest]
	fn test_bare_empty_list_short_circuits() {
		let items: Vec<EntityRef> = Vec::new();
		assert!(normalize(&items).unwrap().is_none());
	}

	#[rstest]
	fn test_inconsistent_source_is_malformed() {
		assert!(matches!(normalize(&Liar), Err(CollectionError::Malformed(_))));
	}

	#[rstest]
	fn test_query_set_indexing() {
		let query_set = QuerySet::new(Rc::new(Thing), vec![thing(1)]);
		assert!(query_set.get(0).is_ok());
		assert_eq!(query_set.get(1).err(), Some(IndexError::OutOfRange(1)));
	}
}
