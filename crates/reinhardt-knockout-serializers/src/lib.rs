//! # Reinhardt Knockout Serializers
//!
//! Converts graphs of persisted entities into JSON documents for Knockout
//! view models.
//!
//! ## Pipeline
//!
//! 1. [`normalize`] classifies the input (single entity, non-empty list,
//!    typed empty collection, bare empty list)
//! 2. [`FieldResolver`] picks the fields of the representative entity
//! 3. [`GraphSerializer`] walks each entity into a [`Document`], escaping
//!    text leaves and detecting cycles
//! 4. [`DocumentEncoder`] renders the document as JSON, optionally as a
//!    `var <name> = ...;` statement
//!
//! ## Example
//!
//! ```
//! use reinhardt_knockout_logging::Logger;
//! use reinhardt_knockout_serializers::{
//!     Attribute, DocumentEncoder, Entity, EntityError, EntityRef, EntityType, GraphSerializer,
//!     Subject, normalize,
//! };
//! use std::rc::Rc;
//!
//! struct PersonModel;
//!
//! impl EntityType for PersonModel {
//!     fn name(&self) -> &str {
//!         "Person"
//!     }
//!
//!     fn declared_fields(&self) -> Result<Vec<String>, EntityError> {
//!         Ok(vec!["id".into(), "name".into()])
//!     }
//! }
//!
//! static PERSON: PersonModel = PersonModel;
//!
//! struct Person {
//!     id: i64,
//!     name: &'static str,
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
//!             "name" => Ok(Attribute::value(self.name)),
//!             other => Err(EntityError::NoSuchAttribute(other.to_string())),
//!         }
//!     }
//! }
//!
//! let people: Vec<EntityRef> = vec![Rc::new(Person { id: 1, name: "<b>Al</b>" })];
//! let collection = normalize(&people).unwrap().unwrap();
//!
//! let serializer = GraphSerializer::new(Logger::new("knockout"));
//! let fields = serializer.resolver().resolve(collection.representative());
//! let document = serializer.serialize_all(collection.items(), &fields).unwrap();
//!
//! let json = DocumentEncoder::default().encode(&document).unwrap();
//! assert_eq!(json, r#"[{"id":1,"name":"&lt;b&gt;Al&lt;/b&gt;"}]"#);
//! ```

pub mod collection;
pub mod encoder;
pub mod entity;
pub mod error;
pub mod escaping;
pub mod fields;
pub mod graph;
pub mod recursive;
pub mod value;

pub use collection::{Collection, EntitySource, QuerySet, normalize};
pub use encoder::{DateHandler, DocumentEncoder, decode, default_variable_name, iso_datetime};
pub use entity::{
	Attribute, ComparatorProvider, Entity, EntityRef, EntityType, FieldProvider, Subject,
	field_values_of,
};
pub use error::{
	CollectionError, EncodeError, EntityError, FieldResolutionError, IndexError, SerializeError,
};
pub use escaping::{Escaping, escape_html};
pub use fields::{FieldResolver, FieldSet, ResolutionStrategy};
pub use graph::{DEFAULT_MAX_DEPTH, GraphSerializer};
pub use recursive::{CyclePolicy, SerializationContext};
pub use value::{BACK_REFERENCE_KEY, Document, FieldValue};
