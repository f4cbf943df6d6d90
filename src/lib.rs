//! # Reinhardt Knockout
//!
//! Turns persisted entities into everything a Knockout.js page needs: the
//! data as a JavaScript variable, a model and view-model declaration, and
//! the `ko.applyBindings` call.
//!
//! ## Crates
//!
//! - `reinhardt-knockout-serializers` - field resolution, graph
//!   serialization with cycle detection, HTML escaping, JSON encoding
//! - `reinhardt-knockout-templates` - declaration and activation text
//! - `reinhardt-knockout-logging` - the injected [`Logger`]
//!
//! ## Example
//!
//! ```
//! use reinhardt_knockout::{Knockout, KnockoutSettings};
//! use reinhardt_knockout_logging::Logger;
//! use reinhardt_knockout_serializers::{Attribute, Entity, EntityError, EntityRef, EntityType};
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
//! let knockout = Knockout::new(KnockoutSettings::default(), Logger::new("knockout")).unwrap();
//! let people: Vec<EntityRef> = vec![Rc::new(Person { id: 1, name: "Al" })];
//!
//! assert_eq!(
//!     knockout.ko_data(&people, None, None, false),
//!     r#"var PersonData = [{"id":1,"name":"Al"}];"#
//! );
//!
//! let script = knockout.ko(&people, None);
//! assert!(script.starts_with("var PersonData = "));
//! assert!(script.ends_with("ko.applyBindings(new PersonViewModel(), $('#persons')[0]);"));
//! ```

pub mod knockout;
pub mod settings;

pub use knockout::{Knockout, KnockoutError};
pub use reinhardt_knockout_logging::Logger;
pub use settings::{KnockoutSettings, SettingsError};
