//! Entity fixtures shared by the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use reinhardt_knockout_serializers::{
	Attribute, Entity, EntityError, EntityRef, EntityType, FieldProvider, field_values_of,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::rc::Rc;

pub struct PersonModel;

impl EntityType for PersonModel {
	fn name(&self) -> &str {
		"Person"
	}

	fn declared_fields(&self) -> Result<Vec<String>, EntityError> {
		Ok(vec!["id".into(), "name".into(), "email".into(), "joined".into()])
	}

	fn field_provider(&self) -> Option<&dyn FieldProvider> {
		Some(self)
	}
}

impl FieldProvider for PersonModel {
	fn knockout_fields(&self) -> Result<Vec<String>, EntityError> {
		Ok(vec!["id".into(), "name".into()])
	}
}

pub static PERSON: PersonModel = PersonModel;

pub struct Person {
	pub id: i64,
	pub name: String,
	pub email: Option<String>,
	pub joined: NaiveDate,
}

impl Person {
	pub fn new(id: i64, name: &str) -> Self {
		Self {
			id,
			name: name.to_string(),
			email: None,
			joined: NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
		}
	}

	pub fn shared(id: i64, name: &str) -> EntityRef {
		Rc::new(Self::new(id, name))
	}
}

impl Entity for Person {
	fn model(&self) -> &dyn EntityType {
		&PERSON
	}

	fn attribute(&self, name: &str) -> Result<Attribute, EntityError> {
		match name {
			"id" => Ok(Attribute::value(self.id)),
			"name" => Ok(Attribute::value(self.name.as_str())),
			"email" => Ok(Attribute::value(self.email.clone())),
			"joined" => Ok(Attribute::value(self.joined)),
			other => Err(EntityError::NoSuchAttribute(other.to_string())),
		}
	}
}

/// No field-declaration capability: resolves through its schema
pub struct TeamModel;

impl EntityType for TeamModel {
	fn name(&self) -> &str {
		"Team"
	}

	fn declared_fields(&self) -> Result<Vec<String>, EntityError> {
		Ok(vec!["name".into(), "captain".into(), "members".into()])
	}
}

pub static TEAM: TeamModel = TeamModel;

pub struct Team {
	pub name: String,
	pub captain: EntityRef,
	pub members: Vec<EntityRef>,
}

impl Entity for Team {
	fn model(&self) -> &dyn EntityType {
		&TEAM
	}

	fn attribute(&self, name: &str) -> Result<Attribute, EntityError> {
		match name {
			"name" => Ok(Attribute::value(self.name.as_str())),
			"captain" => Ok(Attribute::entity(Rc::clone(&self.captain))),
			"members" => Ok(Attribute::entities(self.members.iter().cloned())),
			other => Err(EntityError::NoSuchAttribute(other.to_string())),
		}
	}
}

/// Linked node whose successor can be set after construction, so cycles can be built
pub struct NodeModel;

impl EntityType for NodeModel {
	fn name(&self) -> &str {
		"Node"
	}

	fn declared_fields(&self) -> Result<Vec<String>, EntityError> {
		Ok(vec!["label".into(), "next".into()])
	}
}

pub static NODE: NodeModel = NodeModel;

pub struct Node {
	pub label: String,
	pub next: RefCell<Option<EntityRef>>,
}

impl Node {
	pub fn new(label: &str) -> Rc<Node> {
		Rc::new(Self {
			label: label.to_string(),
			next: RefCell::new(None),
		})
	}

	pub fn link(&self, next: EntityRef) {
		*self.next.borrow_mut() = Some(next);
	}
}

impl Entity for Node {
	fn model(&self) -> &dyn EntityType {
		&NODE
	}

	fn attribute(&self, name: &str) -> Result<Attribute, EntityError> {
		match name {
			"label" => Ok(Attribute::value(self.label.as_str())),
			"next" => Ok(match self.next.borrow().as_ref() {
				Some(next) => Attribute::entity(Rc::clone(next)),
				None => Attribute::null(),
			}),
			other => Err(EntityError::NoSuchAttribute(other.to_string())),
		}
	}
}

/// Relies on the generic-serialization capability for its field set
pub struct TagModel;

impl EntityType for TagModel {
	fn name(&self) -> &str {
		"Tag"
	}

	fn declared_fields(&self) -> Result<Vec<String>, EntityError> {
		Err(EntityError::other("Tag has no static schema"))
	}
}

pub static TAG: TagModel = TagModel;

#[derive(Serialize)]
pub struct Tag {
	pub slug: String,
	pub label: String,
	pub weight: f64,
}

impl Entity for Tag {
	fn model(&self) -> &dyn EntityType {
		&TAG
	}

	fn attribute(&self, name: &str) -> Result<Attribute, EntityError> {
		match name {
			"slug" => Ok(Attribute::value(self.slug.as_str())),
			"label" => Ok(Attribute::value(self.label.as_str())),
			"weight" => Ok(Attribute::value(self.weight)),
			other => Err(EntityError::NoSuchAttribute(other.to_string())),
		}
	}

	fn field_values(&self) -> Option<Result<Map<String, Value>, EntityError>> {
		Some(field_values_of(self))
	}
}
