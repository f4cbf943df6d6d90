//! Graph traversal behaviour: nesting, escaping, cycles and depth limits

mod common;

use common::{Node, Person, Tag, Team};
use reinhardt_knockout_logging::{LogLevel, Logger, MemoryHandler};
use reinhardt_knockout_serializers::{
	CyclePolicy, DocumentEncoder, EntityRef, Escaping, FieldSet, GraphSerializer, SerializeError,
	Subject, decode,
};
use rstest::{fixture, rstest};
use serde_json::json;
use std::rc::Rc;

#[fixture]
fn serializer() -> GraphSerializer {
	GraphSerializer::new(Logger::new("test"))
}

fn encode_value(
	serializer: &GraphSerializer,
	entity: &dyn reinhardt_knockout_serializers::Entity,
	fields: &FieldSet,
) -> serde_json::Value {
	let document = serializer.serialize(entity, fields).unwrap();
	decode(&DocumentEncoder::default().encode(&document).unwrap()).unwrap()
}

#[rstest]
fn test_safe_mode_escapes_text(serializer: GraphSerializer) {
	let al = Person::new(1, "<b>Al</b>");
	let fields = serializer.resolver().resolve(Subject::Instance(&al));

	assert_eq!(
		encode_value(&serializer, &al, &fields),
		json!({"id": 1, "name": "&lt;b&gt;Al&lt;/b&gt;"})
	);
}

#[rstest]
fn test_raw_mode_preserves_text(serializer: GraphSerializer) {
	let serializer = serializer.with_escaping(Escaping::Raw);
	let al = Person::new(1, "Tom & <Jerry>");
	let fields = serializer.resolver().resolve(Subject::Instance(&al));

	assert_eq!(
		encode_value(&serializer, &al, &fields),
		json!({"id": 1, "name": "Tom & <Jerry>"})
	);
}

#[rstest]
fn test_date_leaf_is_canonical(serializer: GraphSerializer) {
	let al = Person::new(1, "Al");
	let fields: FieldSet = ["joined", "email"].into_iter().collect();

	assert_eq!(
		encode_value(&serializer, &al, &fields),
		json!({"joined": "2020-01-02T00:00:00", "email": null})
	);
}

#[rstest]
fn test_nested_entities_resolve_their_own_fields(serializer: GraphSerializer) {
	let team = Team {
		name: "Core".into(),
		captain: Person::shared(1, "Al"),
		members: vec![Person::shared(2, "Bo"), Person::shared(3, "Cy")],
	};
	// The override names team fields only; nested people still use id/name
	let fields: FieldSet = ["captain", "members", "name"].into_iter().collect();

	assert_eq!(
		encode_value(&serializer, &team, &fields),
		json!({
			"captain": {"id": 1, "name": "Al"},
			"members": [{"id": 2, "name": "Bo"}, {"id": 3, "name": "Cy"}],
			"name": "Core"
		})
	);
}

#[rstest]
fn test_empty_entity_list_serializes_as_empty_list(serializer: GraphSerializer) {
	let team = Team {
		name: "Solo".into(),
		captain: Person::shared(1, "Al"),
		members: Vec::new(),
	};
	let fields: FieldSet = ["members"].into_iter().collect();

	assert_eq!(encode_value(&serializer, &team, &fields), json!({"members": []}));
}

#[rstest]
fn test_unknown_field_is_omitted(serializer: GraphSerializer) {
	let al = Person::new(1, "Al");
	let fields: FieldSet = ["id", "nickname", "name"].into_iter().collect();

	assert_eq!(
		encode_value(&serializer, &al, &fields),
		json!({"id": 1, "name": "Al"})
	);
}

#[rstest]
fn test_shared_entity_is_not_a_cycle(serializer: GraphSerializer) {
	let al = Person::shared(1, "Al");
	let team = Team {
		name: "Core".into(),
		captain: Rc::clone(&al),
		members: vec![Rc::clone(&al)],
	};
	let fields: FieldSet = ["captain", "members"].into_iter().collect();

	assert_eq!(
		encode_value(&serializer.with_cycle_policy(CyclePolicy::Fail), &team, &fields),
		json!({"captain": {"id": 1, "name": "Al"}, "members": [{"id": 1, "name": "Al"}]})
	);
}

fn ring() -> (Rc<Node>, Rc<Node>) {
	let a = Node::new("a");
	let b = Node::new("b");
	a.link(b.clone());
	b.link(a.clone());
	(a, b)
}

#[rstest]
fn test_cycle_becomes_back_reference() {
	let logger = Logger::new("test");
	let handler = MemoryHandler::new(LogLevel::Warning);
	logger.add_handler(Box::new(handler.clone()));
	let serializer = GraphSerializer::new(logger);

	let (a, b) = ring();
	let fields = serializer.resolver().resolve(Subject::Instance(a.as_ref()));

	assert_eq!(
		encode_value(&serializer, a.as_ref(), &fields),
		json!({"label": "a", "next": {"label": "b", "next": {"$ref": "Node"}}})
	);
	assert_eq!(
		handler.messages(),
		vec!["Cyclic reference to Node replaced with a back-reference".to_string()]
	);

	// Break the ring so the Rc cycle does not leak
	*b.next.borrow_mut() = None;
}

#[rstest]
fn test_cycle_fails_fast_when_configured(serializer: GraphSerializer) {
	let serializer = serializer.with_cycle_policy(CyclePolicy::Fail);
	let (a, b) = ring();
	let fields = serializer.resolver().resolve(Subject::Instance(a.as_ref()));

	assert_eq!(
		serializer.serialize(a.as_ref(), &fields),
		Err(SerializeError::CyclicGraphDetected {
			type_name: "Node".into()
		})
	);

	*b.next.borrow_mut() = None;
}

#[rstest]
fn test_self_reference_is_a_cycle(serializer: GraphSerializer) {
	let a = Node::new("a");
	a.link(a.clone());
	let fields = serializer.resolver().resolve(Subject::Instance(a.as_ref()));

	assert_eq!(
		encode_value(&serializer, a.as_ref(), &fields),
		json!({"label": "a", "next": {"$ref": "Node"}})
	);

	*a.next.borrow_mut() = None;
}

fn chain(len: usize) -> Vec<Rc<Node>> {
	let nodes: Vec<Rc<Node>> = (0..len).map(|i| Node::new(&i.to_string())).collect();
	for pair in nodes.windows(2) {
		pair[0].link(pair[1].clone());
	}
	nodes
}

#[rstest]
fn test_depth_limit_truncates_long_chains() {
	let logger = Logger::new("test");
	let handler = MemoryHandler::new(LogLevel::Warning);
	logger.add_handler(Box::new(handler.clone()));
	let serializer = GraphSerializer::new(logger).with_max_depth(2);

	let nodes = chain(5);
	let fields = serializer.resolver().resolve(Subject::Instance(nodes[0].as_ref()));

	assert_eq!(
		encode_value(&serializer, nodes[0].as_ref(), &fields),
		json!({
			"label": "0",
			"next": {"label": "1", "next": {"label": "2", "next": {"$ref": "Node"}}}
		})
	);
	assert_eq!(
		handler.messages(),
		vec!["Node nested deeper than 2 levels replaced with a back-reference".to_string()]
	);
}

#[rstest]
fn test_depth_limit_keeps_sibling_roots(serializer: GraphSerializer) {
	let serializer = serializer.with_max_depth(1);
	let deep = chain(4);
	let shallow = Node::new("solo");
	let roots: Vec<EntityRef> = vec![deep[0].clone() as EntityRef, shallow as EntityRef];
	let fields = serializer.resolver().resolve(Subject::from(&roots[0]));

	let document = serializer.serialize_all(&roots, &fields).unwrap();
	assert_eq!(
		decode(&DocumentEncoder::default().encode(&document).unwrap()).unwrap(),
		json!([
			{"label": "0", "next": {"label": "1", "next": {"$ref": "Node"}}},
			{"label": "solo", "next": null}
		])
	);
}

#[rstest]
fn test_depth_limit_aborts_when_failing(serializer: GraphSerializer) {
	let serializer = serializer
		.with_max_depth(2)
		.with_cycle_policy(CyclePolicy::Fail);
	let nodes = chain(5);
	let fields = serializer.resolver().resolve(Subject::Instance(nodes[0].as_ref()));

	assert_eq!(
		serializer.serialize(nodes[0].as_ref(), &fields),
		Err(SerializeError::MaxDepthExceeded {
			depth: 3,
			max_depth: 2
		})
	);
	assert!(serializer.serialize(nodes[2].as_ref(), &fields).is_ok());
}

#[rstest]
fn test_generic_capability_keeps_declaration_order(serializer: GraphSerializer) {
	let tag = Tag {
		slug: "rust".into(),
		label: "<Rust>".into(),
		weight: 0.5,
	};
	let fields = serializer.resolver().resolve(Subject::Instance(&tag));
	assert_eq!(&*fields, &["slug", "label", "weight"]);

	let document = serializer.serialize(&tag, &fields).unwrap();
	assert_eq!(
		DocumentEncoder::default().encode(&document).unwrap(),
		r#"{"slug":"rust","label":"&lt;Rust&gt;","weight":0.5}"#
	);
}

#[rstest]
fn test_single_and_list_share_item_shape(serializer: GraphSerializer) {
	let al = Person::shared(1, "Al");
	let fields = serializer.resolver().resolve(Subject::from(&al));

	let single = serializer.serialize(al.as_ref(), &fields).unwrap();
	let listed = serializer
		.serialize_all(std::slice::from_ref(&al), &fields)
		.unwrap();

	assert_eq!(listed.as_list().unwrap(), &[single][..]);
}

#[rstest]
fn test_serialization_is_idempotent(serializer: GraphSerializer) {
	let people: Vec<EntityRef> = vec![Person::shared(1, "<i>Al</i>"), Person::shared(2, "Bo")];
	let fields = serializer.resolver().resolve(Subject::from(&people[0]));
	let encoder = DocumentEncoder::default();

	let first = encoder
		.encode(&serializer.serialize_all(&people, &fields).unwrap())
		.unwrap();
	let second = encoder
		.encode(&serializer.serialize_all(&people, &fields).unwrap())
		.unwrap();

	assert_eq!(first, second);
}
