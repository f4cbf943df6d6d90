//! Leaf values and the serialized document tree

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;

/// Key used by back-reference markers emitted for cyclic graphs.
pub const BACK_REFERENCE_KEY: &str = "$ref";

/// A leaf value read from an entity attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
	Null,
	Boolean(bool),
	Integer(i64),
	Float(f64),
	String(String),
	Date(NaiveDate),
	DateTime(NaiveDateTime),
	/// Offset-aware point in time
	Timestamp(DateTime<FixedOffset>),
	/// Sequence of plain values (not entities)
	List(Vec<FieldValue>),
	/// A value with no data-interchange representation; carries its type name
	Opaque(String),
}

impl FieldValue {
	pub fn as_str(&self) -> Option<&str> {
		match self {
			FieldValue::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn is_temporal(&self) -> bool {
		matches!(
			self,
			FieldValue::Date(_) | FieldValue::DateTime(_) | FieldValue::Timestamp(_)
		)
	}
}

impl From<bool> for FieldValue {
	fn from(v: bool) -> Self {
		FieldValue::Boolean(v)
	}
}

impl From<i32> for FieldValue {
	fn from(v: i32) -> Self {
		FieldValue::Integer(i64::from(v))
	}
}

impl From<i64> for FieldValue {
	fn from(v: i64) -> Self {
		FieldValue::Integer(v)
	}
}

impl From<u32> for FieldValue {
	fn from(v: u32) -> Self {
		FieldValue::Integer(i64::from(v))
	}
}

impl From<f64> for FieldValue {
	fn from(v: f64) -> Self {
		FieldValue::Float(v)
	}
}

impl From<&str> for FieldValue {
	fn from(v: &str) -> Self {
		FieldValue::String(v.to_string())
	}
}

impl From<String> for FieldValue {
	fn from(v: String) -> Self {
		FieldValue::String(v)
	}
}

impl From<NaiveDate> for FieldValue {
	fn from(v: NaiveDate) -> Self {
		FieldValue::Date(v)
	}
}

impl From<NaiveDateTime> for FieldValue {
	fn from(v: NaiveDateTime) -> Self {
		FieldValue::DateTime(v)
	}
}

impl From<DateTime<FixedOffset>> for FieldValue {
	fn from(v: DateTime<FixedOffset>) -> Self {
		FieldValue::Timestamp(v)
	}
}

impl From<DateTime<Utc>> for FieldValue {
	fn from(v: DateTime<Utc>) -> Self {
		FieldValue::Timestamp(v.fixed_offset())
	}
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
	fn from(v: Option<T>) -> Self {
		v.map_or(FieldValue::Null, Into::into)
	}
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
	fn from(v: Vec<T>) -> Self {
		FieldValue::List(v.into_iter().map(Into::into).collect())
	}
}

/// The serialized tree produced by graph traversal, prior to text encoding.
///
/// Mapping keys keep the order of the field set that produced them.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
	Leaf(FieldValue),
	Map(IndexMap<String, Document>),
	List(Vec<Document>),
}

impl Document {
	pub fn empty_list() -> Self {
		Document::List(Vec::new())
	}

	/// Marker standing in for an entity already on the traversal path
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_knockout_serializers::{Document, FieldValue};
	///
	/// let marker = Document::back_reference("Person");
	/// assert_eq!(
	///     marker.get("$ref"),
	///     Some(&Document::Leaf(FieldValue::String("Person".into())))
	/// );
	/// ```
	pub fn back_reference(type_name: &str) -> Self {
		let mut map = IndexMap::with_capacity(1);
		map.insert(
			BACK_REFERENCE_KEY.to_string(),
			Document::Leaf(FieldValue::String(type_name.to_string())),
		);
		Document::Map(map)
	}

	pub fn get(&self, key: &str) -> Option<&Document> {
		match self {
			Document::Map(map) => map.get(key),
			_ => None,
		}
	}

	pub fn as_map(&self) -> Option<&IndexMap<String, Document>> {
		match self {
			Document::Map(map) => Some(map),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[Document]> {
		match self {
			Document::List(items) => Some(items),
			_ => None,
		}
	}

	pub fn as_leaf(&self) -> Option<&FieldValue> {
		match self {
			Document::Leaf(value) => Some(value),
			_ => None,
		}
	}
}

impl From<FieldValue> for Document {
	fn from(v: FieldValue) -> Self {
		Document::Leaf(v)
	}
}
