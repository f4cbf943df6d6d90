//! JSON encoding of documents
//!
//! Values JSON has no native form for (dates, opaque values) go through an
//! injected [`DateHandler`]; when the handler declines, the value becomes
//! `null`. Non-finite floats also encode as `null`.

use crate::error::EncodeError;
use crate::value::{Document, FieldValue};
use chrono::{NaiveDateTime, Timelike};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Renders a leaf with no native JSON form, or returns `None` for `null`.
pub type DateHandler = fn(&FieldValue) -> Option<String>;

/// Canonical ISO-8601 rendering of temporal values
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use reinhardt_knockout_serializers::{FieldValue, iso_datetime};
///
/// let joined = FieldValue::Date(NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());
/// assert_eq!(iso_datetime(&joined).as_deref(), Some("2020-01-02T00:00:00"));
/// assert_eq!(iso_datetime(&FieldValue::Opaque("Widget".into())), None);
/// ```
pub fn iso_datetime(value: &FieldValue) -> Option<String> {
	match value {
		FieldValue::Date(date) => date.and_hms_opt(0, 0, 0).map(format_naive),
		FieldValue::DateTime(datetime) => Some(format_naive(*datetime)),
		FieldValue::Timestamp(timestamp) => Some(format!(
			"{}{}",
			format_naive(timestamp.naive_local()),
			timestamp.format("%:z")
		)),
		_ => None,
	}
}

fn format_naive(datetime: NaiveDateTime) -> String {
	if datetime.nanosecond() == 0 {
		datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
	} else {
		datetime.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
	}
}

/// The default variable name for a type's data: `<TypeName>Data`.
pub fn default_variable_name(type_name: &str) -> String {
	format!("{}Data", type_name)
}

/// Encodes documents as compact JSON text.
#[derive(Debug, Clone, Copy)]
pub struct DocumentEncoder {
	date_handler: DateHandler,
}

impl DocumentEncoder {
	pub fn new(date_handler: DateHandler) -> Self {
		Self { date_handler }
	}

	/// Encode `document` as JSON
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_knockout_serializers::{Document, DocumentEncoder};
	///
	/// let encoder = DocumentEncoder::default();
	/// assert_eq!(encoder.encode(&Document::empty_list()).unwrap(), "[]");
	/// ```
	pub fn encode(&self, document: &Document) -> Result<String, EncodeError> {
		let encoded = serde_json::to_string(&Encoded {
			document,
			date_handler: self.date_handler,
		})?;
		Ok(encoded)
	}

	/// Encode `document` as a `var <name> = <json>;` statement
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_knockout_serializers::{Document, DocumentEncoder};
	///
	/// let encoder = DocumentEncoder::default();
	/// assert_eq!(
	///     encoder.encode_as_variable(&Document::empty_list(), "PersonData").unwrap(),
	///     "var PersonData = [];"
	/// );
	/// ```
	pub fn encode_as_variable(
		&self,
		document: &Document,
		variable_name: &str,
	) -> Result<String, EncodeError> {
		Ok(format!("var {} = {};", variable_name, self.encode(document)?))
	}
}

impl Default for DocumentEncoder {
	fn default() -> Self {
		Self::new(iso_datetime)
	}
}

/// Parse encoded text back into a generic JSON value.
pub fn decode(text: &str) -> Result<serde_json::Value, EncodeError> {
	Ok(serde_json::from_str(text)?)
}

struct Encoded<'a> {
	document: &'a Document,
	date_handler: DateHandler,
}

impl Serialize for Encoded<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self.document {
			Document::Leaf(value) => EncodedValue {
				value,
				date_handler: self.date_handler,
			}
			.serialize(serializer),
			Document::Map(map) => {
				let mut state = serializer.serialize_map(Some(map.len()))?;
				for (key, document) in map {
					state.serialize_entry(
						key,
						&Encoded {
							document,
							date_handler: self.date_handler,
						},
					)?;
				}
				state.end()
			}
			Document::List(items) => serializer.collect_seq(items.iter().map(|document| Encoded {
				document,
				date_handler: self.date_handler,
			})),
		}
	}
}

struct EncodedValue<'a> {
	value: &'a FieldValue,
	date_handler: DateHandler,
}

impl Serialize for EncodedValue<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self.value {
			FieldValue::Null => serializer.serialize_unit(),
			FieldValue::Boolean(b) => serializer.serialize_bool(*b),
			FieldValue::Integer(i) => serializer.serialize_i64(*i),
			FieldValue::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
			FieldValue::Float(_) => serializer.serialize_unit(),
			FieldValue::String(s) => serializer.serialize_str(s),
			FieldValue::List(items) => serializer.collect_seq(items.iter().map(|value| EncodedValue {
				value,
				date_handler: self.date_handler,
			})),
			other @ (FieldValue::Date(_)
			| FieldValue::DateTime(_)
			| FieldValue::Timestamp(_)
			| FieldValue::Opaque(_)) => match (self.date_handler)(other) {
				Some(text) => serializer.serialize_str(&text),
				None => serializer.serialize_unit(),
			},
		}
	}
}
