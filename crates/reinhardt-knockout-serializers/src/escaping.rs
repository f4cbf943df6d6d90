//! HTML escaping of text leaves
//!
//! Escaped characters:
//! - `&` → `&amp;`
//! - `<` → `&lt;`
//! - `>` → `&gt;`
//!
//! Quotes are left alone: the encoded document is embedded as a script
//! literal, where JSON string quoting already applies.

use crate::value::FieldValue;
use serde::Deserialize;

/// How text leaves are stored in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Escaping {
	/// HTML-escape text (the default, for untrusted values)
	#[default]
	Html,
	/// Store text as-is; the caller vouches that values are safe
	Raw,
}

impl Escaping {
	/// Maps the `safe` flag of the public operations: `true` means raw.
	pub fn from_safe(safe: bool) -> Self {
		if safe { Escaping::Raw } else { Escaping::Html }
	}

	/// Apply this policy to a leaf value
	///
	/// Text inside plain lists is escaped as well; every other leaf passes
	/// through untouched.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_knockout_serializers::{Escaping, FieldValue};
	///
	/// let value = FieldValue::from("<b>Al</b>");
	/// assert_eq!(
	///     Escaping::Html.apply(value.clone()),
	///     FieldValue::from("&lt;b&gt;Al&lt;/b&gt;")
	/// );
	/// assert_eq!(Escaping::Raw.apply(value.clone()), value);
	/// ```
	pub fn apply(self, value: FieldValue) -> FieldValue {
		match (self, value) {
			(Escaping::Raw, value) => value,
			(Escaping::Html, FieldValue::String(s)) => FieldValue::String(escape_html(&s)),
			(Escaping::Html, FieldValue::List(items)) => {
				FieldValue::List(items.into_iter().map(|v| self.apply(v)).collect())
			}
			(Escaping::Html, value) => value,
		}
	}
}

/// Escape HTML special characters
///
/// # Examples
///
/// ```
/// use reinhardt_knockout_serializers::escape_html;
///
/// assert_eq!(escape_html("<script>alert(1)</script>"), "&lt;script&gt;alert(1)&lt;/script&gt;");
/// assert_eq!(escape_html("Hello & goodbye"), "Hello &amp; goodbye");
/// assert_eq!(escape_html(r#"say "hi""#), r#"say "hi""#);
/// ```
pub fn escape_html(s: &str) -> String {
	let mut escaped = String::with_capacity(s.len());
	for c in s.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			_ => escaped.push(c),
		}
	}
	escaped
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	#[rstest]
	#[case("<b>Al</b>", "&lt;b&gt;Al&lt;/b&gt;")]
	#[case("Tom & Jerry", "Tom &amp; Jerry")]
	#[case("&lt;", "&amp;lt;")]
	#[case("plain", "plain")]
	#[case("", "")]
	fn test_escape_html(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(escape_html(input), expected);
	}

	#[rstest]
	#[case(false, Escaping::Html)]
	#[case(true, Escaping::Raw)]
	fn test_from_safe(#[case] safe: bool, #[case] expected: Escaping) {
		assert_eq!(Escaping::from_safe(safe), expected);
	}

	#[rstest]
	fn test_non_text_leaves_pass_through() {
		assert_eq!(Escaping::Html.apply(FieldValue::Integer(1)), FieldValue::Integer(1));
		assert_eq!(
			Escaping::Html.apply(FieldValue::Opaque("<Widget>".into())),
			FieldValue::Opaque("<Widget>".into())
		);
	}

	#[rstest]
	fn test_text_in_lists_is_escaped() {
		let value = FieldValue::from(vec!["<a>", "b"]);
		assert_eq!(
			Escaping::Html.apply(value),
			FieldValue::from(vec!["&lt;a&gt;", "b"])
		);
	}

	proptest! {
		#[test]
		fn prop_escaped_text_has_no_markup(s in ".*") {
			let escaped = escape_html(&s);
			prop_assert!(!escaped.contains('<'));
			prop_assert!(!escaped.contains('>'));
		}

		#[test]
		fn prop_raw_mode_is_identity(s in ".*") {
			let value = FieldValue::String(s);
			prop_assert_eq!(Escaping::Raw.apply(value.clone()), value);
		}
	}
}
