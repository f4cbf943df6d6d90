//! Public Knockout operations
//!
//! The `ko*` methods never fail: each logs what went wrong and returns a
//! fixed fallback (`"[]"` for data, `""` for text). The `try_*` variants
//! return the underlying error instead.

use crate::settings::KnockoutSettings;
use reinhardt_knockout_logging::{LogLevel, Logger};
use reinhardt_knockout_serializers::{
	Collection, CollectionError, Document, DocumentEncoder, EncodeError, EntitySource, Escaping,
	GraphSerializer, SerializeError, Subject, normalize,
};
use reinhardt_knockout_templates::{
	BindingTextGenerator, TemplateError, TemplateRenderer, TeraRenderer,
};
use serde_json::json;

const EMPTY_DATA: &str = "[]";

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum KnockoutError {
	#[error(transparent)]
	Collection(#[from] CollectionError),

	#[error(transparent)]
	Serialize(#[from] SerializeError),

	#[error(transparent)]
	Encode(#[from] EncodeError),

	#[error(transparent)]
	Template(#[from] TemplateError),
}

/// Entry point tying serialization, encoding and binding generation together.
///
/// # Examples
///
/// ```
/// use reinhardt_knockout::{Knockout, KnockoutSettings};
/// use reinhardt_knockout_logging::Logger;
/// use reinhardt_knockout_serializers::Subject;
///
/// let knockout = Knockout::new(KnockoutSettings::default(), Logger::new("knockout")).unwrap();
/// assert_eq!(
///     knockout.ko_bindings(Subject::Name("Person")),
///     "ko.applyBindings(new PersonViewModel(), $('#persons')[0]);"
/// );
/// ```
pub struct Knockout {
	settings: KnockoutSettings,
	logger: Logger,
	serializer: GraphSerializer,
	encoder: DocumentEncoder,
	bindings: BindingTextGenerator,
}

impl Knockout {
	/// Build with the Tera renderer, compiling `settings.template` when set
	/// and the embedded template otherwise.
	pub fn new(settings: KnockoutSettings, logger: Logger) -> Result<Self, TemplateError> {
		let renderer = match settings.template.as_deref() {
			Some(source) => TeraRenderer::from_source(source)?,
			None => TeraRenderer::new()?,
		};
		Ok(Self::with_renderer(settings, logger, Box::new(renderer)))
	}

	pub fn with_renderer(
		settings: KnockoutSettings,
		logger: Logger,
		renderer: Box<dyn TemplateRenderer>,
	) -> Self {
		let serializer = GraphSerializer::new(logger.clone())
			.with_escaping(Escaping::from_safe(settings.safe))
			.with_cycle_policy(settings.cycle_policy)
			.with_max_depth(settings.max_depth);
		let bindings = BindingTextGenerator::new(renderer)
			.with_naming(settings.naming())
			.with_default_comparator(settings.default_comparator.clone());
		Self {
			settings,
			logger,
			serializer,
			encoder: DocumentEncoder::default(),
			bindings,
		}
	}

	/// Replace the encoder, e.g. to render dates differently
	pub fn with_encoder(mut self, encoder: DocumentEncoder) -> Self {
		self.encoder = encoder;
		self
	}

	pub fn settings(&self) -> &KnockoutSettings {
		&self.settings
	}

	/// `var <name> = <json>;` for `source`, or `"[]"` on failure.
	///
	/// `name` defaults to the entity type name plus the data suffix. A bare
	/// empty list has no type to name the variable after and yields `"[]"`.
	pub fn ko_data(
		&self,
		source: &dyn EntitySource,
		field_names: Option<&[String]>,
		name: Option<&str>,
		safe: bool,
	) -> String {
		self.try_ko_data(source, field_names, name, safe)
			.unwrap_or_else(|e| self.fallback("ko_data", &e, EMPTY_DATA))
	}

	/// Bare JSON for `source`, or `"[]"` on failure.
	pub fn ko_json(
		&self,
		source: &dyn EntitySource,
		field_names: Option<&[String]>,
		safe: bool,
	) -> String {
		self.try_ko_json(source, field_names, safe)
			.unwrap_or_else(|e| self.fallback("ko_json", &e, EMPTY_DATA))
	}

	/// Model and view-model declaration for `subject`, or `""` on failure.
	pub fn ko_model(
		&self,
		subject: Subject<'_>,
		field_names: Option<&[String]>,
		has_data: bool,
	) -> String {
		self.try_ko_model(subject, field_names, has_data)
			.unwrap_or_else(|e| self.fallback("ko_model", &e, ""))
	}

	/// The `ko.applyBindings` statement for `subject`.
	pub fn ko_bindings(&self, subject: Subject<'_>) -> String {
		self.bindings.generate_activation(subject)
	}

	/// Complete script: data, declaration and activation, one per line.
	///
	/// The parts degrade independently, as their standalone operations do.
	/// Returns `""` when `source` has no entity type to build a script for.
	pub fn ko(&self, source: &dyn EntitySource, field_names: Option<&[String]>) -> String {
		let collection = match normalize(source) {
			Ok(Some(collection)) => collection,
			Ok(None) => {
				self.logger
					.debug("No entity type to build a Knockout script for; nothing emitted");
				return String::new();
			}
			Err(e) => return self.fallback("ko", &KnockoutError::from(e), ""),
		};
		let subject = collection.representative();

		let data = self
			.data_text(&collection, field_names, None, self.settings.safe)
			.unwrap_or_else(|e| self.fallback("ko_data", &e, EMPTY_DATA));
		let model = self.ko_model(subject, field_names, true);
		let bindings = self.ko_bindings(subject);
		[data, model, bindings].join("\n")
	}

	pub fn try_ko_data(
		&self,
		source: &dyn EntitySource,
		field_names: Option<&[String]>,
		name: Option<&str>,
		safe: bool,
	) -> Result<String, KnockoutError> {
		match normalize(source)? {
			Some(collection) => self.data_text(&collection, field_names, name, safe),
			None => Ok(EMPTY_DATA.to_string()),
		}
	}

	pub fn try_ko_json(
		&self,
		source: &dyn EntitySource,
		field_names: Option<&[String]>,
		safe: bool,
	) -> Result<String, KnockoutError> {
		match normalize(source)? {
			Some(collection) => {
				let document = self.document(&collection, field_names, safe)?;
				Ok(self.encoder.encode(&document)?)
			}
			None => Ok(EMPTY_DATA.to_string()),
		}
	}

	/// An empty `field_names` list counts as absent: a model without
	/// observables is never what the caller wants.
	pub fn try_ko_model(
		&self,
		subject: Subject<'_>,
		field_names: Option<&[String]>,
		has_data: bool,
	) -> Result<String, KnockoutError> {
		let field_names = field_names.filter(|names| !names.is_empty());
		let fields = self
			.serializer
			.resolver()
			.resolve_or_override(subject, field_names);
		Ok(self
			.bindings
			.generate_declaration(subject, &fields, has_data)?)
	}

	/// `var <name> = <json>;` for an already normalized collection. An empty
	/// `name` falls back to the default variable name.
	fn data_text(
		&self,
		collection: &Collection<'_>,
		field_names: Option<&[String]>,
		name: Option<&str>,
		safe: bool,
	) -> Result<String, KnockoutError> {
		let document = self.document(collection, field_names, safe)?;
		let variable = match name.filter(|name| !name.is_empty()) {
			Some(name) => name.to_string(),
			None => self.bindings.naming().data_variable(collection.type_name()),
		};
		Ok(self.encoder.encode_as_variable(&document, &variable)?)
	}

	fn document(
		&self,
		collection: &Collection<'_>,
		field_names: Option<&[String]>,
		safe: bool,
	) -> Result<Document, KnockoutError> {
		let serializer = self.serializer.clone().with_escaping(Escaping::from_safe(safe));
		let fields = serializer
			.resolver()
			.resolve_or_override(collection.representative(), field_names);
		Ok(serializer.serialize_all(collection.items(), &fields)?)
	}

	fn fallback(&self, operation: &str, error: &KnockoutError, default: &str) -> String {
		let record = self
			.logger
			.record(LogLevel::Error, error.to_string())
			.with_extra("operation", json!(operation));
		self.logger.log_record(&record);
		default.to_string()
	}
}

impl std::fmt::Debug for Knockout {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Knockout")
			.field("settings", &self.settings)
			.field("logger", &self.logger)
			.finish_non_exhaustive()
	}
}
