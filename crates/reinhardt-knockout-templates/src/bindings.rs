//! Declaration and activation text for Knockout view models

use crate::error::TemplateError;
use crate::renderer::TemplateRenderer;
use reinhardt_knockout_serializers::{FieldSet, Subject};
use serde::Serialize;

pub const DEFAULT_DATA_SUFFIX: &str = "Data";
pub const DEFAULT_VIEW_MODEL_SUFFIX: &str = "ViewModel";
pub const DEFAULT_COMPARATOR: &str = "id";

/// How client-side names are derived from an entity type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
	pub data_suffix: String,
	pub view_model_suffix: String,
}

impl Naming {
	/// `<Name><data_suffix>`, the variable holding preloaded data
	pub fn data_variable(&self, name: &str) -> String {
		format!("{}{}", name, self.data_suffix)
	}

	/// `<Name><view_model_suffix>`
	pub fn view_model(&self, name: &str) -> String {
		format!("{}{}", name, self.view_model_suffix)
	}

	/// Lower-cased name with an `s`: the observable array and the DOM anchor id
	pub fn collection(&self, name: &str) -> String {
		format!("{}s", name.to_lowercase())
	}
}

impl Default for Naming {
	fn default() -> Self {
		Self {
			data_suffix: DEFAULT_DATA_SUFFIX.to_string(),
			view_model_suffix: DEFAULT_VIEW_MODEL_SUFFIX.to_string(),
		}
	}
}

/// Parameters handed to the declaration template.
///
/// `name`, `fields`, `data` and `comparator` are the template's inputs; the
/// remaining names are derived from `name` so templates do not repeat the
/// naming rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingContext {
	pub name: String,
	pub fields: Vec<String>,
	pub data: bool,
	pub comparator: String,
	pub view_model: String,
	pub data_variable: String,
	pub collection: String,
}

impl BindingContext {
	/// Build a context with the default naming rules
	pub fn new(
		name: impl Into<String>,
		fields: Vec<String>,
		data: bool,
		comparator: impl Into<String>,
	) -> Self {
		Self::with_naming(&Naming::default(), name, fields, data, comparator)
	}

	pub fn with_naming(
		naming: &Naming,
		name: impl Into<String>,
		fields: Vec<String>,
		data: bool,
		comparator: impl Into<String>,
	) -> Self {
		let name = name.into();
		Self {
			view_model: naming.view_model(&name),
			data_variable: naming.data_variable(&name),
			collection: naming.collection(&name),
			name,
			fields,
			data,
			comparator: comparator.into(),
		}
	}
}

/// Produces model declarations through a [`TemplateRenderer`] and the
/// matching `ko.applyBindings` statement.
pub struct BindingTextGenerator {
	renderer: Box<dyn TemplateRenderer>,
	naming: Naming,
	default_comparator: String,
}

impl BindingTextGenerator {
	pub fn new(renderer: Box<dyn TemplateRenderer>) -> Self {
		Self {
			renderer,
			naming: Naming::default(),
			default_comparator: DEFAULT_COMPARATOR.to_string(),
		}
	}

	pub fn with_naming(mut self, naming: Naming) -> Self {
		self.naming = naming;
		self
	}

	pub fn with_default_comparator(mut self, comparator: impl Into<String>) -> Self {
		self.default_comparator = comparator.into();
		self
	}

	pub fn naming(&self) -> &Naming {
		&self.naming
	}

	/// The sort field for `subject`: the type's comparator capability if it
	/// has one, otherwise the configured default.
	pub fn comparator(&self, subject: Subject<'_>) -> Result<String, TemplateError> {
		match subject.model().and_then(|model| model.comparator_provider()) {
			Some(provider) => provider.comparator().map_err(|source| TemplateError::Comparator {
				type_name: subject.name().to_string(),
				source,
			}),
			None => Ok(self.default_comparator.clone()),
		}
	}

	pub fn context(
		&self,
		subject: Subject<'_>,
		fields: &FieldSet,
		has_data: bool,
	) -> Result<BindingContext, TemplateError> {
		Ok(BindingContext::with_naming(
			&self.naming,
			subject.name(),
			fields.to_vec(),
			has_data,
			self.comparator(subject)?,
		))
	}

	/// Render the model and view-model declaration for `subject`.
	///
	/// Trailing whitespace from the template is dropped so the text can be
	/// joined with other script fragments.
	pub fn generate_declaration(
		&self,
		subject: Subject<'_>,
		fields: &FieldSet,
		has_data: bool,
	) -> Result<String, TemplateError> {
		let context = self.context(subject, fields, has_data)?;
		let text = self.renderer.render(&context)?;
		Ok(text.trim_end().to_string())
	}

	/// # Examples
	///
	/// ```
	/// use reinhardt_knockout_serializers::Subject;
	/// use reinhardt_knockout_templates::{BindingTextGenerator, TeraRenderer};
	///
	/// let generator = BindingTextGenerator::new(Box::new(TeraRenderer::new().unwrap()));
	/// assert_eq!(
	///     generator.generate_activation(Subject::Name("Person")),
	///     "ko.applyBindings(new PersonViewModel(), $('#persons')[0]);"
	/// );
	/// ```
	pub fn generate_activation(&self, subject: Subject<'_>) -> String {
		let name = subject.name();
		format!(
			"ko.applyBindings(new {}(), $('#{}')[0]);",
			self.naming.view_model(name),
			self.naming.collection(name)
		)
	}
}

impl std::fmt::Debug for BindingTextGenerator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BindingTextGenerator")
			.field("naming", &self.naming)
			.field("default_comparator", &self.default_comparator)
			.finish_non_exhaustive()
	}
}
