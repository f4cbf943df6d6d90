//! Tera-based rendering of model declarations
//!
//! The embedded `model.js` template is compiled when a [`TeraRenderer`] is
//! built, so a broken template surfaces at construction instead of on the
//! first render. Template names end in `.js`, which keeps Tera's HTML
//! autoescaping off.

use crate::bindings::BindingContext;
use crate::error::TemplateError;
use tera::{Context, Tera};

/// Name under which the declaration template is registered
pub const MODEL_TEMPLATE: &str = "model.js";

const EMBEDDED_MODEL_TEMPLATE: &str = include_str!("../templates/model.js");

/// Renders a declaration from a [`BindingContext`].
pub trait TemplateRenderer {
	fn render(&self, context: &BindingContext) -> Result<String, TemplateError>;
}

/// Tera-backed renderer
///
/// # Examples
///
/// ```
/// use reinhardt_knockout_templates::{BindingContext, TemplateRenderer, TeraRenderer};
///
/// let renderer = TeraRenderer::from_source("{{ name }}({{ fields | join(sep=\", \") }})").unwrap();
/// let context = BindingContext::new("Person", vec!["id".into(), "name".into()], false, "id");
/// assert_eq!(renderer.render(&context).unwrap(), "Person(id, name)");
/// ```
pub struct TeraRenderer {
	tera: Tera,
}

impl TeraRenderer {
	/// Compile the embedded `model.js` template
	pub fn new() -> Result<Self, TemplateError> {
		Self::from_source(EMBEDDED_MODEL_TEMPLATE)
	}

	/// Compile a custom declaration template
	pub fn from_source(source: &str) -> Result<Self, TemplateError> {
		let mut tera = Tera::default();
		tera.add_raw_template(MODEL_TEMPLATE, source)
			.map_err(|source| TemplateError::Compile {
				name: MODEL_TEMPLATE.to_string(),
				source,
			})?;
		Ok(Self { tera })
	}
}

impl TemplateRenderer for TeraRenderer {
	fn render(&self, context: &BindingContext) -> Result<String, TemplateError> {
		let render_error = |source| TemplateError::Render {
			name: MODEL_TEMPLATE.to_string(),
			source,
		};
		let ctx = Context::from_serialize(context).map_err(render_error)?;
		self.tera.render(MODEL_TEMPLATE, &ctx).map_err(render_error)
	}
}

impl std::fmt::Debug for TeraRenderer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TeraRenderer")
			.field("template", &MODEL_TEMPLATE)
			.finish()
	}
}
