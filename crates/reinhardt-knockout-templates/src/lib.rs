//! # Reinhardt Knockout Templates
//!
//! Generates the client-side half of a Knockout binding: a model
//! constructor with one observable per field, a view model holding an
//! observable array of those models, and the `ko.applyBindings` call that
//! activates it.
//!
//! Declarations are rendered by a [`TemplateRenderer`]. [`TeraRenderer`]
//! ships with an embedded `model.js` template and can compile a custom one
//! instead.

pub mod bindings;
pub mod error;
pub mod renderer;

pub use bindings::{
	BindingContext, BindingTextGenerator, DEFAULT_COMPARATOR, DEFAULT_DATA_SUFFIX,
	DEFAULT_VIEW_MODEL_SUFFIX, Naming,
};
pub use error::TemplateError;
pub use renderer::{MODEL_TEMPLATE, TemplateRenderer, TeraRenderer};
