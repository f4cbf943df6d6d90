use reinhardt_knockout_serializers::EntityError;

/// Failures while producing binding text
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TemplateError {
	/// The template source does not compile
	#[error("Failed to compile template '{name}': {source}")]
	Compile {
		name: String,
		#[source]
		source: tera::Error,
	},

	/// The compiled template failed to render with the given context
	#[error("Failed to render template '{name}': {source}")]
	Render {
		name: String,
		#[source]
		source: tera::Error,
	},

	/// The entity type advertises a comparator but could not produce it
	#[error("Comparator of {type_name} is unavailable: {source}")]
	Comparator {
		type_name: String,
		#[source]
		source: EntityError,
	},
}
