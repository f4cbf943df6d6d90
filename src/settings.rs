//! Knockout settings
//!
//! Every key is optional; missing keys take their defaults.
//!
//! ```toml
//! safe = false
//! cycle_policy = "back_reference"
//! max_depth = 32
//! data_suffix = "Data"
//! view_model_suffix = "ViewModel"
//! default_comparator = "id"
//! ```

use reinhardt_knockout_serializers::{CyclePolicy, DEFAULT_MAX_DEPTH};
use reinhardt_knockout_templates::{
	DEFAULT_COMPARATOR, DEFAULT_DATA_SUFFIX, DEFAULT_VIEW_MODEL_SUFFIX, Naming,
};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Error type for loading settings
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KnockoutSettings {
	/// Emit text values raw instead of HTML-escaping them when a call does
	/// not say otherwise
	pub safe: bool,
	pub cycle_policy: CyclePolicy,
	/// Nesting allowed below the root entity before serialization aborts
	pub max_depth: usize,
	pub data_suffix: String,
	pub view_model_suffix: String,
	/// Sort field for types without a comparator capability
	pub default_comparator: String,
	/// Tera source replacing the embedded `model.js` declaration template
	pub template: Option<String>,
}

impl KnockoutSettings {
	/// Parse settings from TOML text
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_knockout::KnockoutSettings;
	///
	/// let settings = KnockoutSettings::from_toml_str("max_depth = 4").unwrap();
	/// assert_eq!(settings.max_depth, 4);
	/// assert_eq!(settings.data_suffix, "Data");
	/// ```
	pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(content)?)
	}

	pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let content = fs::read_to_string(path)?;
		Self::from_toml_str(&content)
	}

	pub fn naming(&self) -> Naming {
		Naming {
			data_suffix: self.data_suffix.clone(),
			view_model_suffix: self.view_model_suffix.clone(),
		}
	}
}

impl Default for KnockoutSettings {
	fn default() -> Self {
		Self {
			safe: false,
			cycle_policy: CyclePolicy::default(),
			max_depth: DEFAULT_MAX_DEPTH,
			data_suffix: DEFAULT_DATA_SUFFIX.to_string(),
			view_model_suffix: DEFAULT_VIEW_MODEL_SUFFIX.to_string(),
			default_comparator: DEFAULT_COMPARATOR.to_string(),
			template: None,
		}
	}
}
