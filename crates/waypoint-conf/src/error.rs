//! Error types for settings loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
	/// The settings file could not be read.
	#[error("failed to read settings file {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The TOML document is malformed or has the wrong shape.
	#[error("failed to parse settings: {0}")]
	Parse(#[from] toml::de::Error),

	/// Settings could not be encoded as TOML.
	#[error("failed to serialize settings: {0}")]
	Serialize(#[from] toml::ser::Error),

	/// An override carried a value of the wrong type.
	#[error("invalid value for {key}: {value}")]
	InvalidValue { key: String, value: String },

	/// The settings parsed but break an invariant.
	#[error("invalid settings: {0}")]
	Validation(String),
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
