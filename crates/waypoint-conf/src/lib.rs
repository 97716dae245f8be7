//! # Waypoint settings
//!
//! Configuration for the deep-link intake and routers, loaded from TOML with
//! optional environment overrides.
//!
//! ```toml
//! navigation_mode = "home_screen"
//!
//! [tab_aliases]
//! agenda = "events"
//!
//! [logging]
//! filter = "waypoint=debug"
//!
//! [intake]
//! start_active = false
//! ```

pub mod error;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use waypoint_core::{NavigationMode, Tab, TabAliases};

pub use error::{SettingsError, SettingsResult};

/// Prefix of environment overrides read by [`WaypointSettings::from_env`].
pub const ENV_PREFIX: &str = "WAYPOINT_";

/// Top-level settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaypointSettings {
	/// Which router the mounted shell uses
	pub navigation_mode: NavigationMode,

	/// Extra `tabbarPage` names, layered over the built-in table
	pub tab_aliases: BTreeMap<String, Tab>,

	/// Log output
	pub logging: LoggingSettings,

	/// Intake behaviour
	pub intake: IntakeSettings,
}

/// Log output settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
	/// `EnvFilter` directive used when `RUST_LOG` is unset
	pub filter: String,

	/// Colourise output
	pub ansi: bool,
}

/// Intake settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeSettings {
	/// Start the activation gate in the active state. For hosts that build the
	/// intake after the app already became active.
	pub start_active: bool,
}

impl Default for WaypointSettings {
	fn default() -> Self {
		Self {
			navigation_mode: NavigationMode::Tabbed,
			tab_aliases: BTreeMap::new(),
			logging: LoggingSettings::default(),
			intake: IntakeSettings::default(),
		}
	}
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			filter: String::from("info"),
			ansi: true,
		}
	}
}

impl WaypointSettings {
	/// Parses settings from a TOML document and validates them.
	///
	/// # Examples
	///
	/// ```
	/// use waypoint_conf::WaypointSettings;
	/// use waypoint_core::{NavigationMode, Tab};
	///
	/// let settings = WaypointSettings::from_toml_str(r#"
	///     navigation_mode = "home_screen"
	///     [tab_aliases]
	///     agenda = "events"
	/// "#).unwrap();
	///
	/// assert_eq!(settings.navigation_mode, NavigationMode::HomeScreen);
	/// assert_eq!(settings.tab_aliases().resolve("agenda"), Some(Tab::Events));
	/// ```
	///
	/// # Errors
	///
	/// Returns [`SettingsError::Parse`] for malformed TOML and
	/// [`SettingsError::Validation`] when [`validate`](Self::validate) fails.
	pub fn from_toml_str(source: &str) -> SettingsResult<Self> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Reads settings from a TOML file.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::Io`] if the file cannot be read, otherwise the
	/// errors of [`from_toml_str`](Self::from_toml_str).
	pub fn from_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		tracing::debug!(path = %path.display(), "loading waypoint settings");
		Self::from_toml_str(&source)
	}

	/// Serializes the settings back to TOML.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::Serialize`] if encoding fails.
	pub fn to_toml_string(&self) -> SettingsResult<String> {
		Ok(toml::to_string(self)?)
	}

	/// Applies `WAYPOINT_*` overrides from the process environment.
	///
	/// # Errors
	///
	/// See [`apply_env`](Self::apply_env).
	pub fn from_env(mut self) -> SettingsResult<Self> {
		self.apply_env(std::env::vars())?;
		Ok(self)
	}

	/// Applies `WAYPOINT_*` overrides from a key/value source.
	///
	/// Recognized keys: `WAYPOINT_NAVIGATION_MODE`, `WAYPOINT_LOG_FILTER`,
	/// `WAYPOINT_LOG_ANSI`, `WAYPOINT_START_ACTIVE`. Other keys are ignored.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::InvalidValue`] for values that do not parse,
	/// and [`SettingsError::Validation`] if the result is invalid.
	pub fn apply_env<I, K, V>(&mut self, vars: I) -> SettingsResult<()>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		for (key, value) in vars {
			let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
				continue;
			};
			let value = value.as_ref();
			match name {
				"NAVIGATION_MODE" => {
					self.navigation_mode =
						value.parse().map_err(|_| invalid(key.as_ref(), value))?;
				}
				"LOG_FILTER" => self.logging.filter = value.to_string(),
				"LOG_ANSI" => self.logging.ansi = parse_bool(key.as_ref(), value)?,
				"START_ACTIVE" => self.intake.start_active = parse_bool(key.as_ref(), value)?,
				_ => continue,
			}
			tracing::debug!(key = key.as_ref(), "applied environment override");
		}
		self.validate()
	}

	/// Checks invariants serde cannot express.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::Validation`] for an empty log filter or an
	/// empty tab alias name.
	pub fn validate(&self) -> SettingsResult<()> {
		if self.logging.filter.trim().is_empty() {
			return Err(SettingsError::Validation(
				"logging.filter must not be empty".to_string(),
			));
		}
		if self.tab_aliases.keys().any(|name| name.trim().is_empty()) {
			return Err(SettingsError::Validation(
				"tab_aliases contains an empty name".to_string(),
			));
		}
		Ok(())
	}

	/// The built-in `tabbarPage` table with configured aliases layered on top.
	pub fn tab_aliases(&self) -> TabAliases {
		TabAliases::default().with_overrides(
			self.tab_aliases
				.iter()
				.map(|(name, tab)| (name.as_str(), *tab)),
		)
	}
}

fn invalid(key: &str, value: &str) -> SettingsError {
	SettingsError::InvalidValue {
		key: key.to_string(),
		value: value.to_string(),
	}
}

fn parse_bool(key: &str, value: &str) -> SettingsResult<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(true),
		"0" | "false" | "no" | "off" => Ok(false),
		_ => Err(invalid(key, value)),
	}
}
