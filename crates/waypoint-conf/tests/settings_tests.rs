//! Settings loading tests
//!
//! Covers:
//! - Happy path: TOML documents, files, round trip through `to_toml_string`
//! - Overrides: `WAYPOINT_*` keys layered over file values
//! - Error cases: malformed TOML, unknown modes, failed validation

use rstest::*;
use std::io::Write;
use waypoint_conf::{SettingsError, WaypointSettings};
use waypoint_core::{NavigationMode, Tab};

#[fixture]
fn home_screen_toml() -> &'static str {
	r#"
navigation_mode = "home_screen"

[tab_aliases]
agenda = "events"
home = "profile"

[logging]
filter = "waypoint=debug"
ansi = false

[intake]
start_active = true
"#
}

// ============================================================================
// Happy Path Tests
// ============================================================================

#[rstest]
fn test_from_toml_str_full_document(home_screen_toml: &str) {
	let settings = WaypointSettings::from_toml_str(home_screen_toml).unwrap();

	assert_eq!(settings.navigation_mode, NavigationMode::HomeScreen);
	assert_eq!(settings.logging.filter, "waypoint=debug");
	assert!(!settings.logging.ansi);
	assert!(settings.intake.start_active);

	let aliases = settings.tab_aliases();
	assert_eq!(aliases.resolve("agenda"), Some(Tab::Events));
	assert_eq!(aliases.resolve("home"), Some(Tab::Profile));
	assert_eq!(aliases.resolve("map"), Some(Tab::Map));
}

#[rstest]
fn test_empty_document_uses_defaults() {
	let settings = WaypointSettings::from_toml_str("").unwrap();
	assert_eq!(settings, WaypointSettings::default());
}

#[rstest]
fn test_partial_table_keeps_other_defaults() {
	let settings = WaypointSettings::from_toml_str("[logging]\nansi = false\n").unwrap();

	assert_eq!(settings.logging.filter, "info");
	assert!(!settings.logging.ansi);
}

#[rstest]
fn test_from_file(home_screen_toml: &str) {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	file.write_all(home_screen_toml.as_bytes()).unwrap();

	let settings = WaypointSettings::from_file(file.path()).unwrap();
	assert_eq!(settings.navigation_mode, NavigationMode::HomeScreen);
}

#[rstest]
fn test_toml_round_trip(home_screen_toml: &str) {
	let settings = WaypointSettings::from_toml_str(home_screen_toml).unwrap();
	let encoded = settings.to_toml_string().unwrap();

	assert_eq!(WaypointSettings::from_toml_str(&encoded).unwrap(), settings);
}

// ============================================================================
// Override Tests
// ============================================================================

#[rstest]
fn test_env_overrides_file_values(home_screen_toml: &str) {
	let mut settings = WaypointSettings::from_toml_str(home_screen_toml).unwrap();

	settings
		.apply_env([
			("WAYPOINT_NAVIGATION_MODE", "tabbed"),
			("WAYPOINT_LOG_FILTER", "warn"),
			("WAYPOINT_START_ACTIVE", "0"),
			("UNRELATED", "ignored"),
			("WAYPOINT_SOMETHING_ELSE", "ignored"),
		])
		.unwrap();

	assert_eq!(settings.navigation_mode, NavigationMode::Tabbed);
	assert_eq!(settings.logging.filter, "warn");
	assert!(!settings.intake.start_active);
	assert!(!settings.logging.ansi);
}

#[rstest]
#[case("WAYPOINT_NAVIGATION_MODE", "carousel")]
#[case("WAYPOINT_LOG_ANSI", "sometimes")]
#[case("WAYPOINT_START_ACTIVE", "2")]
fn test_env_rejects_bad_values(#[case] key: &str, #[case] value: &str) {
	let mut settings = WaypointSettings::default();
	let err = settings.apply_env([(key, value)]).unwrap_err();

	assert!(
		matches!(err, SettingsError::InvalidValue { key: ref k, .. } if k == key),
		"unexpected error: {err}"
	);
}

#[rstest]
fn test_env_rejects_empty_filter() {
	let mut settings = WaypointSettings::default();
	let err = settings
		.apply_env([("WAYPOINT_LOG_FILTER", "  ")])
		.unwrap_err();

	assert!(matches!(err, SettingsError::Validation(_)));
}

// ============================================================================
// Error Cases
// ============================================================================

#[rstest]
#[case("navigation_mode = \"carousel\"")]
#[case("navigation_mode = 3")]
#[case("[tab_aliases]\nagenda = \"calendar\"")]
#[case("this is not toml")]
fn test_malformed_documents(#[case] source: &str) {
	let err = WaypointSettings::from_toml_str(source).unwrap_err();
	assert!(matches!(err, SettingsError::Parse(_)), "unexpected error: {err}");
}

#[rstest]
fn test_empty_alias_name_fails_validation() {
	let err = WaypointSettings::from_toml_str("[tab_aliases]\n\"\" = \"map\"").unwrap_err();
	assert!(matches!(err, SettingsError::Validation(_)));
}

#[rstest]
fn test_missing_file_reports_path() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("missing.toml");

	let err = WaypointSettings::from_file(&path).unwrap_err();
	match err {
		SettingsError::Io { path: reported, .. } => assert_eq!(reported, path),
		other => panic!("Expected Io error, got {other:?}"),
	}
}
