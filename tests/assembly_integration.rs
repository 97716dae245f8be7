//! Integration tests for the Waypoint facade
//!
//! Tests settings-driven assembly of the intake and dispatcher:
//! - Navigation mode selection from settings
//! - Initial activation state
//! - Global logging installation

use rstest::{fixture, rstest};
use serial_test::serial;
use std::rc::Rc;
use waypoint::prelude::*;
use waypoint_router::testing::{Journal, RecordingShell, ShellOp};

#[fixture]
fn home_screen_settings() -> WaypointSettings {
	WaypointSettings::from_toml_str(
		r#"
navigation_mode = "home_screen"

[intake]
start_active = true
"#,
	)
	.unwrap()
}

#[rstest]
#[tokio::test]
async fn test_assemble_mounts_configured_mode(home_screen_settings: WaypointSettings) {
	let journal = Journal::new();
	let shell = Rc::new(RecordingShell::home_screen(journal.clone()));

	let (intake, mut dispatcher) = waypoint::assemble(&home_screen_settings, shell);

	assert_eq!(intake.gate().state(), ActivationState::Active);
	assert_eq!(intake.submit(DeepLinkContext::tabbar_page("events")), Admission::Dispatched);
	assert_eq!(dispatcher.run_pending().await, 1);
	assert_eq!(journal.ops(), [ShellOp::DismissModals, ShellOp::UnwindToRoot]);
}

#[rstest]
#[tokio::test]
async fn test_custom_alias_reaches_router() {
	let settings = WaypointSettings::from_toml_str(
		r#"
[tab_aliases]
agenda = "events"
"#,
	)
	.unwrap();
	let journal = Journal::new();
	let (intake, mut dispatcher) = waypoint::intake_builder(&settings).build();
	dispatcher.mount(waypoint::mount_root(
		&settings,
		Rc::new(RecordingShell::tabbed(journal.clone())),
	));

	assert_eq!(
		intake.submit(DeepLinkContext::tabbar_page("agenda")),
		Admission::Deferred { replaced: false }
	);
	intake.became_active();
	dispatcher.run_pending().await;

	assert_eq!(journal.ops().last(), Some(&ShellOp::SelectTab(Tab::Events)));
}

#[rstest]
#[serial(logging)]
fn test_init_logging_installs_once() {
	let settings = LoggingSettings {
		filter: "waypoint=debug".to_string(),
		ansi: false,
	};

	assert!(waypoint::init_logging(&settings));
	assert!(!waypoint::init_logging(&settings));
}
