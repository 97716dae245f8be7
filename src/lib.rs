//! # Waypoint
//!
//! Deep-link intake, activation gating and navigation routing for mobile app
//! shells.
//!
//! External triggers (attribution callbacks, custom-scheme URL opens, push
//! taps) arrive on arbitrary threads. Waypoint turns them into a single
//! ordered stream of route cycles applied to the UI hierarchy:
//!
//! - Contexts submitted while the app is inactive are deferred; only the
//!   most recent one survives until activation.
//! - Contexts submitted while active are routed strictly in order, one
//!   cycle at a time.
//! - Every cycle resets the hierarchy to its root before presenting.
//!
//! ## Crates
//!
//! - [`core`]: contexts, navigation vocabulary, latched signals, parser seam
//! - [`conf`]: TOML and environment settings
//! - [`router`]: the route state machine, shells and both routers
//! - [`intake`]: activation gate, dispatch serializer, intake and dispatcher
//!
//! ## Feature Flags
//!
//! - `logging` (default): [`init_logging`] installs a `tracing-subscriber`
//!   formatter
//! - `testing`: recording shell and phase journal from
//!   `waypoint_router::testing`
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use waypoint::prelude::*;
//!
//! let settings = WaypointSettings::from_file("waypoint.toml")?.from_env()?;
//! waypoint::init_logging(&settings.logging);
//!
//! // On the UI thread
//! let (intake, dispatcher) = waypoint::assemble(&settings, Rc::new(MyShell::new()));
//! let roots = dispatcher.root_slot();
//! tokio::task::spawn_local(dispatcher.run());
//!
//! // Later, when the host swaps its navigation hierarchy
//! roots.mount(waypoint::mount_root(&settings, Rc::new(MyOtherShell::new())));
//!
//! // Anywhere
//! intake.submit(DeepLinkContext::restaurant("7", None));
//! intake.became_active();
//! ```

use std::rc::Rc;

pub use waypoint_conf as conf;
pub use waypoint_core as core;
pub use waypoint_intake as intake;
pub use waypoint_router as router;

pub use waypoint_conf::{LoggingSettings, SettingsError, SettingsResult, WaypointSettings};
pub use waypoint_core::{DeepLinkContext, DeeplinkError, DeeplinkResult, NavigationMode};
pub use waypoint_intake::{ActivationState, Admission, DeepLinkIntake, Dispatcher, RootSlot};
pub use waypoint_router::{NavigationShell, RootContainer, RouteOutcome};

pub mod prelude {
	// Core vocabulary
	pub use waypoint_core::{
		AttributionPayload, ChatChannel, ContextKind, ContextParser, DeepLinkContext,
		DeeplinkError, DeeplinkResult, Destination, Emission, LatchedSignal, NavigationMode,
		OverlayKind, PlaybackRequest, PlaybackSignal, Presentation, RevealSection, Tab,
		TabAliases,
	};

	// Settings
	pub use waypoint_conf::{LoggingSettings, WaypointSettings};

	// Routing
	pub use waypoint_router::{
		BookingRoutable, BoundRoot, DismissHandle, HomeScreenRouter, NavigationShell,
		OverlayContent, OverlayRequest, PhaseListener, PresentationManager,
		PresentedDestination, RevealReceiver, RootContainer, RouteOutcome, RouteState, Router,
		ScrollTarget, SkipReason, TabbedRouter, mount_for_mode,
	};

	// Intake
	pub use waypoint_intake::{
		ActivationGate, ActivationState, Admission, DeepLinkIntake, DispatchSerializer,
		Dispatcher, RootSlot,
	};
}

/// Installs a global `fmt` subscriber filtered by `settings.filter`.
///
/// `RUST_LOG` takes precedence over the configured filter when set. Returns
/// false if a global subscriber was already installed.
#[cfg(feature = "logging")]
pub fn init_logging(settings: &LoggingSettings) -> bool {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(&settings.filter))
		.unwrap_or_else(|err| {
			eprintln!("invalid log filter {:?}: {err}", settings.filter);
			EnvFilter::new("info")
		});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_ansi(settings.ansi)
		.try_init()
		.is_ok()
}

/// An intake builder configured from `settings`.
pub fn intake_builder(settings: &WaypointSettings) -> waypoint_intake::DeepLinkIntakeBuilder {
	let activation = if settings.intake.start_active {
		ActivationState::Active
	} else {
		ActivationState::Inactive
	};
	DeepLinkIntake::builder().activation(activation)
}

/// Binds `shell` to the router for the configured navigation mode.
pub fn mount_root<S>(settings: &WaypointSettings, shell: Rc<S>) -> Rc<dyn RootContainer>
where
	S: NavigationShell + 'static,
{
	waypoint_router::mount_for_mode(
		settings.navigation_mode,
		settings.tab_aliases(),
		shell,
		None,
	)
}

/// Builds an intake and a dispatcher with `shell` already mounted.
///
/// Must be called on the UI thread. Hosts that parse raw triggers configure
/// a parser through [`intake_builder`] and [`mount_root`] instead.
pub fn assemble<S>(settings: &WaypointSettings, shell: Rc<S>) -> (DeepLinkIntake, Dispatcher)
where
	S: NavigationShell + 'static,
{
	let (intake, dispatcher) = intake_builder(settings).build();
	dispatcher.mount(mount_root(settings, shell));
	tracing::info!(
		mode = %settings.navigation_mode,
		active = settings.intake.start_active,
		"deep link intake assembled"
	);
	(intake, dispatcher)
}
