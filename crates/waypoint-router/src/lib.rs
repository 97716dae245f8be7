//! Reset-then-present routing of deep-link contexts.
//!
//! Every [`Router::route`] call walks the same state machine:
//!
//! ```text
//! Idle → Resetting → Presenting → [Revealing] → Idle
//! ```
//!
//! Resetting dismisses overlays and modals and unwinds every stack to its
//! root. Presenting performs the mode-specific action decided by the
//! router's [`RoutePlan`]. Revealing only happens for profile sub-sections,
//! which are requested through a [`PresentedDestination`] and applied by the
//! destination once it has loaded.
//!
//! Two routers exist, one per shell variant:
//!
//! - [`TabbedRouter`]: shells with a tab bar
//! - [`HomeScreenRouter`]: single-stack shells
//!
//! A [`BoundRoot`] pairs a [`NavigationShell`] with its router and is what the
//! intake sees as the [`RootContainer`].
//!
//! Routers, shells and roots are not `Send`; they live on the UI thread.

pub mod home_screen;
pub mod plan;
pub mod presentation;
pub mod root;
pub mod router;
pub mod shell;
pub mod state;
pub mod tabbed;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use home_screen::HomeScreenRouter;
pub use plan::{ProfileEntry, RouteOutcome, RoutePlan, SkipReason};
pub use presentation::{
	DismissHandle, OverlayContent, OverlayRequest, PresentationManager, ScrollTarget,
};
pub use root::{BoundRoot, RootContainer, mount_for_mode};
pub use router::Router;
pub use shell::{BookingRoutable, NavigationShell, PresentedDestination, RevealReceiver};
pub use state::{PhaseListener, RouteState};
pub use tabbed::TabbedRouter;
