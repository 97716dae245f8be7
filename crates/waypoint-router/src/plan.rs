//! Routing tables: what each context turns into for a given shell variant.

use std::fmt;
use waypoint_core::{ContextKind, Destination, NavigationMode, Presentation, RevealSection, Tab};

use crate::presentation::OverlayRequest;

/// How the profile destination is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileEntry {
	/// Select the profile tab.
	Tab,
	/// Push the profile screen on the root stack.
	Push,
}

/// The Presenting step of a route, decided before any UI is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePlan {
	SelectTab(Tab),
	Show {
		destination: Destination,
		style: Presentation,
	},
	Overlay(OverlayRequest),
	StartPlayback,
	Booking {
		profile: ProfileEntry,
		id: String,
	},
	/// Two-step case: open the profile, then reveal a section after load.
	Reveal {
		profile: ProfileEntry,
		section: RevealSection,
	},
	/// Nothing to present.
	Skip(SkipReason),
}

/// Why a context produced no navigation change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
	/// The context has no meaning in this navigation mode.
	UnsupportedInMode {
		kind: ContextKind,
		mode: NavigationMode,
	},
	/// A `tabbarPage` name that maps to no tab.
	UnknownTab(String),
	/// The mounted shell lacks a capability the context needs.
	MissingCapability(&'static str),
}

impl fmt::Display for SkipReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::UnsupportedInMode { kind, mode } => {
				write!(f, "{kind} is not supported in {mode} mode")
			}
			Self::UnknownTab(name) => write!(f, "unknown tab page: {name}"),
			Self::MissingCapability(capability) => write!(f, "missing capability: {capability}"),
		}
	}
}

/// Result of one `route()` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
	/// The context was presented.
	Presented(ContextKind),
	/// The profile was opened and a reveal was requested.
	Revealed(RevealSection),
	/// The hierarchy was reset but nothing was presented.
	Skipped(SkipReason),
}

impl RouteOutcome {
	pub fn is_skipped(&self) -> bool {
		matches!(self, Self::Skipped(_))
	}
}
