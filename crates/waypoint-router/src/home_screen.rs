//! Router for the single-stack home-screen shell.

use async_trait::async_trait;
use std::fmt;
use std::rc::Rc;
use waypoint_core::{DeepLinkContext, NavigationMode};

use crate::plan::{ProfileEntry, RoutePlan, SkipReason};
use crate::router::{Router, route_table};
use crate::state::PhaseListener;

/// Routes contexts onto a shell without a tab bar.
///
/// Profile cases push the profile screen; `tabbarPage` contexts have no
/// meaning here and only reset the hierarchy.
#[derive(Default)]
pub struct HomeScreenRouter {
	listener: Option<Rc<dyn PhaseListener>>,
}

impl HomeScreenRouter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_phase_listener(mut self, listener: Rc<dyn PhaseListener>) -> Self {
		self.listener = Some(listener);
		self
	}
}

impl fmt::Debug for HomeScreenRouter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HomeScreenRouter")
			.field("listener", &self.listener.is_some())
			.finish()
	}
}

#[async_trait(?Send)]
impl Router for HomeScreenRouter {
	fn mode(&self) -> NavigationMode {
		NavigationMode::HomeScreen
	}

	fn plan(&self, context: &DeepLinkContext) -> RoutePlan {
		route_table(context, ProfileEntry::Push, |_| {
			RoutePlan::Skip(SkipReason::UnsupportedInMode {
				kind: context.kind(),
				mode: NavigationMode::HomeScreen,
			})
		})
	}

	fn phase_listener(&self) -> Option<&dyn PhaseListener> {
		self.listener.as_deref()
	}
}
