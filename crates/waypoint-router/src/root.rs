//! The mounted root container.

use async_trait::async_trait;
use std::fmt;
use std::rc::Rc;
use waypoint_core::{DeepLinkContext, NavigationMode, TabAliases};

use crate::home_screen::HomeScreenRouter;
use crate::plan::RouteOutcome;
use crate::router::Router;
use crate::shell::NavigationShell;
use crate::state::PhaseListener;
use crate::tabbed::TabbedRouter;

/// The live navigation shell as seen by the intake.
///
/// `handle` is the only call the intake makes into the UI.
#[async_trait(?Send)]
pub trait RootContainer {
	fn mode(&self) -> NavigationMode;

	/// Routes `context` through the bound router.
	async fn handle(&self, context: DeepLinkContext) -> RouteOutcome;
}

/// A shell bound to the router for its variant.
pub struct BoundRoot<S, R> {
	shell: Rc<S>,
	router: R,
}

impl<S, R> BoundRoot<S, R>
where
	S: NavigationShell,
	R: Router,
{
	pub fn new(shell: Rc<S>, router: R) -> Self {
		Self { shell, router }
	}

	pub fn shell(&self) -> &Rc<S> {
		&self.shell
	}

	pub fn router(&self) -> &R {
		&self.router
	}
}

impl<S: NavigationShell> BoundRoot<S, TabbedRouter> {
	pub fn tabbed(shell: Rc<S>, aliases: TabAliases) -> Self {
		Self::new(shell, TabbedRouter::new(aliases))
	}
}

impl<S: NavigationShell> BoundRoot<S, HomeScreenRouter> {
	pub fn home_screen(shell: Rc<S>) -> Self {
		Self::new(shell, HomeScreenRouter::new())
	}
}

impl<S, R: fmt::Debug> fmt::Debug for BoundRoot<S, R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BoundRoot")
			.field("router", &self.router)
			.finish_non_exhaustive()
	}
}

#[async_trait(?Send)]
impl<S, R> RootContainer for BoundRoot<S, R>
where
	S: NavigationShell,
	R: Router,
{
	fn mode(&self) -> NavigationMode {
		self.router.mode()
	}

	async fn handle(&self, context: DeepLinkContext) -> RouteOutcome {
		self.router.route(context, self.shell.as_ref()).await
	}
}

/// Binds `shell` to the router for `mode`.
///
/// `aliases` only matter in [`NavigationMode::Tabbed`].
pub fn mount_for_mode<S>(
	mode: NavigationMode,
	aliases: TabAliases,
	shell: Rc<S>,
	listener: Option<Rc<dyn PhaseListener>>,
) -> Rc<dyn RootContainer>
where
	S: NavigationShell + 'static,
{
	tracing::debug!(mode = %mode, "mounting root container");
	match mode {
		NavigationMode::Tabbed => {
			let mut router = TabbedRouter::new(aliases);
			if let Some(listener) = listener {
				router = router.with_phase_listener(listener);
			}
			Rc::new(BoundRoot::new(shell, router))
		}
		NavigationMode::HomeScreen => {
			let mut router = HomeScreenRouter::new();
			if let Some(listener) = listener {
				router = router.with_phase_listener(listener);
			}
			Rc::new(BoundRoot::new(shell, router))
		}
	}
}
