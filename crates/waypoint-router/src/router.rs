//! The router contract and the shared reset-then-present executor.

use async_trait::async_trait;
use waypoint_core::{
	DeepLinkContext, Destination, NavigationMode, PlaybackRequest, Presentation, RevealSection,
};

use crate::plan::{ProfileEntry, RouteOutcome, RoutePlan, SkipReason};
use crate::presentation::OverlayRequest;
use crate::shell::{NavigationShell, PresentedDestination};
use crate::state::{PhaseListener, RouteCycle, RouteState};

/// Maps contexts onto navigation actions of a shell.
///
/// Implementations only decide the [`RoutePlan`]; [`route`](Self::route)
/// runs every plan through the same state machine, so every call starts by
/// resetting the hierarchy.
#[async_trait(?Send)]
pub trait Router {
	/// The shell variant this router targets.
	fn mode(&self) -> NavigationMode;

	/// Decides the Presenting step for `context`.
	fn plan(&self, context: &DeepLinkContext) -> RoutePlan;

	fn phase_listener(&self) -> Option<&dyn PhaseListener> {
		None
	}

	/// Routes `context` onto `shell`: Resetting, Presenting, optionally
	/// Revealing, then back to Idle. Must be called on the UI thread.
	async fn route(&self, context: DeepLinkContext, shell: &dyn NavigationShell) -> RouteOutcome {
		let plan = self.plan(&context);
		execute(&context, plan, shell, self.mode(), self.phase_listener()).await
	}
}

/// The table both routers share. Only the profile entry point and the
/// handling of `tabbarPage` names differ per mode.
pub(crate) fn route_table<F>(context: &DeepLinkContext, profile: ProfileEntry, tab_page: F) -> RoutePlan
where
	F: FnOnce(&str) -> RoutePlan,
{
	match context {
		DeepLinkContext::Booking { id } => RoutePlan::Booking {
			profile,
			id: id.clone(),
		},
		DeepLinkContext::Event { .. } | DeepLinkContext::Restaurant { .. } => {
			match OverlayRequest::from_context(context) {
				Some(request) => RoutePlan::Overlay(request),
				None => RoutePlan::Skip(SkipReason::MissingCapability("overlay")),
			}
		}
		DeepLinkContext::TabbarPage { name } => tab_page(name),
		DeepLinkContext::Video => RoutePlan::StartPlayback,
		DeepLinkContext::Notifications => RoutePlan::Show {
			destination: Destination::Notifications,
			style: Presentation::Push,
		},
		DeepLinkContext::Delivery { id } => RoutePlan::Show {
			destination: Destination::Delivery { id: id.clone() },
			style: Presentation::Push,
		},
		DeepLinkContext::WebView { url } => RoutePlan::Show {
			destination: Destination::WebView { url: url.clone() },
			style: Presentation::Modal,
		},
		DeepLinkContext::Chat(channel) => RoutePlan::Show {
			destination: Destination::Chat(channel.clone()),
			style: Presentation::Modal,
		},
		DeepLinkContext::LoyaltyCard => RoutePlan::Reveal {
			profile,
			section: RevealSection::LoyaltyCard,
		},
		DeepLinkContext::BookingHistory => RoutePlan::Reveal {
			profile,
			section: RevealSection::BookingHistory,
		},
	}
}

/// Unwinds the hierarchy: overlays, modals, then every stack to its root.
async fn reset(shell: &dyn NavigationShell) {
	let overlays = shell.presentations().dismiss_all();
	shell.dismiss_modals().await;
	shell.unwind_to_root().await;
	tracing::trace!(overlays, "navigation reset to root");
}

async fn open_profile(
	shell: &dyn NavigationShell,
	entry: ProfileEntry,
) -> Option<PresentedDestination> {
	match entry {
		ProfileEntry::Tab => shell.select_tab(waypoint_core::Tab::Profile).await,
		ProfileEntry::Push => Some(shell.show(Destination::Profile, Presentation::Push).await),
	}
}

fn skipped(context: &DeepLinkContext, reason: SkipReason) -> RouteOutcome {
	match &reason {
		SkipReason::UnsupportedInMode { mode, .. } => {
			tracing::info!(context = %context, mode = %mode, "deep link not supported in this mode");
		}
		SkipReason::UnknownTab(name) => {
			tracing::debug!(context = %context, name = %name, "ignoring unknown tab page");
		}
		SkipReason::MissingCapability(capability) => {
			tracing::warn!(context = %context, capability, "mounted shell lacks capability");
		}
	}
	RouteOutcome::Skipped(reason)
}

pub(crate) async fn execute(
	context: &DeepLinkContext,
	plan: RoutePlan,
	shell: &dyn NavigationShell,
	mode: NavigationMode,
	listener: Option<&dyn PhaseListener>,
) -> RouteOutcome {
	let kind = context.kind();
	tracing::debug!(context = %context, mode = %mode, "routing deep link");

	let mut cycle = RouteCycle::new(kind, listener);
	cycle.advance(RouteState::Resetting);
	reset(shell).await;

	cycle.advance(RouteState::Presenting);
	let outcome = match plan {
		RoutePlan::SelectTab(tab) => match shell.select_tab(tab).await {
			Some(_) => RouteOutcome::Presented(kind),
			None => skipped(context, SkipReason::MissingCapability("tab bar")),
		},
		RoutePlan::Show { destination, style } => {
			shell.show(destination, style).await;
			RouteOutcome::Presented(kind)
		}
		RoutePlan::Overlay(request) => {
			let content = shell.overlay_content(&request);
			shell.presentations().present(request, content);
			RouteOutcome::Presented(kind)
		}
		RoutePlan::StartPlayback => {
			let emission = shell.playback().emit(PlaybackRequest);
			tracing::debug!(?emission, "requested video playback");
			RouteOutcome::Presented(kind)
		}
		RoutePlan::Booking { profile, id } => match open_profile(shell, profile).await {
			None => skipped(context, SkipReason::MissingCapability("tab bar")),
			Some(_) => match shell.booking_routing() {
				Some(bookings) => {
					bookings.route_to_booking(&id);
					RouteOutcome::Presented(kind)
				}
				None => skipped(context, SkipReason::MissingCapability("booking routing")),
			},
		},
		RoutePlan::Reveal { profile, section } => match open_profile(shell, profile).await {
			None => skipped(context, SkipReason::MissingCapability("tab bar")),
			Some(presented) => {
				cycle.advance(RouteState::Revealing);
				let emission = presented.reveal_on_load(section);
				tracing::debug!(section = %section, ?emission, "requested reveal after load");
				RouteOutcome::Revealed(section)
			}
		},
		RoutePlan::Skip(reason) => skipped(context, reason),
	};

	cycle.finish();
	outcome
}
