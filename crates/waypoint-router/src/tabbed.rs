//! Router for the tab-bar shell.

use async_trait::async_trait;
use std::fmt;
use std::rc::Rc;
use waypoint_core::{DeepLinkContext, NavigationMode, TabAliases};

use crate::plan::{ProfileEntry, RoutePlan, SkipReason};
use crate::router::{Router, route_table};
use crate::state::PhaseListener;

/// Routes contexts onto a shell with a tab bar.
///
/// Profile cases select the profile tab; `tabbarPage` names are looked up in
/// the configured [`TabAliases`].
pub struct TabbedRouter {
	aliases: TabAliases,
	listener: Option<Rc<dyn PhaseListener>>,
}

impl TabbedRouter {
	pub fn new(aliases: TabAliases) -> Self {
		Self {
			aliases,
			listener: None,
		}
	}

	pub fn with_phase_listener(mut self, listener: Rc<dyn PhaseListener>) -> Self {
		self.listener = Some(listener);
		self
	}

	pub fn aliases(&self) -> &TabAliases {
		&self.aliases
	}
}

impl Default for TabbedRouter {
	fn default() -> Self {
		Self::new(TabAliases::default())
	}
}

impl fmt::Debug for TabbedRouter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TabbedRouter")
			.field("aliases", &self.aliases)
			.field("listener", &self.listener.is_some())
			.finish()
	}
}

#[async_trait(?Send)]
impl Router for TabbedRouter {
	fn mode(&self) -> NavigationMode {
		NavigationMode::Tabbed
	}

	fn plan(&self, context: &DeepLinkContext) -> RoutePlan {
		route_table(context, ProfileEntry::Tab, |name| match self.aliases.resolve(name) {
			Some(tab) => RoutePlan::SelectTab(tab),
			None => RoutePlan::Skip(SkipReason::UnknownTab(name.to_string())),
		})
	}

	fn phase_listener(&self) -> Option<&dyn PhaseListener> {
		self.listener.as_deref()
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;
	use url::Url;
	use waypoint_core::{ChatChannel, Destination, Presentation, RevealSection, Tab};

	use super::*;
	use crate::presentation::OverlayRequest;

	#[rstest]
	#[case("events", Tab::Events)]
	#[case("map", Tab::Map)]
	#[case("home", Tab::Map)]
	#[case("Profile", Tab::Profile)]
	fn test_tab_pages_select_tabs(#[case] name: &str, #[case] tab: Tab) {
		let router = TabbedRouter::default();
		assert_eq!(
			router.plan(&DeepLinkContext::tabbar_page(name)),
			RoutePlan::SelectTab(tab)
		);
	}

	#[rstest]
	fn test_unknown_tab_page_is_skipped() {
		let router = TabbedRouter::default();
		assert_eq!(
			router.plan(&DeepLinkContext::tabbar_page("settings")),
			RoutePlan::Skip(SkipReason::UnknownTab("settings".into()))
		);
	}

	#[rstest]
	fn test_custom_alias() {
		let router = TabbedRouter::new(TabAliases::default().with_overrides([("discover", Tab::Events)]));
		assert_eq!(
			router.plan(&DeepLinkContext::tabbar_page("discover")),
			RoutePlan::SelectTab(Tab::Events)
		);
	}

	#[rstest]
	#[case(DeepLinkContext::LoyaltyCard, RevealSection::LoyaltyCard)]
	#[case(DeepLinkContext::BookingHistory, RevealSection::BookingHistory)]
	fn test_profile_sections_go_through_tab(#[case] context: DeepLinkContext, #[case] section: RevealSection) {
		let router = TabbedRouter::default();
		assert_eq!(
			router.plan(&context),
			RoutePlan::Reveal {
				profile: ProfileEntry::Tab,
				section
			}
		);
	}

	#[rstest]
	fn test_stack_destinations() {
		let router = TabbedRouter::default();
		let url = Url::parse("https://example.com/terms").unwrap();
		let channel = ChatChannel::new("tok", "c-9", "Support", "client");

		assert_eq!(
			router.plan(&DeepLinkContext::delivery("d-1")),
			RoutePlan::Show {
				destination: Destination::Delivery { id: "d-1".into() },
				style: Presentation::Push,
			}
		);
		assert_eq!(
			router.plan(&DeepLinkContext::web_view(url.clone())),
			RoutePlan::Show {
				destination: Destination::WebView { url },
				style: Presentation::Modal,
			}
		);
		assert_eq!(
			router.plan(&DeepLinkContext::chat(channel.clone())),
			RoutePlan::Show {
				destination: Destination::Chat(channel),
				style: Presentation::Modal,
			}
		);
		assert_eq!(router.plan(&DeepLinkContext::Video), RoutePlan::StartPlayback);
	}

	#[rstest]
	fn test_overlays_and_booking() {
		let router = TabbedRouter::default();
		let event = DeepLinkContext::event("42", None);

		assert_eq!(
			router.plan(&event),
			RoutePlan::Overlay(OverlayRequest::from_context(&event).unwrap())
		);
		assert_eq!(
			router.plan(&DeepLinkContext::booking("b-5")),
			RoutePlan::Booking {
				profile: ProfileEntry::Tab,
				id: "b-5".into()
			}
		);
	}
}
