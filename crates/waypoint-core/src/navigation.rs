//! Navigation vocabulary shared by routers and shells.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::context::ChatChannel;
use crate::error::DeeplinkError;

/// The overall UI shell variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
	/// Tab-bar based shell with Events, Map and Profile tabs.
	#[default]
	Tabbed,
	/// Single navigation stack rooted at a home screen.
	HomeScreen,
}

impl NavigationMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Tabbed => "tabbed",
			Self::HomeScreen => "home_screen",
		}
	}
}

impl fmt::Display for NavigationMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for NavigationMode {
	type Err = DeeplinkError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"tabbed" | "tabs" => Ok(Self::Tabbed),
			"home_screen" | "home-screen" | "homescreen" => Ok(Self::HomeScreen),
			other => Err(DeeplinkError::UnknownMode(other.to_string())),
		}
	}
}

/// Tabs of the tab-bar shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
	Events,
	Map,
	Profile,
}

impl fmt::Display for Tab {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Events => "events",
			Self::Map => "map",
			Self::Profile => "profile",
		})
	}
}

/// Name-to-tab table used by `tabbarPage` links.
///
/// Names are matched case-insensitively. The default table maps `events` to
/// [`Tab::Events`], `map` and `home` to [`Tab::Map`], and `profile` to
/// [`Tab::Profile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabAliases {
	entries: HashMap<String, Tab>,
}

impl TabAliases {
	/// Creates an empty table.
	pub fn empty() -> Self {
		Self {
			entries: HashMap::new(),
		}
	}

	/// Adds or replaces an alias.
	pub fn insert(&mut self, name: impl AsRef<str>, tab: Tab) {
		self.entries
			.insert(name.as_ref().trim().to_ascii_lowercase(), tab);
	}

	/// Adds aliases on top of the current table.
	pub fn with_overrides<I, S>(mut self, overrides: I) -> Self
	where
		I: IntoIterator<Item = (S, Tab)>,
		S: AsRef<str>,
	{
		for (name, tab) in overrides {
			self.insert(name, tab);
		}
		self
	}

	/// Resolves a tab-bar page name.
	pub fn resolve(&self, name: &str) -> Option<Tab> {
		self.entries
			.get(&name.trim().to_ascii_lowercase())
			.copied()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl Default for TabAliases {
	fn default() -> Self {
		Self::empty().with_overrides([
			("events", Tab::Events),
			("map", Tab::Map),
			("home", Tab::Map),
			("profile", Tab::Profile),
		])
	}
}

/// Full-screen destinations a router can push or present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Destination {
	Profile,
	/// Root screen of a tab other than the profile.
	TabRoot(Tab),
	Notifications,
	Delivery { id: String },
	WebView { url: Url },
	Chat(ChatChannel),
}

impl Destination {
	/// The destination shown when `tab` is selected.
	pub fn for_tab(tab: Tab) -> Self {
		match tab {
			Tab::Profile => Self::Profile,
			other => Self::TabRoot(other),
		}
	}
}

impl fmt::Display for Destination {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Profile => f.write_str("profile"),
			Self::TabRoot(tab) => write!(f, "tab({tab})"),
			Self::Notifications => f.write_str("notifications"),
			Self::Delivery { id } => write!(f, "delivery({id})"),
			Self::WebView { url } => write!(f, "web_view({url})"),
			Self::Chat(channel) => write!(f, "chat({})", channel.channel_id),
		}
	}
}

/// How a destination is put on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presentation {
	/// Pushed onto the current navigation stack.
	Push,
	/// Presented modally over the current root.
	Modal,
}

/// Kinds of floating overlay. At most one overlay per kind is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
	Event,
	Restaurant,
}

impl fmt::Display for OverlayKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Event => "event",
			Self::Restaurant => "restaurant",
		})
	}
}

/// Profile sub-sections that only exist once the profile has loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealSection {
	LoyaltyCard,
	BookingHistory,
}

impl fmt::Display for RevealSection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::LoyaltyCard => "loyalty_card",
			Self::BookingHistory => "booking_history",
		})
	}
}

/// Request to start video playback once the player view exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackRequest;

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("events", Some(Tab::Events))]
	#[case("map", Some(Tab::Map))]
	#[case("home", Some(Tab::Map))]
	#[case("profile", Some(Tab::Profile))]
	#[case("Profile ", Some(Tab::Profile))]
	#[case("unknown", None)]
	#[case("", None)]
	fn test_default_tab_aliases(#[case] name: &str, #[case] expected: Option<Tab>) {
		assert_eq!(TabAliases::default().resolve(name), expected);
	}

	#[rstest]
	fn test_overrides_extend_defaults() {
		let aliases = TabAliases::default().with_overrides([("agenda", Tab::Events), ("home", Tab::Profile)]);

		assert_eq!(aliases.resolve("agenda"), Some(Tab::Events));
		assert_eq!(aliases.resolve("home"), Some(Tab::Profile));
		assert_eq!(aliases.resolve("map"), Some(Tab::Map));
		assert_eq!(aliases.len(), 5);
	}

	#[rstest]
	#[case(Tab::Profile, Destination::Profile)]
	#[case(Tab::Events, Destination::TabRoot(Tab::Events))]
	#[case(Tab::Map, Destination::TabRoot(Tab::Map))]
	fn test_destination_for_tab(#[case] tab: Tab, #[case] expected: Destination) {
		assert_eq!(Destination::for_tab(tab), expected);
	}

	#[rstest]
	#[case("tabbed", NavigationMode::Tabbed)]
	#[case("home_screen", NavigationMode::HomeScreen)]
	#[case("Home-Screen", NavigationMode::HomeScreen)]
	fn test_navigation_mode_from_str(#[case] raw: &str, #[case] expected: NavigationMode) {
		assert_eq!(raw.parse::<NavigationMode>().unwrap(), expected);
	}

	#[rstest]
	fn test_navigation_mode_rejects_unknown() {
		let err = "carousel".parse::<NavigationMode>().unwrap_err();
		assert!(matches!(err, DeeplinkError::UnknownMode(ref m) if m == "carousel"));
	}
}
