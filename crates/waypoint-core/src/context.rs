//! Deep-link contexts.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Credentials and addressing for a chat deep link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatChannel {
	/// Session token for the chat backend
	pub token: String,
	/// Channel identifier
	pub channel_id: String,
	/// Human readable channel name shown in the navigation bar
	pub channel_name: String,
	/// Client identifier the session belongs to
	pub client_id: String,
}

impl ChatChannel {
	/// Creates a chat channel description.
	pub fn new(
		token: impl Into<String>,
		channel_id: impl Into<String>,
		channel_name: impl Into<String>,
		client_id: impl Into<String>,
	) -> Self {
		Self {
			token: token.into(),
			channel_id: channel_id.into(),
			channel_name: channel_name.into(),
			client_id: client_id.into(),
		}
	}
}

/// A normalized navigation intent.
///
/// Created once per external trigger by a [`ContextParser`](crate::ContextParser)
/// and consumed exactly once by a router. Contexts are immutable and never
/// persisted; the serde derives exist for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeepLinkContext {
	/// A booking on the profile screen.
	Booking { id: String },
	/// An event detail overlay.
	Event { id: String, source: Option<String> },
	/// A restaurant detail overlay.
	Restaurant { id: String, source: Option<String> },
	/// A tab-bar page addressed by name (`events`, `map`, `home`, `profile`).
	TabbarPage { name: String },
	/// Start video playback.
	Video,
	/// The notification inbox.
	Notifications,
	/// A delivery order.
	Delivery { id: String },
	/// The loyalty card section of the profile.
	LoyaltyCard,
	/// The booking history section of the profile.
	BookingHistory,
	/// An in-app web view.
	WebView { url: Url },
	/// A chat channel.
	Chat(ChatChannel),
}

impl DeepLinkContext {
	pub fn booking(id: impl Into<String>) -> Self {
		Self::Booking { id: id.into() }
	}

	pub fn event(id: impl Into<String>, source: Option<&str>) -> Self {
		Self::Event {
			id: id.into(),
			source: source.map(str::to_owned),
		}
	}

	pub fn restaurant(id: impl Into<String>, source: Option<&str>) -> Self {
		Self::Restaurant {
			id: id.into(),
			source: source.map(str::to_owned),
		}
	}

	pub fn tabbar_page(name: impl Into<String>) -> Self {
		Self::TabbarPage { name: name.into() }
	}

	pub fn delivery(id: impl Into<String>) -> Self {
		Self::Delivery { id: id.into() }
	}

	pub fn web_view(url: Url) -> Self {
		Self::WebView { url }
	}

	pub fn chat(channel: ChatChannel) -> Self {
		Self::Chat(channel)
	}

	/// Returns the fieldless discriminant of this context.
	pub fn kind(&self) -> ContextKind {
		match self {
			Self::Booking { .. } => ContextKind::Booking,
			Self::Event { .. } => ContextKind::Event,
			Self::Restaurant { .. } => ContextKind::Restaurant,
			Self::TabbarPage { .. } => ContextKind::TabbarPage,
			Self::Video => ContextKind::Video,
			Self::Notifications => ContextKind::Notifications,
			Self::Delivery { .. } => ContextKind::Delivery,
			Self::LoyaltyCard => ContextKind::LoyaltyCard,
			Self::BookingHistory => ContextKind::BookingHistory,
			Self::WebView { .. } => ContextKind::WebView,
			Self::Chat(_) => ContextKind::Chat,
		}
	}
}

impl fmt::Display for DeepLinkContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Booking { id }
			| Self::Event { id, .. }
			| Self::Restaurant { id, .. }
			| Self::Delivery { id } => write!(f, "{}({})", self.kind(), id),
			Self::TabbarPage { name } => write!(f, "{}({})", self.kind(), name),
			Self::WebView { url } => write!(f, "{}({})", self.kind(), url),
			Self::Chat(channel) => write!(f, "{}({})", self.kind(), channel.channel_id),
			_ => write!(f, "{}", self.kind()),
		}
	}
}

/// Fieldless discriminant of [`DeepLinkContext`], used for logging and phase
/// reporting where the payload does not matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextKind {
	Booking,
	Event,
	Restaurant,
	TabbarPage,
	Video,
	Notifications,
	Delivery,
	LoyaltyCard,
	BookingHistory,
	WebView,
	Chat,
}

impl ContextKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Booking => "booking",
			Self::Event => "event",
			Self::Restaurant => "restaurant",
			Self::TabbarPage => "tabbar_page",
			Self::Video => "video",
			Self::Notifications => "notifications",
			Self::Delivery => "delivery",
			Self::LoyaltyCard => "loyalty_card",
			Self::BookingHistory => "booking_history",
			Self::WebView => "web_view",
			Self::Chat => "chat",
		}
	}
}

impl fmt::Display for ContextKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(DeepLinkContext::booking("b-1"), ContextKind::Booking, "booking(b-1)")]
	#[case(DeepLinkContext::event("42", None), ContextKind::Event, "event(42)")]
	#[case(
		DeepLinkContext::restaurant("7", Some("push")),
		ContextKind::Restaurant,
		"restaurant(7)"
	)]
	#[case(
		DeepLinkContext::tabbar_page("events"),
		ContextKind::TabbarPage,
		"tabbar_page(events)"
	)]
	#[case(DeepLinkContext::Video, ContextKind::Video, "video")]
	#[case(DeepLinkContext::LoyaltyCard, ContextKind::LoyaltyCard, "loyalty_card")]
	#[case(
		DeepLinkContext::chat(ChatChannel::new("t", "c-9", "Support", "client")),
		ContextKind::Chat,
		"chat(c-9)"
	)]
	fn test_kind_and_display(
		#[case] context: DeepLinkContext,
		#[case] kind: ContextKind,
		#[case] display: &str,
	) {
		assert_eq!(context.kind(), kind);
		assert_eq!(context.to_string(), display);
	}

	#[rstest]
	fn test_source_is_kept_on_overlay_contexts() {
		let context = DeepLinkContext::event("42", Some("newsletter"));
		match context {
			DeepLinkContext::Event { id, source } => {
				assert_eq!(id, "42");
				assert_eq!(source.as_deref(), Some("newsletter"));
			}
			other => panic!("Expected event context, got {other:?}"),
		}
	}

	#[rstest]
	fn test_serializes_with_type_tag() {
		let context = DeepLinkContext::delivery("d-3");
		let json = serde_json::to_value(&context).unwrap();
		assert_eq!(json["type"], "delivery");
		assert_eq!(json["id"], "d-3");
	}
}
