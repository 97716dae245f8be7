//! The seam between raw triggers and [`DeepLinkContext`].
//!
//! The concrete link grammar belongs to the host application. This module
//! only fixes the shape of that collaborator and resolves push payloads into
//! URLs, which is the same for every host.

use serde_json::{Map, Value};
use url::Url;

use crate::DeeplinkResult;
use crate::context::DeepLinkContext;
use crate::error::DeeplinkError;

/// Loosely-typed key/value payload delivered by an attribution SDK session
/// callback.
pub type AttributionPayload = Map<String, Value>;

/// Converts raw triggers into contexts.
///
/// Returning `None` means the trigger is not a deep link this app
/// understands. Closures of type `Fn(&Url) -> Option<DeepLinkContext>`
/// implement this trait for URL-only parsers.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use waypoint_core::{ContextParser, DeepLinkContext};
///
/// let parser = |url: &Url| match url.host_str() {
///     Some("video") => Some(DeepLinkContext::Video),
///     _ => None,
/// };
///
/// assert_eq!(parser.parse_str("myapp://video").unwrap(), DeepLinkContext::Video);
/// assert!(parser.parse_str("myapp://nowhere").is_err());
/// ```
pub trait ContextParser: Send + Sync {
	/// Parses an OS-delivered custom-scheme or universal-link URL.
	fn parse_url(&self, url: &Url) -> Option<DeepLinkContext>;

	/// Parses an attribution callback payload.
	///
	/// The default implementation looks for a `deep_link_value` or `url`
	/// string and routes it through [`parse_url`](Self::parse_url).
	fn parse_attribution(&self, payload: &AttributionPayload) -> Option<DeepLinkContext> {
		["deep_link_value", "url"]
			.iter()
			.filter_map(|key| payload.get(*key).and_then(Value::as_str))
			.find_map(|raw| Url::parse(raw).ok())
			.and_then(|url| self.parse_url(&url))
	}

	/// Parses a raw link string.
	///
	/// # Errors
	///
	/// Returns [`DeeplinkError::InvalidUrl`] if `raw` is not a URL and
	/// [`DeeplinkError::Unrecognized`] if the parser rejects it.
	fn parse_str(&self, raw: &str) -> DeeplinkResult<DeepLinkContext> {
		let url = Url::parse(raw).map_err(|source| DeeplinkError::InvalidUrl {
			raw: raw.to_string(),
			source,
		})?;
		self.parse_url(&url)
			.ok_or_else(|| DeeplinkError::Unrecognized(raw.to_string()))
	}
}

impl<F> ContextParser for F
where
	F: Fn(&Url) -> Option<DeepLinkContext> + Send + Sync,
{
	fn parse_url(&self, url: &Url) -> Option<DeepLinkContext> {
		self(url)
	}
}

/// Resolves the URL carried by a push-notification payload.
///
/// A nested `data.url` string wins over a top-level `url` string. Strings
/// that are not valid URLs are treated as absent.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use waypoint_core::resolve_push_url;
///
/// let payload = json!({ "aps": {}, "data": { "url": "myapp://video" } });
/// assert_eq!(resolve_push_url(&payload).unwrap().as_str(), "myapp://video");
/// ```
pub fn resolve_push_url(payload: &Value) -> Option<Url> {
	let nested = payload
		.get("data")
		.and_then(|data| data.get("url"))
		.and_then(Value::as_str);
	let top_level = payload.get("url").and_then(Value::as_str);

	nested
		.into_iter()
		.chain(top_level)
		.find_map(|raw| match Url::parse(raw) {
			Ok(url) => Some(url),
			Err(err) => {
				tracing::debug!(raw, error = %err, "ignoring malformed push url");
				None
			}
		})
}
