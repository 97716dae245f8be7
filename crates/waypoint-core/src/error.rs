//! Error types for deep-link parsing and dispatch.

use thiserror::Error;

/// Errors that can occur while turning triggers into routed contexts.
///
/// None of these reach the originating callback: the intake logs them and
/// degrades to "no navigation change".
#[derive(Debug, Error)]
pub enum DeeplinkError {
	/// The raw link is not a valid URL.
	#[error("invalid deep link URL {raw}: {source}")]
	InvalidUrl {
		raw: String,
		#[source]
		source: url::ParseError,
	},

	/// The parser did not recognize the link.
	#[error("unrecognized deep link: {0}")]
	Unrecognized(String),

	/// A push payload carried neither `data.url` nor `url`.
	#[error("push payload carries no url")]
	MissingPushUrl,

	/// Unknown navigation mode name.
	#[error("unknown navigation mode: {0}. Expected `tabbed` or `home_screen`")]
	UnknownMode(String),

	/// The UI-thread dispatcher was dropped.
	#[error("deep link dispatcher is no longer running")]
	DispatcherClosed,
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	fn test_invalid_url_keeps_source() {
		let source = url::Url::parse("not a url").unwrap_err();
		let err = DeeplinkError::InvalidUrl {
			raw: "not a url".to_string(),
			source,
		};

		assert!(err.to_string().starts_with("invalid deep link URL not a url"));
		assert!(std::error::Error::source(&err).is_some());
	}
}
