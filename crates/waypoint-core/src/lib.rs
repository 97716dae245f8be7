//! Core vocabulary for Waypoint deep-link routing.
//!
//! This crate holds the types every other Waypoint crate speaks:
//!
//! - **[`DeepLinkContext`]**: the closed set of navigation intents an external
//!   trigger can produce (attribution callback, custom-scheme open, push tap)
//! - **Navigation vocabulary**: [`Tab`], [`Destination`], [`OverlayKind`],
//!   [`RevealSection`] and the [`NavigationMode`] a shell runs in
//! - **[`LatchedSignal`]**: publish/subscribe for signals whose subscriber may
//!   not exist yet at emission time (video playback, post-load reveal)
//! - **[`ContextParser`]**: the seam through which raw URLs and attribution
//!   payloads become contexts
//!
//! # Quick Start
//!
//! ```rust
//! use waypoint_core::{ContextKind, DeepLinkContext};
//!
//! let context = DeepLinkContext::restaurant("7", Some("newsletter"));
//! assert_eq!(context.kind(), ContextKind::Restaurant);
//! assert_eq!(context.to_string(), "restaurant(7)");
//! ```

pub mod context;
pub mod error;
pub mod navigation;
pub mod parser;
pub mod signals;

// Re-export main types for convenience
pub use context::{ChatChannel, ContextKind, DeepLinkContext};
pub use error::DeeplinkError;
pub use navigation::{
	Destination, NavigationMode, OverlayKind, PlaybackRequest, Presentation, RevealSection, Tab,
	TabAliases,
};
pub use parser::{AttributionPayload, ContextParser, resolve_push_url};
pub use signals::{Emission, LatchedSignal, PlaybackSignal};

/// Result type for deep-link operations.
pub type DeeplinkResult<T> = Result<T, DeeplinkError>;
