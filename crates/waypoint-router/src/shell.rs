//! The navigation surface a router drives.
//!
//! A [`NavigationShell`] is implemented by the host for each UI shell variant.
//! All methods are called on the UI thread, so implementations may hold
//! thread-affine UI handles.

use async_trait::async_trait;
use std::fmt;
use std::rc::Rc;
use waypoint_core::{
	Destination, Emission, LatchedSignal, PlaybackSignal, Presentation, RevealSection, Tab,
};

use crate::presentation::{OverlayContent, OverlayRequest, PresentationManager};

/// Optional capability of the profile destination: routing to a booking.
pub trait BookingRoutable {
	fn route_to_booking(&self, id: &str);
}

/// Primitive navigation operations of a mounted shell.
#[async_trait(?Send)]
pub trait NavigationShell {
	/// Pops every navigation stack back to its root.
	async fn unwind_to_root(&self);

	/// Dismisses modal presentations. Overlays are dismissed separately
	/// through [`presentations`](Self::presentations).
	async fn dismiss_modals(&self);

	/// Selects a tab. Shells without a tab bar return `None`.
	async fn select_tab(&self, _tab: Tab) -> Option<PresentedDestination> {
		None
	}

	/// Pushes or presents a destination on top of the current root.
	async fn show(&self, destination: Destination, style: Presentation) -> PresentedDestination;

	/// The overlay groups of this shell.
	fn presentations(&self) -> &PresentationManager;

	/// Builds the content of an event or restaurant overlay.
	fn overlay_content(&self, request: &OverlayRequest) -> Rc<dyn OverlayContent>;

	/// Booking routing, when the mounted profile destination supports it.
	fn booking_routing(&self) -> Option<Rc<dyn BookingRoutable>> {
		None
	}

	/// Signal consumed by the video player once it exists.
	fn playback(&self) -> &PlaybackSignal;
}

/// Handle to a destination that was just selected, pushed or presented.
///
/// The router uses it to ask for a sub-section to be revealed once the
/// destination has finished loading; the destination side holds the paired
/// [`RevealReceiver`].
pub struct PresentedDestination {
	destination: Destination,
	reveal: LatchedSignal<RevealSection>,
}

impl PresentedDestination {
	/// Creates a handle and the receiver the destination keeps.
	pub fn new(destination: Destination) -> (Self, RevealReceiver) {
		let reveal = LatchedSignal::new("reveal_section");
		let receiver = RevealReceiver {
			signal: reveal.clone(),
		};
		(
			Self {
				destination,
				reveal,
			},
			receiver,
		)
	}

	/// Creates a handle whose reveal requests nobody will consume.
	pub fn detached(destination: Destination) -> Self {
		Self::new(destination).0
	}

	pub fn destination(&self) -> &Destination {
		&self.destination
	}

	/// Asks the destination to reveal `section` once loaded. Does not wait for
	/// the destination to consume the request.
	pub fn reveal_on_load(&self, section: RevealSection) -> Emission {
		self.reveal.emit(section)
	}
}

impl fmt::Debug for PresentedDestination {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PresentedDestination")
			.field("destination", &self.destination)
			.finish_non_exhaustive()
	}
}

/// Destination-side end of a reveal request.
#[derive(Debug, Clone)]
pub struct RevealReceiver {
	signal: LatchedSignal<RevealSection>,
}

impl RevealReceiver {
	/// Takes the pending reveal request. Called by the destination when it has
	/// finished loading.
	pub fn take_when_loaded(&self) -> Option<RevealSection> {
		self.signal.take()
	}

	/// Waits until a reveal is requested.
	pub async fn requested(&self) -> RevealSection {
		self.signal.wait().await
	}

	/// Delivers future reveal requests straight to `f`, for destinations
	/// that are already loaded.
	pub fn on_reveal<F>(&self, f: F)
	where
		F: Fn(RevealSection) + Send + Sync + 'static,
	{
		self.signal.connect(move |section| f(*section));
	}
}
