//! Test doubles for routing: a shell that records what routers do to it.
//!
//! Available under `cfg(test)` and the `testing` feature.

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use waypoint_core::{
	ContextKind, Destination, PlaybackSignal, Presentation, RevealSection, Tab,
};

use crate::presentation::{
	DismissHandle, OverlayContent, OverlayRequest, PresentationManager, ScrollTarget,
};
use crate::shell::{BookingRoutable, NavigationShell, PresentedDestination, RevealReceiver};
use crate::state::{PhaseListener, RouteState};

/// A primitive navigation call observed by [`RecordingShell`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOp {
	UnwindToRoot,
	DismissModals,
	SelectTab(Tab),
	Show(Destination, Presentation),
	BookingRouted(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
	Phase(ContextKind, RouteState),
	Op(ShellOp),
}

/// Shared, ordered log of phases and shell operations.
#[derive(Debug, Clone, Default)]
pub struct Journal {
	entries: Rc<RefCell<Vec<Entry>>>,
}

impl Journal {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn record(&self, entry: Entry) {
		self.entries.borrow_mut().push(entry);
	}

	pub fn entries(&self) -> Vec<Entry> {
		self.entries.borrow().clone()
	}

	pub fn ops(&self) -> Vec<ShellOp> {
		self.entries
			.borrow()
			.iter()
			.filter_map(|entry| match entry {
				Entry::Op(op) => Some(op.clone()),
				Entry::Phase(..) => None,
			})
			.collect()
	}

	pub fn phases(&self) -> Vec<(ContextKind, RouteState)> {
		self.entries
			.borrow()
			.iter()
			.filter_map(|entry| match entry {
				Entry::Phase(kind, state) => Some((*kind, *state)),
				Entry::Op(_) => None,
			})
			.collect()
	}

	/// Context kinds in the order their route calls started.
	pub fn routed(&self) -> Vec<ContextKind> {
		self.phases()
			.into_iter()
			.filter(|(_, state)| *state == RouteState::Resetting)
			.map(|(kind, _)| kind)
			.collect()
	}

	pub fn clear(&self) {
		self.entries.borrow_mut().clear();
	}
}

impl PhaseListener for Journal {
	fn on_phase(&self, kind: ContextKind, state: RouteState) {
		self.record(Entry::Phase(kind, state));
	}
}

/// Booking capability that records the ids it is asked to route to.
#[derive(Debug)]
pub struct RecordingBookings {
	journal: Journal,
}

impl BookingRoutable for RecordingBookings {
	fn route_to_booking(&self, id: &str) {
		self.journal.record(Entry::Op(ShellOp::BookingRouted(id.to_string())));
	}
}

/// Overlay content created by [`RecordingShell`].
#[derive(Debug)]
pub struct RecordingOverlay {
	request: OverlayRequest,
	handle: RefCell<Option<DismissHandle>>,
	dismissed: Cell<bool>,
}

impl RecordingOverlay {
	pub fn request(&self) -> &OverlayRequest {
		&self.request
	}

	pub fn dismiss_handle(&self) -> Option<DismissHandle> {
		self.handle.borrow().clone()
	}

	pub fn is_dismissed(&self) -> bool {
		self.dismissed.get()
	}
}

impl OverlayContent for RecordingOverlay {
	fn scroll_target(&self) -> Option<ScrollTarget> {
		Some(ScrollTarget::new(format!(
			"{}-{}-scroll",
			self.request.kind, self.request.id
		)))
	}

	fn attach_dismiss(&self, handle: DismissHandle) {
		*self.handle.borrow_mut() = Some(handle);
	}

	fn did_dismiss(&self) {
		self.dismissed.set(true);
	}
}

/// A [`NavigationShell`] that records every call into a [`Journal`].
///
/// Each async operation yields once to the runtime, the way a real
/// transition would, so interleaving bugs surface in tests.
pub struct RecordingShell {
	journal: Journal,
	tab_bar: bool,
	bookings: Option<Rc<RecordingBookings>>,
	presentations: PresentationManager,
	playback: PlaybackSignal,
	reveals: RefCell<Vec<RevealReceiver>>,
	overlays: RefCell<Vec<Rc<RecordingOverlay>>>,
}

impl RecordingShell {
	fn build(journal: Journal, tab_bar: bool) -> Self {
		Self {
			journal,
			tab_bar,
			bookings: None,
			presentations: PresentationManager::new(),
			playback: PlaybackSignal::new("video_playback"),
			reveals: RefCell::new(Vec::new()),
			overlays: RefCell::new(Vec::new()),
		}
	}

	/// A shell with a tab bar.
	pub fn tabbed(journal: Journal) -> Self {
		Self::build(journal, true)
	}

	/// A single-stack shell without a tab bar.
	pub fn home_screen(journal: Journal) -> Self {
		Self::build(journal, false)
	}

	/// Makes the profile destination routable by booking id.
	pub fn with_booking_routing(mut self) -> Self {
		self.bookings = Some(Rc::new(RecordingBookings {
			journal: self.journal.clone(),
		}));
		self
	}

	pub fn journal(&self) -> &Journal {
		&self.journal
	}

	/// Receiver of the most recently presented destination.
	pub fn last_reveal(&self) -> Option<RevealReceiver> {
		self.reveals.borrow().last().cloned()
	}

	pub fn overlays(&self) -> Vec<Rc<RecordingOverlay>> {
		self.overlays.borrow().clone()
	}

	fn presented(&self, destination: Destination) -> PresentedDestination {
		let (handle, receiver) = PresentedDestination::new(destination);
		self.reveals.borrow_mut().push(receiver);
		handle
	}

	fn op(&self, op: ShellOp) {
		self.journal.record(Entry::Op(op));
	}
}

#[async_trait(?Send)]
impl NavigationShell for RecordingShell {
	async fn unwind_to_root(&self) {
		self.op(ShellOp::UnwindToRoot);
		tokio::task::yield_now().await;
	}

	async fn dismiss_modals(&self) {
		self.op(ShellOp::DismissModals);
		tokio::task::yield_now().await;
	}

	async fn select_tab(&self, tab: Tab) -> Option<PresentedDestination> {
		if !self.tab_bar {
			return None;
		}
		self.op(ShellOp::SelectTab(tab));
		tokio::task::yield_now().await;
		Some(self.presented(Destination::for_tab(tab)))
	}

	async fn show(&self, destination: Destination, style: Presentation) -> PresentedDestination {
		self.op(ShellOp::Show(destination.clone(), style));
		tokio::task::yield_now().await;
		self.presented(destination)
	}

	fn presentations(&self) -> &PresentationManager {
		&self.presentations
	}

	fn overlay_content(&self, request: &OverlayRequest) -> Rc<dyn OverlayContent> {
		let overlay = Rc::new(RecordingOverlay {
			request: request.clone(),
			handle: RefCell::new(None),
			dismissed: Cell::new(false),
		});
		self.overlays.borrow_mut().push(Rc::clone(&overlay));
		overlay
	}

	fn booking_routing(&self) -> Option<Rc<dyn BookingRoutable>> {
		self.bookings
			.as_ref()
			.map(|bookings| Rc::clone(bookings) as Rc<dyn BookingRoutable>)
	}

	fn playback(&self) -> &PlaybackSignal {
		&self.playback
	}
}

/// Reveal section requested of the most recently presented destination.
pub fn pending_reveal(shell: &RecordingShell) -> Option<RevealSection> {
	shell.last_reveal().and_then(|receiver| receiver.take_when_loaded())
}
