//! Floating overlay presentation.
//!
//! Overlays are grouped by [`OverlayKind`]; each group shows at most one
//! overlay. Presenting into an occupied group replaces what was there.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use waypoint_core::{DeepLinkContext, OverlayKind};

/// What an overlay shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OverlayRequest {
	pub kind: OverlayKind,
	pub id: String,
	pub source: Option<String>,
}

impl OverlayRequest {
	pub fn new(kind: OverlayKind, id: impl Into<String>, source: Option<String>) -> Self {
		Self {
			kind,
			id: id.into(),
			source,
		}
	}

	/// Builds the overlay request for `event` and `restaurant` contexts.
	pub fn from_context(context: &DeepLinkContext) -> Option<Self> {
		match context {
			DeepLinkContext::Event { id, source } => {
				Some(Self::new(OverlayKind::Event, id.clone(), source.clone()))
			}
			DeepLinkContext::Restaurant { id, source } => {
				Some(Self::new(OverlayKind::Restaurant, id.clone(), source.clone()))
			}
			_ => None,
		}
	}
}

/// Identifies the scrollable view inside an overlay so the presentation
/// manager can coordinate its pan gesture with the content's scrolling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScrollTarget(String);

impl ScrollTarget {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

/// Content hosted in an overlay.
pub trait OverlayContent {
	/// The scroll view to track, if the content scrolls.
	fn scroll_target(&self) -> Option<ScrollTarget> {
		None
	}

	/// Receives the handle the content uses to close its own overlay.
	fn attach_dismiss(&self, handle: DismissHandle);

	/// Called after the overlay was dismissed or replaced.
	fn did_dismiss(&self) {}
}

struct PresentedOverlay {
	token: u64,
	request: OverlayRequest,
	content: Rc<dyn OverlayContent>,
	scroll: Option<ScrollTarget>,
}

#[derive(Default)]
struct ManagerState {
	groups: RefCell<HashMap<OverlayKind, PresentedOverlay>>,
	next_token: Cell<u64>,
}

impl ManagerState {
	fn remove_if(&self, kind: OverlayKind, token: Option<u64>) -> Option<Rc<dyn OverlayContent>> {
		let mut groups = self.groups.borrow_mut();
		let matches = groups
			.get(&kind)
			.is_some_and(|overlay| token.is_none_or(|t| overlay.token == t));
		if matches {
			groups.remove(&kind).map(|overlay| overlay.content)
		} else {
			None
		}
	}
}

/// Keyed overlay groups of a shell.
///
/// Cheap to clone; clones share the same groups.
#[derive(Clone, Default)]
pub struct PresentationManager {
	state: Rc<ManagerState>,
}

impl fmt::Debug for PresentationManager {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PresentationManager")
			.field(
				"presented",
				&self.state.groups.borrow().keys().collect::<Vec<_>>(),
			)
			.finish()
	}
}

impl PresentationManager {
	pub fn new() -> Self {
		Self::default()
	}

	/// Presents `content` in the group of `request.kind`.
	///
	/// Binds the content's scroll target for gesture coordination and hands it
	/// a [`DismissHandle`]. Returns the content that was replaced, if any.
	pub fn present(
		&self,
		request: OverlayRequest,
		content: Rc<dyn OverlayContent>,
	) -> Option<Rc<dyn OverlayContent>> {
		let token = self.state.next_token.get() + 1;
		self.state.next_token.set(token);

		let kind = request.kind;
		let scroll = content.scroll_target();
		tracing::debug!(
			overlay = %kind,
			id = %request.id,
			scroll = ?scroll.as_ref().map(ScrollTarget::as_str),
			"presenting overlay"
		);

		let replaced = self.state.groups.borrow_mut().insert(
			kind,
			PresentedOverlay {
				token,
				request,
				content: Rc::clone(&content),
				scroll,
			},
		);

		content.attach_dismiss(DismissHandle {
			state: Rc::downgrade(&self.state),
			kind,
			token,
		});

		replaced.map(|overlay| {
			overlay.content.did_dismiss();
			overlay.content
		})
	}

	/// Dismisses the overlay of `kind`. Returns true if one was shown.
	pub fn dismiss(&self, kind: OverlayKind) -> bool {
		match self.state.remove_if(kind, None) {
			Some(content) => {
				content.did_dismiss();
				true
			}
			None => false,
		}
	}

	/// Dismisses every overlay and returns how many were shown.
	pub fn dismiss_all(&self) -> usize {
		let drained: Vec<PresentedOverlay> = self
			.state
			.groups
			.borrow_mut()
			.drain()
			.map(|(_, overlay)| overlay)
			.collect();
		for overlay in &drained {
			overlay.content.did_dismiss();
		}
		drained.len()
	}

	pub fn is_presented(&self, kind: OverlayKind) -> bool {
		self.state.groups.borrow().contains_key(&kind)
	}

	/// The request currently shown in the group of `kind`.
	pub fn presented(&self, kind: OverlayKind) -> Option<OverlayRequest> {
		self.state
			.groups
			.borrow()
			.get(&kind)
			.map(|overlay| overlay.request.clone())
	}

	/// The scroll view bound to the overlay of `kind`.
	pub fn scroll_target(&self, kind: OverlayKind) -> Option<ScrollTarget> {
		self.state
			.groups
			.borrow()
			.get(&kind)
			.and_then(|overlay| overlay.scroll.clone())
	}

	pub fn len(&self) -> usize {
		self.state.groups.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Back-reference from overlay content to the group that shows it.
///
/// Only closes the overlay it was issued for: once that overlay is replaced
/// or the manager is gone, [`dismiss`](Self::dismiss) does nothing.
#[derive(Clone)]
pub struct DismissHandle {
	state: Weak<ManagerState>,
	kind: OverlayKind,
	token: u64,
}

impl DismissHandle {
	pub fn kind(&self) -> OverlayKind {
		self.kind
	}

	/// Closes the overlay. Returns true if it was still shown.
	pub fn dismiss(&self) -> bool {
		let Some(state) = self.state.upgrade() else {
			return false;
		};
		match state.remove_if(self.kind, Some(self.token)) {
			Some(content) => {
				content.did_dismiss();
				true
			}
			None => false,
		}
	}
}

impl fmt::Debug for DismissHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DismissHandle")
			.field("kind", &self.kind)
			.field("token", &self.token)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[derive(Default)]
	struct Card {
		scroll: Option<&'static str>,
		handle: RefCell<Option<DismissHandle>>,
		dismissed: Cell<usize>,
	}

	impl OverlayContent for Card {
		fn scroll_target(&self) -> Option<ScrollTarget> {
			self.scroll.map(ScrollTarget::new)
		}

		fn attach_dismiss(&self, handle: DismissHandle) {
			*self.handle.borrow_mut() = Some(handle);
		}

		fn did_dismiss(&self) {
			self.dismissed.set(self.dismissed.get() + 1);
		}
	}

	fn request(kind: OverlayKind, id: &str) -> OverlayRequest {
		OverlayRequest::new(kind, id, None)
	}

	#[rstest]
	fn test_present_binds_scroll_and_dismiss_handle() {
		let manager = PresentationManager::new();
		let card = Rc::new(Card {
			scroll: Some("event-detail-scroll"),
			..Default::default()
		});

		let replaced = manager.present(request(OverlayKind::Event, "42"), card.clone());

		assert!(replaced.is_none());
		assert_eq!(
			manager.scroll_target(OverlayKind::Event),
			Some(ScrollTarget::new("event-detail-scroll"))
		);
		assert_eq!(card.handle.borrow().as_ref().map(DismissHandle::kind), Some(OverlayKind::Event));
	}

	#[rstest]
	fn test_one_overlay_per_group() {
		let manager = PresentationManager::new();
		let first = Rc::new(Card::default());
		let second = Rc::new(Card::default());
		let restaurant = Rc::new(Card::default());

		manager.present(request(OverlayKind::Event, "1"), first.clone());
		manager.present(request(OverlayKind::Restaurant, "7"), restaurant.clone());
		let replaced = manager.present(request(OverlayKind::Event, "2"), second.clone());

		assert!(replaced.is_some());
		assert_eq!(first.dismissed.get(), 1);
		assert_eq!(manager.len(), 2);
		assert_eq!(manager.presented(OverlayKind::Event).unwrap().id, "2");
		assert_eq!(manager.presented(OverlayKind::Restaurant).unwrap().id, "7");
	}

	#[rstest]
	fn test_stale_dismiss_handle_is_noop() {
		let manager = PresentationManager::new();
		let first = Rc::new(Card::default());
		let second = Rc::new(Card::default());

		manager.present(request(OverlayKind::Event, "1"), first.clone());
		manager.present(request(OverlayKind::Event, "2"), second.clone());

		let stale = first.handle.borrow().clone().unwrap();
		assert!(!stale.dismiss());
		assert!(manager.is_presented(OverlayKind::Event));

		let live = second.handle.borrow().clone().unwrap();
		assert!(live.dismiss());
		assert!(!live.dismiss());
		assert!(manager.is_empty());
		assert_eq!(second.dismissed.get(), 1);
	}

	#[rstest]
	fn test_dismiss_all() {
		let manager = PresentationManager::new();
		let event = Rc::new(Card::default());
		let restaurant = Rc::new(Card::default());
		manager.present(request(OverlayKind::Event, "1"), event.clone());
		manager.present(request(OverlayKind::Restaurant, "2"), restaurant.clone());

		assert_eq!(manager.dismiss_all(), 2);
		assert_eq!(manager.dismiss_all(), 0);
		assert_eq!(event.dismissed.get(), 1);
		assert_eq!(restaurant.dismissed.get(), 1);
		assert!(!manager.dismiss(OverlayKind::Event));
	}

	#[rstest]
	fn test_handle_outliving_manager() {
		let card = Rc::new(Card::default());
		{
			let manager = PresentationManager::new();
			manager.present(request(OverlayKind::Restaurant, "7"), card.clone());
		}

		let handle = card.handle.borrow().clone().unwrap();
		assert!(!handle.dismiss());
	}

	#[rstest]
	fn test_request_from_context() {
		let request = OverlayRequest::from_context(&DeepLinkContext::restaurant("7", Some("push"))).unwrap();
		assert_eq!(request.kind, OverlayKind::Restaurant);
		assert_eq!(request.source.as_deref(), Some("push"));

		assert!(OverlayRequest::from_context(&DeepLinkContext::Video).is_none());
	}
}
