//! Latched publish/subscribe signals.
//!
//! Deep-link routing emits signals whose subscriber may not exist yet: the
//! video player view is created after the hierarchy is reset, and a profile
//! sub-section only exists once the profile has loaded. A [`LatchedSignal`]
//! delivers to connected receivers immediately and otherwise keeps the most
//! recent value until someone consumes it.

use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Notify;

use crate::navigation::PlaybackRequest;

/// Signal carrying "start video playback".
pub type PlaybackSignal = LatchedSignal<PlaybackRequest>;

type ReceiverFn<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// What happened to an emitted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
	/// Delivered synchronously to this many connected receivers.
	Delivered(usize),
	/// No receiver was connected; the value waits to be taken.
	Latched,
}

struct SignalInner<T> {
	name: &'static str,
	latched: Mutex<Option<T>>,
	receivers: RwLock<Vec<ReceiverFn<T>>>,
	notify: Notify,
}

/// A signal that keeps its last undelivered value.
///
/// Cloning shares the same signal.
///
/// # Examples
///
/// ```
/// use waypoint_core::{Emission, LatchedSignal};
///
/// let signal = LatchedSignal::<u32>::new("counter");
/// assert_eq!(signal.emit(1), Emission::Latched);
/// assert_eq!(signal.emit(2), Emission::Latched);
///
/// // Last write wins
/// assert_eq!(signal.take(), Some(2));
/// assert_eq!(signal.take(), None);
/// ```
pub struct LatchedSignal<T> {
	inner: Arc<SignalInner<T>>,
}

impl<T> Clone for LatchedSignal<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<T> fmt::Debug for LatchedSignal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LatchedSignal")
			.field("name", &self.inner.name)
			.field("receivers", &self.inner.receivers.read().len())
			.field("latched", &self.inner.latched.lock().is_some())
			.finish()
	}
}

impl<T: Send + Sync + 'static> LatchedSignal<T> {
	/// Creates a signal with no receivers and nothing latched.
	pub fn new(name: &'static str) -> Self {
		Self {
			inner: Arc::new(SignalInner {
				name,
				latched: Mutex::new(None),
				receivers: RwLock::new(Vec::new()),
				notify: Notify::new(),
			}),
		}
	}

	pub fn name(&self) -> &'static str {
		self.inner.name
	}

	/// Connects a receiver. Receivers are called in connection order on the
	/// emitting thread.
	///
	/// A value latched before the first receiver connects is delivered to it
	/// right away.
	pub fn connect<F>(&self, receiver: F)
	where
		F: Fn(&T) + Send + Sync + 'static,
	{
		let receiver: ReceiverFn<T> = Arc::new(receiver);

		// Lock order: latched, then receivers
		let pending = {
			let mut latched = self.inner.latched.lock();
			self.inner.receivers.write().push(Arc::clone(&receiver));
			latched.take()
		};
		if let Some(value) = pending {
			tracing::debug!(signal = self.inner.name, "delivering latched value to new receiver");
			receiver(&value);
		}
	}

	/// Disconnects every receiver.
	pub fn disconnect_all(&self) {
		self.inner.receivers.write().clear();
	}

	/// Emits a value.
	pub fn emit(&self, value: T) -> Emission {
		// Receivers run on a snapshot, outside both locks
		let receivers: Vec<ReceiverFn<T>> = {
			let mut latched = self.inner.latched.lock();
			let receivers = self.inner.receivers.read().clone();
			if receivers.is_empty() {
				let replaced = latched.replace(value).is_some();
				drop(latched);
				tracing::trace!(signal = self.inner.name, replaced, "signal latched");
				self.inner.notify.notify_one();
				return Emission::Latched;
			}
			receivers
		};

		for receiver in &receivers {
			receiver(&value);
		}
		tracing::trace!(
			signal = self.inner.name,
			receivers = receivers.len(),
			"signal delivered"
		);
		Emission::Delivered(receivers.len())
	}

	/// Takes the latched value, if any.
	pub fn take(&self) -> Option<T> {
		self.inner.latched.lock().take()
	}

	/// Returns true if a value is waiting to be taken.
	pub fn is_latched(&self) -> bool {
		self.inner.latched.lock().is_some()
	}

	/// Waits for a latched value and takes it.
	pub async fn wait(&self) -> T {
		loop {
			if let Some(value) = self.take() {
				return value;
			}
			self.inner.notify.notified().await;
		}
	}
}

impl<T: Clone + Send + Sync + 'static> LatchedSignal<T> {
	/// Returns a copy of the latched value without consuming it.
	pub fn peek(&self) -> Option<T> {
		self.inner.latched.lock().clone()
	}
}
