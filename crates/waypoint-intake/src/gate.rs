//! Activation gating with a single deferred slot.

use parking_lot::Mutex;
use std::fmt;
use waypoint_core::DeepLinkContext;

/// Whether the app is in the foreground and interactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActivationState {
	Active,
	#[default]
	Inactive,
}

impl fmt::Display for ActivationState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Active => "active",
			Self::Inactive => "inactive",
		})
	}
}

/// What the gate did with an admitted context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
	/// The gate was active; the context was handed on.
	RunNow,
	/// The gate was inactive; the context now occupies the pending slot.
	Deferred {
		/// A previously pending context was discarded.
		replaced: bool,
	},
}

#[derive(Debug, Default)]
struct GateState {
	activation: ActivationState,
	pending: Option<DeepLinkContext>,
}

/// Tracks activation and holds at most one deferred context.
///
/// Activation state and the pending slot share one lock, so a submission can
/// never observe "inactive" after activation has already drained the slot.
/// Hand-off callbacks run while that lock is held and must not block or
/// call back into the gate.
#[derive(Debug, Default)]
pub struct ActivationGate {
	state: Mutex<GateState>,
}

impl ActivationGate {
	/// Creates an inactive gate.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_state(activation: ActivationState) -> Self {
		Self {
			state: Mutex::new(GateState {
				activation,
				pending: None,
			}),
		}
	}

	pub fn state(&self) -> ActivationState {
		self.state.lock().activation
	}

	pub fn has_pending(&self) -> bool {
		self.state.lock().pending.is_some()
	}

	/// Admits a context: calls `run_now` with it when active, otherwise
	/// stores it in the pending slot, discarding what was there.
	pub fn admit<F>(&self, context: DeepLinkContext, run_now: F) -> GateDecision
	where
		F: FnOnce(DeepLinkContext),
	{
		let mut state = self.state.lock();
		match state.activation {
			ActivationState::Active => {
				run_now(context);
				GateDecision::RunNow
			}
			ActivationState::Inactive => {
				let replaced = state.pending.replace(context);
				if let Some(previous) = &replaced {
					tracing::debug!(discarded = %previous, "pending deep link replaced");
				}
				GateDecision::Deferred {
					replaced: replaced.is_some(),
				}
			}
		}
	}

	/// Marks the app active. On an `Inactive → Active` transition the pending
	/// context, if any, is taken and passed to `on_pending` exactly once.
	///
	/// Returns true if a pending context was handed off.
	pub fn activate<F>(&self, on_pending: F) -> bool
	where
		F: FnOnce(DeepLinkContext),
	{
		let mut state = self.state.lock();
		if state.activation == ActivationState::Active {
			return false;
		}
		state.activation = ActivationState::Active;
		match state.pending.take() {
			Some(context) => {
				tracing::debug!(context = %context, "replaying deferred deep link");
				on_pending(context);
				true
			}
			None => false,
		}
	}

	/// Marks the app inactive. Work already handed on keeps running.
	pub fn deactivate(&self) {
		self.state.lock().activation = ActivationState::Inactive;
	}
}
