//! The per-call route state machine.
//!
//! ```text
//! Idle → Resetting → Presenting → [Revealing] → Idle
//! ```

use std::fmt;
use waypoint_core::ContextKind;

/// Phase of a single `route()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteState {
	Idle,
	Resetting,
	Presenting,
	Revealing,
}

impl RouteState {
	/// Returns true if `next` may follow `self`.
	pub fn can_advance_to(self, next: RouteState) -> bool {
		matches!(
			(self, next),
			(Self::Idle, Self::Resetting)
				| (Self::Resetting, Self::Presenting)
				| (Self::Presenting, Self::Revealing)
				| (Self::Presenting, Self::Idle)
				| (Self::Revealing, Self::Idle)
		)
	}
}

impl fmt::Display for RouteState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Idle => "idle",
			Self::Resetting => "resetting",
			Self::Presenting => "presenting",
			Self::Revealing => "revealing",
		})
	}
}

/// Observer of route phase transitions.
pub trait PhaseListener {
	fn on_phase(&self, kind: ContextKind, state: RouteState);
}

impl<F> PhaseListener for F
where
	F: Fn(ContextKind, RouteState),
{
	fn on_phase(&self, kind: ContextKind, state: RouteState) {
		self(kind, state)
	}
}

/// Tracks one pass through the state machine and reports each transition.
pub(crate) struct RouteCycle<'a> {
	kind: ContextKind,
	state: RouteState,
	listener: Option<&'a dyn PhaseListener>,
}

impl<'a> RouteCycle<'a> {
	pub(crate) fn new(kind: ContextKind, listener: Option<&'a dyn PhaseListener>) -> Self {
		Self {
			kind,
			state: RouteState::Idle,
			listener,
		}
	}

	#[cfg(test)]
	pub(crate) fn state(&self) -> RouteState {
		self.state
	}

	pub(crate) fn advance(&mut self, next: RouteState) {
		if !self.state.can_advance_to(next) {
			debug_assert!(false, "illegal route transition {} -> {}", self.state, next);
			tracing::error!(
				context = %self.kind,
				from = %self.state,
				to = %next,
				"illegal route transition"
			);
			return;
		}
		tracing::trace!(context = %self.kind, from = %self.state, to = %next, "route phase");
		self.state = next;
		if let Some(listener) = self.listener {
			listener.on_phase(self.kind, next);
		}
	}

	/// Returns to `Idle`.
	pub(crate) fn finish(mut self) {
		self.advance(RouteState::Idle);
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;
	use std::cell::RefCell;

	use super::*;

	#[rstest]
	#[case(RouteState::Idle, RouteState::Resetting, true)]
	#[case(RouteState::Resetting, RouteState::Presenting, true)]
	#[case(RouteState::Presenting, RouteState::Revealing, true)]
	#[case(RouteState::Presenting, RouteState::Idle, true)]
	#[case(RouteState::Revealing, RouteState::Idle, true)]
	#[case(RouteState::Idle, RouteState::Presenting, false)]
	#[case(RouteState::Resetting, RouteState::Idle, false)]
	#[case(RouteState::Revealing, RouteState::Presenting, false)]
	#[case(RouteState::Idle, RouteState::Idle, false)]
	fn test_transitions(#[case] from: RouteState, #[case] to: RouteState, #[case] allowed: bool) {
		assert_eq!(from.can_advance_to(to), allowed);
	}

	#[rstest]
	fn test_cycle_reports_every_phase() {
		let seen = RefCell::new(Vec::new());
		let listener = |kind: ContextKind, state: RouteState| seen.borrow_mut().push((kind, state));

		let mut cycle = RouteCycle::new(ContextKind::LoyaltyCard, Some(&listener));
		cycle.advance(RouteState::Resetting);
		cycle.advance(RouteState::Presenting);
		cycle.advance(RouteState::Revealing);
		assert_eq!(cycle.state(), RouteState::Revealing);
		cycle.finish();

		assert_eq!(
			seen.into_inner(),
			vec![
				(ContextKind::LoyaltyCard, RouteState::Resetting),
				(ContextKind::LoyaltyCard, RouteState::Presenting),
				(ContextKind::LoyaltyCard, RouteState::Revealing),
				(ContextKind::LoyaltyCard, RouteState::Idle),
			]
		);
	}
}
