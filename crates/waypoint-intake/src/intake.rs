//! The thread-safe entry point for deep-link triggers.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use url::Url;
use waypoint_core::{
	AttributionPayload, ContextParser, DeepLinkContext, DeeplinkError, resolve_push_url,
};

use crate::dispatcher::{Dispatcher, Job};
use crate::gate::{ActivationGate, ActivationState, GateDecision};
use crate::serializer::DispatchSerializer;

/// What happened to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
	/// Queued for the UI thread.
	Dispatched,
	/// Stored until activation.
	Deferred {
		/// A previously deferred context was discarded.
		replaced: bool,
	},
	/// Nothing to route: the trigger did not yield a context.
	Ignored,
	/// The dispatcher is gone; the context was dropped.
	Dropped,
}

struct IntakeInner {
	gate: ActivationGate,
	tx: mpsc::UnboundedSender<Job>,
	parser: Option<Arc<dyn ContextParser>>,
	sequence: AtomicU64,
}

/// Accepts contexts from any thread and funnels them to the [`Dispatcher`].
///
/// Cheap to clone; clones share the same gate and queue. Contexts submitted
/// while active reach the dispatcher in submission order. While inactive only
/// the most recent one is kept and it is dispatched on activation.
///
/// # Examples
///
/// ```
/// use waypoint_core::DeepLinkContext;
/// use waypoint_intake::{Admission, DeepLinkIntake};
///
/// let (intake, _dispatcher) = DeepLinkIntake::builder().build();
///
/// assert_eq!(
///     intake.submit(DeepLinkContext::event("42", None)),
///     Admission::Deferred { replaced: false }
/// );
/// assert_eq!(
///     intake.submit(DeepLinkContext::restaurant("7", None)),
///     Admission::Deferred { replaced: true }
/// );
/// assert!(intake.became_active());
/// ```
#[derive(Clone)]
pub struct DeepLinkIntake {
	inner: Arc<IntakeInner>,
}

impl fmt::Debug for DeepLinkIntake {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DeepLinkIntake")
			.field("gate", &self.inner.gate)
			.field("parser", &self.inner.parser.is_some())
			.field("submitted", &self.inner.sequence.load(Ordering::Relaxed))
			.finish()
	}
}

impl DeepLinkIntake {
	pub fn builder() -> DeepLinkIntakeBuilder {
		DeepLinkIntakeBuilder::default()
	}

	/// Submits a context. `None` stands for a trigger the parser did not
	/// recognize and is a no-op.
	///
	/// Never blocks on routing; only the gate lock is taken.
	pub fn submit(&self, context: impl Into<Option<DeepLinkContext>>) -> Admission {
		let Some(context) = context.into() else {
			tracing::debug!("ignoring unrecognized deep link");
			return Admission::Ignored;
		};

		let mut sent = true;
		let decision = self
			.inner
			.gate
			.admit(context, |context| sent = self.enqueue(context));

		match decision {
			GateDecision::RunNow if sent => Admission::Dispatched,
			GateDecision::RunNow => Admission::Dropped,
			GateDecision::Deferred { replaced } => {
				tracing::debug!(replaced, "deep link deferred until activation");
				Admission::Deferred { replaced }
			}
		}
	}

	/// Parses and submits an OS-delivered URL.
	pub fn submit_url(&self, url: &Url) -> Admission {
		let Some(parser) = self.parser() else {
			return Admission::Ignored;
		};
		let context = parser.parse_url(url);
		if context.is_none() {
			tracing::debug!(url = %url, "parser did not recognize url");
		}
		self.submit(context)
	}

	/// Parses and submits a raw link string.
	pub fn submit_link(&self, raw: &str) -> Admission {
		let Some(parser) = self.parser() else {
			return Admission::Ignored;
		};
		match parser.parse_str(raw) {
			Ok(context) => self.submit(context),
			Err(err) => {
				tracing::debug!(error = %err, "dropping deep link");
				Admission::Ignored
			}
		}
	}

	/// Parses and submits an attribution session payload.
	pub fn submit_attribution(&self, payload: &AttributionPayload) -> Admission {
		let Some(parser) = self.parser() else {
			return Admission::Ignored;
		};
		let context = parser.parse_attribution(payload);
		if context.is_none() {
			tracing::debug!(keys = payload.len(), "attribution payload carried no deep link");
		}
		self.submit(context)
	}

	/// Resolves the URL of a push payload (`data.url`, then `url`) and
	/// submits it through [`submit_url`](Self::submit_url).
	pub fn submit_push(&self, payload: &Value) -> Admission {
		match resolve_push_url(payload) {
			Some(url) => self.submit_url(&url),
			None => {
				tracing::debug!(error = %DeeplinkError::MissingPushUrl, "dropping push tap");
				Admission::Ignored
			}
		}
	}

	/// Host lifecycle hook: the app became active and interactive.
	///
	/// Returns true if a deferred context was dispatched.
	pub fn became_active(&self) -> bool {
		let mut sent = false;
		let replayed = self.inner.gate.activate(|context| {
			sent = self.enqueue(context);
		});
		let dispatched = replayed && sent;
		tracing::debug!(replayed, dispatched, "app became active");
		dispatched
	}

	/// Host lifecycle hook: the app resigned active. Routing already in
	/// flight is not cancelled.
	pub fn resigned_active(&self) {
		self.inner.gate.deactivate();
		tracing::debug!("app resigned active");
	}

	pub fn gate(&self) -> &ActivationGate {
		&self.inner.gate
	}

	/// Returns true once the dispatcher has been dropped.
	pub fn is_closed(&self) -> bool {
		self.inner.tx.is_closed()
	}

	fn parser(&self) -> Option<&dyn ContextParser> {
		let parser = self.inner.parser.as_deref();
		if parser.is_none() {
			tracing::warn!("no context parser configured; dropping raw trigger");
		}
		parser
	}

	fn enqueue(&self, context: DeepLinkContext) -> bool {
		let sequence = self.inner.sequence.fetch_add(1, Ordering::Relaxed);
		tracing::debug!(context = %context, sequence, "deep link queued");
		match self.inner.tx.send(Job { context, sequence }) {
			Ok(()) => true,
			Err(mpsc::error::SendError(job)) => {
				tracing::warn!(
					context = %job.context,
					error = %DeeplinkError::DispatcherClosed,
					"dropping deep link"
				);
				false
			}
		}
	}
}

/// Builder for a connected [`DeepLinkIntake`] and [`Dispatcher`] pair.
#[derive(Default)]
pub struct DeepLinkIntakeBuilder {
	activation: ActivationState,
	parser: Option<Arc<dyn ContextParser>>,
	serializer: Option<DispatchSerializer>,
}

impl DeepLinkIntakeBuilder {
	/// Initial gate state. Defaults to [`ActivationState::Inactive`].
	pub fn activation(mut self, activation: ActivationState) -> Self {
		self.activation = activation;
		self
	}

	/// Parser used by the `submit_url`, `submit_link`, `submit_attribution`
	/// and `submit_push` entry points.
	pub fn parser<P>(mut self, parser: P) -> Self
	where
		P: ContextParser + 'static,
	{
		self.parser = Some(Arc::new(parser));
		self
	}

	/// Shares a serializer with other UI work that must not interleave with
	/// route cycles.
	pub fn serializer(mut self, serializer: DispatchSerializer) -> Self {
		self.serializer = Some(serializer);
		self
	}

	pub fn build(self) -> (DeepLinkIntake, Dispatcher) {
		let (tx, rx) = mpsc::unbounded_channel();
		let intake = DeepLinkIntake {
			inner: Arc::new(IntakeInner {
				gate: ActivationGate::with_state(self.activation),
				tx,
				parser: self.parser,
				sequence: AtomicU64::new(0),
			}),
		};
		let dispatcher = Dispatcher::new(rx, self.serializer.unwrap_or_default());
		(intake, dispatcher)
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;
	use serde_json::json;

	use super::*;

	fn parser(url: &Url) -> Option<DeepLinkContext> {
		match (url.host_str(), url.path().trim_start_matches('/')) {
			(Some("restaurant"), id) if !id.is_empty() => Some(DeepLinkContext::restaurant(id, None)),
			(Some("video"), _) => Some(DeepLinkContext::Video),
			_ => None,
		}
	}

	#[rstest]
	fn test_none_is_ignored() {
		let (intake, _dispatcher) = DeepLinkIntake::builder().build();

		assert_eq!(intake.submit(None), Admission::Ignored);
		assert!(!intake.gate().has_pending());
	}

	#[rstest]
	fn test_parser_miss_never_occupies_slot() {
		let (intake, _dispatcher) = DeepLinkIntake::builder().parser(parser).build();
		intake.submit(DeepLinkContext::Notifications);

		assert_eq!(intake.submit_link("myapp://nowhere"), Admission::Ignored);
		assert_eq!(intake.submit_link("not a url"), Admission::Ignored);

		let mut replayed = None;
		intake.gate().activate(|context| replayed = Some(context));
		assert_eq!(replayed, Some(DeepLinkContext::Notifications));
	}

	#[rstest]
	fn test_raw_triggers_without_parser() {
		let (intake, _dispatcher) = DeepLinkIntake::builder().build();
		let url = Url::parse("myapp://video").unwrap();

		assert_eq!(intake.submit_url(&url), Admission::Ignored);
		assert_eq!(intake.submit_push(&json!({ "url": "myapp://video" })), Admission::Ignored);
	}

	#[rstest]
	#[case(json!({ "data": { "url": "myapp://restaurant/7" } }), Admission::Deferred { replaced: false })]
	#[case(json!({ "url": "myapp://video" }), Admission::Deferred { replaced: false })]
	#[case(json!({ "url": "myapp://nowhere" }), Admission::Ignored)]
	#[case(json!({ "aps": { "alert": "hi" } }), Admission::Ignored)]
	fn test_push_payloads(#[case] payload: Value, #[case] expected: Admission) {
		let (intake, _dispatcher) = DeepLinkIntake::builder().parser(parser).build();

		assert_eq!(intake.submit_push(&payload), expected);
	}

	#[rstest]
	fn test_attribution_payload() {
		let (intake, _dispatcher) = DeepLinkIntake::builder()
			.activation(ActivationState::Active)
			.parser(parser)
			.build();
		let mut payload = AttributionPayload::new();
		payload.insert("deep_link_value".into(), json!("myapp://restaurant/9"));

		assert_eq!(intake.submit_attribution(&payload), Admission::Dispatched);
		assert_eq!(intake.submit_attribution(&AttributionPayload::new()), Admission::Ignored);
	}

	#[rstest]
	fn test_dropped_after_dispatcher_gone() {
		let (intake, dispatcher) = DeepLinkIntake::builder()
			.activation(ActivationState::Active)
			.build();
		drop(dispatcher);

		assert!(intake.is_closed());
		assert_eq!(intake.submit(DeepLinkContext::Video), Admission::Dropped);
	}

	#[rstest]
	fn test_replay_dropped_after_dispatcher_gone() {
		let (intake, dispatcher) = DeepLinkIntake::builder().build();
		assert_eq!(
			intake.submit(DeepLinkContext::Video),
			Admission::Deferred { replaced: false }
		);
		drop(dispatcher);

		assert!(!intake.became_active());
		assert!(!intake.gate().has_pending());
	}

	#[rstest]
	fn test_resign_defers_again() {
		let (intake, _dispatcher) = DeepLinkIntake::builder()
			.activation(ActivationState::Active)
			.build();

		intake.resigned_active();

		assert_eq!(
			intake.submit(DeepLinkContext::LoyaltyCard),
			Admission::Deferred { replaced: false }
		);
		assert!(intake.became_active());
		assert!(!intake.became_active());
	}
}
