//! The UI-thread end of the intake.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tokio::sync::mpsc;
use waypoint_core::DeepLinkContext;
use waypoint_router::{RootContainer, RouteOutcome};

use crate::serializer::DispatchSerializer;

/// A context on its way to the UI thread.
#[derive(Debug)]
pub(crate) struct Job {
	pub(crate) context: DeepLinkContext,
	pub(crate) sequence: u64,
}

/// The mounted [`RootContainer`], shared between the [`Dispatcher`] and the
/// host's view layer.
///
/// Clones refer to the same slot, so a host can keep one after moving the
/// dispatcher into [`Dispatcher::run`] and still mount or swap roots while
/// it runs. A swap takes effect from the next dispatched context; a cycle in
/// flight finishes against the root it started with.
#[derive(Clone, Default)]
pub struct RootSlot {
	root: Rc<RefCell<Option<Rc<dyn RootContainer>>>>,
}

impl fmt::Debug for RootSlot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RootSlot")
			.field("mounted", &self.root.borrow().as_ref().map(|root| root.mode()))
			.finish()
	}
}

impl RootSlot {
	pub fn new() -> Self {
		Self::default()
	}

	/// Mounts the live root, replacing the previous one.
	pub fn mount(&self, root: Rc<dyn RootContainer>) -> Option<Rc<dyn RootContainer>> {
		tracing::debug!(mode = %root.mode(), "root container mounted");
		self.root.borrow_mut().replace(root)
	}

	pub fn unmount(&self) -> Option<Rc<dyn RootContainer>> {
		let previous = self.root.borrow_mut().take();
		if let Some(root) = &previous {
			tracing::debug!(mode = %root.mode(), "root container unmounted");
		}
		previous
	}

	pub fn is_mounted(&self) -> bool {
		self.root.borrow().is_some()
	}

	/// The root the next context will be routed to.
	pub fn current(&self) -> Option<Rc<dyn RootContainer>> {
		self.root.borrow().clone()
	}
}

/// Runs queued contexts against the mounted [`RootContainer`], one route
/// cycle at a time.
///
/// The dispatcher is not `Send`: it lives on the UI thread, typically inside
/// a [`tokio::task::LocalSet`] or whatever drives the host's main loop.
/// Take a [`RootSlot`] with [`Dispatcher::root_slot`] before handing the
/// dispatcher to [`Dispatcher::run`] to keep mounting roots afterwards.
pub struct Dispatcher {
	rx: mpsc::UnboundedReceiver<Job>,
	serializer: DispatchSerializer,
	slot: RootSlot,
}

impl fmt::Debug for Dispatcher {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Dispatcher")
			.field("serializer", &self.serializer)
			.field("slot", &self.slot)
			.finish()
	}
}

impl Dispatcher {
	pub(crate) fn new(rx: mpsc::UnboundedReceiver<Job>, serializer: DispatchSerializer) -> Self {
		Self {
			rx,
			serializer,
			slot: RootSlot::new(),
		}
	}

	/// Mounts the live root, replacing the previous one.
	pub fn mount(&self, root: Rc<dyn RootContainer>) -> Option<Rc<dyn RootContainer>> {
		self.slot.mount(root)
	}

	pub fn unmount(&self) -> Option<Rc<dyn RootContainer>> {
		self.slot.unmount()
	}

	pub fn is_mounted(&self) -> bool {
		self.slot.is_mounted()
	}

	/// A handle on this dispatcher's mounted root that outlives `run`.
	pub fn root_slot(&self) -> RootSlot {
		self.slot.clone()
	}

	pub fn serializer(&self) -> &DispatchSerializer {
		&self.serializer
	}

	/// Routes queued contexts until every [`DeepLinkIntake`] handle is gone.
	///
	/// Returns how many contexts reached a root container.
	///
	/// [`DeepLinkIntake`]: crate::DeepLinkIntake
	pub async fn run(mut self) -> usize {
		let mut routed = 0;
		while let Some(job) = self.rx.recv().await {
			if self.dispatch(job).await.is_some() {
				routed += 1;
			}
		}
		tracing::debug!(routed, "deep link intake closed");
		routed
	}

	/// Routes what is queued right now, without waiting for more.
	///
	/// Returns how many contexts reached a root container.
	pub async fn run_pending(&mut self) -> usize {
		let mut routed = 0;
		while let Ok(job) = self.rx.try_recv() {
			if self.dispatch(job).await.is_some() {
				routed += 1;
			}
		}
		routed
	}

	async fn dispatch(&self, job: Job) -> Option<RouteOutcome> {
		let Job { context, sequence } = job;

		let _permit = match self.serializer.acquire().await {
			Ok(permit) => permit,
			Err(err) => {
				tracing::warn!(context = %context, sequence, error = %err, "dropping deep link");
				return None;
			}
		};

		let Some(root) = self.slot.current() else {
			tracing::warn!(context = %context, sequence, "no root container mounted; dropping deep link");
			return None;
		};

		tracing::debug!(context = %context, sequence, mode = %root.mode(), "dispatching deep link");
		let outcome = root.handle(context).await;
		tracing::debug!(sequence, ?outcome, "deep link routed");
		Some(outcome)
	}
}
