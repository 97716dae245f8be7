//! Single-flight admission of route cycles.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError};
use waypoint_core::{DeeplinkError, DeeplinkResult};

/// A capacity-1 critical section around route cycles.
///
/// A [`DispatchPermit`] is held from the start of Resetting until the route
/// is back at Idle. Waiters are admitted in the order they started waiting.
///
/// Cheap to clone; clones share the same permit.
#[derive(Debug, Clone)]
pub struct DispatchSerializer {
	permit: Arc<Semaphore>,
	completed: Arc<AtomicU64>,
}

impl Default for DispatchSerializer {
	fn default() -> Self {
		Self::new()
	}
}

impl DispatchSerializer {
	pub fn new() -> Self {
		Self {
			permit: Arc::new(Semaphore::new(1)),
			completed: Arc::new(AtomicU64::new(0)),
		}
	}

	/// Waits for the permit.
	///
	/// # Errors
	///
	/// Returns [`DeeplinkError::DispatcherClosed`] once the serializer was
	/// closed.
	pub async fn acquire(&self) -> DeeplinkResult<DispatchPermit> {
		let permit = Arc::clone(&self.permit)
			.acquire_owned()
			.await
			.map_err(|_| DeeplinkError::DispatcherClosed)?;
		Ok(self.wrap(permit))
	}

	/// Takes the permit if nothing is in flight.
	pub fn try_acquire(&self) -> DeeplinkResult<Option<DispatchPermit>> {
		match Arc::clone(&self.permit).try_acquire_owned() {
			Ok(permit) => Ok(Some(self.wrap(permit))),
			Err(TryAcquireError::NoPermits) => Ok(None),
			Err(TryAcquireError::Closed) => Err(DeeplinkError::DispatcherClosed),
		}
	}

	/// Returns true if no route cycle is in flight.
	pub fn is_idle(&self) -> bool {
		self.permit.available_permits() == 1
	}

	/// Number of route cycles that have released the permit.
	pub fn completed(&self) -> u64 {
		self.completed.load(Ordering::Acquire)
	}

	/// Rejects every current and future waiter.
	pub fn close(&self) {
		self.permit.close();
	}

	pub fn is_closed(&self) -> bool {
		self.permit.is_closed()
	}

	fn wrap(&self, permit: OwnedSemaphorePermit) -> DispatchPermit {
		DispatchPermit {
			_permit: permit,
			started: Instant::now(),
			completed: Arc::clone(&self.completed),
		}
	}
}

/// Proof that the holder owns the single route slot. Released on drop.
#[derive(Debug)]
pub struct DispatchPermit {
	_permit: OwnedSemaphorePermit,
	started: Instant,
	completed: Arc<AtomicU64>,
}

impl Drop for DispatchPermit {
	fn drop(&mut self) {
		let total = self.completed.fetch_add(1, Ordering::AcqRel) + 1;
		tracing::trace!(
			elapsed_us = self.started.elapsed().as_micros() as u64,
			total,
			"route cycle released dispatch permit"
		);
	}
}
