//! Fixed-interval pass scheduling
//!
//! Passes start every `interval`. The time a pass takes is absorbed into
//! the wait that follows it, and a pass that overruns the interval is
//! followed by the next one right away. Only one pass is ever in flight.

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::error::MirrorError;
use crate::journal::Journal;
use crate::reconcile::Reconciler;
use crate::types::PassReport;

/// Wait before the next pass, given how long the last one took
pub fn next_delay(interval: Duration, elapsed: Duration) -> Duration {
	interval.saturating_sub(elapsed)
}

/// Something that runs one pass to completion
#[async_trait]
pub trait PassRunner: Send {
	async fn run_pass(&mut self) -> Result<PassReport, MirrorError>;
}

/// Production runner: reconcile, then journal the result
#[derive(Debug, Clone)]
pub struct MirrorJob {
	reconciler: Reconciler,
	journal: Journal,
}

impl MirrorJob {
	pub fn new(reconciler: Reconciler, journal: Journal) -> Self {
		MirrorJob { reconciler, journal }
	}

	/// Run one pass on the current thread
	pub fn run_blocking(&self) -> PassReport {
		let report = self.reconciler.run_pass();
		self.journal.record(&report);
		report
	}
}

#[async_trait]
impl PassRunner for MirrorJob {
	async fn run_pass(&mut self) -> Result<PassReport, MirrorError> {
		let job = self.clone();
		let report = tokio::task::spawn_blocking(move || job.run_blocking()).await?;
		Ok(report)
	}
}

/// Owns the loop, the interval and the runner
pub struct Scheduler<R: PassRunner> {
	interval: Duration,
	runner: R,
}

impl<R: PassRunner> Scheduler<R> {
	pub fn new(interval: Duration, runner: R) -> Self {
		Scheduler { interval, runner }
	}

	pub fn interval(&self) -> Duration {
		self.interval
	}

	/// Loop until `shutdown` flips to true (or its sender goes away).
	/// A pass that is running when shutdown arrives is finished first. A
	/// pass that fails is logged and the cadence goes on. Returns the
	/// number of passes run.
	pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> u64 {
		let mut passes = 0u64;
		info!("Mirroring every {}s", self.interval.as_secs_f64());

		loop {
			if *shutdown.borrow() {
				break;
			}

			let started = Instant::now();
			let result = self.runner.run_pass().await;
			passes += 1;

			let delay = next_delay(self.interval, started.elapsed());
			match result {
				Ok(report) => debug!(
					"Pass {} done with {} outcomes, next in {:?}",
					passes,
					report.outcomes.len(),
					delay
				),
				Err(e) => error!("Pass {} failed: {}, next in {:?}", passes, e, delay),
			}

			if *shutdown.borrow() {
				break;
			}
			tokio::select! {
				biased;
				changed = shutdown.changed() => {
					if changed.is_err() || *shutdown.borrow() {
						break;
					}
				}
				_ = tokio::time::sleep(delay) => {}
			}
		}

		info!("Scheduler stopped after {} passes", passes);
		passes
	}
}


// vim: ts=4
