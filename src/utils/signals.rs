//! Signal handling for graceful termination
//!
//! Signals never kill the process directly. They flip a shutdown flag that
//! the scheduler checks between passes, so a pass in progress always runs
//! to completion.

use tokio::sync::watch;
use tracing::debug;
#[cfg(unix)]
use tracing::warn;

/// Install signal handlers and return the receiving end of the shutdown
/// flag. Handlers are registered before this returns. Must be called from
/// within a tokio runtime.
///
/// If a handler cannot be installed the flag simply never flips.
#[cfg(unix)]
pub fn shutdown_channel() -> watch::Receiver<bool> {
	use tokio::signal::unix::{signal, SignalKind};

	let (tx, rx) = watch::channel(false);

	let sigterm = signal(SignalKind::terminate())
		.map_err(|e| {
			warn!("Failed to setup SIGTERM handler: {}. Process will not handle SIGTERM gracefully.", e)
		})
		.ok();
	let sigint = signal(SignalKind::interrupt())
		.map_err(|e| {
			warn!("Failed to setup SIGINT handler: {}. Process will not handle SIGINT gracefully.", e)
		})
		.ok();

	tokio::spawn(async move {
		let term = async move {
			match sigterm {
				Some(mut s) => s.recv().await,
				None => std::future::pending().await,
			}
		};
		let int = async move {
			match sigint {
				Some(mut s) => s.recv().await,
				None => std::future::pending().await,
			}
		};

		tokio::select! {
			_ = term => debug!("Received SIGTERM, stopping after the current pass..."),
			_ = int => debug!("Received SIGINT, stopping after the current pass..."),
		}
		let _ = tx.send(true);
		// Keep the sender alive so receivers never see a closed channel
		std::future::pending::<()>().await;
	});

	rx
}

#[cfg(not(unix))]
pub fn shutdown_channel() -> watch::Receiver<bool> {
	let (tx, rx) = watch::channel(false);

	tokio::spawn(async move {
		match tokio::signal::ctrl_c().await {
			Ok(()) => {
				debug!("Received Ctrl-C, stopping after the current pass...");
				let _ = tx.send(true);
			}
			Err(e) => tracing::warn!("Failed to setup Ctrl-C handler: {}", e),
		}
		std::future::pending::<()>().await;
	});

	rx
}


// vim: ts=4
