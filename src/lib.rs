//! # replicr - One-way periodic directory mirroring
//!
//! replicr keeps a destination directory tree identical to a source tree.
//! Every pass removes destination items missing from the source, creates
//! missing directories and copies new or changed files. Files are compared
//! by size and modification time, never by content.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use replicr::reconcile::Reconciler;
//!
//! let report = Reconciler::new("./data", "./mirror").run_pass();
//! for outcome in &report.outcomes {
//!     println!("{}", outcome);
//! }
//! ```
//!
//! ## Periodic mirroring
//!
//! ```rust,ignore
//! use replicr::{journal::Journal, reconcile::Reconciler};
//! use replicr::scheduler::{MirrorJob, Scheduler};
//!
//! #[tokio::main]
//! async fn main() {
//!     let job = MirrorJob::new(Reconciler::new("./data", "./mirror"), Journal::new("sync.log", true));
//!     let shutdown = replicr::utils::shutdown_channel();
//!     let passes = Scheduler::new(std::time::Duration::from_secs(60), job).run(shutdown).await;
//!     println!("{} passes", passes);
//! }
//! ```

pub mod compare;
pub mod config;
pub mod error;
pub mod journal;
pub mod logging;
pub mod reconcile;
pub mod scheduler;
pub mod types;
pub mod utils;
pub mod validation;
pub mod walk;

// Re-export commonly used types
pub use config::{Config, Settings};
pub use error::MirrorError;
pub use reconcile::Reconciler;
pub use types::{Action, ItemKind, Level, Outcome, PassReport};

// vim: ts=4
