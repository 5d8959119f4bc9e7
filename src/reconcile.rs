//! One-way tree reconciliation
//!
//! A pass makes the destination tree mirror the source tree:
//!
//! 1. validate the source root (fatal for the pass if invalid)
//! 2. make sure the destination root exists (fatal if it cannot be created)
//! 3. remove destination items whose relative path is absent from the
//!    source, children before parents
//! 4. create directories and copy files that are missing or stale,
//!    parents before children
//!
//! Every filesystem mutation is a small function returning `io::Result`.
//! Its result is turned into exactly one [`Outcome`] right at the item
//! boundary, so one failing item never stops the rest of the pass.

use chrono::Local;
use filetime::FileTime;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::compare::needs_write;
use crate::types::{Action, ItemKind, Outcome, PassReport};
use crate::walk::{self, counterpart};

/// Mirrors one source tree onto one destination tree
#[derive(Debug, Clone)]
pub struct Reconciler {
	source: PathBuf,
	destination: PathBuf,
}

impl Reconciler {
	pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
		Reconciler { source: source.into(), destination: destination.into() }
	}

	pub fn source(&self) -> &Path {
		&self.source
	}

	pub fn destination(&self) -> &Path {
		&self.destination
	}

	/// Run one synchronization pass. Never fails: everything that goes
	/// wrong ends up as an error outcome in the report.
	pub fn run_pass(&self) -> PassReport {
		let mut report = PassReport::new(Local::now());
		debug!("Pass started: {} -> {}", self.source.display(), self.destination.display());

		if !self.source.is_dir() {
			note(
				&mut report,
				Outcome::error(
					Action::SourceCheck,
					format!(
						"Failed to synchronize '{}' because it does not exist or it is not a directory.",
						self.source.display()
					),
				),
			);
			return report;
		}

		if !self.ensure_destination_root(&mut report) {
			return report;
		}

		let stale = self.stale_items();
		self.apply_removals(&stale, &mut report);
		self.create_missing(&mut report);

		info!(
			"Pass finished: {} changes, {} errors",
			report.changes(),
			report.error_count()
		);
		report
	}

	/// Returns false if the pass cannot continue
	fn ensure_destination_root(&self, report: &mut PassReport) -> bool {
		let dest = &self.destination;
		if dest.is_dir() {
			return true;
		}

		let result = if dest.exists() {
			Err(io::Error::new(io::ErrorKind::AlreadyExists, "it exists and is not a directory"))
		} else {
			fs::create_dir_all(dest)
		};

		match result {
			Ok(()) => {
				note(
					report,
					Outcome::info(
						Action::CreateRoot,
						format!("Created {} because it doesn't exist.", dest.display()),
					),
				);
				true
			}
			Err(e) => {
				note(
					report,
					Outcome::error(
						Action::CreateRoot,
						format!(
							"Failed to create {} due to error: {}. Exiting synchronization.",
							dest.display(),
							e
						),
					),
				);
				false
			}
		}
	}

	/// Destination items with no counterpart in the source, in removal order
	pub fn stale_items(&self) -> Vec<PathBuf> {
		walk::post_order(&self.destination)
			.into_iter()
			.filter(|item| !counterpart(item, &self.destination, &self.source).exists())
			.collect()
	}

	/// Remove `items` in the given order, one outcome per item. Items may
	/// have changed since they were classified; any failure is recorded
	/// and the next item is tried.
	pub fn apply_removals(&self, items: &[PathBuf], report: &mut PassReport) {
		for item in items {
			let outcome = match remove_item(item) {
				Ok(()) => Outcome::info(Action::Remove, format!("Removed {}.", item.display())),
				Err(e) => Outcome::error(
					Action::Remove,
					format!("Failed to remove {} due to error: {}.", item.display(), e),
				),
			};
			note(report, outcome);
		}
	}

	fn create_missing(&self, report: &mut PassReport) {
		for src_item in walk::pre_order(&self.source) {
			let dst_item = counterpart(&src_item, &self.source, &self.destination);
			if !needs_write(&src_item, &dst_item) {
				continue;
			}

			let outcome = match ItemKind::of(&src_item) {
				ItemKind::Dir => match fs::create_dir_all(&dst_item) {
					Ok(()) => {
						Outcome::info(Action::CreateDir, format!("Created {}.", dst_item.display()))
					}
					Err(e) => Outcome::error(
						Action::CreateDir,
						format!("Failed to create {} due to error: {}.", dst_item.display(), e),
					),
				},
				ItemKind::File => match copy_file(&src_item, &dst_item) {
					Ok(()) => Outcome::info(
						Action::Copy,
						format!("{} copied to {}.", src_item.display(), dst_item.display()),
					),
					Err(e) => Outcome::error(
						Action::Copy,
						format!(
							"Failed to copy {} to {} due to error: {}.",
							src_item.display(),
							dst_item.display(),
							e
						),
					),
				},
			};
			note(report, outcome);
		}
	}
}

/// Push an outcome and mirror it to the diagnostic log
fn note(report: &mut PassReport, outcome: Outcome) {
	if outcome.is_error() {
		warn!("{}", outcome.message());
	} else {
		debug!("{}", outcome.message());
	}
	report.push(outcome);
}

/// Remove one item. Directories must be empty; links are removed, not
/// followed. A vanished item surfaces as `NotFound`.
pub fn remove_item(path: &Path) -> io::Result<()> {
	let meta = fs::symlink_metadata(path)?;
	if meta.is_dir() {
		fs::remove_dir(path)
	} else {
		fs::remove_file(path)
	}
}

/// Copy content and permissions of `source` onto `destination`, then
/// apply the source's access and modification times
pub fn copy_file(source: &Path, destination: &Path) -> io::Result<()> {
	let meta = fs::metadata(source)?;
	fs::copy(source, destination)?;
	filetime::set_file_times(
		destination,
		FileTime::from_last_access_time(&meta),
		FileTime::from_last_modification_time(&meta),
	)
}


// vim: ts=4
