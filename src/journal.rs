//! Human-readable pass journal
//!
//! Each pass is appended to the log file as one section and echoed to
//! stdout. Journal failures are printed to the console and otherwise
//! ignored: they never affect the mirror itself.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::types::{Action, Outcome, PassReport};

/// Header timestamp format, microsecond precision
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d at %H:%M:%S%.6f";

const NO_CHANGES: &str = "Info: No changes have been made.";

/// Render one report as a journal section, with `extra` written after the
/// report's own outcomes
pub fn render(report: &PassReport, extra: Option<&Outcome>) -> String {
	let mut out = format!(
		"\n\nIn the synchronization of {}, the following updates have been made:\n",
		report.started.format(TIMESTAMP_FORMAT)
	);
	if report.outcomes.is_empty() && extra.is_none() {
		out.push_str(NO_CHANGES);
		out.push('\n');
	} else {
		for outcome in report.outcomes.iter().chain(extra) {
			out.push_str(&outcome.to_string());
			out.push('\n');
		}
	}
	out
}

/// Log file sink with optional console echo
#[derive(Debug, Clone)]
pub struct Journal {
	path: PathBuf,
	echo: bool,
}

impl Journal {
	pub fn new(path: impl Into<PathBuf>, echo: bool) -> Self {
		Journal { path: path.into(), echo }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Write the report to the log file and the console
	pub fn record(&self, report: &PassReport) {
		let created = if self.path.exists() {
			None
		} else {
			match fs::File::create(&self.path) {
				Ok(_) => Some(Outcome::info(
					Action::LogFile,
					format!("Created log at {} because it didn't exist.", self.path.display()),
				)),
				Err(e) => {
					self.console_error(&format!(
						"Error: Log at {} didn't exist and failed to create it due to {}.",
						self.path.display(),
						e
					));
					None
				}
			}
		};

		let section = render(report, created.as_ref());
		if self.echo {
			print!("{}", section);
			let _ = io::stdout().flush();
		}

		if let Err(e) = self.append(&section) {
			self.console_error(&format!(
				"Error: Failed to open {} for writing due to {}.",
				self.path.display(),
				e
			));
		}
	}

	fn append(&self, section: &str) -> io::Result<()> {
		let mut file = OpenOptions::new().append(true).open(&self.path)?;
		file.write_all(section.as_bytes())?;
		file.flush()
	}

	fn console_error(&self, message: &str) {
		warn!("{}", message);
		println!("{}", message);
	}
}


// vim: ts=4
