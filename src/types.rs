//! Core data types shared by the reconciler, the journal and the scheduler

use chrono::{DateTime, Local};
use std::fmt;
use std::path::Path;

/// Kind of a tree item
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ItemKind {
	File,
	Dir,
}

impl ItemKind {
	/// Classify a path, following symlinks. Anything that is not a
	/// directory (including a dangling link) counts as a file.
	pub fn of(path: &Path) -> ItemKind {
		if path.is_dir() {
			ItemKind::Dir
		} else {
			ItemKind::File
		}
	}
}

/// Severity of an outcome
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Level {
	Info,
	Error,
}

impl fmt::Display for Level {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Level::Info => write!(f, "Info"),
			Level::Error => write!(f, "Error"),
		}
	}
}

/// What an outcome is about
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
	/// Source root validation
	SourceCheck,
	/// Creation of the destination root
	CreateRoot,
	/// Removal of a stale destination item
	Remove,
	/// Creation of a destination directory
	CreateDir,
	/// Copy of a source file
	Copy,
	/// Creation of the log file itself
	LogFile,
}

/// One line of a pass report
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Outcome {
	level: Level,
	action: Action,
	message: String,
}

impl Outcome {
	pub fn info(action: Action, message: impl Into<String>) -> Self {
		Outcome { level: Level::Info, action, message: message.into() }
	}

	pub fn error(action: Action, message: impl Into<String>) -> Self {
		Outcome { level: Level::Error, action, message: message.into() }
	}

	pub fn level(&self) -> Level {
		self.level
	}

	pub fn action(&self) -> Action {
		self.action
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	pub fn is_error(&self) -> bool {
		self.level == Level::Error
	}
}

impl fmt::Display for Outcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.level, self.message)
	}
}

/// Result of one synchronization pass
#[derive(Clone, Debug)]
pub struct PassReport {
	/// When the pass started
	pub started: DateTime<Local>,

	/// Outcomes in the order they happened
	pub outcomes: Vec<Outcome>,
}

impl PassReport {
	pub fn new(started: DateTime<Local>) -> Self {
		PassReport { started, outcomes: Vec::new() }
	}

	pub fn push(&mut self, outcome: Outcome) {
		self.outcomes.push(outcome);
	}

	/// Nothing happened during the pass
	pub fn is_clean(&self) -> bool {
		self.outcomes.is_empty()
	}

	pub fn error_count(&self) -> usize {
		self.outcomes.iter().filter(|o| o.is_error()).count()
	}

	/// Number of outcomes (of any level) for the given action
	pub fn count(&self, action: Action) -> usize {
		self.outcomes.iter().filter(|o| o.action == action).count()
	}

	/// Successful filesystem changes made to the destination tree
	pub fn changes(&self) -> usize {
		self.outcomes
			.iter()
			.filter(|o| !o.is_error())
			.filter(|o| {
				matches!(o.action, Action::CreateRoot | Action::Remove | Action::CreateDir | Action::Copy)
			})
			.count()
	}
}


// vim: ts=4
