//! Error types for replicr
//!
//! Only failures that stop the whole program end up here. Failures of a
//! single item during a pass are plain `io::Error`s that get folded into
//! an [`Outcome`](crate::types::Outcome) and never leave the pass.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::validation::ValidationError;

/// Main error type for replicr
#[derive(Debug)]
pub enum MirrorError {
	/// I/O error outside of a pass (config file, runtime setup)
	Io(io::Error),

	/// Settings failed validation
	InvalidConfig(ValidationError),

	/// Config file could not be parsed
	ConfigParse { path: PathBuf, message: String },

	/// Async runtime failure (a pass task panicked or was cancelled)
	Runtime { message: String },
}

impl fmt::Display for MirrorError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			MirrorError::Io(e) => write!(f, "I/O error: {}", e),
			MirrorError::InvalidConfig(e) => write!(f, "Invalid configuration: {}", e),
			MirrorError::ConfigParse { path, message } => {
				write!(f, "Failed to parse config file {}: {}", path.display(), message)
			}
			MirrorError::Runtime { message } => write!(f, "Runtime error: {}", message),
		}
	}
}

impl Error for MirrorError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			MirrorError::Io(e) => Some(e),
			MirrorError::InvalidConfig(e) => Some(e),
			_ => None,
		}
	}
}

impl From<io::Error> for MirrorError {
	fn from(e: io::Error) -> Self {
		MirrorError::Io(e)
	}
}

impl From<ValidationError> for MirrorError {
	fn from(e: ValidationError) -> Self {
		MirrorError::InvalidConfig(e)
	}
}

impl From<tokio::task::JoinError> for MirrorError {
	fn from(e: tokio::task::JoinError) -> Self {
		MirrorError::Runtime { message: e.to_string() }
	}
}


// vim: ts=4
