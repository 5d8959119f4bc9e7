//! Path checks for the source/destination pair
//!
//! The destination may not exist yet, so nesting is judged lexically on
//! absolute paths rather than on canonicalized ones.

use std::path::{Component, Path, PathBuf};

use super::ValidationError;

/// Absolute, lexically normalized form of `path` (`.` and `..` resolved
/// without touching the filesystem)
pub fn normalize(path: &Path) -> PathBuf {
	let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
	let mut out = PathBuf::new();
	for component in absolute.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				out.pop();
			}
			other => out.push(other.as_os_str()),
		}
	}
	out
}

/// Check if `path` is `root` or lies below it
pub fn is_path_within_root(path: &Path, root: &Path) -> bool {
	normalize(path).starts_with(normalize(root))
}

/// The two trees must be distinct and must not contain one another
pub fn validate_disjoint_trees(source: &Path, destination: &Path) -> Result<(), ValidationError> {
	if normalize(source) == normalize(destination) {
		return Err(ValidationError::PathError(format!(
			"Source and destination are the same directory: {:?}",
			source
		)));
	}
	if is_path_within_root(destination, source) {
		return Err(ValidationError::PathError(format!(
			"Destination {:?} is inside source directory {:?}",
			destination, source
		)));
	}
	if is_path_within_root(source, destination) {
		return Err(ValidationError::PathError(format!(
			"Source {:?} is inside destination directory {:?}",
			source, destination
		)));
	}
	Ok(())
}


// vim: ts=4
