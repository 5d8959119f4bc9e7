//! Equivalence check between a source item and its destination counterpart
//!
//! Files are compared by size and full-precision modification time only.
//! Contents are never read, so a same-size, same-mtime edit goes unnoticed.

use filetime::FileTime;
use std::fs;
use std::io;
use std::path::Path;

/// Size and modification time of a file, following symlinks
fn stamp(path: &Path) -> io::Result<(u64, FileTime)> {
	let meta = fs::metadata(path)?;
	Ok((meta.len(), FileTime::from_last_modification_time(&meta)))
}

/// Decide whether `destination` has to be (re)written from `source`
///
/// - missing destination: always
/// - source directory: never once the destination exists
/// - source file: unless size and mtime are both exactly equal; an
///   unreadable attribute on either side also means a write
pub fn needs_write(source: &Path, destination: &Path) -> bool {
	if !destination.exists() {
		return true;
	}
	if source.is_dir() {
		return false;
	}

	match (stamp(source), stamp(destination)) {
		(Ok(src), Ok(dst)) => src != dst,
		_ => true,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	fn write_with_mtime(path: &Path, content: &str, mtime: FileTime) {
		fs::write(path, content).unwrap();
		filetime::set_file_mtime(path, mtime).unwrap();
	}

	#[test]
	fn test_missing_destination_needs_write() {
		let tmp = TempDir::new().unwrap();
		let src = tmp.path().join("a.txt");
		fs::write(&src, "hello").unwrap();

		assert!(needs_write(&src, &tmp.path().join("missing.txt")));
	}

	#[test]
	fn test_existing_directory_never_needs_write() {
		let tmp = TempDir::new().unwrap();
		let src = tmp.path().join("src");
		let dst = tmp.path().join("dst");
		fs::create_dir(&src).unwrap();
		fs::create_dir(&dst).unwrap();
		filetime::set_file_mtime(&dst, FileTime::from_unix_time(1, 0)).unwrap();

		assert!(!needs_write(&src, &dst));
	}

	#[test]
	fn test_identical_stamp_is_equivalent() {
		let tmp = TempDir::new().unwrap();
		let mtime = FileTime::from_unix_time(1_600_000_000, 123_456_789);
		let src = tmp.path().join("a");
		let dst = tmp.path().join("b");
		write_with_mtime(&src, "0123456789", mtime);
		// Same size, different content: still considered equivalent
		write_with_mtime(&dst, "abcdefghij", mtime);

		assert!(!needs_write(&src, &dst));
	}

	#[test]
	fn test_size_mismatch_needs_write() {
		let tmp = TempDir::new().unwrap();
		let mtime = FileTime::from_unix_time(1_600_000_000, 0);
		let src = tmp.path().join("a");
		let dst = tmp.path().join("b");
		write_with_mtime(&src, "0123456789", mtime);
		write_with_mtime(&dst, "012345678", mtime);

		assert!(needs_write(&src, &dst));
	}

	#[test]
	fn test_subsecond_mtime_mismatch_needs_write() {
		let tmp = TempDir::new().unwrap();
		let src = tmp.path().join("a");
		let dst = tmp.path().join("b");
		write_with_mtime(&src, "same", FileTime::from_unix_time(1_600_000_000, 500_000_000));
		write_with_mtime(&dst, "same", FileTime::from_unix_time(1_600_000_000, 0));

		assert!(needs_write(&src, &dst));
	}

	#[test]
	fn test_file_over_directory_needs_write() {
		let tmp = TempDir::new().unwrap();
		let src = tmp.path().join("a");
		let dst = tmp.path().join("b");
		fs::write(&src, "x").unwrap();
		fs::create_dir(&dst).unwrap();

		assert!(needs_write(&src, &dst));
	}
}

// vim: ts=4
