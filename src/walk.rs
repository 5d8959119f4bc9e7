//! Directory tree traversal
//!
//! Both walks list every item below `root` (the root itself excluded) as a
//! full path. Siblings come directories first, then files, each group
//! sorted by name. Symlinks are classified by what they point to but a
//! symlinked directory is never entered.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::types::ItemKind;

/// Children of one directory, split into (descend into, list only)
struct Listing {
	entries: Vec<PathBuf>,
	subdirs: Vec<PathBuf>,
}

fn list_dir(dir: &Path) -> Listing {
	let mut dirs = Vec::new();
	let mut files = Vec::new();
	let mut subdirs = Vec::new();

	let read = match fs::read_dir(dir) {
		Ok(r) => r,
		Err(e) => {
			warn!("Cannot read directory {}: {}", dir.display(), e);
			return Listing { entries: Vec::new(), subdirs };
		}
	};

	for entry_result in read {
		let entry = match entry_result {
			Ok(e) => e,
			Err(e) => {
				debug!("Error reading directory entry in {}: {}", dir.display(), e);
				continue;
			}
		};
		let path = entry.path();

		// file_type() does not follow symlinks, so linked dirs are not entered
		if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
			subdirs.push(path.clone());
		}
		match ItemKind::of(&path) {
			ItemKind::Dir => dirs.push(path),
			ItemKind::File => files.push(path),
		}
	}

	dirs.sort();
	files.sort();
	subdirs.sort();
	dirs.append(&mut files);
	Listing { entries: dirs, subdirs }
}

/// Every item below `root`, each directory listed before its contents
pub fn pre_order(root: &Path) -> Vec<PathBuf> {
	let mut out = Vec::new();
	pre_order_into(root, &mut out);
	out
}

fn pre_order_into(dir: &Path, out: &mut Vec<PathBuf>) {
	let listing = list_dir(dir);
	out.extend(listing.entries);
	for sub in &listing.subdirs {
		pre_order_into(sub, out);
	}
}

/// Every item below `root`, the contents of a directory listed before it
pub fn post_order(root: &Path) -> Vec<PathBuf> {
	let mut out = Vec::new();
	post_order_into(root, &mut out);
	out
}

fn post_order_into(dir: &Path, out: &mut Vec<PathBuf>) {
	let listing = list_dir(dir);
	for sub in &listing.subdirs {
		post_order_into(sub, out);
	}
	out.extend(listing.entries);
}

/// Map `path` under `from_root` to the same relative path under `to_root`
pub fn counterpart(path: &Path, from_root: &Path, to_root: &Path) -> PathBuf {
	match path.strip_prefix(from_root) {
		Ok(relative) => to_root.join(relative),
		Err(_) => to_root.join(path),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	fn build_tree(root: &Path) {
		fs::create_dir_all(root.join("a/b")).unwrap();
		fs::create_dir_all(root.join("c")).unwrap();
		fs::write(root.join("z.txt"), "z").unwrap();
		fs::write(root.join("a/one.txt"), "1").unwrap();
		fs::write(root.join("a/b/two.txt"), "2").unwrap();
	}

	fn relative(root: &Path, paths: Vec<PathBuf>) -> Vec<String> {
		paths
			.iter()
			.map(|p| p.strip_prefix(root).unwrap().to_string_lossy().into_owned())
			.collect()
	}

	#[test]
	fn test_pre_order_parents_first() {
		let tmp = TempDir::new().unwrap();
		build_tree(tmp.path());

		let items = relative(tmp.path(), pre_order(tmp.path()));
		assert_eq!(items, vec!["a", "c", "z.txt", "a/b", "a/one.txt", "a/b/two.txt"]);
	}

	#[test]
	fn test_post_order_children_first() {
		let tmp = TempDir::new().unwrap();
		build_tree(tmp.path());

		let items = relative(tmp.path(), post_order(tmp.path()));
		assert_eq!(items, vec!["a/b/two.txt", "a/b", "a/one.txt", "a", "c", "z.txt"]);
	}

	#[test]
	fn test_empty_root() {
		let tmp = TempDir::new().unwrap();
		assert!(pre_order(tmp.path()).is_empty());
		assert!(post_order(tmp.path()).is_empty());
	}

	#[test]
	fn test_unreadable_root_is_empty() {
		let tmp = TempDir::new().unwrap();
		assert!(pre_order(&tmp.path().join("nope")).is_empty());
	}

	#[test]
	fn test_counterpart() {
		let mapped = counterpart(Path::new("/src/a/b.txt"), Path::new("/src"), Path::new("/dst"));
		assert_eq!(mapped, PathBuf::from("/dst/a/b.txt"));
	}

	#[cfg(unix)]
	#[test]
	fn test_symlinked_dir_listed_but_not_entered() {
		let tmp = TempDir::new().unwrap();
		fs::create_dir(tmp.path().join("real")).unwrap();
		fs::write(tmp.path().join("real/f"), "f").unwrap();
		std::os::unix::fs::symlink(tmp.path().join("real"), tmp.path().join("link")).unwrap();

		let items = relative(tmp.path(), pre_order(tmp.path()));
		assert_eq!(items, vec!["link", "real", "real/f"]);
	}
}

// vim: ts=4
