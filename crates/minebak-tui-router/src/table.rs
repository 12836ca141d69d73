// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::HashSet;

use crate::error::RouterError;

/// A path-to-component binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry<V> {
	pub path: &'static str,
	pub component: V,
}

impl<V> RouteEntry<V> {
	pub const fn new(path: &'static str, component: V) -> Self {
		Self { path, component }
	}
}

/// Canonical form used for matching: no query or fragment, no trailing
/// slash (except the root), lowercase.
pub fn normalize_path(path: &str) -> String {
	let path = path.split(['?', '#']).next().unwrap_or_default().trim();
	let trimmed = path.trim_end_matches('/');
	if trimmed.is_empty() && path.starts_with('/') {
		return "/".to_string();
	}
	trimmed.to_lowercase()
}

/// Check that every path is non-empty, absolute and unique.
pub fn validate_table<V>(table: &[RouteEntry<V>]) -> Result<(), RouterError> {
	if table.is_empty() {
		return Err(RouterError::EmptyTable);
	}

	let mut seen = HashSet::new();
	for (index, entry) in table.iter().enumerate() {
		if entry.path.trim().is_empty() {
			return Err(RouterError::EmptyPath { index });
		}
		if !entry.path.starts_with('/') {
			return Err(RouterError::NotAbsolute(entry.path.to_string()));
		}
		if !seen.insert(normalize_path(entry.path)) {
			return Err(RouterError::DuplicatePath(entry.path.to_string()));
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_normalize_path() {
		assert_eq!(normalize_path("/"), "/");
		assert_eq!(normalize_path("///"), "/");
		assert_eq!(normalize_path("/About/"), "/about");
		assert_eq!(normalize_path("/saves?tab=1"), "/saves");
		assert_eq!(normalize_path("/saves#top"), "/saves");
		assert_eq!(normalize_path(""), "");
	}

	#[test]
	fn test_validate_accepts_disjoint_literals() {
		let table = [RouteEntry::new("/", 0), RouteEntry::new("/a", 1), RouteEntry::new("/b", 2)];
		assert!(validate_table(&table).is_ok());
	}

	#[test]
	fn test_validate_rejects_empty_table() {
		let table: [RouteEntry<u8>; 0] = [];
		assert_eq!(validate_table(&table), Err(RouterError::EmptyTable));
	}

	#[test]
	fn test_validate_rejects_empty_path() {
		let table = [RouteEntry::new("/", 0), RouteEntry::new("", 1)];
		assert_eq!(validate_table(&table), Err(RouterError::EmptyPath { index: 1 }));
	}

	#[test]
	fn test_validate_rejects_relative_path() {
		let table = [RouteEntry::new("about", 0)];
		assert_eq!(
			validate_table(&table),
			Err(RouterError::NotAbsolute("about".to_string()))
		);
	}

	#[test]
	fn test_validate_rejects_duplicates_after_normalization() {
		let table = [RouteEntry::new("/about", 0), RouteEntry::new("/About/", 1)];
		assert_eq!(
			validate_table(&table),
			Err(RouterError::DuplicatePath("/About/".to_string()))
		);
	}
}
