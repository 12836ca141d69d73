// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::error::RouterError;
use crate::history::{History, MemoryHistory};
use crate::table::{normalize_path, validate_table, RouteEntry};

/// Result of a successful navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation<'a, V> {
	/// The history moved to a new entry.
	Changed(&'a RouteEntry<V>),
	/// The target was already current; history untouched.
	Unchanged(&'a RouteEntry<V>),
}

impl<'a, V> Navigation<'a, V> {
	pub fn entry(&self) -> &'a RouteEntry<V> {
		match self {
			Self::Changed(entry) | Self::Unchanged(entry) => entry,
		}
	}

	pub fn is_changed(&self) -> bool {
		matches!(self, Self::Changed(_))
	}
}

#[derive(Debug, Clone)]
pub struct Router<V, H = MemoryHistory> {
	routes: Vec<RouteEntry<V>>,
	keys: Vec<String>,
	history: H,
}

impl<V: Clone, H: History> Router<V, H> {
	pub fn new(history: H, table: &[RouteEntry<V>]) -> Result<Self, RouterError> {
		validate_table(table)?;
		let keys = table.iter().map(|entry| normalize_path(entry.path)).collect();
		let router = Self {
			routes: table.to_vec(),
			keys,
			history,
		};
		if router.current().is_none() {
			tracing::warn!(
				location = router.history.location(),
				"initial history location matches no route"
			);
		}
		tracing::debug!(routes = router.routes.len(), "router created");
		Ok(router)
	}
}

impl<V, H: History> Router<V, H> {
	pub fn routes(&self) -> &[RouteEntry<V>] {
		&self.routes
	}

	pub fn history(&self) -> &H {
		&self.history
	}

	/// Table position of the route matching `path`.
	pub fn index_of(&self, path: &str) -> Option<usize> {
		let key = normalize_path(path);
		self.keys.iter().position(|candidate| *candidate == key)
	}

	pub fn resolve(&self, path: &str) -> Option<&RouteEntry<V>> {
		self.index_of(path).map(|index| &self.routes[index])
	}

	pub fn current(&self) -> Option<&RouteEntry<V>> {
		self.resolve(self.history.location())
	}

	pub fn current_index(&self) -> Option<usize> {
		self.index_of(self.history.location())
	}

	pub fn current_path(&self) -> &str {
		self.history.location()
	}

	pub fn push(&mut self, path: &str) -> Result<Navigation<'_, V>, RouterError> {
		let index = self
			.index_of(path)
			.ok_or_else(|| RouterError::NotFound(path.to_string()))?;
		if self.current_index() == Some(index) {
			return Ok(Navigation::Unchanged(&self.routes[index]));
		}
		let entry = &self.routes[index];
		tracing::debug!(from = self.history.location(), to = entry.path, "push");
		self.history.push(entry.path);
		Ok(Navigation::Changed(entry))
	}

	pub fn replace(&mut self, path: &str) -> Result<Navigation<'_, V>, RouterError> {
		let index = self
			.index_of(path)
			.ok_or_else(|| RouterError::NotFound(path.to_string()))?;
		if self.current_index() == Some(index) {
			return Ok(Navigation::Unchanged(&self.routes[index]));
		}
		let entry = &self.routes[index];
		tracing::debug!(from = self.history.location(), to = entry.path, "replace");
		self.history.replace(entry.path);
		Ok(Navigation::Changed(entry))
	}

	pub fn can_go_back(&self) -> bool {
		self.history.can_go(-1)
	}

	pub fn can_go_forward(&self) -> bool {
		self.history.can_go(1)
	}

	pub fn back(&mut self) -> Option<&RouteEntry<V>> {
		if !self.history.go(-1) {
			return None;
		}
		self.current()
	}

	pub fn forward(&mut self) -> Option<&RouteEntry<V>> {
		if !self.history.go(1) {
			return None;
		}
		self.current()
	}
}
