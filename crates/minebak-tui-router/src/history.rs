// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Navigation history the router drives.
pub trait History {
	fn location(&self) -> &str;

	fn push(&mut self, path: &str);

	fn replace(&mut self, path: &str);

	/// Move `delta` entries; returns `false` and stays put when out of range.
	fn go(&mut self, delta: isize) -> bool;

	fn can_go(&self, delta: isize) -> bool;
}

/// History kept entirely in memory, starting at `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
	entries: Vec<String>,
	position: usize,
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryHistory {
	pub fn new() -> Self {
		Self::with_initial("/")
	}

	pub fn with_initial(path: impl Into<String>) -> Self {
		Self {
			entries: vec![path.into()],
			position: 0,
		}
	}

	pub fn entries(&self) -> &[String] {
		&self.entries
	}

	pub fn position(&self) -> usize {
		self.position
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	fn target(&self, delta: isize) -> Option<usize> {
		let target = self.position.checked_add_signed(delta)?;
		(target < self.entries.len()).then_some(target)
	}
}

impl History for MemoryHistory {
	fn location(&self) -> &str {
		&self.entries[self.position]
	}

	fn push(&mut self, path: &str) {
		self.entries.truncate(self.position + 1);
		self.entries.push(path.to_string());
		self.position = self.entries.len() - 1;
	}

	fn replace(&mut self, path: &str) {
		self.entries[self.position] = path.to_string();
	}

	fn go(&mut self, delta: isize) -> bool {
		match self.target(delta) {
			Some(target) => {
				self.position = target;
				true
			}
			None => false,
		}
	}

	fn can_go(&self, delta: isize) -> bool {
		self.target(delta).is_some()
	}
}
